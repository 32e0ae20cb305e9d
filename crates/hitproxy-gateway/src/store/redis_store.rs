//! Redis-backed counters: one hash per table, field = request key.

use std::collections::HashMap;

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, RedisResult};

use hitproxy_core::error::{HitProxyError, Result};

use super::{CounterStore, HitRecord};

pub struct RedisCounterStore {
    conn: ConnectionManager,
    table: String,
}

impl RedisCounterStore {
    pub async fn connect(url: &str, table: impl Into<String>) -> Result<Self> {
        let client = redis::Client::open(url)
            .map_err(|e| HitProxyError::InvalidConfiguration(format!("invalid redis url: {e}")))?;
        let conn = client
            .get_connection_manager()
            .await
            .map_err(|e| HitProxyError::CounterUnavailable(format!("redis connect failed: {e}")))?;
        Ok(Self {
            conn,
            table: table.into(),
        })
    }
}

#[async_trait]
impl CounterStore for RedisCounterStore {
    fn backend(&self) -> &'static str {
        "redis"
    }

    async fn increment(&self, key: &str, delta: u64) -> Result<u64> {
        // HINCRBY is atomic server-side.
        let mut conn = self.conn.clone();
        let res: RedisResult<u64> = conn.hincr(&self.table, key, delta).await;
        res.map_err(|e| HitProxyError::CounterUnavailable(format!("redis HINCRBY failed: {e}")))
    }

    async fn scan(&self) -> Result<Vec<HitRecord>> {
        let mut conn = self.conn.clone();
        let res: RedisResult<HashMap<String, u64>> = conn.hgetall(&self.table).await;
        let all = res
            .map_err(|e| HitProxyError::StoreUnavailable(format!("redis HGETALL failed: {e}")))?;
        Ok(all
            .into_iter()
            .map(|(path, hits)| HitRecord { path, hits })
            .collect())
    }
}
