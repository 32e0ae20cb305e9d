use std::sync::Arc;

use hitproxy_core::capacity::ReadCapacity;
use hitproxy_core::error::{HitProxyError, Result};

use super::throttle::ReadThrottle;
use super::{CounterStore, HitRecord};

/// A counter store provisioned with a validated read capacity.
///
/// Writes (increments) go straight to the store. Reads (scans) are limited to
/// `read_capacity` per second.
pub struct HitsTable {
    store: Arc<dyn CounterStore>,
    read_capacity: ReadCapacity,
    reads: ReadThrottle,
}

impl HitsTable {
    /// Only reachable with an already validated capacity.
    pub(crate) fn provision(store: Arc<dyn CounterStore>, read_capacity: ReadCapacity) -> Self {
        tracing::info!(
            backend = store.backend(),
            read_capacity = read_capacity.get(),
            "hits table provisioned"
        );
        Self {
            store,
            read_capacity,
            reads: ReadThrottle::new(read_capacity.get()),
        }
    }

    pub fn read_capacity(&self) -> ReadCapacity {
        self.read_capacity
    }

    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }

    pub async fn increment(&self, key: &str, delta: u64) -> Result<u64> {
        self.store.increment(key, delta).await
    }

    pub async fn scan(&self) -> Result<Vec<HitRecord>> {
        if !self.reads.allow() {
            return Err(HitProxyError::StoreUnavailable("read capacity exceeded".into()));
        }
        self.store.scan().await
    }
}
