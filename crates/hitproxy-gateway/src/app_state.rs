//! Shared application state for the hitproxy gateway.
//!
//! Built once at startup. Every fallible step returns `Result` so `main` can
//! report the failure instead of panicking, and configuration is validated
//! before any store connection is opened.

use std::sync::Arc;
use std::time::Duration;

use hitproxy_core::error::Result;

use crate::config::{CounterBackend, ProxyConfig};
use crate::dashboard::HitsDashboard;
use crate::downstream::{DownstreamInvoker, HttpInvoker};
use crate::obs::ProxyMetrics;
use crate::proxy::{CountingProxy, HitCounter, HitCounterProps, ProxyTimeouts};
use crate::store::{CounterStore, HitsTable, MemoryCounterStore, RedisCounterStore};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ProxyConfig,
    proxy: Arc<CountingProxy>,
    table: Arc<HitsTable>,
    dashboard: Arc<HitsDashboard>,
    metrics: Arc<ProxyMetrics>,
}

impl AppState {
    /// Build state with the collaborators named in the config.
    pub async fn from_config(cfg: ProxyConfig) -> Result<Self> {
        cfg.validate()?;

        let downstream: Arc<dyn DownstreamInvoker> =
            Arc::new(HttpInvoker::new(&cfg.downstream.url)?);
        let store: Arc<dyn CounterStore> = match cfg.counter.backend {
            CounterBackend::Memory => Arc::new(MemoryCounterStore::new()),
            CounterBackend::Redis => {
                let url = cfg.counter.redis_url.as_deref().unwrap_or_default();
                Arc::new(RedisCounterStore::connect(url, cfg.counter.table.clone()).await?)
            }
        };

        Self::with_collaborators(cfg, store, downstream)
    }

    /// Build state around injected collaborators.
    pub fn with_collaborators(
        cfg: ProxyConfig,
        store: Arc<dyn CounterStore>,
        downstream: Arc<dyn DownstreamInvoker>,
    ) -> Result<Self> {
        cfg.validate()?;

        let gw = &cfg.gateway;
        let hit_counter = HitCounter::new(HitCounterProps {
            downstream,
            store,
            read_capacity: cfg.counter.read_capacity,
            timeouts: ProxyTimeouts {
                increment: Duration::from_millis(gw.increment_timeout_ms),
                invoke: Duration::from_millis(gw.invoke_timeout_ms),
            },
        })?;

        let table = hit_counter.table();
        let dashboard = Arc::new(HitsDashboard::new(
            cfg.dashboard.title.clone(),
            cfg.dashboard.sort_key()?,
            Arc::clone(&table),
        ));

        tracing::info!(
            table = %cfg.counter.table,
            backend = table.backend(),
            downstream = %cfg.downstream.url,
            "hit counter wired"
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                proxy: hit_counter.handler(),
                table,
                dashboard,
                metrics: Arc::new(ProxyMetrics::default()),
            }),
        })
    }

    pub fn cfg(&self) -> &ProxyConfig {
        &self.inner.cfg
    }

    pub fn proxy(&self) -> Arc<CountingProxy> {
        Arc::clone(&self.inner.proxy)
    }

    pub fn dashboard(&self) -> Arc<HitsDashboard> {
        Arc::clone(&self.inner.dashboard)
    }

    pub fn metrics(&self) -> Arc<ProxyMetrics> {
        Arc::clone(&self.inner.metrics)
    }

    pub fn is_draining(&self) -> bool {
        self.inner.metrics.is_draining()
    }

    pub fn set_draining(&self) {
        self.inner.metrics.set_draining();
    }

    /// Static gauges appended to `/metrics`.
    pub fn metrics_extra(&self) -> Vec<(&'static str, u64)> {
        vec![(
            "hitproxy_read_capacity",
            u64::from(self.inner.table.read_capacity().get()),
        )]
    }
}
