use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;

use hitproxy_core::error::{HitProxyError, Result};
use hitproxy_core::protocol::{DownstreamResponse, InboundRequest};

use crate::downstream::DownstreamInvoker;
use crate::store::HitsTable;

/// Bounded waits for the two external calls.
#[derive(Debug, Clone, Copy)]
pub struct ProxyTimeouts {
    pub increment: Duration,
    pub invoke: Duration,
}

impl Default for ProxyTimeouts {
    fn default() -> Self {
        Self {
            increment: Duration::from_millis(1000),
            invoke: Duration::from_millis(10000),
        }
    }
}

/// Per-request orchestration. Holds no mutable state; safe to share across
/// any number of concurrent requests.
pub struct CountingProxy {
    table: Arc<HitsTable>,
    downstream: Arc<dyn DownstreamInvoker>,
    timeouts: ProxyTimeouts,
}

impl CountingProxy {
    pub(crate) fn new(
        table: Arc<HitsTable>,
        downstream: Arc<dyn DownstreamInvoker>,
        timeouts: ProxyTimeouts,
    ) -> Self {
        Self {
            table,
            downstream,
            timeouts,
        }
    }

    /// Count, then forward, then return the downstream response untouched.
    ///
    /// A failed count stops the request before the downstream is reached. A
    /// failed forward leaves the count in place.
    pub async fn handle(&self, req: &InboundRequest) -> Result<DownstreamResponse> {
        tracing::debug!(request = ?req, "request");

        let hits = self.count(req.key()).await?;
        tracing::debug!(path = %req.path, hits, "hit recorded");

        let resp = self.forward(req).await?;
        tracing::debug!(path = %req.path, status = resp.status_code(), "downstream response");

        Ok(resp)
    }

    async fn count(&self, key: &str) -> Result<u64> {
        if key.is_empty() {
            return Err(HitProxyError::CounterUnavailable("empty request key".into()));
        }

        match timeout(self.timeouts.increment, self.table.increment(key, 1)).await {
            Ok(Ok(n)) => Ok(n),
            Ok(Err(e)) => {
                tracing::warn!(path = %key, error = %e, "hit increment failed");
                Err(counter_unavailable(e))
            }
            Err(_) => {
                tracing::warn!(path = %key, "hit increment timed out");
                Err(HitProxyError::CounterUnavailable(format!(
                    "increment timed out after {}ms",
                    self.timeouts.increment.as_millis()
                )))
            }
        }
    }

    async fn forward(&self, req: &InboundRequest) -> Result<DownstreamResponse> {
        match timeout(self.timeouts.invoke, self.downstream.invoke(req)).await {
            Ok(Ok(resp)) => Ok(resp),
            Ok(Err(e)) => {
                tracing::warn!(path = %req.path, error = %e, "downstream invoke failed");
                Err(downstream_unavailable(e))
            }
            Err(_) => {
                tracing::warn!(path = %req.path, "downstream invoke timed out");
                Err(HitProxyError::DownstreamUnavailable(format!(
                    "invoke timed out after {}ms",
                    self.timeouts.invoke.as_millis()
                )))
            }
        }
    }
}

fn counter_unavailable(e: HitProxyError) -> HitProxyError {
    match e {
        HitProxyError::CounterUnavailable(_) => e,
        other => HitProxyError::CounterUnavailable(other.to_string()),
    }
}

fn downstream_unavailable(e: HitProxyError) -> HitProxyError {
    match e {
        HitProxyError::DownstreamUnavailable(_) => e,
        other => HitProxyError::DownstreamUnavailable(other.to_string()),
    }
}
