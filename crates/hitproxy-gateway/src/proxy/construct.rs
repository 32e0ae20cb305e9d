use std::sync::Arc;

use hitproxy_core::capacity::validate_read_capacity;
use hitproxy_core::error::Result;

use crate::downstream::DownstreamInvoker;
use crate::store::{CounterStore, HitsTable};

use super::handler::{CountingProxy, ProxyTimeouts};

/// Collaborators and settings for a hit counter in front of one downstream.
pub struct HitCounterProps {
    /// Handler whose hits are counted.
    pub downstream: Arc<dyn DownstreamInvoker>,
    /// Store holding the counters.
    pub store: Arc<dyn CounterStore>,
    /// Read capacity for the hits table; `None` means the default of 5.
    pub read_capacity: Option<i64>,
    pub timeouts: ProxyTimeouts,
}

/// Hits table plus the counting handler wired in front of the downstream.
pub struct HitCounter {
    handler: Arc<CountingProxy>,
    table: Arc<HitsTable>,
}

impl HitCounter {
    /// Validates the read capacity before anything is provisioned.
    pub fn new(props: HitCounterProps) -> Result<Self> {
        let read_capacity = validate_read_capacity(props.read_capacity)?;

        let table = Arc::new(HitsTable::provision(props.store, read_capacity));
        let handler = Arc::new(CountingProxy::new(
            Arc::clone(&table),
            props.downstream,
            props.timeouts,
        ));

        Ok(Self { handler, table })
    }

    pub fn handler(&self) -> Arc<CountingProxy> {
        Arc::clone(&self.handler)
    }

    pub fn table(&self) -> Arc<HitsTable> {
        Arc::clone(&self.table)
    }
}
