//! Counter store seam.
//!
//! The proxy only ever adds to a counter; it never reads a value back and
//! writes it again. Adapters must make `increment` atomic per key under
//! concurrent callers.

mod memory;
mod redis_store;
mod table;
mod throttle;

use async_trait::async_trait;
use serde::Serialize;

use hitproxy_core::error::Result;

pub use memory::MemoryCounterStore;
pub use redis_store::RedisCounterStore;
pub use table::HitsTable;

/// One counter record: request key and accumulated hits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HitRecord {
    pub path: String,
    pub hits: u64,
}

/// External key-value store with an atomic add primitive.
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Short backend name used in logs.
    fn backend(&self) -> &'static str;

    /// Add `delta` to the record for `key`, creating it on first use.
    /// Returns the count after the add.
    async fn increment(&self, key: &str, delta: u64) -> Result<u64>;

    /// Read every record. All-or-nothing.
    async fn scan(&self) -> Result<Vec<HitRecord>>;
}
