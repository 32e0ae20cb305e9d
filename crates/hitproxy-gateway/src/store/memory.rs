use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use hitproxy_core::error::Result;

use super::{CounterStore, HitRecord};

/// Process-local counter store for development and tests.
#[derive(Default)]
pub struct MemoryCounterStore {
    map: DashMap<String, AtomicU64>,
}

impl MemoryCounterStore {
    pub fn new() -> Self {
        Self { map: DashMap::new() }
    }

    /// Current count for `key`, if it was ever incremented.
    pub fn get(&self, key: &str) -> Option<u64> {
        self.map.get(key).map(|c| c.value().load(Ordering::Acquire))
    }
}

#[async_trait]
impl CounterStore for MemoryCounterStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn increment(&self, key: &str, delta: u64) -> Result<u64> {
        let counter = self
            .map
            .entry(key.to_string())
            .or_insert_with(|| AtomicU64::new(0));
        Ok(counter.fetch_add(delta, Ordering::AcqRel) + delta)
    }

    async fn scan(&self) -> Result<Vec<HitRecord>> {
        Ok(self
            .map
            .iter()
            .map(|r| HitRecord {
                path: r.key().clone(),
                hits: r.value().load(Ordering::Acquire),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[tokio::test]
    async fn first_increment_creates_record() {
        let store = MemoryCounterStore::new();
        assert_eq!(store.get("/hello"), None);
        assert_eq!(store.increment("/hello", 1).await.unwrap(), 1);
        assert_eq!(store.increment("/hello", 1).await.unwrap(), 2);
        assert_eq!(store.get("/hello"), Some(2));
    }
}
