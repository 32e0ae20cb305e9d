use std::sync::Arc;

use serde::Serialize;

use hitproxy_core::error::{HitProxyError, Result};

use crate::store::{HitRecord, HitsTable};

use super::SortKey;

/// One rendered listing.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub title: String,
    pub sort_by: String,
    pub items: Vec<HitRecord>,
}

pub struct HitsDashboard {
    title: String,
    sort_by: SortKey,
    table: Arc<HitsTable>,
}

impl HitsDashboard {
    pub fn new(title: impl Into<String>, sort_by: SortKey, table: Arc<HitsTable>) -> Self {
        Self {
            title: title.into(),
            sort_by,
            table,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn sort_by(&self) -> SortKey {
        self.sort_by
    }

    /// All records ordered by the configured sort key.
    pub async fn list(&self) -> Result<Vec<HitRecord>> {
        let mut items = self.table.scan().await.map_err(|e| match e {
            HitProxyError::StoreUnavailable(_) => e,
            other => HitProxyError::StoreUnavailable(other.to_string()),
        })?;
        items.sort_by(|a, b| self.sort_by.compare(a, b));
        Ok(items)
    }

    pub async fn snapshot(&self) -> Result<DashboardSnapshot> {
        Ok(DashboardSnapshot {
            title: self.title.clone(),
            sort_by: self.sort_by.to_string(),
            items: self.list().await?,
        })
    }
}
