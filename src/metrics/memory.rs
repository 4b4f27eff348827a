//! In-memory metric store using `DashMap`.
//!
//! Data is lost on process restart. Useful for tests and dry runs that should
//! not touch the results database.

use super::{MetricRecord, MetricStore, StoredMetric};
use crate::Result;
use chrono::Utc;
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

/// In-memory metric store backed by a lock-striped concurrent hashmap.
///
/// `upsert` goes through the map's entry API, which holds the shard lock for
/// the key across the match and the write.
///
/// # Example
///
/// ```rust
/// use hr_analytics::metrics::{MemoryMetricStore, MetricRecord, MetricStore};
///
/// # fn main() -> hr_analytics::Result<()> {
/// let store = MemoryMetricStore::new();
/// store.upsert(&MetricRecord::new("Accuracy", 0.7, "High", "Ordinal")?)?;
/// assert!(store.get("Accuracy")?.is_some());
/// # Ok(())
/// # }
/// ```
pub struct MemoryMetricStore {
    store: DashMap<String, StoredMetric>,
    next_id: AtomicI64,
    schema_ready: AtomicBool,
}

impl MemoryMetricStore {
    /// Create a new in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: DashMap::new(),
            next_id: AtomicI64::new(1),
            schema_ready: AtomicBool::new(false),
        }
    }

    /// Whether `ensure_schema` has run.
    #[must_use]
    pub fn schema_ready(&self) -> bool {
        self.schema_ready.load(Ordering::Acquire)
    }

    /// Check if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Clear all entries. Identities are not reused.
    pub fn clear(&self) {
        self.store.clear();
    }
}

impl Default for MemoryMetricStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricStore for MemoryMetricStore {
    fn ensure_schema(&self) -> Result<()> {
        self.schema_ready.store(true, Ordering::Release);
        Ok(())
    }

    fn upsert(&self, record: &MetricRecord) -> Result<()> {
        let now = Utc::now();
        self.store
            .entry(record.name().to_string())
            .and_modify(|stored| {
                *stored = StoredMetric::new(stored.metric_id(), record.clone(), now);
            })
            .or_insert_with(|| {
                let id = self.next_id.fetch_add(1, Ordering::Relaxed);
                StoredMetric::new(id, record.clone(), now)
            });
        Ok(())
    }

    fn get(&self, name: &str) -> Result<Option<StoredMetric>> {
        Ok(self.store.get(name).map(|v| v.value().clone()))
    }

    fn list(&self) -> Result<Vec<StoredMetric>> {
        let mut all: Vec<StoredMetric> = self.store.iter().map(|e| e.value().clone()).collect();
        all.sort_by_key(StoredMetric::metric_id);
        Ok(all)
    }

    fn count(&self) -> Result<usize> {
        Ok(self.store.len())
    }
}
