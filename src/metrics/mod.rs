//! Metric upsert store
//!
//! Persists [`MetricRecord`]s keyed by name. Every backend must make `upsert`
//! a single atomic match-then-update-or-insert, so concurrent writers of the
//! same metric never produce two rows.
//!
//! # Example
//!
//! ```rust
//! use hr_analytics::metrics::{MemoryMetricStore, MetricRecord, MetricStore};
//!
//! # fn main() -> hr_analytics::Result<()> {
//! let store = MemoryMetricStore::new();
//! store.ensure_schema()?;
//!
//! let r = MetricRecord::new("Regression R2", 0.42, "Moderate", "Linear Regression")?;
//! store.upsert(&r)?;
//! store.upsert(&r)?;
//! assert_eq!(store.count()?, 1);
//! # Ok(())
//! # }
//! ```

mod memory;
mod metric_record;
mod sqlite;

pub use memory::MemoryMetricStore;
pub use metric_record::{MetricRecord, StoredMetric};
pub use sqlite::SqliteMetricStore;

use crate::Result;

/// Idempotent, name-keyed metric storage.
pub trait MetricStore {
    /// Create the results table if absent.
    ///
    /// Safe to call repeatedly and from several processes.
    ///
    /// # Errors
    ///
    /// Returns `Error::Schema` if the table cannot be created
    fn ensure_schema(&self) -> Result<()>;

    /// Insert the record, or update value, description, method and
    /// update time of the existing record with the same name.
    ///
    /// # Errors
    ///
    /// Returns `Error::Upsert` naming the metric
    fn upsert(&self, record: &MetricRecord) -> Result<()>;

    /// Upsert each record in order.
    ///
    /// The default applies records one at a time and stops at the first
    /// failure; records already written stay written. Backends with
    /// transactions override this to commit the batch atomically.
    ///
    /// # Errors
    ///
    /// Returns the first `Error::Upsert` encountered
    fn upsert_many(&self, records: &[MetricRecord]) -> Result<()> {
        for record in records {
            self.upsert(record)?;
        }
        Ok(())
    }

    /// Look up one metric by name.
    ///
    /// # Errors
    ///
    /// Returns `Error::Query` if the store cannot be read
    fn get(&self, name: &str) -> Result<Option<StoredMetric>>;

    /// All metrics, ordered by identity.
    ///
    /// # Errors
    ///
    /// Returns `Error::Query` if the store cannot be read
    fn list(&self) -> Result<Vec<StoredMetric>>;

    /// Number of stored metrics.
    ///
    /// # Errors
    ///
    /// Returns `Error::Query` if the store cannot be read
    fn count(&self) -> Result<usize> {
        self.list().map(|all| all.len())
    }

    /// Release the store's connection, surfacing any error the backend
    /// reports. Stores without a connection do nothing.
    ///
    /// # Errors
    ///
    /// Returns `Error::Connection` if the backend refuses to close
    fn close(self) -> Result<()>
    where
        Self: Sized,
    {
        Ok(())
    }
}

impl<T: MetricStore + ?Sized> MetricStore for &T {
    fn ensure_schema(&self) -> Result<()> {
        (**self).ensure_schema()
    }

    fn upsert(&self, record: &MetricRecord) -> Result<()> {
        (**self).upsert(record)
    }

    fn upsert_many(&self, records: &[MetricRecord]) -> Result<()> {
        (**self).upsert_many(records)
    }

    fn get(&self, name: &str) -> Result<Option<StoredMetric>> {
        (**self).get(name)
    }

    fn list(&self) -> Result<Vec<StoredMetric>> {
        (**self).list()
    }

    fn count(&self) -> Result<usize> {
        (**self).count()
    }
}
