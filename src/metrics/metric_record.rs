//! Metric Record - one named result row in the expert-analysis table

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metric Record represents one computed metric, ready to upsert.
///
/// The `name` is the unique key in the results store. Values are validated at
/// construction, so a store never sees NaN or an empty name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricRecord {
    name: String,
    value: f64,
    description: String,
    method: String,
}

impl MetricRecord {
    /// Create a new metric record.
    ///
    /// # Arguments
    ///
    /// * `name` - Unique metric name (e.g., "Correlation Rate vs Total Leave")
    /// * `value` - Metric value
    /// * `description` - Narrative text derived from the value
    /// * `method` - Statistical technique (e.g., "Pearson correlation")
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if the name is blank or the value is not finite
    pub fn new(
        name: impl Into<String>,
        value: f64,
        description: impl Into<String>,
        method: impl Into<String>,
    ) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::InvalidInput("Metric name must not be empty".to_string()));
        }
        if !value.is_finite() {
            return Err(Error::InvalidInput(format!(
                "Metric '{name}' has non-finite value {value}"
            )));
        }
        Ok(Self {
            name,
            value,
            description: description.into(),
            method: method.into(),
        })
    }

    /// Get the metric name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the metric value.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// Get the narrative description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Get the method label.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }
}

/// A metric as persisted, with its surrogate identity and write time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredMetric {
    metric_id: i64,
    record: MetricRecord,
    updated_at: DateTime<Utc>,
}

impl StoredMetric {
    pub(crate) const fn new(metric_id: i64, record: MetricRecord, updated_at: DateTime<Utc>) -> Self {
        Self {
            metric_id,
            record,
            updated_at,
        }
    }

    /// Surrogate identity, stable across updates.
    #[must_use]
    pub const fn metric_id(&self) -> i64 {
        self.metric_id
    }

    /// The stored record.
    #[must_use]
    pub const fn record(&self) -> &MetricRecord {
        &self.record
    }

    /// Time of the last write.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_record_new() {
        let metric = MetricRecord::new("R2", 0.5, "Moderate", "Linear Regression").unwrap();
        assert_eq!(metric.name(), "R2");
        assert!((metric.value() - 0.5).abs() < f64::EPSILON);
        assert_eq!(metric.description(), "Moderate");
        assert_eq!(metric.method(), "Linear Regression");
    }

    #[test]
    fn test_metric_record_rejects_nan() {
        let err = MetricRecord::new("R2", f64::NAN, "", "").unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_metric_record_rejects_blank_name() {
        assert!(MetricRecord::new("  ", 1.0, "", "").is_err());
    }
}
