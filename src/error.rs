//! Error types for hr-analytics
//!
//! One variant per pipeline step so an operator can tell which step failed.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// hr-analytics error types
#[derive(Error, Debug)]
pub enum Error {
    /// Data source unreachable, missing, or misconfigured
    #[error("Connection error: {0}")]
    Connection(String),

    /// Malformed query or incompatible source schema
    #[error("Query error: {0}")]
    Query(String),

    /// Results table could not be created
    #[error("Schema error: {0}\nThe results table could not be ensured; no metrics were written")]
    Schema(String),

    /// Write failed for a specific metric
    #[error("Upsert error for metric '{metric}': {reason}")]
    Upsert {
        /// Name of the metric that failed
        metric: String,
        /// Underlying failure
        reason: String,
    },

    /// Statistics rejected the sample (empty, degenerate variance, ...)
    #[error("Computation error: {0}")]
    Computation(String),

    /// Value failed validation before computation or persistence
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration could not be loaded or is invalid
    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// Build an `Upsert` error for the named metric.
    pub fn upsert(metric: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Upsert {
            metric: metric.into(),
            reason: reason.to_string(),
        }
    }
}
