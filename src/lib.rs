//! # hr-analytics: Narrated HR Metrics
//!
//! Small analytics jobs over an HR database. Each job reads a sample,
//! computes a few statistics, turns each value into a narrative sentence and
//! upserts the result into a shared `ExpertAnalysis` table keyed by metric
//! name.
//!
//! ## Pipeline
//!
//! ```text
//! source (read) -> stats -> narrative -> metrics (upsert)
//! ```
//!
//! - [`source`]: scoped SQLite connections returning [`source::Table`]s
//! - [`stats`]: Pearson, Spearman, least squares, ordinal logit
//! - [`narrative`]: one shared threshold-ladder table per metric kind
//! - [`metrics`]: idempotent, atomic upsert stores (SQLite, in-memory)
//! - [`analysis`]: the orchestrator and the two shipped analyses
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use hr_analytics::analysis::{run_analysis, RateVsLeave};
//! use hr_analytics::config::Config;
//! use hr_analytics::metrics::SqliteMetricStore;
//! use hr_analytics::source::SqliteSource;
//!
//! let config = Config::from_env()?;
//! let source = SqliteSource::new(config.source.clone());
//! let report = run_analysis(&RateVsLeave::new(), &source, || {
//!     SqliteMetricStore::open(&config.results)
//! })?;
//! println!("{report}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod metrics;
pub mod narrative;
pub mod source;
pub mod stats;

pub use error::{Error, Result};

/// Install the `tracing` subscriber used by the binaries.
///
/// Honors `RUST_LOG`; defaults to `info`. Safe to call more than once.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
