//! Analysis orchestration
//!
//! Every analysis runs the same single-pass pipeline:
//!
//! ```text
//! connect (read) -> query -> close -> compute -> classify
//!     -> open store (write) -> ensure_schema -> upsert_many -> close
//! ```
//!
//! Connections are owned values: on success both are closed explicitly and
//! their close errors surface; on any earlier error the function returns and
//! the connection in scope is dropped, which closes it. Nothing is retried.

mod rate_vs_leave;
mod tenure_vs_level;

pub use rate_vs_leave::RateVsLeave;
pub use tenure_vs_level::TenureVsLevel;

use crate::metrics::{MetricRecord, MetricStore};
use crate::source::{SqliteSource, Table};
use crate::Result;
use serde::Serialize;
use std::fmt;
use tracing::info;

/// Output of one analysis' computation step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Computed {
    /// Rows that entered the statistics
    pub sample_size: usize,
    /// Every scalar worth reporting, in computation order
    pub values: Vec<(String, f64)>,
    /// Metrics to persist, in computation order
    pub records: Vec<MetricRecord>,
}

/// One analysis: a source query plus the statistics computed from it.
pub trait Analysis {
    /// Short name used in logs and reports.
    fn name(&self) -> &str;

    /// SQL run against the data source.
    fn query(&self) -> &str;

    /// Turn the fetched sample into reported values and metric records.
    ///
    /// # Errors
    ///
    /// Returns `Error::Query` for missing/mistyped columns, `Error::InvalidInput`
    /// for unusable values and `Error::Computation` when the statistics reject
    /// the sample
    fn compute(&self, sample: &Table) -> Result<Computed>;
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    /// Analysis name
    pub analysis: String,
    /// What was computed and persisted
    pub computed: Computed,
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} (n = {})",
            self.analysis, self.computed.sample_size
        )?;
        for (name, value) in &self.computed.values {
            writeln!(f, "  {name}: {value:.6}")?;
        }
        for record in &self.computed.records {
            writeln!(f, "  [{}] {}", record.name(), record.description())?;
        }
        Ok(())
    }
}

/// Run `analysis` end to end.
///
/// `open_store` is called only after the sample has been read and the
/// statistics computed, so a failing computation never opens a write
/// connection.
///
/// # Errors
///
/// Returns the error of the first failing step
pub fn run_analysis<A, S, F>(analysis: &A, source: &SqliteSource, open_store: F) -> Result<RunReport>
where
    A: Analysis + ?Sized,
    S: MetricStore,
    F: FnOnce() -> Result<S>,
{
    info!(analysis = analysis.name(), "reading sample");
    let conn = source.connect()?;
    let sample = conn.query(analysis.query(), &[])?;
    conn.close()?;
    info!(analysis = analysis.name(), rows = sample.num_rows(), "sample fetched");

    let computed = analysis.compute(&sample)?;
    for (name, value) in &computed.values {
        info!(analysis = analysis.name(), %name, value, "computed");
    }

    let store = open_store()?;
    store.ensure_schema()?;
    store.upsert_many(&computed.records)?;
    store.close()?;
    info!(
        analysis = analysis.name(),
        metrics = computed.records.len(),
        "metrics saved"
    );

    Ok(RunReport {
        analysis: analysis.name().to_string(),
        computed,
    })
}
