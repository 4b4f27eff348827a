//! Tenure vs organization level: Spearman correlation and ordinal regression.
//!
//! Connection parameters: `HR_ANALYTICS_CONFIG`, `HR_ANALYTICS_SOURCE_DB`,
//! `HR_ANALYTICS_RESULTS_DB`.

use anyhow::Context;
use hr_analytics::analysis::{run_analysis, TenureVsLevel};
use hr_analytics::config::Config;
use hr_analytics::metrics::SqliteMetricStore;
use hr_analytics::source::SqliteSource;

fn main() -> anyhow::Result<()> {
    hr_analytics::init_tracing();

    let config = Config::from_env().context("loading configuration")?;
    let source = SqliteSource::new(config.source.clone());

    let report = run_analysis(&TenureVsLevel::new(), &source, || {
        SqliteMetricStore::open(&config.results)
    })
    .context("tenure-vs-level analysis failed")?;

    print!("{report}");
    println!("SAVED RESULTS");
    Ok(())
}
