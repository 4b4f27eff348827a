//! Expert Analysis: both HR jobs against a throwaway database
//!
//! Seeds a small AdventureWorks-style HR database in a temp directory, runs
//! the rate-vs-leave and tenure-vs-level analyses, and prints what ended up
//! in the `ExpertAnalysis` table.
//!
//! Run with: cargo run --example expert_analysis

use hr_analytics::analysis::{run_analysis, RateVsLeave, TenureVsLevel};
use hr_analytics::config::{DatabaseConfig, ResultsConfig};
use hr_analytics::metrics::{MemoryMetricStore, MetricStore, SqliteMetricStore};
use hr_analytics::source::SqliteSource;
use rusqlite::Connection;

const SEED: &str = "
CREATE TABLE Employee (
    BusinessEntityID INTEGER PRIMARY KEY,
    JobTitle TEXT NOT NULL,
    VacationHours INTEGER NOT NULL,
    SickLeaveHours INTEGER NOT NULL,
    HireDate TEXT,
    OrganizationLevel INTEGER
);
CREATE TABLE EmployeePayHistory (
    BusinessEntityID INTEGER NOT NULL,
    RateChangeDate TEXT NOT NULL,
    Rate REAL NOT NULL
);
INSERT INTO Employee VALUES
    (1, 'Chief Executive Officer', 99, 69, '2009-01-14', NULL),
    (2, 'Vice President of Engineering', 1, 20, '2008-01-31', 1),
    (3, 'Engineering Manager', 2, 21, '2007-11-11', 2),
    (4, 'Senior Tool Designer', 48, 80, '2007-12-05', 3),
    (5, 'Design Engineer', 5, 22, '2008-01-06', 3),
    (6, 'Design Engineer', 6, 23, '2008-01-24', 3),
    (7, 'Research and Development Manager', 61, 50, '2009-02-08', 4),
    (8, 'Production Technician - WC60', 64, 52, '2010-05-31', 4),
    (9, 'Production Technician - WC10', 65, 52, '2010-12-13', 4),
    (10, 'Production Supervisor - WC60', 69, 54, '2009-12-24', 3);
INSERT INTO EmployeePayHistory VALUES
    (2, '2008-01-31', 40.8654),
    (3, '2007-11-11', 43.2692),
    (4, '2007-12-05', 8.6200),
    (4, '2010-05-31', 23.7200),
    (5, '2008-01-06', 25.0000),
    (6, '2008-01-24', 24.0000),
    (7, '2009-02-08', 28.8462),
    (8, '2010-05-31', 14.0000),
    (9, '2010-12-13', 12.4500),
    (10, '2009-12-24', 25.0000);";

fn main() -> anyhow::Result<()> {
    hr_analytics::init_tracing();
    println!("=== Expert Analysis Demo ===\n");

    let dir = tempfile::tempdir()?;
    let db_path = dir.path().join("hr.db");
    Connection::open(&db_path)?.execute_batch(SEED)?;
    println!("Seeded HR database at {}\n", db_path.display());

    let source = SqliteSource::new(DatabaseConfig {
        path: db_path.clone(),
        ..DatabaseConfig::default()
    });
    let results = ResultsConfig {
        path: db_path,
        ..ResultsConfig::default()
    };

    // Dry run: nothing touches the results table
    println!("--- Dry run (in-memory store) ---");
    let dry = MemoryMetricStore::new();
    let report = run_analysis(&RateVsLeave::new(), &source, || Ok(&dry))?;
    println!("{report}");
    println!("{} metrics held in memory\n", dry.count()?);

    // Real runs: upsert into ExpertAnalysis
    println!("--- Persisted runs ---");
    let open = || SqliteMetricStore::open(&results);
    println!("{}", run_analysis(&RateVsLeave::new(), &source, open)?);
    println!("{}", run_analysis(&TenureVsLevel::new(), &source, open)?);

    // Re-running updates rows in place
    run_analysis(&RateVsLeave::new(), &source, open)?;

    let store = SqliteMetricStore::open(&results)?;
    println!("=== {} ({} rows) ===", store.table(), store.count()?);
    for metric in store.list()? {
        println!(
            "#{:<2} {:<50} {:>8.4}  [{}]",
            metric.metric_id(),
            metric.record().name(),
            metric.record().value(),
            metric.record().method()
        );
        println!("     {}", metric.record().description());
    }

    println!("\nAs JSON:");
    println!("{}", serde_json::to_string_pretty(&store.get("Regression R2 Rate vs Total Leave")?)?);
    store.close()?;
    Ok(())
}
