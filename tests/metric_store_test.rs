//! Metric store behavior on disk and across connections

use hr_analytics::config::ResultsConfig;
use hr_analytics::metrics::{MemoryMetricStore, MetricRecord, MetricStore, SqliteMetricStore};
use hr_analytics::Error;
use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;
use std::thread;

fn results_config(path: &Path) -> ResultsConfig {
    ResultsConfig {
        path: path.to_path_buf(),
        ..ResultsConfig::default()
    }
}

fn record(name: &str, value: f64) -> MetricRecord {
    MetricRecord::new(
        name,
        value,
        format!("{name} = {value:.3}. Described."),
        "Linear Regression",
    )
    .unwrap()
}

fn table_count(path: &Path, table: &str) -> i64 {
    Connection::open(path)
        .unwrap()
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [table],
            |row| row.get(0),
        )
        .unwrap()
}

#[test]
fn test_results_file_created_on_demand() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("results.db");
    assert!(!path.exists());

    let store = SqliteMetricStore::open(&results_config(&path)).unwrap();
    assert!(!store.table_exists().unwrap());
    store.ensure_schema().unwrap();
    assert!(store.table_exists().unwrap());
    store.close().unwrap();

    assert!(path.exists());
}

#[test]
fn test_ensure_schema_repeated_across_connections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("results.db");
    let config = results_config(&path);

    for _ in 0..5 {
        let store = SqliteMetricStore::open(&config).unwrap();
        store.ensure_schema().unwrap();
        store.ensure_schema().unwrap();
    }

    assert_eq!(table_count(&path, "ExpertAnalysis"), 1);
}

#[test]
fn test_existing_rows_survive_ensure_schema() {
    let dir = tempfile::tempdir().unwrap();
    let config = results_config(&dir.path().join("results.db"));

    let store = SqliteMetricStore::open(&config).unwrap();
    store.ensure_schema().unwrap();
    store.upsert(&record("Regression R2", 0.25)).unwrap();
    store.close().unwrap();

    let store = SqliteMetricStore::open(&config).unwrap();
    store.ensure_schema().unwrap();
    assert_eq!(store.count().unwrap(), 1);
}

#[test]
fn test_custom_table_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("results.db");
    let config = ResultsConfig {
        table: "QuarterlyAnalysis".to_string(),
        ..results_config(&path)
    };

    let store = SqliteMetricStore::open(&config).unwrap();
    store.ensure_schema().unwrap();
    store.upsert(&record("Regression Slope", 1.2)).unwrap();

    assert_eq!(store.table(), "QuarterlyAnalysis");
    assert_eq!(table_count(&path, "QuarterlyAnalysis"), 1);
    assert_eq!(table_count(&path, "ExpertAnalysis"), 0);
}

#[test]
fn test_injected_table_name_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config = ResultsConfig {
        table: "ExpertAnalysis; DROP TABLE Employee".to_string(),
        ..results_config(&dir.path().join("results.db"))
    };
    let err = SqliteMetricStore::open(&config).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn test_sequential_writers_same_name() {
    let dir = tempfile::tempdir().unwrap();
    let config = results_config(&dir.path().join("results.db"));

    let first = SqliteMetricStore::open(&config).unwrap();
    let second = SqliteMetricStore::open(&config).unwrap();
    first.ensure_schema().unwrap();
    second.ensure_schema().unwrap();

    first.upsert(&record("Correlation", 0.4)).unwrap();
    second.upsert(&record("Correlation", 0.6)).unwrap();
    first.upsert(&record("Correlation", 0.8)).unwrap();

    assert_eq!(first.count().unwrap(), 1);
    let stored = second.get("Correlation").unwrap().unwrap();
    assert!((stored.record().value() - 0.8).abs() < f64::EPSILON);
}

#[test]
fn test_concurrent_writers_same_names() {
    let dir = tempfile::tempdir().unwrap();
    let config = Arc::new(results_config(&dir.path().join("results.db")));
    SqliteMetricStore::open(&config)
        .unwrap()
        .ensure_schema()
        .unwrap();

    let handles: Vec<_> = (0..4)
        .map(|writer| {
            let config = Arc::clone(&config);
            thread::spawn(move || {
                let store = SqliteMetricStore::open(&config).unwrap();
                store.ensure_schema().unwrap();
                for i in 0..25 {
                    let value = f64::from(writer * 100 + i);
                    store.upsert(&record(&format!("metric-{}", i % 5), value)).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let store = SqliteMetricStore::open(&config).unwrap();
    assert_eq!(store.count().unwrap(), 5);
}

#[test]
fn test_stored_metric_reflects_last_write() {
    let store = SqliteMetricStore::open_in_memory().unwrap();
    store.ensure_schema().unwrap();
    store.upsert(&record("Accuracy", 0.55)).unwrap();
    store
        .upsert(&MetricRecord::new("Accuracy", 0.72, "new text", "Ordinal Logistic Regression").unwrap())
        .unwrap();

    let stored = store.get("Accuracy").unwrap().unwrap();
    assert_eq!(stored.record().description(), "new text");
    assert_eq!(stored.record().method(), "Ordinal Logistic Regression");
}

#[test]
fn test_memory_and_sqlite_agree() {
    let sqlite = SqliteMetricStore::open_in_memory().unwrap();
    let memory = MemoryMetricStore::new();
    let batch = [
        record("a", 1.0),
        record("b", 2.0),
        record("a", 3.0),
        record("c", 4.0),
    ];

    for store in [&sqlite as &dyn MetricStore, &memory] {
        store.ensure_schema().unwrap();
        store.upsert_many(&batch).unwrap();
    }

    let names = |store: &dyn MetricStore| -> Vec<(String, f64)> {
        store
            .list()
            .unwrap()
            .iter()
            .map(|m| (m.record().name().to_string(), m.record().value()))
            .collect()
    };
    assert_eq!(names(&sqlite), names(&memory));
    assert_eq!(names(&memory), vec![
        ("a".to_string(), 3.0),
        ("b".to_string(), 2.0),
        ("c".to_string(), 4.0),
    ]);
}
