//! Shared fixtures: a small HR database on disk

#![allow(dead_code)]

use hr_analytics::config::{Config, DatabaseConfig, ResultsConfig};
use rusqlite::Connection;
use std::path::Path;
use tempfile::TempDir;

/// Employee and pay-history tables with the columns the analyses read.
pub const HR_SCHEMA: &str = "
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
);";

/// Latest rates 10, 20, 30, 40 against total leave 5, 15, 20, 38.
///
/// Employee 2 has an older rate that the latest-rate query must skip, and
/// the CEO has no level and no pay history.
pub const HR_ROWS: &str = "
INSERT INTO Employee VALUES (1, 'Chief Executive Officer', 99, 69, '2009-01-14', NULL);
INSERT INTO Employee VALUES (2, 'Design Engineer', 3, 2, '2008-01-31', 3);
INSERT INTO Employee VALUES (3, 'Production Technician', 10, 5, '2009-05-15', 3);
INSERT INTO Employee VALUES (4, 'Production Supervisor', 12, 8, '2010-12-05', 2);
INSERT INTO Employee VALUES (5, 'Vice President of Production', 30, 8, '2011-02-15', 1);

INSERT INTO EmployeePayHistory VALUES (2, '2008-01-31 00:00:00', 5.0);
INSERT INTO EmployeePayHistory VALUES (2, '2012-06-01 00:00:00', 10.0);
INSERT INTO EmployeePayHistory VALUES (3, '2009-05-15 00:00:00', 20.0);
INSERT INTO EmployeePayHistory VALUES (4, '2010-12-05 00:00:00', 30.0);
INSERT INTO EmployeePayHistory VALUES (5, '2011-02-15 00:00:00', 40.0);";

/// Create `path` and load the HR fixture into it.
pub fn seed_hr_db(path: &Path) {
    let conn = Connection::open(path).unwrap();
    conn.execute_batch(HR_SCHEMA).unwrap();
    conn.execute_batch(HR_ROWS).unwrap();
}

/// Seeded source database plus a separate, not yet created results file.
pub fn hr_workspace() -> (TempDir, Config) {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("hr.db");
    seed_hr_db(&source);

    let config = Config {
        source: DatabaseConfig {
            path: source,
            ..DatabaseConfig::default()
        },
        results: ResultsConfig {
            path: dir.path().join("results.db"),
            ..ResultsConfig::default()
        },
    };
    (dir, config)
}
