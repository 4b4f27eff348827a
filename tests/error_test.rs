//! Tests for error types

use hr_analytics::Error;

#[test]
fn test_connection_error() {
    let error = Error::Connection("Database file not found: hr.db".to_string());
    let error_str = format!("{error}");
    assert!(error_str.contains("Connection error"));
    assert!(error_str.contains("hr.db"));
}

#[test]
fn test_query_error() {
    let error = Error::Query("no such table: EmployeePayHistory".to_string());
    let error_str = format!("{error}");
    assert!(error_str.contains("Query error"));
    assert!(error_str.contains("EmployeePayHistory"));
}

#[test]
fn test_schema_error() {
    let error = Error::Schema("attempt to write a readonly database".to_string());
    let error_str = format!("{error}");
    assert!(error_str.contains("Schema error"));
    assert!(error_str.contains("no metrics were written"));
}

#[test]
fn test_upsert_error_names_metric() {
    let error = Error::upsert("Regression Slope Rate vs Total Leave", "database is locked");
    let error_str = format!("{error}");
    assert!(error_str.contains("Upsert error"));
    assert!(error_str.contains("'Regression Slope Rate vs Total Leave'"));
    assert!(error_str.contains("database is locked"));
}

#[test]
fn test_computation_error() {
    let error = Error::Computation("zero variance".to_string());
    let error_str = format!("{error}");
    assert!(error_str.contains("Computation error"));
    assert!(error_str.contains("zero variance"));
}

#[test]
fn test_invalid_input_error() {
    let error = Error::InvalidInput("NaN".to_string());
    assert!(format!("{error}").contains("Invalid input"));
}

#[test]
fn test_config_error() {
    let error = Error::Config("results.path must not be empty".to_string());
    assert!(format!("{error}").contains("Config error"));
}

#[test]
fn test_error_debug() {
    let error = Error::Computation("test".to_string());
    let debug_str = format!("{error:?}");
    assert!(debug_str.contains("Computation"));
}
