//! Configuration loading from files and variables

use hr_analytics::config::{Config, CONFIG_PATH_VAR, RESULTS_DB_VAR, SOURCE_DB_VAR};
use hr_analytics::Error;
use std::io::Write;
use std::path::PathBuf;

fn write_config(text: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_full_file() {
    let file = write_config(
        r#"
[source]
path = "adventureworks.db"
busy_timeout_ms = 250

[results]
path = "analysis.db"
table = "ExpertAnalysis_v2"
"#,
    );
    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.source.path, PathBuf::from("adventureworks.db"));
    assert_eq!(config.source.busy_timeout_ms, 250);
    assert_eq!(config.results.path, PathBuf::from("analysis.db"));
    assert_eq!(config.results.table, "ExpertAnalysis_v2");
    assert_eq!(config.results.busy_timeout_ms, 5000);
}

#[test]
fn test_variables_override_file() {
    let file = write_config("[source]\npath = \"from-file.db\"\n[results]\npath = \"from-file.db\"\n");
    let config_path = file.path().to_string_lossy().into_owned();

    let config = Config::from_lookup(|key| match key {
        k if k == CONFIG_PATH_VAR => Some(config_path.clone()),
        k if k == RESULTS_DB_VAR => Some("override.db".to_string()),
        _ => None,
    })
    .unwrap();

    assert_eq!(config.source.path, PathBuf::from("from-file.db"));
    assert_eq!(config.results.path, PathBuf::from("override.db"));
}

#[test]
fn test_empty_source_path_rejected() {
    let err = Config::from_lookup(|key| (key == SOURCE_DB_VAR).then(String::new)).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn test_malformed_toml() {
    let file = write_config("[source\npath = ");
    let err = Config::load(file.path()).unwrap_err();
    assert!(err.to_string().contains("Invalid TOML"));
}

#[test]
fn test_toml_round_trip() {
    let config = Config::default();
    let text = toml::to_string(&config).unwrap();
    assert_eq!(Config::from_toml_str(&text).unwrap(), config);
}

#[test]
fn test_unreadable_file_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");
    let err = Config::load(&missing).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
    assert!(err.to_string().contains("absent.toml"));
}
