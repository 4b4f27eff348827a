//! Connection parameters for the source and results databases
//!
//! Loaded from a TOML file named by `HR_ANALYTICS_CONFIG` (optional), then
//! overridden by `HR_ANALYTICS_SOURCE_DB` and `HR_ANALYTICS_RESULTS_DB`.
//!
//! ```toml
//! [source]
//! path = "hr.db"
//!
//! [results]
//! path = "hr.db"
//! table = "ExpertAnalysis"
//! busy_timeout_ms = 5000
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Env var naming a TOML config file
pub const CONFIG_PATH_VAR: &str = "HR_ANALYTICS_CONFIG";
/// Env var overriding `source.path`
pub const SOURCE_DB_VAR: &str = "HR_ANALYTICS_SOURCE_DB";
/// Env var overriding `results.path`
pub const RESULTS_DB_VAR: &str = "HR_ANALYTICS_RESULTS_DB";

/// Default results table name
pub const DEFAULT_RESULTS_TABLE: &str = "ExpertAnalysis";

const DEFAULT_DB_PATH: &str = "hr.db";
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5000;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Database the analyses read from
    pub source: DatabaseConfig,
    /// Database the metrics are written to
    pub results: ResultsConfig,
}

/// Parameters for opening one SQLite database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database file
    pub path: PathBuf,
    /// How long a blocked writer waits for a lock
    pub busy_timeout_ms: u64,
    /// Create the file if it does not exist
    pub create_if_missing: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DB_PATH),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            create_if_missing: false,
        }
    }
}

/// Results store parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultsConfig {
    /// Database file
    pub path: PathBuf,
    /// How long a blocked writer waits for a lock
    pub busy_timeout_ms: u64,
    /// Name of the results table
    pub table: String,
}

impl Default for ResultsConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DB_PATH),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            table: DEFAULT_RESULTS_TABLE.to_string(),
        }
    }
}

impl ResultsConfig {
    /// Connection parameters for the results database.
    ///
    /// The results file is always created on demand, like its table.
    #[must_use]
    pub fn database(&self) -> DatabaseConfig {
        DatabaseConfig {
            path: self.path.clone(),
            busy_timeout_ms: self.busy_timeout_ms,
            create_if_missing: true,
        }
    }
}

impl Config {
    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the text is not valid TOML or fails validation
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| Error::Config(format!("Invalid TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&text)
    }

    /// Load from the process environment.
    ///
    /// # Errors
    ///
    /// Returns error if the named config file is unreadable or invalid
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable lookup.
    ///
    /// # Errors
    ///
    /// Returns error if the named config file is unreadable or invalid
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(CONFIG_PATH_VAR) {
            Some(path) => Self::load(Path::new(&path))?,
            None => Self::default(),
        };
        if let Some(path) = lookup(SOURCE_DB_VAR) {
            config.source.path = PathBuf::from(path);
        }
        if let Some(path) = lookup(RESULTS_DB_VAR) {
            config.results.path = PathBuf::from(path);
        }
        config.validate()?;
        Ok(config)
    }

    /// Check paths and the results table name.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` describing the first invalid field
    pub fn validate(&self) -> Result<()> {
        if self.source.path.as_os_str().is_empty() {
            return Err(Error::Config("source.path must not be empty".to_string()));
        }
        if self.results.path.as_os_str().is_empty() {
            return Err(Error::Config("results.path must not be empty".to_string()));
        }
        if !is_identifier(&self.results.table) {
            return Err(Error::Config(format!(
                "results.table '{}' is not a valid identifier",
                self.results.table
            )));
        }
        Ok(())
    }
}

/// Table names are spliced into DDL, so only plain identifiers are allowed.
pub(crate) fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
