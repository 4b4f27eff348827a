//! Data source adapter (SQLite)
//!
//! Connections are scoped: `connect()` hands out an owned [`SourceConnection`]
//! that the caller closes explicitly on the success path. Dropping it on an
//! error path closes the underlying handle as well.
//!
//! # Example
//!
//! ```rust,no_run
//! use hr_analytics::config::DatabaseConfig;
//! use hr_analytics::source::SqliteSource;
//!
//! # fn main() -> hr_analytics::Result<()> {
//! let source = SqliteSource::new(DatabaseConfig::default());
//! let conn = source.connect()?;
//! let table = conn.query("SELECT Rate FROM EmployeePayHistory", &[])?;
//! conn.close()?;
//! println!("{} rows", table.num_rows());
//! # Ok(())
//! # }
//! ```

mod table;

pub use table::{Cell, Table};

use crate::config::DatabaseConfig;
use crate::{Error, Result};
use rusqlite::{Connection, OpenFlags, ToSql};
use std::time::Duration;
use tracing::debug;

/// Open a SQLite connection with the configured flags and busy timeout.
///
/// Shared by the read adapter and the results store so both honour the same
/// connection parameters.
pub(crate) fn open_connection(config: &DatabaseConfig) -> Result<Connection> {
    let path = &config.path;
    if !config.create_if_missing && !path.exists() {
        return Err(Error::Connection(format!(
            "Database file not found: {}",
            path.display()
        )));
    }

    let mut flags = OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_URI
        | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    if config.create_if_missing {
        flags |= OpenFlags::SQLITE_OPEN_CREATE;
    }

    let conn = Connection::open_with_flags(path, flags).map_err(|e| {
        Error::Connection(format!("Failed to open {}: {e}", path.display()))
    })?;
    conn.busy_timeout(Duration::from_millis(config.busy_timeout_ms))
        .map_err(|e| Error::Connection(format!("Failed to set busy timeout: {e}")))?;

    debug!(path = %path.display(), "opened database connection");
    Ok(conn)
}

/// Read-side adapter over one SQLite database file.
#[derive(Debug, Clone)]
pub struct SqliteSource {
    config: DatabaseConfig,
}

impl SqliteSource {
    /// Create an adapter for the given database.
    #[must_use]
    pub const fn new(config: DatabaseConfig) -> Self {
        Self { config }
    }

    /// Connection parameters in use.
    #[must_use]
    pub const fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Open a scoped connection.
    ///
    /// # Errors
    ///
    /// Returns `Error::Connection` if the file is missing or cannot be opened
    pub fn connect(&self) -> Result<SourceConnection> {
        open_connection(&self.config).map(|conn| SourceConnection { conn })
    }
}

/// Owned connection to the data source.
#[derive(Debug)]
pub struct SourceConnection {
    conn: Connection,
}

impl SourceConnection {
    /// Run a parameterized read query and collect every row.
    ///
    /// # Errors
    ///
    /// Returns `Error::Query` on malformed SQL, unknown tables/columns or
    /// parameter mismatches
    pub fn query(&self, sql: &str, params: &[&dyn ToSql]) -> Result<Table> {
        let mut stmt = self
            .conn
            .prepare(sql)
            .map_err(|e| Error::Query(format!("Failed to prepare query: {e}")))?;

        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let width = columns.len();

        let mut rows = stmt
            .query(params)
            .map_err(|e| Error::Query(format!("Failed to execute query: {e}")))?;

        let mut out = Vec::new();
        while let Some(row) = rows
            .next()
            .map_err(|e| Error::Query(format!("Failed to read row: {e}")))?
        {
            let mut cells = Vec::with_capacity(width);
            for i in 0..width {
                let value: rusqlite::types::Value = row
                    .get(i)
                    .map_err(|e| Error::Query(format!("Failed to read column {i}: {e}")))?;
                cells.push(Cell::from(value));
            }
            out.push(cells);
        }

        debug!(rows = out.len(), columns = width, "query returned");
        Ok(Table::new(columns, out))
    }

    /// Close the connection, surfacing any error the driver reports.
    ///
    /// # Errors
    ///
    /// Returns `Error::Connection` if SQLite refuses to close the handle
    pub fn close(self) -> Result<()> {
        self.conn
            .close()
            .map_err(|(_, e)| Error::Connection(format!("Failed to close connection: {e}")))
    }
}
