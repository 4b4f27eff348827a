//! SQLite-backed metric store
//!
//! Upserts are one `INSERT ... ON CONFLICT(MetricName) DO UPDATE` statement
//! against a `UNIQUE` column, so the match and the write happen atomically
//! inside SQLite. `upsert_many` wraps the whole batch in one transaction:
//! either every record commits or none does.

use super::{MetricRecord, MetricStore, StoredMetric};
use crate::config::{is_identifier, ResultsConfig};
use crate::source::open_connection;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

/// Metric store over one SQLite connection, owned for the lifetime of a run.
#[derive(Debug)]
pub struct SqliteMetricStore {
    conn: Connection,
    table: String,
}

type RawRow = (i64, String, f64, String, String, DateTime<Utc>);

impl SqliteMetricStore {
    /// Open the results database described by `config`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Connection` if the database cannot be opened, or
    /// `Error::Config` if the table name is not a plain identifier
    pub fn open(config: &ResultsConfig) -> Result<Self> {
        let conn = open_connection(&config.database())?;
        Self::from_connection(conn, &config.table)
    }

    /// Use an already-open connection.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the table name is not a plain identifier
    pub fn from_connection(conn: Connection, table: &str) -> Result<Self> {
        if !is_identifier(table) {
            return Err(Error::Config(format!(
                "Results table '{table}' is not a valid identifier"
            )));
        }
        Ok(Self {
            conn,
            table: table.to_string(),
        })
    }

    /// Private in-memory database (for testing).
    ///
    /// # Errors
    ///
    /// Returns `Error::Connection` if SQLite cannot allocate the database
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::Connection(format!("Failed to open in-memory database: {e}")))?;
        Self::from_connection(conn, crate::config::DEFAULT_RESULTS_TABLE)
    }

    /// Results table name.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Whether the results table exists yet.
    ///
    /// # Errors
    ///
    /// Returns `Error::Query` if the catalog cannot be read
    pub fn table_exists(&self) -> Result<bool> {
        self.conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                params![self.table],
                |row| row.get::<_, i64>(0),
            )
            .map(|n| n > 0)
            .map_err(|e| Error::Query(format!("Failed to read catalog: {e}")))
    }

    fn upsert_sql(&self) -> String {
        format!(
            "INSERT INTO {t} (MetricName, Value, Description, Method, UpdateTime)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(MetricName) DO UPDATE SET
                 Value = excluded.Value,
                 Description = excluded.Description,
                 Method = excluded.Method,
                 UpdateTime = excluded.UpdateTime",
            t = self.table
        )
    }

    fn upsert_on(&self, conn: &Connection, record: &MetricRecord, now: DateTime<Utc>) -> Result<()> {
        let mut stmt = conn
            .prepare_cached(&self.upsert_sql())
            .map_err(|e| Error::upsert(record.name(), e))?;
        stmt.execute(params![
            record.name(),
            record.value(),
            record.description(),
            record.method(),
            now
        ])
        .map_err(|e| Error::upsert(record.name(), e))?;
        debug!(metric = record.name(), value = record.value(), "upserted metric");
        Ok(())
    }

    fn select_sql(&self, filter: &str) -> String {
        format!(
            "SELECT MetricID, MetricName, Value, Description, Method, UpdateTime
             FROM {t} {filter} ORDER BY MetricID",
            t = self.table
        )
    }

    fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawRow> {
        Ok((
            row.get(0)?,
            row.get(1)?,
            row.get(2)?,
            row.get(3)?,
            row.get(4)?,
            row.get(5)?,
        ))
    }

    fn to_stored((id, name, value, description, method, updated_at): RawRow) -> Result<StoredMetric> {
        let record = MetricRecord::new(name, value, description, method)
            .map_err(|e| Error::Query(format!("Corrupt metric row {id}: {e}")))?;
        Ok(StoredMetric::new(id, record, updated_at))
    }
}

impl MetricStore for SqliteMetricStore {
    fn ensure_schema(&self) -> Result<()> {
        let ddl = format!(
            "CREATE TABLE IF NOT EXISTS {t} (
                 MetricID INTEGER PRIMARY KEY AUTOINCREMENT,
                 MetricName TEXT NOT NULL UNIQUE,
                 Value REAL NOT NULL,
                 Description TEXT NOT NULL,
                 Method TEXT NOT NULL,
                 UpdateTime TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
             )",
            t = self.table
        );
        self.conn
            .execute_batch(&ddl)
            .map_err(|e| Error::Schema(format!("Failed to create table {}: {e}", self.table)))?;
        info!(table = %self.table, "results table ready");
        Ok(())
    }

    fn upsert(&self, record: &MetricRecord) -> Result<()> {
        self.upsert_on(&self.conn, record, Utc::now())
    }

    fn upsert_many(&self, records: &[MetricRecord]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }
        let batch = || {
            records
                .iter()
                .map(MetricRecord::name)
                .collect::<Vec<_>>()
                .join(", ")
        };

        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|e| Error::upsert(batch(), format!("failed to begin transaction: {e}")))?;
        let now = Utc::now();
        for record in records {
            // an early return drops `tx`, which rolls the batch back
            self.upsert_on(&tx, record, now)?;
        }
        tx.commit()
            .map_err(|e| Error::upsert(batch(), format!("failed to commit: {e}")))?;

        info!(count = records.len(), table = %self.table, "committed metrics");
        Ok(())
    }

    fn get(&self, name: &str) -> Result<Option<StoredMetric>> {
        let raw = self
            .conn
            .query_row(
                &self.select_sql("WHERE MetricName = ?1"),
                params![name],
                Self::read_row,
            )
            .optional()
            .map_err(|e| Error::Query(format!("Failed to read metric '{name}': {e}")))?;
        raw.map(Self::to_stored).transpose()
    }

    fn list(&self) -> Result<Vec<StoredMetric>> {
        let mut stmt = self
            .conn
            .prepare(&self.select_sql(""))
            .map_err(|e| Error::Query(format!("Failed to list metrics: {e}")))?;
        let rows = stmt
            .query_map([], Self::read_row)
            .map_err(|e| Error::Query(format!("Failed to list metrics: {e}")))?;

        let mut out = Vec::new();
        for row in rows {
            let raw = row.map_err(|e| Error::Query(format!("Failed to read metric row: {e}")))?;
            out.push(Self::to_stored(raw)?);
        }
        Ok(out)
    }

    fn count(&self) -> Result<usize> {
        let n: i64 = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {}", self.table), [], |row| {
                row.get(0)
            })
            .map_err(|e| Error::Query(format!("Failed to count metrics: {e}")))?;
        usize::try_from(n).map_err(|e| Error::Query(format!("Invalid metric count {n}: {e}")))
    }

    fn close(self) -> Result<()> {
        self.conn
            .close()
            .map_err(|(_, e)| Error::Connection(format!("Failed to close connection: {e}")))?;
        debug!(table = %self.table, "closed results connection");
        Ok(())
    }
}
