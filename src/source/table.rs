//! In-memory tabular query results

use crate::{Error, Result};
use rusqlite::types::Value;
use serde::{Deserialize, Serialize};

/// One value in a result row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    /// SQL NULL
    Null,
    /// 64-bit integer
    Integer(i64),
    /// Double-precision float
    Real(f64),
    /// UTF-8 text
    Text(String),
    /// Raw bytes
    Blob(Vec<u8>),
}

impl Cell {
    /// Numeric view of the cell. Integers widen to `f64`; everything else is `None`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(*i as f64),
            Self::Real(r) => Some(*r),
            _ => None,
        }
    }

    /// Integer view of the cell.
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Text view of the cell.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Whether the cell is SQL NULL.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<Value> for Cell {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Integer(i) => Self::Integer(i),
            Value::Real(r) => Self::Real(r),
            Value::Text(s) => Self::Text(s),
            Value::Blob(b) => Self::Blob(b),
        }
    }
}

/// Rows returned by a source query, with their column names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Build a table. Every row is expected to have one cell per column.
    #[must_use]
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { columns, rows }
    }

    /// Column names in select order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// All rows.
    #[must_use]
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Whether the query returned nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column, matched case-insensitively as SQL does.
    ///
    /// # Errors
    ///
    /// Returns `Error::Query` if no such column was selected
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(name))
            .ok_or_else(|| {
                Error::Query(format!(
                    "Column '{name}' not in result set (have: {})",
                    self.columns.join(", ")
                ))
            })
    }

    /// Cells of one column, top to bottom.
    ///
    /// # Errors
    ///
    /// Returns `Error::Query` if the column does not exist or a row is too
    /// short to hold it
    pub fn column(&self, name: &str) -> Result<Vec<&Cell>> {
        let idx = self.column_index(name)?;
        self.rows
            .iter()
            .enumerate()
            .map(|(row, cells)| {
                cells.get(idx).ok_or_else(|| {
                    Error::Query(format!(
                        "Column '{name}' row {row}: row has {} of {} cells",
                        cells.len(),
                        self.columns.len()
                    ))
                })
            })
            .collect()
    }

    /// A numeric column with no NULLs.
    ///
    /// # Errors
    ///
    /// Returns `Error::Query` if the column is missing or a cell is NULL or
    /// non-numeric
    pub fn f64_column(&self, name: &str) -> Result<Vec<f64>> {
        self.column(name)?
            .into_iter()
            .enumerate()
            .map(|(row, cell)| {
                cell.as_f64().ok_or_else(|| {
                    Error::Query(format!(
                        "Column '{name}' row {row}: expected a number, got {cell:?}"
                    ))
                })
            })
            .collect()
    }

    /// A text column; NULL cells come back as `None`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Query` if the column is missing or a cell holds a
    /// non-text value
    pub fn text_column(&self, name: &str) -> Result<Vec<Option<&str>>> {
        self.column(name)?
            .into_iter()
            .enumerate()
            .map(|(row, cell)| match cell {
                Cell::Null => Ok(None),
                Cell::Text(s) => Ok(Some(s.as_str())),
                other => Err(Error::Query(format!(
                    "Column '{name}' row {row}: expected text, got {other:?}"
                ))),
            })
            .collect()
    }
}
