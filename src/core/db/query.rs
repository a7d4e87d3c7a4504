//! Query Result Module
//!
//! Holds the rows produced by a statement and the helpers the workflow uses
//! to read them: display formatting for tables and typed access by column
//! name for building choices.

use crate::core::{Result, TrackerError};
use rusqlite::types::Value;

/// Represents the result of a SQL statement execution
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    /// Column names from the query result
    pub columns: Vec<String>,
    /// Rows of raw SQLite values
    pub rows: Vec<Vec<Value>>,
    /// Rows changed by a statement that returns no columns
    pub rows_affected: usize,
}

impl QueryResult {
    /// Creates a new QueryResult from column names and row data
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        QueryResult {
            columns,
            rows,
            rows_affected: 0,
        }
    }

    /// Result of an INSERT/UPDATE style statement
    pub fn affected(rows_affected: usize) -> Self {
        QueryResult {
            columns: Vec::new(),
            rows: Vec::new(),
            rows_affected,
        }
    }

    /// Position of `name` in the column list.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| TrackerError::Query(format!("result has no column '{}'", name)))
    }

    /// Rows of this result with their values addressable by column name.
    pub fn records(&self) -> impl Iterator<Item = Record<'_>> + '_ {
        self.rows.iter().map(move |values| Record {
            result: self,
            values,
        })
    }

    /// All rows rendered as display strings, for tabular output.
    pub fn display_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(format_value).collect())
            .collect()
    }
}

/// A single row borrowed from a [`QueryResult`].
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    result: &'a QueryResult,
    values: &'a [Value],
}

impl<'a> Record<'a> {
    pub fn value(&self, column: &str) -> Result<&'a Value> {
        let idx = self.result.column_index(column)?;
        self.values
            .get(idx)
            .ok_or_else(|| TrackerError::Query(format!("row is missing column '{}'", column)))
    }

    pub fn integer(&self, column: &str) -> Result<i64> {
        match self.value(column)? {
            Value::Integer(i) => Ok(*i),
            other => Err(TrackerError::Query(format!(
                "column '{}' is not an integer: {}",
                column,
                format_value(other)
            ))),
        }
    }

    /// Integer column that may be NULL, such as `manager_id`.
    pub fn optional_integer(&self, column: &str) -> Result<Option<i64>> {
        match self.value(column)? {
            Value::Null => Ok(None),
            _ => self.integer(column).map(Some),
        }
    }

    /// Any value rendered as text.
    pub fn text(&self, column: &str) -> Result<String> {
        self.value(column).map(format_value)
    }
}

/// Formats a SQLite value for display
///
/// # Arguments
///
/// * `value` - Database value to format
///
/// # Returns
///
/// A string representation of the value suitable for display.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => f.to_string(),
        Value::Text(t) => t.clone(),
        Value::Blob(b) => format!("<BLOB: {} bytes>", b.len()),
    }
}
