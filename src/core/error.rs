//! Employee Tracker Error Module
//!
//! This module defines the error type shared by the data access layer and
//! the interactive workflow. Every fallible operation in the crate returns
//! [`Result`], and errors propagate with `?` up to `main`, which prints them
//! and exits with a failure code.
use thiserror::Error;

/// Error type for the employee tracker.
///
/// Salary validation failures are deliberately absent: they are handled at
/// the prompt by asking again (see [`crate::validation::ValidationError`]).
#[derive(Error, Debug)]
pub enum TrackerError {
    /// A statement, connection or shutdown failed in SQLite.
    ///
    /// `sql` carries the offending statement when the failure came from
    /// executing one.
    #[error("Database error: {source}{}", statement_suffix(.sql))]
    Database {
        source: rusqlite::Error,
        sql: Option<String>,
    },

    /// The connection was used after `close()`.
    #[error("Database error: connection already closed")]
    ConnectionClosed,

    /// A point lookup found no row.
    #[error("Not found: no {entity} with id {id}")]
    NotFound { entity: &'static str, id: i64 },

    /// A prompt returned a position outside its list of entries.
    #[error("Invalid selection: entry {index} of {len}")]
    InvalidSelection { index: usize, len: usize },

    /// A result row did not have the expected shape.
    #[error("Query error: {0}")]
    Query(String),

    /// Configuration loading and validation errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Terminal prompt failures (closed stdin, not a terminal, ...)
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    /// File system and terminal I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn statement_suffix(sql: &Option<String>) -> String {
    match sql {
        Some(sql) => format!(" [statement: {}]", sql),
        None => String::new(),
    }
}

impl TrackerError {
    /// Wraps a SQLite error raised while running `sql`.
    pub fn statement(sql: &str, source: rusqlite::Error) -> Self {
        TrackerError::Database {
            source,
            sql: Some(sql.to_string()),
        }
    }
}

impl From<rusqlite::Error> for TrackerError {
    fn from(source: rusqlite::Error) -> Self {
        TrackerError::Database { source, sql: None }
    }
}

/// Type alias for Result to use TrackerError as the error type.
pub type Result<T> = std::result::Result<T, TrackerError>;
