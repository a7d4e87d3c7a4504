//! Connection Management Module
//!
//! This module owns the single database connection used for the lifetime of
//! the process and exposes it to the workflow through the [`Executor`] trait.

use crate::config::DatabaseConfig;
use crate::core::db::query::QueryResult;
use crate::core::{Result, TrackerError};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};
use std::time::Duration;
use tracing::{debug, info};

/// Statement execution seam between the workflow and the database.
///
/// The workflow never touches a connection directly; it only issues
/// parameterized statements through this trait.
pub trait Executor {
    /// Executes a parameterized statement and returns its rows.
    ///
    /// Statements that produce no columns (INSERT, UPDATE) return an empty
    /// result carrying the number of rows affected.
    fn query(&mut self, sql: &str, params: &[Value]) -> Result<QueryResult>;

    /// Releases the connection.
    fn close(&mut self) -> Result<()>;
}

/// The data access layer: one SQLite connection, opened once and closed once.
#[derive(Debug)]
pub struct Database {
    /// Active database connection (None once closed)
    connection: Option<Connection>,
    /// Display name of the database, used in log lines
    name: String,
}

impl Database {
    /// Opens the database described by `config`
    ///
    /// # Arguments
    ///
    /// * `config` - Database section of the configuration; a path of
    ///   `":memory:"` opens an in-memory database
    ///
    /// # Returns
    ///
    /// The connected database, or `TrackerError::Database` on failure.
    pub fn open(config: &DatabaseConfig) -> Result<Self> {
        let conn = Connection::open(&config.path)?;

        conn.pragma_update(None, "foreign_keys", config.foreign_keys)?;
        if let Some(ms) = config.busy_timeout_ms {
            conn.busy_timeout(Duration::from_millis(ms))?;
        }

        let name = config.display_name();
        info!(database = %name, foreign_keys = config.foreign_keys, "Opened database connection");

        Ok(Database {
            connection: Some(conn),
            name,
        })
    }

    /// Display name of the connected database
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Checks if the connection is still open
    #[cfg(test)]
    pub(crate) fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    /// Runs a batch of unparameterized statements, such as a schema script.
    #[cfg(test)]
    pub(crate) fn execute_batch(&self, sql: &str) -> Result<()> {
        self.connection()?
            .execute_batch(sql)
            .map_err(|e| TrackerError::statement(sql, e))
    }

    fn connection(&self) -> Result<&Connection> {
        self.connection.as_ref().ok_or(TrackerError::ConnectionClosed)
    }
}

impl Executor for Database {
    fn query(&mut self, sql: &str, params: &[Value]) -> Result<QueryResult> {
        debug!(sql, params = params.len(), "Executing statement");

        let conn = self.connection()?;
        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| TrackerError::statement(sql, e))?;

        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        if columns.is_empty() {
            let affected = stmt
                .execute(params_from_iter(params.iter()))
                .map_err(|e| TrackerError::statement(sql, e))?;
            return Ok(QueryResult::affected(affected));
        }

        let column_count = columns.len();
        let rows = stmt
            .query_map(params_from_iter(params.iter()), |row| {
                (0..column_count)
                    .map(|i| row.get::<_, Value>(i))
                    .collect::<rusqlite::Result<Vec<_>>>()
            })
            .map_err(|e| TrackerError::statement(sql, e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| TrackerError::statement(sql, e))?;

        Ok(QueryResult::new(columns, rows))
    }

    fn close(&mut self) -> Result<()> {
        if let Some(conn) = self.connection.take() {
            conn.close().map_err(|(_, e)| TrackerError::from(e))?;
            info!(database = %self.name, "Closed database connection");
        }
        Ok(())
    }
}
