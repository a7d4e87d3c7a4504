//! # Test Utilities Module
//!
//! Test-only fixtures for the employee tracker:
//! - Seeded in-memory databases built from `db/schema.sql` and `db/seeds.sql`
//! - A scripted prompter replaying canned answers
//! - A recording executor capturing every statement and its parameters

use crate::config::DatabaseConfig;
use crate::core::db::{Database, Executor, QueryResult};
use crate::core::{Result, TrackerError};
use crate::prompt::{Prompter, Validator};
use rusqlite::types::Value;
use std::collections::VecDeque;

pub const SCHEMA_SQL: &str = include_str!("../db/schema.sql");
pub const SEEDS_SQL: &str = include_str!("../db/seeds.sql");

/// Empty in-memory database with the tracker schema.
pub fn empty_database() -> Database {
    let config = DatabaseConfig {
        path: ":memory:".into(),
        ..DatabaseConfig::default()
    };
    let db = Database::open(&config).expect("in-memory database opens");
    db.execute_batch(SCHEMA_SQL).expect("schema loads");
    db
}

/// In-memory database with the sample departments, roles and employees.
///
/// Employees: 1 Ada Lovelace and 2 Grace Hopper (no manager), 3 John Smith
/// (manager 1) and 4 Alan Turing (manager 2).
pub fn seeded_database() -> Database {
    let db = empty_database();
    db.execute_batch(SEEDS_SQL).expect("seeds load");
    db
}

/// A canned answer for [`ScriptedPrompter`].
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    /// Typed text
    Text(String),
    /// Select the list entry whose display text equals this string
    Pick(String),
    Confirm(bool),
}

impl Answer {
    pub fn text(s: &str) -> Self {
        Answer::Text(s.to_string())
    }

    pub fn pick(s: &str) -> Self {
        Answer::Pick(s.to_string())
    }
}

/// Replays answers in order. A rejected validated input consumes the next
/// text answer, the way the terminal asks again.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    rejected: usize,
    last_items: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(answers: Vec<Answer>) -> Self {
        ScriptedPrompter {
            answers: answers.into(),
            ..Default::default()
        }
    }

    /// Number of answers a validator rejected.
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    pub fn is_exhausted(&self) -> bool {
        self.answers.is_empty()
    }

    /// Entries offered by the most recent select prompt.
    pub fn last_items(&self) -> Vec<String> {
        self.last_items.clone()
    }

    fn next(&mut self, message: &str) -> Result<Answer> {
        self.answers
            .pop_front()
            .ok_or_else(|| TrackerError::Query(format!("no scripted answer for prompt '{}'", message)))
    }

    fn unexpected(message: &str, answer: Answer) -> TrackerError {
        TrackerError::Query(format!("prompt '{}' got unexpected answer {:?}", message, answer))
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&mut self, message: &str) -> Result<String> {
        match self.next(message)? {
            Answer::Text(s) => Ok(s),
            other => Err(Self::unexpected(message, other)),
        }
    }

    fn input_validated(&mut self, message: &str, validate: Validator) -> Result<String> {
        loop {
            let answer = self.input(message)?;
            if validate(&answer).is_ok() {
                return Ok(answer);
            }
            self.rejected += 1;
        }
    }

    fn select(&mut self, message: &str, items: &[String]) -> Result<usize> {
        self.last_items = items.to_vec();
        match self.next(message)? {
            Answer::Pick(label) => items
                .iter()
                .position(|item| *item == label)
                .ok_or_else(|| {
                    TrackerError::Query(format!("'{}' is not offered by prompt '{}': {:?}", label, message, items))
                }),
            other => Err(Self::unexpected(message, other)),
        }
    }

    fn confirm(&mut self, message: &str) -> Result<bool> {
        match self.next(message)? {
            Answer::Confirm(yes) => Ok(yes),
            other => Err(Self::unexpected(message, other)),
        }
    }
}

/// Passes statements through to an inner executor and keeps a log of them.
#[derive(Debug)]
pub struct RecordingExecutor<E> {
    inner: E,
    pub statements: Vec<(String, Vec<Value>)>,
}

impl<E: Executor> RecordingExecutor<E> {
    pub fn new(inner: E) -> Self {
        RecordingExecutor {
            inner,
            statements: Vec::new(),
        }
    }

    /// Parameters of the last recorded statement equal to `sql`.
    pub fn params_of(&self, sql: &str) -> Option<&[Value]> {
        self.statements
            .iter()
            .rev()
            .find(|(s, _)| s == sql)
            .map(|(_, params)| params.as_slice())
    }
}

impl<E: Executor> Executor for RecordingExecutor<E> {
    fn query(&mut self, sql: &str, params: &[Value]) -> Result<QueryResult> {
        self.statements.push((sql.to_string(), params.to_vec()));
        self.inner.query(sql, params)
    }

    fn close(&mut self) -> Result<()> {
        self.inner.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_salary;

    #[test]
    fn test_seeded_database_counts() {
        let mut db = seeded_database();
        for (table, expected) in [("department", 3), ("roles", 4), ("employee", 4)] {
            let result = db.query(&format!("SELECT COUNT(*) AS n FROM {}", table), &[]).unwrap();
            let count = result.records().next().unwrap().integer("n").unwrap();
            assert_eq!(count, expected, "row count of {}", table);
        }
    }

    #[test]
    fn test_scripted_prompter_retries_validation() {
        let mut prompter = ScriptedPrompter::new(vec![
            Answer::text("abc"),
            Answer::text("$1,000"),
        ]);
        let salary = prompter.input_validated("Salary: ", validate_salary).unwrap();
        assert_eq!(salary, "$1,000");
        assert_eq!(prompter.rejected(), 1);
        assert!(prompter.is_exhausted());
    }

    #[test]
    fn test_scripted_prompter_rejects_unknown_pick() {
        let mut prompter = ScriptedPrompter::new(vec![Answer::pick("Nope")]);
        let items = vec!["1|Engineering".to_string()];
        assert!(prompter.select("Department: ", &items).is_err());
    }

    #[test]
    fn test_recording_executor_logs_statements() {
        let mut db = RecordingExecutor::new(seeded_database());
        db.query("SELECT id FROM department WHERE name = ?", &[Value::Text("Sales".to_string())])
            .unwrap();

        assert_eq!(db.statements.len(), 1);
        assert_eq!(
            db.params_of("SELECT id FROM department WHERE name = ?"),
            Some(&[Value::Text("Sales".to_string())][..])
        );
        assert_eq!(db.params_of("SELECT 1"), None);
    }
}
