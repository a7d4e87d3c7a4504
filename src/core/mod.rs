/// Core Module for the employee tracker
///
/// Shared infrastructure for the workflow: the database access layer and
/// the crate-wide error type.

pub mod db;
pub mod error;

// Re-export commonly used types for convenience
pub use error::{Result, TrackerError};
