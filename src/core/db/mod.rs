/// Database Module
///
/// The data access layer of the employee tracker.
///
/// ## Architecture
///
/// - **Connection Management** (`connection.rs`): owns the single SQLite
///   connection and exposes it through the [`Executor`] trait
/// - **Query Results** (`query.rs`): result rows, value formatting and typed
///   accessors used by the workflow
///
/// ## Error Handling
///
/// Every failed statement surfaces as `TrackerError::Database` carrying the
/// statement text.
pub mod connection;
pub mod query;

pub use connection::*;
pub use query::*;
