//! Database error types.

use thiserror::Error;

/// Database operation errors.
///
/// Missing rows and missing tables are not errors: lookups report them as
/// `None` and mutations on unknown ids are no-ops.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DbError {
    /// Table creation targeted a database that was never created
    #[error("Database '{database}' does not exist")]
    DatabaseNotFound { database: String },

    /// Lock poisoned (RwLock poisoned)
    #[error("Lock poisoned")]
    LockPoisoned,
}
