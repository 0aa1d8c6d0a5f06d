//! Store errors

use thiserror::Error;

/// Store errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Record not found
    #[error("record not found")]
    NotFound,

    /// Unique constraint violated
    #[error("conflict: {0}")]
    Conflict(String),

    /// Backend failure (connection, query, serialization)
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Result alias for store operations
pub type DbResult<T> = Result<T, DbError>;
