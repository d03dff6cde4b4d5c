use thiserror::Error;

use crate::{
    classify::{exception::FatalBackendError, sqlite_error::SqliteError},
    config::ConfigError,
    planner::error::QueryError,
    types::value::DataType,
};

/// Every failure a cursor operation can report.
///
/// [`CursorError::Fatal`] is not a SQL error and must not be handled like one:
/// a catch-all arm that retries or skips also swallows it. Check
/// [`CursorError::is_fatal`] first and abandon the operation when it is set.
#[derive(Error, Debug)]
pub enum CursorError {
    /// Recoverable backend failure, already translated.
    #[error(transparent)]
    Sqlite(#[from] SqliteError),

    /// The backend is unusable; the operation has to stop.
    #[error(transparent)]
    Fatal(#[from] FatalBackendError),

    #[error("Backend returned {len} rows for a page of {page_size}, paging ignored: {query}")]
    PageOverflow {
        page_size: usize,
        len: usize,
        query: String,
    },

    #[error("Invalid base query: {0}")]
    Query(#[from] QueryError),

    #[error("Invalid cursor configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Row position {position} out of range (page has {len} rows)")]
    RowOutOfRange { position: isize, len: usize },

    #[error("Column index {index} out of bounds (row has {count} columns)")]
    ColumnOutOfRange { index: usize, count: usize },

    #[error("Type mismatch in column {column}: expected {expected}, got {actual}")]
    TypeMismatch {
        column: usize,
        expected: DataType,
        actual: DataType,
    },

    #[error("Cursor is closed")]
    Closed,
}

impl CursorError {
    /// `true` for an unrecoverable backend fault, which no retry can clear.
    pub fn is_fatal(&self) -> bool {
        matches!(self, CursorError::Fatal(_))
    }

    /// The recoverable SQL error, if that is what this is.
    pub fn as_sqlite(&self) -> Option<&SqliteError> {
        match self {
            CursorError::Sqlite(error) => Some(error),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CursorError>;
