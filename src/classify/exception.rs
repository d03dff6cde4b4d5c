use std::fmt;

use tracing::error;

use crate::{classify::sqlite_error::SqliteError, executor::error::BackendError};

/// An unrecoverable backend condition.
///
/// Deliberately not a [`SqliteError`]: it cannot be matched by code that
/// handles recoverable SQL failures and must end the current operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecoverable backend failure: {message}")]
pub struct FatalBackendError {
    pub message: String,
}

/// A non-fatal backend error, before it is given query context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendException {
    /// A database error; the text decides the SQL category.
    Db { message: Option<String> },
    /// Anything else the backend reported.
    Generic { message: String },
}

impl BackendException {
    /// Splits off the fatal variant before any translation is attempted.
    pub fn from_error(error: &BackendError) -> Result<Self, FatalBackendError> {
        match error {
            BackendError::Database { message, .. } => Ok(BackendException::Db {
                message: message.clone(),
            }),
            BackendError::Fatal { message } => {
                error!(message = %message, "fatal backend error");
                Err(FatalBackendError {
                    message: message.clone(),
                })
            }
            BackendError::Other { message } => Ok(BackendException::Generic {
                message: message.clone(),
            }),
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            BackendException::Db { message } => message.as_deref(),
            BackendException::Generic { message } => Some(message),
        }
    }

    /// Translation with the default rule set.
    pub fn to_sqlite_error(&self, query: &str) -> SqliteError {
        super::default_classifier().translate(self, query)
    }
}

impl fmt::Display for BackendException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.message() {
            Some(message) => f.write_str(message),
            None => f.write_str("unknown database error"),
        }
    }
}

impl std::error::Error for BackendException {}
