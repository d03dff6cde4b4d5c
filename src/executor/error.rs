use std::fmt;

/// Coarse kind attached to some database errors by the backend.
///
/// Carried for diagnostics only; classification still works off the message text
/// because most failures arrive with `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbErrorKind {
    Corrupt,
    Locked,
    MissingEntity,
    FileTooNew,
    FileTooOld,
    Other,
}

/// Error value returned by the backend instead of raising.
///
/// Exactly one variant is active. `Fatal` means the backend itself is in an
/// unusable state and must never be turned into a retryable SQL error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    Database {
        message: Option<String>,
        kind: Option<DbErrorKind>,
    },
    Fatal {
        message: String,
    },
    Other {
        message: String,
    },
}

impl BackendError {
    pub fn database(message: impl Into<String>) -> Self {
        BackendError::Database {
            message: Some(message.into()),
            kind: None,
        }
    }

    pub fn fatal(message: impl Into<String>) -> Self {
        BackendError::Fatal {
            message: message.into(),
        }
    }

    pub fn other(message: impl Into<String>) -> Self {
        BackendError::Other {
            message: message.into(),
        }
    }

    /// The human readable text of whichever variant is active.
    pub fn localized(&self) -> Option<&str> {
        match self {
            BackendError::Database { message, .. } => message.as_deref(),
            BackendError::Fatal { message } | BackendError::Other { message } => Some(message),
        }
    }

    pub fn kind(&self) -> Option<DbErrorKind> {
        match self {
            BackendError::Database { kind, .. } => *kind,
            _ => None,
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, BackendError::Fatal { .. })
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Database { message, kind } => match (message, kind) {
                (Some(message), _) => write!(f, "database error: {message}"),
                (None, Some(kind)) => write!(f, "database error ({kind:?})"),
                (None, None) => f.write_str("database error"),
            },
            BackendError::Fatal { message } => write!(f, "fatal backend error: {message}"),
            BackendError::Other { message } => f.write_str(message),
        }
    }
}

impl std::error::Error for BackendError {}
