use std::fmt;

/// Caller-facing category of a recoverable SQL failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    ConstraintViolation,
    StorageFull,
    Corruption,
    ParameterIndexOutOfRange,
    QueryCompilationFailure,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCategory::ConstraintViolation => "constraint violation",
            ErrorCategory::StorageFull => "storage full",
            ErrorCategory::Corruption => "corruption",
            ErrorCategory::ParameterIndexOutOfRange => "parameter index out of range",
            ErrorCategory::QueryCompilationFailure => "query compilation failure",
        };
        f.write_str(name)
    }
}

/// A backend failure translated into the SQL error a cursor consumer expects.
///
/// Every variant keeps the SQL text that was actually executed, paging clause
/// included.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SqliteError {
    #[error("{message}")]
    Constraint { message: String, query: String },

    #[error("{message}")]
    Full { message: String, query: String },

    #[error("{message}")]
    Corrupt { message: String, query: String },

    #[error(
        "Cannot bind argument at index {index} because the index is out of range. The statement has {param_count} parameters."
    )]
    BindIndexOutOfRange {
        param_count: usize,
        index: usize,
        query: String,
    },

    #[error("{message}")]
    Compile { message: String, query: String },
}

impl SqliteError {
    /// Backend message kept verbatim.
    pub fn constraint(message: &str, query: &str) -> Self {
        SqliteError::Constraint {
            message: message.to_string(),
            query: query.to_string(),
        }
    }

    /// Backend message kept verbatim.
    pub fn full(message: &str, query: &str) -> Self {
        SqliteError::Full {
            message: message.to_string(),
            query: query.to_string(),
        }
    }

    pub fn corrupt(message: &str, query: &str) -> Self {
        SqliteError::Corrupt {
            message: compile_message(query, message),
            query: query.to_string(),
        }
    }

    pub fn bind_index_out_of_range(param_count: usize, index: usize, query: &str) -> Self {
        SqliteError::BindIndexOutOfRange {
            param_count,
            index,
            query: query.to_string(),
        }
    }

    pub fn compile(message: &str, query: &str) -> Self {
        SqliteError::Compile {
            message: compile_message(query, message),
            query: query.to_string(),
        }
    }

    /// The backend reported a database error without any text.
    pub fn unknown(query: &str) -> Self {
        SqliteError::Compile {
            message: format!("Unknown error while compiling: \"{query}\""),
            query: query.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            SqliteError::Constraint { .. } => ErrorCategory::ConstraintViolation,
            SqliteError::Full { .. } => ErrorCategory::StorageFull,
            SqliteError::Corrupt { .. } => ErrorCategory::Corruption,
            SqliteError::BindIndexOutOfRange { .. } => ErrorCategory::ParameterIndexOutOfRange,
            SqliteError::Compile { .. } => ErrorCategory::QueryCompilationFailure,
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn query(&self) -> &str {
        match self {
            SqliteError::Constraint { query, .. }
            | SqliteError::Full { query, .. }
            | SqliteError::Corrupt { query, .. }
            | SqliteError::BindIndexOutOfRange { query, .. }
            | SqliteError::Compile { query, .. } => query,
        }
    }

    /// `(param_count, index)` for a bind index failure.
    pub fn parameter_index(&self) -> Option<(usize, usize)> {
        match self {
            SqliteError::BindIndexOutOfRange {
                param_count, index, ..
            } => Some((*param_count, *index)),
            _ => None,
        }
    }
}

fn compile_message(query: &str, message: &str) -> String {
    format!("error while compiling: \"{query}\": {message}")
}
