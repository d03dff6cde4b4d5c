pub mod error;

use crate::{
    executor::error::BackendError,
    types::{page::Page, value::Value},
};

/// The backend query channel: run one statement with bind arguments and get the
/// whole result back, or a structured error value in place of a failure.
///
/// There is no server-side cursor behind this, every call is self-contained.
pub trait QueryExecutor {
    fn execute(&self, sql: &str, bind_args: &[Value]) -> Result<Page, BackendError>;
}

impl<E: QueryExecutor + ?Sized> QueryExecutor for &E {
    fn execute(&self, sql: &str, bind_args: &[Value]) -> Result<Page, BackendError> {
        (**self).execute(sql, bind_args)
    }
}

impl<E: QueryExecutor + ?Sized> QueryExecutor for Box<E> {
    fn execute(&self, sql: &str, bind_args: &[Value]) -> Result<Page, BackendError> {
        (**self).execute(sql, bind_args)
    }
}
