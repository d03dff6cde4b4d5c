pub mod windowed;

use crate::types::{error::Result, row::Row};

/// Positional access over a query result, in the shape SQL cursor consumers expect.
///
/// Any method that may reach the backend can fail with
/// [`CursorError::Fatal`](crate::types::error::CursorError::Fatal). Callers
/// that recover from SQL errors should match
/// [`CursorError::as_sqlite`](crate::types::error::CursorError::as_sqlite)
/// rather than discarding every `Err`, and stop on
/// [`is_fatal`](crate::types::error::CursorError::is_fatal).
pub trait Cursor {
    fn move_to_first(&mut self) -> Result<bool>;
    fn move_to_next(&mut self) -> Result<bool>;
    /// Seeks to an absolute row index; `false` when no row exists there.
    fn move_to_position(&mut self, position: usize) -> Result<bool>;
    /// Absolute index of the current row, `-1` before the first one.
    fn position(&self) -> i64;
    fn count(&mut self) -> Result<usize>;
    fn current_row(&self) -> Result<&Row>;
    fn close(&mut self);
    fn is_closed(&self) -> bool;

    fn rows(&mut self) -> Rows<'_, Self>
    where
        Self: Sized,
    {
        Rows::new(self)
    }
}

/// Iterates the remaining rows of a cursor by repeated `move_to_next`.
pub struct Rows<'c, C: Cursor> {
    cursor: &'c mut C,
    done: bool,
}

impl<'c, C: Cursor> Rows<'c, C> {
    pub fn new(cursor: &'c mut C) -> Self {
        Self {
            cursor,
            done: false,
        }
    }
}

impl<C: Cursor> Iterator for Rows<'_, C> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.cursor.move_to_next() {
            Ok(true) => Some(self.cursor.current_row().cloned()),
            Ok(false) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
