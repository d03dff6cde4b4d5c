use serde::{Deserialize, Serialize};

use crate::types::row::Row;

/// One bounded batch of rows, produced by a single `LIMIT/OFFSET` execution.
///
/// A page is replaced wholesale on every window transition, it is never
/// appended to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    rows: Vec<Row>,
}

impl Page {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    /// A page shorter than the requested size is the last one of the result set.
    /// A full page says nothing: the next page may still be empty.
    pub fn is_terminal(&self, page_size: usize) -> bool {
        self.rows.len() < page_size
    }
}

impl From<Vec<Row>> for Page {
    fn from(rows: Vec<Row>) -> Self {
        Self::new(rows)
    }
}
