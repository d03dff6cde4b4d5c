pub mod error;
pub mod page;
pub mod row;
pub mod value;

// Common type aliases
pub type PageOffset = usize;
pub type ColumnIndex = usize;

/// Rows fetched per backend round trip unless a cursor is configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Scan position of a windowed cursor: which page is loaded and where inside it.
///
/// `position == -1` means "before the first row" of the loaded page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorPosition {
    pub page_offset: PageOffset,
    pub position: isize,
}

impl CursorPosition {
    pub const fn before_first() -> Self {
        Self {
            page_offset: 0,
            position: -1,
        }
    }

    /// Logical row index across the whole result set.
    pub fn absolute(&self, page_size: usize) -> i64 {
        (self.page_offset * page_size) as i64 + self.position as i64
    }
}
