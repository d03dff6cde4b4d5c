use tracing::{debug, warn};

use crate::{
    classify,
    config::CursorConfig,
    cursor::Cursor,
    executor::QueryExecutor,
    planner::query::BaseQuery,
    types::{
        ColumnIndex, CursorPosition, PageOffset,
        error::{CursorError, Result},
        page::Page,
        row::Row,
        value::{DataType, Value},
    },
};

/// A cursor that pages through a result set with `LIMIT/OFFSET`.
///
/// The backend hands back whole results and keeps no server-side cursor, so
/// every window is a fresh execution of the base query with its own offset.
/// Only the current page is held in memory.
///
/// Not safe to share between threads: a fetch and the position update that
/// follows it are not atomic.
pub struct WindowedCursor<'s, E: QueryExecutor + ?Sized> {
    session: &'s E,
    query: BaseQuery,
    bind_args: Vec<Value>,
    page_size: usize,
    state: CursorPosition,
    page: Page,
    fetches: usize,
    closed: bool,
}

impl<'s, E: QueryExecutor + ?Sized> WindowedCursor<'s, E> {
    pub fn new(session: &'s E, sql: &str, bind_args: Vec<Value>) -> Result<Self> {
        Self::with_config(session, sql, bind_args, CursorConfig::default())
    }

    /// Builds the cursor and fetches the first page.
    pub fn with_config(
        session: &'s E,
        sql: &str,
        bind_args: Vec<Value>,
        config: CursorConfig,
    ) -> Result<Self> {
        config.validate()?;
        let query = if config.validate_query {
            BaseQuery::parse(sql)?
        } else {
            BaseQuery::unchecked(sql)
        };

        let mut cursor = Self {
            session,
            query,
            bind_args,
            page_size: config.page_size,
            state: CursorPosition::before_first(),
            page: Page::empty(),
            fetches: 0,
            closed: false,
        };
        cursor.load_page(0)?;
        Ok(cursor)
    }

    pub fn query(&self) -> &str {
        self.query.as_str()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn cursor_position(&self) -> CursorPosition {
        self.state
    }

    /// Number of backend executions issued so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(CursorError::Closed);
        }
        Ok(())
    }

    fn fetch_page(&mut self, page_offset: PageOffset) -> Result<Page> {
        let sql = self.query.page_sql(self.page_size, page_offset);
        self.fetches += 1;

        match self.session.execute(&sql, &self.bind_args) {
            Ok(page) if page.len() > self.page_size => Err(CursorError::PageOverflow {
                page_size: self.page_size,
                len: page.len(),
                query: sql,
            }),
            Ok(page) => {
                debug!(sql = %sql, page_offset, rows = page.len(), "fetched page");
                Ok(page)
            }
            Err(error) => Err(match classify::classify(&error, &sql) {
                Ok(translated) => CursorError::Sqlite(translated),
                Err(fatal) => CursorError::Fatal(fatal),
            }),
        }
    }

    /// Replaces the current window. On failure the old window stays in place.
    fn load_page(&mut self, page_offset: PageOffset) -> Result<()> {
        self.page = self.fetch_page(page_offset)?;
        self.state = CursorPosition {
            page_offset,
            position: -1,
        };
        Ok(())
    }

    /// Re-fetches the saved window and puts the scan position back. If the
    /// fetch fails the held page and position are left as they were.
    fn restore(&mut self, saved: CursorPosition) -> Result<()> {
        self.load_page(saved.page_offset)?;
        self.state.position = saved.position;
        Ok(())
    }

    /// Walks every page from the start until a short one shows up. The pages
    /// are dropped as they are counted; the held window is not touched.
    fn scan_to_end(&mut self) -> Result<usize> {
        let mut total = 0;
        let mut page_offset = 0;
        loop {
            let page = self.fetch_page(page_offset)?;
            total += page.len();
            if page.is_terminal(self.page_size) {
                return Ok(total);
            }
            page_offset += 1;
        }
    }

    fn has_row(&self) -> bool {
        self.state.position >= 0 && (self.state.position as usize) < self.page.len()
    }

    pub fn get_value(&self, column: ColumnIndex) -> Result<&Value> {
        let row = self.current_row()?;
        row.get_value(column)
            .ok_or(CursorError::ColumnOutOfRange {
                index: column,
                count: row.column_count(),
            })
    }

    pub fn column_count(&self) -> Result<usize> {
        Ok(self.current_row()?.column_count())
    }

    pub fn is_null(&self, column: ColumnIndex) -> Result<bool> {
        Ok(self.get_value(column)?.is_null())
    }

    /// `None` for SQL NULL.
    pub fn get_i64(&self, column: ColumnIndex) -> Result<Option<i64>> {
        self.read(column, DataType::Integer, Value::as_i64)
    }

    pub fn get_f64(&self, column: ColumnIndex) -> Result<Option<f64>> {
        self.read(column, DataType::Real, Value::as_f64)
    }

    pub fn get_string(&self, column: ColumnIndex) -> Result<Option<String>> {
        self.read(column, DataType::Text, Value::as_text)
    }

    pub fn get_blob(&self, column: ColumnIndex) -> Result<Option<&[u8]>> {
        match self.get_value(column)? {
            Value::Null => Ok(None),
            Value::Blob(bytes) => Ok(Some(bytes)),
            other => Err(CursorError::TypeMismatch {
                column,
                expected: DataType::Blob,
                actual: other.data_type(),
            }),
        }
    }

    fn read<T>(
        &self,
        column: ColumnIndex,
        expected: DataType,
        convert: impl Fn(&Value) -> Option<T>,
    ) -> Result<Option<T>> {
        let value = self.get_value(column)?;
        if value.is_null() {
            return Ok(None);
        }
        convert(value).map(Some).ok_or(CursorError::TypeMismatch {
            column,
            expected,
            actual: value.data_type(),
        })
    }
}

impl<E: QueryExecutor + ?Sized> Cursor for WindowedCursor<'_, E> {
    /// Moves to the first row of the loaded window. Never fetches.
    fn move_to_first(&mut self) -> Result<bool> {
        self.ensure_open()?;
        if self.page.is_empty() {
            return Ok(false);
        }
        self.state.position = 0;
        Ok(true)
    }

    fn move_to_next(&mut self) -> Result<bool> {
        self.ensure_open()?;
        // A full last page costs one extra fetch, which comes back empty.
        if !self.page.is_empty() && self.state.position + 1 >= self.page_size as isize {
            self.load_page(self.state.page_offset + 1)?;
        }
        self.state.position += 1;
        Ok(self.has_row())
    }

    fn move_to_position(&mut self, position: usize) -> Result<bool> {
        self.ensure_open()?;
        let page_offset = position / self.page_size;
        if page_offset != self.state.page_offset {
            self.load_page(page_offset)?;
        }
        self.state.position = (position % self.page_size) as isize;
        Ok(self.has_row())
    }

    fn position(&self) -> i64 {
        self.state.absolute(self.page_size)
    }

    /// Exact row count. Extremely slow: unless the loaded window is the short
    /// last one, every page is fetched again and then the current one reloaded.
    ///
    /// The scan position is the same before and after the call.
    fn count(&mut self) -> Result<usize> {
        self.ensure_open()?;
        warn!(query = %self.query, "Extremely slow call: count()");

        let len = self.page.len();
        if len > 0 && len < self.page_size {
            return Ok(self.state.page_offset * self.page_size + len);
        }

        let saved = self.state;
        let total = self.scan_to_end()?;
        self.restore(saved)?;
        Ok(total)
    }

    fn current_row(&self) -> Result<&Row> {
        self.ensure_open()?;
        let position = self.state.position;
        if position < 0 {
            return Err(CursorError::RowOutOfRange {
                position,
                len: self.page.len(),
            });
        }
        self.page
            .row(position as usize)
            .ok_or(CursorError::RowOutOfRange {
                position,
                len: self.page.len(),
            })
    }

    fn close(&mut self) {
        self.page = Page::empty();
        self.closed = true;
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}
