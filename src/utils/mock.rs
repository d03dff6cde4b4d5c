//! In-process backend for tests and benches.

use std::{
    cell::RefCell,
    collections::HashMap,
};

use sqlparser::{keywords::Keyword, tokenizer::Token};

use crate::{
    executor::{QueryExecutor, error::BackendError},
    planner::query::top_level_tokens,
    types::{page::Page, row::Row, value::Value},
};

#[derive(Debug, Clone, PartialEq)]
pub struct ExecutedQuery {
    pub sql: String,
    pub bind_args: Vec<Value>,
}

/// Serves a fixed result set, honouring the `LIMIT/OFFSET` at the end of each
/// statement, and records everything it was asked to run.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    rows: Vec<Row>,
    executed: RefCell<Vec<ExecutedQuery>>,
    failure: RefCell<Option<BackendError>>,
    offset_failures: RefCell<HashMap<usize, BackendError>>,
}

impl MemoryBackend {
    pub fn new(rows: Vec<Row>) -> Self {
        Self {
            rows,
            ..Self::default()
        }
    }

    /// `count` single-column rows holding the ids `1..=count`.
    pub fn with_ids(count: usize) -> Self {
        Self::new(
            (1..=count as i64)
                .map(|id| Row::new(vec![Value::Integer(id)]))
                .collect(),
        )
    }

    /// Every following execution fails with `error` until cleared.
    pub fn fail_with(&self, error: BackendError) {
        *self.failure.borrow_mut() = Some(error);
    }

    /// Executions whose `OFFSET` equals `offset` fail with `error`.
    pub fn fail_at_offset(&self, offset: usize, error: BackendError) {
        self.offset_failures.borrow_mut().insert(offset, error);
    }

    pub fn clear_failures(&self) {
        self.failure.borrow_mut().take();
        self.offset_failures.borrow_mut().clear();
    }

    pub fn executed(&self) -> Vec<ExecutedQuery> {
        self.executed.borrow().clone()
    }

    /// The `OFFSET` of every execution so far, in order.
    pub fn executed_offsets(&self) -> Vec<usize> {
        self.executed
            .borrow()
            .iter()
            .filter_map(|query| limit_and_offset(&query.sql).map(|(_, offset)| offset))
            .collect()
    }

    pub fn execution_count(&self) -> usize {
        self.executed.borrow().len()
    }
}

impl QueryExecutor for MemoryBackend {
    fn execute(&self, sql: &str, bind_args: &[Value]) -> Result<Page, BackendError> {
        self.executed.borrow_mut().push(ExecutedQuery {
            sql: sql.to_string(),
            bind_args: bind_args.to_vec(),
        });

        if let Some(error) = self.failure.borrow().clone() {
            return Err(error);
        }

        let Some((limit, offset)) = limit_and_offset(sql) else {
            return Ok(Page::new(self.rows.clone()));
        };
        if let Some(error) = self.offset_failures.borrow().get(&offset) {
            return Err(error.clone());
        }

        Ok(self
            .rows
            .iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect::<Vec<_>>()
            .into())
    }
}

/// Reads `LIMIT <n>` and `OFFSET <m>` from the top level of `sql`.
fn limit_and_offset(sql: &str) -> Option<(usize, usize)> {
    let tokens = top_level_tokens(sql).ok()?;
    let number_after = |keyword: Keyword| {
        tokens.windows(2).rev().find_map(|pair| match pair {
            [Token::Word(word), Token::Number(n, _)] if word.keyword == keyword => {
                n.parse::<usize>().ok()
            }
            _ => None,
        })
    };

    let limit = number_after(Keyword::LIMIT)?;
    Some((limit, number_after(Keyword::OFFSET).unwrap_or(0)))
}
