use std::fmt;

use sqlparser::{
    ast::Statement,
    dialect::SQLiteDialect,
    keywords::Keyword,
    parser::Parser,
    tokenizer::{Token, Tokenizer, TokenizerError, Whitespace},
};

use crate::planner::error::QueryError;

/// The caller's `SELECT`, stored without any paging clause so that it can be
/// re-executed with a different `LIMIT/OFFSET` for every window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseQuery {
    sql: String,
}

impl BaseQuery {
    /// Validates that `sql` is a single read-only query with no top-level
    /// `LIMIT` or `OFFSET` of its own.
    pub fn parse(sql: &str) -> Result<Self, QueryError> {
        let sql = strip_terminator(sql);
        if sql.is_empty() {
            return Err(QueryError::Empty);
        }

        let dialect = SQLiteDialect {};
        let statements = Parser::parse_sql(&dialect, sql)?;
        if statements.len() != 1 {
            return Err(QueryError::MultipleStatements(statements.len()));
        }
        match &statements[0] {
            Statement::Query(_) => {}
            other => return Err(QueryError::NotAQuery(other.to_string())),
        }

        for token in top_level_tokens(sql)? {
            if let Token::Word(word) = token {
                match word.keyword {
                    Keyword::LIMIT => return Err(QueryError::HasLimitClause("LIMIT")),
                    Keyword::OFFSET => return Err(QueryError::HasLimitClause("OFFSET")),
                    _ => {}
                }
            }
        }

        Ok(Self {
            sql: sql.to_string(),
        })
    }

    /// Takes the query as-is, for backend dialect SQL the parser does not know.
    /// Any violation then surfaces as a backend error on the first fetch.
    /// Trailing comments are still dropped when the text can be tokenized.
    pub fn unchecked(sql: &str) -> Self {
        Self {
            sql: strip_terminator(sql).to_string(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.sql
    }

    /// SQL text that fetches window number `page_offset`.
    pub fn page_sql(&self, page_size: usize, page_offset: usize) -> String {
        format!(
            "{} LIMIT {} OFFSET {}",
            self.sql,
            page_size,
            page_offset * page_size
        )
    }
}

impl fmt::Display for BaseQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}

/// Drops trailing `;` and comments, so that the paging clause appended after
/// the query is neither commented out nor placed after a terminator.
fn strip_terminator(sql: &str) -> &str {
    let mut sql = sql.trim();
    loop {
        if let Some(rest) = sql.strip_suffix(';') {
            sql = rest.trim_end();
            continue;
        }
        match trailing_comment_len(sql).and_then(|len| sql.get(..sql.len().checked_sub(len)?)) {
            Some(rest) => sql = rest.trim_end(),
            None => return sql,
        }
    }
}

/// Byte length of a comment that ends `sql`, as written in the source.
fn trailing_comment_len(sql: &str) -> Option<usize> {
    let dialect = SQLiteDialect {};
    let tokens = Tokenizer::new(&dialect, sql).tokenize().ok()?;
    match tokens.last()? {
        Token::Whitespace(
            comment @ (Whitespace::SingleLineComment { .. } | Whitespace::MultiLineComment(_)),
        ) => Some(comment.to_string().len()),
        _ => None,
    }
}

/// Non-whitespace tokens outside any parentheses, in source order.
pub fn top_level_tokens(sql: &str) -> Result<Vec<Token>, TokenizerError> {
    let dialect = SQLiteDialect {};
    let tokens = Tokenizer::new(&dialect, sql).tokenize()?;

    let mut depth = 0usize;
    let mut top_level = Vec::new();
    for token in tokens {
        match token {
            Token::LParen => depth += 1,
            Token::RParen => depth = depth.saturating_sub(1),
            Token::Whitespace(_) => {}
            token if depth == 0 => top_level.push(token),
            _ => {}
        }
    }
    Ok(top_level)
}
