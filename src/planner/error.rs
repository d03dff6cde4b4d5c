#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("SQL parsing error: {0}")]
    SqlParser(#[from] sqlparser::parser::ParserError),
    #[error("SQL tokenizing error: {0}")]
    Tokenizer(#[from] sqlparser::tokenizer::TokenizerError),
    #[error("Empty query")]
    Empty,
    #[error("Expected exactly one statement, got {0}")]
    MultipleStatements(usize),
    #[error("Not a read-only query: {0}")]
    NotAQuery(String),
    #[error("Query already has a top-level {0} clause")]
    HasLimitClause(&'static str),
}
