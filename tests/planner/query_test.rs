use pagecursor::planner::{error::QueryError, query::BaseQuery};

#[test]
fn test_plain_select_is_accepted() -> Result<(), QueryError> {
    let query = BaseQuery::parse("SELECT id FROM notes")?;
    assert_eq!(query.as_str(), "SELECT id FROM notes");
    Ok(())
}

#[test]
fn test_trailing_terminator_is_stripped() -> Result<(), QueryError> {
    let query = BaseQuery::parse("  SELECT id FROM notes WHERE id > ?;  ")?;
    assert_eq!(query.as_str(), "SELECT id FROM notes WHERE id > ?");
    Ok(())
}

#[test]
fn test_page_sql_appends_limit_and_offset() -> Result<(), QueryError> {
    let query = BaseQuery::parse("SELECT id FROM notes")?;
    assert_eq!(query.page_sql(100, 0), "SELECT id FROM notes LIMIT 100 OFFSET 0");
    assert_eq!(query.page_sql(2, 3), "SELECT id FROM notes LIMIT 2 OFFSET 6");
    Ok(())
}

#[test]
fn test_existing_limit_is_rejected() {
    let result = BaseQuery::parse("SELECT id FROM notes LIMIT 5");
    assert!(matches!(result, Err(QueryError::HasLimitClause("LIMIT"))));

    let result = BaseQuery::parse("SELECT id FROM notes LIMIT 5 OFFSET 10");
    assert!(matches!(result, Err(QueryError::HasLimitClause(_))));
}

#[test]
fn test_limit_inside_subquery_is_allowed() -> Result<(), QueryError> {
    let query =
        BaseQuery::parse("SELECT id FROM notes WHERE id IN (SELECT nid FROM cards LIMIT 3)")?;
    assert!(query.page_sql(10, 1).ends_with(") LIMIT 10 OFFSET 10"));
    Ok(())
}

#[test]
fn test_non_query_statements_are_rejected() {
    let result = BaseQuery::parse("DELETE FROM notes");
    assert!(matches!(result, Err(QueryError::NotAQuery(_))));

    let result = BaseQuery::parse("INSERT INTO notes (id) VALUES (1)");
    assert!(matches!(result, Err(QueryError::NotAQuery(_))));
}

#[test]
fn test_multiple_and_empty_statements_are_rejected() {
    let result = BaseQuery::parse("SELECT 1; SELECT 2");
    assert!(matches!(result, Err(QueryError::MultipleStatements(2))));

    assert!(matches!(BaseQuery::parse("   ;"), Err(QueryError::Empty)));
}

#[test]
fn test_unparsable_sql_reports_parser_error() {
    let result = BaseQuery::parse("SELEC id FROM");
    assert!(matches!(result, Err(QueryError::SqlParser(_))));
}

#[test]
fn test_unchecked_query_keeps_text() {
    let query = BaseQuery::unchecked("SELECT id FROM notes LIMIT 1;");
    assert_eq!(query.as_str(), "SELECT id FROM notes LIMIT 1");
    assert_eq!(query.to_string(), query.as_str());
}

#[test]
fn test_trailing_comments_are_stripped() -> Result<(), QueryError> {
    let query = BaseQuery::parse("SELECT id FROM notes -- every note")?;
    assert_eq!(query.as_str(), "SELECT id FROM notes");
    assert_eq!(query.page_sql(2, 1), "SELECT id FROM notes LIMIT 2 OFFSET 2");

    let query = BaseQuery::parse("SELECT id FROM notes /* all */ ;")?;
    assert_eq!(query.as_str(), "SELECT id FROM notes");

    let query = BaseQuery::parse("SELECT id FROM notes; -- trailing")?;
    assert_eq!(query.as_str(), "SELECT id FROM notes");
    Ok(())
}

#[test]
fn test_comment_markers_inside_literals_are_kept() -> Result<(), QueryError> {
    let query = BaseQuery::parse("SELECT id FROM notes WHERE sfld = 'a--b'")?;
    assert_eq!(query.as_str(), "SELECT id FROM notes WHERE sfld = 'a--b'");
    Ok(())
}
