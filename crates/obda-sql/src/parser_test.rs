use super::*;

#[test]
fn test_parse_select() {
    let parser = SqlParser::duckdb();
    let stmts = parser
        .parse("SELECT e.id FROM emp e, dept d WHERE e.dept = d.id")
        .unwrap();
    assert_eq!(stmts.len(), 1);
}

#[test]
fn test_parse_multiple_statements() {
    let parser = SqlParser::duckdb();
    let stmts = parser.parse("SELECT 1; SELECT 2;").unwrap();
    assert_eq!(stmts.len(), 2);
}

#[test]
fn test_parse_empty() {
    let parser = SqlParser::duckdb();
    assert!(matches!(parser.parse(""), Err(SqlError::EmptySql)));
    assert!(matches!(parser.parse("   \n"), Err(SqlError::EmptySql)));
}

#[test]
fn test_parse_error() {
    let parser = SqlParser::duckdb();
    let result = parser.parse("SELECT FROM");
    assert!(matches!(result, Err(SqlError::ParseError { .. })));
}

#[test]
fn test_parse_single() {
    let parser = SqlParser::generic();
    assert!(parser.parse_single("SELECT * FROM emp;").is_ok());
    assert!(matches!(
        parser.parse_single("SELECT 1; SELECT 2"),
        Err(SqlError::MultipleStatements(2))
    ));
}

#[test]
fn test_from_dialect() {
    assert_eq!(SqlParser::from_dialect(Dialect::DuckDb).dialect_name(), "duckdb");
    assert_eq!(
        SqlParser::from_dialect(Dialect::Snowflake).dialect_name(),
        "snowflake"
    );
    assert_eq!(SqlParser::from_dialect(Dialect::Generic).dialect_name(), "generic");
    assert_eq!(SqlParser::default().dialect_name(), "duckdb");
}
