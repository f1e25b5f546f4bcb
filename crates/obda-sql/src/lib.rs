//! obda-sql - SQL front end for obda
//!
//! Parses SQL with sqlparser-rs and lowers the FROM clause of a SELECT into
//! a join tree over catalog relations, which is then folded into a single
//! [`RelationalExpression`]. `JOIN ... ON` conditions are translated by
//! [`SqlCondition`].

pub mod condition;
pub mod dialect;
pub mod error;
pub mod from_clause;
mod ident;
pub mod parser;

pub use condition::SqlCondition;
pub use dialect::{DuckDbDialect, GenericDialect, SnowflakeDialect, SqlDialect};
pub use error::{SqlError, SqlResult};
pub use from_clause::FromClauseTranslator;
pub use parser::SqlParser;

use obda_core::DbMetadata;
use obda_relation::RelationalExpression;

/// Parse `sql`, which must be a single SELECT, and translate its FROM clause
pub fn translate_from_sql(
    parser: &SqlParser,
    sql: &str,
    metadata: &DbMetadata,
) -> SqlResult<RelationalExpression> {
    let statement = parser.parse_single(sql)?;
    FromClauseTranslator::new(metadata).translate_statement(&statement)
}
