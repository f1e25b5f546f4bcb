//! Error types for obda-sql

use obda_core::CoreError;
use obda_relation::JoinError;
use thiserror::Error;

/// SQL parsing and FROM-clause translation errors
#[derive(Error, Debug)]
pub enum SqlError {
    /// SQL parse error (S001)
    #[error("[S001] SQL parse error at line {line}, column {column}: {message}")]
    ParseError {
        message: String,
        line: usize,
        column: usize,
    },

    /// Empty SQL (S002)
    #[error("[S002] SQL is empty")]
    EmptySql,

    /// Unsupported SQL statement (S003)
    #[error("[S003] Unsupported SQL statement type: {0}")]
    UnsupportedStatement(String),

    /// Construct the FROM-clause translation does not handle (S004)
    #[error("[S004] Unsupported construct in FROM clause: {0}")]
    UnsupportedConstruct(String),

    /// Relation missing from the catalog (S005)
    #[error("[S005] Unknown relation '{relation}'")]
    UnknownRelation { relation: String },

    /// Alias lists more columns than the relation has (S006)
    #[error("[S006] Alias '{alias}' lists {given} column(s) but '{relation}' has {expected}")]
    AliasColumnMismatch {
        alias: String,
        relation: String,
        expected: usize,
        given: usize,
    },

    /// More than one statement where one was expected (S007)
    #[error("[S007] Expected a single statement, found {0}")]
    MultipleStatements(usize),

    /// Join algebra failure
    #[error(transparent)]
    Join(#[from] JoinError),

    /// Identifier or catalog failure
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type alias for SqlError
pub type SqlResult<T> = Result<T, SqlError>;
