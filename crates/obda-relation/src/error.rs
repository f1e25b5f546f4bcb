//! Error types for obda-relation

use thiserror::Error;

/// Rejection of an illegal join.
///
/// Every join operation either yields a complete relational expression or
/// exactly one of these; nothing is partially constructed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JoinError {
    /// J001: The same unaliased relation contributes to both sides of a join
    #[error("[J001] Relation '{relation}' occurs in both arguments of the join")]
    AmbiguousRelationReference { relation: String },

    /// J002: A USING/NATURAL join column is ambiguous on at least one side
    #[error("[J002] Ambiguous join column '{column}'")]
    AmbiguousJoinAttribute { column: String },

    /// J003: A USING column is missing from at least one side
    #[error("[J003] Unknown join column '{column}'")]
    UnknownJoinAttribute { column: String },

    /// J004: A condition references a column not visible in the join
    #[error("[J004] Cannot resolve column reference '{reference}'")]
    UnresolvedAttribute { reference: String },

    /// J005: An unqualified condition reference matches columns of several relations
    #[error("[J005] Column reference '{reference}' is ambiguous")]
    AmbiguousReference { reference: String },

    /// J006: A condition construct that cannot be translated into atoms
    #[error("[J006] Unsupported join condition: {0}")]
    UnsupportedCondition(String),
}

/// Result type alias for JoinError
pub type JoinResult<T> = Result<T, JoinError>;
