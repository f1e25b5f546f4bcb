//! obda-relation: relational expressions for SQL FROM clauses
//!
//! A FROM clause is represented as a [`RelationalExpression`]: the logical
//! atoms of its relations plus a dictionary resolving qualified and bare
//! column references to variables, kept consistent with SQL scoping rules by
//! the join algebra (cross, ON, USING, NATURAL).

pub mod attribute;
pub mod condition;
pub mod error;
pub mod expression;
pub mod join;
pub mod join_tree;
pub mod scope;

pub use attribute::{AttributeDictionary, QualifiedAttributeId};
pub use condition::ConditionTranslator;
pub use error::{JoinError, JoinResult};
pub use expression::RelationalExpression;
pub use join_tree::{JoinKind, JoinTree};
pub use scope::AttributeScope;
