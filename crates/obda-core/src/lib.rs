//! obda-core - Core library for obda
//!
//! This crate provides the identifier model, logical terms and atoms, the
//! database metadata catalog and project configuration shared by the
//! relational core and the SQL front end.

pub mod config;
pub mod error;
pub mod identifier;
pub mod metadata;
mod name;
pub mod term;

pub use config::{Config, Dialect, IdentifierConfig};
pub use error::{CoreError, CoreResult};
pub use identifier::{CaseFolding, QuotedId, QuotedIdFactory, RelationId};
pub use metadata::{AttributeDefinition, DbMetadata, RelationDefinition};
pub use term::{Atom, ComparisonOp, Constant, Predicate, Term, Variable, VariableGenerator};
