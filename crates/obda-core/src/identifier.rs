//! Relation and attribute identifiers
//!
//! Every name that reaches the relational layer has already gone through a
//! [`QuotedIdFactory`], so identifiers compare structurally: two ids built
//! independently from the same normalized text are the same id.

use crate::error::{CoreError, CoreResult};
use crate::name::define_name;
use serde::{Deserialize, Serialize};
use std::fmt;

define_name! {
    /// A normalized SQL identifier (column, table or schema name).
    pub struct QuotedId("identifier");
}

/// Identifier of a relation: table name plus optional schema qualifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelationId {
    schema: Option<QuotedId>,
    table: QuotedId,
}

impl RelationId {
    /// Create a relation id from already-normalized parts
    pub fn new(schema: Option<QuotedId>, table: QuotedId) -> Self {
        Self { schema, table }
    }

    /// Relation id without a schema qualifier
    pub fn table_only(table: QuotedId) -> Self {
        Self {
            schema: None,
            table,
        }
    }

    /// Schema qualifier, if any
    pub fn schema(&self) -> Option<&QuotedId> {
        self.schema.as_ref()
    }

    /// Table name
    pub fn table(&self) -> &QuotedId {
        &self.table
    }

    /// Whether the id carries a schema qualifier
    pub fn has_schema(&self) -> bool {
        self.schema.is_some()
    }
}

impl fmt::Display for RelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.schema {
            Some(schema) => write!(f, "{}.{}", schema, self.table),
            None => write!(f, "{}", self.table),
        }
    }
}

/// How unquoted identifiers are normalized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseFolding {
    /// Fold to upper case (SQL standard)
    #[default]
    Upper,
    /// Fold to lower case
    Lower,
    /// Keep the spelling as written
    Preserve,
}

/// Builds normalized identifiers from raw SQL or catalog text.
///
/// Delimited (quoted) identifiers keep their exact spelling; regular ones are
/// folded according to the configured [`CaseFolding`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuotedIdFactory {
    case_folding: CaseFolding,
}

impl QuotedIdFactory {
    /// Create a factory with the given folding rule
    pub fn new(case_folding: CaseFolding) -> Self {
        Self { case_folding }
    }

    /// The folding rule applied to unquoted identifiers
    pub fn case_folding(&self) -> CaseFolding {
        self.case_folding
    }

    /// Normalize an identifier whose quoting is already known
    pub fn create_id(&self, name: &str, quoted: bool) -> CoreResult<QuotedId> {
        let normalized = if quoted {
            name.to_string()
        } else {
            match self.case_folding {
                CaseFolding::Upper => name.to_uppercase(),
                CaseFolding::Lower => name.to_lowercase(),
                CaseFolding::Preserve => name.to_string(),
            }
        };
        QuotedId::try_new(normalized).ok_or_else(|| CoreError::InvalidIdentifier {
            message: "identifier must not be empty".to_string(),
        })
    }

    /// Normalize identifier text, treating surrounding double quotes as delimiters.
    ///
    /// Doubled quotes inside a delimited identifier stand for one quote.
    pub fn parse_id(&self, raw: &str) -> CoreResult<QuotedId> {
        let trimmed = raw.trim();
        match trimmed
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
        {
            Some(inner) => self.create_id(&inner.replace("\"\"", "\""), true),
            None => self.create_id(trimmed, false),
        }
    }

    /// Build a relation id from identifier text
    pub fn create_relation_id(&self, schema: Option<&str>, table: &str) -> CoreResult<RelationId> {
        let schema = schema.map(|s| self.parse_id(s)).transpose()?;
        Ok(RelationId::new(schema, self.parse_id(table)?))
    }
}

#[cfg(test)]
#[path = "identifier_test.rs"]
mod tests;
