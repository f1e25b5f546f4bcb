//! Qualified attribute keys and the attribute-to-variable dictionary

use obda_core::{QuotedId, RelationId, Variable};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Column reference key: optional relation qualifier plus column name.
///
/// `T.A` and bare `A` are distinct keys; both are used at once for every
/// physical column of a relational expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedAttributeId {
    relation: Option<RelationId>,
    attribute: QuotedId,
}

impl QualifiedAttributeId {
    /// Key with a relation qualifier (`T.A`)
    pub fn qualified(relation: RelationId, attribute: QuotedId) -> Self {
        Self {
            relation: Some(relation),
            attribute,
        }
    }

    /// Key without a relation qualifier (`A`)
    pub fn unqualified(attribute: QuotedId) -> Self {
        Self {
            relation: None,
            attribute,
        }
    }

    /// Relation qualifier, if any
    pub fn relation(&self) -> Option<&RelationId> {
        self.relation.as_ref()
    }

    /// Column name
    pub fn attribute(&self) -> &QuotedId {
        &self.attribute
    }

    pub fn is_qualified(&self) -> bool {
        self.relation.is_some()
    }
}

impl fmt::Display for QualifiedAttributeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.relation {
            Some(relation) => write!(f, "{}.{}", relation, self.attribute),
            None => write!(f, "{}", self.attribute),
        }
    }
}

/// Mapping from column references to the variables they denote.
///
/// An ambiguous unqualified name is absent from the dictionary, so "not in
/// scope" and "ambiguous" both surface as a lookup returning `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeDictionary(BTreeMap<QualifiedAttributeId, Variable>);

impl AttributeDictionary {
    /// Empty dictionary
    pub fn new() -> Self {
        Self::default()
    }

    /// Variable for a key
    pub fn get(&self, id: &QualifiedAttributeId) -> Option<&Variable> {
        self.0.get(id)
    }

    /// Variable for `relation.attribute`
    pub fn get_qualified(&self, relation: &RelationId, attribute: &QuotedId) -> Option<&Variable> {
        self.get(&QualifiedAttributeId::qualified(
            relation.clone(),
            attribute.clone(),
        ))
    }

    /// Variable for a bare `attribute`
    pub fn get_unqualified(&self, attribute: &QuotedId) -> Option<&Variable> {
        self.get(&QualifiedAttributeId::unqualified(attribute.clone()))
    }

    pub fn contains_key(&self, id: &QualifiedAttributeId) -> bool {
        self.0.contains_key(id)
    }

    /// Entries in key order (unqualified keys first)
    pub fn iter(&self) -> impl Iterator<Item = (&QualifiedAttributeId, &Variable)> {
        self.0.iter()
    }

    /// Entries carrying a relation qualifier
    pub fn qualified(&self) -> impl Iterator<Item = (&QualifiedAttributeId, &Variable)> {
        self.0.iter().filter(|(id, _)| id.is_qualified())
    }

    /// Entries without a relation qualifier
    pub fn unqualified(&self) -> impl Iterator<Item = (&QualifiedAttributeId, &Variable)> {
        self.0.iter().filter(|(id, _)| !id.is_qualified())
    }

    /// Relations appearing as qualifiers
    pub fn relations(&self) -> BTreeSet<&RelationId> {
        self.0.keys().filter_map(QualifiedAttributeId::relation).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn insert(&mut self, id: QualifiedAttributeId, variable: Variable) {
        self.0.insert(id, variable);
    }
}

impl FromIterator<(QualifiedAttributeId, Variable)> for AttributeDictionary {
    fn from_iter<I: IntoIterator<Item = (QualifiedAttributeId, Variable)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for AttributeDictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (id, var)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", id, var)?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel(name: &str) -> RelationId {
        RelationId::table_only(QuotedId::new(name))
    }

    #[test]
    fn test_keys_compare_structurally() {
        let a = QualifiedAttributeId::qualified(rel("P"), QuotedId::new("A"));
        let b = QualifiedAttributeId::qualified(rel("P"), QuotedId::new("A"));
        assert_eq!(a, b);
        assert_ne!(a, QualifiedAttributeId::unqualified(QuotedId::new("A")));
        assert_eq!(
            QualifiedAttributeId::unqualified(QuotedId::new("A")),
            QualifiedAttributeId::unqualified(QuotedId::new("A"))
        );
    }

    #[test]
    fn test_dictionary_lookups() {
        let dict: AttributeDictionary = [
            (
                QualifiedAttributeId::qualified(rel("P"), QuotedId::new("A")),
                Variable::new("x"),
            ),
            (
                QualifiedAttributeId::unqualified(QuotedId::new("A")),
                Variable::new("x"),
            ),
            (
                QualifiedAttributeId::qualified(rel("Q"), QuotedId::new("B")),
                Variable::new("y"),
            ),
        ]
        .into_iter()
        .collect();

        assert_eq!(dict.get_qualified(&rel("P"), &QuotedId::new("A")).unwrap(), "x");
        assert_eq!(dict.get_unqualified(&QuotedId::new("A")).unwrap(), "x");
        assert!(dict.get_unqualified(&QuotedId::new("B")).is_none());
        assert_eq!(dict.qualified().count(), 2);
        assert_eq!(dict.unqualified().count(), 1);

        let relations: Vec<String> = dict.relations().iter().map(|r| r.to_string()).collect();
        assert_eq!(relations, vec!["P", "Q"]);
    }

    #[test]
    fn test_display() {
        let dict: AttributeDictionary = [(
            QualifiedAttributeId::qualified(rel("P"), QuotedId::new("A")),
            Variable::new("x"),
        )]
        .into_iter()
        .collect();
        assert_eq!(dict.to_string(), "{P.A: x}");
    }
}
