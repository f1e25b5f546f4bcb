//! Attribute scope: which relations in scope expose each column name

use obda_core::{QuotedId, RelationId};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Occurrence index from column name to the relations exposing it.
///
/// A name is unambiguous iff exactly one relation exposes it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeScope(BTreeMap<QuotedId, BTreeSet<RelationId>>);

impl AttributeScope {
    /// Empty scope
    pub fn new() -> Self {
        Self::default()
    }

    /// Relations exposing a column name
    pub fn occurrences(&self, attribute: &QuotedId) -> Option<&BTreeSet<RelationId>> {
        self.0.get(attribute)
    }

    /// Whether any relation in scope exposes the name
    pub fn contains(&self, attribute: &QuotedId) -> bool {
        self.0.contains_key(attribute)
    }

    /// Exactly one relation exposes the name
    pub fn is_unique(&self, attribute: &QuotedId) -> bool {
        self.occurrences(attribute).is_some_and(|rels| rels.len() == 1)
    }

    /// More than one relation exposes the name
    pub fn is_ambiguous(&self, attribute: &QuotedId) -> bool {
        self.occurrences(attribute).is_some_and(|rels| rels.len() > 1)
    }

    /// The single relation exposing the name, when unambiguous
    pub fn unique_relation(&self, attribute: &QuotedId) -> Option<&RelationId> {
        match self.occurrences(attribute) {
            Some(rels) if rels.len() == 1 => rels.iter().next(),
            _ => None,
        }
    }

    /// Column names in scope, in name order
    pub fn names(&self) -> impl Iterator<Item = &QuotedId> {
        self.0.keys()
    }

    /// Names present in both scopes, in name order
    pub fn common_names(&self, other: &AttributeScope) -> Vec<QuotedId> {
        self.0
            .keys()
            .filter(|name| other.contains(name))
            .cloned()
            .collect()
    }

    /// Pointwise union of two scopes
    pub fn union(&self, other: &AttributeScope) -> Self {
        let mut merged = self.clone();
        for (name, relations) in &other.0 {
            merged
                .0
                .entry(name.clone())
                .or_default()
                .extend(relations.iter().cloned());
        }
        merged
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QuotedId, &BTreeSet<RelationId>)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn add(&mut self, attribute: QuotedId, relation: RelationId) {
        self.0.entry(attribute).or_default().insert(relation);
    }
}

impl FromIterator<(QuotedId, BTreeSet<RelationId>)> for AttributeScope {
    fn from_iter<I: IntoIterator<Item = (QuotedId, BTreeSet<RelationId>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for AttributeScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, relations)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: [", name)?;
            for (j, relation) in relations.iter().enumerate() {
                if j > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", relation)?;
            }
            f.write_str("]")?;
        }
        f.write_str("}")
    }
}
