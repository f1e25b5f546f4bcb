//! Relational expressions: atoms plus the scoped column dictionary
//!
//! A `RelationalExpression` is an immutable value. Leaves are built from one
//! base relation; every join in [`crate::join`] returns a fresh value and
//! leaves its inputs untouched.

use crate::attribute::{AttributeDictionary, QualifiedAttributeId};
use crate::error::{JoinError, JoinResult};
use crate::scope::AttributeScope;
use obda_core::{Atom, Predicate, QuotedId, RelationId, Term, Variable};
use std::collections::BTreeSet;
use std::fmt;

/// Atoms of a (possibly joined) relational source together with the
/// dictionary resolving column references to variables and the scope used to
/// decide ambiguity.
///
/// For a well-formed expression:
/// - every dictionary variable occurs in some atom;
/// - every qualified key `R.c` has `R` in `scope[c]`;
/// - bare `c` is present iff `scope[c]` has exactly one relation, and then
///   maps to that relation's variable for `c`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationalExpression {
    atoms: Vec<Atom>,
    attributes: AttributeDictionary,
    scope: AttributeScope,
}

impl RelationalExpression {
    /// Assemble an expression from parts.
    ///
    /// No consistency checks are made; prefer [`from_base_relation`](Self::from_base_relation)
    /// and the join operators.
    pub fn new(atoms: Vec<Atom>, attributes: AttributeDictionary, scope: AttributeScope) -> Self {
        Self {
            atoms,
            attributes,
            scope,
        }
    }

    /// Leaf expression for a base relation referenced under its own name.
    ///
    /// Produces the single atom `relation(v1, ..., vn)` and seeds both the
    /// qualified and the bare key of every column.
    pub fn from_base_relation(relation: &RelationId, columns: &[(QuotedId, Variable)]) -> Self {
        Self::from_aliased_relation(relation, relation.clone(), columns)
    }

    /// Leaf expression for a catalog relation referenced without an alias.
    ///
    /// Like [`from_base_relation`](Self::from_base_relation), and a
    /// schema-qualified relation also answers to its bare table name
    /// (`SALARY.AMOUNT` as well as `HR.SALARY.AMOUNT`). The extra keys count
    /// towards relation collisions but not towards the scope, so they never
    /// make a column ambiguous.
    pub fn from_catalog_relation(relation: &RelationId, columns: &[(QuotedId, Variable)]) -> Self {
        let mut expression = Self::from_base_relation(relation, columns);
        if relation.has_schema() {
            let table = RelationId::table_only(relation.table().clone());
            for (column, var) in columns {
                expression.attributes.insert(
                    QualifiedAttributeId::qualified(table.clone(), column.clone()),
                    var.clone(),
                );
            }
        }
        expression
    }

    /// Leaf expression for a base relation referenced under `alias`.
    ///
    /// The atom predicate comes from `relation`; column keys are qualified
    /// by `alias`.
    pub fn from_aliased_relation(
        relation: &RelationId,
        alias: RelationId,
        columns: &[(QuotedId, Variable)],
    ) -> Self {
        let predicate = Predicate::for_relation(relation, columns.len());
        let args = columns
            .iter()
            .map(|(_, var)| Term::Variable(var.clone()))
            .collect();

        let mut attributes = AttributeDictionary::new();
        let mut scope = AttributeScope::new();
        for (column, var) in columns {
            attributes.insert(
                QualifiedAttributeId::qualified(alias.clone(), column.clone()),
                var.clone(),
            );
            attributes.insert(QualifiedAttributeId::unqualified(column.clone()), var.clone());
            scope.add(column.clone(), alias.clone());
        }

        log::trace!("Leaf {} as {} with {} column(s)", relation, alias, columns.len());

        Self {
            atoms: vec![Atom::data(predicate, args)],
            attributes,
            scope,
        }
    }

    /// Atoms in order of contribution
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// Column reference dictionary
    pub fn attributes(&self) -> &AttributeDictionary {
        &self.attributes
    }

    /// Occurrence index used for ambiguity decisions
    pub fn scope(&self) -> &AttributeScope {
        &self.scope
    }

    /// Relations contributing to this expression (the qualifiers in the dictionary)
    pub fn relations(&self) -> BTreeSet<&RelationId> {
        self.attributes.relations()
    }

    /// Decompose into atoms, dictionary and scope
    pub fn into_parts(self) -> (Vec<Atom>, AttributeDictionary, AttributeScope) {
        (self.atoms, self.attributes, self.scope)
    }

    /// Resolve a column reference with SQL visibility rules.
    ///
    /// A missing key fails with `UnresolvedAttribute`, except a bare name
    /// exposed by several relations, which fails with `AmbiguousReference`.
    pub fn resolve(&self, id: &QualifiedAttributeId) -> JoinResult<&Variable> {
        if let Some(var) = self.attributes.get(id) {
            return Ok(var);
        }
        if !id.is_qualified() && self.scope.is_ambiguous(id.attribute()) {
            return Err(JoinError::AmbiguousReference {
                reference: id.to_string(),
            });
        }
        Err(JoinError::UnresolvedAttribute {
            reference: id.to_string(),
        })
    }

    pub(crate) fn with_appended_atoms(mut self, atoms: Vec<Atom>) -> Self {
        self.atoms.extend(atoms);
        self
    }

    pub(crate) fn set_unqualified(&mut self, attribute: QuotedId, variable: Variable) {
        self.attributes
            .insert(QualifiedAttributeId::unqualified(attribute), variable);
    }
}

impl fmt::Display for RelationalExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, atom) in self.atoms.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", atom)?;
        }
        write!(f, "] with {} over {}", self.attributes, self.scope)
    }
}

#[cfg(test)]
#[path = "expression_test.rs"]
mod tests;
