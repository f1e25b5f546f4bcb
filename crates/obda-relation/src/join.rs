//! Join algebra over relational expressions
//!
//! Cross join is the merge primitive; ON adds condition atoms on top of it,
//! USING adds equalities and re-exposes the joined names, NATURAL is USING
//! over the names both sides share.

use crate::attribute::{AttributeDictionary, QualifiedAttributeId};
use crate::condition::ConditionTranslator;
use crate::error::{JoinError, JoinResult};
use crate::expression::RelationalExpression;
use crate::join_tree::JoinKind;
use obda_core::{Atom, QuotedId, Variable};

impl RelationalExpression {
    /// Cartesian product of two expressions.
    ///
    /// Fails when a relation qualifies columns on both sides. A bare name
    /// stays resolvable only if one relation of the merged scope exposes it.
    pub fn cross_join(left: &Self, right: &Self) -> JoinResult<Self> {
        check_relations_disjoint(left, right)?;
        Ok(product(left, right))
    }

    /// `left JOIN right ON condition`
    pub fn join_on<C>(left: &Self, right: &Self, condition: &C) -> JoinResult<Self>
    where
        C: ConditionTranslator + ?Sized,
    {
        let base = Self::cross_join(left, right)?;
        let atoms = condition.translate(&base)?;
        log::debug!("JOIN ON added {} atom(s)", atoms.len());
        Ok(base.with_appended_atoms(atoms))
    }

    /// `left JOIN right USING (columns)`.
    ///
    /// Each column must be unambiguous on both sides and present on both
    /// sides. The result equates the two variables, and the bare name maps
    /// to the left variable; the qualified keys of both sides are kept.
    pub fn join_using(left: &Self, right: &Self, columns: &[QuotedId]) -> JoinResult<Self> {
        check_relations_disjoint(left, right)?;

        let mut using: Vec<&QuotedId> = Vec::with_capacity(columns.len());
        for column in columns {
            if !using.contains(&column) {
                using.push(column);
            }
        }

        if let Some(column) = using
            .iter()
            .find(|c| left.scope().is_ambiguous(c) || right.scope().is_ambiguous(c))
        {
            return Err(JoinError::AmbiguousJoinAttribute {
                column: column.to_string(),
            });
        }
        if let Some(column) = using
            .iter()
            .find(|c| !left.scope().contains(c) || !right.scope().contains(c))
        {
            return Err(JoinError::UnknownJoinAttribute {
                column: column.to_string(),
            });
        }

        let mut joined = product(left, right);
        let mut equalities = Vec::with_capacity(using.len());
        for column in using {
            let unknown = || JoinError::UnknownJoinAttribute {
                column: column.to_string(),
            };
            let left_var = left.attributes().get_unqualified(column).ok_or_else(unknown)?;
            let right_var = right.attributes().get_unqualified(column).ok_or_else(unknown)?;
            equalities.push(Atom::equality(left_var.clone(), right_var.clone()));
            joined.set_unqualified(column.clone(), left_var.clone());
        }

        log::debug!("JOIN USING added {} equality atom(s)", equalities.len());
        Ok(joined.with_appended_atoms(equalities))
    }

    /// `left NATURAL JOIN right`: USING over every name both scopes contain,
    /// in name order. With no common names this is a cross join.
    pub fn natural_join(left: &Self, right: &Self) -> JoinResult<Self> {
        let common = left.scope().common_names(right.scope());
        log::debug!("NATURAL JOIN on {} common column(s)", common.len());
        Self::join_using(left, right, &common)
    }

    /// Apply one join of the given kind
    pub fn join<C: ConditionTranslator>(
        left: &Self,
        right: &Self,
        kind: &JoinKind<C>,
    ) -> JoinResult<Self> {
        match kind {
            JoinKind::Cross => Self::cross_join(left, right),
            JoinKind::On(condition) => Self::join_on(left, right, condition),
            JoinKind::Using(columns) => Self::join_using(left, right, columns),
            JoinKind::Natural => Self::natural_join(left, right),
        }
    }
}

/// A relation may qualify columns on at most one side of a join
fn check_relations_disjoint(
    left: &RelationalExpression,
    right: &RelationalExpression,
) -> JoinResult<()> {
    let right_relations = right.relations();
    match left
        .relations()
        .into_iter()
        .find(|r| right_relations.contains(r))
    {
        Some(relation) => Err(JoinError::AmbiguousRelationReference {
            relation: relation.to_string(),
        }),
        None => Ok(()),
    }
}

/// Merge two expressions whose relations are disjoint.
///
/// Qualified keys are unioned. Bare keys are rebuilt from the merged scope:
/// a name keeps one only when exactly one relation exposes it, mapped to
/// that relation's qualified variable.
fn product(left: &RelationalExpression, right: &RelationalExpression) -> RelationalExpression {
    let atoms = left
        .atoms()
        .iter()
        .chain(right.atoms())
        .cloned()
        .collect();

    let scope = left.scope().union(right.scope());

    let mut attributes: AttributeDictionary = left
        .attributes()
        .qualified()
        .chain(right.attributes().qualified())
        .map(|(id, var)| (id.clone(), var.clone()))
        .collect();

    let bare: Vec<(QualifiedAttributeId, Variable)> = scope
        .names()
        .filter_map(|name| {
            let relation = scope.unique_relation(name)?;
            attributes
                .get_qualified(relation, name)
                .map(|var| (QualifiedAttributeId::unqualified(name.clone()), var.clone()))
        })
        .collect();
    for (id, var) in bare {
        attributes.insert(id, var);
    }

    RelationalExpression::new(atoms, attributes, scope)
}
