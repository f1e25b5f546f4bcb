//! Join trees: the FROM clause as a binary tree of joins over leaves

use crate::condition::ConditionTranslator;
use crate::error::JoinResult;
use crate::expression::RelationalExpression;
use obda_core::QuotedId;
use std::fmt;

/// How two relational sources are combined
#[derive(Debug, Clone, PartialEq)]
pub enum JoinKind<C> {
    /// `CROSS JOIN`, comma, or `JOIN` with no constraint
    Cross,
    /// `JOIN ... ON condition`
    On(C),
    /// `NATURAL JOIN`
    Natural,
    /// `JOIN ... USING (columns)`
    Using(Vec<QuotedId>),
}

impl<C> fmt::Display for JoinKind<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinKind::Cross => write!(f, "CROSS"),
            JoinKind::On(_) => write!(f, "ON"),
            JoinKind::Natural => write!(f, "NATURAL"),
            JoinKind::Using(columns) => {
                let names: Vec<&str> = columns.iter().map(QuotedId::as_str).collect();
                write!(f, "USING ({})", names.join(", "))
            }
        }
    }
}

/// A FROM clause before evaluation.
///
/// Leaves are base-relation expressions; inner nodes name the join kind.
#[derive(Debug, Clone, PartialEq)]
pub enum JoinTree<C> {
    /// A single relation reference
    Leaf(RelationalExpression),
    /// Join of two subtrees
    Join {
        left: Box<JoinTree<C>>,
        right: Box<JoinTree<C>>,
        kind: JoinKind<C>,
    },
}

impl<C> JoinTree<C> {
    /// Leaf node
    pub fn leaf(expression: RelationalExpression) -> Self {
        JoinTree::Leaf(expression)
    }

    /// Join node over two subtrees
    pub fn join(left: JoinTree<C>, right: JoinTree<C>, kind: JoinKind<C>) -> Self {
        JoinTree::Join {
            left: Box::new(left),
            right: Box::new(right),
            kind,
        }
    }

    /// Number of relation references in the tree
    pub fn leaf_count(&self) -> usize {
        match self {
            JoinTree::Leaf(_) => 1,
            JoinTree::Join { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }
}

impl<C: ConditionTranslator> JoinTree<C> {
    /// Evaluate the tree bottom-up, left subtree first.
    pub fn fold(&self) -> JoinResult<RelationalExpression> {
        match self {
            JoinTree::Leaf(expression) => Ok(expression.clone()),
            JoinTree::Join { left, right, kind } => {
                let left = left.fold()?;
                let right = right.fold()?;
                log::debug!(
                    "Applying {} join over {} and {} relation(s)",
                    kind,
                    left.relations().len(),
                    right.relations().len()
                );
                RelationalExpression::join(&left, &right, kind)
            }
        }
    }
}

#[cfg(test)]
#[path = "join_tree_test.rs"]
mod tests;
