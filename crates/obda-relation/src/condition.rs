//! Seam to the boolean-condition translator used by `JOIN ... ON`

use crate::error::JoinResult;
use crate::expression::RelationalExpression;
use obda_core::Atom;

/// Translates a join condition into atoms over an already-joined source.
///
/// Implementations resolve column references against `source` (typically via
/// [`RelationalExpression::resolve`]) so the usual ambiguity rules apply.
pub trait ConditionTranslator {
    /// Atoms expressing the condition, in order
    fn translate(&self, source: &RelationalExpression) -> JoinResult<Vec<Atom>>;
}

impl<F> ConditionTranslator for F
where
    F: Fn(&RelationalExpression) -> JoinResult<Vec<Atom>>,
{
    fn translate(&self, source: &RelationalExpression) -> JoinResult<Vec<Atom>> {
        self(source)
    }
}
