//! `JOIN ... ON` conditions over sqlparser expressions
//!
//! Column references are resolved against the joined source, so an
//! unqualified name exposed by both join operands is reported as ambiguous.

use obda_core::{Atom, ComparisonOp, Constant, QuotedId, QuotedIdFactory, RelationId, Term};
use obda_relation::{
    ConditionTranslator, JoinError, JoinResult, QualifiedAttributeId, RelationalExpression,
};
use sqlparser::ast::{BinaryOperator, Expr, Ident, UnaryOperator, Value};

/// An `ON` expression paired with the identifier rules of its query.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlCondition {
    expr: Expr,
    id_factory: QuotedIdFactory,
}

impl SqlCondition {
    pub fn new(expr: Expr, id_factory: QuotedIdFactory) -> Self {
        Self { expr, id_factory }
    }

    /// The condition as parsed
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    fn push_conjuncts(
        &self,
        expr: &Expr,
        source: &RelationalExpression,
        atoms: &mut Vec<Atom>,
    ) -> JoinResult<()> {
        match expr {
            Expr::BinaryOp {
                left,
                op: BinaryOperator::And,
                right,
            } => {
                self.push_conjuncts(left, source, atoms)?;
                self.push_conjuncts(right, source, atoms)
            }
            Expr::Nested(inner) => self.push_conjuncts(inner, source, atoms),
            other => {
                atoms.push(self.atom(other, source)?);
                Ok(())
            }
        }
    }

    fn atom(&self, expr: &Expr, source: &RelationalExpression) -> JoinResult<Atom> {
        match expr {
            Expr::Nested(inner) => self.atom(inner, source),
            Expr::BinaryOp { left, op, right } => match op {
                BinaryOperator::And => {
                    let mut operands = Vec::new();
                    self.flatten(expr, &BinaryOperator::And, source, &mut operands)?;
                    Ok(Atom::conjunction(operands))
                }
                BinaryOperator::Or => {
                    let mut operands = Vec::new();
                    self.flatten(expr, &BinaryOperator::Or, source, &mut operands)?;
                    Ok(Atom::disjunction(operands))
                }
                _ => match comparison(op) {
                    Some(op) => Ok(Atom::compare(
                        op,
                        self.term(left, source)?,
                        self.term(right, source)?,
                    )),
                    None => Err(unsupported(expr)),
                },
            },
            Expr::UnaryOp {
                op: UnaryOperator::Not,
                expr: inner,
            } => Ok(Atom::Not(Box::new(self.atom(inner, source)?))),
            Expr::IsNull(inner) => Ok(Atom::IsNull {
                term: self.term(inner, source)?,
                negated: false,
            }),
            Expr::IsNotNull(inner) => Ok(Atom::IsNull {
                term: self.term(inner, source)?,
                negated: true,
            }),
            Expr::Between {
                expr: inner,
                negated,
                low,
                high,
            } => {
                let value = self.term(inner, source)?;
                let low = self.term(low, source)?;
                let high = self.term(high, source)?;
                // NOT BETWEEN: value < low OR value > high
                Ok(if *negated {
                    Atom::disjunction(vec![
                        Atom::compare(ComparisonOp::Lt, value.clone(), low),
                        Atom::compare(ComparisonOp::Gt, value, high),
                    ])
                } else {
                    Atom::conjunction(vec![
                        Atom::compare(ComparisonOp::GtEq, value.clone(), low),
                        Atom::compare(ComparisonOp::LtEq, value, high),
                    ])
                })
            }
            Expr::InList {
                expr: inner,
                list,
                negated,
            } => {
                if list.is_empty() {
                    return Ok(Atom::Literal(*negated));
                }
                let value = self.term(inner, source)?;
                let op = if *negated {
                    ComparisonOp::NotEq
                } else {
                    ComparisonOp::Eq
                };
                let comparisons = list
                    .iter()
                    .map(|item| -> JoinResult<Atom> {
                        Ok(Atom::compare(op, value.clone(), self.term(item, source)?))
                    })
                    .collect::<JoinResult<Vec<_>>>()?;
                Ok(if *negated {
                    Atom::conjunction(comparisons)
                } else {
                    Atom::disjunction(comparisons)
                })
            }
            Expr::Value(v) => match &v.value {
                Value::Boolean(b) => Ok(Atom::Literal(*b)),
                _ => Err(unsupported(expr)),
            },
            _ => Err(unsupported(expr)),
        }
    }

    /// Collect the operands of a chain of one associative operator
    fn flatten(
        &self,
        expr: &Expr,
        chain: &BinaryOperator,
        source: &RelationalExpression,
        out: &mut Vec<Atom>,
    ) -> JoinResult<()> {
        match expr {
            Expr::BinaryOp { left, op, right } if op == chain => {
                self.flatten(left, chain, source, out)?;
                self.flatten(right, chain, source, out)
            }
            other => {
                out.push(self.atom(other, source)?);
                Ok(())
            }
        }
    }

    fn term(&self, expr: &Expr, source: &RelationalExpression) -> JoinResult<Term> {
        match expr {
            Expr::Nested(inner) => self.term(inner, source),
            Expr::Identifier(ident) => self.column(std::slice::from_ref(ident), source),
            Expr::CompoundIdentifier(idents) => self.column(idents, source),
            Expr::Value(v) => constant(&v.value, false)
                .map(Term::Constant)
                .ok_or_else(|| unsupported(expr)),
            Expr::UnaryOp {
                op: UnaryOperator::Minus,
                expr: inner,
            } => match inner.as_ref() {
                Expr::Value(v) => constant(&v.value, true)
                    .map(Term::Constant)
                    .ok_or_else(|| unsupported(expr)),
                _ => Err(unsupported(expr)),
            },
            _ => Err(unsupported(expr)),
        }
    }

    /// Resolve `col`, `table.col` or `schema.table.col`
    fn column(&self, idents: &[Ident], source: &RelationalExpression) -> JoinResult<Term> {
        let id = match idents {
            [column] => QualifiedAttributeId::unqualified(self.id(column)?),
            [table, column] => QualifiedAttributeId::qualified(
                RelationId::table_only(self.id(table)?),
                self.id(column)?,
            ),
            [schema, table, column] => QualifiedAttributeId::qualified(
                RelationId::new(Some(self.id(schema)?), self.id(table)?),
                self.id(column)?,
            ),
            _ => {
                let text: Vec<&str> = idents.iter().map(|i| i.value.as_str()).collect();
                return Err(JoinError::UnsupportedCondition(format!(
                    "column reference '{}'",
                    text.join(".")
                )));
            }
        };
        Ok(Term::Variable(source.resolve(&id)?.clone()))
    }

    fn id(&self, ident: &Ident) -> JoinResult<QuotedId> {
        self.id_factory
            .create_id(&ident.value, ident.quote_style.is_some())
            .map_err(|e| JoinError::UnsupportedCondition(e.to_string()))
    }
}

impl ConditionTranslator for SqlCondition {
    /// Top-level conjuncts become separate atoms
    fn translate(&self, source: &RelationalExpression) -> JoinResult<Vec<Atom>> {
        let mut atoms = Vec::new();
        self.push_conjuncts(&self.expr, source, &mut atoms)?;
        Ok(atoms)
    }
}

fn comparison(op: &BinaryOperator) -> Option<ComparisonOp> {
    match op {
        BinaryOperator::Eq => Some(ComparisonOp::Eq),
        BinaryOperator::NotEq => Some(ComparisonOp::NotEq),
        BinaryOperator::Lt => Some(ComparisonOp::Lt),
        BinaryOperator::LtEq => Some(ComparisonOp::LtEq),
        BinaryOperator::Gt => Some(ComparisonOp::Gt),
        BinaryOperator::GtEq => Some(ComparisonOp::GtEq),
        _ => None,
    }
}

fn constant(value: &Value, negative: bool) -> Option<Constant> {
    match value {
        Value::Number(n, _) => {
            let text = if negative {
                format!("-{}", n)
            } else {
                n.to_string()
            };
            Some(match text.parse::<i64>() {
                Ok(i) => Constant::Integer(i),
                Err(_) => Constant::Decimal(text),
            })
        }
        _ if negative => None,
        Value::SingleQuotedString(s) | Value::DoubleQuotedString(s) => {
            Some(Constant::String(s.clone()))
        }
        Value::Boolean(b) => Some(Constant::Boolean(*b)),
        Value::Null => Some(Constant::Null),
        _ => None,
    }
}

fn unsupported(expr: &Expr) -> JoinError {
    JoinError::UnsupportedCondition(expr.to_string())
}

#[cfg(test)]
#[path = "condition_test.rs"]
mod tests;
