//! Lowering of a SELECT's FROM clause into a join tree

use crate::condition::SqlCondition;
use crate::error::{SqlError, SqlResult};
use crate::ident;
use obda_core::{CoreError, DbMetadata, QuotedId, RelationId, Variable, VariableGenerator};
use obda_relation::{JoinKind, JoinTree, RelationalExpression};
use sqlparser::ast::{
    JoinConstraint, JoinOperator, ObjectName, Select, SetExpr, Statement, TableAlias, TableFactor,
    TableWithJoins,
};

/// Translates FROM clauses against a database catalog.
///
/// One translator hands out variables from a single generator, so every
/// column occurrence it ever lowers gets a distinct variable.
pub struct FromClauseTranslator<'a> {
    metadata: &'a DbMetadata,
    variables: VariableGenerator,
}

impl<'a> FromClauseTranslator<'a> {
    pub fn new(metadata: &'a DbMetadata) -> Self {
        Self {
            metadata,
            variables: VariableGenerator::new(),
        }
    }

    /// Translate the FROM clause of a plain `SELECT` statement
    pub fn translate_statement(&mut self, statement: &Statement) -> SqlResult<RelationalExpression> {
        let Statement::Query(query) = statement else {
            return Err(SqlError::UnsupportedStatement(statement_kind(statement).to_string()));
        };
        match query.body.as_ref() {
            SetExpr::Select(select) => self.translate_select(select),
            _ => Err(SqlError::UnsupportedStatement(
                "set operation or VALUES".to_string(),
            )),
        }
    }

    /// Translate the FROM clause of one `SELECT`
    pub fn translate_select(&mut self, select: &Select) -> SqlResult<RelationalExpression> {
        let tree = self.build_join_tree(&select.from)?;
        log::debug!("FROM clause has {} relation reference(s)", tree.leaf_count());
        Ok(tree.fold()?)
    }

    /// Build the join tree; comma-separated items are cross joined left to right
    pub fn build_join_tree(
        &mut self,
        from: &[TableWithJoins],
    ) -> SqlResult<JoinTree<SqlCondition>> {
        let Some((first, rest)) = from.split_first() else {
            return Err(SqlError::UnsupportedConstruct(
                "query without FROM clause".to_string(),
            ));
        };
        let mut tree = self.table_with_joins(first)?;
        for item in rest {
            let right = self.table_with_joins(item)?;
            tree = JoinTree::join(tree, right, JoinKind::Cross);
        }
        Ok(tree)
    }

    fn table_with_joins(&mut self, item: &TableWithJoins) -> SqlResult<JoinTree<SqlCondition>> {
        let mut tree = self.table_factor(&item.relation)?;
        for join in &item.joins {
            let right = self.table_factor(&join.relation)?;
            let kind = self.join_kind(&join.join_operator)?;
            tree = JoinTree::join(tree, right, kind);
        }
        Ok(tree)
    }

    fn table_factor(&mut self, factor: &TableFactor) -> SqlResult<JoinTree<SqlCondition>> {
        match factor {
            TableFactor::Table {
                name, alias, args, ..
            } => {
                if args.is_some() {
                    return Err(SqlError::UnsupportedConstruct(format!(
                        "table function '{}'",
                        name
                    )));
                }
                Ok(JoinTree::leaf(self.leaf(name, alias.as_ref())?))
            }
            TableFactor::NestedJoin {
                table_with_joins,
                alias,
            } => {
                if let Some(alias) = alias {
                    return Err(SqlError::UnsupportedConstruct(format!(
                        "alias '{}' on a parenthesized join",
                        alias.name
                    )));
                }
                self.table_with_joins(table_with_joins)
            }
            TableFactor::Derived { .. } => Err(SqlError::UnsupportedConstruct(
                "derived table".to_string(),
            )),
            other => Err(SqlError::UnsupportedConstruct(format!(
                "table factor '{}'",
                other
            ))),
        }
    }

    /// Leaf for a catalog relation, qualified by its alias when one is given
    /// and by its catalog id otherwise.
    ///
    /// Alias column names rename the relation's columns positionally; a
    /// shorter list leaves the remaining columns under their own names.
    fn leaf(
        &mut self,
        name: &ObjectName,
        alias: Option<&TableAlias>,
    ) -> SqlResult<RelationalExpression> {
        let metadata = self.metadata;
        let factory = metadata.id_factory();

        let reference = ident::relation_id(factory, &ident::name_parts(name)?)?;
        let definition = metadata
            .get(&reference)
            .ok_or_else(|| SqlError::UnknownRelation {
                relation: reference.to_string(),
            })?;

        let mut columns: Vec<QuotedId> = definition
            .attributes()
            .iter()
            .map(|a| a.id.clone())
            .collect();

        let qualifier = match alias {
            Some(alias) => {
                let qualifier = RelationId::table_only(ident::quoted_id(factory, &alias.name)?);
                if alias.columns.len() > columns.len() {
                    return Err(SqlError::AliasColumnMismatch {
                        alias: qualifier.to_string(),
                        relation: definition.id().to_string(),
                        expected: columns.len(),
                        given: alias.columns.len(),
                    });
                }
                for (slot, column) in columns.iter_mut().zip(&alias.columns) {
                    *slot = ident::quoted_id(factory, &column.name)?;
                }
                Some(qualifier)
            }
            None => None,
        };

        if let Some(duplicate) = first_duplicate(&columns) {
            return Err(CoreError::DuplicateAttribute {
                relation: qualifier.as_ref().unwrap_or(definition.id()).to_string(),
                column: duplicate.to_string(),
            }
            .into());
        }

        let bindings: Vec<(QuotedId, Variable)> = columns
            .into_iter()
            .map(|column| {
                let var = self.variables.fresh(&column);
                (column, var)
            })
            .collect();

        Ok(match qualifier {
            Some(alias) => {
                RelationalExpression::from_aliased_relation(definition.id(), alias, &bindings)
            }
            None => RelationalExpression::from_catalog_relation(definition.id(), &bindings),
        })
    }

    fn join_kind(&self, operator: &JoinOperator) -> SqlResult<JoinKind<SqlCondition>> {
        match operator {
            JoinOperator::Join(constraint) | JoinOperator::Inner(constraint) => {
                self.constraint_kind(constraint)
            }
            JoinOperator::CrossJoin(_) => Ok(JoinKind::Cross),
            JoinOperator::Left(_)
            | JoinOperator::LeftOuter(_)
            | JoinOperator::Right(_)
            | JoinOperator::RightOuter(_)
            | JoinOperator::FullOuter(_) => {
                Err(SqlError::UnsupportedConstruct("outer join".to_string()))
            }
            _ => Err(SqlError::UnsupportedConstruct(
                "join operator other than inner, cross or natural".to_string(),
            )),
        }
    }

    fn constraint_kind(&self, constraint: &JoinConstraint) -> SqlResult<JoinKind<SqlCondition>> {
        let factory = self.metadata.id_factory();
        match constraint {
            JoinConstraint::On(expr) => Ok(JoinKind::On(SqlCondition::new(expr.clone(), *factory))),
            JoinConstraint::Using(names) => Ok(JoinKind::Using(
                names
                    .iter()
                    .map(|name| ident::using_column(factory, name))
                    .collect::<SqlResult<Vec<_>>>()?,
            )),
            JoinConstraint::Natural => Ok(JoinKind::Natural),
            JoinConstraint::None => Ok(JoinKind::Cross),
        }
    }
}

fn first_duplicate(columns: &[QuotedId]) -> Option<&QuotedId> {
    columns
        .iter()
        .enumerate()
        .find(|(i, column)| columns[..*i].contains(column))
        .map(|(_, column)| column)
}

/// Human-readable name for a statement variant
fn statement_kind(statement: &Statement) -> &'static str {
    match statement {
        Statement::Insert(_) => "INSERT",
        Statement::Update { .. } => "UPDATE",
        Statement::Delete(_) => "DELETE",
        Statement::CreateTable(_) => "CREATE TABLE",
        Statement::Drop { .. } => "DROP",
        _ => "non-query statement",
    }
}

#[cfg(test)]
#[path = "from_clause_test.rs"]
mod tests;
