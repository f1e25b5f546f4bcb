//! From command implementation

use anyhow::{Context, Result};
use obda_relation::RelationalExpression;
use obda_sql::translate_from_sql;
use serde::Serialize;
use std::fmt::Write;

use crate::cli::{FromArgs, GlobalArgs, OutputFormat};
use crate::context::ProjectContext;

/// Execute the from command
pub fn execute(args: &FromArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = ProjectContext::load(global)?;
    let sql = read_sql(args)?;

    let expr = translate_from_sql(&ctx.parser, &sql, &ctx.metadata)
        .context("Failed to translate FROM clause")?;
    let report = FromReport::new(&expr);

    match args.output {
        OutputFormat::Pretty => print!("{}", report.render()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

fn read_sql(args: &FromArgs) -> Result<String> {
    match (&args.sql, &args.file) {
        (Some(sql), _) => Ok(sql.clone()),
        (None, Some(path)) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read SQL file: {}", path))
        }
        (None, None) => anyhow::bail!("Either --sql or --file is required"),
    }
}

/// Translated FROM clause for display
#[derive(Debug, Serialize)]
pub(crate) struct FromReport {
    atoms: Vec<String>,
    attributes: Vec<AttributeEntry>,
    scope: Vec<ScopeEntry>,
}

#[derive(Debug, Serialize)]
struct AttributeEntry {
    relation: Option<String>,
    column: String,
    variable: String,
}

#[derive(Debug, Serialize)]
struct ScopeEntry {
    column: String,
    relations: Vec<String>,
}

impl FromReport {
    pub(crate) fn new(expr: &RelationalExpression) -> Self {
        let atoms = expr.atoms().iter().map(ToString::to_string).collect();
        let attributes = expr
            .attributes()
            .iter()
            .map(|(id, var)| AttributeEntry {
                relation: id.relation().map(ToString::to_string),
                column: id.attribute().to_string(),
                variable: var.to_string(),
            })
            .collect();
        let scope = expr
            .scope()
            .iter()
            .map(|(name, relations)| ScopeEntry {
                column: name.to_string(),
                relations: relations.iter().map(ToString::to_string).collect(),
            })
            .collect();
        Self {
            atoms,
            attributes,
            scope,
        }
    }

    /// Plain-text rendering: atoms, then the dictionary, then the scope
    pub(crate) fn render(&self) -> String {
        let key = |e: &AttributeEntry| match &e.relation {
            Some(relation) => format!("{}.{}", relation, e.column),
            None => e.column.clone(),
        };
        let width = self
            .attributes
            .iter()
            .map(|e| key(e).len())
            .chain(self.scope.iter().map(|e| e.column.len()))
            .max()
            .unwrap_or(0);

        let mut out = String::new();
        let _ = writeln!(out, "Atoms:");
        for atom in &self.atoms {
            let _ = writeln!(out, "  {}", atom);
        }
        let _ = writeln!(out, "Attributes:");
        for entry in &self.attributes {
            let _ = writeln!(out, "  {:<width$}  {}", key(entry), entry.variable, width = width);
        }
        let _ = writeln!(out, "Scope:");
        for entry in &self.scope {
            let _ = writeln!(
                out,
                "  {:<width$}  {}",
                entry.column,
                entry.relations.join(", "),
                width = width
            );
        }
        out
    }
}

#[cfg(test)]
#[path = "from_test.rs"]
mod tests;
