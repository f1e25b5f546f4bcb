//! Catalog command implementation

use anyhow::Result;
use obda_core::DbMetadata;
use serde::Serialize;

use crate::cli::{CatalogArgs, GlobalArgs, OutputFormat};
use crate::context::ProjectContext;

/// Execute the catalog command
pub fn execute(args: &CatalogArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = ProjectContext::load(global)?;
    let relations = relation_infos(&ctx.metadata);

    match args.output {
        OutputFormat::Pretty => {
            println!(
                "{} ({} dialect, {} relation(s))",
                ctx.config.name,
                ctx.config.dialect,
                relations.len()
            );
            print_table(&relations);
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&relations)?),
    }
    Ok(())
}

/// Relation information for display
#[derive(Debug, Serialize)]
struct RelationInfo {
    relation: String,
    columns: Vec<ColumnInfo>,
}

#[derive(Debug, Serialize)]
struct ColumnInfo {
    name: String,
    #[serde(rename = "type")]
    data_type: Option<String>,
    nullable: bool,
}

fn relation_infos(metadata: &DbMetadata) -> Vec<RelationInfo> {
    metadata
        .relations()
        .map(|def| RelationInfo {
            relation: def.id().to_string(),
            columns: def
                .attributes()
                .iter()
                .map(|a| ColumnInfo {
                    name: a.id.to_string(),
                    data_type: a.data_type.clone(),
                    nullable: a.nullable,
                })
                .collect(),
        })
        .collect()
}

fn print_table(relations: &[RelationInfo]) {
    let name_width = relations
        .iter()
        .flat_map(|r| r.columns.iter().map(|c| c.name.len()))
        .max()
        .unwrap_or(6)
        .max(6);
    let type_width = relations
        .iter()
        .flat_map(|r| r.columns.iter().map(|c| c.data_type.as_deref().map_or(1, str::len)))
        .max()
        .unwrap_or(4)
        .max(4);

    for relation in relations {
        println!();
        println!("{}", relation.relation);
        println!(
            "  {:<name_width$}  {:<type_width$}  NULLABLE",
            "COLUMN",
            "TYPE",
            name_width = name_width,
            type_width = type_width
        );
        for column in &relation.columns {
            println!(
                "  {:<name_width$}  {:<type_width$}  {}",
                column.name,
                column.data_type.as_deref().unwrap_or("-"),
                if column.nullable { "yes" } else { "no" },
                name_width = name_width,
                type_width = type_width
            );
        }
    }
}
