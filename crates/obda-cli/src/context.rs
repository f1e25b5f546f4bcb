//! Project context shared by CLI commands

use anyhow::{Context, Result};
use obda_core::{Config, DbMetadata};
use obda_sql::SqlParser;
use std::path::Path;

use crate::cli::GlobalArgs;

/// Loaded configuration, catalog and parser for one project
pub struct ProjectContext {
    pub config: Config,
    pub metadata: DbMetadata,
    pub parser: SqlParser,
}

impl ProjectContext {
    /// Load the project named by the global arguments.
    ///
    /// Catalog paths are resolved against the project directory even when
    /// the config file lives elsewhere.
    pub fn load(args: &GlobalArgs) -> Result<Self> {
        let project_dir = Path::new(&args.project_dir);

        let config = match &args.config {
            Some(path) => {
                Config::load(Path::new(path)).context("Failed to load configuration file")?
            }
            None => Config::load_from_dir(project_dir)
                .context("Failed to load project configuration")?,
        };

        let metadata = DbMetadata::load(&config, project_dir).context("Failed to load catalog")?;
        let parser = SqlParser::from_dialect(config.dialect);

        log::debug!(
            "Project '{}': {} relation(s), {} dialect",
            config.name,
            metadata.len(),
            parser.dialect_name()
        );

        Ok(Self {
            config,
            metadata,
            parser,
        })
    }
}
