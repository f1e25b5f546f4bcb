//! Configuration types and parsing for obda.yml

use crate::error::{CoreError, CoreResult};
use crate::identifier::{CaseFolding, QuotedIdFactory};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project configuration from obda.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Project name
    pub name: String,

    /// SQL dialect for parsing
    #[serde(default)]
    pub dialect: Dialect,

    /// Identifier normalization settings
    #[serde(default)]
    pub identifiers: IdentifierConfig,

    /// Catalog files describing the database relations, relative to the project directory
    #[serde(default = "default_catalog_paths")]
    pub catalog_paths: Vec<String>,
}

/// Identifier normalization settings
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IdentifierConfig {
    /// Folding applied to unquoted identifiers
    #[serde(default)]
    pub case_folding: CaseFolding,
}

/// SQL dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// DuckDB SQL dialect
    #[default]
    DuckDb,
    /// Snowflake SQL dialect
    Snowflake,
    /// ANSI-leaning generic dialect
    Generic,
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::DuckDb => write!(f, "duckdb"),
            Dialect::Snowflake => write!(f, "snowflake"),
            Dialect::Generic => write!(f, "generic"),
        }
    }
}

const DEFAULT_CATALOG_FILE: &str = "catalog.yml";

fn default_catalog_paths() -> Vec<String> {
    vec![DEFAULT_CATALOG_FILE.to_string()]
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a project directory
    /// Looks for obda.yml or obda.yaml
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        let yml_path = dir.join("obda.yml");
        let yaml_path = dir.join("obda.yaml");

        if yml_path.exists() {
            Self::load(&yml_path)
        } else if yaml_path.exists() {
            Self::load(&yaml_path)
        } else {
            Err(CoreError::ConfigNotFound {
                path: yml_path.display().to_string(),
            })
        }
    }

    /// Validate the configuration
    fn validate(&self) -> CoreResult<()> {
        if self.name.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "Project name cannot be empty".to_string(),
            });
        }

        if self.catalog_paths.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "At least one catalog_paths entry must be specified".to_string(),
            });
        }

        Ok(())
    }

    /// Catalog file paths resolved against the project root
    pub fn catalog_paths_absolute(&self, root: &Path) -> Vec<PathBuf> {
        self.catalog_paths.iter().map(|p| root.join(p)).collect()
    }

    /// Identifier factory configured for this project
    pub fn id_factory(&self) -> QuotedIdFactory {
        QuotedIdFactory::new(self.identifiers.case_folding)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
