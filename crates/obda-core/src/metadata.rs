//! Database metadata catalog: relations and their attributes
//!
//! The catalog is read-only once loaded. Relations come from YAML catalog
//! files listed in the project configuration:
//!
//! ```yaml
//! relations:
//!   - schema: sales
//!     name: orders
//!     columns:
//!       - id
//!       - name: amount
//!         type: decimal(10,2)
//!         nullable: false
//! ```

use crate::config::Config;
use crate::error::{CoreError, CoreResult};
use crate::identifier::{QuotedId, QuotedIdFactory, RelationId};
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// A column declared by a relation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDefinition {
    /// Normalized column name
    pub id: QuotedId,
    /// Declared SQL type, kept as written
    pub data_type: Option<String>,
    /// Whether the column accepts NULL
    pub nullable: bool,
}

/// A relation declared in the catalog, with columns in declared order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationDefinition {
    id: RelationId,
    attributes: Vec<AttributeDefinition>,
}

impl RelationDefinition {
    /// Create a definition, rejecting duplicate column names
    pub fn new(id: RelationId, attributes: Vec<AttributeDefinition>) -> CoreResult<Self> {
        let mut seen = HashSet::new();
        for attr in &attributes {
            if !seen.insert(&attr.id) {
                return Err(CoreError::DuplicateAttribute {
                    relation: id.to_string(),
                    column: attr.id.to_string(),
                });
            }
        }
        Ok(Self { id, attributes })
    }

    /// Relation identifier
    pub fn id(&self) -> &RelationId {
        &self.id
    }

    /// Columns in declared order
    pub fn attributes(&self) -> &[AttributeDefinition] {
        &self.attributes
    }

    /// Look up a column by name
    pub fn attribute(&self, id: &QuotedId) -> Option<&AttributeDefinition> {
        self.attributes.iter().find(|a| &a.id == id)
    }

    /// Number of columns
    pub fn arity(&self) -> usize {
        self.attributes.len()
    }
}

/// Relations known to the translator, keyed by identifier
#[derive(Debug, Clone, Default)]
pub struct DbMetadata {
    relations: BTreeMap<RelationId, RelationDefinition>,
    id_factory: QuotedIdFactory,
}

impl DbMetadata {
    /// Create an empty catalog using the given identifier factory
    pub fn new(id_factory: QuotedIdFactory) -> Self {
        Self {
            relations: BTreeMap::new(),
            id_factory,
        }
    }

    /// Load every catalog file named by the configuration
    pub fn load(config: &Config, project_dir: &Path) -> CoreResult<Self> {
        let mut metadata = Self::new(config.id_factory());
        for path in config.catalog_paths_absolute(project_dir) {
            metadata.load_catalog_file(&path)?;
        }
        log::debug!(
            "Loaded {} relation(s) from {} catalog file(s)",
            metadata.len(),
            config.catalog_paths.len()
        );
        Ok(metadata)
    }

    /// The factory used to normalize identifiers for this catalog
    pub fn id_factory(&self) -> &QuotedIdFactory {
        &self.id_factory
    }

    /// Register a relation
    pub fn add(&mut self, definition: RelationDefinition) -> CoreResult<()> {
        if self.relations.contains_key(definition.id()) {
            return Err(CoreError::DuplicateRelation {
                relation: definition.id().to_string(),
            });
        }
        self.relations.insert(definition.id().clone(), definition);
        Ok(())
    }

    /// Find a relation by identifier.
    ///
    /// A reference without a schema also matches a schema-qualified relation
    /// when exactly one relation in the catalog has that table name.
    pub fn get(&self, id: &RelationId) -> Option<&RelationDefinition> {
        if let Some(def) = self.relations.get(id) {
            return Some(def);
        }
        if id.has_schema() {
            return None;
        }
        let mut candidates = self
            .relations
            .values()
            .filter(|def| def.id().table() == id.table());
        let first = candidates.next()?;
        if candidates.next().is_some() {
            log::warn!(
                "Table name '{}' matches relations in several schemas; qualify it with a schema",
                id
            );
            return None;
        }
        log::debug!("Resolved '{}' to '{}' by table name", id, first.id());
        Some(first)
    }

    /// All relations, ordered by identifier
    pub fn relations(&self) -> impl Iterator<Item = &RelationDefinition> {
        self.relations.values()
    }

    /// Number of relations
    pub fn len(&self) -> usize {
        self.relations.len()
    }

    /// Whether the catalog holds no relations
    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }

    /// Read relations from a catalog file
    pub fn load_catalog_file(&mut self, path: &Path) -> CoreResult<()> {
        if !path.exists() {
            return Err(CoreError::CatalogNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        self.load_catalog_str(&content)
    }

    /// Read relations from catalog YAML text
    pub fn load_catalog_str(&mut self, yaml: &str) -> CoreResult<()> {
        let file: CatalogFile = serde_yaml::from_str(yaml)?;
        for entry in file.relations {
            let definition = entry.into_definition(&self.id_factory)?;
            log::trace!(
                "Catalog relation {} with {} column(s)",
                definition.id(),
                definition.arity()
            );
            self.add(definition)?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(default)]
    relations: Vec<RelationEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RelationEntry {
    #[serde(default)]
    schema: Option<String>,
    name: String,
    #[serde(default)]
    columns: Vec<ColumnEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ColumnEntry {
    Name(String),
    Detailed {
        name: String,
        #[serde(default, rename = "type")]
        data_type: Option<String>,
        #[serde(default = "default_true")]
        nullable: bool,
    },
}

fn default_true() -> bool {
    true
}

impl RelationEntry {
    fn into_definition(self, factory: &QuotedIdFactory) -> CoreResult<RelationDefinition> {
        let id = factory.create_relation_id(self.schema.as_deref(), &self.name)?;
        let attributes = self
            .columns
            .into_iter()
            .map(|column| match column {
                ColumnEntry::Name(name) => Ok(AttributeDefinition {
                    id: factory.parse_id(&name)?,
                    data_type: None,
                    nullable: true,
                }),
                ColumnEntry::Detailed {
                    name,
                    data_type,
                    nullable,
                } => Ok(AttributeDefinition {
                    id: factory.parse_id(&name)?,
                    data_type,
                    nullable,
                }),
            })
            .collect::<CoreResult<Vec<_>>>()?;
        RelationDefinition::new(id, attributes)
    }
}

#[cfg(test)]
#[path = "metadata_test.rs"]
mod tests;
