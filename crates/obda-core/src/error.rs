//! Error types for obda-core

use thiserror::Error;

/// Core error type for obda
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Invalid configuration value
    #[error("[E002] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E003: Catalog file not found
    #[error("[E003] Catalog file not found: {path}")]
    CatalogNotFound { path: String },

    /// E004: The same relation is declared twice
    #[error("[E004] Duplicate relation '{relation}' in catalog")]
    DuplicateRelation { relation: String },

    /// E005: A relation declares the same column twice
    #[error("[E005] Duplicate column '{column}' in relation '{relation}'")]
    DuplicateAttribute { relation: String, column: String },

    /// E006: Identifier is empty after normalization
    #[error("[E006] Invalid identifier: {message}")]
    InvalidIdentifier { message: String },

    /// E007: IO error with file path context
    #[error("[E007] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// E008: YAML parse error
    #[error("[E008] YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
