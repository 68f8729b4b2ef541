//! Unified error type for CLI commands.

use std::path::PathBuf;

use thiserror::Error;
use trolley_core::{CatalogError, EditError};

use crate::config::ConfigError;

/// Errors surfaced by `trolley` commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Neither the flag nor its environment variable named a file.
    #[error("No {what} file given (use --{what} or set {env})")]
    MissingPath {
        what: &'static str,
        env: &'static str,
    },

    #[error("Could not access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Edit failed: {0}")]
    Edit(#[from] EditError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type alias for `CliError`.
pub type Result<T> = std::result::Result<T, CliError>;
