//! Error types for integration runs

use crate::components::ComponentsError;
use thiserror::Error;

/// Errors surfaced by the integration pipeline.
///
/// Per-entity problems never show up here: they are logged and the entity
/// is dropped from further processing.
#[derive(Debug, Error)]
pub enum IntegrationError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Curation file error: {0}")]
    Components(#[from] ComponentsError),

    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),
}

/// Result type for integration operations
pub type IntegrationResult<T> = Result<T, IntegrationError>;
