//! Run configuration and document loading

use crate::integration::{IntegrationError, IntegrationResult};
use crate::matching::engines::DEFAULT_MIN_MATCH_LEN;
use crate::model::ReactionNamespace;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for one model integration run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegrationConfig {
    /// Give every class member the class's full reference set, overriding
    /// members' own resolutions
    pub strict_propagation: bool,
    /// Shortest database id the trie engine reports as embedded in a species id
    pub trie_min_match_len: usize,
    /// Follow the database cross-reference graph in the second round
    pub first_degree: bool,
    /// Also match reactions written in the opposite direction
    pub reverse_reaction_lookup: bool,
    /// Reaction namespaces, in processing order
    pub reaction_namespaces: Vec<ReactionNamespace>,
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        Self {
            strict_propagation: true,
            trie_min_match_len: DEFAULT_MIN_MATCH_LEN,
            first_degree: true,
            reverse_reaction_lookup: true,
            reaction_namespaces: ReactionNamespace::PRIORITY.to_vec(),
        }
    }
}

impl IntegrationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a `.yaml`/`.yml` or `.json` file.
    pub fn load(path: impl AsRef<Path>) -> IntegrationResult<Self> {
        load_document(path)
    }
}

/// Read a YAML or JSON document, picking the format by file extension.
pub fn load_document<T: DeserializeOwned>(path: impl AsRef<Path>) -> IntegrationResult<T> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    let text = std::fs::read_to_string(path)?;

    match extension.as_str() {
        "json" => Ok(serde_json::from_str(&text)?),
        "yaml" | "yml" => Ok(serde_yaml::from_str(&text)?),
        _ => Err(IntegrationError::UnsupportedFormat(path.display().to_string())),
    }
}
