//! Core types shared by match engines

use crate::integration::IntegrationMap;
use crate::model::MetaboliteNamespace;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A reference proposed by one engine. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateReference {
    pub entity: String,
    pub namespace: MetaboliteNamespace,
    pub external_id: String,
    /// Id of the engine that produced this candidate
    pub engine: String,
}

impl CandidateReference {
    pub fn new(
        entity: impl Into<String>,
        namespace: MetaboliteNamespace,
        external_id: impl Into<String>,
        engine: impl Into<String>,
    ) -> Self {
        Self {
            entity: entity.into(),
            namespace,
            external_id: external_id.into(),
            engine: engine.into(),
        }
    }
}

/// A species registered with the facade.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityRecord {
    pub compartment: Option<String>,
    /// Derived comparison keys; filled by pattern generation
    pub patterns: BTreeSet<String>,
}

/// What an engine gets to look at.
///
/// `resolved` is the working map as it stood when the current round
/// started; it is empty for upfront engines.
#[derive(Debug, Clone, Copy)]
pub struct MatchScope<'a> {
    pub entities: &'a BTreeMap<String, EntityRecord>,
    pub resolved: &'a IntegrationMap<MetaboliteNamespace>,
}

impl<'a> MatchScope<'a> {
    pub fn new(
        entities: &'a BTreeMap<String, EntityRecord>,
        resolved: &'a IntegrationMap<MetaboliteNamespace>,
    ) -> Self {
        Self { entities, resolved }
    }

    pub fn contains(&self, entity: &str) -> bool {
        self.entities.contains_key(entity)
    }
}

/// Errors an engine may report. The facade logs them and carries on.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EngineError {
    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
