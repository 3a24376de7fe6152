//! References borrowed from equivalence class members

use crate::components::ConnectedComponents;
use crate::matching::{CandidateReference, EngineError, MatchEngine, MatchScope};
use std::sync::Arc;

/// Proposes, for an entity in a curated equivalence class, every reference
/// another class member already holds in a namespace the entity lacks.
///
/// Only useful in a round: it reads the working map, which is empty for
/// upfront engines.
pub struct ConnectedComponentsEngine {
    components: Arc<ConnectedComponents>,
}

impl ConnectedComponentsEngine {
    pub fn new(components: Arc<ConnectedComponents>) -> Self {
        Self { components }
    }
}

impl MatchEngine for ConnectedComponentsEngine {
    fn id(&self) -> &str {
        "cc"
    }

    fn propose(&self, scope: &MatchScope<'_>) -> Result<Vec<CandidateReference>, EngineError> {
        let mut candidates = Vec::new();
        for entity in scope.entities.keys() {
            if !self.components.contains(entity) {
                continue;
            }
            let own = scope.resolved.references(entity);
            for member in self.components.class_of(entity) {
                if &member == entity {
                    continue;
                }
                let Some(references) = scope.resolved.references(&member) else {
                    continue;
                };
                for (namespace, id) in references {
                    if own.is_some_and(|refs| refs.contains_key(namespace)) {
                        continue;
                    }
                    candidates.push(CandidateReference::new(entity.as_str(), *namespace, id.as_str(), self.id()));
                }
            }
        }
        Ok(super::dedup(candidates))
    }
}
