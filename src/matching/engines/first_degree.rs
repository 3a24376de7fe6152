//! Neighbors in the database cross-reference graph

use crate::biodb::{Biodb, CompoundRef};
use crate::matching::{CandidateReference, EngineError, MatchEngine, MatchScope};
use std::sync::Arc;

/// Proposes entries one link away from an entity's resolved references,
/// only in namespaces where the entity has nothing resolved yet.
///
/// Low trust: a tie-breaker for namespaces no other engine could fill.
pub struct FirstDegreeReferencesEngine {
    biodb: Arc<Biodb>,
}

impl FirstDegreeReferencesEngine {
    pub fn new(biodb: Arc<Biodb>) -> Self {
        Self { biodb }
    }
}

impl MatchEngine for FirstDegreeReferencesEngine {
    fn id(&self) -> &str {
        "first-degree"
    }

    fn propose(&self, scope: &MatchScope<'_>) -> Result<Vec<CandidateReference>, EngineError> {
        let mut candidates = Vec::new();
        for (entity, references) in scope.resolved.iter() {
            if !scope.contains(entity) {
                continue;
            }
            for (namespace, id) in references {
                let origin = CompoundRef::new(*namespace, id.as_str());
                for neighbor in self.biodb.neighbors(&origin) {
                    if references.contains_key(&neighbor.namespace) {
                        continue;
                    }
                    candidates.push(CandidateReference::new(
                        entity.as_str(),
                        neighbor.namespace,
                        neighbor.id.as_str(),
                        self.id(),
                    ));
                }
            }
        }
        Ok(super::dedup(candidates))
    }
}
