//! Pattern-set lookup against folded database ids

use super::dedup;
use crate::biodb::Biodb;
use crate::matching::{CandidateReference, EngineError, MatchEngine, MatchScope};
use std::sync::Arc;

/// Matches each entity's derived pattern set against database ids.
///
/// Many-to-one: several patterns may hit several entries of one
/// namespace. The facade's resolvers sort that out.
pub struct IdPatternEngine {
    biodb: Arc<Biodb>,
}

impl IdPatternEngine {
    pub fn new(biodb: Arc<Biodb>) -> Self {
        Self { biodb }
    }
}

impl MatchEngine for IdPatternEngine {
    fn id(&self) -> &str {
        "pattern"
    }

    fn propose(&self, scope: &MatchScope<'_>) -> Result<Vec<CandidateReference>, EngineError> {
        let mut candidates = Vec::new();
        for (entity, record) in scope.entities {
            for key in &record.patterns {
                for reference in self.biodb.by_id_key(key) {
                    candidates.push(CandidateReference::new(
                        entity.as_str(),
                        reference.namespace,
                        reference.id.as_str(),
                        self.id(),
                    ));
                }
            }
        }
        Ok(dedup(candidates))
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures;
    use super::*;
    use crate::model::MetaboliteNamespace::*;

    #[test]
    fn test_patterns_hit_bigg_and_seed_ids() {
        let engine = IdPatternEngine::new(fixtures::biodb());
        let entities = fixtures::entities(&[("M_glc__D_c", "c"), ("cpd00002_c0", "c0")]);
        let resolved = fixtures::empty_map();
        let scope = MatchScope::new(&entities, &resolved);

        let candidates = engine.propose(&scope).unwrap();
        assert!(candidates
            .iter()
            .any(|c| c.entity == "M_glc__D_c" && c.namespace == BiGG2 && c.external_id == "glc__D"));
        assert!(candidates
            .iter()
            .any(|c| c.entity == "cpd00002_c0" && c.namespace == ModelSeed && c.external_id == "cpd00002"));
        assert!(candidates.iter().all(|c| c.engine == "pattern"));
    }

    #[test]
    fn test_no_duplicate_candidates() {
        let engine = IdPatternEngine::new(fixtures::biodb());
        // "atp" is reached through several pattern variants
        let entities = fixtures::entities(&[("M_atp_c", "c")]);
        let resolved = fixtures::empty_map();
        let candidates = engine.propose(&MatchScope::new(&entities, &resolved)).unwrap();
        assert_eq!(
            candidates.iter().filter(|c| c.external_id == "atp").count(),
            1
        );
    }
}
