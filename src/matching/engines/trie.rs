//! Database ids embedded in raw species ids

use super::dedup;
use crate::biodb::Biodb;
use crate::matching::{CandidateReference, EngineError, MatchEngine, MatchScope};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Default shortest id reported as an embedded match.
pub const DEFAULT_MIN_MATCH_LEN: usize = 4;

/// Finds database ids embedded in the model's raw species ids, e.g.
/// `cpd00027` inside `M_cpd00027_c0`.
pub struct TrieIdEngine {
    biodb: Arc<Biodb>,
    ids: BTreeSet<String>,
    min_len: usize,
}

impl TrieIdEngine {
    pub fn new(biodb: Arc<Biodb>, ids: BTreeSet<String>) -> Self {
        Self {
            biodb,
            ids,
            min_len: DEFAULT_MIN_MATCH_LEN,
        }
    }

    pub fn with_min_len(mut self, min_len: usize) -> Self {
        self.min_len = min_len.max(1);
        self
    }
}

impl MatchEngine for TrieIdEngine {
    fn id(&self) -> &str {
        "trie"
    }

    fn propose(&self, scope: &MatchScope<'_>) -> Result<Vec<CandidateReference>, EngineError> {
        let mut candidates = Vec::new();
        for id in self.ids.iter().filter(|id| scope.contains(id)) {
            for reference in self.biodb.embedded_ids(id, self.min_len) {
                candidates.push(CandidateReference::new(
                    id.as_str(),
                    reference.namespace,
                    reference.id.as_str(),
                    self.id(),
                ));
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
    fn test_embedded_seed_id() {
        let entities = fixtures::entities(&[("M_cpd00027_c0", "c0")]);
        let engine = TrieIdEngine::new(fixtures::biodb(), entities.keys().cloned().collect());
        let resolved = fixtures::empty_map();

        let candidates = engine.propose(&MatchScope::new(&entities, &resolved)).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].namespace, ModelSeed);
        assert_eq!(candidates[0].external_id, "cpd00027");
    }

    #[test]
    fn test_ids_outside_scope_ignored() {
        let entities = fixtures::entities(&[("M_glc_c", "c")]);
        let ids = BTreeSet::from(["M_cpd00027_c0".to_string()]);
        let engine = TrieIdEngine::new(fixtures::biodb(), ids);
        let resolved = fixtures::empty_map();

        assert!(engine
            .propose(&MatchScope::new(&entities, &resolved))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_min_len() {
        let entities = fixtures::entities(&[("M_atp_c", "c")]);
        let ids: BTreeSet<String> = entities.keys().cloned().collect();
        let resolved = fixtures::empty_map();
        let scope = MatchScope::new(&entities, &resolved);

        let strict = TrieIdEngine::new(fixtures::biodb(), ids.clone());
        assert!(strict.propose(&scope).unwrap().is_empty());

        let loose = TrieIdEngine::new(fixtures::biodb(), ids).with_min_len(3);
        assert_eq!(loose.propose(&scope).unwrap().len(), 1);
    }
}
