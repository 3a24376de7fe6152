//! Normalized species names against database names

use super::dedup;
use crate::biodb::Biodb;
use crate::matching::{CandidateReference, EngineError, MatchEngine, MatchScope};
use crate::normalize::{FullName, NameKeyStrategy, SplitName};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Looks species names up in the database name table.
///
/// The key strategy decides which form of the name is compared: the full
/// normalized name, or the name with its trailing `_suffix` removed.
pub struct NameEngine {
    biodb: Arc<Biodb>,
    strategy: Box<dyn NameKeyStrategy>,
    /// entity → raw species name
    names: BTreeMap<String, String>,
}

impl NameEngine {
    pub fn new(
        biodb: Arc<Biodb>,
        strategy: Box<dyn NameKeyStrategy>,
        names: BTreeMap<String, String>,
    ) -> Self {
        Self {
            biodb,
            strategy,
            names,
        }
    }

    /// Engine over full normalized names.
    pub fn full(biodb: Arc<Biodb>, names: BTreeMap<String, String>) -> Self {
        Self::new(biodb, Box::new(FullName), names)
    }

    /// Engine over names with their trailing `_suffix` removed.
    pub fn split(biodb: Arc<Biodb>, names: BTreeMap<String, String>) -> Self {
        Self::new(biodb, Box::new(SplitName), names)
    }
}

impl MatchEngine for NameEngine {
    fn id(&self) -> &str {
        self.strategy.label()
    }

    fn propose(&self, scope: &MatchScope<'_>) -> Result<Vec<CandidateReference>, EngineError> {
        let mut candidates = Vec::new();
        for (entity, raw) in &self.names {
            if !scope.contains(entity) {
                continue;
            }
            let Some(key) = self.strategy.key(raw) else {
                continue;
            };
            for reference in self.biodb.by_name_key(&key) {
                candidates.push(CandidateReference::new(
                    entity.as_str(),
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

    fn names(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_full_name_matches_all_namespaces() {
        let entities = fixtures::entities(&[("s1", "c")]);
        let engine = NameEngine::full(fixtures::biodb(), names(&[("s1", " d-glucose ")]));
        let resolved = fixtures::empty_map();

        let candidates = engine.propose(&MatchScope::new(&entities, &resolved)).unwrap();
        let namespaces: Vec<_> = candidates.iter().map(|c| c.namespace).collect();
        assert_eq!(namespaces, vec![BiGG2, ModelSeed, LigandCompound]);
        assert!(candidates.iter().all(|c| c.engine == "name"));
    }

    #[test]
    fn test_split_name_strips_suffix() {
        let entities = fixtures::entities(&[("s1", "c")]);
        let pairs = names(&[("s1", "ATP_c0")]);
        let resolved = fixtures::empty_map();
        let scope = MatchScope::new(&entities, &resolved);

        let full = NameEngine::full(fixtures::biodb(), pairs.clone());
        assert!(full.propose(&scope).unwrap().is_empty());

        let split = NameEngine::split(fixtures::biodb(), pairs);
        let candidates = split.propose(&scope).unwrap();
        assert_eq!(candidates.len(), 2);
        assert!(candidates.iter().all(|c| c.engine == "nameSplit"));
    }
}
