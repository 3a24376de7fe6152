//! Exact lookup in the curated id dictionary

use crate::biodb::Biodb;
use crate::matching::{CandidateReference, EngineError, MatchEngine, MatchScope};
use std::collections::BTreeSet;
use std::sync::Arc;

pub struct DictionaryEngine {
    biodb: Arc<Biodb>,
    ids: BTreeSet<String>,
}

impl DictionaryEngine {
    pub fn new(biodb: Arc<Biodb>, ids: BTreeSet<String>) -> Self {
        Self { biodb, ids }
    }
}

impl MatchEngine for DictionaryEngine {
    fn id(&self) -> &str {
        "dict"
    }

    fn propose(&self, scope: &MatchScope<'_>) -> Result<Vec<CandidateReference>, EngineError> {
        Ok(self
            .ids
            .iter()
            .filter(|id| scope.contains(id))
            .flat_map(|id| {
                self.biodb.by_dictionary(id).map(move |reference| {
                    CandidateReference::new(id.as_str(), reference.namespace, reference.id.as_str(), "dict")
                })
            })
            .collect())
    }
}
