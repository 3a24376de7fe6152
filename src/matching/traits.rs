//! The engine contract and the ordered engine registry

use super::types::{CandidateReference, EngineError, MatchScope};
use std::collections::HashSet;
use std::sync::Arc;

/// A matching strategy.
///
/// Engines read only their own inputs and the scope; they produce
/// candidates and never mutate shared state.
pub trait MatchEngine: Send + Sync {
    /// Stable identifier, recorded on every candidate the engine produces.
    fn id(&self) -> &str;

    /// Propose candidate references for entities in scope.
    fn propose(&self, scope: &MatchScope<'_>) -> Result<Vec<CandidateReference>, EngineError>;
}

/// Engines in execution order.
///
/// Upfront engines run once to seed the candidate pool. Each round then
/// runs its engines against the working map as merged so far. Engines are
/// deduplicated by `id()` across the whole registry, first registration wins.
#[derive(Default, Clone)]
pub struct EngineRegistry {
    upfront: Vec<Arc<dyn MatchEngine>>,
    rounds: Vec<Vec<Arc<dyn MatchEngine>>>,
    seen: HashSet<String>,
}

impl EngineRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an upfront engine.
    pub fn with_upfront(mut self, engine: Arc<dyn MatchEngine>) -> Self {
        if self.seen.insert(engine.id().to_string()) {
            self.upfront.push(engine);
        }
        self
    }

    /// Append a round. Engines already registered are dropped from it.
    pub fn with_round(mut self, engines: Vec<Arc<dyn MatchEngine>>) -> Self {
        let round: Vec<_> = engines
            .into_iter()
            .filter(|e| self.seen.insert(e.id().to_string()))
            .collect();
        if !round.is_empty() {
            self.rounds.push(round);
        }
        self
    }

    pub fn upfront(&self) -> &[Arc<dyn MatchEngine>] {
        &self.upfront
    }

    pub fn rounds(&self) -> &[Vec<Arc<dyn MatchEngine>>] {
        &self.rounds
    }

    /// All engine ids in invocation order.
    pub fn engine_ids(&self) -> Vec<&str> {
        self.upfront
            .iter()
            .chain(self.rounds.iter().flatten())
            .map(|e| e.id())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.upfront.len() + self.rounds.iter().map(Vec::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(&'static str);

    impl MatchEngine for Fixed {
        fn id(&self) -> &str {
            self.0
        }
        fn propose(&self, _scope: &MatchScope<'_>) -> Result<Vec<CandidateReference>, EngineError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_registry_order() {
        let registry = EngineRegistry::new()
            .with_upfront(Arc::new(Fixed("dict")))
            .with_upfront(Arc::new(Fixed("name")))
            .with_round(vec![Arc::new(Fixed("cc")), Arc::new(Fixed("first-degree"))]);

        assert_eq!(registry.engine_ids(), vec!["dict", "name", "cc", "first-degree"]);
        assert_eq!(registry.rounds().len(), 1);
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_registry_deduplicates_by_id() {
        let registry = EngineRegistry::new()
            .with_upfront(Arc::new(Fixed("dict")))
            .with_upfront(Arc::new(Fixed("dict")))
            .with_round(vec![Arc::new(Fixed("dict"))]);

        assert_eq!(registry.len(), 1);
        assert!(registry.rounds().is_empty());
    }
}
