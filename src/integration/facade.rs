//! Integration facade for coordinating match engines
//!
//! Runs upfront engines once to seed the candidate pool, then each round
//! in order. After every phase the pool is re-resolved into the working
//! map, which is what the next round's engines get to see.

use super::map::IntegrationMap;
use super::pool::{CandidatePool, MatchDecision, Resolution};
use crate::matching::{CandidateReference, EngineRegistry, EntityRecord, MatchEngine, MatchScope};
use crate::model::MetaboliteNamespace;
use crate::normalize::id_patterns;
use crate::resolver::ResolverRegistry;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Orchestrates species integration across match engines and resolvers.
pub struct IntegrationFacade {
    engines: EngineRegistry,
    resolvers: ResolverRegistry,
    entities: BTreeMap<String, EntityRecord>,
    patterns_ready: bool,
    pool: CandidatePool,
    working: IntegrationMap<MetaboliteNamespace>,
    resolution: Option<Resolution>,
    warnings: Vec<String>,
}

impl IntegrationFacade {
    /// Create a facade over an explicit engine and resolver configuration.
    pub fn new(engines: EngineRegistry, resolvers: ResolverRegistry) -> Self {
        Self {
            engines,
            resolvers,
            entities: BTreeMap::new(),
            patterns_ready: false,
            pool: CandidatePool::new(),
            working: IntegrationMap::new(),
            resolution: None,
            warnings: Vec::new(),
        }
    }

    /// Register an entity and its compartment.
    ///
    /// Returns `false` for an empty id or an id already registered; the
    /// first registration stands.
    pub fn add_entity(&mut self, id: &str, compartment: Option<&str>) -> bool {
        if id.trim().is_empty() || self.entities.contains_key(id) {
            return false;
        }
        self.entities.insert(
            id.to_string(),
            EntityRecord {
                compartment: compartment.map(str::to_string),
                patterns: Default::default(),
            },
        );
        self.patterns_ready = false;
        true
    }

    /// Derive the pattern set of every registered entity.
    pub fn generate_patterns(&mut self) {
        for (id, record) in self.entities.iter_mut() {
            record.patterns = id_patterns(id, record.compartment.as_deref());
        }
        self.patterns_ready = true;
    }

    /// Run upfront engines, then every round in order.
    ///
    /// Starts from an empty pool each time, so running again (for instance
    /// after adding entities) replaces the previous run.
    pub fn run(&mut self) {
        self.pool = CandidatePool::new();
        self.working = IntegrationMap::new();
        self.resolution = None;
        self.warnings.clear();

        if !self.patterns_ready {
            tracing::debug!("patterns stale, regenerating before run");
            self.generate_patterns();
        }

        let empty = IntegrationMap::new();
        let upfront = self.engines.upfront().to_vec();
        let seeded = self.run_engines(&upfront, &empty);
        self.pool.extend(seeded);
        self.working = self.resolve_pool().map;
        tracing::info!(
            candidates = self.pool.len(),
            resolved = self.working.len(),
            "upfront engines done"
        );

        let rounds = self.engines.rounds().to_vec();
        for (index, round) in rounds.iter().enumerate() {
            let snapshot = self.working.clone();
            let proposed = self.run_engines(round, &snapshot);
            let count = proposed.len();
            self.pool.extend(proposed);
            self.working = self.resolve_pool().map;
            tracing::info!(
                round = index + 1,
                candidates = count,
                resolved = self.working.len(),
                "round done"
            );
        }
    }

    /// Resolve the full candidate pool into the clean map.
    ///
    /// Pairs whose resolver declines are absent from the result. Fallback
    /// and reconciliation warnings are logged here, once per build.
    pub fn build(&mut self) -> IntegrationMap<MetaboliteNamespace> {
        let resolution = self.resolve_pool();
        for (namespace, count) in resolution.map.coverage() {
            tracing::info!(namespace = %namespace, entities = count, "resolved");
        }
        for warning in &resolution.warnings {
            tracing::warn!("{}", warning);
        }
        self.warnings.extend(resolution.warnings.iter().cloned());
        let map = resolution.map.clone();
        self.working = map.clone();
        self.resolution = Some(resolution);
        map
    }

    fn resolve_pool(&self) -> Resolution {
        self.pool.resolve(&self.resolvers, &self.entities)
    }

    fn run_engines(
        &mut self,
        engines: &[Arc<dyn MatchEngine>],
        resolved: &IntegrationMap<MetaboliteNamespace>,
    ) -> Vec<CandidateReference> {
        let scope = MatchScope::new(&self.entities, resolved);
        let mut proposed = Vec::new();
        let mut failures = Vec::new();

        for engine in engines {
            match engine.propose(&scope) {
                Ok(candidates) => {
                    let before = candidates.len();
                    let kept: Vec<_> = candidates
                        .into_iter()
                        .filter(|c| scope.contains(&c.entity))
                        .collect();
                    if kept.len() < before {
                        tracing::debug!(
                            engine = engine.id(),
                            dropped = before - kept.len(),
                            "candidates for unknown entities dropped"
                        );
                    }
                    tracing::debug!(engine = engine.id(), candidates = kept.len(), "engine done");
                    proposed.extend(kept);
                }
                Err(e) => {
                    tracing::warn!(engine = engine.id(), error = %e, "engine failed");
                    failures.push(format!("Engine '{}' failed: {}", engine.id(), e));
                }
            }
        }

        self.warnings.extend(failures);
        proposed
    }

    pub fn entities(&self) -> &BTreeMap<String, EntityRecord> {
        &self.entities
    }

    /// Pattern sets by entity.
    pub fn patterns(&self) -> BTreeMap<&str, &std::collections::BTreeSet<String>> {
        self.entities
            .iter()
            .map(|(id, record)| (id.as_str(), &record.patterns))
            .collect()
    }

    /// The working map as of the last completed phase.
    pub fn working(&self) -> &IntegrationMap<MetaboliteNamespace> {
        &self.working
    }

    /// The clean map from the last `build`, if any.
    pub fn clean(&self) -> Option<&IntegrationMap<MetaboliteNamespace>> {
        self.resolution.as_ref().map(|r| &r.map)
    }

    pub fn candidates(&self) -> &[CandidateReference] {
        self.pool.candidates()
    }

    /// How one entity/namespace pair was settled in the last `build`.
    pub fn decision(&self, entity: &str, namespace: MetaboliteNamespace) -> Option<&MatchDecision> {
        self.resolution
            .as_ref()
            .and_then(|r| r.decisions.get(&(entity.to_string(), namespace)))
    }

    /// All decisions of the last `build` for one entity.
    pub fn decisions_for(&self, entity: &str) -> Vec<&MatchDecision> {
        self.decisions().filter(|d| d.entity == entity).collect()
    }

    pub fn decisions(&self) -> impl Iterator<Item = &MatchDecision> {
        self.resolution
            .iter()
            .flat_map(|r| r.decisions.values())
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}
