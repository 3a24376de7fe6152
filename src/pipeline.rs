//! End-to-end model integration
//!
//! Species go through the integration facade, the clean map is propagated
//! over the curated equivalence classes, and reactions are matched by
//! signature against the propagated map.

use crate::biodb::Biodb;
use crate::components::ConnectedComponents;
use crate::config::IntegrationConfig;
use crate::integration::{IntegrationFacade, IntegrationMap, IntegrationResult, MatchDecision, PropagatedMap};
use crate::matching::engines::{
    ConnectedComponentsEngine, DictionaryEngine, FirstDegreeReferencesEngine, IdPatternEngine, NameEngine,
    TrieIdEngine, XmlReferencesEngine,
};
use crate::matching::{EngineRegistry, MatchEngine};
use crate::model::{MetaboliteNamespace, Reaction, ReactionNamespace, Species};
use crate::propagation::ReferencePropagation;
use crate::reaction::{ReactionIntegration, SignatureCollision};
use crate::resolver::{AliasMultiMatchResolver, BoundaryConflictResolver, MultiMatchResolver, ResolverRegistry};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

/// An entity whose equivalence class disagreed on a namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropagationConflict {
    pub entity: String,
    pub namespace: MetaboliteNamespace,
    pub ids: BTreeSet<String>,
}

/// Diagnostics of one run. Never feeds back into the maps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegrationReport {
    pub run_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub species: usize,
    pub reactions: usize,
    pub resolved_coverage: BTreeMap<MetaboliteNamespace, usize>,
    pub propagated_coverage: BTreeMap<MetaboliteNamespace, usize>,
    pub reaction_coverage: BTreeMap<ReactionNamespace, usize>,
    pub conflicts: Vec<PropagationConflict>,
    pub decisions: Vec<MatchDecision>,
    pub collisions: Vec<SignatureCollision>,
    pub warnings: Vec<String>,
}

/// Everything a run produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingResult {
    /// Species references after propagation; sets with several ids are conflicts
    pub species: PropagatedMap<MetaboliteNamespace>,
    /// Species references straight out of conflict resolution
    pub clean: IntegrationMap<MetaboliteNamespace>,
    pub reactions: IntegrationMap<ReactionNamespace>,
    pub report: IntegrationReport,
}

impl MappingResult {
    /// Species with exactly one ModelSeed reference.
    pub fn species_to_model_seed(&self) -> BTreeMap<String, String> {
        self.species
            .iter()
            .filter_map(|(entity, _)| {
                self.species
                    .single(entity, MetaboliteNamespace::ModelSeed)
                    .map(|id| (entity.clone(), id.to_string()))
            })
            .collect()
    }

    /// Reactions resolved in the ModelSeed reaction namespace.
    pub fn reaction_to_model_seed(&self) -> BTreeMap<String, String> {
        self.reactions
            .iter()
            .filter_map(|(reaction, refs)| {
                refs.get(&ReactionNamespace::ModelSeedReaction)
                    .map(|id| (reaction.clone(), id.clone()))
            })
            .collect()
    }

    /// How each namespace of one species was settled.
    pub fn decisions_for(&self, entity: &str) -> Vec<&MatchDecision> {
        self.report.decisions.iter().filter(|d| d.entity == entity).collect()
    }
}

/// Integrates one model snapshot against the reference tables.
pub struct ModelIntegration {
    biodb: Arc<Biodb>,
    components: Arc<ConnectedComponents>,
    config: IntegrationConfig,
}

impl ModelIntegration {
    pub fn new(biodb: Arc<Biodb>, components: Arc<ConnectedComponents>) -> Self {
        Self {
            biodb,
            components,
            config: IntegrationConfig::default(),
        }
    }

    pub fn with_config(mut self, config: IntegrationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &IntegrationConfig {
        &self.config
    }

    /// Run species integration, propagation and reaction integration.
    pub fn integrate(&self, species: &[Species], reactions: &[Reaction]) -> MappingResult {
        let mut warnings = Vec::new();
        let species = self.accepted_species(species, &mut warnings);

        let boundary = self.boundary_species(&species, &mut warnings);
        let engines = self.engines(&species);
        let resolvers = self.resolvers(boundary.clone());
        tracing::debug!(engines = ?engines.engine_ids(), "engine registry");

        let mut facade = IntegrationFacade::new(engines, resolvers);
        for s in &species {
            facade.add_entity(&s.id, s.compartment.as_deref());
        }
        facade.generate_patterns();
        facade.run();
        let clean = facade.build();
        warnings.extend(facade.warnings().iter().cloned());

        let entity_ids: BTreeSet<String> = species.iter().map(|s| s.id.clone()).collect();
        let mut propagation = ReferencePropagation::from_map(clean.clone());
        for entity in boundary {
            propagation.hold(entity);
        }
        let propagated = propagation.propagate(self.config.strict_propagation, &self.components, &entity_ids);

        let reaction_integration = ReactionIntegration::new(&self.biodb, &self.config.reaction_namespaces)
            .with_reverse_lookup(self.config.reverse_reaction_lookup);
        let mapping = reaction_integration.integrate(reactions, &propagated);
        warnings.extend(mapping.warnings);

        let report = IntegrationReport {
            run_id: Uuid::new_v4(),
            created_at: Utc::now(),
            species: species.len(),
            reactions: reactions.len(),
            resolved_coverage: clean.coverage(),
            propagated_coverage: propagated.coverage(),
            reaction_coverage: mapping.map.coverage(),
            conflicts: propagated
                .conflicts()
                .into_iter()
                .map(|(entity, namespace, ids)| PropagationConflict {
                    entity: entity.to_string(),
                    namespace,
                    ids: ids.clone(),
                })
                .collect(),
            decisions: facade.decisions().cloned().collect(),
            collisions: reaction_integration.collisions(),
            warnings,
        };

        tracing::info!(
            run_id = %report.run_id,
            species = report.species,
            resolved = clean.len(),
            propagated = propagated.len(),
            reactions = mapping.map.len(),
            conflicts = report.conflicts.len(),
            "integration complete"
        );

        MappingResult {
            species: propagated,
            clean,
            reactions: mapping.map,
            report,
        }
    }

    fn accepted_species<'a>(&self, species: &'a [Species], warnings: &mut Vec<String>) -> Vec<&'a Species> {
        let mut seen = BTreeSet::new();
        let mut accepted = Vec::with_capacity(species.len());
        for s in species {
            if s.id.trim().is_empty() {
                tracing::warn!("species without id skipped");
                warnings.push("Species without id skipped".to_string());
            } else if !seen.insert(s.id.as_str()) {
                tracing::warn!(species = %s.id, "duplicate species id skipped");
                warnings.push(format!("Duplicate species id '{}' skipped", s.id));
            } else {
                accepted.push(s);
            }
        }
        accepted
    }

    fn engines(&self, species: &[&Species]) -> EngineRegistry {
        let ids: BTreeSet<String> = species.iter().map(|s| s.id.clone()).collect();
        let names: BTreeMap<String, String> = species
            .iter()
            .filter_map(|s| s.name.as_ref().map(|n| (s.id.clone(), n.clone())))
            .collect();
        let annotations: BTreeMap<String, Vec<String>> = species
            .iter()
            .filter(|s| !s.annotations.is_empty())
            .map(|s| (s.id.clone(), s.annotations.clone()))
            .collect();

        let mut round: Vec<Arc<dyn MatchEngine>> =
            vec![Arc::new(ConnectedComponentsEngine::new(self.components.clone()))];
        if self.config.first_degree {
            round.push(Arc::new(FirstDegreeReferencesEngine::new(self.biodb.clone())));
        }

        EngineRegistry::new()
            .with_upfront(Arc::new(DictionaryEngine::new(self.biodb.clone(), ids.clone())))
            .with_upfront(Arc::new(XmlReferencesEngine::new(annotations)))
            .with_upfront(Arc::new(IdPatternEngine::new(self.biodb.clone())))
            .with_upfront(Arc::new(
                TrieIdEngine::new(self.biodb.clone(), ids).with_min_len(self.config.trie_min_match_len),
            ))
            .with_upfront(Arc::new(NameEngine::full(self.biodb.clone(), names.clone())))
            .with_upfront(Arc::new(NameEngine::split(self.biodb.clone(), names)))
            .with_round(round)
    }

    fn boundary_species(&self, species: &[&Species], warnings: &mut Vec<String>) -> BTreeSet<String> {
        let mut boundary = BTreeSet::new();
        for s in species {
            match s.is_boundary() {
                Ok(true) => {
                    boundary.insert(s.id.clone());
                }
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!(species = %s.id, error = %e, "boundary flag unreadable, treating as internal");
                    warnings.push(format!("Species '{}': {}", s.id, e));
                }
            }
        }
        boundary
    }

    fn resolvers(&self, boundary: BTreeSet<String>) -> ResolverRegistry {
        ResolverRegistry::new()
            .with(MetaboliteNamespace::ModelSeed, Arc::new(MultiMatchResolver))
            .with(MetaboliteNamespace::Seed, Arc::new(MultiMatchResolver))
            .with(
                MetaboliteNamespace::BiGG2,
                Arc::new(AliasMultiMatchResolver::new(self.biodb.clone(), MetaboliteNamespace::BiGG2)),
            )
            .with_entity_resolver(Arc::new(BoundaryConflictResolver::new(boundary)))
    }
}

/// Load a curation file and integrate a model with the default configuration.
pub fn integrate(
    species: &[Species],
    reactions: &[Reaction],
    curation: impl AsRef<Path>,
    biodb: Arc<Biodb>,
) -> IntegrationResult<MappingResult> {
    let (components, stats) = ConnectedComponents::load(curation)?;
    tracing::debug!(groups = stats.groups, skipped = stats.skipped, "curation loaded");
    Ok(ModelIntegration::new(biodb, Arc::new(components)).integrate(species, reactions))
}
