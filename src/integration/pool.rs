//! Candidate pool and its resolution into a clean map
//!
//! Candidates are kept in arrival order (engine invocation order), which is
//! what the first-candidate fallback relies on.

use super::map::IntegrationMap;
use crate::matching::{CandidateReference, EntityRecord};
use crate::model::MetaboliteNamespace;
use crate::resolver::ResolverRegistry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Policy label recorded when no resolver is registered for a namespace.
pub const FIRST_CANDIDATE_POLICY: &str = "first-candidate";

/// How one `(entity, namespace)` pair was settled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchDecision {
    pub entity: String,
    pub namespace: MetaboliteNamespace,
    pub resolved: Option<String>,
    /// Engine that first proposed the resolved id
    pub winner_engine: Option<String>,
    /// Resolver id, or [`FIRST_CANDIDATE_POLICY`]
    pub policy: String,
    /// Cross-entity resolver that removed the resolution afterwards
    pub overruled_by: Option<String>,
    /// Every candidate that did not win
    pub rejected: Vec<CandidateReference>,
}

/// A clean map with the decisions that produced it.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    pub map: IntegrationMap<MetaboliteNamespace>,
    pub decisions: BTreeMap<(String, MetaboliteNamespace), MatchDecision>,
    pub warnings: Vec<String>,
}

/// Append-only candidate store owned by the facade.
#[derive(Debug, Clone, Default)]
pub struct CandidatePool {
    candidates: Vec<CandidateReference>,
}

impl CandidatePool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, candidates: impl IntoIterator<Item = CandidateReference>) {
        self.candidates.extend(candidates);
    }

    pub fn candidates(&self) -> &[CandidateReference] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Resolve every `(entity, namespace)` with at least one candidate.
    ///
    /// Candidates the cross-entity resolver does not admit are rejected
    /// up front. Each namespace's resolver then sees the distinct ids in
    /// arrival order; without a resolver the first one wins. Finally the
    /// cross-entity resolver reconciles the whole map.
    pub fn resolve(
        &self,
        resolvers: &ResolverRegistry,
        entities: &BTreeMap<String, EntityRecord>,
    ) -> Resolution {
        let entity_resolver = resolvers.entity_resolver();
        let mut grouped: BTreeMap<(String, MetaboliteNamespace), Vec<&CandidateReference>> =
            BTreeMap::new();
        for candidate in &self.candidates {
            grouped
                .entry((candidate.entity.clone(), candidate.namespace))
                .or_default()
                .push(candidate);
        }

        let mut resolution = Resolution::default();
        for ((entity, namespace), group) in grouped {
            let admitted: Vec<&CandidateReference> = group
                .iter()
                .copied()
                .filter(|c| entity_resolver.map_or(true, |r| r.admits(c)))
                .collect();

            let mut ids: Vec<String> = Vec::new();
            for candidate in &admitted {
                if !ids.contains(&candidate.external_id) {
                    ids.push(candidate.external_id.clone());
                }
            }

            let (resolved, policy) = if ids.is_empty() {
                (None, FIRST_CANDIDATE_POLICY.to_string())
            } else {
                match resolvers.get(namespace) {
                    Some(resolver) => (resolver.resolve(&entity, &ids), resolver.id().to_string()),
                    None => {
                        if ids.len() > 1 {
                            let message = format!(
                                "no resolver for {}; {} candidates for {}, keeping first ({})",
                                namespace,
                                ids.len(),
                                entity,
                                ids[0]
                            );
                            resolution.warnings.push(message);
                        }
                        (ids.first().cloned(), FIRST_CANDIDATE_POLICY.to_string())
                    }
                }
            };

            let winner_engine = resolved.as_ref().and_then(|id| {
                admitted
                    .iter()
                    .find(|c| &c.external_id == id)
                    .map(|c| c.engine.clone())
            });
            let rejected = group
                .iter()
                .filter(|c| resolved.as_ref() != Some(&c.external_id) || !admitted.contains(c))
                .map(|c| (*c).clone())
                .collect();

            if let Some(id) = &resolved {
                resolution.map.insert(entity.clone(), namespace, id.clone());
            }
            resolution.decisions.insert(
                (entity.clone(), namespace),
                MatchDecision {
                    entity,
                    namespace,
                    resolved,
                    winner_engine,
                    policy,
                    overruled_by: None,
                    rejected,
                },
            );
        }

        if let Some(reconciler) = entity_resolver {
            let notes = reconciler.reconcile(&mut resolution.map, entities);
            if !notes.is_empty() {
                for decision in resolution.decisions.values_mut() {
                    let kept = resolution.map.get(&decision.entity, decision.namespace);
                    if decision.resolved.is_some() && kept != decision.resolved.as_deref() {
                        decision.overruled_by = Some(reconciler.id().to_string());
                    }
                }
                resolution.warnings.extend(notes);
            }
        }

        resolution
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::{BoundaryConflictResolver, MultiMatchResolver};
    use std::collections::BTreeSet;
    use std::sync::Arc;
    use MetaboliteNamespace::*;

    fn pool(candidates: &[(&str, MetaboliteNamespace, &str, &str)]) -> CandidatePool {
        let mut pool = CandidatePool::new();
        pool.extend(
            candidates
                .iter()
                .map(|(e, ns, id, engine)| CandidateReference::new(*e, *ns, *id, *engine)),
        );
        pool
    }

    #[test]
    fn test_first_candidate_wins_without_resolver() {
        let pool = pool(&[
            ("x", BiGG2, "glc_D", "dict"),
            ("x", BiGG2, "glc__D", "pattern"),
        ]);
        let resolution = pool.resolve(&ResolverRegistry::new(), &BTreeMap::new());

        assert_eq!(resolution.map.get("x", BiGG2), Some("glc_D"));
        let decision = &resolution.decisions[&("x".to_string(), BiGG2)];
        assert_eq!(decision.winner_engine.as_deref(), Some("dict"));
        assert_eq!(decision.policy, FIRST_CANDIDATE_POLICY);
        assert_eq!(decision.rejected.len(), 1);
        assert_eq!(resolution.warnings.len(), 1);
    }

    #[test]
    fn test_registered_resolver_used() {
        let pool = pool(&[
            ("x", ModelSeed, "cpd000270", "name"),
            ("x", ModelSeed, "cpd00027", "pattern"),
            ("x", ModelSeed, "cpd00027", "trie"),
        ]);
        let resolvers = ResolverRegistry::new().with(ModelSeed, Arc::new(MultiMatchResolver));
        let resolution = pool.resolve(&resolvers, &BTreeMap::new());

        let decision = &resolution.decisions[&("x".to_string(), ModelSeed)];
        assert_eq!(decision.resolved.as_deref(), Some("cpd00027"));
        assert_eq!(decision.winner_engine.as_deref(), Some("pattern"));
        assert_eq!(decision.policy, "multi-match");
        assert_eq!(decision.rejected.len(), 1);
        assert!(resolution.warnings.is_empty());
    }

    #[test]
    fn test_resolver_none_leaves_pair_absent() {
        struct Never;
        impl crate::resolver::ConflictResolver for Never {
            fn id(&self) -> &str {
                "never"
            }
            fn resolve(&self, _entity: &str, _candidates: &[String]) -> Option<String> {
                None
            }
        }

        let pool = pool(&[("x", Seed, "cpd01", "name")]);
        let resolvers = ResolverRegistry::new().with(Seed, Arc::new(Never));
        let resolution = pool.resolve(&resolvers, &BTreeMap::new());

        assert!(resolution.map.is_empty());
        let decision = &resolution.decisions[&("x".to_string(), Seed)];
        assert_eq!(decision.resolved, None);
        assert_eq!(decision.rejected.len(), 1);
    }

    #[test]
    fn test_boundary_candidates_not_admitted() {
        let pool = pool(&[
            ("M_glc_c", ModelSeed, "M_glc_b", "dict"),
            ("M_glc_c", ModelSeed, "cpd00027", "name"),
        ]);
        let boundary = BoundaryConflictResolver::new(BTreeSet::from(["M_glc_b".to_string()]));
        let resolvers = ResolverRegistry::new().with_entity_resolver(Arc::new(boundary));
        let resolution = pool.resolve(&resolvers, &BTreeMap::new());

        assert_eq!(resolution.map.get("M_glc_c", ModelSeed), Some("cpd00027"));
    }
}
