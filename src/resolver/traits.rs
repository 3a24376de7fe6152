//! Resolver contracts and the per-namespace registry

use crate::integration::IntegrationMap;
use crate::matching::{CandidateReference, EntityRecord};
use crate::model::MetaboliteNamespace;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Picks one external id out of an entity's candidates for one namespace.
///
/// Must be a pure function of its arguments: the same entity and candidate
/// list always yield the same answer.
pub trait ConflictResolver: Send + Sync {
    fn id(&self) -> &str;

    /// `candidates` holds distinct ids in the order engines proposed them,
    /// and is never empty. `None` leaves the pair unresolved.
    fn resolve(&self, entity: &str, candidates: &[String]) -> Option<String>;
}

/// Arbitration that needs to see more than one entity at a time.
pub trait EntityConflictResolver: Send + Sync {
    fn id(&self) -> &str;

    /// Whether a raw candidate may take part in resolution at all.
    fn admits(&self, _candidate: &CandidateReference) -> bool {
        true
    }

    /// Adjust the resolved map after per-namespace resolution.
    ///
    /// Returns one human-readable note per reference it removed.
    fn reconcile(
        &self,
        map: &mut IntegrationMap<MetaboliteNamespace>,
        entities: &BTreeMap<String, EntityRecord>,
    ) -> Vec<String>;
}

/// One resolver per namespace, plus an optional cross-entity resolver.
#[derive(Default, Clone)]
pub struct ResolverRegistry {
    by_namespace: BTreeMap<MetaboliteNamespace, Arc<dyn ConflictResolver>>,
    entity: Option<Arc<dyn EntityConflictResolver>>,
}

impl ResolverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the resolver for a namespace. A later registration for the
    /// same namespace replaces the earlier one.
    pub fn register(&mut self, namespace: MetaboliteNamespace, resolver: Arc<dyn ConflictResolver>) {
        self.by_namespace.insert(namespace, resolver);
    }

    pub fn with(mut self, namespace: MetaboliteNamespace, resolver: Arc<dyn ConflictResolver>) -> Self {
        self.register(namespace, resolver);
        self
    }

    pub fn with_entity_resolver(mut self, resolver: Arc<dyn EntityConflictResolver>) -> Self {
        self.entity = Some(resolver);
        self
    }

    pub fn get(&self, namespace: MetaboliteNamespace) -> Option<&Arc<dyn ConflictResolver>> {
        self.by_namespace.get(&namespace)
    }

    pub fn entity_resolver(&self) -> Option<&Arc<dyn EntityConflictResolver>> {
        self.entity.as_ref()
    }
}
