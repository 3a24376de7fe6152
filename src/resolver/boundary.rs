//! Keeps boundary placeholders from being equated with real metabolites

use super::traits::EntityConflictResolver;
use crate::integration::IntegrationMap;
use crate::matching::{CandidateReference, EntityRecord};
use crate::model::MetaboliteNamespace;
use std::collections::{BTreeMap, BTreeSet};

/// Cross-entity resolver for boundary (system input/output) species.
///
/// A non-boundary entity never resolves to a boundary entity's id. When a
/// boundary and a non-boundary entity of the same compartment resolve to
/// the same reference, the boundary entity loses it.
#[derive(Debug, Clone, Default)]
pub struct BoundaryConflictResolver {
    boundary: BTreeSet<String>,
}

impl BoundaryConflictResolver {
    pub fn new(boundary: BTreeSet<String>) -> Self {
        Self { boundary }
    }

    pub fn add(&mut self, entity: impl Into<String>) {
        self.boundary.insert(entity.into());
    }

    pub fn is_boundary(&self, entity: &str) -> bool {
        self.boundary.contains(entity)
    }
}

impl EntityConflictResolver for BoundaryConflictResolver {
    fn id(&self) -> &str {
        "boundary"
    }

    fn admits(&self, candidate: &CandidateReference) -> bool {
        self.is_boundary(&candidate.entity) || !self.is_boundary(&candidate.external_id)
    }

    fn reconcile(
        &self,
        map: &mut IntegrationMap<MetaboliteNamespace>,
        entities: &BTreeMap<String, EntityRecord>,
    ) -> Vec<String> {
        let compartment = |entity: &str| {
            entities
                .get(entity)
                .and_then(|record| record.compartment.clone())
        };

        // (compartment, namespace, id) → claimants
        let mut claims: BTreeMap<(Option<String>, MetaboliteNamespace, String), Vec<String>> =
            BTreeMap::new();
        for (entity, references) in map.iter() {
            for (namespace, id) in references {
                claims
                    .entry((compartment(entity), *namespace, id.clone()))
                    .or_default()
                    .push(entity.clone());
            }
        }

        let mut notes = Vec::new();
        for ((_, namespace, id), claimants) in claims {
            let real = claimants.iter().any(|e| !self.is_boundary(e));
            if !real {
                continue;
            }
            for entity in claimants.iter().filter(|e| self.is_boundary(e)) {
                map.remove(entity, namespace);
                notes.push(format!(
                    "boundary species {} dropped {}:{} shared with a real metabolite",
                    entity, namespace, id
                ));
            }
        }
        notes
    }
}
