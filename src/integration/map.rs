//! Resolved reference maps

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Clean result of conflict resolution: `entity → (namespace → external id)`.
///
/// At most one external id per entity and namespace. Unresolved pairs are
/// absent, never empty-valued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IntegrationMap<N: Ord> {
    entries: BTreeMap<String, BTreeMap<N, String>>,
}

impl<N: Ord> Default for IntegrationMap<N> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<N: Ord + Copy> IntegrationMap<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the reference for an entity and namespace, returning the previous one.
    pub fn insert(&mut self, entity: impl Into<String>, namespace: N, id: impl Into<String>) -> Option<String> {
        self.entries
            .entry(entity.into())
            .or_default()
            .insert(namespace, id.into())
    }

    pub fn get(&self, entity: &str, namespace: N) -> Option<&str> {
        self.entries
            .get(entity)
            .and_then(|refs| refs.get(&namespace))
            .map(String::as_str)
    }

    pub fn references(&self, entity: &str) -> Option<&BTreeMap<N, String>> {
        self.entries.get(entity)
    }

    /// Drop one reference. Entities left without references are removed.
    pub fn remove(&mut self, entity: &str, namespace: N) -> Option<String> {
        let refs = self.entries.get_mut(entity)?;
        let removed = refs.remove(&namespace);
        if refs.is_empty() {
            self.entries.remove(entity);
        }
        removed
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeMap<N, String>)> {
        self.entries.iter()
    }

    pub fn entities(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    /// Number of entities with at least one reference.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolved entity count per namespace.
    pub fn coverage(&self) -> BTreeMap<N, usize> {
        let mut counts = BTreeMap::new();
        for refs in self.entries.values() {
            for namespace in refs.keys() {
                *counts.entry(*namespace).or_insert(0) += 1;
            }
        }
        counts
    }
}

/// Post-propagation result: `entity → (namespace → set of external ids)`.
///
/// More than one id in a set means the entity's equivalence class disagreed;
/// the ambiguity is kept for the caller to flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropagatedMap<N: Ord> {
    entries: BTreeMap<String, BTreeMap<N, BTreeSet<String>>>,
}

impl<N: Ord> Default for PropagatedMap<N> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<N: Ord + Copy> PropagatedMap<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the set held for an entity and namespace.
    pub fn set(&mut self, entity: impl Into<String>, namespace: N, ids: BTreeSet<String>) {
        if ids.is_empty() {
            return;
        }
        self.entries.entry(entity.into()).or_default().insert(namespace, ids);
    }

    pub fn get(&self, entity: &str, namespace: N) -> Option<&BTreeSet<String>> {
        self.entries.get(entity).and_then(|refs| refs.get(&namespace))
    }

    /// The reference for an entity and namespace, only when unambiguous.
    pub fn single(&self, entity: &str, namespace: N) -> Option<&str> {
        match self.get(entity, namespace) {
            Some(ids) if ids.len() == 1 => ids.iter().next().map(String::as_str),
            _ => None,
        }
    }

    pub fn references(&self, entity: &str) -> Option<&BTreeMap<N, BTreeSet<String>>> {
        self.entries.get(entity)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeMap<N, BTreeSet<String>>)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entity/namespace pairs holding more than one id.
    pub fn conflicts(&self) -> Vec<(&str, N, &BTreeSet<String>)> {
        self.entries
            .iter()
            .flat_map(|(entity, refs)| {
                refs.iter()
                    .filter(|(_, ids)| ids.len() > 1)
                    .map(move |(ns, ids)| (entity.as_str(), *ns, ids))
            })
            .collect()
    }

    /// Entity count per namespace.
    pub fn coverage(&self) -> BTreeMap<N, usize> {
        let mut counts = BTreeMap::new();
        for refs in self.entries.values() {
            for namespace in refs.keys() {
                *counts.entry(*namespace).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Collapse to a clean map, keeping only single-valued entries.
    pub fn unambiguous(&self) -> IntegrationMap<N> {
        let mut map = IntegrationMap::new();
        for (entity, refs) in &self.entries {
            for (namespace, ids) in refs {
                if ids.len() == 1 {
                    if let Some(id) = ids.iter().next() {
                        map.insert(entity.clone(), *namespace, id.clone());
                    }
                }
            }
        }
        map
    }
}

impl<N: Ord + Copy> From<&IntegrationMap<N>> for PropagatedMap<N> {
    fn from(map: &IntegrationMap<N>) -> Self {
        let mut out = PropagatedMap::new();
        for (entity, refs) in map.iter() {
            for (namespace, id) in refs {
                out.set(entity.clone(), *namespace, BTreeSet::from([id.clone()]));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MetaboliteNamespace::{self, *};

    #[test]
    fn test_insert_and_get() {
        let mut map: IntegrationMap<MetaboliteNamespace> = IntegrationMap::new();
        assert_eq!(map.insert("M_glc", ModelSeed, "cpd00027"), None);
        assert_eq!(map.insert("M_glc", ModelSeed, "cpd00028"), Some("cpd00027".into()));
        assert_eq!(map.get("M_glc", ModelSeed), Some("cpd00028"));
        assert_eq!(map.get("M_glc", BiGG), None);
    }

    #[test]
    fn test_remove_drops_empty_entity() {
        let mut map = IntegrationMap::new();
        map.insert("M_glc", ModelSeed, "cpd00027");
        map.remove("M_glc", ModelSeed);
        assert!(map.is_empty());
    }

    #[test]
    fn test_coverage() {
        let mut map = IntegrationMap::new();
        map.insert("a", ModelSeed, "cpd1");
        map.insert("b", ModelSeed, "cpd2");
        map.insert("b", BiGG2, "x");
        let cov = map.coverage();
        assert_eq!(cov[&ModelSeed], 2);
        assert_eq!(cov[&BiGG2], 1);
    }

    #[test]
    fn test_map_json_shape() {
        let mut map = IntegrationMap::new();
        map.insert("M_glc", ModelSeed, "cpd00027");
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"M_glc":{"ModelSeed":"cpd00027"}}"#);
    }

    #[test]
    fn test_propagated_conflicts_and_unambiguous() {
        let mut map = PropagatedMap::new();
        map.set("x", ModelSeed, BTreeSet::from(["cpd01".to_string(), "cpd02".to_string()]));
        map.set("y", BiGG2, BTreeSet::from(["glc__D".to_string()]));

        let conflicts = map.conflicts();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].0, "x");

        assert_eq!(map.single("x", ModelSeed), None);
        assert_eq!(map.single("y", BiGG2), Some("glc__D"));
        let clean = map.unambiguous();
        assert_eq!(clean.len(), 1);
    }

    #[test]
    fn test_empty_set_not_stored() {
        let mut map: PropagatedMap<MetaboliteNamespace> = PropagatedMap::new();
        map.set("x", ModelSeed, BTreeSet::new());
        assert!(map.is_empty());
    }
}
