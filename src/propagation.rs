//! Reference propagation across equivalence classes
//!
//! Members of one connected component share what any of them resolved.
//! When the class disagrees the result keeps every distinct id rather than
//! picking one.

use crate::components::ConnectedComponents;
use crate::integration::{IntegrationMap, PropagatedMap};
use crate::model::MetaboliteNamespace;
use std::collections::{BTreeMap, BTreeSet};

/// Propagates resolved references to the other members of each class.
#[derive(Debug, Clone, Default)]
pub struct ReferencePropagation {
    references: IntegrationMap<MetaboliteNamespace>,
    /// Entities that keep their own references and receive nothing
    held: BTreeSet<String>,
}

impl ReferencePropagation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a resolved species map.
    pub fn from_map(references: IntegrationMap<MetaboliteNamespace>) -> Self {
        Self {
            references,
            held: BTreeSet::new(),
        }
    }

    pub fn add_reference(
        &mut self,
        entity: impl Into<String>,
        namespace: MetaboliteNamespace,
        id: impl Into<String>,
    ) -> &mut Self {
        self.references.insert(entity, namespace, id);
        self
    }

    /// Let an entity contribute to its class but never receive from it.
    ///
    /// Boundary placeholders are held: a reference the boundary resolver
    /// took away must not come back through the class.
    pub fn hold(&mut self, entity: impl Into<String>) -> &mut Self {
        self.held.insert(entity.into());
        self
    }

    /// Spread references over the classes of `entities`.
    ///
    /// Class membership is restricted to `entities` plus every entity that
    /// already holds a reference. With `strict`, every member receives the
    /// class's full set of distinct ids for a namespace. Without it, a member
    /// holding its own id keeps exactly that id and only unresolved members
    /// receive the class set.
    pub fn propagate(
        &self,
        strict: bool,
        components: &ConnectedComponents,
        entities: &BTreeSet<String>,
    ) -> PropagatedMap<MetaboliteNamespace> {
        let universe: BTreeSet<&str> = entities
            .iter()
            .map(String::as_str)
            .chain(self.references.entities().map(String::as_str))
            .collect();

        // Class values are shared by all members; compute once per class.
        let mut class_values: BTreeMap<BTreeSet<String>, BTreeMap<MetaboliteNamespace, BTreeSet<String>>> =
            BTreeMap::new();
        let mut result = PropagatedMap::new();

        for &entity in &universe {
            if self.held.contains(entity) {
                if let Some(refs) = self.references.references(entity) {
                    for (namespace, id) in refs {
                        result.set(entity, *namespace, BTreeSet::from([id.clone()]));
                    }
                }
                continue;
            }

            let class: BTreeSet<String> = components
                .class_of(entity)
                .into_iter()
                .filter(|member| universe.contains(member.as_str()))
                .collect();

            let values = class_values
                .entry(class)
                .or_insert_with_key(|class| self.collect(class));

            for (namespace, ids) in values.iter() {
                match self.references.get(entity, *namespace) {
                    Some(own) if !strict => {
                        result.set(entity, *namespace, BTreeSet::from([own.to_string()]));
                    }
                    _ => result.set(entity, *namespace, ids.clone()),
                }
            }
        }

        let conflicts = result.conflicts().len();
        for (namespace, count) in result.coverage() {
            tracing::info!(namespace = %namespace, entities = count, "propagated");
        }
        if conflicts > 0 {
            tracing::info!(conflicts, "propagation left ambiguous references");
        }
        result
    }

    fn collect(&self, class: &BTreeSet<String>) -> BTreeMap<MetaboliteNamespace, BTreeSet<String>> {
        let mut values: BTreeMap<MetaboliteNamespace, BTreeSet<String>> = BTreeMap::new();
        for member in class {
            if let Some(refs) = self.references.references(member) {
                for (namespace, id) in refs {
                    values.entry(*namespace).or_default().insert(id.clone());
                }
            }
        }
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use MetaboliteNamespace::*;

    fn components(groups: &[&[&str]]) -> ConnectedComponents {
        let mut ccs = ConnectedComponents::new();
        for group in groups {
            ccs.add(group.iter().copied());
        }
        ccs
    }

    fn ids(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_fills_unresolved_member() {
        let ccs = components(&[&["X", "Y"]]);
        let mut propagation = ReferencePropagation::new();
        propagation.add_reference("X", ModelSeed, "cpd01");

        let map = propagation.propagate(true, &ccs, &ids(&["X", "Y"]));
        assert_eq!(map.get("Y", ModelSeed), Some(&ids(&["cpd01"])));
        assert_eq!(map.get("X", ModelSeed), Some(&ids(&["cpd01"])));
    }

    #[test]
    fn test_conflict_surfaced_to_all_members() {
        let ccs = components(&[&["X", "Y"]]);
        let mut propagation = ReferencePropagation::new();
        propagation
            .add_reference("X", ModelSeed, "cpd01")
            .add_reference("Y", ModelSeed, "cpd02");

        let map = propagation.propagate(true, &ccs, &ids(&["X", "Y"]));
        assert_eq!(map.get("X", ModelSeed), Some(&ids(&["cpd01", "cpd02"])));
        assert_eq!(map.get("Y", ModelSeed), Some(&ids(&["cpd01", "cpd02"])));
        assert_eq!(map.conflicts().len(), 2);
    }

    #[test]
    fn test_non_strict_keeps_own_value() {
        let ccs = components(&[&["X", "Y", "Z"]]);
        let mut propagation = ReferencePropagation::new();
        propagation
            .add_reference("X", ModelSeed, "cpd01")
            .add_reference("Y", ModelSeed, "cpd02");

        let map = propagation.propagate(false, &ccs, &ids(&["X", "Y", "Z"]));
        assert_eq!(map.get("X", ModelSeed), Some(&ids(&["cpd01"])));
        assert_eq!(map.get("Y", ModelSeed), Some(&ids(&["cpd02"])));
        assert_eq!(map.get("Z", ModelSeed), Some(&ids(&["cpd01", "cpd02"])));
    }

    #[test]
    fn test_transitive_class() {
        let ccs = components(&[&["A", "B"], &["B", "C"]]);
        let mut propagation = ReferencePropagation::new();
        propagation.add_reference("A", BiGG2, "glc__D");

        let map = propagation.propagate(true, &ccs, &ids(&["A", "C"]));
        assert_eq!(map.single("C", BiGG2), Some("glc__D"));
    }

    #[test]
    fn test_namespaces_are_independent() {
        let ccs = components(&[&["X", "Y"]]);
        let mut propagation = ReferencePropagation::new();
        propagation
            .add_reference("X", ModelSeed, "cpd01")
            .add_reference("Y", BiGG2, "glc__D");

        let map = propagation.propagate(true, &ccs, &ids(&["X", "Y"]));
        assert_eq!(map.single("X", BiGG2), Some("glc__D"));
        assert_eq!(map.single("Y", ModelSeed), Some("cpd01"));
        assert!(map.conflicts().is_empty());
    }

    #[test]
    fn test_held_entity_receives_nothing() {
        let ccs = components(&[&["M_glc__D_e", "M_glc__D_b"]]);
        let mut propagation = ReferencePropagation::new();
        propagation
            .add_reference("M_glc__D_e", ModelSeed, "cpd00027")
            .add_reference("M_glc__D_b", MetaCyc, "GLC")
            .hold("M_glc__D_b");

        let map = propagation.propagate(true, &ccs, &ids(&["M_glc__D_e", "M_glc__D_b"]));
        assert_eq!(map.get("M_glc__D_b", ModelSeed), None);
        assert_eq!(map.single("M_glc__D_b", MetaCyc), Some("GLC"));
        // Held members still contribute to the rest of the class.
        assert_eq!(map.single("M_glc__D_e", MetaCyc), Some("GLC"));
        assert_eq!(map.single("M_glc__D_e", ModelSeed), Some("cpd00027"));
    }

    #[test]
    fn test_singleton_class_unchanged() {
        let ccs = ConnectedComponents::new();
        let mut clean = IntegrationMap::new();
        clean.insert("X", ModelSeed, "cpd01");
        let propagation = ReferencePropagation::from_map(clean.clone());

        let map = propagation.propagate(true, &ccs, &ids(&["X", "Y"]));
        assert_eq!(map.unambiguous(), clean);
        assert!(map.get("Y", ModelSeed).is_none());
    }
}
