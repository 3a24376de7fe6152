//! Reaction integration by stoichiometric signature
//!
//! A reaction's signature is the set of `(compound, direction)` pairs of
//! its resolved species. Compartments play no part: two reactions that only
//! differ in where their species live share a signature. Signatures are
//! looked up in a per-namespace index built from the database's reaction
//! records.

use crate::biodb::{Biodb, ReactionRecord};
use crate::integration::{IntegrationMap, PropagatedMap};
use crate::model::{MetaboliteNamespace, Reaction, ReactionNamespace};
use crate::resolver::MultiMatchResolver;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Side of the reaction a compound appears on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    Consumed,
    Produced,
}

impl Direction {
    fn of(coefficient: f64) -> Option<Self> {
        if coefficient < 0.0 {
            Some(Self::Consumed)
        } else if coefficient > 0.0 {
            Some(Self::Produced)
        } else {
            None
        }
    }

    fn flipped(self) -> Self {
        match self {
            Self::Consumed => Self::Produced,
            Self::Produced => Self::Consumed,
        }
    }
}

/// Compartment-free stoichiometric signature.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Signature(BTreeSet<(String, Direction)>);

impl Signature {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a participant; zero coefficients carry no direction and are ignored.
    pub fn add(&mut self, compound: impl Into<String>, coefficient: f64) {
        if let Some(direction) = Direction::of(coefficient) {
            self.0.insert((compound.into(), direction));
        }
    }

    /// The same signature read right to left.
    pub fn reversed(&self) -> Self {
        Self(
            self.0
                .iter()
                .map(|(compound, direction)| (compound.clone(), direction.flipped()))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Signature of a database reaction record.
    pub fn of_record(record: &ReactionRecord) -> Self {
        let mut signature = Self::new();
        for participant in &record.stoichiometry {
            signature.add(participant.compound.clone(), participant.coefficient);
        }
        signature
    }
}

/// Several database reactions sharing one signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureCollision {
    pub namespace: ReactionNamespace,
    pub reactions: Vec<String>,
    pub chosen: String,
}

/// Signature → reaction id lookup for one namespace.
#[derive(Debug, Clone, Default)]
pub struct ReactionSignatureIndex {
    namespace: Option<ReactionNamespace>,
    entries: BTreeMap<Signature, String>,
    collisions: Vec<SignatureCollision>,
}

impl ReactionSignatureIndex {
    /// Index every record of `namespace` held by the database.
    ///
    /// Records sharing a signature are settled with the multi-match policy
    /// and reported as collisions.
    pub fn build(biodb: &Biodb, namespace: ReactionNamespace) -> Self {
        let mut grouped: BTreeMap<Signature, BTreeSet<&str>> = BTreeMap::new();
        for record in biodb.reactions(namespace) {
            let signature = Signature::of_record(record);
            if signature.is_empty() {
                tracing::debug!(namespace = %namespace, reaction = %record.id, "record without stoichiometry");
                continue;
            }
            grouped.entry(signature).or_default().insert(record.id.as_str());
        }

        let mut index = Self {
            namespace: Some(namespace),
            ..Self::default()
        };
        for (signature, ids) in grouped {
            let Some(chosen) = MultiMatchResolver::pick(ids.iter().copied()) else {
                continue;
            };
            if ids.len() > 1 {
                tracing::debug!(namespace = %namespace, chosen, candidates = ids.len(), "signature collision");
                index.collisions.push(SignatureCollision {
                    namespace,
                    reactions: ids.iter().map(|id| id.to_string()).collect(),
                    chosen: chosen.to_string(),
                });
            }
            index.entries.insert(signature, chosen.to_string());
        }
        index
    }

    pub fn namespace(&self) -> Option<ReactionNamespace> {
        self.namespace
    }

    pub fn get(&self, signature: &Signature) -> Option<&str> {
        self.entries.get(signature).map(String::as_str)
    }

    pub fn collisions(&self) -> &[SignatureCollision] {
        &self.collisions
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Reaction map plus what went wrong along the way.
#[derive(Debug, Clone, Default)]
pub struct ReactionMapping {
    pub map: IntegrationMap<ReactionNamespace>,
    pub warnings: Vec<String>,
}

/// Matches model reactions against every configured namespace's index.
#[derive(Debug, Clone)]
pub struct ReactionIntegration {
    indexes: Vec<ReactionSignatureIndex>,
    reverse_lookup: bool,
}

impl ReactionIntegration {
    /// Build one index per namespace, kept in the given processing order.
    pub fn new(biodb: &Biodb, namespaces: &[ReactionNamespace]) -> Self {
        let mut seen = BTreeSet::new();
        let indexes = namespaces
            .iter()
            .filter(|ns| seen.insert(**ns))
            .map(|ns| ReactionSignatureIndex::build(biodb, *ns))
            .collect();
        Self {
            indexes,
            reverse_lookup: true,
        }
    }

    /// Whether a signature may also match a record written in reverse.
    pub fn with_reverse_lookup(mut self, enabled: bool) -> Self {
        self.reverse_lookup = enabled;
        self
    }

    pub fn collisions(&self) -> Vec<SignatureCollision> {
        self.indexes
            .iter()
            .flat_map(|index| index.collisions().iter().cloned())
            .collect()
    }

    /// Signature of a model reaction in `namespace`.
    ///
    /// `Ok(None)` when some species has no single reference in any of the
    /// namespace's compound namespaces. `Err` when a reagent names no species.
    pub fn signature(
        reaction: &Reaction,
        namespace: ReactionNamespace,
        species: &PropagatedMap<MetaboliteNamespace>,
    ) -> Result<Option<Signature>, String> {
        let mut signature = Signature::new();
        for (entity, coefficient) in reaction.signed_stoichiometry()? {
            let compound = namespace
                .compound_namespaces()
                .iter()
                .find_map(|cns| species.single(entity, *cns));
            match compound {
                Some(compound) => signature.add(compound, coefficient),
                None => return Ok(None),
            }
        }
        Ok((!signature.is_empty()).then_some(signature))
    }

    /// Resolve every reaction in every namespace.
    ///
    /// Namespaces are independent; a reaction without a match in one is
    /// still tried in the others. A reaction with a reagent lacking a species
    /// reference is left out entirely.
    pub fn integrate(
        &self,
        reactions: &[Reaction],
        species: &PropagatedMap<MetaboliteNamespace>,
    ) -> ReactionMapping {
        let mut mapping = ReactionMapping::default();
        let mut excluded = BTreeSet::new();

        for index in &self.indexes {
            let Some(namespace) = index.namespace() else {
                continue;
            };
            let mut matched = 0usize;
            for reaction in reactions {
                if excluded.contains(reaction.id.as_str()) {
                    continue;
                }
                let signature = match Self::signature(reaction, namespace, species) {
                    Ok(Some(signature)) => signature,
                    Ok(None) => continue,
                    Err(e) => {
                        tracing::warn!(reaction = %reaction.id, error = %e, "reaction excluded");
                        mapping.warnings.push(e);
                        excluded.insert(reaction.id.as_str());
                        continue;
                    }
                };

                let found = index.get(&signature).or_else(|| {
                    if self.reverse_lookup {
                        index.get(&signature.reversed())
                    } else {
                        None
                    }
                });
                if let Some(id) = found {
                    mapping.map.insert(reaction.id.clone(), namespace, id);
                    matched += 1;
                }
            }
            tracing::info!(namespace = %namespace, reactions = matched, "reactions resolved");
        }
        mapping
    }
}
