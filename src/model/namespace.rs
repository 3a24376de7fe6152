//! Reference database namespaces

use serde::{Deserialize, Serialize};
use std::fmt;

/// External compound databases a species may be resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MetaboliteNamespace {
    BiGG,
    BiGG2,
    ModelSeed,
    Seed,
    LigandCompound,
    MetaCyc,
}

impl MetaboliteNamespace {
    pub const ALL: [MetaboliteNamespace; 6] = [
        MetaboliteNamespace::BiGG,
        MetaboliteNamespace::BiGG2,
        MetaboliteNamespace::ModelSeed,
        MetaboliteNamespace::Seed,
        MetaboliteNamespace::LigandCompound,
        MetaboliteNamespace::MetaCyc,
    ];

    /// Namespace for a MIRIAM collection name (`kegg.compound`, `seed.compound`, ...).
    pub fn from_miriam_collection(collection: &str) -> Option<Self> {
        match collection.to_ascii_lowercase().as_str() {
            "kegg.compound" => Some(Self::LigandCompound),
            "seed.compound" => Some(Self::ModelSeed),
            "bigg.metabolite" => Some(Self::BiGG2),
            "metacyc.compound" => Some(Self::MetaCyc),
            _ => None,
        }
    }
}

impl fmt::Display for MetaboliteNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// External reaction databases a reaction may be resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ReactionNamespace {
    LigandReaction,
    Seed,
    BiGG,
    MetaCyc,
    ModelSeedReaction,
}

impl ReactionNamespace {
    /// Fixed processing order for reaction integration.
    pub const PRIORITY: [ReactionNamespace; 5] = [
        ReactionNamespace::LigandReaction,
        ReactionNamespace::Seed,
        ReactionNamespace::BiGG,
        ReactionNamespace::MetaCyc,
        ReactionNamespace::ModelSeedReaction,
    ];

    /// Compound namespaces whose references build signatures for this
    /// reaction namespace, in order of preference.
    pub fn compound_namespaces(&self) -> &'static [MetaboliteNamespace] {
        match self {
            Self::LigandReaction => &[MetaboliteNamespace::LigandCompound],
            Self::Seed => &[MetaboliteNamespace::Seed, MetaboliteNamespace::ModelSeed],
            Self::BiGG => &[MetaboliteNamespace::BiGG, MetaboliteNamespace::BiGG2],
            Self::MetaCyc => &[MetaboliteNamespace::MetaCyc],
            Self::ModelSeedReaction => &[MetaboliteNamespace::ModelSeed, MetaboliteNamespace::Seed],
        }
    }
}

impl fmt::Display for ReactionNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
