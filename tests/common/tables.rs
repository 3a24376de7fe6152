//! Reference table builders

use metlink::biodb::{CompoundRecord, CrossLink, ReactionParticipant, ReactionRecord, ReferenceTables};
use metlink::{CompoundRef, MetaboliteNamespace, ReactionNamespace};

pub fn compound(namespace: MetaboliteNamespace, id: &str, names: &[&str]) -> CompoundRecord {
    CompoundRecord {
        namespace,
        id: id.to_string(),
        names: names.iter().map(|n| n.to_string()).collect(),
    }
}

fn participants(parts: &[(&str, f64)]) -> Vec<ReactionParticipant> {
    parts
        .iter()
        .map(|(compound, coefficient)| ReactionParticipant {
            compound: compound.to_string(),
            coefficient: *coefficient,
        })
        .collect()
}

/// Tables for glucose, glucose-6-phosphate, ATP and ADP.
pub fn reference_tables() -> ReferenceTables {
    use MetaboliteNamespace::*;

    ReferenceTables {
        compounds: vec![
            compound(ModelSeed, "cpd00027", &["D-Glucose"]),
            compound(ModelSeed, "cpd00079", &["D-Glucose-6-phosphate"]),
            compound(ModelSeed, "cpd00002", &["ATP"]),
            compound(ModelSeed, "cpd00008", &["ADP"]),
            compound(BiGG2, "glc__D", &[]),
            compound(BiGG2, "g6p", &[]),
            compound(LigandCompound, "C00031", &[]),
        ],
        links: vec![CrossLink {
            from: CompoundRef::new(ModelSeed, "cpd00027"),
            to: CompoundRef::new(LigandCompound, "C00031"),
        }],
        reactions: vec![ReactionRecord {
            namespace: ReactionNamespace::ModelSeedReaction,
            id: "rxn00216".to_string(),
            stoichiometry: participants(&[
                ("cpd00027", -1.0),
                ("cpd00002", -1.0),
                ("cpd00079", 1.0),
                ("cpd00008", 1.0),
            ]),
        }],
        ..Default::default()
    }
}
