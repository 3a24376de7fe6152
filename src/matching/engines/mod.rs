//! Built-in match engines

mod connected;
mod dictionary;
mod first_degree;
mod id_pattern;
mod name;
mod trie;
mod xml_refs;

pub use connected::ConnectedComponentsEngine;
pub use dictionary::DictionaryEngine;
pub use first_degree::FirstDegreeReferencesEngine;
pub use id_pattern::IdPatternEngine;
pub use name::NameEngine;
pub use trie::{TrieIdEngine, DEFAULT_MIN_MATCH_LEN};
pub use xml_refs::XmlReferencesEngine;

use super::types::CandidateReference;
use std::collections::HashSet;

/// Drop repeated `(entity, namespace, external id)` triples, keeping first occurrences.
fn dedup(candidates: Vec<CandidateReference>) -> Vec<CandidateReference> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|c| seen.insert((c.entity.clone(), c.namespace, c.external_id.clone())))
        .collect()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::biodb::{Biodb, CompoundRecord, CompoundRef, CrossLink, DictionaryEntry, ReferenceTables};
    use crate::integration::IntegrationMap;
    use crate::matching::EntityRecord;
    use crate::model::MetaboliteNamespace::{self, *};
    use crate::normalize::id_patterns;
    use std::collections::BTreeMap;
    use std::sync::Arc;

    pub fn biodb() -> Arc<Biodb> {
        let compound = |namespace, id: &str, names: &[&str]| CompoundRecord {
            namespace,
            id: id.to_string(),
            names: names.iter().map(|n| n.to_string()).collect(),
        };
        Arc::new(Biodb::new(ReferenceTables {
            compounds: vec![
                compound(ModelSeed, "cpd00027", &["D-Glucose"]),
                compound(ModelSeed, "cpd00002", &["ATP"]),
                compound(BiGG2, "glc__D", &["D-Glucose"]),
                compound(BiGG2, "atp", &["ATP"]),
                compound(LigandCompound, "C00031", &["D-Glucose"]),
            ],
            dictionary: vec![DictionaryEntry {
                id: "M_udpg_c".into(),
                namespace: ModelSeed,
                reference: "cpd00026".into(),
            }],
            aliases: vec![],
            links: vec![CrossLink {
                from: CompoundRef::new(ModelSeed, "cpd00027"),
                to: CompoundRef::new(LigandCompound, "C00031"),
            }],
            reactions: vec![],
        }))
    }

    pub fn entities(ids: &[(&str, &str)]) -> BTreeMap<String, EntityRecord> {
        ids.iter()
            .map(|(id, cmp)| {
                (
                    id.to_string(),
                    EntityRecord {
                        compartment: Some(cmp.to_string()),
                        patterns: id_patterns(id, Some(cmp)),
                    },
                )
            })
            .collect()
    }

    pub fn empty_map() -> IntegrationMap<MetaboliteNamespace> {
        IntegrationMap::new()
    }
}
