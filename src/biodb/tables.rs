//! Reference table records and their lookup indexes

use super::trie::IdTrie;
use crate::model::{MetaboliteNamespace, ReactionNamespace};
use crate::normalize::fold;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A compound entry in one namespace.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CompoundRef {
    pub namespace: MetaboliteNamespace,
    pub id: String,
}

impl CompoundRef {
    pub fn new(namespace: MetaboliteNamespace, id: impl Into<String>) -> Self {
        Self {
            namespace,
            id: id.into(),
        }
    }
}

impl fmt::Display for CompoundRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundRecord {
    pub namespace: MetaboliteNamespace,
    pub id: String,
    #[serde(default)]
    pub names: Vec<String>,
}

/// Curated model id → reference assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    pub id: String,
    pub namespace: MetaboliteNamespace,
    pub reference: String,
}

/// Alternative ids a database itself records for one of its entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AliasEntry {
    pub namespace: MetaboliteNamespace,
    pub id: String,
    pub aliases: Vec<String>,
}

/// Cross-reference between two database entries. Links are undirected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossLink {
    pub from: CompoundRef,
    pub to: CompoundRef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionParticipant {
    pub compound: String,
    pub coefficient: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionRecord {
    pub namespace: ReactionNamespace,
    pub id: String,
    pub stoichiometry: Vec<ReactionParticipant>,
}

/// Raw reference tables as exported by the database service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceTables {
    pub compounds: Vec<CompoundRecord>,
    pub dictionary: Vec<DictionaryEntry>,
    pub aliases: Vec<AliasEntry>,
    pub links: Vec<CrossLink>,
    pub reactions: Vec<ReactionRecord>,
}

/// Indexed view over [`ReferenceTables`].
#[derive(Debug, Default)]
pub struct Biodb {
    ids: BTreeMap<String, BTreeSet<CompoundRef>>,
    trie: IdTrie<CompoundRef>,
    names: BTreeMap<String, BTreeSet<CompoundRef>>,
    dictionary: BTreeMap<String, BTreeSet<CompoundRef>>,
    aliases: BTreeMap<CompoundRef, BTreeSet<String>>,
    links: BTreeMap<CompoundRef, BTreeSet<CompoundRef>>,
    reactions: BTreeMap<ReactionNamespace, Vec<ReactionRecord>>,
}

impl Biodb {
    /// Build every lookup index from the raw tables.
    pub fn new(tables: ReferenceTables) -> Self {
        let mut db = Biodb::default();

        for record in tables.compounds {
            let reference = CompoundRef::new(record.namespace, record.id.trim());
            if reference.id.is_empty() {
                continue;
            }
            db.ids
                .entry(fold(&reference.id))
                .or_default()
                .insert(reference.clone());
            db.trie.insert(&reference.id, reference.clone());
            for name in &record.names {
                let key = fold(name);
                if !key.is_empty() {
                    db.names.entry(key).or_default().insert(reference.clone());
                }
            }
        }

        for entry in tables.dictionary {
            db.dictionary
                .entry(entry.id.trim().to_string())
                .or_default()
                .insert(CompoundRef::new(entry.namespace, entry.reference.trim()));
        }

        for entry in tables.aliases {
            db.aliases
                .entry(CompoundRef::new(entry.namespace, entry.id))
                .or_default()
                .extend(entry.aliases.iter().map(|a| fold(a)));
        }

        for link in tables.links {
            db.links
                .entry(link.from.clone())
                .or_default()
                .insert(link.to.clone());
            db.links.entry(link.to).or_default().insert(link.from);
        }

        for record in tables.reactions {
            db.reactions.entry(record.namespace).or_default().push(record);
        }

        db
    }

    /// Entries whose folded id equals `key`.
    pub fn by_id_key(&self, key: &str) -> impl Iterator<Item = &CompoundRef> {
        self.ids.get(key).into_iter().flatten()
    }

    /// Entries whose ids occur embedded in `text`.
    pub fn embedded_ids(&self, text: &str, min_len: usize) -> Vec<&CompoundRef> {
        self.trie.find_embedded(text, min_len)
    }

    /// Entries carrying a name whose folded form equals `key`.
    pub fn by_name_key(&self, key: &str) -> impl Iterator<Item = &CompoundRef> {
        self.names.get(key).into_iter().flatten()
    }

    /// Curated references for an exact model id.
    pub fn by_dictionary(&self, id: &str) -> impl Iterator<Item = &CompoundRef> {
        self.dictionary.get(id).into_iter().flatten()
    }

    /// Folded aliases the database records for an entry.
    pub fn aliases_of(&self, reference: &CompoundRef) -> Option<&BTreeSet<String>> {
        self.aliases.get(reference)
    }

    /// Entries at distance one in the cross-reference graph.
    pub fn neighbors(&self, reference: &CompoundRef) -> impl Iterator<Item = &CompoundRef> {
        self.links.get(reference).into_iter().flatten()
    }

    /// Reaction records of one namespace.
    pub fn reactions(&self, namespace: ReactionNamespace) -> &[ReactionRecord] {
        self.reactions
            .get(&namespace)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl From<ReferenceTables> for Biodb {
    fn from(tables: ReferenceTables) -> Self {
        Biodb::new(tables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use MetaboliteNamespace::*;

    fn tables() -> ReferenceTables {
        ReferenceTables {
            compounds: vec![
                CompoundRecord {
                    namespace: ModelSeed,
                    id: "cpd00027".into(),
                    names: vec!["D-Glucose".into()],
                },
                CompoundRecord {
                    namespace: BiGG2,
                    id: "glc__D".into(),
                    names: vec!["D-glucose".into()],
                },
            ],
            dictionary: vec![DictionaryEntry {
                id: "M_glc_D_c".into(),
                namespace: ModelSeed,
                reference: "cpd00027".into(),
            }],
            aliases: vec![AliasEntry {
                namespace: BiGG2,
                id: "glc__D".into(),
                aliases: vec!["glc_DASH_D".into()],
            }],
            links: vec![CrossLink {
                from: CompoundRef::new(ModelSeed, "cpd00027"),
                to: CompoundRef::new(LigandCompound, "C00031"),
            }],
            reactions: vec![],
        }
    }

    #[test]
    fn test_id_index_is_case_folded() {
        let db = Biodb::new(tables());
        let hits: Vec<_> = db.by_id_key("glc__d").collect();
        assert_eq!(hits, vec![&CompoundRef::new(BiGG2, "glc__D")]);
    }

    #[test]
    fn test_name_index_groups_namespaces() {
        let db = Biodb::new(tables());
        assert_eq!(db.by_name_key("d-glucose").count(), 2);
    }

    #[test]
    fn test_links_are_undirected() {
        let db = Biodb::new(tables());
        let back: Vec<_> = db
            .neighbors(&CompoundRef::new(LigandCompound, "C00031"))
            .collect();
        assert_eq!(back, vec![&CompoundRef::new(ModelSeed, "cpd00027")]);
    }

    #[test]
    fn test_aliases_folded() {
        let db = Biodb::new(tables());
        let aliases = db.aliases_of(&CompoundRef::new(BiGG2, "glc__D")).unwrap();
        assert!(aliases.contains("glc_dash_d"));
    }

    #[test]
    fn test_tables_deserialize_with_missing_sections() {
        let tables: ReferenceTables = serde_json::from_str(
            r#"{"compounds": [{"namespace": "ModelSeed", "id": "cpd00001"}]}"#,
        )
        .unwrap();
        assert_eq!(tables.compounds.len(), 1);
        assert!(tables.reactions.is_empty());
        let db = Biodb::new(tables);
        assert!(db.reactions(ReactionNamespace::Seed).is_empty());
    }
}
