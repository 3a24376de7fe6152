//! Multi-match resolution informed by the database's own alias graph

use super::multi_match::MultiMatchResolver;
use super::traits::ConflictResolver;
use crate::biodb::{Biodb, CompoundRef};
use crate::model::MetaboliteNamespace;
use crate::normalize::fold;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Disambiguates with the aliases a database records for its entries.
///
/// In order: a candidate whose id or aliases match the entity's own id
/// (without prefix or compartment token); otherwise the candidates that are
/// not merely an alias of another candidate; otherwise the shortest-id
/// policy.
pub struct AliasMultiMatchResolver {
    biodb: Arc<Biodb>,
    namespace: MetaboliteNamespace,
}

impl AliasMultiMatchResolver {
    pub fn new(biodb: Arc<Biodb>, namespace: MetaboliteNamespace) -> Self {
        Self { biodb, namespace }
    }

    fn aliases(&self, id: &str) -> Option<&BTreeSet<String>> {
        self.biodb.aliases_of(&CompoundRef::new(self.namespace, id))
    }
}

impl ConflictResolver for AliasMultiMatchResolver {
    fn id(&self) -> &str {
        "alias-multi-match"
    }

    fn resolve(&self, entity: &str, candidates: &[String]) -> Option<String> {
        if candidates.len() == 1 {
            return candidates.first().cloned();
        }

        let keys = entity_keys(entity);
        let named: Vec<&String> = candidates
            .iter()
            .filter(|c| {
                keys.contains(&fold(c))
                    || self
                        .aliases(c)
                        .is_some_and(|aliases| !aliases.is_disjoint(&keys))
            })
            .collect();
        let pool: Vec<&String> = match named.len() {
            1 => return named.first().map(|c| c.to_string()),
            0 => candidates.iter().collect(),
            _ => named,
        };

        // Drop candidates that another candidate lists as its alias.
        let canonical: Vec<&String> = pool
            .iter()
            .copied()
            .filter(|c| {
                let folded = fold(c);
                !pool.iter().any(|other| {
                    other != c && self.aliases(other).is_some_and(|a| a.contains(&folded))
                })
            })
            .collect();
        let pool = if canonical.is_empty() { pool } else { canonical };

        MultiMatchResolver::pick(pool.iter().map(|c| c.as_str())).map(str::to_string)
    }
}

/// Folded forms of an entity id: as is, without its `m_`/`s_` prefix, and
/// without a short trailing compartment token.
fn entity_keys(entity: &str) -> BTreeSet<String> {
    let folded = fold(entity);
    let unprefixed = folded
        .strip_prefix("m_")
        .or_else(|| folded.strip_prefix("s_"))
        .unwrap_or(&folded)
        .to_string();
    let mut keys = BTreeSet::from([folded.clone(), unprefixed.clone()]);
    if let Some((head, tail)) = unprefixed.rsplit_once('_') {
        if !head.is_empty() && tail.len() <= 3 {
            keys.insert(head.to_string());
        }
    }
    keys.retain(|k| !k.is_empty());
    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biodb::{AliasEntry, ReferenceTables};
    use MetaboliteNamespace::BiGG2;

    fn resolver() -> AliasMultiMatchResolver {
        let biodb = Biodb::new(ReferenceTables {
            aliases: vec![
                AliasEntry {
                    namespace: BiGG2,
                    id: "glc__D".into(),
                    aliases: vec!["glc_DASH_D".into(), "glc_D".into()],
                },
                AliasEntry {
                    namespace: BiGG2,
                    id: "13dpg".into(),
                    aliases: vec!["dpg".into()],
                },
            ],
            ..Default::default()
        });
        AliasMultiMatchResolver::new(Arc::new(biodb), BiGG2)
    }

    fn ids(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_entity_keys() {
        let keys = entity_keys("M_glc_DASH_D_c");
        assert!(keys.contains("glc_dash_d"));
        assert!(!keys.contains("glc"));
    }

    #[test]
    fn test_single_candidate_passthrough() {
        assert_eq!(resolver().resolve("x", &ids(&["atp"])), Some("atp".into()));
    }

    #[test]
    fn test_alias_matches_entity_pattern() {
        // The entity id carries the old alias; the canonical entry wins over
        // a shorter unrelated candidate.
        let r = resolver();
        assert_eq!(
            r.resolve("M_glc_DASH_D_c", &ids(&["glc", "glc__D"])),
            Some("glc__D".into())
        );
    }

    #[test]
    fn test_alias_chain_collapses_to_canonical() {
        let r = resolver();
        assert_eq!(r.resolve("s_0001", &ids(&["dpg", "13dpg"])), Some("13dpg".into()));
    }

    #[test]
    fn test_falls_back_to_shortest() {
        let r = resolver();
        assert_eq!(r.resolve("s_0001", &ids(&["pyr_x", "pyr"])), Some("pyr".into()));
    }
}
