//! Shortest-id policy for namespaces with legitimate one-to-many matches

use super::traits::ConflictResolver;

/// Prefers the shortest (most specific) external id; ties go to the
/// lexicographically smallest.
#[derive(Debug, Clone, Copy, Default)]
pub struct MultiMatchResolver;

impl MultiMatchResolver {
    /// The policy as a plain function, for callers outside the facade.
    pub fn pick<'a, I>(candidates: I) -> Option<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        candidates
            .into_iter()
            .min_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)))
    }
}

impl ConflictResolver for MultiMatchResolver {
    fn id(&self) -> &str {
        "multi-match"
    }

    fn resolve(&self, _entity: &str, candidates: &[String]) -> Option<String> {
        Self::pick(candidates.iter().map(String::as_str)).map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_shortest_wins() {
        let r = MultiMatchResolver;
        assert_eq!(
            r.resolve("e", &ids(&["cpd00027_a", "cpd00027", "cpd000270"])),
            Some("cpd00027".into())
        );
    }

    #[test]
    fn test_tie_lexicographic() {
        let r = MultiMatchResolver;
        assert_eq!(r.resolve("e", &ids(&["cpd02", "cpd01"])), Some("cpd01".into()));
    }

    #[test]
    fn test_idempotent() {
        let r = MultiMatchResolver;
        let c = ids(&["cpd00100", "cpd00099", "cpd0010"]);
        let first = r.resolve("e", &c);
        for _ in 0..5 {
            assert_eq!(r.resolve("e", &c), first);
        }
    }
}
