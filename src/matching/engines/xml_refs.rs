//! Cross-references embedded in the imported species records

use super::dedup;
use crate::matching::{CandidateReference, EngineError, MatchEngine, MatchScope};
use crate::normalize::parse_miriam;
use std::collections::BTreeMap;

/// Emits MIRIAM annotations carried by the imported species as candidates.
///
/// Runs second among the upfront engines, right after the curated
/// dictionary, so under the first-candidate policy only a dictionary hit
/// outranks an annotation.
pub struct XmlReferencesEngine {
    /// entity → annotation URIs
    annotations: BTreeMap<String, Vec<String>>,
}

impl XmlReferencesEngine {
    pub fn new(annotations: BTreeMap<String, Vec<String>>) -> Self {
        Self { annotations }
    }
}

impl MatchEngine for XmlReferencesEngine {
    fn id(&self) -> &str {
        "refs"
    }

    fn propose(&self, scope: &MatchScope<'_>) -> Result<Vec<CandidateReference>, EngineError> {
        let mut candidates = Vec::new();
        for (entity, uris) in &self.annotations {
            if !scope.contains(entity) {
                continue;
            }
            for uri in uris {
                match parse_miriam(uri) {
                    Some((namespace, id)) => {
                        candidates.push(CandidateReference::new(entity.as_str(), namespace, id, self.id()))
                    }
                    None => tracing::debug!(entity = %entity, uri = %uri, "unrecognized annotation"),
                }
            }
        }
        Ok(dedup(candidates))
    }
}
