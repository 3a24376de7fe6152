//! Identifier normalization
//!
//! Raw species names and ids are never compared directly. Every engine looks
//! them up through comparison keys derived here: case-folded, trimmed, with
//! SBML prefixes and compartment suffixes stripped.

use crate::model::MetaboliteNamespace;
use std::collections::BTreeSet;

/// Pluggable derivation of a name comparison key.
///
/// The name engine is parameterized by a strategy so the same lookup logic
/// serves both full names and suffix-stripped names.
pub trait NameKeyStrategy: Send + Sync {
    /// Short label used in engine ids and logs.
    fn label(&self) -> &str;

    /// Derive the comparison key for a raw species name, if it has one.
    fn key(&self, raw: &str) -> Option<String>;
}

/// Full-name key: trimmed and lower-cased.
///
/// Names starting `m_` lose everything from their last `_`, then the `m_`
/// prefix if one is still there, and the remaining underscores become
/// dashes.
pub struct FullName;

impl NameKeyStrategy for FullName {
    fn label(&self) -> &str {
        "name"
    }

    fn key(&self, raw: &str) -> Option<String> {
        let mut t = fold(raw);
        if t.is_empty() {
            return None;
        }
        if t.starts_with("m_") {
            // The trailing suffix goes first, so `m_atp` keeps only `m`.
            if let Some(i) = t.rfind('_') {
                t.truncate(i);
            }
            if let Some(rest) = t.strip_prefix("m_") {
                t = rest.to_string();
            }
            t = t.replace('_', "-");
        }
        if t.is_empty() {
            None
        } else {
            Some(t)
        }
    }
}

/// Split-name key: the folded name up to its last `_`.
///
/// Catches compartment and isoform suffixes that defeat exact matching.
pub struct SplitName;

impl NameKeyStrategy for SplitName {
    fn label(&self) -> &str {
        "nameSplit"
    }

    fn key(&self, raw: &str) -> Option<String> {
        let t = fold(raw);
        let head = t[..t.rfind('_')?].trim();
        if head.is_empty() {
            None
        } else {
            Some(head.to_string())
        }
    }
}

/// Trim and lower-case.
pub fn fold(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Derive the pattern set of a species id.
///
/// Variants: the folded id, the id without its `m_`/`s_` prefix, the id
/// without its compartment suffix, double underscores as dashes (the BiGG
/// `glc__D` ↔ `glc-D` convention), and the leading underscore-delimited token.
pub fn id_patterns(id: &str, compartment: Option<&str>) -> BTreeSet<String> {
    let mut patterns = BTreeSet::new();
    let folded = fold(id);
    if folded.is_empty() {
        return patterns;
    }
    patterns.insert(folded.clone());

    let unprefixed = folded
        .strip_prefix("m_")
        .or_else(|| folded.strip_prefix("s_"))
        .unwrap_or(&folded)
        .to_string();
    patterns.insert(unprefixed.clone());

    let mut core = unprefixed;
    if let Some(cmp) = compartment.map(fold).filter(|c| !c.is_empty()) {
        let bare = cmp.strip_prefix("c_").unwrap_or(&cmp).to_string();
        for suffix in [format!("_{}", cmp), format!("_{}", bare)] {
            if let Some(stripped) = core.strip_suffix(suffix.as_str()) {
                if !stripped.is_empty() {
                    core = stripped.to_string();
                    break;
                }
            }
        }
    }
    patterns.insert(core.clone());
    if core.contains("__") {
        patterns.insert(core.replace("__", "-"));
    }
    if let Some(head) = core.split('_').next() {
        if head.len() >= 3 {
            patterns.insert(head.to_string());
        }
    }

    patterns.retain(|p| !p.is_empty());
    patterns
}

/// Parse a MIRIAM cross-reference into a namespace and external id.
///
/// Accepts `http(s)://identifiers.org/<collection>/<id>` and
/// `urn:miriam:<collection>:<id>`. Unknown collections yield `None`.
pub fn parse_miriam(uri: &str) -> Option<(MetaboliteNamespace, String)> {
    let uri = uri.trim();
    let (collection, id) = if let Some(rest) = uri.strip_prefix("urn:miriam:") {
        rest.split_once(':')?
    } else {
        let rest = uri
            .strip_prefix("https://identifiers.org/")
            .or_else(|| uri.strip_prefix("http://identifiers.org/"))?;
        rest.split_once('/')?
    };
    let namespace = MetaboliteNamespace::from_miriam_collection(collection)?;
    let id = id.trim();
    if id.is_empty() {
        return None;
    }
    // URN form percent-encodes ':' in ids such as `META:GLC`
    Some((namespace, id.replace("%3A", ":")))
}
