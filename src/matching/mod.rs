//! Match engines
//!
//! Each engine is an independent strategy proposing candidate
//! `(entity, namespace, external id)` triples. Engines never see each
//! other's output directly: the integration facade merges what they return
//! and decides what becomes visible to the next round.
//!
//! # Engines
//!
//! - **IdPatternEngine**: entity pattern sets against folded database ids
//! - **TrieIdEngine**: database ids embedded in raw species ids
//! - **DictionaryEngine**: curated model id → reference table
//! - **NameEngine**: normalized names (full or suffix-split) against database names
//! - **XmlReferencesEngine**: MIRIAM annotations carried by the imported record
//! - **ConnectedComponentsEngine**: references already resolved for class members
//! - **FirstDegreeReferencesEngine**: cross-reference graph neighbors

pub mod engines;
mod traits;
mod types;

pub use traits::{EngineRegistry, MatchEngine};
pub use types::{CandidateReference, EngineError, EntityRecord, MatchScope};
