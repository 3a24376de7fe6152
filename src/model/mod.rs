//! Input records and reference database namespaces
//!
//! The model snapshot handed to the pipeline is already parsed: species and
//! reactions arrive as plain records, with whatever cross-reference
//! annotations the importer kept.

mod entity;
mod namespace;

pub use entity::{ModelSnapshot, Reaction, Reagent, Species};
pub use namespace::{MetaboliteNamespace, ReactionNamespace};
