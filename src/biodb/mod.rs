//! Read-only reference data from the external biological databases
//!
//! The tables are supplied by the database service as plain records and
//! indexed once per process into [`Biodb`]. Nothing in a run mutates them.

mod tables;
mod trie;

pub use tables::{
    AliasEntry, Biodb, CompoundRecord, CompoundRef, CrossLink, DictionaryEntry, ReactionParticipant,
    ReactionRecord, ReferenceTables,
};
pub use trie::IdTrie;
