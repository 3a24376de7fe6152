//! Shared fixtures for pipeline integration tests
//!
//! A small glycolysis fragment: reference tables covering glucose, its
//! phosphate and the ATP/ADP pair, plus model species and reactions that
//! reach them through names, ids and annotations.

pub mod curation;
pub mod model;
pub mod tables;

pub use curation::{curation_file, CurationFile};
pub use model::{hexokinase, hexokinase_extracellular, species};
pub use tables::{compound, reference_tables};
