//! Metlink: identifier integration for imported metabolic models
//!
//! Species of an imported model carry ad hoc ids and names. Metlink maps
//! them onto external database references by running several independent
//! match engines, settling disagreements with pluggable conflict resolvers,
//! and sharing references across curated equivalence classes. Reactions are
//! then matched by their stoichiometric signature.
//!
//! # Core Concepts
//!
//! - **Match engines**: strategies proposing `(species, namespace, id)` candidates
//! - **Resolvers**: per-namespace and cross-species conflict policies
//! - **Connected components**: curated equivalence classes of identifiers
//! - **Propagation**: class members share references; disagreement stays visible
//!
//! # Example
//!
//! ```
//! use metlink::{Biodb, ConnectedComponents, ModelIntegration, ReferenceTables, Species};
//! use std::sync::Arc;
//!
//! let biodb = Arc::new(Biodb::new(ReferenceTables::default()));
//! let integration = ModelIntegration::new(biodb, Arc::new(ConnectedComponents::new()));
//! let result = integration.integrate(&[Species::new("M_glc__D_c")], &[]);
//! assert!(result.clean.is_empty());
//! ```

pub mod biodb;
pub mod components;
pub mod config;
pub mod integration;
pub mod matching;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod propagation;
pub mod reaction;
pub mod resolver;

pub use biodb::{Biodb, CompoundRef, ReferenceTables};
pub use components::{ComponentsError, ConnectedComponents, LoadStats};
pub use config::IntegrationConfig;
pub use integration::{
    IntegrationError, IntegrationFacade, IntegrationMap, IntegrationResult, MatchDecision, PropagatedMap,
};
pub use matching::{CandidateReference, EngineError, EngineRegistry, MatchEngine, MatchScope};
pub use model::{MetaboliteNamespace, ModelSnapshot, Reaction, ReactionNamespace, Reagent, Species};
pub use pipeline::{integrate, IntegrationReport, MappingResult, ModelIntegration};
pub use propagation::ReferencePropagation;
pub use reaction::{ReactionIntegration, ReactionSignatureIndex, Signature};
pub use resolver::{ConflictResolver, EntityConflictResolver, ResolverRegistry};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
