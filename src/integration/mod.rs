//! Species integration: engine orchestration and conflict resolution
//!
//! # Architecture
//!
//! - **IntegrationFacade**: owns the registered entities, runs the engine
//!   registry (upfront engines, then rounds) and produces the clean map
//! - **CandidatePool**: append-only store of every candidate, resolved into
//!   an [`IntegrationMap`] on demand with per-pair [`MatchDecision`]s
//! - **IntegrationMap / PropagatedMap**: scalar and set-valued results

mod facade;
mod map;
mod pool;
mod types;

pub use facade::IntegrationFacade;
pub use map::{IntegrationMap, PropagatedMap};
pub use pool::{CandidatePool, MatchDecision, Resolution, FIRST_CANDIDATE_POLICY};
pub use types::{IntegrationError, IntegrationResult};
