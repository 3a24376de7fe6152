//! Conflict resolvers
//!
//! Match engines may propose several external ids for one entity and
//! namespace. A per-namespace [`ConflictResolver`] picks one (or none); an
//! [`EntityConflictResolver`] then arbitrates across entities.

mod alias;
mod boundary;
mod multi_match;
mod traits;

pub use alias::AliasMultiMatchResolver;
pub use boundary::BoundaryConflictResolver;
pub use multi_match::MultiMatchResolver;
pub use traits::{ConflictResolver, EntityConflictResolver, ResolverRegistry};
