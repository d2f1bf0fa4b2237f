//! Contracts for cached query results.

use std::fmt;
use std::sync::Arc;

use crate::EntityTypeId;

/// An immutable, materialized query result held by the cache.
///
/// Results are shared between the cache and any number of concurrently
/// running reader transactions, so the contract exposes read-only metadata
/// only. The evaluation engine that produces results lives outside this
/// crate.
pub trait CachedResult: fmt::Debug + Send + Sync {
    /// The entity type the result ranges over. Checkers use this to decide
    /// whether a committing transaction's changes are relevant.
    fn entity_type(&self) -> EntityTypeId;

    /// Reinterpret as an updatable result, if the payload supports
    /// incremental updates. The default is no: plain results can only be
    /// kept or removed.
    fn as_updatable(self: Arc<Self>) -> Option<Arc<dyn UpdatableResult>> {
        None
    }
}

/// A cached result that can absorb a committing transaction's changes via
/// copy-on-write.
///
/// The mutation flag ("already copied this pass") lives on the copy, never
/// on shared state: [`begin_update`](UpdatableResult::begin_update) returns
/// a fresh instance with the flag raised and leaves the source untouched,
/// so readers still holding the original observe the pre-update value.
pub trait UpdatableResult: CachedResult {
    /// True if this instance is the current pass's working copy.
    fn is_mutated(&self) -> bool;

    /// Produce an independent copy flagged as mutated. The reconciliation
    /// pass calls this at most once per handle; repeated UPDATE decisions
    /// coalesce onto the one copy.
    fn begin_update(self: Arc<Self>) -> Arc<dyn UpdatableResult>;

    /// Lower the mutation flag once the owning commit has applied all of
    /// its changes to the copy.
    fn end_update(&self);

    /// Upcast to the plain cached-result contract for storage.
    /// Implementations return `self`.
    fn as_cached(self: Arc<Self>) -> Arc<dyn CachedResult>;
}
