//! Commit-time decisions over cached handles.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strata_core::{ResultHandle, UpdatableResult};

use crate::view::MutableCacheView;

/// What the reconciliation pass does with one cached handle.
///
/// The set is closed: call sites match it exhaustively, so an unhandled
/// decision is a compile error rather than a silent fallback to `Keep`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckDecision {
    /// The cached result is unaffected by the committing transaction.
    Keep,
    /// The result is invalidated outright; drop it from the cache.
    Remove,
    /// The result can absorb the transaction's changes incrementally.
    Update,
}

impl fmt::Display for CheckDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckDecision::Keep => write!(f, "keep"),
            CheckDecision::Remove => write!(f, "remove"),
            CheckDecision::Update => write!(f, "update"),
        }
    }
}

/// Decision source supplied by the committing transaction, built from the
/// mutations it recorded.
///
/// Decisions are assumed independent across handles: the pass visits
/// handles in arbitrary order and the final state must not depend on that
/// order, so implementations must not carry order-dependent side effects
/// between `decide` calls.
pub trait HandleChecker {
    /// Decide what to do with one cached handle. The view is the working
    /// state of the pass, useful for scoping via
    /// [`MutableCacheView::handles_dependent_on`].
    fn decide(&mut self, handle: &ResultHandle, cache: &MutableCacheView) -> CheckDecision;

    /// Apply the transaction's mutation onto the working copy. Invoked
    /// once per UPDATE decision, always with the pass's single shared
    /// copy.
    fn on_update(&mut self, handle: &ResultHandle, result: &Arc<dyn UpdatableResult>);
}
