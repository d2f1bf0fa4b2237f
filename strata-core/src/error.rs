//! Error types for Strata cache operations.

use thiserror::Error;

use crate::handle::ResultHandle;

/// Cache-validation subsystem errors.
///
/// Any of these surfacing during a reconciliation pass or finalize aborts
/// the owning commit; the previously frozen generation stays published, so
/// readers never observe partial state.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CacheError {
    /// The checker decided UPDATE for a payload that does not implement
    /// the updatable capability. A checker/payload mismatch is an
    /// implementer defect.
    #[error("cached result for handle {handle:?} does not support incremental update")]
    NotUpdatable { handle: ResultHandle },

    /// The store could not admit an entry even after evicting everything
    /// it was allowed to evict.
    #[error("cache capacity exhausted (capacity {capacity})")]
    CapacityExhausted { capacity: usize },

    /// Rejected cache configuration.
    #[error("invalid cache config: {reason}")]
    InvalidConfig { reason: String },
}

/// Result type alias for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;
