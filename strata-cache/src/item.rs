//! Payload slots: strong or weak retention of cached results.

use std::sync::{Arc, Weak};

use strata_core::CachedResult;

/// The payload stored under a handle.
///
/// An item may hold its result strongly, pinning it for the lifetime of
/// the generation, or weakly, letting the rest of the system drop a large
/// result while the key stays resident. A reclaimed item resolves to
/// `None`: the result is logically "no longer computed" even though the
/// handle is still keyed.
#[derive(Debug, Clone)]
pub enum CacheItem {
    /// Pinned payload.
    Strong(Arc<dyn CachedResult>),
    /// Reclaimable payload.
    Weak(Weak<dyn CachedResult>),
}

impl CacheItem {
    /// Wrap a result according to the retention policy.
    pub fn new(result: Arc<dyn CachedResult>, weak: bool) -> Self {
        if weak {
            CacheItem::Weak(Arc::downgrade(&result))
        } else {
            CacheItem::Strong(result)
        }
    }

    /// Resolve the payload, if it is still computed.
    pub fn get(&self) -> Option<Arc<dyn CachedResult>> {
        match self {
            CacheItem::Strong(result) => Some(Arc::clone(result)),
            CacheItem::Weak(result) => result.upgrade(),
        }
    }

    /// True if the payload has been reclaimed.
    pub fn is_reclaimed(&self) -> bool {
        self.get().is_none()
    }
}
