//! Read-only facade over a frozen cache generation.

use std::fmt;
use std::sync::Arc;

use strata_core::{CacheResult, CachedResult, ResultHandle};

use crate::config::CacheConfig;
use crate::item::CacheItem;
use crate::store::VersionedStore;
use crate::view::MutableCacheView;

/// One frozen generation of the query-result cache.
///
/// Every running reader transaction holds one of these; it never mutates.
/// The committing writer derives a [`MutableCacheView`] from the published
/// adapter, works on a structurally-shared clone, and publishes a new
/// adapter on success. An adapter already held keeps returning exactly
/// what it returned before, for as long as it is held.
#[derive(Clone)]
pub struct CacheAdapter {
    store: Arc<VersionedStore>,
    config: CacheConfig,
}

impl CacheAdapter {
    /// The empty first generation.
    pub fn empty(config: CacheConfig) -> CacheResult<Self> {
        config.validate()?;
        let store = VersionedStore::new(config.capacity);
        Ok(Self {
            store: Arc::new(store),
            config,
        })
    }

    pub(crate) fn from_frozen(store: VersionedStore, config: CacheConfig) -> Self {
        Self {
            store: Arc::new(store),
            config,
        }
    }

    /// Resolve the result cached under a handle, if present and still
    /// computed.
    pub fn get(&self, handle: &ResultHandle) -> Option<Arc<dyn CachedResult>> {
        self.store.lookup(handle).and_then(CacheItem::get)
    }

    /// Whether a handle is keyed in this generation, computed or not.
    pub fn contains(&self, handle: &ResultHandle) -> bool {
        self.store.lookup(handle).is_some()
    }

    /// Number of keyed entries.
    pub fn len(&self) -> usize {
        self.store.count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Visit every keyed entry in unspecified order.
    pub fn for_each(&self, visitor: impl FnMut(&ResultHandle, &CacheItem)) {
        self.store.for_each(visitor);
    }

    /// Derive the committing transaction's writable view: a structure-
    /// sharing clone of this generation paired with a freshly built
    /// dependency index.
    pub fn begin_write(&self) -> MutableCacheView {
        MutableCacheView::from_adapter(self)
    }

    pub(crate) fn store(&self) -> &VersionedStore {
        &self.store
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }
}

impl fmt::Debug for CacheAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheAdapter")
            .field("len", &self.len())
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{handle, PlainResult};

    #[test]
    fn empty_adapter_has_no_entries() {
        let adapter = CacheAdapter::empty(CacheConfig::new()).expect("valid config");
        assert!(adapter.is_empty());
        assert!(adapter.get(&handle(1, &[3])).is_none());
    }

    #[test]
    fn empty_rejects_invalid_config() {
        let err = CacheAdapter::empty(CacheConfig::new().with_capacity(0)).unwrap_err();
        assert!(matches!(
            err,
            strata_core::CacheError::InvalidConfig { .. }
        ));
    }

    #[test]
    fn adapter_clone_shares_the_generation() {
        let mut view = CacheAdapter::empty(CacheConfig::new())
            .expect("valid config")
            .begin_write();
        let h = handle(1, &[3]);
        view.put(h.clone(), PlainResult::new()).expect("put");
        let adapter = view.finalize();

        let shared = adapter.clone();
        assert_eq!(adapter.len(), shared.len());
        assert!(shared.get(&h).is_some());
    }

    #[test]
    fn for_each_visits_every_entry() {
        let mut view = CacheAdapter::empty(CacheConfig::new())
            .expect("valid config")
            .begin_write();
        view.put(handle(1, &[3]), PlainResult::new()).expect("put");
        view.put(handle(2, &[7]), PlainResult::new()).expect("put");
        let adapter = view.finalize();

        let mut seen = 0;
        adapter.for_each(|_, _| seen += 1);
        assert_eq!(seen, 2);
    }

    #[test]
    fn adapter_is_shareable_across_reader_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CacheAdapter>();

        let mut view = CacheAdapter::empty(CacheConfig::new())
            .expect("valid config")
            .begin_write();
        let h = handle(1, &[3]);
        view.put(h.clone(), PlainResult::new()).expect("put");
        let adapter = view.finalize();

        let reader = adapter.clone();
        let found = std::thread::spawn(move || reader.get(&h).is_some())
            .join()
            .expect("reader thread");
        assert!(found);
        assert_eq!(adapter.len(), 1);
    }
}
