//! The committing transaction's writable cache view.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use strata_core::{CacheError, CacheResult, CachedResult, LinkId, ResultHandle, UpdatableResult};

use crate::adapter::CacheAdapter;
use crate::checker::{CheckDecision, HandleChecker};
use crate::config::CacheConfig;
use crate::index::DependencyIndex;
use crate::item::CacheItem;
use crate::store::{EvictHook, VersionedStore};

/// The single committing writer's view over the cache: one writable
/// generation paired with its dependency index.
///
/// The pair always moves as a unit. Every mutation that touches the
/// generation touches the index in the same call, including the capacity
/// evictions the store performs on its own, which reach the index through
/// the hook the view passes into every insert. All of this happens on the
/// committing transaction's thread of control; the `Rc<RefCell<..>>`
/// exists for the hook's reentrant access, not for cross-thread sharing.
pub struct MutableCacheView {
    store: VersionedStore,
    index: Rc<RefCell<DependencyIndex>>,
    evict_hook: EvictHook,
    config: CacheConfig,
}

impl MutableCacheView {
    pub(crate) fn from_adapter(adapter: &CacheAdapter) -> Self {
        let index = Rc::new(RefCell::new(DependencyIndex::build(adapter.store())));
        let hook_index = Rc::clone(&index);
        Self {
            store: adapter.store().clone_for_write(),
            index,
            evict_hook: Box::new(move |handle, _item| {
                hook_index.borrow_mut().remove(handle);
            }),
            config: adapter.config().clone(),
        }
    }

    /// Cache a result under a handle, superseding any prior entry. A
    /// previous payload still held elsewhere is unaffected: the
    /// generation diverges, it is never edited in place.
    pub fn put(&mut self, handle: ResultHandle, result: Arc<dyn CachedResult>) -> CacheResult<()> {
        let item = CacheItem::new(result, self.config.weak_results);
        self.put_item(handle, item)
    }

    fn put_item(&mut self, handle: ResultHandle, item: CacheItem) -> CacheResult<()> {
        self.store
            .insert(handle.clone(), item, Some(&self.evict_hook))?;
        self.index.borrow_mut().add(&handle);
        Ok(())
    }

    /// Drop a handle from the generation and the index together.
    pub fn evict(&mut self, handle: &ResultHandle) -> Option<CacheItem> {
        let item = self.store.remove(handle);
        self.index.borrow_mut().remove(handle);
        item
    }

    /// Drop everything from the generation and the index together.
    pub fn clear(&mut self) {
        self.store.clear();
        self.index.borrow_mut().clear();
    }

    /// Resolve the result cached under a handle, if present and still
    /// computed.
    pub fn get(&self, handle: &ResultHandle) -> Option<Arc<dyn CachedResult>> {
        self.store.lookup(handle).and_then(CacheItem::get)
    }

    /// Whether a handle is keyed in this view, computed or not.
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

    /// Handles whose cached results depend on the given link id. Checkers
    /// use this to scope their decisions to the relationships their
    /// transaction actually touched.
    pub fn handles_dependent_on(&self, link_id: LinkId) -> Vec<ResultHandle> {
        self.index.borrow().handles_for(link_id).cloned().collect()
    }

    /// Run one commit-time reconciliation pass.
    ///
    /// Visits every handle present when the pass starts (a defensive copy
    /// of the key set; the pass itself removes and replaces entries) and
    /// applies the checker's decision to each. Every freshly copied
    /// updatable result is appended to `mutated`; repeated UPDATE
    /// decisions against one handle, within this pass or a later pass of
    /// the same commit, coalesce onto that single copy.
    ///
    /// Any error abandons the pass. The caller must then drop this view
    /// without finalizing, leaving the previously published generation as
    /// the effective cache.
    pub fn reconcile(
        &mut self,
        checker: &mut dyn HandleChecker,
        mutated: &mut Vec<Arc<dyn UpdatableResult>>,
    ) -> CacheResult<()> {
        let mut snapshot = Vec::with_capacity(self.store.count());
        self.store.for_each(|handle, _| snapshot.push(handle.clone()));
        self.reconcile_handles(snapshot, checker, mutated)
    }

    pub(crate) fn reconcile_handles(
        &mut self,
        handles: Vec<ResultHandle>,
        checker: &mut dyn HandleChecker,
        mutated: &mut Vec<Arc<dyn UpdatableResult>>,
    ) -> CacheResult<()> {
        for handle in handles {
            self.check_handle(&handle, checker, mutated)?;
        }
        Ok(())
    }

    fn check_handle(
        &mut self,
        handle: &ResultHandle,
        checker: &mut dyn HandleChecker,
        mutated: &mut Vec<Arc<dyn UpdatableResult>>,
    ) -> CacheResult<()> {
        match checker.decide(handle, self) {
            CheckDecision::Keep => {}
            CheckDecision::Remove => {
                self.evict(handle);
            }
            CheckDecision::Update => {
                // Evicted or reclaimed between decision and fetch: a
                // transient miss, skipped without error.
                let Some(current) = self.get(handle) else {
                    return Ok(());
                };
                let updatable = current.as_updatable().ok_or_else(|| CacheError::NotUpdatable {
                    handle: handle.clone(),
                })?;
                let working = if updatable.is_mutated() {
                    updatable
                } else {
                    let copy = updatable.begin_update();
                    // Re-keying the same handle leaves its index
                    // membership untouched.
                    let item = CacheItem::new(
                        Arc::clone(&copy).as_cached(),
                        self.config.weak_results,
                    );
                    self.put_item(handle.clone(), item)?;
                    mutated.push(Arc::clone(&copy));
                    copy
                };
                checker.on_update(handle, &working);
            }
        }
        Ok(())
    }

    /// Freeze the generation into the next published adapter. This is the
    /// sole publication point; the index and the eviction hook are
    /// transaction-local and die here, and the next writer builds its own.
    pub fn finalize(self) -> CacheAdapter {
        CacheAdapter::from_frozen(self.store, self.config)
    }

    #[cfg(test)]
    pub(crate) fn index(&self) -> std::cell::Ref<'_, DependencyIndex> {
        self.index.borrow()
    }
}

impl fmt::Debug for MutableCacheView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutableCacheView")
            .field("len", &self.len())
            .field("config", &self.config)
            .finish()
    }
}
