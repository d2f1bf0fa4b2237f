//! Reverse index from link ids to dependent cached handles.

use std::collections::{HashMap, HashSet};

use strata_core::{LinkId, ResultHandle};

use crate::store::VersionedStore;

/// Transaction-local mapping from a relationship type to the cached
/// handles whose results depend on it.
///
/// Derived data, never authoritative: the index is always reconstructible
/// from the generation's contents via each handle's link-id set. It is
/// built once when a mutable view is created, kept incrementally
/// consistent by every view mutation and capacity eviction, and discarded
/// when the view finalizes. It is never persisted or shared across
/// commits.
#[derive(Debug, Default)]
pub struct DependencyIndex {
    by_link: HashMap<LinkId, HashSet<ResultHandle>>,
}

impl DependencyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full scan of a generation. Entries whose payload has already been
    /// reclaimed are skipped; they cannot satisfy a lookup anyway.
    pub(crate) fn build(store: &VersionedStore) -> Self {
        let mut index = Self::default();
        store.for_each(|handle, item| {
            if !item.is_reclaimed() {
                index.add(handle);
            }
        });
        index
    }

    /// Register a handle under every link id it depends on.
    pub fn add(&mut self, handle: &ResultHandle) {
        for link_id in handle.link_ids() {
            self.by_link
                .entry(*link_id)
                .or_default()
                .insert(handle.clone());
        }
    }

    /// Unregister a handle from every link id it depends on. Empty
    /// buckets may linger; membership queries cannot tell the difference.
    pub fn remove(&mut self, handle: &ResultHandle) {
        for link_id in handle.link_ids() {
            if let Some(handles) = self.by_link.get_mut(link_id) {
                handles.remove(handle);
            }
        }
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.by_link.clear();
    }

    /// Handles whose cached results depend on the given link id.
    pub fn handles_for(&self, link_id: LinkId) -> impl Iterator<Item = &ResultHandle> {
        self.by_link.get(&link_id).into_iter().flatten()
    }

    /// Link ids with at least one registered bucket (possibly empty).
    pub fn link_ids(&self) -> impl Iterator<Item = LinkId> + '_ {
        self.by_link.keys().copied()
    }
}
