//! The versioned store: structurally-shared generations of handle → item.

use std::fmt;

use im::{HashMap, OrdMap};
use strata_core::{CacheError, CacheResult, ResultHandle};

use crate::item::CacheItem;

/// Hook fired synchronously when capacity pressure removes an entry from a
/// writable generation. The committing writer passes it into
/// [`VersionedStore::insert`]; it must tolerate reentering index
/// maintenance. The store itself never holds one, so frozen generations
/// stay freely shareable across reader threads.
pub type EvictHook = Box<dyn Fn(&ResultHandle, &CacheItem)>;

#[derive(Clone)]
struct Slot {
    /// Admission order; the oldest tick is evicted first.
    tick: u64,
    item: CacheItem,
}

/// One generation of the cache's handle → item mapping.
///
/// Generations are immutable once frozen and structurally shared:
/// [`clone_for_write`](VersionedStore::clone_for_write) is O(1) and the
/// writable clone diverges from its parent only where it is subsequently
/// written. Readers holding a frozen generation therefore never observe
/// partial mutation and need no synchronization with the writer.
pub struct VersionedStore {
    entries: HashMap<ResultHandle, Slot>,
    admission: OrdMap<u64, ResultHandle>,
    next_tick: u64,
    capacity: usize,
}

impl VersionedStore {
    /// An empty generation with the given entry capacity.
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            admission: OrdMap::new(),
            next_tick: 0,
            capacity,
        }
    }

    /// Point lookup of the item keyed under a handle.
    pub fn lookup(&self, handle: &ResultHandle) -> Option<&CacheItem> {
        self.entries.get(handle).map(|slot| &slot.item)
    }

    /// Number of keyed entries.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Visit every keyed entry in unspecified order.
    pub fn for_each(&self, mut visitor: impl FnMut(&ResultHandle, &CacheItem)) {
        for (handle, slot) in self.entries.iter() {
            visitor(handle, &slot.item);
        }
    }

    /// Begin an independently mutable generation sharing all unmodified
    /// structure with this one.
    pub fn clone_for_write(&self) -> VersionedStore {
        VersionedStore {
            entries: self.entries.clone(),
            admission: self.admission.clone(),
            next_tick: self.next_tick,
            capacity: self.capacity,
        }
    }

    /// Key an item under a handle, superseding any prior entry. New keys
    /// may evict the oldest entries to stay within capacity; evictions
    /// fire the hook synchronously before the insert takes effect.
    pub fn insert(
        &mut self,
        handle: ResultHandle,
        item: CacheItem,
        evict_hook: Option<&EvictHook>,
    ) -> CacheResult<()> {
        if let Some(prev) = self.entries.get(&handle) {
            // Replacement keeps the original admission tick.
            let tick = prev.tick;
            self.entries.insert(handle, Slot { tick, item });
            return Ok(());
        }

        self.make_room(evict_hook)?;
        let tick = self.next_tick;
        self.next_tick += 1;
        self.admission.insert(tick, handle.clone());
        self.entries.insert(handle, Slot { tick, item });
        Ok(())
    }

    /// Drop a handle's entry, returning the item that was keyed under it.
    /// Explicit removal does not fire the eviction hook.
    pub fn remove(&mut self, handle: &ResultHandle) -> Option<CacheItem> {
        let slot = self.entries.remove(handle)?;
        self.admission.remove(&slot.tick);
        Some(slot.item)
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.admission.clear();
    }

    fn make_room(&mut self, evict_hook: Option<&EvictHook>) -> CacheResult<()> {
        while self.entries.len() >= self.capacity {
            let oldest = self
                .admission
                .get_min()
                .map(|(tick, handle)| (*tick, handle.clone()));
            let Some((tick, handle)) = oldest else {
                return Err(CacheError::CapacityExhausted {
                    capacity: self.capacity,
                });
            };
            self.admission.remove(&tick);
            if let Some(slot) = self.entries.remove(&handle) {
                if let Some(hook) = evict_hook {
                    hook(&handle, &slot.item);
                }
            }
        }
        Ok(())
    }
}

impl fmt::Debug for VersionedStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VersionedStore")
            .field("count", &self.entries.len())
            .field("capacity", &self.capacity)
            .field("next_tick", &self.next_tick)
            .finish()
    }
}
