//! Shared fixtures for cache tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use strata_core::{CachedResult, EntityTypeId, LinkId, ResultHandle, UpdatableResult};

use crate::checker::{CheckDecision, HandleChecker};
use crate::view::MutableCacheView;

/// Handle over entity type 1 with the given fingerprint and link ids.
pub(crate) fn handle(fingerprint: u64, link_ids: &[LinkId]) -> ResultHandle {
    ResultHandle::new(1, fingerprint, link_ids.iter().copied())
}

/// Plain immutable result without the updatable capability.
#[derive(Debug)]
pub(crate) struct PlainResult {
    entity_type: EntityTypeId,
}

impl PlainResult {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self { entity_type: 1 })
    }
}

impl CachedResult for PlainResult {
    fn entity_type(&self) -> EntityTypeId {
        self.entity_type
    }
}

/// Shared counter observing how often a result lineage was copied.
#[derive(Debug, Clone)]
pub(crate) struct CopyCounter(Arc<AtomicUsize>);

impl CopyCounter {
    pub(crate) fn get(&self) -> usize {
        self.0.load(Ordering::Relaxed)
    }
}

/// Updatable result that counts copies across its whole copy lineage.
#[derive(Debug)]
pub(crate) struct CountingResult {
    entity_type: EntityTypeId,
    version: u64,
    mutated: AtomicBool,
    copies: Arc<AtomicUsize>,
}

impl CountingResult {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            entity_type: 1,
            version: 0,
            mutated: AtomicBool::new(false),
            copies: Arc::new(AtomicUsize::new(0)),
        })
    }

    pub(crate) fn copy_count(&self) -> CopyCounter {
        CopyCounter(Arc::clone(&self.copies))
    }
}

impl CachedResult for CountingResult {
    fn entity_type(&self) -> EntityTypeId {
        self.entity_type
    }

    fn as_updatable(self: Arc<Self>) -> Option<Arc<dyn UpdatableResult>> {
        Some(self)
    }
}

impl UpdatableResult for CountingResult {
    fn is_mutated(&self) -> bool {
        self.mutated.load(Ordering::Relaxed)
    }

    fn begin_update(self: Arc<Self>) -> Arc<dyn UpdatableResult> {
        self.copies.fetch_add(1, Ordering::Relaxed);
        Arc::new(CountingResult {
            entity_type: self.entity_type,
            version: self.version + 1,
            mutated: AtomicBool::new(true),
            copies: Arc::clone(&self.copies),
        })
    }

    fn end_update(&self) {
        self.mutated.store(false, Ordering::Relaxed);
    }

    fn as_cached(self: Arc<Self>) -> Arc<dyn CachedResult> {
        self
    }
}

/// Checker driven by a fixed handle → decision table; undecided handles
/// are kept. Records every `on_update` invocation for assertions.
pub(crate) struct ScriptedChecker {
    decisions: HashMap<ResultHandle, CheckDecision>,
    updates: Vec<(ResultHandle, Arc<dyn UpdatableResult>)>,
}

impl ScriptedChecker {
    pub(crate) fn new(decisions: impl IntoIterator<Item = (ResultHandle, CheckDecision)>) -> Self {
        Self {
            decisions: decisions.into_iter().collect(),
            updates: Vec::new(),
        }
    }

    pub(crate) fn updates(&self) -> &[(ResultHandle, Arc<dyn UpdatableResult>)] {
        &self.updates
    }
}

impl HandleChecker for ScriptedChecker {
    fn decide(&mut self, handle: &ResultHandle, _cache: &MutableCacheView) -> CheckDecision {
        self.decisions
            .get(handle)
            .copied()
            .unwrap_or(CheckDecision::Keep)
    }

    fn on_update(&mut self, handle: &ResultHandle, result: &Arc<dyn UpdatableResult>) {
        self.updates.push((handle.clone(), Arc::clone(result)));
    }
}
