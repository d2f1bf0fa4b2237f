//! Transactional query-result cache validation for the Strata entity store.
//!
//! Queries over entities and links evaluate into materialized result sets
//! that are expensive to recompute, so results are cached under handles
//! derived from the query shape. The store admits one committing writer at
//! a time alongside any number of concurrent readers; this crate keeps
//! every in-flight reader on a consistent frozen generation while the
//! writer validates and mutates a structurally-shared working copy.
//!
//! # Commit flow
//!
//! 1. take the currently published [`CacheAdapter`];
//! 2. derive a [`MutableCacheView`] from it with
//!    [`CacheAdapter::begin_write`] (structure-sharing clone plus a
//!    rebuilt dependency index);
//! 3. run [`MutableCacheView::reconcile`] with a [`HandleChecker`] built
//!    from the transaction's recorded mutations;
//! 4. on success, [`MutableCacheView::finalize`] into the next published
//!    adapter.
//!
//! Readers still holding the old adapter observe none of this. If any step
//! fails, the view is dropped and the old adapter stays published: at
//! worst an entry goes uncached and is recomputed, never returned stale.

pub mod adapter;
pub mod checker;
pub mod config;
pub mod index;
pub mod item;
mod store;
pub mod view;

pub use adapter::CacheAdapter;
pub use checker::{CheckDecision, HandleChecker};
pub use config::CacheConfig;
pub use index::DependencyIndex;
pub use item::CacheItem;
pub use view::MutableCacheView;

#[cfg(test)]
pub(crate) mod test_support;
