//! Strata Core - value types and contracts for the Strata entity store.
//!
//! Pure data structures with no storage behavior. The cache crate and the
//! surrounding store machinery depend on this; it depends on nothing of
//! theirs.

pub mod error;
pub mod handle;
pub mod record;
pub mod result;

pub use error::{CacheError, CacheResult};
pub use handle::ResultHandle;
pub use record::{LogRecord, NullRecord, NULL_RECORD_LEN, NULL_RECORD_TAG};
pub use result::{CachedResult, UpdatableResult};

/// Identifier of a relationship (link) type. A cached result depends on a
/// link id when a change to relationships of that type could invalidate it.
pub type LinkId = u32;

/// Identifier of an entity type.
pub type EntityTypeId = i32;
