//! Handles identifying cached query results.

use serde::{Deserialize, Serialize};

use crate::{EntityTypeId, LinkId};

/// Identifies a materialized query result and the relationship types the
/// result depends on.
///
/// Handles are value types: equality and hashing cover the full content,
/// and a handle is never mutated after construction. The link-id set is
/// normalized on construction (sorted, deduplicated), so two handles
/// describing the same query shape compare equal regardless of the order
/// their dependencies were declared in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResultHandle {
    entity_type: EntityTypeId,
    fingerprint: u64,
    link_ids: Box<[LinkId]>,
}

impl ResultHandle {
    /// Build a handle from the query's subject entity type, the
    /// fingerprint of its shape, and the link ids it depends on.
    pub fn new(
        entity_type: EntityTypeId,
        fingerprint: u64,
        link_ids: impl IntoIterator<Item = LinkId>,
    ) -> Self {
        let mut ids: Vec<LinkId> = link_ids.into_iter().collect();
        ids.sort_unstable();
        ids.dedup();
        Self {
            entity_type,
            fingerprint,
            link_ids: ids.into_boxed_slice(),
        }
    }

    /// The entity type this result ranges over.
    pub fn entity_type(&self) -> EntityTypeId {
        self.entity_type
    }

    /// Fingerprint of the query shape that produced the result.
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    /// Link ids whose relationship changes can invalidate this result.
    /// Always sorted and free of duplicates.
    pub fn link_ids(&self) -> &[LinkId] {
        &self.link_ids
    }

    /// Whether this result depends on the given link id.
    pub fn depends_on(&self, link_id: LinkId) -> bool {
        self.link_ids.binary_search(&link_id).is_ok()
    }
}
