//! Durable-log record contracts and the reserved null record.
//!
//! The durable append-only log frames typed records; only the contract and
//! the zero-payload sentinel live here. The sentinel pads the log where a
//! real record cannot go, so treating it as data is a defect, not a
//! runtime condition.

use std::sync::Arc;

use once_cell::sync::Lazy;

/// A record framed into the durable append-only log.
pub trait LogRecord: Send + Sync {
    /// Numeric tag identifying the record kind.
    fn type_tag(&self) -> u8;

    /// Payload bytes.
    fn data(&self) -> &[u8];

    /// Payload length in bytes.
    fn data_len(&self) -> usize;

    /// Total encoded length, tag byte included.
    fn encoded_len(&self) -> usize;
}

/// Reserved type tag of the null record.
pub const NULL_RECORD_TAG: u8 = 0;

/// Encoded length of the null record: the tag byte alone, no body.
pub const NULL_RECORD_LEN: usize = 1;

/// The reserved zero-payload record.
///
/// Accessing its payload panics: the null record never carries data, and a
/// caller reading it has confused padding for content. The record is
/// immutable and stateless, so a single shared instance serves all
/// occurrences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NullRecord;

static PROTOTYPE: Lazy<Arc<NullRecord>> = Lazy::new(|| Arc::new(NullRecord));

impl NullRecord {
    /// The shared singleton instance.
    pub fn get() -> Arc<NullRecord> {
        Arc::clone(&PROTOTYPE)
    }

    /// Whether a raw type tag denotes the null record.
    pub fn is_null_tag(tag: u8) -> bool {
        tag == NULL_RECORD_TAG
    }

    /// Whether an arbitrary record denotes the null record.
    pub fn is_null_record(record: &dyn LogRecord) -> bool {
        Self::is_null_tag(record.type_tag())
    }
}

impl LogRecord for NullRecord {
    fn type_tag(&self) -> u8 {
        NULL_RECORD_TAG
    }

    fn data(&self) -> &[u8] {
        panic!("null record carries no payload");
    }

    fn data_len(&self) -> usize {
        panic!("null record carries no payload");
    }

    fn encoded_len(&self) -> usize {
        NULL_RECORD_LEN
    }
}
