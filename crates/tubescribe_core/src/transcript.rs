//! Transcript entries, stored records and raw provider segments.

use crate::{Identity, ResourceId, TranscriptKey};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Text used when a provider segment carries no text.
pub const MISSING_TEXT_PLACEHOLDER: &str = "N/A";

/// Formats a start offset in milliseconds as `minutes:seconds`.
///
/// Seconds are zero-padded to two digits; minutes are unbounded, so an hour
/// renders as `60:00`.
///
/// # Examples
///
/// ```
/// use tubescribe_core::format_timestamp;
///
/// assert_eq!(format_timestamp(0), "0:00");
/// assert_eq!(format_timestamp(125_000), "2:05");
/// assert_eq!(format_timestamp(3_600_000), "60:00");
/// ```
pub fn format_timestamp(start_ms: u64) -> String {
    let minutes = start_ms / 60_000;
    let seconds = (start_ms % 60_000) / 1_000;
    format!("{}:{:02}", minutes, seconds)
}

/// One timed line of a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters)]
pub struct TranscriptEntry {
    /// Spoken text
    text: String,
    /// Start position as `m:ss`
    timestamp: String,
}

impl TranscriptEntry {
    /// Creates an entry from already formatted parts.
    pub fn new(text: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            timestamp: timestamp.into(),
        }
    }
}

impl From<&RawSegment> for TranscriptEntry {
    fn from(segment: &RawSegment) -> Self {
        Self {
            text: segment
                .text
                .clone()
                .unwrap_or_else(|| MISSING_TEXT_PLACEHOLDER.to_string()),
            timestamp: format_timestamp(segment.start_offset_ms),
        }
    }
}

/// A segment as yielded by the external transcript provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSegment {
    /// Segment text, absent for non-speech markers
    pub text: Option<String>,
    /// Offset of the segment start in milliseconds
    pub start_offset_ms: u64,
}

impl RawSegment {
    /// Creates a segment carrying text.
    pub fn new(text: impl Into<String>, start_offset_ms: u64) -> Self {
        Self {
            text: Some(text.into()),
            start_offset_ms,
        }
    }

    /// Creates a segment without text.
    pub fn untitled(start_offset_ms: u64) -> Self {
        Self {
            text: None,
            start_offset_ms,
        }
    }
}

/// Identifier the store assigns to an inserted record.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Generates a fresh random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

/// A persisted transcript, scoped to the identity that fetched it.
///
/// Created once after a successful provider fetch and never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct TranscriptRecord {
    id: RecordId,
    resource_id: ResourceId,
    owner_id: Identity,
    entries: Vec<TranscriptEntry>,
    created_at: DateTime<Utc>,
}

impl TranscriptRecord {
    /// Creates a record for `key` with a fresh id.
    pub fn new(key: &TranscriptKey, entries: Vec<TranscriptEntry>) -> Self {
        Self {
            id: RecordId::generate(),
            resource_id: key.resource_id().clone(),
            owner_id: key.owner_id().clone(),
            entries,
            created_at: Utc::now(),
        }
    }

    /// The composite key this record is stored under.
    pub fn key(&self) -> TranscriptKey {
        TranscriptKey::new(self.resource_id.clone(), self.owner_id.clone())
    }

    /// Consumes the record, returning its ordered entries.
    pub fn into_entries(self) -> Vec<TranscriptEntry> {
        self.entries
    }
}
