//! Structured result of a transcript retrieval.

use crate::TranscriptEntry;
use serde::{Deserialize, Serialize};

/// Where the entries of a [`TranscriptResponse`] came from.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum TranscriptSource {
    /// Served from the store; no provider call, no quota consumed
    Cached,
    /// Fetched from the provider and persisted
    Fetched,
    /// Fetched from the provider but the store rejected the insert
    FetchedUnpersisted,
    /// Provider failed; entries are empty
    Error,
}

impl TranscriptSource {
    /// Explanation handed to the agent alongside the entries.
    pub fn explanation(&self) -> &'static str {
        match self {
            TranscriptSource::Cached => {
                "This video has already been transcribed - Accessing cached transcript instead of using a token"
            }
            TranscriptSource::Fetched => {
                "This video was transcribed using a token, the transcript is now saved in the database"
            }
            TranscriptSource::FetchedUnpersisted => {
                "This video was transcribed using a token, but the transcript could not be saved"
            }
            TranscriptSource::Error => "Error fetching transcript, please try again later",
        }
    }
}

/// Entries plus provenance; always well formed, even on provider failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct TranscriptResponse {
    source: TranscriptSource,
    entries: Vec<TranscriptEntry>,
    message: String,
}

impl TranscriptResponse {
    /// Entries served from the store.
    pub fn cached(entries: Vec<TranscriptEntry>) -> Self {
        Self::with_source(TranscriptSource::Cached, entries)
    }

    /// Entries freshly fetched and persisted.
    pub fn fetched(entries: Vec<TranscriptEntry>) -> Self {
        Self::with_source(TranscriptSource::Fetched, entries)
    }

    /// Entries freshly fetched that the store failed to keep.
    pub fn fetched_unpersisted(entries: Vec<TranscriptEntry>) -> Self {
        Self::with_source(TranscriptSource::FetchedUnpersisted, entries)
    }

    /// Empty result for a failed provider call.
    pub fn error() -> Self {
        Self::with_source(TranscriptSource::Error, Vec::new())
    }

    fn with_source(source: TranscriptSource, entries: Vec<TranscriptEntry>) -> Self {
        Self {
            source,
            entries,
            message: source.explanation().to_string(),
        }
    }

    /// Consumes the response, returning its entries.
    pub fn into_entries(self) -> Vec<TranscriptEntry> {
        self.entries
    }
}
