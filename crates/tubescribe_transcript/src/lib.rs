//! Transcript retrieval.
//!
//! [`TranscriptRetriever`] resolves the caller, serves stored transcripts
//! from the cache and falls back to the external provider on a miss. A
//! fetched transcript is persisted and then charged to the caller; a cached
//! one is free. Provider failures degrade to an empty
//! [`TranscriptResponse`](tubescribe_core::TranscriptResponse) instead of an
//! error.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod mapping;
mod retriever;

pub use mapping::map_segments;
pub use retriever::{TranscriptRetriever, TranscriptRetrieverBuilder};
