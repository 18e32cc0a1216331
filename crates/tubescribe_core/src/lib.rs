//! Core data types for the Tubescribe transcript and tool service.
//!
//! This crate provides the foundation data types shared by the cache, the
//! entitlement gate, the retriever and the agent tools.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod entitlement;
mod feature;
mod identity;
mod image;
mod response;
mod transcript;

pub use entitlement::{EntitlementStatus, FeatureUsage, UsageEvent};
pub use feature::{FeatureFlag, FeatureNames};
pub use identity::{Identity, ResourceId, TranscriptKey};
pub use image::{ImageRecord, ImageReference};
pub use response::{TranscriptResponse, TranscriptSource};
pub use transcript::{
    MISSING_TEXT_PLACEHOLDER, RawSegment, RecordId, TranscriptEntry, TranscriptRecord,
    format_timestamp,
};
