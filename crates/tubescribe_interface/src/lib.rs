//! Trait definitions for the Tubescribe transcript and tool service.
//!
//! Everything the core talks to lives behind these traits: identity
//! resolution, the persistent store, the transcript and image providers and
//! the entitlement service. Handles are constructed once at startup and
//! shared read-only across requests, so every trait is `Send + Sync`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod identity;
mod traits;

pub use identity::{FixedIdentity, ScopedIdentity};
pub use traits::{
    EntitlementService, IdentityResolver, ImageProvider, ImageStore, TranscriptProvider,
    TranscriptStore,
};
