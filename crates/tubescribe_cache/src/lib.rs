//! Cache-aside transcript lookup.
//!
//! The persistent transcript store doubles as the cache: a record under
//! `(resource_id, owner_id)` means the transcript was already paid for.
//! Nothing expires and nothing is evicted.
//!
//! With single-flight enabled, [`TranscriptCache::claim`] serializes the
//! miss path per key so concurrent requests for the same video and owner
//! fetch and charge once.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cache;
mod config;
mod in_flight;

pub use cache::{CacheLookup, TranscriptCache};
pub use config::{CacheConfig, CacheConfigBuilder};
pub use in_flight::{InFlightGuard, InFlightRegistry};
