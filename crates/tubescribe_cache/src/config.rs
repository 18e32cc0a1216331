//! Transcript cache configuration.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Configuration for the transcript cache.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
pub struct CacheConfig {
    /// Serialize concurrent misses for the same key
    #[serde(default = "default_single_flight")]
    #[builder(default = "default_single_flight()")]
    single_flight: bool,
}

fn default_single_flight() -> bool {
    true
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            single_flight: default_single_flight(),
        }
    }
}
