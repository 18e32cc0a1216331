//! Entitlement gate configuration.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Retry policy for background consumption recording.
///
/// # Example
///
/// ```toml
/// [entitlement.recording]
/// max_retries = 3
/// initial_backoff_ms = 200
/// max_backoff_ms = 5000
/// queue_capacity = 1024
/// ```
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
pub struct RecordingConfig {
    /// Retries after the first failed attempt before the event is dropped
    #[serde(default = "default_max_retries")]
    #[builder(default = "default_max_retries()")]
    max_retries: usize,

    /// Backoff before the first retry (milliseconds)
    #[serde(default = "default_initial_backoff_ms")]
    #[builder(default = "default_initial_backoff_ms()")]
    initial_backoff_ms: u64,

    /// Upper bound of any single backoff (milliseconds)
    #[serde(default = "default_max_backoff_ms")]
    #[builder(default = "default_max_backoff_ms()")]
    max_backoff_ms: u64,

    /// Events waiting for delivery; further events are dropped while full
    #[serde(default = "default_queue_capacity")]
    #[builder(default = "default_queue_capacity()")]
    queue_capacity: usize,
}

fn default_max_retries() -> usize {
    3
}

fn default_initial_backoff_ms() -> u64 {
    200
}

fn default_max_backoff_ms() -> u64 {
    5_000
}

fn default_queue_capacity() -> usize {
    1_024
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
            queue_capacity: default_queue_capacity(),
        }
    }
}

/// Configuration of the entitlement gate.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Getters)]
pub struct EntitlementConfig {
    /// Consumption recording retry policy
    #[serde(default)]
    recording: RecordingConfig,

    /// Display-name overrides keyed by event subtype
    #[serde(default)]
    feature_names: HashMap<String, String>,
}

impl EntitlementConfig {
    /// Creates a configuration with the given recording policy and no name overrides.
    pub fn new(recording: RecordingConfig) -> Self {
        Self {
            recording,
            feature_names: HashMap::new(),
        }
    }

    /// Adds a display-name override for `event`.
    pub fn with_feature_name(mut self, event: impl Into<String>, name: impl Into<String>) -> Self {
        self.feature_names.insert(event.into(), name.into());
        self
    }
}
