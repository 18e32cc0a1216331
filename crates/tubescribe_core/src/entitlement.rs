//! Usage data exchanged with the entitlement service.

use crate::Identity;
use serde::{Deserialize, Serialize};

/// Usage counter and ceiling of one feature for one identity.
///
/// Either number may be absent when the upstream record is incomplete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureUsage {
    /// Event subtype the feature is metered under
    pub event_subtype: String,
    /// Units consumed in the current period
    pub usage: Option<u64>,
    /// Units allowed in the current period
    pub allocation: Option<u64>,
}

impl FeatureUsage {
    /// Creates a complete usage record.
    pub fn new(event_subtype: impl Into<String>, usage: u64, allocation: u64) -> Self {
        Self {
            event_subtype: event_subtype.into(),
            usage: Some(usage),
            allocation: Some(allocation),
        }
    }
}

/// Result of evaluating one identity against one feature.
///
/// Derived on every check and never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct EntitlementStatus {
    allowed: bool,
    current_usage: u64,
    allocation: u64,
    feature_key: String,
}

impl EntitlementStatus {
    /// Evaluates `usage` against `allocation` for `feature_key`.
    pub fn evaluate(feature_key: impl Into<String>, usage: u64, allocation: u64) -> Self {
        Self {
            allowed: usage < allocation,
            current_usage: usage,
            allocation,
            feature_key: feature_key.into(),
        }
    }
}

/// One unit of consumption reported to the entitlement service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UsageEvent {
    /// Event subtype being consumed
    pub event: String,
    /// Identity charged, as both company and user scope
    pub identity: Identity,
}

impl UsageEvent {
    /// Creates a usage event.
    pub fn new(event: impl Into<String>, identity: Identity) -> Self {
        Self {
            event: event.into(),
            identity,
        }
    }
}
