//! The entitlement gate.

use crate::decision::{CHECK_FAILED_MESSAGE, SYSTEM_ERROR_MESSAGE};
use crate::{ConsumptionRecorder, EntitlementConfig, GateDecision};
use std::sync::Arc;
use tracing::{debug, error, instrument, warn};
use tubescribe_core::{EntitlementStatus, FeatureFlag, FeatureNames, Identity, UsageEvent};
use tubescribe_interface::EntitlementService;

/// Gate consulted before, and informed after, quota-consuming actions.
///
/// Every check goes to the entitlement service; nothing is cached between
/// calls.
pub struct EntitlementGate {
    service: Arc<dyn EntitlementService>,
    names: FeatureNames,
    recorder: ConsumptionRecorder,
}

impl EntitlementGate {
    /// Creates a gate and spawns its consumption recorder.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(service: Arc<dyn EntitlementService>, config: &EntitlementConfig) -> Self {
        let recorder = ConsumptionRecorder::spawn(service.clone(), config.recording().clone());
        Self {
            service,
            names: FeatureNames::with_overrides(config.feature_names()),
            recorder,
        }
    }

    /// Decides whether `identity` may consume one unit of `feature_key`.
    ///
    /// `feature_key` is the event subtype the feature is metered under.
    #[instrument(skip(self, identity), fields(identity = %identity))]
    pub async fn check(&self, identity: &Identity, feature_key: &str) -> GateDecision {
        let features = match self.service.usage(identity).await {
            Ok(features) => features,
            Err(e) => {
                error!(error = %e, "Error checking feature usage limit");
                return GateDecision::system_error(CHECK_FAILED_MESSAGE);
            }
        };

        let Some(feature) = features
            .into_iter()
            .flatten()
            .find(|feature| feature.event_subtype == feature_key)
        else {
            debug!("Feature not on current plan");
            return GateDecision::not_on_plan();
        };

        let (Some(usage), Some(allocation)) = (feature.usage, feature.allocation) else {
            error!(
                usage = ?feature.usage,
                allocation = ?feature.allocation,
                "Entitlement record is missing usage or allocation"
            );
            return GateDecision::system_error(SYSTEM_ERROR_MESSAGE);
        };

        let status = EntitlementStatus::evaluate(feature_key, usage, allocation);
        if !*status.allowed() {
            let name = self.names.resolve(feature_key);
            warn!(usage, allocation, feature = name, "Usage limit reached");
            return GateDecision::limit_reached(name);
        }

        debug!(usage, allocation, "Entitlement check passed");
        GateDecision::Allowed(status)
    }

    /// Checks a known feature flag.
    pub async fn check_flag(&self, identity: &Identity, flag: FeatureFlag) -> GateDecision {
        self.check(identity, flag.event()).await
    }

    /// Records one unit of `feature_key` consumed by `identity`.
    ///
    /// Call only after the gated action succeeded. Returns immediately; the
    /// event is delivered in the background and a delivery failure is
    /// logged, never surfaced.
    pub fn record(&self, identity: &Identity, feature_key: &str) {
        debug!(identity = %identity, feature = feature_key, "Recording consumption");
        self.recorder
            .record(UsageEvent::new(feature_key, identity.clone()));
    }

    /// Records one unit of a known feature flag.
    pub fn record_flag(&self, identity: &Identity, flag: FeatureFlag) {
        self.record(identity, flag.event());
    }

    /// Waits until every consumption recorded so far has been delivered or dropped.
    pub async fn flush(&self) {
        self.recorder.flush().await;
    }
}

impl std::fmt::Debug for EntitlementGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntitlementGate")
            .field("names", &self.names)
            .finish_non_exhaustive()
    }
}
