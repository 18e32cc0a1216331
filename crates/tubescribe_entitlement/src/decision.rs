//! Outcome of an entitlement check.

use tubescribe_core::EntitlementStatus;

/// Text returned when the entitlement data of a known feature is incomplete.
pub(crate) const SYSTEM_ERROR_MESSAGE: &str = "System Error - Contact Support";

/// Text returned when the entitlement service itself fails.
pub(crate) const CHECK_FAILED_MESSAGE: &str = "Error checking feature usage limit";

/// Text returned when the plan does not include the feature.
pub(crate) const NOT_ON_PLAN_MESSAGE: &str =
    "This feature is not available on your current plan, please upgrade to continue";

/// Why a check denied the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum DenialReason {
    /// The plan has no entitlement for the feature
    NotOnPlan,
    /// Usage has reached the allocation
    LimitReached,
}

/// Three-way result of [`EntitlementGate::check`](crate::EntitlementGate::check).
///
/// A system error is not a denial: it means the upstream record is broken
/// and the user should contact support rather than upgrade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// One more unit may be consumed
    Allowed(EntitlementStatus),
    /// The plan forbids the request
    Denied {
        /// Cause of the denial
        reason: DenialReason,
        /// User-facing explanation
        message: String,
    },
    /// Entitlement data could not be evaluated
    SystemError {
        /// User-facing explanation
        message: String,
    },
}

impl GateDecision {
    pub(crate) fn not_on_plan() -> Self {
        GateDecision::Denied {
            reason: DenialReason::NotOnPlan,
            message: NOT_ON_PLAN_MESSAGE.to_string(),
        }
    }

    pub(crate) fn limit_reached(feature_name: &str) -> Self {
        GateDecision::Denied {
            reason: DenialReason::LimitReached,
            message: format!(
                "You have reached your {} limit. Please upgrade your plan to continue using this feature.",
                feature_name
            ),
        }
    }

    pub(crate) fn system_error(message: &str) -> Self {
        GateDecision::SystemError {
            message: message.to_string(),
        }
    }

    /// True when the gated action may proceed.
    pub fn is_allowed(&self) -> bool {
        matches!(self, GateDecision::Allowed(_))
    }

    /// Stable code distinguishing the three outcomes.
    pub fn code(&self) -> &'static str {
        match self {
            GateDecision::Allowed(_) => "allowed",
            GateDecision::Denied { .. } => "entitlement_denied",
            GateDecision::SystemError { .. } => "entitlement_system_error",
        }
    }

    /// User-facing explanation, absent when allowed.
    pub fn message(&self) -> Option<&str> {
        match self {
            GateDecision::Allowed(_) => None,
            GateDecision::Denied { message, .. } | GateDecision::SystemError { message } => {
                Some(message)
            }
        }
    }
}
