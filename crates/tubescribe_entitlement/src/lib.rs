//! Entitlement and usage-limit gate.
//!
//! Quota-consuming actions are gated in two phases:
//!
//! 1. [`EntitlementGate::check`] asks the entitlement service whether an
//!    identity may consume one more unit of a feature. The answer is a
//!    three-way [`GateDecision`]: allowed, denied by plan, or a system error
//!    when the upstream usage record is incomplete.
//! 2. [`EntitlementGate::record`] reports consumption after the gated action
//!    has succeeded. Recording is handed to a background
//!    [`ConsumptionRecorder`] and retried with backoff; a failure is logged
//!    and never undoes the action.
//!
//! Check and record are not atomic. Concurrent requests from one identity
//! can both pass `check` before either records, so usage may briefly exceed
//! the allocation.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod decision;
mod gate;
mod recorder;

pub use config::{EntitlementConfig, RecordingConfig, RecordingConfigBuilder};
pub use decision::{DenialReason, GateDecision};
pub use gate::EntitlementGate;
pub use recorder::ConsumptionRecorder;
