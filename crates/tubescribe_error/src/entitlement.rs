//! Entitlement service error types.

/// Failures talking to the entitlement/usage service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum EntitlementErrorKind {
    /// Usage lookup could not be completed
    #[display("Entitlement service unavailable: {}", _0)]
    ServiceUnavailable(String),
    /// A usage event could not be recorded
    #[display("Failed to track usage event: {}", _0)]
    TrackingFailed(String),
}

impl EntitlementErrorKind {
    /// Check if the failed call is worth repeating.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            EntitlementErrorKind::ServiceUnavailable(_) | EntitlementErrorKind::TrackingFailed(_)
        )
    }
}

/// Entitlement error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Entitlement Error: {} at line {} in {}", kind, line, file)]
pub struct EntitlementError {
    /// The kind of error that occurred
    pub kind: EntitlementErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl EntitlementError {
    /// Create a new entitlement error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: EntitlementErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
