//! External provider error types and retry classification.

/// Failure conditions reported by transcript and image providers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ProviderErrorKind {
    /// The requested resource does not exist or has no transcript
    #[display("Resource not found: {}", _0)]
    NotFound(String),
    /// Transport-level failure
    #[display("Network error: {}", _0)]
    Network(String),
    /// Provider did not answer within its own deadline
    #[display("Provider timed out after {}ms", _0)]
    Timeout(u64),
    /// Provider answered with data that could not be interpreted
    #[display("Malformed provider response: {}", _0)]
    Malformed(String),
    /// Provider refused the request (bad prompt, policy, credentials)
    #[display("Request rejected: {}", _0)]
    Rejected(String),
}

impl ProviderErrorKind {
    /// Check if this error type should be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ProviderErrorKind::Network(_) | ProviderErrorKind::Timeout(_)
        )
    }
}

/// Provider error with source location tracking.
///
/// # Examples
///
/// ```
/// use tubescribe_error::{ProviderError, ProviderErrorKind};
///
/// let err = ProviderError::new(ProviderErrorKind::NotFound("abc".to_string()));
/// assert!(format!("{}", err).contains("abc"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Provider Error: {} at line {} in {}", kind, line, file)]
pub struct ProviderError {
    /// The kind of error that occurred
    pub kind: ProviderErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ProviderError {
    /// Create a new ProviderError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ProviderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Trait for errors that support retry logic.
///
/// # Examples
///
/// ```
/// use tubescribe_error::{ProviderError, ProviderErrorKind, RetryableError};
///
/// let err = ProviderError::new(ProviderErrorKind::Timeout(30_000));
/// assert!(err.is_retryable());
///
/// let err = ProviderError::new(ProviderErrorKind::NotFound("abc".to_string()));
/// assert!(!err.is_retryable());
/// ```
pub trait RetryableError {
    /// Returns true if this error should trigger a retry.
    fn is_retryable(&self) -> bool;
}

impl RetryableError for ProviderError {
    fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

impl RetryableError for crate::EntitlementError {
    fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}
