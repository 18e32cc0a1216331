//! Authentication error types.

/// Raised when no identity can be resolved for the current request.
///
/// Fatal to the request and never retried.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Authentication Error: {} at line {} in {}", message, line, file)]
pub struct AuthError {
    /// Error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl AuthError {
    /// Create a new AuthError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use tubescribe_error::AuthError;
    ///
    /// let err = AuthError::new("User not found");
    /// assert_eq!(err.message, "User not found");
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
