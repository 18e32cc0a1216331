//! Top-level error wrapper types.

use crate::{
    AuthError, BuilderError, ConfigError, EntitlementError, ProviderError, StorageError,
};

/// Every error condition a Tubescribe operation can surface.
///
/// # Examples
///
/// ```
/// use tubescribe_error::{TubescribeError, StorageError, StorageErrorKind};
///
/// let storage_err = StorageError::new(StorageErrorKind::Query("index missing".to_string()));
/// let err: TubescribeError = storage_err.into();
/// assert!(format!("{}", err).contains("Storage Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum TubescribeErrorKind {
    /// No identity for the request
    #[from(AuthError)]
    Auth(AuthError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Persistent store error
    #[from(StorageError)]
    Storage(StorageError),
    /// Transcript or image provider error
    #[from(ProviderError)]
    Provider(ProviderError),
    /// Entitlement service error
    #[from(EntitlementError)]
    Entitlement(EntitlementError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
}

/// Tubescribe error with kind discrimination.
///
/// # Examples
///
/// ```
/// use tubescribe_error::{ConfigError, TubescribeResult};
///
/// fn might_fail() -> TubescribeResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Tubescribe Error: {}", _0)]
pub struct TubescribeError(Box<TubescribeErrorKind>);

impl TubescribeError {
    /// Create a new error from a kind.
    pub fn new(kind: TubescribeErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &TubescribeErrorKind {
        &self.0
    }

    /// True when the request failed for lack of an identity.
    pub fn is_auth(&self) -> bool {
        matches!(self.kind(), TubescribeErrorKind::Auth(_))
    }
}

// Generic From implementation for any type that converts to TubescribeErrorKind
impl<T> From<T> for TubescribeError
where
    T: Into<TubescribeErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Tubescribe operations.
pub type TubescribeResult<T> = std::result::Result<T, TubescribeError>;
