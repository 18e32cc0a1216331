//! Persistent store error types.

/// Kinds of persistent store errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// Store backend cannot be reached
    #[display("Store unavailable: {}", _0)]
    Unavailable(String),
    /// Indexed lookup failed
    #[display("Query failed: {}", _0)]
    Query(String),
    /// Insert was rejected by the store
    #[display("Insert failed: {}", _0)]
    Insert(String),
}

/// Storage error with location tracking.
///
/// Store failures are fatal to the calling operation; nothing in the
/// workspace downgrades them to a cache miss.
///
/// # Examples
///
/// ```
/// use tubescribe_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::Unavailable("connection reset".to_string()));
/// assert!(format!("{}", err).contains("unavailable"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    /// The kind of error that occurred
    pub kind: StorageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StorageError {
    /// Create a new storage error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
