//! Error types for the Tubescribe library.
//!
//! This crate provides the foundation error types used throughout the Tubescribe workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use tubescribe_error::{AuthError, TubescribeResult};
//!
//! fn current_user() -> TubescribeResult<String> {
//!     Err(AuthError::new("User not found"))?
//! }
//!
//! match current_user() {
//!     Ok(user) => println!("Hello {}", user),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod auth;
mod builder;
mod config;
mod entitlement;
mod error;
mod provider;
mod storage;

pub use auth::AuthError;
pub use builder::{BuilderError, BuilderErrorKind};
pub use config::ConfigError;
pub use entitlement::{EntitlementError, EntitlementErrorKind};
pub use error::{TubescribeError, TubescribeErrorKind, TubescribeResult};
pub use provider::{ProviderError, ProviderErrorKind, RetryableError};
pub use storage::{StorageError, StorageErrorKind};
