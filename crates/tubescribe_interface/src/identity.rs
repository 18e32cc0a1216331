//! Identity resolvers for single-user tools and per-request scoping.

use crate::IdentityResolver;
use async_trait::async_trait;
use std::future::Future;
use tubescribe_core::Identity;

tokio::task_local! {
    static CURRENT_IDENTITY: Identity;
}

/// Resolver that always answers with the same identity (or none).
///
/// Useful for single-user deployments and tests.
#[derive(Debug, Clone, Default)]
pub struct FixedIdentity {
    identity: Option<Identity>,
}

impl FixedIdentity {
    /// Always resolves to `identity`.
    pub fn new(identity: impl Into<Identity>) -> Self {
        Self {
            identity: Some(identity.into()),
        }
    }

    /// Never resolves; every request is unauthenticated.
    pub fn anonymous() -> Self {
        Self { identity: None }
    }
}

#[async_trait]
impl IdentityResolver for FixedIdentity {
    async fn resolve(&self) -> Option<Identity> {
        self.identity.clone()
    }
}

/// Resolver reading the identity bound to the current task.
///
/// The request handler wraps its work in [`ScopedIdentity::scope`]; shared
/// tools and retrievers then see the identity of whichever request they run
/// under.
///
/// # Example
///
/// ```
/// use tubescribe_interface::{IdentityResolver, ScopedIdentity};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let resolver = ScopedIdentity;
/// assert!(resolver.resolve().await.is_none());
///
/// let seen = ScopedIdentity::scope("u1".into(), async { resolver.resolve().await }).await;
/// assert_eq!(seen.unwrap().as_str(), "u1");
/// # }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ScopedIdentity;

impl ScopedIdentity {
    /// Runs `fut` with `identity` bound as the current request identity.
    pub async fn scope<F>(identity: Identity, fut: F) -> F::Output
    where
        F: Future,
    {
        tracing::debug!(identity = %identity, "Binding request identity");
        CURRENT_IDENTITY.scope(identity, fut).await
    }
}

#[async_trait]
impl IdentityResolver for ScopedIdentity {
    async fn resolve(&self) -> Option<Identity> {
        CURRENT_IDENTITY.try_with(Identity::clone).ok()
    }
}
