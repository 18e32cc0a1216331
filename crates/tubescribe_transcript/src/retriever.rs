//! The transcript retrieval state machine.

use crate::map_segments;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};
use tubescribe_cache::{CacheLookup, TranscriptCache};
use tubescribe_core::{FeatureFlag, Identity, ResourceId, TranscriptKey, TranscriptResponse};
use tubescribe_entitlement::EntitlementGate;
use tubescribe_error::{AuthError, BuilderError, BuilderErrorKind, TubescribeResult};
use tubescribe_interface::{IdentityResolver, TranscriptProvider};

/// Cache-aside transcript retriever.
///
/// Each call ends in one of four outcomes:
///
/// - cache hit: the stored entries, no provider call, nothing charged
/// - fetch: the provider's entries, persisted, one unit charged
/// - fetch failure: empty entries with an explanation, nothing persisted or charged
/// - no identity: an authentication error, nothing touched
///
/// All collaborators are shared handles built once at startup.
pub struct TranscriptRetriever {
    identity: Arc<dyn IdentityResolver>,
    cache: Arc<TranscriptCache>,
    provider: Arc<dyn TranscriptProvider>,
    gate: Arc<EntitlementGate>,
}

impl TranscriptRetriever {
    /// Creates a new retriever builder.
    pub fn builder() -> TranscriptRetrieverBuilder {
        TranscriptRetrieverBuilder::default()
    }

    /// Retrieves the transcript of `resource_id` for the current identity.
    ///
    /// # Errors
    ///
    /// Returns an authentication error when no identity resolves, and a
    /// storage error when the cache lookup fails. Provider and persistence
    /// failures are reported in the response, not as errors.
    pub async fn retrieve(&self, resource_id: &ResourceId) -> TubescribeResult<TranscriptResponse> {
        let Some(identity) = self.identity.resolve().await else {
            warn!(resource_id = %resource_id, "No identity for transcript request");
            return Err(AuthError::new("User not found").into());
        };
        self.retrieve_as(&identity, resource_id).await
    }

    /// Retrieves the transcript of `resource_id` for an already resolved identity.
    ///
    /// # Errors
    ///
    /// Returns a storage error when the cache lookup fails.
    #[instrument(
        skip(self, identity, resource_id),
        fields(resource_id = %resource_id, owner_id = %identity)
    )]
    pub async fn retrieve_as(
        &self,
        identity: &Identity,
        resource_id: &ResourceId,
    ) -> TubescribeResult<TranscriptResponse> {
        let key = TranscriptKey::new(resource_id.clone(), identity.clone());
        let _claim = self.cache.claim(&key).await;

        if let CacheLookup::Hit(record) = self.cache.lookup(&key).await? {
            info!(entries = record.entries().len(), "Serving cached transcript");
            return Ok(TranscriptResponse::cached(record.into_entries()));
        }

        let segments = match self.provider.fetch(resource_id).await {
            Ok(segments) => segments,
            Err(e) => {
                warn!(
                    provider = self.provider.provider_name(),
                    error = %e,
                    "Transcript fetch failed"
                );
                return Ok(TranscriptResponse::error());
            }
        };

        let entries = map_segments(&segments);
        info!(
            provider = self.provider.provider_name(),
            segments = entries.len(),
            "Fetched transcript"
        );

        let response = match self.cache.store(&key, &entries).await {
            Ok(id) => {
                debug!(record = %id, "Transcript persisted");
                TranscriptResponse::fetched(entries)
            }
            Err(e) => {
                error!(error = %e, "Failed to persist fetched transcript");
                TranscriptResponse::fetched_unpersisted(entries)
            }
        };

        self.gate.record_flag(identity, FeatureFlag::Transcription);
        Ok(response)
    }
}

impl std::fmt::Debug for TranscriptRetriever {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranscriptRetriever")
            .field("provider", &self.provider.provider_name())
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

/// Builder for [`TranscriptRetriever`].
#[derive(Default)]
pub struct TranscriptRetrieverBuilder {
    identity: Option<Arc<dyn IdentityResolver>>,
    cache: Option<Arc<TranscriptCache>>,
    provider: Option<Arc<dyn TranscriptProvider>>,
    gate: Option<Arc<EntitlementGate>>,
}

impl TranscriptRetrieverBuilder {
    /// Sets the identity resolver.
    pub fn identity(mut self, identity: Arc<dyn IdentityResolver>) -> Self {
        self.identity = Some(identity);
        self
    }

    /// Sets the transcript cache.
    pub fn cache(mut self, cache: Arc<TranscriptCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Sets the transcript provider.
    pub fn provider(mut self, provider: Arc<dyn TranscriptProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Sets the entitlement gate charged for fetches.
    pub fn gate(mut self, gate: Arc<EntitlementGate>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Builds the retriever.
    pub fn build(self) -> Result<TranscriptRetriever, BuilderError> {
        Ok(TranscriptRetriever {
            identity: self.identity.ok_or_else(|| missing("identity"))?,
            cache: self.cache.ok_or_else(|| missing("cache"))?,
            provider: self.provider.ok_or_else(|| missing("provider"))?,
            gate: self.gate.ok_or_else(|| missing("gate"))?,
        })
    }
}

#[track_caller]
fn missing(field: &str) -> BuilderError {
    BuilderError::new(BuilderErrorKind::MissingField(field.to_string()))
}
