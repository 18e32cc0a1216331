//! Collaborator traits.

use async_trait::async_trait;
use tubescribe_core::{
    FeatureUsage, Identity, ImageRecord, ImageReference, RawSegment, RecordId, ResourceId,
    TranscriptEntry, TranscriptKey, TranscriptRecord, UsageEvent,
};
use tubescribe_error::{ProviderError, TubescribeResult};

/// Resolves the principal behind the current request.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Returns the requesting identity, or `None` when unauthenticated.
    async fn resolve(&self) -> Option<Identity>;
}

/// Document store holding transcripts under their composite key.
///
/// No uniqueness constraint is enforced: two inserts for one key produce two
/// records, and `find` returns the earliest.
#[async_trait]
pub trait TranscriptStore: Send + Sync {
    /// Indexed lookup by `(resource_id, owner_id)`.
    async fn find(&self, key: &TranscriptKey) -> TubescribeResult<Option<TranscriptRecord>>;

    /// Inserts a new record and returns its id.
    async fn insert(
        &self,
        key: &TranscriptKey,
        entries: &[TranscriptEntry],
    ) -> TubescribeResult<RecordId>;
}

/// External source of transcripts.
///
/// Implementations must enforce their own timeout and surface
/// [`ProviderErrorKind::Timeout`](tubescribe_error::ProviderErrorKind::Timeout)
/// rather than hang; the retriever waits on `fetch` indefinitely.
#[async_trait]
pub trait TranscriptProvider: Send + Sync {
    /// Fetches the raw segments of `resource_id` in media order.
    async fn fetch(&self, resource_id: &ResourceId) -> Result<Vec<RawSegment>, ProviderError>;

    /// Provider name for logs (e.g., "youtube").
    fn provider_name(&self) -> &'static str;
}

/// Usage and allocation accounting per identity.
#[async_trait]
pub trait EntitlementService: Send + Sync {
    /// Per-feature usage of `identity`, or `None` if the service knows nothing about it.
    async fn usage(&self, identity: &Identity) -> TubescribeResult<Option<Vec<FeatureUsage>>>;

    /// Records one unit of consumption.
    async fn track(&self, event: &UsageEvent) -> TubescribeResult<()>;
}

/// External image generator.
///
/// Same timeout contract as [`TranscriptProvider`].
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Generates an image for `prompt` in the context of `resource_id`.
    async fn generate(
        &self,
        prompt: &str,
        resource_id: &ResourceId,
    ) -> Result<ImageReference, ProviderError>;

    /// Provider name for logs (e.g., "dall-e").
    fn provider_name(&self) -> &'static str;
}

/// Store of generated image records, indexed by owner and video.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Inserts a record and returns its id.
    async fn insert(&self, record: ImageRecord) -> TubescribeResult<RecordId>;

    /// All records of `owner_id` for `resource_id`, in insertion order.
    async fn list(
        &self,
        owner_id: &Identity,
        resource_id: &ResourceId,
    ) -> TubescribeResult<Vec<ImageRecord>>;

    /// The earliest record of `owner_id` for `resource_id`.
    async fn first(
        &self,
        owner_id: &Identity,
        resource_id: &ResourceId,
    ) -> TubescribeResult<Option<ImageRecord>> {
        Ok(self.list(owner_id, resource_id).await?.into_iter().next())
    }
}
