//! Mock collaborators.

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tubescribe_core::{FeatureUsage, Identity, ImageReference, RawSegment, ResourceId, UsageEvent};
use tubescribe_error::{ProviderError, ProviderErrorKind, TubescribeResult};
use tubescribe_interface::{
    EntitlementService, IdentityResolver, ImageProvider, TranscriptProvider,
};

/// Entitlement service with fixed usage, logging `event:identity` per track.
pub struct MockEntitlements {
    usage: Vec<FeatureUsage>,
    tracked: Mutex<Vec<String>>,
    usage_calls: AtomicUsize,
}

impl MockEntitlements {
    pub fn new(usage: Vec<FeatureUsage>) -> Self {
        Self {
            usage,
            tracked: Mutex::new(Vec::new()),
            usage_calls: AtomicUsize::new(0),
        }
    }

    pub fn tracked(&self) -> Vec<String> {
        self.tracked.lock().expect("tracked lock").clone()
    }

    pub fn usage_calls(&self) -> usize {
        self.usage_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EntitlementService for MockEntitlements {
    async fn usage(&self, _identity: &Identity) -> TubescribeResult<Option<Vec<FeatureUsage>>> {
        self.usage_calls.fetch_add(1, Ordering::SeqCst);
        Ok(Some(self.usage.clone()))
    }

    async fn track(&self, event: &UsageEvent) -> TubescribeResult<()> {
        self.tracked
            .lock()
            .expect("tracked lock")
            .push(format!("{}:{}", event.event, event.identity));
        Ok(())
    }
}

/// Transcript provider answering every video with two segments.
#[derive(Default)]
pub struct MockTranscriptProvider {
    calls: AtomicUsize,
}

impl MockTranscriptProvider {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranscriptProvider for MockTranscriptProvider {
    async fn fetch(&self, resource_id: &ResourceId) -> Result<Vec<RawSegment>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if resource_id.as_str() == "missing" {
            return Err(ProviderError::new(ProviderErrorKind::NotFound(
                resource_id.to_string(),
            )));
        }
        Ok(vec![RawSegment::new("hi", 0), RawSegment::untitled(65_000)])
    }

    fn provider_name(&self) -> &'static str {
        "mock-transcripts"
    }
}

/// Image provider returning a URL derived from the video, or rejecting prompts containing "forbidden".
#[derive(Default)]
pub struct MockImageProvider {
    calls: AtomicUsize,
}

impl MockImageProvider {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageProvider for MockImageProvider {
    async fn generate(
        &self,
        prompt: &str,
        resource_id: &ResourceId,
    ) -> Result<ImageReference, ProviderError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if prompt.contains("forbidden") {
            return Err(ProviderError::new(ProviderErrorKind::Rejected(
                "content policy".to_string(),
            )));
        }
        Ok(ImageReference {
            storage_id: format!("st-{}", n),
            url: format!("https://images.test/{}/{}.png", resource_id, n),
        })
    }

    fn provider_name(&self) -> &'static str {
        "mock-images"
    }
}

/// Resolver returning a fixed identity and counting lookups.
pub struct CountingIdentity {
    identity: Identity,
    calls: AtomicUsize,
}

impl CountingIdentity {
    pub fn new(identity: &str) -> Self {
        Self {
            identity: identity.into(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityResolver for CountingIdentity {
    async fn resolve(&self) -> Option<Identity> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Some(self.identity.clone())
    }
}
