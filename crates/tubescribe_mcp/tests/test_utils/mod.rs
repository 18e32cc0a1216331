//! Test utilities for tool layer tests.
//!
//! Mock collaborators with call counters, plus a fixture wiring them into a
//! registry with the three built-in tools.

#![allow(dead_code)]

pub mod mocks;

pub use mocks::{CountingIdentity, MockEntitlements, MockImageProvider, MockTranscriptProvider};

use std::sync::Arc;
use tubescribe_cache::{CacheConfig, TranscriptCache};
use tubescribe_core::FeatureUsage;
use tubescribe_entitlement::{EntitlementConfig, EntitlementGate, RecordingConfig};
use tubescribe_interface::{IdentityResolver, ImageStore};
use tubescribe_mcp::{FetchTranscriptTool, GenerateImageTool, ListImagesTool, ToolRegistry};
use tubescribe_storage::{InMemoryImageStore, InMemoryTranscriptStore};
use tubescribe_transcript::TranscriptRetriever;

/// Everything a tool test needs to inspect after an invocation.
pub struct Fixture {
    pub registry: ToolRegistry,
    pub gate: Arc<EntitlementGate>,
    pub entitlements: Arc<MockEntitlements>,
    pub transcripts: Arc<MockTranscriptProvider>,
    pub images: Arc<MockImageProvider>,
    pub transcript_store: InMemoryTranscriptStore,
    pub image_store: InMemoryImageStore,
}

impl Fixture {
    /// Tracked events after draining the recorder.
    pub async fn tracked(&self) -> Vec<String> {
        self.gate.flush().await;
        self.entitlements.tracked()
    }

    /// Number of image records stored for `owner`/`video`.
    pub async fn stored_images(&self, owner: &str, video: &str) -> usize {
        self.image_store
            .list(&owner.into(), &video.into())
            .await
            .map(|records| records.len())
            .unwrap_or(0)
    }
}

/// Gate with a fast retry policy over `service`.
pub fn gate(service: Arc<MockEntitlements>) -> Arc<EntitlementGate> {
    Arc::new(EntitlementGate::new(
        service,
        &EntitlementConfig::new(
            RecordingConfig::default()
                .with_initial_backoff_ms(1)
                .with_max_backoff_ms(2),
        ),
    ))
}

/// Registry with every built-in tool, over the given identity and usage.
pub fn fixture(identity: Arc<dyn IdentityResolver>, usage: Vec<FeatureUsage>) -> Fixture {
    let entitlements = Arc::new(MockEntitlements::new(usage));
    let gate = gate(entitlements.clone());
    let transcripts = Arc::new(MockTranscriptProvider::default());
    let images = Arc::new(MockImageProvider::default());
    let transcript_store = InMemoryTranscriptStore::new();
    let image_store = InMemoryImageStore::new();

    let cache = Arc::new(TranscriptCache::new(
        Arc::new(transcript_store.clone()),
        &CacheConfig::default(),
    ));
    let retriever = TranscriptRetriever::builder()
        .identity(identity.clone())
        .cache(cache)
        .provider(transcripts.clone())
        .gate(gate.clone())
        .build()
        .expect("retriever");

    let mut registry = ToolRegistry::new(identity, gate.clone());
    registry.register(Arc::new(FetchTranscriptTool::new(Arc::new(retriever))));
    registry.register(Arc::new(GenerateImageTool::new(
        images.clone(),
        Arc::new(image_store.clone()),
        gate.clone(),
    )));
    registry.register(Arc::new(ListImagesTool::new(Arc::new(image_store.clone()))));

    Fixture {
        registry,
        gate,
        entitlements,
        transcripts,
        images,
        transcript_store,
        image_store,
    }
}

/// Plan with room for both metered features.
pub fn generous_plan() -> Vec<FeatureUsage> {
    vec![
        FeatureUsage::new("transcribe", 0, 100),
        FeatureUsage::new("generate-image", 0, 10),
    ]
}
