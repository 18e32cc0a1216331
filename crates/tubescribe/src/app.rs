//! Application wiring.

use crate::TubescribeConfig;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument};
use tubescribe_cache::TranscriptCache;
use tubescribe_core::{ResourceId, TranscriptResponse};
use tubescribe_entitlement::EntitlementGate;
use tubescribe_error::{BuilderError, BuilderErrorKind, TubescribeResult};
use tubescribe_interface::{
    EntitlementService, IdentityResolver, ImageProvider, ImageStore, TranscriptProvider,
    TranscriptStore,
};
use tubescribe_mcp::{
    FetchTranscriptTool, GenerateImageTool, ListImagesTool, McpResult, McpServer, ToolOutcome,
    ToolRegistry,
};
use tubescribe_storage::{InMemoryImageStore, InMemoryTranscriptStore};
use tubescribe_transcript::TranscriptRetriever;

/// A wired Tubescribe service.
///
/// Every collaborator is constructed once, here, and shared read-only by
/// all requests.
#[derive(Debug)]
pub struct Tubescribe {
    config: TubescribeConfig,
    gate: Arc<EntitlementGate>,
    retriever: Arc<TranscriptRetriever>,
    server: McpServer,
}

impl Tubescribe {
    /// Creates a new application builder.
    pub fn builder() -> TubescribeBuilder {
        TubescribeBuilder::default()
    }

    /// Configuration the service was built with.
    pub fn config(&self) -> &TubescribeConfig {
        &self.config
    }

    /// The entitlement gate.
    pub fn gate(&self) -> &Arc<EntitlementGate> {
        &self.gate
    }

    /// The transcript retriever.
    pub fn retriever(&self) -> &Arc<TranscriptRetriever> {
        &self.retriever
    }

    /// The registered agent tools.
    pub fn registry(&self) -> &ToolRegistry {
        self.server.tools()
    }

    /// The tool server.
    pub fn server(&self) -> &McpServer {
        &self.server
    }

    /// Retrieves the transcript of `resource_id` for the current identity.
    pub async fn retrieve(&self, resource_id: &ResourceId) -> TubescribeResult<TranscriptResponse> {
        self.retriever.retrieve(resource_id).await
    }

    /// Invokes an agent tool by name.
    pub async fn invoke(&self, name: &str, args: Value) -> McpResult<ToolOutcome> {
        self.registry().invoke(name, args).await
    }

    /// Waits for queued consumption records to be delivered.
    #[instrument(skip(self))]
    pub async fn shutdown(&self) {
        self.gate.flush().await;
        info!("Pending usage events flushed");
    }
}

/// Builder for [`Tubescribe`].
///
/// Identity, transcript provider and entitlement service are required.
/// Stores default to in-memory; without an image provider the
/// `generateImage` tool is not registered.
#[derive(Default)]
pub struct TubescribeBuilder {
    config: Option<TubescribeConfig>,
    identity: Option<Arc<dyn IdentityResolver>>,
    entitlements: Option<Arc<dyn EntitlementService>>,
    transcript_provider: Option<Arc<dyn TranscriptProvider>>,
    transcript_store: Option<Arc<dyn TranscriptStore>>,
    image_provider: Option<Arc<dyn ImageProvider>>,
    image_store: Option<Arc<dyn ImageStore>>,
}

impl TubescribeBuilder {
    /// Sets the configuration (defaults otherwise).
    pub fn config(mut self, config: TubescribeConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the identity resolver.
    pub fn identity(mut self, identity: Arc<dyn IdentityResolver>) -> Self {
        self.identity = Some(identity);
        self
    }

    /// Sets the entitlement service.
    pub fn entitlements(mut self, entitlements: Arc<dyn EntitlementService>) -> Self {
        self.entitlements = Some(entitlements);
        self
    }

    /// Sets the transcript provider.
    pub fn transcript_provider(mut self, provider: Arc<dyn TranscriptProvider>) -> Self {
        self.transcript_provider = Some(provider);
        self
    }

    /// Sets the transcript store.
    pub fn transcript_store(mut self, store: Arc<dyn TranscriptStore>) -> Self {
        self.transcript_store = Some(store);
        self
    }

    /// Sets the image provider.
    pub fn image_provider(mut self, provider: Arc<dyn ImageProvider>) -> Self {
        self.image_provider = Some(provider);
        self
    }

    /// Sets the image store.
    pub fn image_store(mut self, store: Arc<dyn ImageStore>) -> Self {
        self.image_store = Some(store);
        self
    }

    /// Wires the service. Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns a builder error when a required collaborator is missing.
    pub fn build(self) -> TubescribeResult<Tubescribe> {
        let config = self.config.unwrap_or_default();
        let identity = self.identity.ok_or_else(|| missing("identity"))?;
        let entitlements = self.entitlements.ok_or_else(|| missing("entitlements"))?;
        let transcript_provider = self
            .transcript_provider
            .ok_or_else(|| missing("transcript_provider"))?;
        let transcript_store = self
            .transcript_store
            .unwrap_or_else(|| Arc::new(InMemoryTranscriptStore::new()));
        let image_store = self
            .image_store
            .unwrap_or_else(|| Arc::new(InMemoryImageStore::new()));

        let gate = Arc::new(EntitlementGate::new(entitlements, config.entitlement()));
        let cache = Arc::new(TranscriptCache::new(transcript_store, config.cache()));
        let retriever = Arc::new(
            TranscriptRetriever::builder()
                .identity(identity.clone())
                .cache(cache)
                .provider(transcript_provider)
                .gate(gate.clone())
                .build()?,
        );

        let mut registry = ToolRegistry::new(identity, gate.clone());
        registry.register(Arc::new(FetchTranscriptTool::new(retriever.clone())));
        registry.register(Arc::new(ListImagesTool::new(image_store.clone())));
        if let Some(provider) = self.image_provider {
            registry.register(Arc::new(GenerateImageTool::new(
                provider,
                image_store,
                gate.clone(),
            )));
        }

        let server = McpServer::builder()
            .name(config.server().name().clone())
            .version(config.server().version().clone())
            .tools(registry)
            .build()
            .map_err(|e| BuilderError::new(BuilderErrorKind::ValidationFailed(e.to_string())))?;

        info!(
            tools = server.tools().len(),
            single_flight = config.cache().single_flight(),
            "Tubescribe wired"
        );

        Ok(Tubescribe {
            config,
            gate,
            retriever,
            server,
        })
    }
}

#[track_caller]
fn missing(field: &str) -> BuilderError {
    BuilderError::new(BuilderErrorKind::MissingField(field.to_string()))
}
