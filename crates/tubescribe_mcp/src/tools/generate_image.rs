//! Image generation tool.

use crate::tools::McpTool;
use crate::{FieldKind, InputSchema, McpError, McpResult, ToolContext};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{error, info};
use tubescribe_core::{FeatureFlag, ImageRecord, ResourceId};
use tubescribe_entitlement::EntitlementGate;
use tubescribe_interface::{ImageProvider, ImageStore};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateImageInput {
    prompt: String,
    video_id: String,
}

/// Generates an image for a video.
///
/// Gated before it runs: the registry checks image-generation entitlement,
/// then the tool generates, stores the record and charges one unit.
pub struct GenerateImageTool {
    provider: Arc<dyn ImageProvider>,
    images: Arc<dyn ImageStore>,
    gate: Arc<EntitlementGate>,
}

impl GenerateImageTool {
    /// Creates the tool.
    pub fn new(
        provider: Arc<dyn ImageProvider>,
        images: Arc<dyn ImageStore>,
        gate: Arc<EntitlementGate>,
    ) -> Self {
        Self {
            provider,
            images,
            gate,
        }
    }
}

#[async_trait]
impl McpTool for GenerateImageTool {
    fn name(&self) -> &str {
        "generateImage"
    }

    fn description(&self) -> &str {
        "Generate an image"
    }

    fn input_schema(&self) -> InputSchema {
        InputSchema::new()
            .required(
                "prompt",
                FieldKind::String,
                "The prompt to generate an image for",
            )
            .required("videoId", FieldKind::String, "The YouTube video ID")
    }

    fn entitlement(&self) -> Option<FeatureFlag> {
        Some(FeatureFlag::ImageGeneration)
    }

    async fn execute(&self, ctx: &ToolContext, input: Value) -> McpResult<Value> {
        let identity = ctx.require_identity()?;
        let input: GenerateImageInput = serde_json::from_value(input)?;
        let resource_id = ResourceId::from(input.video_id);

        let image = self
            .provider
            .generate(&input.prompt, &resource_id)
            .await
            .map_err(|e| McpError::ProviderFailure(e.kind.to_string()))?;

        info!(
            provider = self.provider.provider_name(),
            resource_id = %resource_id,
            url = %image.url,
            "Image generated"
        );

        let record = ImageRecord::new(&image, resource_id, identity.clone());
        if let Err(e) = self.images.insert(record).await {
            error!(error = %e, "Failed to store image record");
        }

        self.gate.record_flag(identity, FeatureFlag::ImageGeneration);

        Ok(json!({ "image": image }))
    }
}
