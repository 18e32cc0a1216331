//! Stored image listing tool.

use crate::tools::McpTool;
use crate::{FieldKind, InputSchema, McpResult, ToolContext};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tubescribe_core::ResourceId;
use tubescribe_interface::ImageStore;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListImagesInput {
    video_id: String,
}

/// Lists the images the caller generated for a video. Ungated.
pub struct ListImagesTool {
    images: Arc<dyn ImageStore>,
}

impl ListImagesTool {
    /// Creates the tool.
    pub fn new(images: Arc<dyn ImageStore>) -> Self {
        Self { images }
    }
}

#[async_trait]
impl McpTool for ListImagesTool {
    fn name(&self) -> &str {
        "getImages"
    }

    fn description(&self) -> &str {
        "List the images generated for a youtube video"
    }

    fn input_schema(&self) -> InputSchema {
        InputSchema::new().required("videoId", FieldKind::String, "The YouTube video ID")
    }

    async fn execute(&self, ctx: &ToolContext, input: Value) -> McpResult<Value> {
        let identity = ctx.require_identity()?;
        let input: ListImagesInput = serde_json::from_value(input)?;
        let records = self
            .images
            .list(identity, &ResourceId::from(input.video_id))
            .await?;

        Ok(json!({ "images": records }))
    }
}
