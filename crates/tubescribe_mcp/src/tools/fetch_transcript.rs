//! Transcript fetch tool.

use crate::tools::McpTool;
use crate::{FieldKind, InputSchema, McpResult, ToolContext};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::debug;
use tubescribe_core::ResourceId;
use tubescribe_transcript::TranscriptRetriever;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FetchTranscriptInput {
    video_id: String,
}

/// Fetches the transcript of a video through the cache-aside retriever.
///
/// Declares no entitlement: the retriever charges after a successful
/// fetch, and cached transcripts are free.
pub struct FetchTranscriptTool {
    retriever: Arc<TranscriptRetriever>,
}

impl FetchTranscriptTool {
    /// Creates the tool over a shared retriever.
    pub fn new(retriever: Arc<TranscriptRetriever>) -> Self {
        Self { retriever }
    }
}

#[async_trait]
impl McpTool for FetchTranscriptTool {
    fn name(&self) -> &str {
        "fetchTranscript"
    }

    fn description(&self) -> &str {
        "Fetch the transcript of a youtube video in segments"
    }

    fn input_schema(&self) -> InputSchema {
        InputSchema::new().required(
            "videoId",
            FieldKind::String,
            "The video ID to fetch the transcript for",
        )
    }

    async fn execute(&self, ctx: &ToolContext, input: Value) -> McpResult<Value> {
        let identity = ctx.require_identity()?;
        let input: FetchTranscriptInput = serde_json::from_value(input)?;
        let response = self
            .retriever
            .retrieve_as(identity, &ResourceId::from(input.video_id))
            .await?;

        let source = *response.source();
        let entries = response.into_entries();
        debug!(source = %source, entries = entries.len(), "Transcript ready");

        Ok(json!({
            "cache": source.explanation(),
            "transcript": entries,
        }))
    }
}
