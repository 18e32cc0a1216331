//! Tool trait and the built-in tools.

mod fetch_transcript;
mod generate_image;
mod list_images;

pub use fetch_transcript::FetchTranscriptTool;
pub use generate_image::GenerateImageTool;
pub use list_images::ListImagesTool;

use crate::{InputSchema, McpResult, ToolContext};
use async_trait::async_trait;
use serde_json::Value;
use tubescribe_core::FeatureFlag;

/// Trait for agent tools.
#[async_trait]
pub trait McpTool: Send + Sync {
    /// Returns the tool name.
    fn name(&self) -> &str;

    /// Returns the tool description for the agent.
    fn description(&self) -> &str;

    /// Returns the declared input.
    fn input_schema(&self) -> InputSchema;

    /// Feature the registry must check before running the tool.
    ///
    /// Tools that charge after the fact, or not at all, return `None`.
    fn entitlement(&self) -> Option<FeatureFlag> {
        None
    }

    /// Executes the tool with arguments that already passed validation.
    async fn execute(&self, ctx: &ToolContext, input: Value) -> McpResult<Value>;
}
