//! Tubescribe - transcripts and tools for video assistants
//!
//! Tubescribe serves video transcripts to an automated agent through a
//! persistent cache in front of a quota-limited provider, gates metered
//! actions on per-identity entitlements, and exposes both as
//! schema-validated tools.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tubescribe::{FixedIdentity, Tubescribe, TubescribeConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     tubescribe::load_dotenv();
//!     let config = TubescribeConfig::load()?;
//!     tubescribe::init_observability_with_config(
//!         tubescribe::ObservabilityConfig::from_logging("tubescribe", config.logging()),
//!     )?;
//!
//!     let app = Tubescribe::builder()
//!         .config(config)
//!         .identity(Arc::new(FixedIdentity::new("u1")))
//!         .entitlements(my_entitlement_service())
//!         .transcript_provider(my_transcript_provider())
//!         .build()?;
//!
//!     app.server().run_stdio().await?;
//!     app.shutdown().await;
//!     Ok(())
//! }
//! ```
//!
//! # Cargo Features
//!
//! - `observability` - OpenTelemetry span export to stdout
//!
//! # Architecture
//!
//! - `tubescribe_error` - Error types
//! - `tubescribe_core` - Data model
//! - `tubescribe_interface` - Collaborator traits
//! - `tubescribe_storage` - In-memory stores
//! - `tubescribe_entitlement` - Entitlement gate and consumption recorder
//! - `tubescribe_cache` - Cache-aside lookup and single-flight
//! - `tubescribe_transcript` - Transcript retriever
//! - `tubescribe_mcp` - Agent tools and tool server
//!
//! This crate (`tubescribe`) re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod app;
mod config;
mod observability;

pub use app::{Tubescribe, TubescribeBuilder};
pub use config::{LoggingConfig, ServerConfig, TubescribeConfig};
pub use observability::{ObservabilityConfig, init_observability, init_observability_with_config};

pub use tubescribe_cache::{CacheConfig, CacheLookup, InFlightRegistry, TranscriptCache};
pub use tubescribe_core::*;
pub use tubescribe_entitlement::{
    ConsumptionRecorder, DenialReason, EntitlementConfig, EntitlementGate, GateDecision,
    RecordingConfig,
};
pub use tubescribe_error::*;
pub use tubescribe_interface::*;
pub use tubescribe_mcp::{
    FetchTranscriptTool, FieldKind, GenerateImageTool, InputSchema, ListImagesTool, McpError,
    McpResult, McpServer, McpTool, ToolContext, ToolOutcome, ToolRegistry,
};
pub use tubescribe_storage::{InMemoryImageStore, InMemoryTranscriptStore};
pub use tubescribe_transcript::{TranscriptRetriever, map_segments};

/// Loads a `.env` file from the current directory or its parents, if any.
///
/// Returns the path that was loaded.
pub fn load_dotenv() -> Option<std::path::PathBuf> {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "Loaded .env file");
            Some(path)
        }
        Err(e) => {
            tracing::debug!(error = %e, "No .env file loaded");
            None
        }
    }
}
