//! Agent tools for Tubescribe.
//!
//! Tools are named operations with a typed input schema. The
//! [`ToolRegistry`] validates arguments, consults the entitlement gate for
//! tools that declare a metered feature, runs the tool and turns every
//! failure past validation into a structured `{ "error": ... }` payload.
//!
//! # Tools
//!
//! - `fetchTranscript` - transcript of a video, cached per identity
//! - `generateImage` - image for a video, gated on image generation
//! - `getImages` - images the caller generated for a video
//!
//! # Usage
//!
//! ```no_run
//! use tubescribe_mcp::{McpServer, ToolRegistry};
//!
//! # async fn serve(registry: ToolRegistry) -> tubescribe_mcp::McpResult<()> {
//! let server = McpServer::builder()
//!     .name("tubescribe")
//!     .version(env!("CARGO_PKG_VERSION"))
//!     .tools(registry)
//!     .build()?;
//! server.run_stdio().await
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod registry;
mod schema;
mod server;
pub mod tools;

pub use error::{McpError, McpResult};
pub use registry::{ToolContext, ToolDescriptor, ToolOutcome, ToolRegistry};
pub use schema::{FieldKind, FieldSpec, InputSchema};
pub use server::{McpServer, McpServerBuilder};
pub use tools::{FetchTranscriptTool, GenerateImageTool, ListImagesTool, McpTool};
