//! Newline-delimited JSON tool server.
//!
//! One request per line:
//!
//! ```text
//! {"id": 1, "method": "tools/list"}
//! {"id": 2, "method": "tools/call", "params": {"name": "fetchTranscript", "arguments": {"videoId": "abc"}}, "identity": "u1"}
//! ```
//!
//! One response per line, `{"id", "result"}` or `{"id", "error": {"code", "message"}}`.
//! Unknown tools and invalid arguments are protocol errors; every other
//! failure arrives as a result carrying an `error` field. The optional
//! `identity` binds the caller for resolvers that read the task scope.

use crate::{McpError, McpResult, ToolRegistry};
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, instrument, warn};
use tubescribe_core::Identity;
use tubescribe_interface::ScopedIdentity;

#[derive(Debug, Deserialize)]
struct Request {
    #[serde(default)]
    id: Value,
    method: String,
    #[serde(default)]
    params: Value,
    #[serde(default)]
    identity: Option<Identity>,
}

#[derive(Debug, Deserialize)]
struct CallParams {
    name: String,
    #[serde(default = "empty_arguments")]
    arguments: Value,
}

fn empty_arguments() -> Value {
    json!({})
}

fn error_response(id: Value, err: &McpError) -> Value {
    json!({
        "id": id,
        "error": { "code": err.code(), "message": err.to_string() },
    })
}

/// Tool server for Tubescribe.
#[derive(Debug)]
pub struct McpServer {
    name: String,
    version: String,
    tools: ToolRegistry,
}

impl McpServer {
    /// Creates a new server builder.
    pub fn builder() -> McpServerBuilder {
        McpServerBuilder::default()
    }

    /// Server name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Server version.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Registered tools.
    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Serves requests from stdin until it closes.
    pub async fn run_stdio(&self) -> McpResult<()> {
        self.run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }

    /// Serves requests from `reader`, writing responses to `writer`, until EOF.
    ///
    /// A malformed line is answered with an error and does not stop the
    /// loop; only a failing reader or writer does.
    #[instrument(skip(self, reader, writer), fields(name = %self.name, version = %self.version))]
    pub async fn run<R, W>(&self, mut reader: R, mut writer: W) -> McpResult<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!(tools = self.tools.len(), "Tool server ready");

        let mut buf = Vec::new();
        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .await
                .map_err(|e| McpError::Transport(e.to_string()))?;
            if read == 0 {
                break;
            }

            let response = match std::str::from_utf8(&buf) {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => self.handle_line(line).await,
                Err(e) => {
                    warn!(error = %e, "Request is not valid UTF-8");
                    error_response(Value::Null, &McpError::Transport(e.to_string()))
                }
            };

            let mut bytes = serde_json::to_vec(&response)
                .map_err(|e| McpError::Transport(e.to_string()))?;
            bytes.push(b'\n');
            writer
                .write_all(&bytes)
                .await
                .map_err(|e| McpError::Transport(e.to_string()))?;
            writer
                .flush()
                .await
                .map_err(|e| McpError::Transport(e.to_string()))?;
        }

        info!("Input closed, tool server stopping");
        Ok(())
    }

    /// Answers one request line.
    pub async fn handle_line(&self, line: &str) -> Value {
        let request: Request = match serde_json::from_str(line) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "Unparseable request");
                return error_response(Value::Null, &McpError::Transport(e.to_string()));
            }
        };

        match request.identity.clone() {
            Some(identity) => ScopedIdentity::scope(identity, self.dispatch(request)).await,
            None => self.dispatch(request).await,
        }
    }

    async fn dispatch(&self, request: Request) -> Value {
        debug!(method = %request.method, "Dispatching request");
        match request.method.as_str() {
            "tools/list" => json!({
                "id": request.id,
                "result": { "tools": self.tools.descriptors() },
            }),
            "tools/call" => {
                let params: CallParams = match serde_json::from_value(request.params) {
                    Ok(params) => params,
                    Err(e) => {
                        return error_response(
                            request.id,
                            &McpError::InvalidArguments(e.to_string()),
                        );
                    }
                };
                match self.tools.invoke(&params.name, params.arguments).await {
                    Ok(outcome) => json!({ "id": request.id, "result": outcome.into_payload() }),
                    Err(e) => error_response(request.id, &e),
                }
            }
            other => json!({
                "id": request.id,
                "error": { "code": -32601, "message": format!("Method not found: {}", other) },
            }),
        }
    }
}

/// Builder for [`McpServer`].
#[derive(Default)]
pub struct McpServerBuilder {
    name: Option<String>,
    version: Option<String>,
    tools: Option<ToolRegistry>,
}

impl McpServerBuilder {
    /// Sets the server name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the server version.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets the tool registry.
    pub fn tools(mut self, tools: ToolRegistry) -> Self {
        self.tools = Some(tools);
        self
    }

    /// Builds the server.
    pub fn build(self) -> McpResult<McpServer> {
        let tools = self
            .tools
            .ok_or_else(|| McpError::ExecutionFailed("tool registry not set".to_string()))?;
        Ok(McpServer {
            name: self.name.unwrap_or_else(|| "tubescribe".to_string()),
            version: self
                .version
                .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string()),
            tools,
        })
    }
}
