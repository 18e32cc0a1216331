//! Tool registry and gated dispatch.

use crate::tools::McpTool;
use crate::{McpError, McpResult};
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::any::Any;
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};
use tubescribe_core::Identity;
use tubescribe_entitlement::{EntitlementGate, GateDecision};
use tubescribe_interface::IdentityResolver;

/// Per-invocation context handed to a tool.
#[derive(Debug, Clone, Default)]
pub struct ToolContext {
    identity: Option<Identity>,
}

impl ToolContext {
    /// Creates a context for `identity`.
    pub fn new(identity: Option<Identity>) -> Self {
        Self { identity }
    }

    /// Identity of the caller, if any.
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Identity of the caller, or an authentication error.
    pub fn require_identity(&self) -> McpResult<&Identity> {
        self.identity
            .as_ref()
            .ok_or_else(|| McpError::AuthenticationRequired("User not found".to_string()))
    }
}

/// What the agent sees of a registered tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    /// Tool name
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// JSON Schema of the arguments
    pub input_schema: Value,
}

/// Result of a dispatched invocation that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome {
    /// The tool's success payload
    Success(Value),
    /// A failure the agent can react to
    Error(String),
}

impl ToolOutcome {
    /// True for the error variant.
    pub fn is_error(&self) -> bool {
        matches!(self, ToolOutcome::Error(_))
    }

    /// Payload returned to the agent; errors become `{ "error": message }`.
    pub fn into_payload(self) -> Value {
        match self {
            ToolOutcome::Success(value) => value,
            ToolOutcome::Error(message) => json!({ "error": message }),
        }
    }
}

impl From<McpError> for ToolOutcome {
    fn from(err: McpError) -> Self {
        ToolOutcome::Error(err.user_message())
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Registry for tools, dispatching invocations through the entitlement gate.
///
/// Tools are registered at startup; the registry is read-only afterwards
/// and shared across requests.
#[derive(Clone)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn McpTool>>,
    identity: Arc<dyn IdentityResolver>,
    gate: Arc<EntitlementGate>,
}

impl ToolRegistry {
    /// Creates an empty registry.
    pub fn new(identity: Arc<dyn IdentityResolver>, gate: Arc<EntitlementGate>) -> Self {
        Self {
            tools: HashMap::new(),
            identity,
            gate,
        }
    }

    /// Registers a tool, replacing any tool of the same name.
    pub fn register(&mut self, tool: Arc<dyn McpTool>) {
        if self.tools.insert(tool.name().to_string(), tool.clone()).is_some() {
            warn!(tool = tool.name(), "Replaced previously registered tool");
        }
    }

    /// Gets a tool by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn McpTool>> {
        self.tools.get(name).cloned()
    }

    /// Lists all registered tools, sorted by name.
    pub fn list(&self) -> Vec<Arc<dyn McpTool>> {
        let mut tools: Vec<_> = self.tools.values().cloned().collect();
        tools.sort_by(|a, b| a.name().cmp(b.name()));
        tools
    }

    /// Descriptors of all registered tools, sorted by name.
    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        self.list()
            .iter()
            .map(|tool| ToolDescriptor {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                input_schema: tool.input_schema().to_json_schema(),
            })
            .collect()
    }

    /// Gets the number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Returns true if no tools are registered.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Invokes the tool `name` with `args`.
    ///
    /// # Errors
    ///
    /// Fails only with [`McpError::ToolNotFound`] or
    /// [`McpError::InvalidArguments`], before anything runs. Every later
    /// failure (missing identity, denial, executor error or panic) is
    /// returned as [`ToolOutcome::Error`].
    #[instrument(skip(self, args), fields(tool = name))]
    pub async fn invoke(&self, name: &str, args: Value) -> McpResult<ToolOutcome> {
        let tool = self
            .get(name)
            .ok_or_else(|| McpError::ToolNotFound(name.to_string()))?;

        if let Err(e) = tool.input_schema().validate(&args) {
            warn!(error = %e, "Rejected tool arguments");
            return Err(e);
        }

        let ctx = ToolContext::new(self.identity.resolve().await);

        if let Some(flag) = tool.entitlement() {
            let identity = match ctx.require_identity() {
                Ok(identity) => identity,
                Err(e) => {
                    warn!("Gated tool called without identity");
                    return Ok(e.into());
                }
            };
            match self.gate.check_flag(identity, flag).await {
                GateDecision::Allowed(status) => {
                    debug!(
                        feature = %flag,
                        usage = status.current_usage(),
                        allocation = status.allocation(),
                        "Entitlement granted"
                    );
                }
                GateDecision::Denied { reason, message } => {
                    warn!(feature = %flag, reason = %reason, "Entitlement denied");
                    return Ok(McpError::EntitlementDenied(message).into());
                }
                GateDecision::SystemError { message } => {
                    error!(feature = %flag, "Entitlement check failed");
                    return Ok(McpError::EntitlementUnavailable(message).into());
                }
            }
        }

        match AssertUnwindSafe(tool.execute(&ctx, args))
            .catch_unwind()
            .await
        {
            Ok(Ok(value)) => {
                info!("Tool succeeded");
                Ok(ToolOutcome::Success(value))
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Tool failed");
                Ok(e.into())
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!(panic = %message, "Tool panicked");
                Ok(McpError::ExecutionFailed(message).into())
            }
        }
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.tools.keys().collect();
        names.sort();
        f.debug_struct("ToolRegistry")
            .field("tools", &names)
            .finish_non_exhaustive()
    }
}
