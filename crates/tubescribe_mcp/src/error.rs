//! Error types for the tool layer.

use tubescribe_error::{TubescribeError, TubescribeErrorKind};

/// Errors that can occur while dispatching or running a tool.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum McpError {
    /// Tool not found
    #[display("Tool not found: {}", _0)]
    ToolNotFound(String),

    /// Arguments do not match the tool's input schema
    #[display("Invalid arguments: {}", _0)]
    InvalidArguments(String),

    /// No identity for a tool that needs one
    #[display("Authentication required: {}", _0)]
    AuthenticationRequired(String),

    /// The plan forbids the action
    #[display("Entitlement denied: {}", _0)]
    EntitlementDenied(String),

    /// Entitlement data could not be evaluated
    #[display("Entitlement unavailable: {}", _0)]
    EntitlementUnavailable(String),

    /// Transcript or image provider failed
    #[display("Provider failure: {}", _0)]
    ProviderFailure(String),

    /// Tool execution failed
    #[display("Tool execution failed: {}", _0)]
    ExecutionFailed(String),

    /// Transport error
    #[display("Transport error: {}", _0)]
    Transport(String),
}

impl std::error::Error for McpError {}

impl McpError {
    /// Text placed in the `error` field of a structured result.
    ///
    /// Entitlement and authentication failures carry text meant for the end
    /// user and are passed through unprefixed.
    pub fn user_message(&self) -> String {
        match self {
            McpError::AuthenticationRequired(msg)
            | McpError::EntitlementDenied(msg)
            | McpError::EntitlementUnavailable(msg) => msg.clone(),
            other => other.to_string(),
        }
    }

    /// JSON-RPC style error code used by the server.
    pub fn code(&self) -> i64 {
        match self {
            McpError::ToolNotFound(_) => -32601,
            McpError::InvalidArguments(_) => -32602,
            McpError::Transport(_) => -32700,
            _ => -32603,
        }
    }
}

impl From<TubescribeError> for McpError {
    fn from(err: TubescribeError) -> Self {
        match err.kind() {
            TubescribeErrorKind::Auth(e) => McpError::AuthenticationRequired(e.message.clone()),
            TubescribeErrorKind::Provider(e) => McpError::ProviderFailure(e.kind.to_string()),
            TubescribeErrorKind::Storage(e) => McpError::ExecutionFailed(e.kind.to_string()),
            TubescribeErrorKind::Entitlement(e) => {
                McpError::EntitlementUnavailable(e.kind.to_string())
            }
            _ => McpError::ExecutionFailed(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for McpError {
    fn from(err: serde_json::Error) -> Self {
        McpError::InvalidArguments(err.to_string())
    }
}

/// Result type for tool operations.
pub type McpResult<T> = Result<T, McpError>;
