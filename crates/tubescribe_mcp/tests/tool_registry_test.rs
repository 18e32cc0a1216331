//! Tests for tool registration, validation and gated dispatch.

mod test_utils;

use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use test_utils::{MockEntitlements, gate};
use tubescribe_core::{FeatureFlag, FeatureUsage};
use tubescribe_interface::FixedIdentity;
use tubescribe_mcp::{
    FieldKind, InputSchema, McpError, McpResult, McpTool, ToolContext, ToolOutcome, ToolRegistry,
};

#[derive(Clone, Copy)]
enum Behavior {
    Succeed,
    Fail,
    Panic,
}

/// Mock tool counting executions.
struct MockTool {
    name: &'static str,
    behavior: Behavior,
    entitlement: Option<FeatureFlag>,
    calls: AtomicUsize,
}

impl MockTool {
    fn new(name: &'static str, behavior: Behavior) -> Self {
        Self {
            name,
            behavior,
            entitlement: None,
            calls: AtomicUsize::new(0),
        }
    }

    fn gated(mut self, flag: FeatureFlag) -> Self {
        self.entitlement = Some(flag);
        self
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl McpTool for MockTool {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        "A mock tool"
    }

    fn input_schema(&self) -> InputSchema {
        InputSchema::new().required("videoId", FieldKind::String, "The video ID")
    }

    fn entitlement(&self) -> Option<FeatureFlag> {
        self.entitlement
    }

    async fn execute(&self, ctx: &ToolContext, input: Value) -> McpResult<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            Behavior::Succeed => Ok(json!({
                "videoId": input["videoId"],
                "caller": ctx.identity().map(|id| id.to_string()),
            })),
            Behavior::Fail => Err(McpError::ExecutionFailed("backend exploded".to_string())),
            Behavior::Panic => panic!("executor bug"),
        }
    }
}

fn registry_with(usage: Vec<FeatureUsage>, identity: FixedIdentity) -> ToolRegistry {
    let service = Arc::new(MockEntitlements::new(usage));
    ToolRegistry::new(Arc::new(identity), gate(service))
}

fn registry() -> ToolRegistry {
    registry_with(vec![], FixedIdentity::new("u1"))
}

#[tokio::test]
async fn test_registry_register_and_list() {
    let mut registry = registry();
    assert!(registry.is_empty());

    registry.register(Arc::new(MockTool::new("zeta", Behavior::Succeed)));
    registry.register(Arc::new(MockTool::new("alpha", Behavior::Succeed)));

    assert_eq!(registry.len(), 2);
    assert!(registry.get("alpha").is_some());
    assert!(registry.get("missing").is_none());

    let names: Vec<String> = registry.descriptors().into_iter().map(|d| d.name).collect();
    assert_eq!(names, vec!["alpha", "zeta"]);
}

#[tokio::test]
async fn test_descriptor_carries_json_schema() {
    let mut registry = registry();
    registry.register(Arc::new(MockTool::new("echo", Behavior::Succeed)));

    let descriptor = &registry.descriptors()[0];
    let value = serde_json::to_value(descriptor).expect("serialize");

    assert_eq!(value["description"], "A mock tool");
    assert_eq!(value["inputSchema"]["required"], json!(["videoId"]));
}

#[tokio::test]
async fn test_unknown_tool_is_rejected() {
    let mut registry = registry();
    let tool = Arc::new(MockTool::new("echo", Behavior::Succeed));
    registry.register(tool.clone());

    let err = registry
        .invoke("nope", json!({"videoId": "abc"}))
        .await
        .expect_err("unknown tool");

    assert_eq!(err, McpError::ToolNotFound("nope".to_string()));
    assert_eq!(tool.calls(), 0);
}

#[tokio::test]
async fn test_wrong_type_is_rejected_before_execution() {
    let mut registry = registry();
    let tool = Arc::new(MockTool::new("echo", Behavior::Succeed));
    registry.register(tool.clone());

    let err = registry
        .invoke("echo", json!({"videoId": 42}))
        .await
        .expect_err("invalid arguments");

    assert!(matches!(err, McpError::InvalidArguments(_)));
    assert_eq!(tool.calls(), 0);
}

#[tokio::test]
async fn test_missing_field_is_rejected_before_gate() {
    let service = Arc::new(MockEntitlements::new(vec![FeatureUsage::new(
        "generate-image",
        0,
        5,
    )]));
    let mut registry = ToolRegistry::new(Arc::new(FixedIdentity::new("u1")), gate(service.clone()));
    let tool = Arc::new(MockTool::new("draw", Behavior::Succeed).gated(FeatureFlag::ImageGeneration));
    registry.register(tool.clone());

    let result = registry.invoke("draw", json!({})).await;

    assert!(matches!(result, Err(McpError::InvalidArguments(_))));
    assert_eq!(service.usage_calls(), 0);
    assert_eq!(tool.calls(), 0);
}

#[tokio::test]
async fn test_success_payload_is_returned() {
    let mut registry = registry();
    registry.register(Arc::new(MockTool::new("echo", Behavior::Succeed)));

    let outcome = registry
        .invoke("echo", json!({"videoId": "abc"}))
        .await
        .expect("dispatched");

    assert_eq!(
        outcome,
        ToolOutcome::Success(json!({"videoId": "abc", "caller": "u1"}))
    );
}

#[tokio::test]
async fn test_executor_error_becomes_structured_error() {
    let mut registry = registry();
    registry.register(Arc::new(MockTool::new("flaky", Behavior::Fail)));

    let outcome = registry
        .invoke("flaky", json!({"videoId": "abc"}))
        .await
        .expect("dispatched");

    assert!(outcome.is_error());
    assert_eq!(
        outcome.into_payload(),
        json!({"error": "Tool execution failed: backend exploded"})
    );
}

#[tokio::test]
async fn test_executor_panic_becomes_structured_error() {
    let mut registry = registry();
    registry.register(Arc::new(MockTool::new("buggy", Behavior::Panic)));

    let outcome = registry
        .invoke("buggy", json!({"videoId": "abc"}))
        .await
        .expect("dispatched");

    let payload = outcome.into_payload();
    assert!(
        payload["error"]
            .as_str()
            .is_some_and(|msg| msg.contains("executor bug"))
    );
}

#[tokio::test]
async fn test_denied_gate_skips_executor() {
    let mut registry = registry_with(
        vec![FeatureUsage::new("generate-image", 3, 3)],
        FixedIdentity::new("u1"),
    );
    let tool = Arc::new(MockTool::new("draw", Behavior::Succeed).gated(FeatureFlag::ImageGeneration));
    registry.register(tool.clone());

    let outcome = registry
        .invoke("draw", json!({"videoId": "abc"}))
        .await
        .expect("dispatched");

    assert_eq!(
        outcome,
        ToolOutcome::Error(
            "You have reached your image generation limit. Please upgrade your plan to continue using this feature."
                .to_string()
        )
    );
    assert_eq!(tool.calls(), 0);
}

#[tokio::test]
async fn test_gate_system_error_skips_executor() {
    let mut registry = registry_with(
        vec![FeatureUsage {
            event_subtype: "generate-image".to_string(),
            usage: None,
            allocation: Some(3),
        }],
        FixedIdentity::new("u1"),
    );
    let tool = Arc::new(MockTool::new("draw", Behavior::Succeed).gated(FeatureFlag::ImageGeneration));
    registry.register(tool.clone());

    let outcome = registry
        .invoke("draw", json!({"videoId": "abc"}))
        .await
        .expect("dispatched");

    assert_eq!(
        outcome,
        ToolOutcome::Error("System Error - Contact Support".to_string())
    );
    assert_eq!(tool.calls(), 0);
}

#[tokio::test]
async fn test_gated_tool_without_identity() {
    let mut registry = registry_with(
        vec![FeatureUsage::new("generate-image", 0, 3)],
        FixedIdentity::anonymous(),
    );
    let tool = Arc::new(MockTool::new("draw", Behavior::Succeed).gated(FeatureFlag::ImageGeneration));
    registry.register(tool.clone());

    let outcome = registry
        .invoke("draw", json!({"videoId": "abc"}))
        .await
        .expect("dispatched");

    assert_eq!(outcome, ToolOutcome::Error("User not found".to_string()));
    assert_eq!(tool.calls(), 0);
}

#[tokio::test]
async fn test_ungated_tool_skips_entitlement_lookup() {
    let service = Arc::new(MockEntitlements::new(vec![]));
    let mut registry = ToolRegistry::new(Arc::new(FixedIdentity::new("u1")), gate(service.clone()));
    registry.register(Arc::new(MockTool::new("echo", Behavior::Succeed)));

    registry
        .invoke("echo", json!({"videoId": "abc"}))
        .await
        .expect("dispatched");

    assert_eq!(service.usage_calls(), 0);
}
