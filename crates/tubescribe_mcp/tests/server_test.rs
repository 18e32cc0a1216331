//! Tests for the newline-delimited JSON server.

mod test_utils;

use serde_json::{Value, json};
use std::sync::Arc;
use test_utils::{fixture, generous_plan};
use tubescribe_interface::{FixedIdentity, ScopedIdentity};
use tubescribe_mcp::McpServer;

fn server(identity: Arc<dyn tubescribe_interface::IdentityResolver>) -> McpServer {
    McpServer::builder()
        .name("tubescribe-test")
        .version("0.0.1")
        .tools(fixture(identity, generous_plan()).registry)
        .build()
        .expect("server")
}

#[tokio::test]
async fn test_tools_list() {
    let server = server(Arc::new(FixedIdentity::new("u1")));

    let response = server
        .handle_line(r#"{"id": 1, "method": "tools/list"}"#)
        .await;

    assert_eq!(response["id"], 1);
    let names: Vec<&str> = response["result"]["tools"]
        .as_array()
        .expect("tools")
        .iter()
        .filter_map(|tool| tool["name"].as_str())
        .collect();
    assert_eq!(names, vec!["fetchTranscript", "generateImage", "getImages"]);
}

#[tokio::test]
async fn test_tools_call_returns_payload() {
    let server = server(Arc::new(FixedIdentity::new("u1")));

    let response = server
        .handle_line(
            r#"{"id": "a", "method": "tools/call", "params": {"name": "fetchTranscript", "arguments": {"videoId": "abc"}}}"#,
        )
        .await;

    assert_eq!(response["id"], "a");
    assert_eq!(response["result"]["transcript"][1]["timestamp"], "1:05");
}

#[tokio::test]
async fn test_unknown_tool_is_protocol_error() {
    let server = server(Arc::new(FixedIdentity::new("u1")));

    let response = server
        .handle_line(r#"{"id": 2, "method": "tools/call", "params": {"name": "nope"}}"#)
        .await;

    assert_eq!(response["error"]["code"], -32601);
    assert!(response.get("result").is_none());
}

#[tokio::test]
async fn test_invalid_arguments_is_protocol_error() {
    let server = server(Arc::new(FixedIdentity::new("u1")));

    let response = server
        .handle_line(
            r#"{"id": 3, "method": "tools/call", "params": {"name": "fetchTranscript", "arguments": {"videoId": 7}}}"#,
        )
        .await;

    assert_eq!(response["error"]["code"], -32602);
}

#[tokio::test]
async fn test_unparseable_line() {
    let server = server(Arc::new(FixedIdentity::new("u1")));

    let response = server.handle_line("{not json").await;

    assert_eq!(response["id"], Value::Null);
    assert_eq!(response["error"]["code"], -32700);
}

#[tokio::test]
async fn test_unknown_method() {
    let server = server(Arc::new(FixedIdentity::new("u1")));

    let response = server
        .handle_line(r#"{"id": 4, "method": "resources/list"}"#)
        .await;

    assert_eq!(response["error"]["code"], -32601);
}

#[tokio::test]
async fn test_request_identity_is_scoped() {
    let server = server(Arc::new(ScopedIdentity));

    let anonymous = server
        .handle_line(
            r#"{"id": 5, "method": "tools/call", "params": {"name": "getImages", "arguments": {"videoId": "abc"}}}"#,
        )
        .await;
    let scoped = server
        .handle_line(
            r#"{"id": 6, "method": "tools/call", "params": {"name": "getImages", "arguments": {"videoId": "abc"}}, "identity": "u1"}"#,
        )
        .await;

    assert_eq!(anonymous["result"], json!({"error": "User not found"}));
    assert_eq!(scoped["result"], json!({"images": []}));
}

#[tokio::test]
async fn test_run_answers_each_line() {
    let server = server(Arc::new(FixedIdentity::new("u1")));
    let input = concat!(
        r#"{"id": 1, "method": "tools/list"}"#,
        "\n",
        "\n",
        r#"{"id": 2, "method": "tools/call", "params": {"name": "getImages", "arguments": {"videoId": "abc"}}}"#,
        "\n",
    );
    let mut output = Vec::new();

    server
        .run(input.as_bytes(), &mut output)
        .await
        .expect("run");

    let text = String::from_utf8(output).expect("utf8");
    let responses: Vec<Value> = text
        .lines()
        .map(|line| serde_json::from_str(line).expect("json line"))
        .collect();
    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["id"], 1);
    assert_eq!(responses[1]["result"], json!({"images": []}));
}

#[tokio::test]
async fn test_run_survives_non_utf8_line() {
    let server = server(Arc::new(FixedIdentity::new("u1")));
    let mut input = Vec::new();
    input.extend_from_slice(b"{\"id\": 1, \"method\": \"tools/list\"}\n");
    input.extend_from_slice(&[0xff, 0xfe, b'\n']);
    input.extend_from_slice(b"{\"id\": 3, \"method\": \"tools/list\"}\n");
    let mut output = Vec::new();

    server
        .run(input.as_slice(), &mut output)
        .await
        .expect("run");

    let text = String::from_utf8(output).expect("utf8");
    let responses: Vec<Value> = text
        .lines()
        .map(|line| serde_json::from_str(line).expect("json line"))
        .collect();
    assert_eq!(responses.len(), 3);
    assert_eq!(responses[1]["id"], Value::Null);
    assert_eq!(responses[1]["error"]["code"], -32700);
    assert_eq!(responses[2]["id"], 3);
    assert!(responses[2]["result"]["tools"].is_array());
}

#[test]
fn test_builder_requires_tools() {
    assert!(McpServer::builder().name("x").build().is_err());
}
