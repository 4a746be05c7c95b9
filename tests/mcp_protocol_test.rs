// ABOUTME: End-to-end MCP protocol tests over the newline-delimited stdio transport
// ABOUTME: Drives initialize, tools/list, tools/call and JSON-RPC error paths through in-memory pipes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;

use common::{resources_with, resources_with_failed_login, StubGarmin};
use garmin_mcp_server::jsonrpc::{error_codes, JsonRpcRequest};
use garmin_mcp_server::mcp::{McpRequestProcessor, ServerResources, StdioTransport};
use serde_json::{json, Value};
use tokio::io::{duplex, AsyncReadExt};

/// Feed `input` to the transport and collect every response line
async fn exchange(resources: Arc<ServerResources>, input: &str) -> Vec<Value> {
    let (mut client, server) = duplex(1 << 20);
    let transport = StdioTransport::new(resources);

    transport.serve(input.as_bytes(), server).await.unwrap();

    let mut output = String::new();
    client.read_to_string(&mut output).await.unwrap();
    output
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

fn by_id(responses: &[Value], id: i64) -> &Value {
    responses
        .iter()
        .find(|r| r["id"] == json!(id))
        .unwrap_or_else(|| panic!("no response with id {id} in {responses:?}"))
}

#[tokio::test]
async fn test_initialize_handshake() {
    let stub = StubGarmin::new();
    let responses = exchange(
        resources_with(&stub),
        concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2025-06-18","capabilities":{},"clientInfo":{"name":"test","version":"1.0"}}}"#,
            "\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n",
        ),
    )
    .await;

    assert_eq!(responses.len(), 1);
    let result = &responses[0]["result"];
    assert_eq!(result["serverInfo"]["name"], "garmin-mcp-server");
    assert!(result["protocolVersion"].is_string());
    assert!(result["capabilities"].is_object());
}

#[tokio::test]
async fn test_tools_list_exposes_every_endpoint() {
    let stub = StubGarmin::new();
    let responses = exchange(
        resources_with(&stub),
        "{\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"tools/list\"}\n",
    )
    .await;

    let tools = responses[0]["result"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 93);

    let add_weigh_in = tools
        .iter()
        .find(|t| t["name"] == "add_weigh_in")
        .unwrap();
    assert_eq!(add_weigh_in["inputSchema"]["type"], "object");
    assert_eq!(add_weigh_in["inputSchema"]["required"], json!(["weight"]));
    assert_eq!(
        add_weigh_in["inputSchema"]["properties"]["unitKey"]["default"],
        "kg"
    );
    assert!(tools.iter().any(|t| t["name"] == "get_gear_ativities"));
}

#[tokio::test]
async fn test_tools_list_works_without_login() {
    let responses = exchange(
        resources_with_failed_login("bad credentials"),
        "{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"tools/list\"}\n",
    )
    .await;

    assert_eq!(responses[0]["result"]["tools"].as_array().unwrap().len(), 93);
}

#[tokio::test]
async fn test_tools_call_success_and_failure() {
    let stub = StubGarmin::new();
    stub.reply("get_steps_data", json!([{"steps": 1200}]));
    stub.fail("get_hrv_data", "HTTP 500");

    let responses = exchange(
        resources_with(&stub),
        concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"tools/call","params":{"name":"get_steps_data","arguments":{"cdate":"2024-01-15"}}}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"get_hrv_data","arguments":{"cdate":"2024-01-15"}}}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"get_user_profile"}}"#,
            "\n",
        ),
    )
    .await;
    assert_eq!(responses.len(), 3);

    let steps = &by_id(&responses, 1)["result"];
    assert_eq!(steps["isError"], false);
    assert_eq!(steps["content"][0]["type"], "text");
    let text = steps["content"][0]["text"].as_str().unwrap();
    assert_eq!(serde_json::from_str::<Value>(text).unwrap(), json!([{"steps": 1200}]));

    let hrv = &by_id(&responses, 2)["result"];
    assert_eq!(hrv["isError"], true);
    assert_eq!(hrv["content"][0]["text"], "Error retrieving HRV data: HTTP 500");

    let profile = &by_id(&responses, 3)["result"];
    assert_eq!(profile["structuredContent"], json!({"method": "get_user_profile"}));
}

#[tokio::test]
async fn test_tools_call_protocol_errors() {
    let stub = StubGarmin::new();
    let responses = exchange(
        resources_with(&stub),
        concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"tools/call","params":{"name":"no_such_tool","arguments":{}}}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"get_stats","arguments":{}}}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":3,"method":"tools/call"}"#,
            "\n",
        ),
    )
    .await;

    for id in 1..=3 {
        assert_eq!(
            by_id(&responses, id)["error"]["code"],
            error_codes::INVALID_PARAMS
        );
    }
    assert!(by_id(&responses, 2)["error"]["message"]
        .as_str()
        .unwrap()
        .contains("cdate"));
    assert!(stub.calls().is_empty());
}

#[tokio::test]
async fn test_malformed_lines() {
    let stub = StubGarmin::new();
    let responses = exchange(
        resources_with(&stub),
        concat!(
            "{this is not json\n",
            "\n",
            r#"{"jsonrpc":"2.0","id":9}"#,
            "\n",
            r#"{"jsonrpc":"1.0","id":10,"method":"ping"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":11,"method":"sampling/createMessage"}"#,
            "\n",
        ),
    )
    .await;
    assert_eq!(responses.len(), 4);

    let parse_error = responses
        .iter()
        .find(|r| r["error"]["code"] == error_codes::PARSE_ERROR)
        .unwrap();
    assert_eq!(parse_error["id"], Value::Null);

    assert_eq!(by_id(&responses, 9)["error"]["code"], error_codes::INVALID_REQUEST);
    assert_eq!(by_id(&responses, 10)["error"]["code"], error_codes::INVALID_REQUEST);

    let unknown = &by_id(&responses, 11)["error"];
    assert_eq!(unknown["code"], error_codes::METHOD_NOT_FOUND);
    assert_eq!(unknown["message"], "Method not found: sampling/createMessage");
}

#[tokio::test]
async fn test_empty_lists_and_ping() {
    let stub = StubGarmin::new();
    let processor = McpRequestProcessor::new(resources_with(&stub));

    for (method, expected) in [
        ("ping", json!({})),
        ("resources/list", json!({"resources": []})),
        ("prompts/list", json!({"prompts": []})),
    ] {
        let response = processor
            .handle_request(JsonRpcRequest::with_id(method, None, json!(5)))
            .await
            .unwrap();
        assert_eq!(response.result, Some(expected));
        assert_eq!(response.id, Some(json!(5)));
    }
}

#[tokio::test]
async fn test_notifications_get_no_response() {
    let stub = StubGarmin::new();
    let processor = McpRequestProcessor::new(resources_with(&stub));

    let response = processor
        .handle_request(JsonRpcRequest::notification("notifications/cancelled", None))
        .await;
    assert!(response.is_none());
}

#[tokio::test]
async fn test_logout_over_the_wire() {
    let stub = StubGarmin::new();
    let resources = resources_with(&stub);

    let responses = exchange(
        Arc::clone(&resources),
        "{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"tools/call\",\"params\":{\"name\":\"logout\"}}\n",
    )
    .await;
    assert_eq!(
        responses[0]["result"]["content"][0]["text"],
        "Successfully logged out"
    );

    let responses = exchange(
        resources,
        "{\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"tools/call\",\"params\":{\"name\":\"get_devices\"}}\n",
    )
    .await;
    assert_eq!(responses[0]["result"]["isError"], true);
    assert_eq!(
        responses[0]["result"]["content"][0]["text"],
        "Error retrieving devices: Garmin session has been logged out"
    );
}
