// ABOUTME: Integration tests for Garmin tool dispatch against an in-memory Garmin account
// ABOUTME: Covers pass-through reads, confirmations, empty-result messages, failures and session state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;

use common::{context, resources_with, resources_with_failed_login, StubGarmin};
use garmin_mcp_server::errors::ErrorCode;
use garmin_mcp_server::session::SessionState;
use garmin_mcp_server::tools::manifest;
use garmin_mcp_server::tools::{
    Endpoint, McpTool, Outcome, ParamKind, ParamSpec, ToolResult,
};
use serde_json::{json, Map, Value};

async fn call(stub: &Arc<StubGarmin>, tool: &str, args: Value) -> ToolResult {
    let resources = resources_with(stub);
    resources
        .registry
        .execute(tool, args, &context(&resources))
        .await
        .unwrap()
}

fn text(result: &ToolResult) -> &str {
    result.content.as_str().expect("text result")
}

/// Arguments satisfying every required parameter
fn sample_args(params: &[ParamSpec]) -> Value {
    let mut args = Map::new();
    for param in params.iter().filter(|p| p.is_required()) {
        let value = match param.kind {
            ParamKind::String => json!("2024-01-15"),
            ParamKind::Integer => json!(42),
            ParamKind::Number => json!(70.5),
            ParamKind::Boolean => json!(true),
            ParamKind::Object => json!({"query": "{ activities }"}),
        };
        args.insert(param.name.to_owned(), value);
    }
    Value::Object(args)
}

fn all_endpoints() -> Vec<Endpoint> {
    manifest::all()
        .into_iter()
        .flat_map(|(_, endpoints)| endpoints)
        .collect()
}

#[tokio::test]
async fn test_every_endpoint_forwards_exactly_one_call() {
    for endpoint in all_endpoints() {
        let stub = StubGarmin::new();
        let resources = resources_with(&stub);
        let result = endpoint
            .execute(sample_args(&endpoint.params), &context(&resources))
            .await
            .unwrap();

        let call = stub.single_call();
        assert!(!result.is_error, "{} failed: {:?}", endpoint.name, result);

        match endpoint.outcome {
            Outcome::Passthrough | Outcome::EmptyMessage(_) => {
                assert_eq!(
                    result.content,
                    json!({ "method": call.method }),
                    "{} altered the value",
                    endpoint.name
                );
            }
            Outcome::Confirm(prefix) => {
                let message = text(&result);
                assert!(message.starts_with("Successfully"), "{message}");
                assert_eq!(
                    message,
                    format!("{prefix}: {{\"method\":\"{}\"}}", call.method)
                );
            }
            Outcome::Acknowledge(_) => {
                assert!(text(&result).starts_with("Successfully"), "{result:?}");
            }
        }
    }
}

#[tokio::test]
async fn test_every_endpoint_reports_failures_with_its_action() {
    for endpoint in all_endpoints() {
        let stub = StubGarmin::new();
        stub.fail_all("connection reset by peer");
        let resources = resources_with(&stub);
        let result = endpoint
            .execute(sample_args(&endpoint.params), &context(&resources))
            .await
            .unwrap();

        assert!(result.is_error, "{} hid a failure", endpoint.name);
        assert_eq!(
            text(&result),
            format!("Error {}: connection reset by peer", endpoint.action)
        );
    }
}

#[tokio::test]
async fn test_activities_for_date_empty() {
    let stub = StubGarmin::new();
    stub.reply("get_activities_fordate", json!([]));

    let result = call(&stub, "get_activities_fordate", json!({"date": "2024-01-15"})).await;

    assert_eq!(text(&result), "No activities found for 2024-01-15");
    assert_eq!(stub.single_call().args, vec![json!("2024-01-15")]);
}

#[tokio::test]
async fn test_sleep_data_passes_through() {
    let stub = StubGarmin::new();
    stub.reply("get_sleep_data", json!({"sleepTimeSeconds": 28800}));

    let result = call(&stub, "get_sleep_data", json!({"cdate": "2024-01-15"})).await;

    assert!(!result.is_error);
    assert_eq!(result.content, json!({"sleepTimeSeconds": 28800}));
}

#[tokio::test]
async fn test_add_weigh_in_failure() {
    let stub = StubGarmin::new();
    stub.fail("add_weigh_in", "invalid unit");

    let result = call(
        &stub,
        "add_weigh_in",
        json!({"weight": 70, "unitKey": "kg", "timestamp": ""}),
    )
    .await;

    assert!(result.is_error);
    assert_eq!(text(&result), "Error adding weigh-in: invalid unit");
    assert_eq!(
        stub.single_call().args,
        vec![json!(70.0), json!("kg"), Value::Null]
    );
}

#[tokio::test]
async fn test_delete_weigh_ins_confirmation() {
    let stub = StubGarmin::new();
    stub.reply("delete_weigh_ins", json!({"deleted": 3}));

    let result = call(
        &stub,
        "delete_weigh_ins",
        json!({"cdate": "2024-01-15", "delete_all": true}),
    )
    .await;

    let message = text(&result);
    assert!(message.contains("Successfully deleted weigh-ins"));
    assert!(message.contains(r#"{"deleted":3}"#));
    assert_eq!(
        stub.single_call().args,
        vec![json!("2024-01-15"), json!(true)]
    );
}

#[tokio::test]
async fn test_activities_by_date_empty_messages() {
    let stub = StubGarmin::new();
    stub.reply("get_activities_by_date", json!([]));

    let result = call(
        &stub,
        "get_activities_by_date",
        json!({"start_date": "2024-01-01", "end_date": "2024-01-31"}),
    )
    .await;
    assert_eq!(
        text(&result),
        "No activities found between 2024-01-01 and 2024-01-31"
    );

    let result = call(
        &stub,
        "get_activities_by_date",
        json!({"start_date": "2024-01-01", "end_date": "2024-01-31", "activity_type": "running"}),
    )
    .await;
    assert_eq!(
        text(&result),
        "No activities found between 2024-01-01 and 2024-01-31 for activity type 'running'"
    );

    let calls = stub.calls();
    assert_eq!(calls[0].args[2], Value::Null);
    assert_eq!(calls[1].args[2], json!("running"));
}

#[tokio::test]
async fn test_activity_reads_substitute_messages() {
    let cases = [
        ("get_activity", json!(null), "No activity found with ID 17"),
        (
            "get_activity_splits",
            json!({}),
            "No splits found for activity with ID 17",
        ),
        (
            "get_activity_weather",
            json!(""),
            "No weather data found for activity with ID 17",
        ),
        (
            "get_activity_exercise_sets",
            json!(0),
            "No exercise sets found for activity with ID 17",
        ),
    ];

    for (tool, empty, expected) in cases {
        let stub = StubGarmin::new();
        stub.reply(tool, empty);
        let result = call(&stub, tool, json!({"activity_id": 17})).await;
        assert_eq!(text(&result), expected);
    }
}

#[tokio::test]
async fn test_recent_activities_page() {
    let stub = StubGarmin::new();
    stub.reply("get_activities", json!([]));

    let result = call(&stub, "get_recent_activities", json!({})).await;

    assert_eq!(text(&result), "No recent activities found");
    let call = stub.single_call();
    assert_eq!(call.method, "get_activities");
    assert_eq!(call.args, vec![json!(0), json!(20)]);
}

#[tokio::test]
async fn test_defaults_are_forwarded() {
    let stub = StubGarmin::new();
    call(&stub, "get_goals", json!({})).await;
    call(&stub, "get_gear_ativities", json!({"gearUUID": "abc"})).await;
    call(&stub, "download_activity", json!({"activity_id": 5})).await;
    call(&stub, "get_workouts", json!({})).await;

    let calls = stub.calls();
    assert_eq!(calls[0].args, vec![json!("active"), json!(1), json!(30)]);
    assert_eq!(calls[1].method, "get_gear_activities");
    assert_eq!(calls[1].args, vec![json!("abc"), json!(9999)]);
    assert_eq!(calls[2].args, vec![json!(5), json!(2)]);
    assert_eq!(calls[3].args, vec![json!(0), json!(100)]);
}

#[tokio::test]
async fn test_download_acknowledges_without_body() {
    let stub = StubGarmin::new();
    stub.reply("download_activity", json!("<TrainingCenterDatabase/>"));

    let result = call(&stub, "download_activity", json!({"activity_id": 12345})).await;

    assert_eq!(text(&result), "Successfully downloaded activity 12345");
}

#[tokio::test]
async fn test_request_reload_acknowledgement() {
    let stub = StubGarmin::new();
    let result = call(&stub, "request_reload", json!({"cdate": "2024-01-15"})).await;
    assert_eq!(text(&result), "Successfully requested reload for 2024-01-15");
}

#[tokio::test]
async fn test_body_composition_optional_fields() {
    let stub = StubGarmin::new();
    call(
        &stub,
        "add_body_composition",
        json!({"timestamp": "2024-01-15T08:00:00", "weight": 72.4, "percent_fat": 18.2}),
    )
    .await;

    let reading = &stub.single_call().args[0];
    assert_eq!(reading["weight"], json!(72.4));
    assert_eq!(reading["percent_fat"], json!(18.2));
    assert_eq!(reading["bmi"], Value::Null);
    assert_eq!(reading["timestamp"], json!("2024-01-15T08:00:00"));
}

#[tokio::test]
async fn test_blood_pressure_blank_notes_are_omitted() {
    let stub = StubGarmin::new();
    call(
        &stub,
        "set_blood_pressure",
        json!({"systolic": 120, "diastolic": 80, "pulse": 60}),
    )
    .await;

    assert_eq!(
        stub.single_call().args,
        vec![json!([120, 80, 60, null, null])]
    );
}

#[tokio::test]
async fn test_missing_argument_never_reaches_garmin() {
    let stub = StubGarmin::new();
    let resources = resources_with(&stub);

    let err = resources
        .registry
        .execute("get_sleep_data", json!({}), &context(&resources))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::MissingRequiredField);
    assert!(err.message.contains("cdate"));
    assert!(stub.calls().is_empty());
}

#[tokio::test]
async fn test_wrong_argument_type() {
    let stub = StubGarmin::new();
    let resources = resources_with(&stub);

    let err = resources
        .registry
        .execute(
            "get_activity",
            json!({"activity_id": "not-a-number"}),
            &context(&resources),
        )
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::InvalidInput);
    assert!(stub.calls().is_empty());
}

#[tokio::test]
async fn test_failed_login_is_reported_per_call() {
    let resources = resources_with_failed_login("bad credentials");

    let result = resources
        .registry
        .execute(
            "get_stats",
            json!({"cdate": "2024-01-15"}),
            &context(&resources),
        )
        .await
        .unwrap();

    assert!(result.is_error);
    assert_eq!(
        text(&result),
        "Error retrieving stats: Garmin login failed: bad credentials"
    );
}

#[tokio::test]
async fn test_logout_ends_session() {
    let stub = StubGarmin::new();
    let resources = resources_with(&stub);
    let ctx = context(&resources);

    let result = resources
        .registry
        .execute("logout", json!({}), &ctx)
        .await
        .unwrap();
    assert_eq!(text(&result), "Successfully logged out");
    assert_eq!(resources.session.state().await, SessionState::LoggedOut);

    let result = resources
        .registry
        .execute("get_full_name", json!({}), &ctx)
        .await
        .unwrap();
    assert!(result.is_error);
    assert_eq!(
        text(&result),
        "Error retrieving full name: Garmin session has been logged out"
    );
    assert_eq!(stub.calls().len(), 1);
}

#[tokio::test]
async fn test_failed_logout_keeps_session() {
    let stub = StubGarmin::new();
    stub.fail("logout", "network unreachable");
    let resources = resources_with(&stub);

    let result = resources
        .registry
        .execute("logout", json!({}), &context(&resources))
        .await
        .unwrap();

    assert_eq!(text(&result), "Error logging out: network unreachable");
    assert!(resources.session.is_authenticated().await);
}
