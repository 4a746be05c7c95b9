// ABOUTME: Declarative Garmin endpoint description and the single dispatch routine behind every tool
// ABOUTME: Forwards validated arguments to one GarminApi call and shapes the reply or failure text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

//! # Endpoint Dispatch
//!
//! Every Garmin tool is an [`Endpoint`] value: a name, a parameter list, the
//! one collaborator call it forwards to, and an [`Outcome`] that decides how
//! the call's value is presented. [`dispatch`] runs that recipe; failures
//! come back as [`EndpointFailure`], rendered `Error <action>: <message>`.

use std::error::Error;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::time::Instant;

use async_trait::async_trait;
use garmin_connect::GarminApi;
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::{AppError, AppResult, ErrorCode};
use crate::mcp::schema::JsonSchema;
use crate::session::GarminSession;

use super::args::{input_schema, ParamSpec, ToolArgs};
use super::context::ToolExecutionContext;
use super::result::ToolResult;
use super::traits::{McpTool, ToolCapabilities};

/// Future returned by an endpoint's collaborator call
pub type InvokeFuture<'a> = Pin<Box<dyn Future<Output = AppResult<Value>> + Send + 'a>>;

/// The single collaborator call an endpoint forwards to
pub type Invoke = for<'a> fn(&'a dyn GarminApi, &'a ToolArgs) -> InvokeFuture<'a>;

/// Builds a message from the call's arguments
pub type MessageFn = fn(&ToolArgs) -> String;

/// How a successful call is presented
#[derive(Clone, Copy)]
pub enum Outcome {
    /// Return the value unchanged
    Passthrough,
    /// Return the value, or this message when the value is empty
    EmptyMessage(MessageFn),
    /// `"<prefix>: <value>"`
    Confirm(&'static str),
    /// Fixed acknowledgement; the value is dropped
    Acknowledge(MessageFn),
}

impl Outcome {
    fn apply(self, value: Value, args: &ToolArgs) -> Reply {
        match self {
            Self::Passthrough => Reply::Data(value),
            Self::EmptyMessage(message) if is_empty_result(&value) => {
                Reply::Message(message(args))
            }
            Self::EmptyMessage(_) => Reply::Data(value),
            Self::Confirm(prefix) => Reply::Message(format!("{prefix}: {}", inline(&value))),
            Self::Acknowledge(message) => Reply::Message(message(args)),
        }
    }
}

impl fmt::Debug for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passthrough => f.write_str("Passthrough"),
            Self::EmptyMessage(_) => f.write_str("EmptyMessage"),
            Self::Confirm(prefix) => f.debug_tuple("Confirm").field(prefix).finish(),
            Self::Acknowledge(_) => f.write_str("Acknowledge"),
        }
    }
}

/// `null`, `false`, `0`, `""`, `[]` and `{}` count as "nothing found"
#[must_use]
pub fn is_empty_result(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f.abs() < f64::MIN_POSITIVE),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Strings bare, everything else as compact JSON
fn inline(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Successful endpoint reply
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Collaborator value passed through
    Data(Value),
    /// Confirmation, acknowledgement or "nothing found" text
    Message(String),
}

/// A failed endpoint call, tagged with the endpoint's action phrase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointFailure {
    /// Gerund phrase such as `retrieving stats`
    pub action: &'static str,
    /// Classified cause
    pub code: ErrorCode,
    /// Underlying message, verbatim
    pub message: String,
}

impl EndpointFailure {
    /// Tag an error with the action that was attempted
    #[must_use]
    pub fn new(action: &'static str, error: AppError) -> Self {
        Self {
            action,
            code: error.code,
            message: error.message,
        }
    }
}

impl fmt::Display for EndpointFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error {}: {}", self.action, self.message)
    }
}

impl Error for EndpointFailure {}

/// One Garmin tool
pub struct Endpoint {
    /// Tool name
    pub name: &'static str,
    /// Tool description
    pub description: &'static str,
    /// Declared parameters, in call order
    pub params: Vec<ParamSpec>,
    /// Phrase used in `Error <action>: ...`
    pub action: &'static str,
    /// Presentation of a successful call
    pub outcome: Outcome,
    /// Capability flags
    pub capabilities: ToolCapabilities,
    /// Collaborator call
    pub invoke: Invoke,
}

impl Endpoint {
    /// Read endpoint returning the collaborator value unchanged
    #[must_use]
    pub fn read(
        name: &'static str,
        description: &'static str,
        action: &'static str,
        params: Vec<ParamSpec>,
        invoke: Invoke,
    ) -> Self {
        Self {
            name,
            description,
            params,
            action,
            outcome: Outcome::Passthrough,
            capabilities: ToolCapabilities::READ,
            invoke,
        }
    }

    /// Mutation endpoint with the given presentation
    #[must_use]
    pub fn write(
        name: &'static str,
        description: &'static str,
        action: &'static str,
        params: Vec<ParamSpec>,
        outcome: Outcome,
        invoke: Invoke,
    ) -> Self {
        Self {
            name,
            description,
            params,
            action,
            outcome,
            capabilities: ToolCapabilities::WRITE,
            invoke,
        }
    }

    /// Replace the empty value with a message
    #[must_use]
    pub const fn when_empty(mut self, message: MessageFn) -> Self {
        self.outcome = Outcome::EmptyMessage(message);
        self
    }

    /// Override the presentation
    #[must_use]
    pub const fn with_outcome(mut self, outcome: Outcome) -> Self {
        self.outcome = outcome;
        self
    }

    /// Override the capability flags
    #[must_use]
    pub const fn with_capabilities(mut self, capabilities: ToolCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("name", &self.name)
            .field("action", &self.action)
            .field("outcome", &self.outcome)
            .field("capabilities", &self.capabilities)
            .finish_non_exhaustive()
    }
}

/// Run one endpoint against the session's client
///
/// # Errors
///
/// Returns [`EndpointFailure`] when the session is unusable or the
/// collaborator call fails.
pub async fn dispatch(
    endpoint: &Endpoint,
    session: &GarminSession,
    args: &ToolArgs,
) -> Result<Reply, EndpointFailure> {
    let failed = |error: AppError| EndpointFailure::new(endpoint.action, error);

    let client = session.client().await.map_err(failed)?;
    let value = (endpoint.invoke)(client.as_ref(), args)
        .await
        .map_err(failed)?;

    if endpoint.capabilities.ends_session() {
        session.mark_logged_out().await;
    }

    Ok(endpoint.outcome.apply(value, args))
}

#[async_trait]
impl McpTool for Endpoint {
    fn name(&self) -> &'static str {
        self.name
    }

    fn description(&self) -> &'static str {
        self.description
    }

    fn input_schema(&self) -> JsonSchema {
        input_schema(&self.params)
    }

    fn capabilities(&self) -> ToolCapabilities {
        self.capabilities
    }

    async fn execute(&self, args: Value, context: &ToolExecutionContext) -> AppResult<ToolResult> {
        let args = ToolArgs::resolve(self.name, &self.params, args)?;
        let started = Instant::now();

        match dispatch(self, context.session(), &args).await {
            Ok(reply) => {
                debug!(
                    tool = self.name,
                    elapsed_ms = started.elapsed().as_millis(),
                    "Garmin call succeeded"
                );
                Ok(match reply {
                    Reply::Data(value) => ToolResult::ok(value),
                    Reply::Message(text) => ToolResult::text(text),
                })
            }
            Err(failure) => {
                warn!(
                    tool = self.name,
                    code = ?failure.code,
                    elapsed_ms = started.elapsed().as_millis(),
                    "{failure}"
                );
                Ok(ToolResult::error(Value::String(failure.to_string())))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::tools::args::ParamDefault;

    fn args(params: &[ParamSpec], value: Value) -> ToolArgs {
        ToolArgs::resolve("test_tool", params, value).unwrap()
    }

    #[test]
    fn test_empty_results() {
        for value in [
            json!(null),
            json!(false),
            json!(0),
            json!(0.0),
            json!(""),
            json!([]),
            json!({}),
        ] {
            assert!(is_empty_result(&value), "{value} should be empty");
        }
        for value in [json!(true), json!(1), json!("x"), json!([0]), json!({"a": null})] {
            assert!(!is_empty_result(&value), "{value} should not be empty");
        }
    }

    #[test]
    fn test_confirm_renders_compact_json() {
        let reply = Outcome::Confirm("Successfully deleted weigh-ins")
            .apply(json!({"deleted": 3}), &args(&[], json!({})));
        assert_eq!(
            reply,
            Reply::Message("Successfully deleted weigh-ins: {\"deleted\":3}".into())
        );

        let reply = Outcome::Confirm("Successfully set activity name")
            .apply(json!("ok"), &args(&[], json!({})));
        assert_eq!(
            reply,
            Reply::Message("Successfully set activity name: ok".into())
        );
    }

    #[test]
    fn test_empty_message_uses_arguments() {
        let params = [ParamSpec::string("date", "Date").or(ParamDefault::Str(""))];
        let outcome =
            Outcome::EmptyMessage(|a| format!("No activities found for {}", a.display("date")));
        let args = args(&params, json!({"date": "2024-01-15"}));

        assert_eq!(
            outcome.apply(json!([]), &args),
            Reply::Message("No activities found for 2024-01-15".into())
        );
        assert_eq!(
            outcome.apply(json!([{"activityId": 1}]), &args),
            Reply::Data(json!([{"activityId": 1}]))
        );
    }

    #[test]
    fn test_failure_display() {
        let failure = EndpointFailure::new(
            "adding weigh-in",
            AppError::invalid_input("invalid unit"),
        );
        assert_eq!(failure.to_string(), "Error adding weigh-in: invalid unit");
        assert_eq!(failure.code, ErrorCode::InvalidInput);
    }
}
