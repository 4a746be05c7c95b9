// ABOUTME: MCP request processing and protocol handling for the stdio server
// ABOUTME: Validates, routes, and executes JSON-RPC requests with proper error mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

use std::sync::Arc;
use std::time::Instant;

use serde_json::{json, Value};
use tracing::{debug, error, warn};

use crate::constants::protocol::{SERVER_NAME, SERVER_VERSION};
use crate::errors::{AppError, AppResult};
use crate::jsonrpc::{error_codes, JsonRpcRequest, JsonRpcResponse, JSONRPC_VERSION};
use crate::tools::context::ToolExecutionContext;

use super::resources::ServerResources;
use super::schema::{InitializeResponse, ToolCall};

/// Longest params preview written to the debug log
const PARAMS_PREVIEW_LEN: usize = 100;

/// Processes MCP protocol requests with validation, routing, and execution
pub struct McpRequestProcessor {
    resources: Arc<ServerResources>,
}

impl McpRequestProcessor {
    /// Create a new MCP request processor
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Handle an MCP request and return a response
    ///
    /// Notifications produce no response.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let start_time = Instant::now();
        Self::log_request(&request);

        if request.is_notification() {
            Self::handle_notification(&request);
            Self::log_completion("notification", start_time);
            return None;
        }

        let response = self.process_or_error(request).await;
        Self::log_completion("request", start_time);
        Some(response)
    }

    async fn process_or_error(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        if let Err(message) = Self::validate_request(&request) {
            warn!("Rejected invalid request: {message}");
            return JsonRpcResponse::error(request.id, error_codes::INVALID_REQUEST, message);
        }

        match self.process_request(&request).await {
            Ok(response) => response,
            Err(e) => Self::create_error_response(&request, &e),
        }
    }

    fn create_error_response(request: &JsonRpcRequest, e: &AppError) -> JsonRpcResponse {
        error!(
            method = %request.method,
            id = ?request.id,
            code = ?e.code,
            "Failed to process MCP request: {e}"
        );
        JsonRpcResponse::error(request.id.clone(), e.jsonrpc_code(), e.message.clone())
    }

    /// Route to the handler for the request's method
    async fn process_request(&self, request: &JsonRpcRequest) -> AppResult<JsonRpcResponse> {
        match request.method.as_str() {
            "initialize" => Ok(self.handle_initialize(request)),
            "ping" => Ok(Self::handle_ping(request)),
            "tools/list" => Ok(self.handle_tools_list(request)),
            "tools/call" => self.handle_tools_call(request).await,
            "resources/list" => Ok(Self::handle_empty_list(request, json!({ "resources": [] }))),
            "prompts/list" => Ok(Self::handle_empty_list(request, json!({ "prompts": [] }))),
            _ => Ok(Self::handle_unknown_method(request)),
        }
    }

    /// Validate JSON-RPC version and method
    fn validate_request(request: &JsonRpcRequest) -> Result<(), String> {
        if request.jsonrpc != JSONRPC_VERSION {
            return Err(format!(
                "Invalid JSON-RPC version: got '{}', expected '{JSONRPC_VERSION}'",
                request.jsonrpc
            ));
        }
        if request.method.is_empty() {
            return Err("Missing method".to_owned());
        }
        Ok(())
    }

    /// Handle MCP initialize request
    fn handle_initialize(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        debug!("Handling initialize request");

        let init = InitializeResponse::new(
            self.resources.config.protocol_version.clone(),
            SERVER_NAME.to_owned(),
            SERVER_VERSION.to_owned(),
        );
        match serde_json::to_value(&init) {
            Ok(result) => JsonRpcResponse::success(request.id.clone(), result),
            Err(e) => Self::create_error_response(request, &AppError::from(e)),
        }
    }

    /// Handle MCP ping request
    fn handle_ping(request: &JsonRpcRequest) -> JsonRpcResponse {
        debug!("Handling ping request");
        JsonRpcResponse::success(request.id.clone(), json!({}))
    }

    /// Handle tools/list request
    ///
    /// Listing works whatever the session state; calls report login problems.
    fn handle_tools_list(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        debug!("Handling tools/list request");

        let tools = self.resources.registry.list_schemas();
        JsonRpcResponse::success(request.id.clone(), json!({ "tools": tools }))
    }

    /// Handle tools/call request
    async fn handle_tools_call(&self, request: &JsonRpcRequest) -> AppResult<JsonRpcResponse> {
        let params = request
            .params
            .clone()
            .ok_or_else(|| AppError::invalid_input("Missing parameters for tools/call"))?;
        let call: ToolCall = serde_json::from_value(params)
            .map_err(|e| AppError::invalid_input(format!("Invalid tools/call parameters: {e}")))?;

        debug!(tool = %call.name, "Handling tools/call request");

        let mut context = ToolExecutionContext::new(Arc::clone(&self.resources));
        if let Some(id) = &request.id {
            context = context.with_request_id(id.clone());
        }

        let result = self
            .resources
            .registry
            .execute(&call.name, call.arguments.unwrap_or(Value::Null), &context)
            .await?;
        let response = serde_json::to_value(result.into_response())?;

        Ok(JsonRpcResponse::success(request.id.clone(), response))
    }

    /// `resources/list` and `prompts/list`: this server offers none
    fn handle_empty_list(request: &JsonRpcRequest, empty: Value) -> JsonRpcResponse {
        debug!("Handling {} request", request.method);
        JsonRpcResponse::success(request.id.clone(), empty)
    }

    /// Handle unknown method
    fn handle_unknown_method(request: &JsonRpcRequest) -> JsonRpcResponse {
        warn!("Unknown MCP method: {}", request.method);
        JsonRpcResponse::error(
            request.id.clone(),
            error_codes::METHOD_NOT_FOUND,
            format!("Method not found: {}", request.method),
        )
    }

    /// Handle notification (no response required)
    fn handle_notification(request: &JsonRpcRequest) {
        match request.method.as_str() {
            "notifications/initialized" => debug!("Client finished initialization"),
            "notifications/cancelled" => debug!("Request cancelled notification received"),
            method => debug!("Unhandled notification: {method}"),
        }
    }

    /// Log incoming request with truncated params
    fn log_request(request: &JsonRpcRequest) {
        debug!(
            mcp_method = %request.method,
            mcp_id = ?request.id,
            mcp_params_preview = ?request.params.as_ref().map(|p| preview(&p.to_string())),
            "Received MCP request"
        );
    }

    /// Log request completion with timing
    fn log_completion(request_type: &str, start_time: Instant) {
        debug!(
            duration_ms = u64::try_from(start_time.elapsed().as_millis()).unwrap_or(0),
            "Completed MCP {request_type} processing"
        );
    }
}

fn preview(text: &str) -> String {
    match text.char_indices().nth(PARAMS_PREVIEW_LEN) {
        Some((cut, _)) => format!("{}...[truncated]", &text[..cut]),
        None => text.to_owned(),
    }
}
