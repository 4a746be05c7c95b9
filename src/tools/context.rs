// ABOUTME: Defines ToolExecutionContext which gives tools access to shared server resources
// ABOUTME: Carries the request id for tracing alongside the Garmin session
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

//! # Tool Execution Context

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::mcp::resources::ServerResources;
use crate::session::GarminSession;

/// Context provided to every tool execution.
#[derive(Clone)]
pub struct ToolExecutionContext {
    /// Request ID for tracing/logging
    pub request_id: Option<Value>,
    /// Access to all server resources
    pub resources: Arc<ServerResources>,
}

impl ToolExecutionContext {
    /// Create a new context
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self {
            request_id: None,
            resources,
        }
    }

    /// Set request ID for tracing
    #[must_use]
    pub fn with_request_id(mut self, request_id: Value) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// The process-wide Garmin session
    #[must_use]
    pub fn session(&self) -> &GarminSession {
        &self.resources.session
    }
}

impl fmt::Debug for ToolExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolExecutionContext")
            .field("request_id", &self.request_id)
            .finish_non_exhaustive()
    }
}
