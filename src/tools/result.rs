// ABOUTME: ToolResult returned by tool execution and its conversion into an MCP tool response
// ABOUTME: Strings become text blocks; JSON values become pretty text plus structured content
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

//! # Tool Result Types
//!
//! Bridges tool implementations with the MCP `tools/call` response format.

use serde::Serialize;
use serde_json::Value;

use crate::mcp::schema::{Content, ToolResponse};

/// Result returned by tool execution.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResult {
    /// The result value to return to the client
    pub content: Value,
    /// Whether this result represents an error condition
    pub is_error: bool,
}

impl ToolResult {
    /// Create a simple successful result with just content
    #[must_use]
    pub const fn ok(content: Value) -> Self {
        Self {
            content,
            is_error: false,
        }
    }

    /// Create an error result
    #[must_use]
    pub const fn error(content: Value) -> Self {
        Self {
            content,
            is_error: true,
        }
    }

    /// Create a text result (convenience method)
    #[must_use]
    pub fn text(message: impl Into<String>) -> Self {
        Self::ok(Value::String(message.into()))
    }

    /// Create a result from a serializable value
    ///
    /// # Errors
    ///
    /// Returns the serialization error if the value cannot be converted to JSON
    pub fn from_serializable<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        Ok(Self::ok(serde_json::to_value(value)?))
    }

    /// The text an MCP client sees for this result
    #[must_use]
    pub fn render_text(&self) -> String {
        match &self.content {
            Value::String(text) => text.clone(),
            other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
        }
    }

    /// Convert into the MCP wire response
    #[must_use]
    pub fn into_response(self) -> ToolResponse {
        let text = self.render_text();
        let structured_content = match self.content {
            Value::Object(_) if !self.is_error => Some(self.content),
            _ => None,
        };
        ToolResponse {
            content: vec![Content::Text { text }],
            is_error: self.is_error,
            structured_content,
        }
    }
}

impl Default for ToolResult {
    fn default() -> Self {
        Self::ok(Value::Null)
    }
}
