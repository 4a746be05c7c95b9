// ABOUTME: Defines the McpTool trait and ToolCapabilities for the tool registry
// ABOUTME: Tools implement this trait to be listed and executed through the ToolRegistry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

//! # MCP Tool Trait and Capabilities
//!
//! Every tool exposes:
//! - metadata (name, description, input schema)
//! - capability flags used for filtering and session bookkeeping
//! - async execution against a [`ToolExecutionContext`]

use async_trait::async_trait;
use bitflags::bitflags;
use serde_json::Value;

use crate::errors::AppResult;
use crate::mcp::schema::JsonSchema;

use super::context::ToolExecutionContext;
use super::result::ToolResult;

bitflags! {
    /// Capabilities that tools declare for filtering and discovery.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ToolCapabilities: u16 {
        /// Tool needs an authenticated Garmin session
        const REQUIRES_SESSION = 0b0000_0001;
        /// Tool reads account data
        const READS_DATA = 0b0000_0010;
        /// Tool creates or modifies account data
        const WRITES_DATA = 0b0000_0100;
        /// Tool deletes account data
        const DELETES_DATA = 0b0000_1000;
        /// Tool moves files between Garmin and the local machine
        const TRANSFERS_FILES = 0b0001_0000;
        /// Successful execution ends the Garmin session
        const ENDS_SESSION = 0b0010_0000;
    }
}

impl ToolCapabilities {
    /// Capabilities of a plain read endpoint
    pub const READ: Self = Self::REQUIRES_SESSION.union(Self::READS_DATA);

    /// Capabilities of a plain write endpoint
    pub const WRITE: Self = Self::REQUIRES_SESSION.union(Self::WRITES_DATA);

    /// Capabilities of a delete endpoint
    pub const DELETE: Self = Self::WRITE.union(Self::DELETES_DATA);

    /// Check if a successful call ends the session
    #[must_use]
    pub const fn ends_session(self) -> bool {
        self.contains(Self::ENDS_SESSION)
    }

    /// Get a description of all enabled capabilities for logging
    #[must_use]
    pub fn describe(&self) -> String {
        let parts: Vec<&str> = [
            (Self::REQUIRES_SESSION, "requires_session"),
            (Self::READS_DATA, "reads_data"),
            (Self::WRITES_DATA, "writes_data"),
            (Self::DELETES_DATA, "deletes_data"),
            (Self::TRANSFERS_FILES, "transfers_files"),
            (Self::ENDS_SESSION, "ends_session"),
        ]
        .into_iter()
        .filter(|(flag, _)| self.contains(*flag))
        .map(|(_, label)| label)
        .collect();

        if parts.is_empty() {
            "none".to_owned()
        } else {
            parts.join(", ")
        }
    }
}

/// The trait every MCP tool implements.
///
/// Tools are `Send + Sync` so a single registry can serve concurrent
/// requests; `name()` returns `&'static str` for allocation-free lookup.
#[async_trait]
pub trait McpTool: Send + Sync {
    /// Unique identifier for the tool (e.g., `get_sleep_data`)
    fn name(&self) -> &'static str;

    /// Human-readable description for LLM consumption
    fn description(&self) -> &'static str;

    /// JSON Schema for input parameters, returned by `tools/list`
    fn input_schema(&self) -> JsonSchema;

    /// Capability flags for filtering and session bookkeeping
    fn capabilities(&self) -> ToolCapabilities;

    /// Execute the tool with given arguments and context
    ///
    /// # Errors
    ///
    /// Returns `AppError` when the arguments do not match the input schema.
    /// Failures of the remote call are reported inside the `ToolResult`.
    async fn execute(&self, args: Value, context: &ToolExecutionContext) -> AppResult<ToolResult>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe() {
        assert_eq!(ToolCapabilities::empty().describe(), "none");
        assert_eq!(
            ToolCapabilities::DELETE.describe(),
            "requires_session, writes_data, deletes_data"
        );
    }

    #[test]
    fn test_presets() {
        assert!(ToolCapabilities::DELETE.contains(ToolCapabilities::WRITE));
        assert!(!ToolCapabilities::READ.intersects(ToolCapabilities::WRITES_DATA));
        assert!(!ToolCapabilities::DELETE.ends_session());
        assert!((ToolCapabilities::WRITE | ToolCapabilities::ENDS_SESSION).ends_session());
    }
}
