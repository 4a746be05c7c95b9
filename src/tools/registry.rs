// ABOUTME: Central registry for MCP tools keyed by name and listed in registration order
// ABOUTME: Registers the Garmin endpoint manifest at startup and serves tools/list and tools/call
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

//! # Tool Registry
//!
//! Built once at startup and used immutably afterwards. Tools are listed in
//! registration order so `tools/list` is stable across runs.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::errors::AppResult;
use crate::mcp::schema::ToolSchema;

use super::context::ToolExecutionContext;
use super::errors::ToolError;
use super::manifest;
use super::result::ToolResult;
use super::traits::McpTool;

/// Central registry for MCP tools.
pub struct ToolRegistry {
    /// Registered tools by name
    tools: HashMap<String, Arc<dyn McpTool>>,
    /// Names in registration order
    order: Vec<String>,
}

impl ToolRegistry {
    /// Create a new empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Register a tool in the registry
    ///
    /// # Returns
    ///
    /// `true` if the tool was registered, `false` if a tool with the same name exists
    pub fn register(&mut self, tool: Arc<dyn McpTool>) -> bool {
        let name = tool.name().to_owned();

        if self.tools.contains_key(&name) {
            warn!("{}, skipping", ToolError::already_registered(&name));
            return false;
        }

        debug!(
            "Registering tool '{}' with capabilities: {}",
            name,
            tool.capabilities().describe()
        );
        self.order.push(name.clone());
        self.tools.insert(name, tool);
        true
    }

    /// Register every Garmin endpoint
    pub fn register_builtin_tools(&mut self) {
        let mut categories = 0;
        for (category, endpoints) in manifest::all() {
            let count = endpoints.len();
            for endpoint in endpoints {
                self.register(Arc::new(endpoint));
            }
            debug!(category, count, "Registered Garmin tool category");
            categories += 1;
        }
        info!(
            "Registered {} Garmin tools in {categories} categories",
            self.len()
        );
    }

    /// Get a tool by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<dyn McpTool>> {
        self.tools.get(name)
    }

    /// Number of registered tools
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether no tools are registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Schemas of every tool, in registration order, for `tools/list`
    #[must_use]
    pub fn list_schemas(&self) -> Vec<ToolSchema> {
        self.order
            .iter()
            .filter_map(|name| self.tools.get(name))
            .map(|tool| ToolSchema {
                name: tool.name().to_owned(),
                description: tool.description().to_owned(),
                input_schema: tool.input_schema(),
            })
            .collect()
    }

    /// Execute a tool by name
    ///
    /// # Errors
    ///
    /// Returns `AppError` if the tool is not found or its arguments are invalid
    pub async fn execute(
        &self,
        name: &str,
        args: Value,
        context: &ToolExecutionContext,
    ) -> AppResult<ToolResult> {
        let tool = self.get(name).ok_or_else(|| ToolError::not_found(name))?;
        tool.execute(args, context).await
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tool_count", &self.tools.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tools_keep_manifest_order() {
        let mut registry = ToolRegistry::new();
        registry.register_builtin_tools();

        let expected: Vec<&str> = manifest::all()
            .into_iter()
            .flat_map(|(_, endpoints)| endpoints)
            .map(|endpoint| endpoint.name)
            .collect();
        let listed: Vec<String> = registry
            .list_schemas()
            .into_iter()
            .map(|schema| schema.name)
            .collect();

        assert_eq!(registry.len(), expected.len());
        assert_eq!(listed, expected);
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        let mut registry = ToolRegistry::new();
        let mut endpoints = manifest::all().remove(0).1;
        let first = endpoints.remove(0);
        let name = first.name;
        let again = manifest::all().remove(0).1.remove(0);

        assert!(registry.register(Arc::new(first)));
        assert!(!registry.register(Arc::new(again)));
        assert_eq!(registry.len(), 1);
        assert!(registry.get(name).is_some());
    }
}
