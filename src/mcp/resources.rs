// ABOUTME: Shared resource container handed to every MCP request
// ABOUTME: Holds the configuration, the Garmin session and the tool registry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

//! # Server Resources Module
//!
//! Built once at startup and shared behind an `Arc` by every request task.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::session::GarminSession;
use crate::tools::registry::ToolRegistry;

/// Centralized resource container for dependency injection
pub struct ServerResources {
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Garmin session shared by all tools
    pub session: Arc<GarminSession>,
    /// Registered tools
    pub registry: Arc<ToolRegistry>,
}

impl ServerResources {
    /// Resources with the full Garmin tool set registered
    #[must_use]
    pub fn new(config: ServerConfig, session: GarminSession) -> Self {
        let mut registry = ToolRegistry::new();
        registry.register_builtin_tools();
        Self::with_registry(config, session, registry)
    }

    /// Resources with a caller-supplied registry
    #[must_use]
    pub fn with_registry(
        config: ServerConfig,
        session: GarminSession,
        registry: ToolRegistry,
    ) -> Self {
        Self {
            config: Arc::new(config),
            session: Arc::new(session),
            registry: Arc::new(registry),
        }
    }
}
