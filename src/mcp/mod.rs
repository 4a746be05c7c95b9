// ABOUTME: Model Context Protocol (MCP) server implementation for AI assistant integration
// ABOUTME: Request routing, shared resources, wire schema and the stdio transport
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

pub mod request_processor;
pub mod resources;
pub mod schema;
pub mod stdio;

pub use request_processor::McpRequestProcessor;
pub use resources::ServerResources;
pub use stdio::StdioTransport;
