// ABOUTME: Main library entry point for the Garmin Connect MCP server
// ABOUTME: Exposes a Garmin Connect account to MCP clients as a flat set of tools over stdio
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

#![deny(unsafe_code)]

//! # Garmin MCP Server
//!
//! A Model Context Protocol (MCP) server that lets AI assistants read and
//! update a Garmin Connect account: activities, daily health metrics, weight,
//! gear, workouts and more.
//!
//! ## Architecture
//!
//! - **Session**: one Garmin login per process, shared by every request
//! - **Tools**: ~93 declarative endpoints, each forwarding to one
//!   [`garmin_connect::GarminApi`] method through a single dispatch routine
//! - **MCP**: JSON-RPC 2.0 over newline-delimited stdio
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use garmin_mcp_server::config::ServerConfig;
//! use garmin_mcp_server::errors::AppResult;
//! use garmin_mcp_server::mcp::{ServerResources, StdioTransport};
//! use garmin_mcp_server::session::GarminSession;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     let session = GarminSession::login(&config).await?;
//!     let resources = Arc::new(ServerResources::new(config, session));
//!     StdioTransport::new(resources).run().await
//! }
//! ```

/// Environment-driven server configuration
pub mod config;

/// Application constants: protocol identity, environment variable names, defaults
pub mod constants;

/// Unified error handling
pub mod errors;

/// JSON-RPC 2.0 message types
pub mod jsonrpc;

/// Structured logging to stderr
pub mod logging;

/// MCP protocol server
pub mod mcp;

/// Process-wide Garmin session
pub mod session;

/// Tool trait, registry and Garmin endpoint manifest
pub mod tools;
