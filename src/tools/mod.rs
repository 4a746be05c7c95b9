// ABOUTME: Pluggable tool architecture: trait, registry, argument handling and the Garmin manifest
// ABOUTME: Every Garmin Connect tool is an Endpoint entry run by the shared dispatch routine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

//! Tool execution for the Garmin MCP server
//!
//! Tools implement [`McpTool`] and live in a [`ToolRegistry`]. All built-in
//! tools are [`Endpoint`]s declared in [`manifest`] and executed by
//! [`dispatch`](dispatch::dispatch).

pub mod args;
pub mod context;
pub mod dispatch;
pub mod errors;
pub mod manifest;
pub mod registry;
pub mod result;
pub mod traits;

pub use args::{ParamDefault, ParamKind, ParamSpec, ToolArgs};
pub use context::ToolExecutionContext;
pub use dispatch::{Endpoint, EndpointFailure, Outcome, Reply};
pub use errors::ToolError;
pub use registry::ToolRegistry;
pub use result::ToolResult;
pub use traits::{McpTool, ToolCapabilities};
