// ABOUTME: Protocol identification constants and environment variable names
// ABOUTME: MCP protocol version, server name and the defaults used by ServerConfig
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

//! # Constants Module
//!
//! Protocol constants and the names of the environment variables read at
//! startup.

/// Protocol-related constants
pub mod protocol {
    use std::env;

    /// Default MCP protocol version advertised in `initialize`
    pub const MCP_PROTOCOL_VERSION: &str = "2025-06-18";

    /// Server name reported to MCP clients
    pub const SERVER_NAME: &str = "garmin-mcp-server";

    /// Server version from Cargo.toml
    pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

    /// Get MCP protocol version from environment or default
    #[must_use]
    pub fn mcp_protocol_version() -> String {
        env::var("MCP_PROTOCOL_VERSION").unwrap_or_else(|_| MCP_PROTOCOL_VERSION.into())
    }
}

/// Environment variable names
pub mod env_vars {
    /// Garmin account email
    pub const GARMIN_EMAIL: &str = "GARMIN_EMAIL";
    /// Garmin account password
    pub const GARMIN_PASSWORD: &str = "GARMIN_PASSWORD";
    /// `garmin.com` or `garmin.cn`
    pub const GARMIN_DOMAIN: &str = "GARMIN_DOMAIN";
    /// Token store directory
    pub const GARMIN_TOKENS: &str = "GARMINTOKENS";
    /// Request timeout in seconds
    pub const HTTP_TIMEOUT: &str = "GARMIN_HTTP_TIMEOUT_SECS";
    /// Connect timeout in seconds
    pub const HTTP_CONNECT_TIMEOUT: &str = "GARMIN_HTTP_CONNECT_TIMEOUT_SECS";
    /// OAuth1 consumer key override
    pub const OAUTH_CONSUMER_KEY: &str = "GARMIN_OAUTH_CONSUMER_KEY";
    /// OAuth1 consumer secret override
    pub const OAUTH_CONSUMER_SECRET: &str = "GARMIN_OAUTH_CONSUMER_SECRET";
}

/// Configuration defaults
pub mod defaults {
    /// Garmin Connect domain
    pub const GARMIN_DOMAIN: &str = "garmin.com";
    /// Request timeout in seconds
    pub const HTTP_TIMEOUT_SECS: u64 = 30;
    /// Connect timeout in seconds
    pub const HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;
}

/// Service names for structured logging
pub mod service_names {
    /// Service name used in log records
    pub const GARMIN_MCP_SERVER: &str = "garmin-mcp-server";
}
