// ABOUTME: HTTP client construction for the Garmin Connect API and SSO pages
// ABOUTME: API calls share one pooled client, SSO login uses a short-lived cookie-enabled client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

use reqwest::{Client, ClientBuilder};

use crate::config::{ConnectConfig, SSO_USER_AGENT};
use crate::errors::ConnectResult;

/// Build the pooled client used for authenticated API calls
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialized
pub fn api_client(config: &ConnectConfig) -> ConnectResult<Client> {
    Ok(ClientBuilder::new()
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .build()?)
}

/// Build a client that keeps cookies across the SSO page sequence
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialized
pub fn sso_client(config: &ConnectConfig) -> ConnectResult<Client> {
    Ok(ClientBuilder::new()
        .cookie_store(true)
        .user_agent(SSO_USER_AGENT)
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .build()?)
}
