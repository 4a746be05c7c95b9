// ABOUTME: Environment-driven configuration tests for the Garmin MCP server
// ABOUTME: Serialized because they mutate process environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;
use std::path::PathBuf;

use garmin_mcp_server::config::ServerConfig;
use garmin_mcp_server::constants::env_vars;
use garmin_mcp_server::constants::protocol::MCP_PROTOCOL_VERSION;
use garmin_mcp_server::errors::ErrorCode;
use serial_test::serial;

const ALL_VARS: [&str; 9] = [
    env_vars::GARMIN_EMAIL,
    env_vars::GARMIN_PASSWORD,
    env_vars::GARMIN_DOMAIN,
    env_vars::GARMIN_TOKENS,
    env_vars::HTTP_TIMEOUT,
    env_vars::HTTP_CONNECT_TIMEOUT,
    env_vars::OAUTH_CONSUMER_KEY,
    env_vars::OAUTH_CONSUMER_SECRET,
    "MCP_PROTOCOL_VERSION",
];

fn clear_env() {
    for var in ALL_VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_env();

    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.domain, "garmin.com");
    assert!(!config.credentials.is_complete());
    assert_eq!(config.token_store, None);
    assert_eq!(config.consumer, None);
    assert_eq!(config.http.timeout_secs, 30);
    assert_eq!(config.http.connect_timeout_secs, 10);
    assert_eq!(config.protocol_version, MCP_PROTOCOL_VERSION);
}

#[test]
#[serial]
fn test_full_environment() {
    clear_env();
    env::set_var(env_vars::GARMIN_EMAIL, "runner@example.com");
    env::set_var(env_vars::GARMIN_PASSWORD, "hunter2");
    env::set_var(env_vars::GARMIN_DOMAIN, "garmin.cn");
    env::set_var(env_vars::GARMIN_TOKENS, "/var/lib/garmin");
    env::set_var(env_vars::HTTP_TIMEOUT, "45");
    env::set_var(env_vars::OAUTH_CONSUMER_KEY, "key");
    env::set_var(env_vars::OAUTH_CONSUMER_SECRET, "secret");
    env::set_var("MCP_PROTOCOL_VERSION", "2024-11-05");

    let config = ServerConfig::from_env().unwrap();
    clear_env();

    assert!(config.credentials.is_complete());
    assert_eq!(config.credentials.email, "runner@example.com");
    assert_eq!(config.domain, "garmin.cn");
    assert_eq!(config.token_store, Some(PathBuf::from("/var/lib/garmin")));
    assert_eq!(
        config.consumer,
        Some(("key".to_owned(), "secret".to_owned()))
    );
    assert_eq!(config.http.timeout_secs, 45);
    assert_eq!(config.protocol_version, "2024-11-05");

    let connect = config.connect_config();
    assert_eq!(connect.domain, "garmin.cn");
}

#[test]
#[serial]
fn test_unsupported_domain_is_rejected() {
    clear_env();
    env::set_var(env_vars::GARMIN_DOMAIN, "garmin.example");

    let err = ServerConfig::from_env().unwrap_err();
    clear_env();

    assert_eq!(err.code, ErrorCode::ConfigError);
    assert!(err.message.contains("garmin.example"));
}

#[test]
#[serial]
fn test_blank_and_partial_values_are_ignored() {
    clear_env();
    env::set_var(env_vars::GARMIN_TOKENS, "   ");
    env::set_var(env_vars::OAUTH_CONSUMER_KEY, "key");
    env::set_var(env_vars::HTTP_CONNECT_TIMEOUT, "soon");

    let config = ServerConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.token_store, None);
    assert_eq!(config.consumer, None);
    assert_eq!(config.http.connect_timeout_secs, 10);
}

#[test]
#[serial]
fn test_cli_overrides_replace_environment() {
    clear_env();
    env::set_var(env_vars::GARMIN_TOKENS, "/from/env");

    let config = ServerConfig::from_env()
        .unwrap()
        .with_domain("garmin.cn")
        .unwrap()
        .with_token_store("/from/cli");
    clear_env();

    assert_eq!(config.domain, "garmin.cn");
    assert_eq!(config.token_store, Some(PathBuf::from("/from/cli")));
}
