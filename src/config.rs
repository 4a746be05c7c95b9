// ABOUTME: Environment-based server configuration (credentials, Garmin domain, token store, HTTP timeouts)
// ABOUTME: Loads an optional .env file and expands `~` in the token store path
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

//! # Configuration
//!
//! Environment-only configuration. A `.env` file in the working directory is
//! honoured for local runs; real environment variables win over it.

use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use garmin_connect::ConnectConfig;
use tracing::debug;

use crate::constants::{defaults, env_vars, protocol};
use crate::errors::{AppError, AppResult};

/// Domains Garmin Connect is served from
const SUPPORTED_DOMAINS: [&str; 2] = ["garmin.com", "garmin.cn"];

/// Garmin account credentials
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// Account email
    pub email: String,
    /// Account password
    pub password: String,
}

impl Credentials {
    /// Whether both halves of the pair are present
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.email.is_empty() && !self.password.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// HTTP client timeout configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpClientConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: defaults::HTTP_TIMEOUT_SECS,
            connect_timeout_secs: defaults::HTTP_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl HttpClientConfig {
    /// Load HTTP client configuration from environment
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            timeout_secs: env::var(env_vars::HTTP_TIMEOUT)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults::HTTP_TIMEOUT_SECS),
            connect_timeout_secs: env::var(env_vars::HTTP_CONNECT_TIMEOUT)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults::HTTP_CONNECT_TIMEOUT_SECS),
        }
    }
}

/// Full server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Garmin account credentials
    pub credentials: Credentials,
    /// `garmin.com` or `garmin.cn`
    pub domain: String,
    /// Directory for persisted OAuth tokens
    pub token_store: Option<PathBuf>,
    /// OAuth1 consumer key and secret override
    pub consumer: Option<(String, String)>,
    /// HTTP timeouts
    pub http: HttpClientConfig,
    /// Protocol version advertised to MCP clients
    pub protocol_version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            credentials: Credentials::default(),
            domain: defaults::GARMIN_DOMAIN.to_owned(),
            token_store: None,
            consumer: None,
            http: HttpClientConfig::default(),
            protocol_version: protocol::MCP_PROTOCOL_VERSION.to_owned(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from the process environment
    ///
    /// Missing credentials are not an error: the session reports the failed
    /// login on the first tool call instead.
    ///
    /// # Errors
    ///
    /// Returns an error if `GARMIN_DOMAIN` is not a supported domain
    pub fn from_env() -> AppResult<Self> {
        let domain = env_var_or(env_vars::GARMIN_DOMAIN, defaults::GARMIN_DOMAIN);
        validate_domain(&domain)?;

        let consumer = match (
            non_empty_var(env_vars::OAUTH_CONSUMER_KEY),
            non_empty_var(env_vars::OAUTH_CONSUMER_SECRET),
        ) {
            (Some(key), Some(secret)) => Some((key, secret)),
            _ => None,
        };

        Ok(Self {
            credentials: Credentials {
                email: env_var_or(env_vars::GARMIN_EMAIL, ""),
                password: env_var_or(env_vars::GARMIN_PASSWORD, ""),
            },
            domain,
            token_store: non_empty_var(env_vars::GARMIN_TOKENS).map(|p| expand_home(&p)),
            consumer,
            http: HttpClientConfig::from_env(),
            protocol_version: protocol::mcp_protocol_version(),
        })
    }

    /// Replace the Garmin domain
    ///
    /// # Errors
    ///
    /// Returns an error if the domain is not supported
    pub fn with_domain(mut self, domain: impl Into<String>) -> AppResult<Self> {
        let domain = domain.into();
        validate_domain(&domain)?;
        self.domain = domain;
        Ok(self)
    }

    /// Replace the token store directory
    #[must_use]
    pub fn with_token_store(mut self, dir: &str) -> Self {
        self.token_store = Some(expand_home(dir));
        self
    }

    /// Collaborator settings derived from this configuration
    #[must_use]
    pub fn connect_config(&self) -> ConnectConfig {
        let mut config = ConnectConfig::for_domain(self.domain.clone()).with_timeouts(
            Duration::from_secs(self.http.timeout_secs),
            Duration::from_secs(self.http.connect_timeout_secs),
        );
        if let Some(dir) = &self.token_store {
            config = config.with_token_store(dir.clone());
        }
        if let Some((key, secret)) = &self.consumer {
            config = config.with_consumer(key.clone(), secret.clone());
        }
        config
    }
}

/// Load `.env` from the working directory if one exists
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => debug!("Ignoring unreadable .env file: {e}"),
    }
}

/// Expand a leading `~` to the user's home directory
#[must_use]
pub fn expand_home(path: &str) -> PathBuf {
    let home = dirs::home_dir();
    match (path.strip_prefix('~'), home) {
        (Some(""), Some(home)) => home,
        (Some(rest), Some(home)) if rest.starts_with('/') => {
            home.join(rest.trim_start_matches('/'))
        }
        _ => Path::new(path).to_path_buf(),
    }
}

fn validate_domain(domain: &str) -> AppResult<()> {
    if SUPPORTED_DOMAINS.contains(&domain) {
        Ok(())
    } else {
        Err(AppError::config(format!(
            "Unsupported Garmin domain '{domain}', expected one of: {}",
            SUPPORTED_DOMAINS.join(", ")
        )))
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
