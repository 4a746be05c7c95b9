// ABOUTME: Connection settings for the Garmin Connect client (domain, base URLs, timeouts)
// ABOUTME: Base URLs are overridable so tests can point the client at a mock server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

use std::path::PathBuf;
use std::time::Duration;

/// Default Garmin domain
pub const DEFAULT_DOMAIN: &str = "garmin.com";

/// Public location of the OAuth consumer key pair used by Garmin's mobile app
pub const OAUTH_CONSUMER_URL: &str = "https://thegarth.s3.amazonaws.com/oauth_consumer.json";

/// User agent presented to the SSO pages
pub const SSO_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// User agent presented to the OAuth service
pub const OAUTH_USER_AGENT: &str = "com.garmin.android.apps.connectmobile";

/// OAuth consumer credentials supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsumerOverride {
    /// Consumer key
    pub key: String,
    /// Consumer secret
    pub secret: String,
}

/// Settings for a [`crate::Garmin`] client
#[derive(Debug, Clone)]
pub struct ConnectConfig {
    /// `garmin.com` or `garmin.cn`
    pub domain: String,
    /// Base URL of the authenticated API
    pub api_base_url: String,
    /// Base URL of the SSO service
    pub sso_base_url: String,
    /// Where to fetch the OAuth consumer from
    pub consumer_url: String,
    /// Consumer credentials that bypass the fetch
    pub consumer: Option<ConsumerOverride>,
    /// Directory holding persisted OAuth tokens
    pub token_store: Option<PathBuf>,
    /// Whole-request timeout
    pub timeout: Duration,
    /// Connection establishment timeout
    pub connect_timeout: Duration,
}

impl ConnectConfig {
    /// Configuration for a Garmin domain with default timeouts
    #[must_use]
    pub fn for_domain(domain: impl Into<String>) -> Self {
        let domain = domain.into();
        Self {
            api_base_url: format!("https://connectapi.{domain}"),
            sso_base_url: format!("https://sso.{domain}/sso"),
            consumer_url: OAUTH_CONSUMER_URL.to_owned(),
            consumer: None,
            token_store: None,
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            domain,
        }
    }

    /// Point every remote call at a single base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        self.api_base_url = base.to_owned();
        self.sso_base_url = format!("{base}/sso");
        self.consumer_url = format!("{base}/oauth_consumer.json");
        self
    }

    /// Persist and reuse tokens from `dir`
    #[must_use]
    pub fn with_token_store(mut self, dir: PathBuf) -> Self {
        self.token_store = Some(dir);
        self
    }

    /// Use fixed consumer credentials
    #[must_use]
    pub fn with_consumer(mut self, key: impl Into<String>, secret: impl Into<String>) -> Self {
        self.consumer = Some(ConsumerOverride {
            key: key.into(),
            secret: secret.into(),
        });
        self
    }

    /// Override HTTP timeouts
    #[must_use]
    pub const fn with_timeouts(mut self, timeout: Duration, connect_timeout: Duration) -> Self {
        self.timeout = timeout;
        self.connect_timeout = connect_timeout;
        self
    }

    /// URL of the SSO embed widget
    #[must_use]
    pub fn sso_embed_url(&self) -> String {
        format!("{}/embed", self.sso_base_url)
    }

    /// Build an absolute API URL from a path
    #[must_use]
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{path}", self.api_base_url)
    }
}

impl Default for ConnectConfig {
    fn default() -> Self {
        Self::for_domain(DEFAULT_DOMAIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_drives_urls() {
        let config = ConnectConfig::for_domain("garmin.cn");
        assert_eq!(config.api_base_url, "https://connectapi.garmin.cn");
        assert_eq!(config.sso_embed_url(), "https://sso.garmin.cn/sso/embed");
    }

    #[test]
    fn base_url_override_strips_trailing_slash() {
        let config = ConnectConfig::default().with_base_url("http://127.0.0.1:1234/");
        assert_eq!(
            config.api_url("/wellness-service/wellness/dailyStress/2024-01-15"),
            "http://127.0.0.1:1234/wellness-service/wellness/dailyStress/2024-01-15"
        );
        assert_eq!(config.sso_base_url, "http://127.0.0.1:1234/sso");
    }
}
