// ABOUTME: OAuth consumer, OAuth1 and OAuth2 token types exchanged with the Garmin OAuth service
// ABOUTME: OAuth1 tokens are long-lived, OAuth2 bearer tokens expire and are re-exchanged
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::errors::{ConnectError, ConnectResult};

/// Consumer key pair identifying the client application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthConsumer {
    /// Consumer key
    pub consumer_key: String,
    /// Consumer secret
    pub consumer_secret: String,
}

/// Long-lived token obtained from the SSO service ticket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuth1Token {
    /// Token value
    pub oauth_token: String,
    /// Token secret used in request signatures
    pub oauth_token_secret: String,
    /// MFA token when the account uses two-factor login
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mfa_token: Option<String>,
    /// Expiration of the MFA token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mfa_expiration_timestamp: Option<String>,
    /// Domain the token was issued for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

impl OAuth1Token {
    /// Parse the form-encoded body returned by the `preauthorized` endpoint
    ///
    /// # Errors
    ///
    /// Returns an error if the token or its secret is missing
    pub fn from_form(body: &str, domain: &str) -> ConnectResult<Self> {
        let mut token = None;
        let mut secret = None;
        let mut mfa_token = None;
        let mut mfa_expiration = None;

        for (key, value) in form_urlencoded::parse(body.as_bytes()) {
            match key.as_ref() {
                "oauth_token" => token = Some(value.into_owned()),
                "oauth_token_secret" => secret = Some(value.into_owned()),
                "mfa_token" => mfa_token = Some(value.into_owned()),
                "mfa_expiration_timestamp" => mfa_expiration = Some(value.into_owned()),
                _ => {}
            }
        }

        match (token, secret) {
            (Some(oauth_token), Some(oauth_token_secret)) => Ok(Self {
                oauth_token,
                oauth_token_secret,
                mfa_token,
                mfa_expiration_timestamp: mfa_expiration,
                domain: Some(domain.to_owned()),
            }),
            _ => Err(ConnectError::Authentication(
                "OAuth1 response did not contain a token".to_owned(),
            )),
        }
    }
}

/// Short-lived bearer token used on every API call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuth2Token {
    /// Granted scopes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// Token identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
    /// Usually `Bearer`
    pub token_type: String,
    /// Bearer value
    pub access_token: String,
    /// Refresh token (unused, renewal goes through the OAuth1 exchange)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Lifetime in seconds at issue time
    pub expires_in: i64,
    /// Absolute expiry as a unix timestamp
    #[serde(default)]
    pub expires_at: i64,
    /// Refresh token lifetime in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token_expires_in: Option<i64>,
    /// Absolute refresh token expiry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token_expires_at: Option<i64>,
}

impl OAuth2Token {
    /// Fill absolute expiry fields relative to `now`
    #[must_use]
    pub fn stamped(mut self, now: i64) -> Self {
        if self.expires_at == 0 {
            self.expires_at = now + self.expires_in;
        }
        if self.refresh_token_expires_at.is_none() {
            self.refresh_token_expires_at = self.refresh_token_expires_in.map(|secs| now + secs);
        }
        self
    }

    /// Whether the bearer token can no longer be used at `now`
    #[must_use]
    pub const fn is_expired_at(&self, now: i64) -> bool {
        self.expires_at <= now
    }

    /// Value for the `Authorization` header
    #[must_use]
    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

/// Both tokens that make up a login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    /// Long-lived token
    pub oauth1: OAuth1Token,
    /// Current bearer token
    pub oauth2: OAuth2Token,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_preauthorized_body() {
        let token = OAuth1Token::from_form(
            "oauth_token=abc&oauth_token_secret=s%2Fecret&mfa_token=m",
            "garmin.com",
        )
        .unwrap();
        assert_eq!(token.oauth_token, "abc");
        assert_eq!(token.oauth_token_secret, "s/ecret");
        assert_eq!(token.mfa_token.as_deref(), Some("m"));
        assert_eq!(token.domain.as_deref(), Some("garmin.com"));
    }

    #[test]
    fn rejects_body_without_secret() {
        assert!(OAuth1Token::from_form("oauth_token=abc", "garmin.com").is_err());
    }

    #[test]
    fn stamping_sets_absolute_expiry() {
        let token: OAuth2Token = serde_json::from_value(serde_json::json!({
            "token_type": "Bearer",
            "access_token": "at",
            "expires_in": 3600,
            "refresh_token_expires_in": 7200
        }))
        .unwrap();
        let token = token.stamped(1_000);
        assert_eq!(token.expires_at, 4_600);
        assert_eq!(token.refresh_token_expires_at, Some(8_200));
        assert!(!token.is_expired_at(4_599));
        assert!(token.is_expired_at(4_600));
        assert_eq!(token.authorization(), "Bearer at");
    }
}
