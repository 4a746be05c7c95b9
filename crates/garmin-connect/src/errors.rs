// ABOUTME: Error type for every Garmin Connect operation (login, token exchange, API calls)
// ABOUTME: Maps HTTP status codes and transport failures into structured variants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

use std::io;

use reqwest::StatusCode;

/// Errors raised by the Garmin Connect client
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    /// SSO login or OAuth exchange was rejected
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// No valid session is available for the request
    #[error("not authenticated: {0}")]
    NotAuthenticated(String),

    /// Resource does not exist on the remote side
    #[error("resource not found: {url}")]
    NotFound {
        /// Requested URL
        url: String,
    },

    /// Garmin throttled the request
    #[error("too many requests: {url}")]
    TooManyRequests {
        /// Requested URL
        url: String,
    },

    /// Any other non-success status
    #[error("request to {url} failed with status {status}: {body}")]
    Http {
        /// HTTP status returned
        status: u16,
        /// Requested URL
        url: String,
        /// Response body, possibly empty
        body: String,
    },

    /// Caller supplied a value the operation cannot use
    #[error("{0}")]
    InvalidArgument(String),

    /// Transport level failure
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// A response could not be decoded
    #[error("could not parse response: {0}")]
    Parse(String),

    /// Local file access failed
    #[error("file error: {0}")]
    Io(#[from] io::Error),

    /// Body composition could not be encoded
    #[error("FIT encoding failed: {0}")]
    Fit(String),
}

impl ConnectError {
    /// Build the error matching a non-success HTTP status
    #[must_use]
    pub fn from_status(status: StatusCode, url: &str, body: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Self::Authentication(format!("{status} returned by {url}"))
            }
            StatusCode::NOT_FOUND => Self::NotFound {
                url: url.to_owned(),
            },
            StatusCode::TOO_MANY_REQUESTS => Self::TooManyRequests {
                url: url.to_owned(),
            },
            _ => Self::Http {
                status: status.as_u16(),
                url: url.to_owned(),
                body,
            },
        }
    }

    /// Shorthand for [`ConnectError::InvalidArgument`]
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Whether the failure means the session credentials are unusable
    #[must_use]
    pub const fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Authentication(_) | Self::NotAuthenticated(_))
    }
}

impl From<serde_json::Error> for ConnectError {
    fn from(error: serde_json::Error) -> Self {
        Self::Parse(error.to_string())
    }
}

/// Result alias for Garmin Connect operations
pub type ConnectResult<T> = Result<T, ConnectError>;
