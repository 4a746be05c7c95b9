// ABOUTME: Unified error type for the MCP server with error codes and JSON-RPC mapping
// ABOUTME: Converts collaborator and tool failures into AppError while keeping their messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

//! # Unified Error Handling System
//!
//! Defines the error codes and the `AppError` type shared by the session,
//! the tool layer and the protocol handlers. Collaborator failures keep
//! their message verbatim so endpoint error strings can embed it.

use std::error::Error as StdError;
use std::fmt;
use std::io;

use garmin_connect::ConnectError;
use serde::{Deserialize, Serialize};

use crate::jsonrpc::error_codes;

/// Standard error codes used throughout the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Authentication (1000-1999)
    #[serde(rename = "AUTH_REQUIRED")]
    AuthRequired = 1000,
    #[serde(rename = "AUTH_INVALID")]
    AuthInvalid = 1001,

    // Validation (3000-3999)
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    #[serde(rename = "MISSING_REQUIRED_FIELD")]
    MissingRequiredField = 3001,

    // Resource Management (4000-4999)
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound = 4000,

    // External Services (5000-5999)
    #[serde(rename = "EXTERNAL_SERVICE_ERROR")]
    ExternalServiceError = 5000,
    #[serde(rename = "EXTERNAL_SERVICE_UNAVAILABLE")]
    ExternalServiceUnavailable = 5001,
    #[serde(rename = "EXTERNAL_AUTH_FAILED")]
    ExternalAuthFailed = 5002,
    #[serde(rename = "EXTERNAL_RATE_LIMITED")]
    ExternalRateLimited = 5003,

    // Configuration (6000-6999)
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError = 6000,
    #[serde(rename = "CONFIG_MISSING")]
    ConfigMissing = 6001,

    // Internal Errors (9000-9999)
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    #[serde(rename = "STORAGE_ERROR")]
    StorageError = 9002,
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9003,
}

impl ErrorCode {
    /// JSON-RPC error code used when this error escapes as a protocol error
    #[must_use]
    pub const fn jsonrpc_code(self) -> i32 {
        match self {
            Self::InvalidInput | Self::MissingRequiredField | Self::ResourceNotFound => {
                error_codes::INVALID_PARAMS
            }
            Self::AuthRequired
            | Self::AuthInvalid
            | Self::ExternalServiceError
            | Self::ExternalServiceUnavailable
            | Self::ExternalAuthFailed
            | Self::ExternalRateLimited
            | Self::ConfigError
            | Self::ConfigMissing
            | Self::InternalError
            | Self::StorageError
            | Self::SerializationError => error_codes::INTERNAL_ERROR,
        }
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::AuthRequired => "Authentication is required to access this resource",
            Self::AuthInvalid => "The provided authentication credentials are invalid",
            Self::InvalidInput => "The provided input is invalid",
            Self::MissingRequiredField => "A required field is missing from the request",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::ExternalServiceError => "An external service encountered an error",
            Self::ExternalServiceUnavailable => "An external service is currently unavailable",
            Self::ExternalAuthFailed => "Authentication with external service failed",
            Self::ExternalRateLimited => "External service rate limit exceeded",
            Self::ConfigError => "Configuration error encountered",
            Self::ConfigMissing => "Required configuration is missing",
            Self::InternalError => "An internal server error occurred",
            Self::StorageError => "Storage operation failed",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }
}

/// Unified error type for the server
#[derive(Debug, thiserror::Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Authentication required
    #[must_use]
    pub fn auth_required(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AuthRequired, message)
    }

    /// Resource not found
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Invalid input
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Internal server error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// JSON-RPC code for this error
    #[must_use]
    pub const fn jsonrpc_code(&self) -> i32 {
        self.code.jsonrpc_code()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

impl From<ConnectError> for AppError {
    fn from(error: ConnectError) -> Self {
        let code = match &error {
            ConnectError::Authentication(_) => ErrorCode::ExternalAuthFailed,
            ConnectError::NotAuthenticated(_) => ErrorCode::AuthRequired,
            ConnectError::NotFound { .. } => ErrorCode::ResourceNotFound,
            ConnectError::TooManyRequests { .. } => ErrorCode::ExternalRateLimited,
            ConnectError::Http { .. } => ErrorCode::ExternalServiceError,
            ConnectError::Request(_) => ErrorCode::ExternalServiceUnavailable,
            ConnectError::InvalidArgument(_) => ErrorCode::InvalidInput,
            ConnectError::Parse(_) => ErrorCode::SerializationError,
            ConnectError::Io(_) => ErrorCode::StorageError,
            ConnectError::Fit(_) => ErrorCode::InternalError,
        };
        Self::new(code, error.to_string()).with_source(error)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, error.to_string()).with_source(error)
    }
}

impl From<io::Error> for AppError {
    fn from(error: io::Error) -> Self {
        Self::new(ErrorCode::StorageError, error.to_string()).with_source(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_errors_keep_message() {
        let error = AppError::from(ConnectError::invalid_argument("invalid unit"));
        assert_eq!(error.code, ErrorCode::InvalidInput);
        assert_eq!(error.message, "invalid unit");
        assert!(error.source.is_some());
    }

    #[test]
    fn test_connect_error_codes() {
        let auth = AppError::from(ConnectError::Authentication("401".to_owned()));
        assert_eq!(auth.code, ErrorCode::ExternalAuthFailed);

        let limited = AppError::from(ConnectError::TooManyRequests {
            url: "/x".to_owned(),
        });
        assert_eq!(limited.code, ErrorCode::ExternalRateLimited);
    }

    #[test]
    fn test_jsonrpc_mapping() {
        assert_eq!(ErrorCode::MissingRequiredField.jsonrpc_code(), -32602);
        assert_eq!(ErrorCode::InvalidInput.jsonrpc_code(), -32602);
        assert_eq!(ErrorCode::InternalError.jsonrpc_code(), -32603);
    }

    #[test]
    fn test_display_includes_description() {
        let error = AppError::not_found("tool 'get_nothing'");
        assert_eq!(
            error.to_string(),
            "The requested resource was not found: tool 'get_nothing' not found"
        );
    }
}
