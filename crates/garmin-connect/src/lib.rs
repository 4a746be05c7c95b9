// ABOUTME: Async Garmin Connect account client: SSO login, OAuth tokens and the Connect API surface
// ABOUTME: Exposes the GarminApi trait and its HTTP implementation, Garmin
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

#![deny(unsafe_code)]

//! # Garmin Connect
//!
//! Client for the private Garmin Connect API used by the mobile app.
//!
//! ## Modules
//!
//! - **api**: the `GarminApi` trait, one method per remote operation
//! - **client**: `Garmin`, the HTTP implementation of `GarminApi`
//! - **auth**: SSO ticket, OAuth1 signing, OAuth2 exchange and the token store
//! - **fit**: FIT encoding for body composition uploads

/// Operation surface of a Garmin Connect session
pub mod api;

/// SSO login and OAuth token lifecycle
pub mod auth;

/// HTTP implementation of the operation surface
pub mod client;

/// Domain and endpoint configuration
pub mod config;

/// Client error type
pub mod errors;

/// FIT file encoding
pub mod fit;

/// reqwest client construction
pub mod http_client;

/// Timestamp parsing and Garmin date formats
pub mod time;

/// Authenticated request execution
pub mod transport;

/// Request-side value types
pub mod types;

pub use api::GarminApi;
pub use auth::tokens::{OAuth1Token, OAuth2Token, TokenPair};
pub use client::Garmin;
pub use config::ConnectConfig;
pub use errors::{ConnectError, ConnectResult};
pub use types::{BloodPressureReading, BodyComposition, DownloadFormat, ManualActivity, Profile};
