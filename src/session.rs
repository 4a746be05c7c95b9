// ABOUTME: Process-wide Garmin session: one authenticated client plus its login state
// ABOUTME: Login happens once at startup; failures are kept and reported by every tool call
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

//! # Garmin Session
//!
//! The session is created once from the configured credentials and shared by
//! every request. There is no re-login: a failed login stays failed, and a
//! successful `logout` ends the session for the rest of the process.

use std::fmt;
use std::sync::Arc;

use garmin_connect::{Garmin, GarminApi};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::errors::{AppError, AppResult, ErrorCode};

/// Login state of the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Client holds valid tokens
    Authenticated,
    /// Startup login failed with this reason
    LoginFailed(String),
    /// `logout` succeeded; tokens were discarded
    LoggedOut,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Authenticated => f.write_str("authenticated"),
            Self::LoginFailed(reason) => write!(f, "login failed ({reason})"),
            Self::LoggedOut => f.write_str("logged out"),
        }
    }
}

/// Holder of the Garmin client for the process lifetime
pub struct GarminSession {
    client: Arc<dyn GarminApi>,
    state: RwLock<SessionState>,
}

impl GarminSession {
    /// Session around an already authenticated client
    #[must_use]
    pub fn authenticated(client: Arc<dyn GarminApi>) -> Self {
        Self {
            client,
            state: RwLock::new(SessionState::Authenticated),
        }
    }

    /// Session whose login failed
    #[must_use]
    pub fn failed(client: Arc<dyn GarminApi>, reason: impl Into<String>) -> Self {
        Self {
            client,
            state: RwLock::new(SessionState::LoginFailed(reason.into())),
        }
    }

    /// Build the Garmin client and log in with the configured credentials
    ///
    /// A rejected login does not fail startup; the reason is kept and every
    /// tool call reports it.
    ///
    /// # Errors
    ///
    /// Returns an error only if the HTTP client cannot be constructed
    pub async fn login(config: &ServerConfig) -> AppResult<Self> {
        let garmin = Arc::new(Garmin::new(config.connect_config())?);
        let credentials = &config.credentials;

        if !credentials.is_complete() && config.token_store.is_none() {
            warn!("GARMIN_EMAIL or GARMIN_PASSWORD is not set");
        }

        match garmin
            .login(&credentials.email, &credentials.password)
            .await
        {
            Ok(()) => {
                info!(domain = %config.domain, "Garmin Connect login succeeded");
                Ok(Self::authenticated(garmin))
            }
            Err(e) => {
                warn!(domain = %config.domain, "Garmin Connect login failed: {e}");
                Ok(Self::failed(garmin, e.to_string()))
            }
        }
    }

    /// The client, if the session is usable
    ///
    /// # Errors
    ///
    /// Returns an authentication error when login failed or after logout
    pub async fn client(&self) -> AppResult<Arc<dyn GarminApi>> {
        match &*self.state.read().await {
            SessionState::Authenticated => Ok(Arc::clone(&self.client)),
            SessionState::LoginFailed(reason) => Err(AppError::new(
                ErrorCode::AuthInvalid,
                format!("Garmin login failed: {reason}"),
            )),
            SessionState::LoggedOut => Err(AppError::auth_required(
                "Garmin session has been logged out",
            )),
        }
    }

    /// Current state
    pub async fn state(&self) -> SessionState {
        self.state.read().await.clone()
    }

    /// Whether tool calls can reach Garmin
    pub async fn is_authenticated(&self) -> bool {
        *self.state.read().await == SessionState::Authenticated
    }

    /// Record a successful logout
    pub async fn mark_logged_out(&self) {
        let mut state = self.state.write().await;
        if *state == SessionState::Authenticated {
            info!("Garmin session ended by logout");
            *state = SessionState::LoggedOut;
        }
    }
}

impl fmt::Debug for GarminSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GarminSession").finish_non_exhaustive()
    }
}
