// ABOUTME: Token lifecycle for a Garmin Connect session: login, bearer renewal, logout
// ABOUTME: Tokens live behind an async RwLock and are never held across network calls
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

//! Authentication against Garmin Connect.
//!
//! Login follows the mobile app: SSO embed widget → service ticket → OAuth1
//! token → OAuth2 bearer. The OAuth1 token is long-lived and is used to mint
//! a new bearer whenever the current one expires.

pub mod exchange;
pub mod oauth1;
pub mod sso;
pub mod store;
pub mod tokens;

use chrono::Utc;
use reqwest::Client;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::config::ConnectConfig;
use crate::errors::{ConnectError, ConnectResult};
use crate::http_client::sso_client;
use store::TokenStore;
use tokens::{OAuthConsumer, TokenPair};

/// Owns the OAuth tokens of one Garmin account
pub struct TokenManager {
    http: Client,
    config: ConnectConfig,
    store: Option<TokenStore>,
    consumer: RwLock<Option<OAuthConsumer>>,
    tokens: RwLock<Option<TokenPair>>,
}

impl TokenManager {
    /// Manager without tokens
    #[must_use]
    pub fn new(http: Client, config: ConnectConfig) -> Self {
        let store = config.token_store.clone().map(TokenStore::new);
        Self {
            http,
            config,
            store,
            consumer: RwLock::new(None),
            tokens: RwLock::new(None),
        }
    }

    /// Establish tokens, preferring the token store over a fresh SSO login
    ///
    /// # Errors
    ///
    /// Returns an error if neither stored tokens nor the credentials work
    pub async fn login(&self, email: &str, password: &str) -> ConnectResult<()> {
        if let Some(store) = &self.store {
            match store.load().await {
                Ok(Some(tokens)) => {
                    info!("Resuming Garmin session from {}", store.dir().display());
                    self.install(tokens).await;
                    return Ok(());
                }
                Ok(None) => {}
                Err(e) => warn!("Ignoring unreadable token store: {e}"),
            }
        }

        if email.is_empty() || password.is_empty() {
            return Err(ConnectError::Authentication(
                "Garmin email and password are required".to_owned(),
            ));
        }

        let consumer = self.consumer().await?;
        let sso = sso_client(&self.config)?;
        let ticket = sso::obtain_ticket(&sso, &self.config, email, password).await?;
        let oauth1 = exchange::preauthorize(&self.http, &self.config, &consumer, &ticket).await?;
        let oauth2 = exchange::exchange(&self.http, &self.config, &consumer, &oauth1).await?;

        let tokens = TokenPair { oauth1, oauth2 };
        self.persist(&tokens).await;
        self.install(tokens).await;
        info!("Garmin login completed");
        Ok(())
    }

    /// Replace the current tokens
    pub async fn install(&self, tokens: TokenPair) {
        *self.tokens.write().await = Some(tokens);
    }

    /// Whether a token pair is present
    pub async fn has_tokens(&self) -> bool {
        self.tokens.read().await.is_some()
    }

    /// `Authorization` header value, renewing the bearer when it has expired
    ///
    /// # Errors
    ///
    /// Returns [`ConnectError::NotAuthenticated`] without tokens, or the
    /// exchange error when renewal fails
    pub async fn authorization(&self) -> ConnectResult<String> {
        let now = Utc::now().timestamp();
        let oauth1 = {
            let guard = self.tokens.read().await;
            let Some(pair) = guard.as_ref() else {
                return Err(ConnectError::NotAuthenticated(
                    "no Garmin session is active".to_owned(),
                ));
            };
            if !pair.oauth2.is_expired_at(now) {
                return Ok(pair.oauth2.authorization());
            }
            pair.oauth1.clone()
        };

        info!("Garmin OAuth2 token expired, exchanging a new one");
        let consumer = self.consumer().await?;
        let oauth2 = exchange::exchange(&self.http, &self.config, &consumer, &oauth1).await?;
        let header = oauth2.authorization();

        let renewed = {
            let mut guard = self.tokens.write().await;
            guard.as_mut().map(|pair| {
                pair.oauth2 = oauth2;
                pair.clone()
            })
        };
        if let Some(tokens) = renewed {
            self.persist(&tokens).await;
        }
        Ok(header)
    }

    /// Drop tokens from memory and from the token store
    pub async fn clear(&self) {
        *self.tokens.write().await = None;
        if let Some(store) = &self.store {
            if let Err(e) = store.clear().await {
                warn!("Failed to clear Garmin token store: {e}");
            }
        }
    }

    async fn consumer(&self) -> ConnectResult<OAuthConsumer> {
        if let Some(consumer) = self.consumer.read().await.as_ref() {
            return Ok(consumer.clone());
        }
        let consumer = exchange::consumer(&self.http, &self.config).await?;
        *self.consumer.write().await = Some(consumer.clone());
        Ok(consumer)
    }

    async fn persist(&self, tokens: &TokenPair) {
        if let Some(store) = &self.store {
            if let Err(e) = store.save(tokens).await {
                warn!("Failed to persist Garmin tokens: {e}");
            }
        }
    }
}
