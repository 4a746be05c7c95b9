// ABOUTME: On-disk persistence of the OAuth token pair so restarts can skip the SSO login
// ABOUTME: Stores oauth1_token.json and oauth2_token.json inside a configured directory
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, info};

use super::tokens::{OAuth1Token, OAuth2Token, TokenPair};
use crate::errors::ConnectResult;

const OAUTH1_FILE: &str = "oauth1_token.json";
const OAUTH2_FILE: &str = "oauth2_token.json";

/// Directory-backed token store
#[derive(Debug, Clone)]
pub struct TokenStore {
    dir: PathBuf,
}

impl TokenStore {
    /// Store rooted at `dir`
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the token files
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load both tokens, `None` when either file is absent
    ///
    /// # Errors
    ///
    /// Returns an error if a file exists but cannot be read or decoded
    pub async fn load(&self) -> ConnectResult<Option<TokenPair>> {
        let Some(oauth1) = read_json::<OAuth1Token>(&self.dir.join(OAUTH1_FILE)).await? else {
            return Ok(None);
        };
        let Some(oauth2) = read_json::<OAuth2Token>(&self.dir.join(OAUTH2_FILE)).await? else {
            return Ok(None);
        };
        debug!("Loaded Garmin tokens from {}", self.dir.display());
        Ok(Some(TokenPair { oauth1, oauth2 }))
    }

    /// Write both tokens, creating the directory if needed
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or files cannot be written
    pub async fn save(&self, tokens: &TokenPair) -> ConnectResult<()> {
        fs::create_dir_all(&self.dir).await?;
        fs::write(
            self.dir.join(OAUTH1_FILE),
            serde_json::to_vec_pretty(&tokens.oauth1)?,
        )
        .await?;
        fs::write(
            self.dir.join(OAUTH2_FILE),
            serde_json::to_vec_pretty(&tokens.oauth2)?,
        )
        .await?;
        info!("Saved Garmin tokens to {}", self.dir.display());
        Ok(())
    }

    /// Remove persisted tokens, ignoring files that are already gone
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be removed
    pub async fn clear(&self) -> ConnectResult<()> {
        for name in [OAUTH1_FILE, OAUTH2_FILE] {
            match fs::remove_file(self.dir.join(name)).await {
                Err(e) if e.kind() != ErrorKind::NotFound => return Err(e.into()),
                _ => {}
            }
        }
        Ok(())
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> ConnectResult<Option<T>> {
    match fs::read(path).await {
        Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> TokenPair {
        TokenPair {
            oauth1: OAuth1Token {
                oauth_token: "t1".to_owned(),
                oauth_token_secret: "s1".to_owned(),
                mfa_token: None,
                mfa_expiration_timestamp: None,
                domain: Some("garmin.com".to_owned()),
            },
            oauth2: OAuth2Token {
                scope: None,
                jti: None,
                token_type: "Bearer".to_owned(),
                access_token: "a2".to_owned(),
                refresh_token: None,
                expires_in: 3600,
                expires_at: 1_700_003_600,
                refresh_token_expires_in: None,
                refresh_token_expires_at: None,
            },
        }
    }

    #[tokio::test]
    async fn missing_directory_loads_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("absent"));
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn saved_tokens_load_back() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("tokens"));
        store.save(&pair()).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(pair()));

        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
        store.clear().await.unwrap();
    }
}
