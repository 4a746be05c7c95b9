// ABOUTME: Authenticated request execution against connectapi with bearer tokens
// ABOUTME: Normalizes responses: empty bodies become null, non-JSON bodies become strings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

use crate::auth::TokenManager;
use crate::config::ConnectConfig;
use crate::errors::{ConnectError, ConnectResult};

/// Query string pairs appended to a request
pub type Query<'a> = &'a [(&'static str, String)];

/// Issues authenticated calls on behalf of one session
pub struct Transport {
    http: Client,
    config: ConnectConfig,
    auth: TokenManager,
}

impl Transport {
    /// Transport sharing `http` with its token manager
    #[must_use]
    pub fn new(http: Client, config: ConnectConfig) -> Self {
        let auth = TokenManager::new(http.clone(), config.clone());
        Self { http, config, auth }
    }

    /// Token manager of this session
    #[must_use]
    pub const fn auth(&self) -> &TokenManager {
        &self.auth
    }

    /// Configuration in use
    #[must_use]
    pub const fn config(&self) -> &ConnectConfig {
        &self.config
    }

    /// `GET` a JSON document
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status
    pub async fn get(&self, path: &str, query: Query<'_>) -> ConnectResult<Value> {
        let url = self.config.api_url(path);
        let response = self
            .send(self.http.get(&url).query(query), Method::GET, &url)
            .await?;
        decode(response).await
    }

    /// Send a JSON body with `method`
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status
    pub async fn send_json(&self, method: Method, path: &str, body: &Value) -> ConnectResult<Value> {
        let url = self.config.api_url(path);
        let builder = self.http.request(method.clone(), &url).json(body);
        let response = self.send(builder, method, &url).await?;
        decode(response).await
    }

    /// Send `method` without a body
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status
    pub async fn send_empty(&self, method: Method, path: &str) -> ConnectResult<Value> {
        let url = self.config.api_url(path);
        let builder = self.http.request(method.clone(), &url);
        let response = self.send(builder, method, &url).await?;
        decode(response).await
    }

    /// `DELETE` a resource
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status
    pub async fn delete(&self, path: &str) -> ConnectResult<Value> {
        let url = self.config.api_url(path);
        let response = self
            .send(self.http.delete(&url), Method::DELETE, &url)
            .await?;
        decode(response).await
    }

    /// `GET` raw bytes
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status
    pub async fn download(&self, path: &str) -> ConnectResult<Vec<u8>> {
        let url = self.config.api_url(path);
        let response = self
            .send(self.http.get(&url), Method::GET, &url)
            .await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Multipart upload of a single file field
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status
    pub async fn upload(&self, path: &str, file_name: &str, bytes: Vec<u8>) -> ConnectResult<Value> {
        let url = self.config.api_url(path);
        let part = Part::bytes(bytes).file_name(file_name.to_owned());
        let form = Form::new().part("file", part);
        let response = self
            .send(self.http.post(&url).multipart(form), Method::POST, &url)
            .await?;
        decode(response).await
    }

    async fn send(&self, builder: RequestBuilder, method: Method, url: &str) -> ConnectResult<Response> {
        let authorization = self.auth.authorization().await?;
        debug!("{method} {url}");

        let response = builder
            .header(AUTHORIZATION, authorization)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        warn!("{method} {url} failed with status {status}");
        Err(ConnectError::from_status(status, url, body))
    }
}

async fn decode(response: Response) -> ConnectResult<Value> {
    if response.status() == StatusCode::NO_CONTENT {
        return Ok(Value::Null);
    }
    let text = response.text().await?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    match serde_json::from_str::<Value>(&text) {
        Ok(value) => Ok(value),
        Err(_) => Ok(Value::String(text)),
    }
}
