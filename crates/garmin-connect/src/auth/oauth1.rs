// ABOUTME: OAuth 1.0a HMAC-SHA1 request signing for the Garmin OAuth service
// ABOUTME: Builds signature base strings and Authorization headers per RFC 5849
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::Rng;
use ring::hmac;
use url::Url;

use super::tokens::{OAuth1Token, OAuthConsumer};

const NONCE_LEN: usize = 32;

/// Signs requests with a consumer and an optional OAuth1 token
pub struct OAuth1Signer<'a> {
    consumer: &'a OAuthConsumer,
    token: Option<&'a OAuth1Token>,
}

impl<'a> OAuth1Signer<'a> {
    /// Signer for consumer-only requests (the `preauthorized` call)
    #[must_use]
    pub const fn consumer_only(consumer: &'a OAuthConsumer) -> Self {
        Self {
            consumer,
            token: None,
        }
    }

    /// Signer for requests made on behalf of a token holder
    #[must_use]
    pub const fn with_token(consumer: &'a OAuthConsumer, token: &'a OAuth1Token) -> Self {
        Self {
            consumer,
            token: Some(token),
        }
    }

    /// `Authorization` header with a fresh nonce and the current time
    #[must_use]
    pub fn authorization(&self, method: &str, url: &Url, form: &[(&str, &str)]) -> String {
        let nonce: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(NONCE_LEN)
            .map(char::from)
            .collect();
        self.authorization_with(method, url, form, &nonce, Utc::now().timestamp())
    }

    /// `Authorization` header for a fixed nonce and timestamp
    #[must_use]
    pub fn authorization_with(
        &self,
        method: &str,
        url: &Url,
        form: &[(&str, &str)],
        nonce: &str,
        timestamp: i64,
    ) -> String {
        let timestamp = timestamp.to_string();
        let mut oauth_params = vec![
            ("oauth_consumer_key", self.consumer.consumer_key.as_str()),
            ("oauth_nonce", nonce),
            ("oauth_signature_method", "HMAC-SHA1"),
            ("oauth_timestamp", timestamp.as_str()),
            ("oauth_version", "1.0"),
        ];
        if let Some(token) = self.token {
            oauth_params.push(("oauth_token", token.oauth_token.as_str()));
        }

        let base = signature_base_string(method, url, &oauth_params, form);
        let signature = hmac_sha1_base64(&self.signing_key(), &base);

        let mut header_params: Vec<(&str, &str)> = oauth_params;
        header_params.push(("oauth_signature", signature.as_str()));
        let fields: Vec<String> = header_params
            .iter()
            .map(|(key, value)| format!("{}=\"{}\"", encode(key), encode(value)))
            .collect();
        format!("OAuth {}", fields.join(", "))
    }

    fn signing_key(&self) -> String {
        let token_secret = self.token.map_or("", |t| t.oauth_token_secret.as_str());
        format!(
            "{}&{}",
            encode(&self.consumer.consumer_secret),
            encode(token_secret)
        )
    }
}

/// RFC 5849 section 3.4.1 signature base string
#[must_use]
pub fn signature_base_string(
    method: &str,
    url: &Url,
    oauth_params: &[(&str, &str)],
    form: &[(&str, &str)],
) -> String {
    let mut params: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (encode(&k), encode(&v)))
        .chain(oauth_params.iter().map(|(k, v)| (encode(k), encode(v))))
        .chain(form.iter().map(|(k, v)| (encode(k), encode(v))))
        .collect();
    params.sort();

    let normalized: Vec<String> = params.iter().map(|(k, v)| format!("{k}={v}")).collect();

    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        encode(&base_url(url)),
        encode(&normalized.join("&"))
    )
}

/// HMAC-SHA1 of `data`, base64 encoded
#[must_use]
pub fn hmac_sha1_base64(key: &str, data: &str) -> String {
    let key = hmac::Key::new(hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY, key.as_bytes());
    BASE64_STANDARD.encode(hmac::sign(&key, data.as_bytes()).as_ref())
}

fn base_url(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default().to_lowercase();
    match url.port() {
        Some(port) => format!("{}://{host}:{port}{}", url.scheme(), url.path()),
        None => format!("{}://{host}{}", url.scheme(), url.path()),
    }
}

fn encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}
