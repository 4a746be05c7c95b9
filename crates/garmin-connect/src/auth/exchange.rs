// ABOUTME: Calls to the Garmin OAuth service: consumer lookup, ticket pre-authorization, OAuth2 exchange
// ABOUTME: Every call is signed with OAuth 1.0a and issued with the mobile app user agent
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

use chrono::Utc;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::Client;
use tracing::debug;
use url::Url;

use super::oauth1::OAuth1Signer;
use super::tokens::{OAuth1Token, OAuth2Token, OAuthConsumer};
use crate::config::{ConnectConfig, OAUTH_USER_AGENT};
use crate::errors::{ConnectError, ConnectResult};

const PREAUTHORIZED_PATH: &str = "/oauth-service/oauth/preauthorized";
const EXCHANGE_PATH: &str = "/oauth-service/oauth/exchange/user/2.0";

/// Resolve the consumer key pair, fetching it unless the configuration supplies one
///
/// # Errors
///
/// Returns an error if the consumer document cannot be fetched or decoded
pub async fn consumer(http: &Client, config: &ConnectConfig) -> ConnectResult<OAuthConsumer> {
    if let Some(fixed) = &config.consumer {
        return Ok(OAuthConsumer {
            consumer_key: fixed.key.clone(),
            consumer_secret: fixed.secret.clone(),
        });
    }

    debug!("Fetching OAuth consumer from {}", config.consumer_url);
    let response = http.get(&config.consumer_url).send().await?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ConnectError::from_status(status, &config.consumer_url, body));
    }
    Ok(response.json().await?)
}

/// Trade an SSO service ticket for an OAuth1 token
///
/// # Errors
///
/// Returns an error if the OAuth service rejects the ticket
pub async fn preauthorize(
    http: &Client,
    config: &ConnectConfig,
    consumer: &OAuthConsumer,
    ticket: &str,
) -> ConnectResult<OAuth1Token> {
    let login_url = config.sso_embed_url();
    let mut url = parse_url(&config.api_url(PREAUTHORIZED_PATH))?;
    url.query_pairs_mut()
        .append_pair("ticket", ticket)
        .append_pair("login-url", &login_url)
        .append_pair("accepts-mfa-tokens", "true");

    let authorization = OAuth1Signer::consumer_only(consumer).authorization("GET", &url, &[]);
    let response = http
        .get(url.clone())
        .header(AUTHORIZATION, authorization)
        .header(USER_AGENT, OAUTH_USER_AGENT)
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(ConnectError::Authentication(format!(
            "ticket pre-authorization failed with status {status}"
        )));
    }
    OAuth1Token::from_form(&body, &config.domain)
}

/// Exchange an OAuth1 token for a fresh OAuth2 bearer token
///
/// # Errors
///
/// Returns an error if the OAuth service rejects the token
pub async fn exchange(
    http: &Client,
    config: &ConnectConfig,
    consumer: &OAuthConsumer,
    oauth1: &OAuth1Token,
) -> ConnectResult<OAuth2Token> {
    let url = parse_url(&config.api_url(EXCHANGE_PATH))?;
    let form: Vec<(&str, &str)> = oauth1
        .mfa_token
        .as_deref()
        .map_or_else(Vec::new, |mfa| vec![("mfa_token", mfa)]);

    let authorization = OAuth1Signer::with_token(consumer, oauth1).authorization("POST", &url, &form);
    let response = http
        .post(url.clone())
        .header(AUTHORIZATION, authorization)
        .header(USER_AGENT, OAUTH_USER_AGENT)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .form(&form)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(ConnectError::Authentication(format!(
            "OAuth2 exchange failed with status {status}"
        )));
    }
    let token: OAuth2Token = response.json().await?;
    debug!("Obtained OAuth2 token valid for {}s", token.expires_in);
    Ok(token.stamped(Utc::now().timestamp()))
}

fn parse_url(raw: &str) -> ConnectResult<Url> {
    Url::parse(raw).map_err(|e| ConnectError::Parse(format!("invalid URL {raw}: {e}")))
}
