// ABOUTME: Garmin SSO embed-widget login that turns an email/password pair into a service ticket
// ABOUTME: Scrapes the CSRF token, page title and ticket out of the SSO HTML responses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

use regex::Regex;
use reqwest::header::REFERER;
use reqwest::{Client, Response};
use tracing::{debug, info};

use crate::config::ConnectConfig;
use crate::errors::{ConnectError, ConnectResult};

const CSRF_PATTERN: &str = r#"name="_csrf"\s+value="(.+?)""#;
const TITLE_PATTERN: &str = r"<title>(.+?)</title>";
const TICKET_PATTERN: &str = r#"embed\?ticket=([^"]+)""#;

/// Run the SSO page sequence and return the service ticket
///
/// # Errors
///
/// Returns [`ConnectError::Authentication`] when Garmin rejects the
/// credentials or asks for a second factor
pub async fn obtain_ticket(
    client: &Client,
    config: &ConnectConfig,
    email: &str,
    password: &str,
) -> ConnectResult<String> {
    let sso = config.sso_base_url.as_str();
    let embed_url = config.sso_embed_url();
    let signin_url = format!("{sso}/signin");

    let embed_params = [
        ("id", "gauth-widget"),
        ("embedWidget", "true"),
        ("gauthHost", sso),
    ];
    let signin_params = [
        ("id", "gauth-widget"),
        ("embedWidget", "true"),
        ("gauthHost", embed_url.as_str()),
        ("service", embed_url.as_str()),
        ("source", embed_url.as_str()),
        ("redirectAfterAccountLoginUrl", embed_url.as_str()),
        ("redirectAfterAccountCreationUrl", embed_url.as_str()),
    ];

    debug!("Opening SSO embed widget");
    checked(
        client.get(&embed_url).query(&embed_params).send().await?,
        &embed_url,
    )
    .await?;

    let signin_page = checked(
        client
            .get(&signin_url)
            .query(&signin_params)
            .header(REFERER, &embed_url)
            .send()
            .await?,
        &signin_url,
    )
    .await?;
    let csrf = extract_csrf(&signin_page)?;

    let form = [
        ("username", email),
        ("password", password),
        ("embed", "true"),
        ("_csrf", csrf.as_str()),
    ];
    let result_page = checked(
        client
            .post(&signin_url)
            .query(&signin_params)
            .header(REFERER, &signin_url)
            .form(&form)
            .send()
            .await?,
        &signin_url,
    )
    .await?;

    let title = extract_title(&result_page).unwrap_or_default();
    if title.contains("MFA") {
        return Err(ConnectError::Authentication(
            "multi-factor authentication is not supported".to_owned(),
        ));
    }
    if title != "Success" {
        return Err(ConnectError::Authentication(format!(
            "unexpected SSO response page '{title}'"
        )));
    }

    info!("SSO credentials accepted");
    extract_ticket(&result_page)
}

async fn checked(response: Response, url: &str) -> ConnectResult<String> {
    let status = response.status();
    let body = response.text().await?;
    if status.is_success() {
        Ok(body)
    } else {
        Err(ConnectError::from_status(status, url, body))
    }
}

fn capture(pattern: &str, html: &str) -> ConnectResult<Option<String>> {
    let re = Regex::new(pattern).map_err(|e| ConnectError::Parse(e.to_string()))?;
    Ok(re
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_owned()))
}

/// CSRF token embedded in the sign-in form
///
/// # Errors
///
/// Returns an error if the page carries no token
pub fn extract_csrf(html: &str) -> ConnectResult<String> {
    capture(CSRF_PATTERN, html)?
        .ok_or_else(|| ConnectError::Authentication("SSO page has no CSRF token".to_owned()))
}

/// Content of the page `<title>`
#[must_use]
pub fn extract_title(html: &str) -> Option<String> {
    capture(TITLE_PATTERN, html).ok().flatten()
}

/// Service ticket embedded in the success page
///
/// # Errors
///
/// Returns an error if the page carries no ticket
pub fn extract_ticket(html: &str) -> ConnectResult<String> {
    capture(TICKET_PATTERN, html)?
        .ok_or_else(|| ConnectError::Authentication("SSO response has no service ticket".to_owned()))
}
