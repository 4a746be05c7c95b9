// ABOUTME: Garmin MCP server binary: logs in to Garmin Connect and serves MCP over stdio
// ABOUTME: Configuration comes from the environment and .env, with CLI overrides for domain and token store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

//! # Garmin MCP Server Binary
//!
//! Stdout is reserved for the protocol; all logging goes to stderr.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use garmin_mcp_server::config::{load_dotenv, ServerConfig};
use garmin_mcp_server::constants::protocol::{SERVER_NAME, SERVER_VERSION};
use garmin_mcp_server::logging;
use garmin_mcp_server::mcp::{ServerResources, StdioTransport};
use garmin_mcp_server::session::GarminSession;
use tokio::signal;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "garmin-mcp-server")]
#[command(about = "Garmin Connect MCP server - exposes a Garmin Connect account to AI assistants")]
#[command(version)]
pub struct Args {
    /// Garmin domain (garmin.com or garmin.cn)
    #[arg(long)]
    domain: Option<String>,

    /// Directory holding oauth1_token.json and oauth2_token.json
    #[arg(long)]
    tokenstore: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    load_dotenv();
    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(domain) = args.domain {
        config = config.with_domain(domain)?;
    }
    if let Some(dir) = args.tokenstore {
        config = config.with_token_store(&dir);
    }

    info!(
        server = SERVER_NAME,
        version = SERVER_VERSION,
        domain = %config.domain,
        protocol = %config.protocol_version,
        "Starting Garmin MCP server"
    );

    let session = GarminSession::login(&config).await?;
    let resources = Arc::new(ServerResources::new(config, session));
    let transport = StdioTransport::new(resources);

    tokio::select! {
        result = transport.run() => {
            if let Err(e) = result {
                error!("Stdio transport failed: {e}");
                return Err(e.into());
            }
        }
        _ = signal::ctrl_c() => {
            info!("Interrupted, shutting down");
        }
    }

    Ok(())
}
