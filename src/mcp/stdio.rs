// ABOUTME: Newline-delimited JSON-RPC transport over stdin/stdout
// ABOUTME: Each request runs in its own task; a single writer task keeps response lines whole
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

//! # Stdio Transport
//!
//! Stdout carries only protocol messages. Logs go to stderr.

use std::sync::Arc;

use serde_json::Value;
use tokio::io::{stdin, stdout, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, error, info, warn};

use crate::errors::{AppError, AppResult};
use crate::jsonrpc::{error_codes, JsonRpcRequest, JsonRpcResponse};

use super::request_processor::McpRequestProcessor;
use super::resources::ServerResources;

/// Serves MCP over a line-oriented byte stream
pub struct StdioTransport {
    processor: Arc<McpRequestProcessor>,
}

impl StdioTransport {
    /// Create a transport over the shared resources
    #[must_use]
    pub fn new(resources: Arc<ServerResources>) -> Self {
        Self {
            processor: Arc::new(McpRequestProcessor::new(resources)),
        }
    }

    /// Serve stdin/stdout until stdin closes
    ///
    /// # Errors
    ///
    /// Returns an error if reading stdin or writing stdout fails
    pub async fn run(&self) -> AppResult<()> {
        info!("MCP stdio transport ready - listening on stdin/stdout");
        self.serve(BufReader::new(stdin()), stdout()).await
    }

    /// Serve requests read from `reader`, writing responses to `writer`
    ///
    /// Returns once the reader reaches end of input and every in-flight
    /// request has been answered.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or writing fails
    pub async fn serve<R, W>(&self, reader: R, writer: W) -> AppResult<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (sender, receiver) = unbounded_channel();
        let writer_task = tokio::spawn(write_lines(writer, receiver));
        let mut in_flight = JoinSet::new();
        let mut lines = reader.lines();

        while let Some(line) = lines.next_line().await? {
            reap_finished(&mut in_flight);
            if line.trim().is_empty() {
                continue;
            }

            match parse_line(&line) {
                Ok(request) => {
                    let processor = Arc::clone(&self.processor);
                    let sender = sender.clone();
                    in_flight.spawn(async move {
                        if let Some(response) = processor.handle_request(request).await {
                            send(&sender, &response);
                        }
                    });
                }
                Err(response) => send(&sender, &response),
            }
        }

        debug!("Input closed, waiting for {} in-flight requests", in_flight.len());
        while let Some(joined) = in_flight.join_next().await {
            log_task_exit(joined);
        }
        drop(sender);

        writer_task
            .await
            .map_err(|e| AppError::internal(format!("Response writer task failed: {e}")))??;
        info!("MCP stdio transport stopped");
        Ok(())
    }
}

/// Decode one line, or produce the error response it deserves
fn parse_line(line: &str) -> Result<JsonRpcRequest, JsonRpcResponse> {
    let message: Value = serde_json::from_str(line).map_err(|e| {
        warn!("Invalid JSON-RPC message: {e}");
        JsonRpcResponse::parse_error()
    })?;
    let id = message.get("id").cloned();

    serde_json::from_value(message).map_err(|e| {
        warn!("Malformed JSON-RPC request: {e}");
        JsonRpcResponse::error(
            Some(id.unwrap_or(Value::Null)),
            error_codes::INVALID_REQUEST,
            "Invalid Request",
        )
    })
}

/// Drop completed request tasks so the set only holds running ones
fn reap_finished(in_flight: &mut JoinSet<()>) {
    while let Some(joined) = in_flight.try_join_next() {
        log_task_exit(joined);
    }
}

fn log_task_exit(joined: Result<(), JoinError>) {
    if let Err(e) = joined {
        if e.is_panic() {
            error!("Request handler panicked: {e}");
        } else {
            warn!("Request handler cancelled: {e}");
        }
    }
}

fn send(sender: &UnboundedSender<String>, response: &JsonRpcResponse) {
    match serde_json::to_string(response) {
        Ok(line) => {
            if sender.send(line).is_err() {
                warn!("Response writer closed, dropping response");
            }
        }
        Err(e) => warn!("Failed to serialize response: {e}"),
    }
}

async fn write_lines<W>(mut writer: W, mut receiver: UnboundedReceiver<String>) -> AppResult<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(line) = receiver.recv().await {
        debug!("Sending MCP response: {line}");
        writer.write_all(line.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }
    Ok(())
}
