//! MCP stdio adapter for the notification service REST API.
//!
//! The binary wires [`config::Args`] into logging and a [`server::NotifyServer`] served over
//! stdin/stdout. All HTTP work happens in `notify-client`.

pub mod config;
pub mod error;
pub mod logging;
pub mod server;

use crate::config::Args;
use crate::error::{AdapterError, Result};
use crate::server::{NotifyServer, SERVER_NAME};
use notify_client::NotifyClient;
use rmcp::ServiceExt as _;
use rmcp::transport::stdio;
use tracing::info;

/// Serve the tools over stdio until the host closes the session.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, logging or the HTTP client cannot be
/// initialized, the MCP handshake fails, or the serving task panics.
pub async fn run(args: Args) -> Result<()> {
    let config = args.client_config()?;
    logging::init(&args.log_level, args.log_format)?;

    info!(
        server = SERVER_NAME,
        base_url = %config.default_base_url,
        "starting MCP server on stdio"
    );

    let client = NotifyClient::new(config)
        .map_err(|e| AdapterError::Startup(format!("failed to build HTTP client: {e}")))?;
    let server = NotifyServer::new(client);
    let service = server
        .serve(stdio())
        .await
        .map_err(|e| AdapterError::Startup(format!("MCP initialization failed: {e}")))?;

    let reason = service
        .waiting()
        .await
        .map_err(|e| AdapterError::Runtime(e.to_string()))?;
    info!(?reason, "MCP session ended");
    Ok(())
}
