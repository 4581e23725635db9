//! Command-line / environment configuration.

use crate::error::{AdapterError, Result};
use clap::{Parser, ValueEnum};
use notify_client::{ClientConfig, DEFAULT_BASE_URL};
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(
    name = "notify-mcp-adapter",
    version,
    about = "Expose the notification service REST API as MCP tools over stdio"
)]
pub struct Args {
    /// Base URL of the notification service, used when a tool call omits `base_url`
    #[arg(long, env = "NOTIFY_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Log level filter (overridden by `RUST_LOG`)
    #[arg(long, env = "NOTIFY_MCP_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Log output format (logs always go to stderr)
    #[arg(long, env = "NOTIFY_MCP_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl Args {
    /// Validate the arguments and build the client configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `--base-url` is not an absolute http(s) URL.
    pub fn client_config(&self) -> Result<ClientConfig> {
        let url = Url::parse(&self.base_url).map_err(|e| {
            AdapterError::Config(format!("Invalid base URL '{}': {e}", self.base_url))
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(AdapterError::Config(format!(
                "Invalid base URL '{}': scheme must be http or https",
                self.base_url
            )));
        }
        Ok(ClientConfig {
            default_base_url: self.base_url.clone(),
        })
    }
}
