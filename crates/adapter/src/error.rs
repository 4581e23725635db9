//! Error types for the MCP adapter.

use thiserror::Error;

/// Main error type for the adapter.
#[derive(Error, Debug)]
pub enum AdapterError {
    /// Configuration errors (invalid base URL, invalid log filter)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Startup errors (logging or MCP handshake failed)
    #[error("Startup error: {0}")]
    Startup(String),

    /// Runtime errors (serving task failed)
    #[error("Runtime error: {0}")]
    Runtime(String),
}

/// Result type alias for adapter operations.
pub type Result<T> = std::result::Result<T, AdapterError>;
