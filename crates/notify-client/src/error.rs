//! Error types for `notify-client`.
//!
//! These never leave the executor boundary as errors: every variant is folded into
//! [`crate::envelope::Envelope::TransportError`] before a caller sees it.

use thiserror::Error;

/// Failures that can happen while building, sending or decoding a single request.
#[derive(Error, Debug)]
pub enum NotifyError {
    /// Tool arguments are missing or have the wrong shape.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Base URL + path did not form a valid URL.
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Only GET and POST are issued against the notification service.
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// Connect/send/read failures reported by the HTTP client.
    #[error("{0}")]
    Transport(String),

    /// The response claimed to be JSON but could not be parsed.
    #[error("Failed to decode JSON response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, NotifyError>;

impl From<reqwest::Error> for NotifyError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(error_chain(&value))
    }
}

/// Render an error together with its `source()` chain.
///
/// `reqwest` keeps the interesting part ("connection refused", "dns error") in the sources.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_msg = cause.to_string();
        if !msg.contains(&cause_msg) {
            msg.push_str(": ");
            msg.push_str(&cause_msg);
        }
        source = cause.source();
    }
    msg
}
