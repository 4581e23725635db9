//! Normalized result of one outbound call, and its text rendering.

use crate::error::NotifyError;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Outcome of exactly one request against the notification service.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    /// The service answered with a status below 400.
    Success { status_code: u16, data: Value },
    /// The service answered with a status of 400 or above. `body` is the decoded response.
    HttpError { status_code: u16, body: Value },
    /// No usable response: unsupported method, bad URL, connect/send failure, undecodable body.
    TransportError { message: String },
}

/// How a failed operation fills the `error` field of its rendered output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorFallback {
    /// `error` is the transport message only (`null` for HTTP error statuses).
    MessageOnly,
    /// `error` is the transport message, or the decoded response body when there is none.
    MessageOrBody,
}

/// Flat view of an [`Envelope`]: `{success, data, error, status_code}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotifyResponse {
    pub success: bool,
    pub data: Option<Value>,
    pub error: Option<String>,
    pub status_code: Option<u16>,
}

impl Envelope {
    /// Classify a decoded response by status code.
    #[must_use]
    pub fn from_status(status_code: u16, data: Value) -> Self {
        if status_code < 400 {
            Self::Success { status_code, data }
        } else {
            Self::HttpError {
                status_code,
                body: data,
            }
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Success { status_code, .. } | Self::HttpError { status_code, .. } => {
                Some(*status_code)
            }
            Self::TransportError { .. } => None,
        }
    }

    /// Decoded response body, if a response was received.
    #[must_use]
    pub fn data(&self) -> Option<&Value> {
        match self {
            Self::Success { data, .. } => Some(data),
            Self::HttpError { body, .. } => Some(body),
            Self::TransportError { .. } => None,
        }
    }

    /// Transport-level error message. HTTP error statuses do not carry one.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::TransportError { message } => Some(message),
            _ => None,
        }
    }

    #[must_use]
    pub fn to_response(&self) -> NotifyResponse {
        NotifyResponse {
            success: self.is_success(),
            data: self.data().cloned(),
            error: self.error().map(str::to_string),
            status_code: self.status_code(),
        }
    }

    /// Render the envelope as the indented JSON text returned to the tool caller.
    ///
    /// Success renders `data`; failure renders `{"error": ..., "status_code": ...}` where `error`
    /// is chosen according to `fallback`.
    #[must_use]
    pub fn render(&self, fallback: ErrorFallback) -> String {
        let value = match self {
            Self::Success { data, .. } => data.clone(),
            Self::HttpError { status_code, body } => {
                let error = match fallback {
                    ErrorFallback::MessageOnly => Value::Null,
                    ErrorFallback::MessageOrBody => body.clone(),
                };
                json!({ "error": error, "status_code": status_code })
            }
            Self::TransportError { message } => {
                json!({ "error": message, "status_code": Value::Null })
            }
        };
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
    }
}

impl From<NotifyError> for Envelope {
    fn from(value: NotifyError) -> Self {
        Self::TransportError {
            message: value.to_string(),
        }
    }
}
