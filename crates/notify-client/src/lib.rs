//! Client side of the notification service adapter.
//!
//! This crate is used by `notify-mcp-adapter` to turn one tool invocation into one HTTP request
//! and the HTTP response into a normalized [`envelope::Envelope`].
//!
//! It contains **no** MCP protocol code: tool surfaces live in the adapter crate.

pub mod client;
pub mod envelope;
pub mod error;
pub mod executor;
pub mod operations;

pub use client::{ClientConfig, DEFAULT_BASE_URL, NotifyClient};
pub use envelope::{Envelope, ErrorFallback, NotifyResponse};
pub use error::{NotifyError, Result};
pub use executor::RequestExecutor;
pub use operations::Operation;
