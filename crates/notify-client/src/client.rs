//! Operation-level client: tool arguments in, rendered JSON text out.

use crate::envelope::Envelope;
use crate::error::{NotifyError, Result};
use crate::executor::RequestExecutor;
use crate::operations::Operation;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::info;

/// Hosted notification service used when neither the call nor the process config names one.
pub const DEFAULT_BASE_URL: &str = "https://notify.ai-jam.cdssandbox.xyz";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL used when a call does not carry its own `base_url` argument.
    pub default_base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            default_base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Runs catalog operations against the notification service.
///
/// Immutable after construction and cheap to clone; safe to share across tasks.
#[derive(Debug, Clone)]
pub struct NotifyClient {
    inner: Arc<NotifyClientInner>,
}

#[derive(Debug)]
struct NotifyClientInner {
    config: ClientConfig,
    executor: RequestExecutor,
}

struct PreparedRequest {
    path: String,
    api_key: Option<String>,
    body: Option<Value>,
    base_url: String,
}

impl NotifyClient {
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self::with_executor(config, RequestExecutor::new()?))
    }

    #[must_use]
    pub fn with_executor(config: ClientConfig, executor: RequestExecutor) -> Self {
        Self {
            inner: Arc::new(NotifyClientInner { config, executor }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Execute `operation` with tool-style arguments and return the envelope.
    ///
    /// `args` is the JSON object of tool arguments: body fields, path parameters, `api_key` and
    /// the optional `base_url` override. Argument problems are reported as
    /// [`Envelope::TransportError`] without touching the network.
    pub async fn call(&self, operation: Operation, args: &Value) -> Envelope {
        let prepared = match self.prepare(operation, args) {
            Ok(prepared) => prepared,
            Err(err) => return Envelope::from(err),
        };

        self.inner
            .executor
            .execute(
                &operation.method(),
                &prepared.path,
                prepared.api_key.as_deref(),
                prepared.body.as_ref(),
                &prepared.base_url,
            )
            .await
    }

    /// Execute `operation` and render the result as indented JSON text.
    pub async fn invoke(&self, operation: Operation, args: &Value) -> String {
        let envelope = self.call(operation, args).await;
        info!(
            tool = %operation,
            success = envelope.is_success(),
            status_code = ?envelope.status_code(),
            "tool call finished"
        );
        envelope.render(operation.error_fallback())
    }

    fn prepare(&self, operation: Operation, args: &Value) -> Result<PreparedRequest> {
        let empty = Map::new();
        let args = match args {
            Value::Object(map) => map,
            Value::Null => &empty,
            _ => {
                return Err(NotifyError::InvalidArguments(format!(
                    "{operation}: arguments must be a JSON object"
                )));
            }
        };

        let api_key = if operation.requires_api_key() {
            let key = args.get("api_key").and_then(Value::as_str).ok_or_else(|| {
                NotifyError::InvalidArguments(format!(
                    "{operation}: missing required argument 'api_key'"
                ))
            })?;
            Some(key.to_string())
        } else {
            None
        };

        let base_url = match args.get("base_url") {
            None | Some(Value::Null) => self.inner.config.default_base_url.clone(),
            Some(Value::String(url)) => url.clone(),
            Some(_) => {
                return Err(NotifyError::InvalidArguments(format!(
                    "{operation}: 'base_url' must be a string"
                )));
            }
        };

        Ok(PreparedRequest {
            path: operation.resolve_path(args)?,
            api_key,
            body: operation.build_body(args),
            base_url,
        })
    }
}
