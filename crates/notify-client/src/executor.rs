//! Request executor: one HTTP call in, one [`Envelope`] out.
//!
//! Nothing escapes [`RequestExecutor::execute`] as an error. URL, transport and decode failures
//! are folded into [`Envelope::TransportError`]; HTTP error statuses become
//! [`Envelope::HttpError`].

use crate::envelope::Envelope;
use crate::error::{NotifyError, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, RequestBuilder};
use serde_json::{Value, json};
use tracing::{debug, warn};
use url::Url;

/// Header carrying the caller's API key.
pub const API_KEY_HEADER: &str = "X-API-Key";

const JSON_CONTENT_TYPE: &str = "application/json";

/// Shared request executor.
///
/// Wraps a pooled `reqwest::Client`; cloning is cheap and clones share connections. Calls are
/// independent of each other.
#[derive(Debug, Clone)]
pub struct RequestExecutor {
    client: Client,
}

impl RequestExecutor {
    /// Build an executor whose client reports 3xx responses as-is instead of following them.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized (TLS backend).
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self::with_client(client))
    }

    /// Use a preconfigured client (proxies, custom TLS roots, ...).
    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Execute a single request against `base_url` + `path`.
    ///
    /// Only GET and POST are supported, matched case-insensitively. `body` is sent as JSON on POST and ignored on GET. An
    /// empty `api_key` is treated as absent.
    pub async fn execute(
        &self,
        method: &Method,
        path: &str,
        api_key: Option<&str>,
        body: Option<&Value>,
        base_url: &str,
    ) -> Envelope {
        match self.try_execute(method, path, api_key, body, base_url).await {
            Ok(envelope) => envelope,
            Err(err) => {
                warn!(method = %method, path = %path, error = %err, "notify request failed");
                Envelope::from(err)
            }
        }
    }

    async fn try_execute(
        &self,
        method: &Method,
        path: &str,
        api_key: Option<&str>,
        body: Option<&Value>,
        base_url: &str,
    ) -> Result<Envelope> {
        let method = supported_method(method)?;
        let url = build_url(base_url, path)?;
        let api_key = api_key.filter(|k| !k.is_empty());
        debug!(
            method = %method,
            url = %url,
            has_api_key = api_key.is_some(),
            "sending notify request"
        );

        let mut request = self.client.request(method.clone(), url);
        request = apply_headers(request, api_key);
        request = apply_body(request, &method, body);

        let response = request.send().await?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let text = response.text().await?;

        let data = decode_body(content_type.as_deref(), &text)?;
        debug!(status, "notify response received");
        Ok(Envelope::from_status(status, data))
    }
}

fn supported_method(method: &Method) -> Result<Method> {
    match method.as_str().to_ascii_uppercase().as_str() {
        "GET" => Ok(Method::GET),
        "POST" => Ok(Method::POST),
        _ => Err(NotifyError::UnsupportedMethod(method.to_string())),
    }
}

fn build_url(base_url: &str, path: &str) -> Result<Url> {
    let url = format!("{}{}", base_url.trim_end_matches('/'), path);
    Url::parse(&url).map_err(|source| NotifyError::InvalidUrl { url, source })
}

fn apply_headers(mut request: RequestBuilder, api_key: Option<&str>) -> RequestBuilder {
    request = request.header(CONTENT_TYPE, JSON_CONTENT_TYPE);
    if let Some(key) = api_key {
        request = request.header(API_KEY_HEADER, key);
    }
    request
}

fn apply_body(mut request: RequestBuilder, method: &Method, body: Option<&Value>) -> RequestBuilder {
    if *method == Method::POST
        && let Some(payload) = body
    {
        request = request.json(payload);
    }
    request
}

/// JSON when the server says so, otherwise the raw text wrapped as `{"raw": ...}`.
fn decode_body(content_type: Option<&str>, text: &str) -> Result<Value> {
    if content_type.is_some_and(|ct| ct.starts_with(JSON_CONTENT_TYPE)) {
        Ok(serde_json::from_str(text)?)
    } else {
        Ok(json!({ "raw": text }))
    }
}
