//! Shared single-shot HTTP client for the proxy endpoints.

use std::time::Duration;

use reqwest::{RequestBuilder, StatusCode, header::HeaderMap};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use super::error::LlmError;

/// Configuration for the underlying HTTP transport
#[derive(Debug, Clone, Default)]
pub struct HttpClientConfig {
    /// Total request timeout. `None` leaves the call unbounded.
    pub timeout: Option<Duration>,
    /// Overrides the default `litellm-adapter/{version}` user agent
    pub user_agent: Option<String>,
}

impl HttpClientConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

/// Thin wrapper over `reqwest::Client` that sends exactly one request per call.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    /// Create a new HTTP client with the given configuration.
    pub fn new(config: &HttpClientConfig) -> Result<Self, LlmError> {
        let default_ua = format!("litellm-adapter/{}", env!("CARGO_PKG_VERSION"));
        let ua = config.user_agent.as_deref().unwrap_or(&default_ua);

        let mut builder = reqwest::Client::builder()
            .user_agent(ua)
            .pool_max_idle_per_host(0);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| {
            LlmError::ProviderConfiguration(format!("Failed to build reqwest client: {e}"))
        })?;

        Ok(Self { client })
    }

    /// POST a JSON body and decode the JSON response.
    #[tracing::instrument(
        name = "http_post_json",
        skip(self, headers, body),
        fields(url = %url),
        err
    )]
    pub async fn post_json<Req, Res>(
        &self,
        url: &str,
        headers: HeaderMap,
        body: &Req,
    ) -> Result<Res, LlmError>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        let request = self.client.post(url).headers(headers).json(body);
        send_json(request).await
    }

    /// GET a URL and decode the JSON response.
    #[tracing::instrument(name = "http_get_json", skip(self, headers), fields(url = %url), err)]
    pub async fn get_json<Res>(&self, url: &str, headers: HeaderMap) -> Result<Res, LlmError>
    where
        Res: DeserializeOwned,
    {
        let request = self.client.get(url).headers(headers);
        send_json(request).await
    }
}

async fn send_json<Res>(request: RequestBuilder) -> Result<Res, LlmError>
where
    Res: DeserializeOwned,
{
    let res = request.send().await.map_err(|e| LlmError::Network {
        message: e.to_string(),
        source: Box::new(e),
    })?;

    let status = res.status();
    let body = res.text().await.map_err(|e| LlmError::Network {
        message: format!("Failed to read response body: {e}"),
        source: Box::new(e),
    })?;

    if !status.is_success() {
        warn!(status = %status, "API returned error status");
        return Err(LlmError::Api {
            message: api_error_message(status, &body),
            status_code: Some(status.as_u16()),
        });
    }

    debug!(status = %status, "HTTP request successful");

    serde_json::from_str(&body).map_err(|e| LlmError::Parse {
        message: format!("Failed to parse response as JSON: {e}"),
        source: Box::new(e),
    })
}

/// Pull the server-provided message out of an error body.
///
/// Understands `{"error": {"message": ..}}`, `{"error": ".."}` and
/// `{"message": ..}`; falls back to the raw body, then the status line.
pub(crate) fn api_error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        let message = value
            .pointer("/error/message")
            .and_then(serde_json::Value::as_str)
            .or_else(|| value.get("error").and_then(serde_json::Value::as_str))
            .or_else(|| value.get("message").and_then(serde_json::Value::as_str));
        if let Some(message) = message {
            return message.to_string();
        }
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }

    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}
