//! HTTP adapters for the summarizer backend.
//!
//! Both clients share one [`ApiClient`]: a reqwest client, the API base URL
//! and the error mapping from HTTP responses to `GostaError`.

mod history_client;
mod summarizer_client;

pub use history_client::{DEVICE_ID_HEADER, HttpHistoryRepository};
pub use summarizer_client::HttpSummarizerClient;

use std::time::Duration;

use gosta_core::config::ClientConfig;
use gosta_core::error::{GostaError, Result};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Shared transport for all backend endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client for `base_url` with the given request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GostaError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::new(
            config.base_url(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn http(&self) -> &Client {
        &self.client
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Calls `GET /health` and returns the reported status string.
    pub async fn health(&self) -> Result<String> {
        #[derive(Deserialize)]
        struct HealthResponse {
            status: String,
        }

        let response = self
            .client
            .get(self.url("health"))
            .send()
            .await
            .map_err(|e| transport_error("health", e))?;
        let body: HealthResponse = read_json("health", response).await?;
        Ok(body.status)
    }
}

/// FastAPI error body: `{"detail": "..."}`.
#[derive(Deserialize)]
struct ErrorResponse {
    detail: serde_json::Value,
}

/// Maps a transport-level reqwest failure.
pub(crate) fn transport_error(operation: &str, err: reqwest::Error) -> GostaError {
    let kind = if err.is_timeout() {
        "timed out"
    } else if err.is_connect() {
        "could not connect"
    } else {
        "failed"
    };
    GostaError::request(
        err.status().map(|s| s.as_u16()),
        format!("{operation} request {kind}: {err}"),
    )
}

/// Maps a non-success status and its body.
pub(crate) fn status_error(operation: &str, status: StatusCode, body: &str) -> GostaError {
    let detail = serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .map(|wrapper| match wrapper.detail {
            serde_json::Value::String(text) => text,
            other => other.to_string(),
        })
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string()
            } else {
                body.trim().to_string()
            }
        });

    GostaError::request(Some(status.as_u16()), format!("{operation} failed: {detail}"))
}

/// Fails with [`status_error`] unless the response is 2xx.
pub(crate) async fn ensure_success(operation: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(status_error(operation, status, &body))
}

/// Checks the status and decodes a JSON body.
pub(crate) async fn read_json<T: DeserializeOwned>(operation: &str, response: Response) -> Result<T> {
    let response = ensure_success(operation, response).await?;
    response.json::<T>().await.map_err(|e| {
        GostaError::request(None, format!("{operation} returned an unreadable response: {e}"))
    })
}
