//! Core HTTP client for the marketplace API

use crate::error::{Error, Result};
use crate::models::ErrorEnvelope;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

/// Client for the marketplace REST API.
///
/// Holds the API base URL and a cookie store so the session cookie set by
/// `sign_in` is carried on subsequent requests. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ApiClient {
    pub(crate) client: Client,
    pub(crate) base_url: String,
}

impl ApiClient {
    /// Create a client against the default local API.
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL.to_string())
    }

    /// Create a client with a custom base URL (no trailing slash).
    pub fn with_base_url(base_url: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .cookie_store(true)
            .build()?;
        let base_url = base_url.trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Decode a response body, surfacing the server's error envelope.
    ///
    /// Endpoints answer with either the expected JSON value or the
    /// `{success: false, message}` envelope; the envelope takes precedence
    /// over the HTTP status so the server's message is what reaches the user.
    pub(crate) async fn decode_body<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;

        if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(&body) {
            if !envelope.success {
                let message = envelope
                    .message
                    .unwrap_or_else(|| format!("request failed with status {}", status));
                debug!(%status, "server reported failure");
                return Err(Error::Server(message));
            }
        }

        if !status.is_success() {
            return Err(Error::Server(format!(
                "request failed with status {}",
                status
            )));
        }

        Ok(serde_json::from_str(&body)?)
    }
}
