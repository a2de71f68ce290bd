//! Error types for the marketplace API client.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Marketplace API client errors
#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level failure: the request never produced a parseable
    /// response (connection refused, timeout, TLS failure).
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The server answered with its `{success: false, message}` envelope.
    #[error("Server error: {0}")]
    Server(String),

    /// A draft failed client-side checks before any request was issued.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Image upload failed: {0}")]
    Upload(String),
}

impl Error {
    /// True for transport failures, false for errors the server reported.
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Http(_))
    }
}
