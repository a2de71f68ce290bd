//! Image upload
//!
//! Listing images go to a separate upload service (Cloudinary-shaped
//! unsigned upload: multipart form with a preset name); only the returned
//! `secure_url` is stored on the listing itself.

use crate::client::ApiClient;
use crate::error::{Error, Result};
use reqwest::multipart::{Form, Part};
use tracing::debug;

/// Where listing images are uploaded.
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Full upload endpoint URL.
    pub endpoint: String,
    /// Unsigned upload preset name.
    pub preset: String,
}

impl ApiClient {
    /// Upload one image, returning its public URL.
    pub async fn upload_image(
        &self,
        config: &UploadConfig,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<String> {
        let form = Form::new()
            .part("file", Part::bytes(bytes).file_name(filename.to_string()))
            .text("upload_preset", config.preset.clone());

        let response = self
            .client
            .post(&config.endpoint)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body: serde_json::Value = response.json().await?;

        match body.get("secure_url").and_then(|v| v.as_str()) {
            Some(url) => {
                debug!(%url, "image uploaded");
                Ok(url.to_string())
            }
            None => {
                let message = body
                    .pointer("/error/message")
                    .and_then(|v| v.as_str())
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| format!("upload failed with status {}", status));
                Err(Error::Upload(message))
            }
        }
    }
}
