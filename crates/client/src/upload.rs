//! HTTP client for the upload service.
//!
//! Wraps the upload service's two endpoints (multipart image upload,
//! advisory file deletion) using [`reqwest`], and derives the public
//! display URL for a stored reference.

use reqwest::multipart;
use serde::Deserialize;

use vistoria_core::upload::FileUpload;

use crate::error::ApiError;
use crate::http;

/// HTTP client for the upload service.
pub struct UploadApi {
    client: reqwest::Client,
    base_url: String,
}

/// Envelope returned by `POST /api/uploads`.
#[derive(Debug, Deserialize)]
struct UploadEnvelope {
    data: UploadData,
}

#[derive(Debug, Deserialize)]
struct UploadData {
    url: Option<String>,
}

impl UploadApi {
    /// Create a new client for the given base address.
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`]
    /// (connection pooling across both services).
    pub fn with_client(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    /// Upload-service base address.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Store an image binary.
    ///
    /// Sends `POST /api/uploads` as a multipart form: binary field `file`
    /// (original file name and MIME type preserved), text field
    /// `type=image`, and an `X-File-Type: image` header. Returns the
    /// server-assigned storage reference from `data.url`; a response
    /// without one is [`ApiError::MissingReference`].
    pub async fn upload_image(&self, file: FileUpload) -> Result<String, ApiError> {
        let part = multipart::Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.content_type)?;
        let form = multipart::Form::new()
            .part("file", part)
            .text("type", "image");

        let response = self
            .client
            .post(http::endpoint(&self.base_url, "api/uploads"))
            .header("X-File-Type", "image")
            .multipart(form)
            .send()
            .await?;

        let envelope: UploadEnvelope = http::parse_json(response).await?;
        match envelope.data.url {
            Some(url) if !url.is_empty() => Ok(url),
            _ => Err(ApiError::MissingReference),
        }
    }

    /// Delete a previously stored object.
    ///
    /// Sends `POST /api/delete-file?url=<reference>`. Deletion is advisory
    /// cleanup; callers log failures instead of propagating them.
    pub async fn delete_file(&self, reference: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .post(http::endpoint(&self.base_url, "api/delete-file"))
            .query(&[("url", reference)])
            .send()
            .await?;

        http::check_status(response).await
    }

    /// Public display URL for a stored reference: the base address with
    /// the reference appended verbatim.
    pub fn public_url(&self, reference: &str) -> String {
        format!("{}{}", self.base_url, reference)
    }
}
