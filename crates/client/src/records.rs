//! HTTP client for the records service.
//!
//! Wraps the records service's endpoints (paginated image listing, form
//! submission, record deletion) using [`reqwest`].

use vistoria_core::pagination::ImagePage;
use vistoria_core::slot::InspectionForm;

use crate::error::ApiError;
use crate::http;

/// HTTP client for the records service.
pub struct RecordsApi {
    client: reqwest::Client,
    base_url: String,
}

impl RecordsApi {
    /// Create a new client for the given base address.
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    /// Records-service base address.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch one page of stored image records.
    ///
    /// Sends `GET /api/images?page=<n>&per_page=<n>` and decodes the
    /// `{ data, meta }` envelope.
    pub async fn list_images(&self, page: u32, per_page: u32) -> Result<ImagePage, ApiError> {
        let response = self
            .client
            .get(http::endpoint(&self.base_url, "api/images"))
            .query(&[("page", page), ("per_page", per_page)])
            .send()
            .await?;

        http::parse_json(response).await
    }

    /// Submit the full slot collection as one JSON payload.
    ///
    /// Sends `POST /api/images` with body `{"images": [...]}`.
    pub async fn submit_form(&self, form: &InspectionForm) -> Result<(), ApiError> {
        let response = self
            .client
            .post(http::endpoint(&self.base_url, "api/images"))
            .json(form)
            .send()
            .await?;

        http::check_status(response).await
    }

    /// Delete a stored image record by id.
    ///
    /// Sends `DELETE /api/images/{id}`.
    pub async fn delete_image(&self, id: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(http::endpoint(&self.base_url, &format!("api/images/{id}")))
            .send()
            .await?;

        http::check_status(response).await
    }
}
