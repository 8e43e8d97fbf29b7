//! Service traits at the remote-API seam.
//!
//! The coordinator is generic over these traits so its workflows can be
//! driven by in-memory fakes in tests (including asserting that a rejected
//! file never produces a network call). The production implementations
//! delegate to the reqwest clients in `vistoria-client`.

use async_trait::async_trait;

use vistoria_client::error::ApiError;
use vistoria_client::records::RecordsApi;
use vistoria_client::upload::UploadApi;
use vistoria_core::pagination::ImagePage;
use vistoria_core::slot::InspectionForm;
use vistoria_core::upload::FileUpload;

/// Remote storage for raw image binaries.
#[async_trait]
pub trait UploadService: Send + Sync {
    /// Store an image, returning the server-assigned storage reference.
    async fn upload_image(&self, file: FileUpload) -> Result<String, ApiError>;

    /// Best-effort deletion of a stored object.
    async fn delete_file(&self, reference: &str) -> Result<(), ApiError>;

    /// Public display URL for a stored reference.
    fn public_url(&self, reference: &str) -> String;
}

/// Remote store for structured inspection image records.
#[async_trait]
pub trait RecordsService: Send + Sync {
    /// Fetch one page of stored image records.
    async fn list_images(&self, page: u32, per_page: u32) -> Result<ImagePage, ApiError>;

    /// Submit the full slot collection as one payload.
    async fn submit_form(&self, form: &InspectionForm) -> Result<(), ApiError>;

    /// Delete a stored image record by id.
    async fn delete_image(&self, id: &str) -> Result<(), ApiError>;
}

#[async_trait]
impl UploadService for UploadApi {
    async fn upload_image(&self, file: FileUpload) -> Result<String, ApiError> {
        UploadApi::upload_image(self, file).await
    }

    async fn delete_file(&self, reference: &str) -> Result<(), ApiError> {
        UploadApi::delete_file(self, reference).await
    }

    fn public_url(&self, reference: &str) -> String {
        UploadApi::public_url(self, reference)
    }
}

#[async_trait]
impl RecordsService for RecordsApi {
    async fn list_images(&self, page: u32, per_page: u32) -> Result<ImagePage, ApiError> {
        RecordsApi::list_images(self, page, per_page).await
    }

    async fn submit_form(&self, form: &InspectionForm) -> Result<(), ApiError> {
        RecordsApi::submit_form(self, form).await
    }

    async fn delete_image(&self, id: &str) -> Result<(), ApiError> {
        RecordsApi::delete_image(self, id).await
    }
}
