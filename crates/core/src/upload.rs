//! Uploaded-file representation and local validation.
//!
//! Validation runs before any network traffic: a rejected file never
//! reaches the upload service.

use crate::error::CoreError;

/// Maximum accepted image size in bytes (5 MiB).
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// An in-memory file selected for upload.
#[derive(Debug, Clone)]
pub struct FileUpload {
    /// Original file name, forwarded in the multipart request.
    pub file_name: String,
    /// MIME type as reported by the picker (e.g. `image/jpeg`).
    pub content_type: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

/// Validate that a file is an image within the size ceiling.
pub fn validate_image_file(file: &FileUpload) -> Result<(), CoreError> {
    if !file.content_type.starts_with("image/") {
        return Err(CoreError::Validation(format!(
            "unsupported file type '{}', only images can be uploaded",
            file.content_type
        )));
    }
    if file.bytes.len() > MAX_IMAGE_BYTES {
        return Err(CoreError::Validation(format!(
            "file exceeds the {} MiB size limit",
            MAX_IMAGE_BYTES / (1024 * 1024)
        )));
    }
    Ok(())
}
