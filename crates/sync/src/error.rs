use vistoria_client::error::ApiError;
use vistoria_core::error::CoreError;

/// Errors surfaced by the sync workflows.
///
/// Cleanup deletions never get a variant here: they are advisory, logged at
/// `warn` and swallowed, and must not fail the workflow that triggered them.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// The file failed local validation; no network call was made.
    #[error(transparent)]
    Validation(#[from] CoreError),

    /// The upload call failed or returned no usable reference. The slot was
    /// left unmodified.
    #[error("Upload failed: {0}")]
    Upload(ApiError),

    /// The paginated listing fetch failed. The store kept its prior state.
    #[error("Listing fetch failed: {0}")]
    Fetch(ApiError),

    /// Form submission failed. The slot collection was left untouched, so
    /// the caller may retry with the same data.
    #[error("Submit failed: {0}")]
    Submit(ApiError),
}
