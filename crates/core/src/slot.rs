//! Image slot types: the slot itself, partial updates, and the submit payload.

use serde::{Deserialize, Serialize};

use crate::types::SlotId;

/// One image-plus-label entry in the inspection form.
///
/// A slot is either empty (`image_url` and `path` both `None`) or holds an
/// uploaded image; a successful upload sets both fields in a single store
/// update. `path` addresses the stored binary for deletion, `image_url` is
/// the fully-qualified display reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSlot {
    pub id: SlotId,
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
    pub label: String,
    pub path: Option<String>,
}

impl ImageSlot {
    /// Create an empty slot with a freshly generated UUID v4 identifier.
    pub fn new() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            image_url: None,
            label: String::new(),
            path: None,
        }
    }
}

impl Default for ImageSlot {
    fn default() -> Self {
        Self::new()
    }
}

/// Partial update for a single slot.
///
/// `Some` overwrites the corresponding field, `None` leaves it untouched.
/// An upload sets `image_url` and `path` together so the slot never shows
/// a half-applied image.
#[derive(Debug, Clone, Default)]
pub struct SlotPatch {
    pub image_url: Option<String>,
    pub label: Option<String>,
    pub path: Option<String>,
}

impl SlotPatch {
    /// Patch that changes only the caption.
    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    /// Patch that installs an uploaded image (display URL + storage path).
    pub fn uploaded_image(image_url: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            image_url: Some(image_url.into()),
            path: Some(path.into()),
            ..Self::default()
        }
    }
}

/// Submission payload: a snapshot of the full ordered slot collection.
///
/// Serializes as `{"images": [...]}`, the body of `POST /api/images`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectionForm {
    pub images: Vec<ImageSlot>,
}
