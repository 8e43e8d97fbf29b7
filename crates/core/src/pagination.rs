//! Wire types for the records service's paginated image listing.
//!
//! `GET /api/images?page=&per_page=` returns `{ "data": [...], "meta": {...} }`.
//! The metadata drives the page-selector UI and the post-submit refetch; it
//! is not authoritative state -- the slot store is always replaced wholesale
//! by the latest successful fetch.

use serde::{Deserialize, Serialize};

use crate::slot::ImageSlot;
use crate::types::SlotId;

/// Pagination metadata from the listing response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub current_page: u32,
    pub last_page: u32,
    pub per_page: u32,
    pub total: u64,
}

/// One stored image record as returned by the records service.
///
/// `path` and `label` are optional on the wire; mapping into a slot applies
/// the defaults (`None` path, empty label).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub id: SlotId,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(rename = "imageUrl", default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
}

impl ImageRecord {
    /// Map a server record into an [`ImageSlot`].
    pub fn into_slot(self) -> ImageSlot {
        ImageSlot {
            id: self.id,
            image_url: self.image_url,
            label: self.label.unwrap_or_default(),
            path: self.path,
        }
    }
}

/// One page of the listing response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePage {
    pub data: Vec<ImageRecord>,
    pub meta: PageMeta,
}
