//! Workflows bridging the slot store to the remote services.
//!
//! [`SyncCoordinator`] owns the asynchronous parts of the form: per-slot
//! image upload, optimistic removal with fire-and-forget remote cleanup,
//! paginated listing, and whole-form submission. It is created once and
//! shared as an `Arc`; all mutation of the slot store goes through its
//! operations, serialized by the store's lock.
//!
//! Ordering policy for racing uploads on one slot: the most recently
//! *started* upload wins. Each slot carries a sequence number bumped when
//! an upload begins; a resolving upload applies its result only if no newer
//! upload for that slot has started since. Removed or replaced slots cancel
//! their token, so stale results are dropped instead of resurrecting state.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tokio_util::sync::CancellationToken;

use vistoria_core::pagination::PageMeta;
use vistoria_core::slot::{ImageSlot, InspectionForm, SlotPatch};
use vistoria_core::store::SlotStore;
use vistoria_core::types::SlotId;
use vistoria_core::upload::{validate_image_file, FileUpload};

use crate::error::SyncError;
use crate::service::{RecordsService, UploadService};

/// State of the submit workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Submitting,
}

/// Per-slot bookkeeping for in-flight uploads.
struct SlotTracking {
    /// Sequence number of the most recently started upload for this slot.
    upload_seq: u64,
    /// Cancelled when the slot is removed or the collection is replaced.
    cancel: CancellationToken,
}

/// The listing query behind the store's current collection.
#[derive(Debug, Clone)]
struct Listing {
    page: u32,
    per_page: u32,
    meta: PageMeta,
}

/// Coordinates the slot store with the upload and records services.
///
/// Created once via [`SyncCoordinator::new`]; the returned `Arc` can be
/// cheaply cloned into UI callbacks.
pub struct SyncCoordinator<U, R> {
    /// The injected single source of truth for the active form.
    store: Arc<RwLock<SlotStore>>,
    upload: Arc<U>,
    records: Arc<R>,
    tracking: Mutex<HashMap<SlotId, SlotTracking>>,
    /// Last successful listing query, reused for the post-submit refetch.
    last_listing: Mutex<Option<Listing>>,
    submit_state: Mutex<SubmitState>,
    /// Master cancellation token -- cancelled on shutdown.
    cancel: CancellationToken,
}

impl<U, R> SyncCoordinator<U, R>
where
    U: UploadService + 'static,
    R: RecordsService + 'static,
{
    /// Create a coordinator around an injected store and service handles.
    pub fn new(store: Arc<RwLock<SlotStore>>, upload: Arc<U>, records: Arc<R>) -> Arc<Self> {
        Arc::new(Self {
            store,
            upload,
            records,
            tracking: Mutex::new(HashMap::new()),
            last_listing: Mutex::new(None),
            submit_state: Mutex::new(SubmitState::Idle),
            cancel: CancellationToken::new(),
        })
    }

    /// Shared handle to the slot store.
    pub fn store(&self) -> Arc<RwLock<SlotStore>> {
        Arc::clone(&self.store)
    }

    /// Add an empty slot at the head of the form. Returns the new id.
    pub async fn add_slot(&self) -> SlotId {
        let id = self.store.write().await.add();
        self.tracking.lock().await.insert(
            id.clone(),
            SlotTracking {
                upload_seq: 0,
                cancel: self.cancel.child_token(),
            },
        );
        id
    }

    /// Update a slot's caption. Unknown ids are a no-op.
    pub async fn set_label(&self, id: &str, label: impl Into<String>) {
        self.store.write().await.update(id, SlotPatch::label(label));
    }

    /// Remove a slot, optimistically.
    ///
    /// Local removal is synchronous and unconditional. Remote cleanup --
    /// the stored binary (when the slot held one) and the image record --
    /// runs as a detached task; failures are logged at `warn`, never
    /// surfaced, and never roll back the local removal.
    pub async fn remove_slot(&self, id: &str) {
        let removed = self.store.write().await.remove(id);
        if let Some(tracking) = self.tracking.lock().await.remove(id) {
            tracking.cancel.cancel();
        }
        let Some(slot) = removed else { return };

        let upload = Arc::clone(&self.upload);
        let records = Arc::clone(&self.records);
        tokio::spawn(async move {
            if let Some(path) = &slot.path {
                if let Err(e) = upload.delete_file(path).await {
                    tracing::warn!(
                        slot_id = %slot.id,
                        path = %path,
                        error = %e,
                        "Stored image cleanup failed"
                    );
                }
            }
            if let Err(e) = records.delete_image(&slot.id).await {
                tracing::warn!(slot_id = %slot.id, error = %e, "Image record cleanup failed");
            }
        });
    }

    /// Upload an image into a slot.
    ///
    /// The file is validated locally first (image MIME type, 5 MiB
    /// ceiling); a rejected file never reaches the network, and neither
    /// does an upload aimed at an id with no slot. On success the slot's
    /// display URL and storage path are set in one store update and any
    /// previously stored image is deleted best-effort. A result that
    /// resolves after its slot was removed, or after a newer upload for the
    /// same slot started, is dropped.
    pub async fn upload_image(&self, id: &str, file: FileUpload) -> Result<(), SyncError> {
        validate_image_file(&file)?;

        // An unknown id has no slot to update; skip the upload entirely so
        // the stored binary cannot become an unreferenced orphan.
        let old_path = {
            let store = self.store.read().await;
            let Some(slot) = store.get(id) else {
                tracing::debug!(slot_id = id, "Upload requested for an unknown slot; ignored");
                return Ok(());
            };
            slot.path.clone()
        };

        // Capture the slot's upload sequence and token before suspending.
        let (seq, token) = {
            let mut tracking = self.tracking.lock().await;
            let entry = tracking
                .entry(id.to_string())
                .or_insert_with(|| SlotTracking {
                    upload_seq: 0,
                    cancel: self.cancel.child_token(),
                });
            entry.upload_seq += 1;
            (entry.upload_seq, entry.cancel.clone())
        };

        let reference = self
            .upload
            .upload_image(file)
            .await
            .map_err(SyncError::Upload)?;

        // Staleness checks and the store update happen under the tracking
        // lock so a newer upload cannot bump, complete, and apply in
        // between (same tracking -> store lock order as `install_slots`).
        let tracking = self.tracking.lock().await;
        if token.is_cancelled() {
            tracing::debug!(
                slot_id = id,
                reference = %reference,
                "Slot gone before upload resolved; result dropped"
            );
            return Ok(());
        }
        if tracking.get(id).map(|t| t.upload_seq) != Some(seq) {
            tracing::debug!(
                slot_id = id,
                reference = %reference,
                "Superseded by a newer upload; result dropped"
            );
            return Ok(());
        }

        // The superseded binary is advisory cleanup: a failed delete must
        // not block the new image.
        if let Some(path) = old_path {
            let upload = Arc::clone(&self.upload);
            let slot_id = id.to_string();
            tokio::spawn(async move {
                if let Err(e) = upload.delete_file(&path).await {
                    tracing::warn!(
                        slot_id = %slot_id,
                        path = %path,
                        error = %e,
                        "Superseded image cleanup failed"
                    );
                }
            });
        }

        let image_url = self.upload.public_url(&reference);
        let applied = self
            .store
            .write()
            .await
            .update(id, SlotPatch::uploaded_image(image_url, reference.clone()));
        drop(tracking);
        if applied {
            tracing::info!(slot_id = id, reference = %reference, "Image uploaded");
        } else {
            tracing::debug!(slot_id = id, reference = %reference, "Upload resolved for a removed slot");
        }
        Ok(())
    }

    /// Load one page of stored images into the form.
    ///
    /// On success the store's collection is replaced wholesale by the
    /// returned page (records mapped into slots with defaulted label and
    /// path) and the pagination metadata is recorded. On failure the store
    /// keeps its prior state.
    pub async fn list_images(&self, page: u32, per_page: u32) -> Result<PageMeta, SyncError> {
        let fetched = self
            .records
            .list_images(page, per_page)
            .await
            .map_err(SyncError::Fetch)?;

        let slots: Vec<ImageSlot> = fetched
            .data
            .into_iter()
            .map(|record| record.into_slot())
            .collect();
        self.install_slots(slots).await;

        let meta = fetched.meta;
        *self.last_listing.lock().await = Some(Listing {
            page,
            per_page,
            meta: meta.clone(),
        });
        tracing::info!(page, per_page, total = meta.total, "Image listing loaded");
        Ok(meta)
    }

    /// Submit the current form.
    ///
    /// On success the store is reset and, when a listing query has been
    /// made before, that page is refetched best-effort so the UI shows
    /// server-confirmed state. On failure the store is left untouched and
    /// the caller may retry with the same collection. No automatic retry.
    pub async fn submit_form(&self) -> Result<(), SyncError> {
        let form = InspectionForm {
            images: self.store.read().await.slots().to_vec(),
        };

        *self.submit_state.lock().await = SubmitState::Submitting;
        let result = self.records.submit_form(&form).await;
        *self.submit_state.lock().await = SubmitState::Idle;

        if let Err(e) = result {
            return Err(SyncError::Submit(e));
        }

        {
            let mut tracking = self.tracking.lock().await;
            for (_, slot_tracking) in tracking.drain() {
                slot_tracking.cancel.cancel();
            }
            self.store.write().await.reset();
        }
        tracing::info!(images = form.images.len(), "Inspection form submitted");

        // Invalidate the listing: the server-confirmed page supersedes the
        // optimistic local state the form was built from.
        let listing = self.last_listing.lock().await.clone();
        if let Some(listing) = listing {
            if let Err(e) = self.list_images(listing.page, listing.per_page).await {
                tracing::warn!(error = %e, "Post-submit refetch failed");
            }
        }
        Ok(())
    }

    /// Current slot collection (cloned snapshot).
    pub async fn slots(&self) -> Vec<ImageSlot> {
        self.store.read().await.slots().to_vec()
    }

    /// Pagination metadata from the most recent successful listing.
    pub async fn page_meta(&self) -> Option<PageMeta> {
        self.last_listing
            .lock()
            .await
            .as_ref()
            .map(|listing| listing.meta.clone())
    }

    /// Whether a submit is currently in flight.
    pub async fn submit_state(&self) -> SubmitState {
        *self.submit_state.lock().await
    }

    /// Cancel all in-flight work. Pending upload results will no longer be
    /// applied to the store.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// Replace the store's collection and re-provision per-slot tokens.
    ///
    /// Pending uploads for discarded slots are cancelled so their results
    /// cannot land in the fresh collection.
    async fn install_slots(&self, slots: Vec<ImageSlot>) {
        let mut tracking = self.tracking.lock().await;
        for (_, slot_tracking) in tracking.drain() {
            slot_tracking.cancel.cancel();
        }
        for slot in &slots {
            tracking.insert(
                slot.id.clone(),
                SlotTracking {
                    upload_seq: 0,
                    cancel: self.cancel.child_token(),
                },
            );
        }
        self.store.write().await.replace_all(slots);
    }
}
