//! In-memory fakes for the remote-service traits.
//!
//! Each fake pops scripted responses in FIFO order and records every call,
//! so tests can assert both the resulting store state and the exact network
//! traffic (including its absence). Upload responses can be gated on a
//! oneshot channel to interleave racing uploads deterministically.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{oneshot, Mutex, RwLock};

use vistoria_client::error::ApiError;
use vistoria_core::pagination::{ImagePage, ImageRecord, PageMeta};
use vistoria_core::slot::InspectionForm;
use vistoria_core::store::SlotStore;
use vistoria_core::upload::{FileUpload, MAX_IMAGE_BYTES};
use vistoria_sync::coordinator::SyncCoordinator;
use vistoria_sync::service::{RecordsService, UploadService};

// ---------------------------------------------------------------------------
// Upload service fake
// ---------------------------------------------------------------------------

/// One scripted response for `upload_image`.
pub struct ScriptedUpload {
    result: Result<String, ApiError>,
    /// Fired when the call begins.
    started_tx: Option<oneshot::Sender<()>>,
    /// The call waits for this before returning.
    release_rx: Option<oneshot::Receiver<()>>,
}

pub struct FakeUploadService {
    base_url: String,
    scripts: Mutex<VecDeque<ScriptedUpload>>,
    pub upload_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
    pub deleted: StdMutex<Vec<String>>,
    pub fail_deletes: AtomicBool,
}

impl FakeUploadService {
    pub fn new(base_url: &str) -> Arc<Self> {
        Arc::new(Self {
            base_url: base_url.to_string(),
            scripts: Mutex::new(VecDeque::new()),
            upload_calls: AtomicUsize::new(0),
            delete_calls: AtomicUsize::new(0),
            deleted: StdMutex::new(Vec::new()),
            fail_deletes: AtomicBool::new(false),
        })
    }

    /// Script a successful upload returning `reference`.
    pub async fn push_reference(&self, reference: &str) {
        self.scripts.lock().await.push_back(ScriptedUpload {
            result: Ok(reference.to_string()),
            started_tx: None,
            release_rx: None,
        });
    }

    /// Script an upload whose response carries no file reference.
    pub async fn push_missing_reference(&self) {
        self.scripts.lock().await.push_back(ScriptedUpload {
            result: Err(ApiError::MissingReference),
            started_tx: None,
            release_rx: None,
        });
    }

    /// Script an upload failing with the given HTTP status.
    pub async fn push_failure(&self, status: u16) {
        self.scripts.lock().await.push_back(ScriptedUpload {
            result: Err(ApiError::Status {
                status,
                body: "scripted failure".to_string(),
            }),
            started_tx: None,
            release_rx: None,
        });
    }

    /// Script a gated successful upload.
    ///
    /// The returned receiver fires once the call has started; the call then
    /// blocks until the returned sender is fired.
    pub async fn push_gated_reference(
        &self,
        reference: &str,
    ) -> (oneshot::Receiver<()>, oneshot::Sender<()>) {
        let (started_tx, started_rx) = oneshot::channel();
        let (release_tx, release_rx) = oneshot::channel();
        self.scripts.lock().await.push_back(ScriptedUpload {
            result: Ok(reference.to_string()),
            started_tx: Some(started_tx),
            release_rx: Some(release_rx),
        });
        (started_rx, release_tx)
    }

    pub fn deleted_references(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl UploadService for FakeUploadService {
    async fn upload_image(&self, _file: FileUpload) -> Result<String, ApiError> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        let script = self
            .scripts
            .lock()
            .await
            .pop_front()
            .expect("no scripted upload response left");
        if let Some(tx) = script.started_tx {
            let _ = tx.send(());
        }
        if let Some(rx) = script.release_rx {
            let _ = rx.await;
        }
        script.result
    }

    async fn delete_file(&self, reference: &str) -> Result<(), ApiError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(ApiError::Status {
                status: 500,
                body: "scripted delete failure".to_string(),
            });
        }
        self.deleted.lock().unwrap().push(reference.to_string());
        Ok(())
    }

    fn public_url(&self, reference: &str) -> String {
        format!("{}{}", self.base_url, reference)
    }
}

// ---------------------------------------------------------------------------
// Records service fake
// ---------------------------------------------------------------------------

pub struct FakeRecordsService {
    pages: Mutex<VecDeque<Result<ImagePage, ApiError>>>,
    submits: Mutex<VecDeque<Result<(), ApiError>>>,
    pub list_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
    pub submitted: StdMutex<Vec<InspectionForm>>,
    pub deleted_ids: StdMutex<Vec<String>>,
    pub fail_deletes: AtomicBool,
}

impl FakeRecordsService {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            pages: Mutex::new(VecDeque::new()),
            submits: Mutex::new(VecDeque::new()),
            list_calls: AtomicUsize::new(0),
            delete_calls: AtomicUsize::new(0),
            submitted: StdMutex::new(Vec::new()),
            deleted_ids: StdMutex::new(Vec::new()),
            fail_deletes: AtomicBool::new(false),
        })
    }

    pub async fn push_page(&self, page: ImagePage) {
        self.pages.lock().await.push_back(Ok(page));
    }

    pub async fn push_page_failure(&self, status: u16) {
        self.pages.lock().await.push_back(Err(ApiError::Status {
            status,
            body: "scripted failure".to_string(),
        }));
    }

    pub async fn push_submit_ok(&self) {
        self.submits.lock().await.push_back(Ok(()));
    }

    pub async fn push_submit_failure(&self, status: u16) {
        self.submits.lock().await.push_back(Err(ApiError::Status {
            status,
            body: "scripted failure".to_string(),
        }));
    }

    pub fn submitted_forms(&self) -> Vec<InspectionForm> {
        self.submitted.lock().unwrap().clone()
    }

    pub fn deleted_record_ids(&self) -> Vec<String> {
        self.deleted_ids.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecordsService for FakeRecordsService {
    async fn list_images(&self, _page: u32, _per_page: u32) -> Result<ImagePage, ApiError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.pages
            .lock()
            .await
            .pop_front()
            .expect("no scripted listing response left")
    }

    async fn submit_form(&self, form: &InspectionForm) -> Result<(), ApiError> {
        self.submitted.lock().unwrap().push(form.clone());
        self.submits.lock().await.pop_front().unwrap_or(Ok(()))
    }

    async fn delete_image(&self, id: &str) -> Result<(), ApiError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(ApiError::Status {
                status: 500,
                body: "scripted delete failure".to_string(),
            });
        }
        self.deleted_ids.lock().unwrap().push(id.to_string());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build a coordinator around a fresh store and the given fakes.
pub fn coordinator(
    upload: Arc<FakeUploadService>,
    records: Arc<FakeRecordsService>,
) -> Arc<SyncCoordinator<FakeUploadService, FakeRecordsService>> {
    SyncCoordinator::new(Arc::new(RwLock::new(SlotStore::new())), upload, records)
}

/// A small valid image file.
pub fn image_file(size: usize) -> FileUpload {
    FileUpload {
        file_name: "photo.jpg".to_string(),
        content_type: "image/jpeg".to_string(),
        bytes: vec![0; size],
    }
}

/// A file rejected by MIME-type validation.
pub fn pdf_file() -> FileUpload {
    FileUpload {
        file_name: "report.pdf".to_string(),
        content_type: "application/pdf".to_string(),
        bytes: vec![0; 1024],
    }
}

/// An image file one byte over the size ceiling.
pub fn oversized_file() -> FileUpload {
    FileUpload {
        file_name: "huge.jpg".to_string(),
        content_type: "image/jpeg".to_string(),
        bytes: vec![0; MAX_IMAGE_BYTES + 1],
    }
}

/// Build a listing record with optional wire fields.
pub fn record(
    id: &str,
    path: Option<&str>,
    image_url: Option<&str>,
    label: Option<&str>,
) -> ImageRecord {
    ImageRecord {
        id: id.to_string(),
        path: path.map(str::to_string),
        image_url: image_url.map(str::to_string),
        label: label.map(str::to_string),
    }
}

/// Build a listing page.
pub fn page(
    data: Vec<ImageRecord>,
    current_page: u32,
    last_page: u32,
    per_page: u32,
    total: u64,
) -> ImagePage {
    ImagePage {
        data,
        meta: PageMeta {
            current_page,
            last_page,
            per_page,
            total,
        },
    }
}

/// Poll `cond` until it holds, panicking after a timeout. Used to observe
/// the coordinator's detached cleanup tasks.
pub async fn wait_until(cond: impl Fn() -> bool) {
    for _ in 0..200 {
        if cond() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("condition not reached within timeout");
}
