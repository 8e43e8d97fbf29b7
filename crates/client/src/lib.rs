//! reqwest clients for the two remote services behind the inspection form.
//!
//! [`upload::UploadApi`] stores and deletes raw image binaries on the upload
//! service; [`records::RecordsApi`] lists, creates, and deletes structured
//! image records on the records service. Base addresses come from
//! [`config::ApiConfig`], loaded from the environment.

pub mod config;
pub mod error;
mod http;
pub mod records;
pub mod upload;
