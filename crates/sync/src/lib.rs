//! Sync workflows for the vehicle-inspection photo form.
//!
//! Bridges the in-memory slot store ([`vistoria_core::store::SlotStore`])
//! to the two remote services: image upload with superseded-image cleanup,
//! optimistic slot removal with fire-and-forget remote deletion, paginated
//! listing with wholesale replace, and whole-form submission with a
//! post-submit refetch.

pub mod coordinator;
pub mod error;
pub mod service;
