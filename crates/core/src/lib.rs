//! Domain types and pure state for the vehicle-inspection photo form.
//!
//! Everything in this crate is network-free: the slot store (the single
//! source of truth for the active form), uploaded-file validation, and the
//! wire types for the records service's paginated listing. Asynchronous
//! workflows live in `vistoria-sync`; HTTP clients in `vistoria-client`.

pub mod error;
pub mod pagination;
pub mod slot;
pub mod store;
pub mod types;
pub mod upload;
