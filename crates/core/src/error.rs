/// Errors produced by pure domain logic.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Input failed a local check; nothing was sent over the network.
    #[error("Validation failed: {0}")]
    Validation(String),
}
