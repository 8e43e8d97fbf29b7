/// Base addresses for the two remote services, loaded from the environment.
///
/// The upload service stores raw image binaries and also serves them
/// publicly; the records service holds the structured inspection records.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Upload-service base address.
    pub upload_base_url: String,
    /// Records-service base address.
    pub records_base_url: String,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var           | Required | Meaning                        |
    /// |-------------------|----------|--------------------------------|
    /// | `UPLOAD_API_URL`  | **yes**  | Upload-service base address    |
    /// | `RECORDS_API_URL` | **yes**  | Records-service base address   |
    ///
    /// # Panics
    ///
    /// Panics if either variable is not set.
    pub fn from_env() -> Self {
        let upload_base_url =
            std::env::var("UPLOAD_API_URL").expect("UPLOAD_API_URL must be set in the environment");
        let records_base_url = std::env::var("RECORDS_API_URL")
            .expect("RECORDS_API_URL must be set in the environment");

        Self {
            upload_base_url,
            records_base_url,
        }
    }
}
