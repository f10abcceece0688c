use thiserror::Error;

/// Errors that can escape a link preview operation.
///
/// Unreachable hosts, timeouts, non-success statuses and non-HTML payloads are
/// not errors: they degrade to a domain-only [`crate::PreviewResult`].
#[derive(Error, Debug)]
pub enum PreviewError {
    /// The request carried no usable URL
    #[error("URL is required")]
    MissingUrl,

    /// The request body could not be understood
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    ClientError(#[source] reqwest::Error),

    /// The response stream broke while reading the body
    #[error("Failed to read response body: {0}")]
    BodyError(#[source] reqwest::Error),

    /// Error parsing HTTP headers
    #[error("Header parse error: {0}")]
    HeaderError(#[from] reqwest::header::InvalidHeaderValue),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    /// Socket or listener failure in the HTTP server
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Errors returned by the records store and the data hooks built on it
#[derive(Error, Debug)]
pub enum StoreError {
    /// No record with this id is visible to the requesting owner
    #[error("{table} record {id} not found")]
    NotFound { table: &'static str, id: uuid::Uuid },

    /// The operation needs a signed-in user
    #[error("No active session")]
    Unauthenticated,

    /// The record cannot be used for the requested operation
    #[error("Invalid item: {0}")]
    InvalidItem(String),

    /// The preview step failed with an internal fault
    #[error("Preview failed: {0}")]
    PreviewError(#[from] PreviewError),
}
