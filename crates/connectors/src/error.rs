use model::error::ModelError;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, TLS, timeout or other failure below HTTP.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The remote answered with a non-success status.
    #[error("Request for search '{search_id}' failed with status {status}: {body}")]
    Status {
        search_id: String,
        status: StatusCode,
        body: String,
    },

    /// The response body could not be decoded.
    #[error("Malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The cancellation token fired before the read completed.
    #[error("Fetch cancelled")]
    Cancelled,

    /// The requested range covers no items.
    #[error("Invalid range: {0}")]
    InvalidRange(#[from] ModelError),
}

impl FetchError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, FetchError::Cancelled)
    }
}
