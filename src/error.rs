use reqwest::StatusCode;
use thiserror::Error;

/// Errors returned by the Talkoo HTTP client and the upload pipeline
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection refused, DNS failure, reset, etc.
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("server returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// Upload target already exists (HTTP 409)
    #[error("dictionary already exists")]
    Conflict,

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Rejected before any request was sent
    #[error("{0}")]
    InvalidInput(String),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
