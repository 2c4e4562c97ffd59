//! Detector client error types.

use thiserror::Error;

pub type DetectorResult<T> = Result<T, DetectorError>;

#[derive(Debug, Error)]
pub enum DetectorError {
    #[error("Detection service returned {status}: {body}")]
    RequestFailed { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}

impl DetectorError {
    /// Whether this failure came from a parseable-but-wrong response body
    /// rather than transport or service status.
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, DetectorError::InvalidResponse(_))
    }
}
