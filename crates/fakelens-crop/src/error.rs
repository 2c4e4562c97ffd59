//! Error types for crop operations.

use thiserror::Error;

/// Result type for crop operations.
pub type CropResult<T> = Result<T, CropError>;

/// Errors that can occur while decoding or rasterizing.
#[derive(Debug, Error)]
pub enum CropError {
    #[error("Image decode failed: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Image encode failed: {0}")]
    Encode(#[source] image::ImageError),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),
}

impl CropError {
    /// Create an invalid geometry error.
    pub fn invalid_geometry(message: impl Into<String>) -> Self {
        Self::InvalidGeometry(message.into())
    }
}
