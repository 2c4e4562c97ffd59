//! Image sources and upload payloads.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::format::ImageFormat;

/// Side length of the rasterized crop artifact, in pixels.
pub const CROP_SIZE: u32 = 160;

/// Multipart field name expected by the detection endpoints.
pub const UPLOAD_FIELD: &str = "file";

/// Filename attached to cropped uploads.
pub const CROPPED_FILENAME: &str = "cropped.jpg";

/// A user-selected image file.
///
/// Created on selection or drop, replaced wholesale on a new selection or
/// clear, never partially mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSource {
    /// Original file name, kept for the upload part
    pub name: String,
    /// Declared format from the allow-list
    pub format: ImageFormat,
    /// Raw file bytes
    pub bytes: Vec<u8>,
}

impl ImageSource {
    pub fn new(name: impl Into<String>, format: ImageFormat, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            format,
            bytes,
        }
    }

    /// Data URL of the original bytes, for previews.
    pub fn data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.format.mime_type(),
            BASE64.encode(&self.bytes)
        )
    }
}

/// The rasterized fixed-size crop, JPEG-encoded.
///
/// Supersedes any previous artifact; discarded on recrop or clear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CroppedArtifact {
    /// JPEG-encoded CROP_SIZE x CROP_SIZE image
    pub bytes: Vec<u8>,
}

impl CroppedArtifact {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Data URL of the encoded crop, for display.
    pub fn data_url(&self) -> String {
        format!("data:image/jpeg;base64,{}", BASE64.encode(&self.bytes))
    }
}

/// A binary payload ready for multipart upload.
#[derive(Debug, Clone, PartialEq)]
pub struct FilePayload {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub mime_type: String,
}

impl From<&ImageSource> for FilePayload {
    fn from(source: &ImageSource) -> Self {
        Self {
            bytes: source.bytes.clone(),
            filename: source.name.clone(),
            mime_type: source.format.mime_type().to_string(),
        }
    }
}

impl From<&CroppedArtifact> for FilePayload {
    fn from(artifact: &CroppedArtifact) -> Self {
        Self {
            bytes: artifact.bytes.clone(),
            filename: CROPPED_FILENAME.to_string(),
            mime_type: ImageFormat::Jpeg.mime_type().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_data_url() {
        let source = ImageSource::new("face.png", ImageFormat::Png, vec![1, 2, 3]);
        let url = source.data_url();
        assert!(url.starts_with("data:image/png;base64,"));
        assert!(url.len() > "data:image/png;base64,".len());
    }

    #[test]
    fn test_artifact_payload() {
        let artifact = CroppedArtifact::new(vec![0xff, 0xd8, 0xff]);
        let payload = FilePayload::from(&artifact);
        assert_eq!(payload.filename, CROPPED_FILENAME);
        assert_eq!(payload.mime_type, "image/jpeg");
        assert_eq!(payload.bytes, artifact.bytes);
        assert!(artifact.data_url().starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn test_source_payload_keeps_name() {
        let source = ImageSource::new("holiday.jpg", ImageFormat::Jpeg, vec![9]);
        let payload = FilePayload::from(&source);
        assert_eq!(payload.filename, "holiday.jpg");
        assert_eq!(payload.mime_type, "image/jpeg");
    }
}
