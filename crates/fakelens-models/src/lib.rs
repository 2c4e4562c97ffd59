//! Shared data models for the FakeLens front-end core.
//!
//! This crate provides Serde-serializable types for:
//! - Image sources and cropped upload artifacts
//! - Display/natural geometry and crop regions
//! - Analysis modes and detection endpoint paths
//! - Detection service response shapes (simple and augmented)

pub mod detection;
pub mod format;
pub mod geometry;
pub mod mode;
pub mod source;

// Re-export common types
pub use detection::{
    AugmentedDetection, DebugInfo, DetectionResult, SimpleDetection, SubPrediction,
};
pub use format::{ImageFormat, ImageFormatParseError};
pub use geometry::{ContainerRect, CropRegion, DisplayGeometry, PixelRect, Point};
pub use mode::{AnalysisMode, AnalysisModeParseError};
pub use source::{CroppedArtifact, FilePayload, ImageSource, CROPPED_FILENAME, CROP_SIZE, UPLOAD_FIELD};
