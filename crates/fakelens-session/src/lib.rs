//! Front-end session state for the crop-and-submit pipeline.
//!
//! [`session::AnalyzerSession`] is the single explicit state struct behind
//! the interactive surface: it owns the selected image, the crop selector,
//! the committed artifact, the last detection result, and the error state,
//! and exposes transition methods for every user-driven event. The
//! [`presenter`] module turns detection results into display-ready text.

pub mod presenter;
pub mod session;

pub use presenter::{present, AugmentationRow, AugmentedReport, Report, SimpleReport};
pub use session::{
    AnalysisOutcome, AnalysisRequest, AnalyzerSession, ANALYSIS_FAILED_MESSAGE,
    INVALID_IMAGE_MESSAGE,
};
