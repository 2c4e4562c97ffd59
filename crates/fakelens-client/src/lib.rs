//! Client for the remote deepfake detection service.
//!
//! The service is an opaque HTTP collaborator: it accepts a multipart image
//! upload and returns a structured prediction. Two endpoint variants exist,
//! selected by [`fakelens_models::AnalysisMode`]; both are configuration,
//! not logic. Requests are single-shot: a failure is surfaced to the
//! session, never retried here.

pub mod client;
pub mod error;

pub use client::{DetectorClient, DetectorConfig};
pub use error::{DetectorError, DetectorResult};
