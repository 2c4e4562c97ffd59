//! Analysis modes and their endpoint paths.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Which detection endpoint a submission targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisMode {
    /// Single-pass detection: one label plus one confidence.
    Simple,
    /// Augmented detection: consensus over the original image and several
    /// deterministic augmentations of it.
    Augmented,
}

impl AnalysisMode {
    pub const ALL: &'static [AnalysisMode] = &[AnalysisMode::Simple, AnalysisMode::Augmented];

    /// Path appended to the service base URL for this mode.
    pub fn endpoint_path(&self) -> &'static str {
        match self {
            AnalysisMode::Simple => "/api/v1/detect/",
            AnalysisMode::Augmented => "/api/v1/detect/augmented",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisMode::Simple => "simple",
            AnalysisMode::Augmented => "augmented",
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AnalysisMode {
    type Err = AnalysisModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "simple" => Ok(AnalysisMode::Simple),
            "augmented" => Ok(AnalysisMode::Augmented),
            _ => Err(AnalysisModeParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown analysis mode: {0}")]
pub struct AnalysisModeParseError(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(AnalysisMode::Simple.endpoint_path(), "/api/v1/detect/");
        assert_eq!(
            AnalysisMode::Augmented.endpoint_path(),
            "/api/v1/detect/augmented"
        );
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!("simple".parse::<AnalysisMode>().unwrap(), AnalysisMode::Simple);
        assert_eq!(
            "AUGMENTED".parse::<AnalysisMode>().unwrap(),
            AnalysisMode::Augmented
        );
        assert!("deep".parse::<AnalysisMode>().is_err());
    }
}
