//! Detection service response shapes.
//!
//! Field names mirror the service wire format exactly; nothing here touches
//! the network.

use serde::{Deserialize, Serialize};

/// Single-pass detection response: one label and one confidence in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleDetection {
    /// Classification label (e.g. "FAKE", "REAL")
    pub prediction: String,
    /// Confidence in [0, 1]
    pub confidence: f64,
}

impl SimpleDetection {
    /// Case-insensitive check for the positive ("fake") verdict.
    pub fn is_fake(&self) -> bool {
        self.prediction.eq_ignore_ascii_case("fake")
    }
}

/// One augmented-variant sub-prediction within a consensus response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubPrediction {
    /// Identifier of the augmentation applied (e.g. "horizontal_flip")
    pub augmentation_type: String,
    /// Classification label for this variant
    pub prediction: String,
    /// Confidence in [0, 1]
    pub confidence: f64,
}

impl SubPrediction {
    pub fn is_fake(&self) -> bool {
        self.prediction.eq_ignore_ascii_case("fake")
    }
}

/// Aggregate debug metadata attached to an augmented response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugInfo {
    /// Model input shape, e.g. [160, 160, 3]
    pub input_size: Vec<u32>,
    /// How many sub-predictions fell below the confidence threshold
    pub predictions_below_threshold: u32,
    /// Total sub-predictions considered
    pub total_predictions: u32,
    /// The confidence threshold in [0, 1]
    pub threshold: f64,
}

/// Consensus detection response over the original plus augmented variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AugmentedDetection {
    /// Aggregate label across all variants
    pub consensus_prediction: String,
    /// Mean confidence across all variants, in [0, 1]
    pub average_confidence: f64,
    /// Prediction for the unmodified input
    pub original_prediction: SimpleDetection,
    /// Per-augmentation sub-predictions, in service order
    pub augmented_predictions: Vec<SubPrediction>,
    /// Server-side processing time in seconds
    pub processing_time: f64,
    /// Aggregate debug counters
    pub debug_info: DebugInfo,
}

impl AugmentedDetection {
    pub fn is_fake(&self) -> bool {
        self.consensus_prediction.eq_ignore_ascii_case("fake")
    }
}

/// A detection result in either response shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DetectionResult {
    Augmented(AugmentedDetection),
    Simple(SimpleDetection),
}

impl DetectionResult {
    /// The headline label for this result, whichever shape it has.
    pub fn label(&self) -> &str {
        match self {
            DetectionResult::Simple(simple) => &simple.prediction,
            DetectionResult::Augmented(augmented) => &augmented.consensus_prediction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_parse() {
        let json = r#"{"prediction":"FAKE","confidence":0.87}"#;
        let detection: SimpleDetection = serde_json::from_str(json).unwrap();
        assert_eq!(detection.prediction, "FAKE");
        assert_eq!(detection.confidence, 0.87);
        assert!(detection.is_fake());
    }

    #[test]
    fn test_simple_missing_field() {
        let json = r#"{"prediction":"REAL"}"#;
        assert!(serde_json::from_str::<SimpleDetection>(json).is_err());
    }

    #[test]
    fn test_augmented_parse() {
        let json = r#"{
            "consensus_prediction": "FAKE",
            "average_confidence": 0.91,
            "original_prediction": {"prediction": "FAKE", "confidence": 0.95},
            "augmented_predictions": [
                {"augmentation_type": "horizontal_flip", "prediction": "fake", "confidence": 0.9},
                {"augmentation_type": "rotation_90", "prediction": "fake", "confidence": 0.88},
                {"augmentation_type": "brightness", "prediction": "real", "confidence": 0.4}
            ],
            "processing_time": 1.234,
            "debug_info": {
                "input_size": [160, 160, 3],
                "predictions_below_threshold": 1,
                "total_predictions": 4,
                "threshold": 0.7
            }
        }"#;
        let detection: AugmentedDetection = serde_json::from_str(json).unwrap();
        assert_eq!(detection.consensus_prediction, "FAKE");
        assert_eq!(detection.augmented_predictions.len(), 3);
        assert_eq!(
            detection.augmented_predictions[0].augmentation_type,
            "horizontal_flip"
        );
        assert!(detection.augmented_predictions[0].is_fake());
        assert!(!detection.augmented_predictions[2].is_fake());
        assert_eq!(detection.debug_info.input_size, vec![160, 160, 3]);
        assert_eq!(detection.debug_info.threshold, 0.7);
    }

    #[test]
    fn test_result_label() {
        let simple = DetectionResult::Simple(SimpleDetection {
            prediction: "REAL".to_string(),
            confidence: 0.6,
        });
        assert_eq!(simple.label(), "REAL");
    }
}
