//! Result presentation.
//!
//! Pure transforms from detection results to display-ready strings; no
//! network, no geometry, no mutation of session state.

use std::fmt;

use fakelens_models::{AugmentedDetection, DetectionResult, SimpleDetection, SubPrediction};

/// Format a [0, 1] confidence as a percentage with two decimals.
pub fn format_confidence(confidence: f64) -> String {
    format!("{:.2}%", confidence * 100.0)
}

/// Format the service-side processing time in seconds.
pub fn format_processing_time(seconds: f64) -> String {
    format!("{seconds:.3}s")
}

/// Format the model input shape, e.g. "160 × 160 × 3".
pub fn format_input_shape(shape: &[u32]) -> String {
    shape
        .iter()
        .map(|dim| dim.to_string())
        .collect::<Vec<_>>()
        .join(" × ")
}

/// Format the confidence threshold as a percentage, trimming trailing
/// zeros (0.7 -> "70%", 0.125 -> "12.5%").
pub fn format_threshold(threshold: f64) -> String {
    let raw = format!("{:.2}", threshold * 100.0);
    let trimmed = raw.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed}%")
}

/// Humanize an augmentation identifier: underscores become spaces.
pub fn humanize_augmentation(identifier: &str) -> String {
    identifier.replace('_', " ")
}

/// Display-ready single-pass result.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleReport {
    pub prediction: String,
    pub confidence: String,
    pub is_fake: bool,
}

impl SimpleReport {
    fn from_detection(detection: &SimpleDetection) -> Self {
        Self {
            prediction: detection.prediction.clone(),
            confidence: format_confidence(detection.confidence),
            is_fake: detection.is_fake(),
        }
    }
}

/// One augmented-variant row.
#[derive(Debug, Clone, PartialEq)]
pub struct AugmentationRow {
    /// Humanized augmentation name
    pub name: String,
    pub prediction: String,
    pub confidence: String,
    pub is_fake: bool,
}

impl AugmentationRow {
    fn from_sub(sub: &SubPrediction) -> Self {
        Self {
            name: humanize_augmentation(&sub.augmentation_type),
            prediction: sub.prediction.clone(),
            confidence: format_confidence(sub.confidence),
            is_fake: sub.is_fake(),
        }
    }
}

/// Display-ready consensus result.
#[derive(Debug, Clone, PartialEq)]
pub struct AugmentedReport {
    pub consensus: String,
    pub consensus_is_fake: bool,
    pub average_confidence: String,
    pub original: SimpleReport,
    /// Sub-predictions in service arrival order
    pub augmentations: Vec<AugmentationRow>,
    pub processing_time: String,
    pub input_shape: String,
    /// "below / total", counters passed through unchanged
    pub below_threshold: String,
    pub threshold: String,
}

impl AugmentedReport {
    fn from_detection(detection: &AugmentedDetection) -> Self {
        Self {
            consensus: detection.consensus_prediction.clone(),
            consensus_is_fake: detection.is_fake(),
            average_confidence: format_confidence(detection.average_confidence),
            original: SimpleReport::from_detection(&detection.original_prediction),
            augmentations: detection
                .augmented_predictions
                .iter()
                .map(AugmentationRow::from_sub)
                .collect(),
            processing_time: format_processing_time(detection.processing_time),
            input_shape: format_input_shape(&detection.debug_info.input_size),
            below_threshold: format!(
                "{} / {}",
                detection.debug_info.predictions_below_threshold,
                detection.debug_info.total_predictions
            ),
            threshold: format_threshold(detection.debug_info.threshold),
        }
    }
}

/// A display-ready report in either shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    Simple(SimpleReport),
    Augmented(AugmentedReport),
}

/// Map a detection result to its display-ready report.
pub fn present(result: &DetectionResult) -> Report {
    match result {
        DetectionResult::Simple(simple) => Report::Simple(SimpleReport::from_detection(simple)),
        DetectionResult::Augmented(augmented) => {
            Report::Augmented(AugmentedReport::from_detection(augmented))
        }
    }
}

impl fmt::Display for SimpleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Prediction: {}", self.prediction)?;
        write!(f, "Confidence: {}", self.confidence)
    }
}

impl fmt::Display for AugmentedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Consensus:  {} ({})", self.consensus, self.average_confidence)?;
        writeln!(
            f,
            "Original:   {} ({})",
            self.original.prediction, self.original.confidence
        )?;
        for row in &self.augmentations {
            writeln!(f, "  {:24} {} ({})", row.name, row.prediction, row.confidence)?;
        }
        writeln!(f, "Processing time: {}", self.processing_time)?;
        writeln!(f, "Input shape: {}", self.input_shape)?;
        writeln!(f, "Below threshold: {}", self.below_threshold)?;
        write!(f, "Threshold: {}", self.threshold)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Simple(report) => fmt::Display::fmt(report, f),
            Report::Augmented(report) => fmt::Display::fmt(report, f),
        }
    }
}
