//! The analyzer session state machine.
//!
//! One struct owns all mutable front-end state; every user event is a
//! method that moves the state forward. Nothing here touches a rendering
//! surface, so the whole lifecycle is testable headlessly. The only
//! suspension point is the network submission, which is split into
//! begin/run/finish steps so a UI can hand the running request to its own
//! executor and apply the outcome when it lands.

use image::DynamicImage;
use tracing::{debug, warn};

use fakelens_client::{DetectorClient, DetectorError};
use fakelens_crop::{
    container_position, decode_image, render_artifact, CropSelector, ImageRasterizer,
    PointerEvent, Rasterize,
};
use fakelens_models::{
    AnalysisMode, ContainerRect, CropRegion, CroppedArtifact, DetectionResult, DisplayGeometry,
    FilePayload, ImageFormat, ImageSource,
};

/// Error shown when a selected or dropped file is not an accepted image.
pub const INVALID_IMAGE_MESSAGE: &str = "Please select a valid JPEG or PNG image.";

/// Error shown when a submission fails for any reason.
pub const ANALYSIS_FAILED_MESSAGE: &str = "Analysis failed";

/// A selected image with its decoded bitmap.
struct LoadedImage {
    source: ImageSource,
    bitmap: DynamicImage,
}

/// A submission handed out by [`AnalyzerSession::begin_analysis`].
///
/// Carries everything the request needs so the session is not borrowed
/// while the request is in flight.
#[derive(Debug)]
pub struct AnalysisRequest {
    mode: AnalysisMode,
    payload: FilePayload,
    generation: u64,
}

impl AnalysisRequest {
    pub fn mode(&self) -> AnalysisMode {
        self.mode
    }

    /// Run the request to completion. No cancellation: once issued it runs
    /// to success or failure.
    pub async fn run(self, client: &DetectorClient) -> AnalysisOutcome {
        let outcome = client.submit(self.mode, &self.payload).await;
        AnalysisOutcome {
            generation: self.generation,
            outcome,
        }
    }
}

/// The completed result of an [`AnalysisRequest`].
#[derive(Debug)]
pub struct AnalysisOutcome {
    generation: u64,
    outcome: Result<DetectionResult, DetectorError>,
}

/// All mutable state behind the interactive analyzer surface.
pub struct AnalyzerSession {
    rasterizer: Box<dyn Rasterize + Send + Sync>,
    image: Option<LoadedImage>,
    geometry: Option<DisplayGeometry>,
    selector: CropSelector,
    artifact: Option<CroppedArtifact>,
    result: Option<DetectionResult>,
    error: Option<String>,
    busy: bool,
    /// Bumped on every image load or clear; responses from an older
    /// generation are discarded instead of overwriting fresh state.
    generation: u64,
}

impl AnalyzerSession {
    pub fn new() -> Self {
        Self::with_rasterizer(Box::new(ImageRasterizer::new()))
    }

    /// Use a different rasterization backend.
    pub fn with_rasterizer(rasterizer: Box<dyn Rasterize + Send + Sync>) -> Self {
        Self {
            rasterizer,
            image: None,
            geometry: None,
            selector: CropSelector::new(),
            artifact: None,
            result: None,
            error: None,
            busy: false,
            generation: 0,
        }
    }

    // ---- selection -------------------------------------------------------

    /// Select or drop a file.
    ///
    /// The declared MIME type is checked against the allow-list and the
    /// bytes must decode; otherwise the error state is set and nothing else
    /// changes. A successful selection replaces the image wholesale and
    /// clears prior crop, result, and error state.
    pub fn select_file(&mut self, name: &str, mime_type: &str, bytes: Vec<u8>) -> bool {
        let Some(format) = ImageFormat::from_mime_type(mime_type) else {
            warn!(%mime_type, "Rejected file with disallowed type");
            self.error = Some(INVALID_IMAGE_MESSAGE.to_string());
            return false;
        };

        let bitmap = match decode_image(&bytes) {
            Ok(bitmap) => bitmap,
            Err(e) => {
                warn!(error = %e, "Rejected undecodable image");
                self.error = Some(INVALID_IMAGE_MESSAGE.to_string());
                return false;
            }
        };

        debug!(
            name,
            width = bitmap.width(),
            height = bitmap.height(),
            "Image selected"
        );

        self.generation += 1;
        self.image = Some(LoadedImage {
            source: ImageSource::new(name, format, bytes),
            bitmap,
        });
        self.geometry = None;
        self.selector.clear();
        self.artifact = None;
        self.result = None;
        self.error = None;
        true
    }

    /// Record the on-screen size the image was laid out at. Establishes the
    /// display geometry and installs the default centered crop region.
    pub fn image_rendered(&mut self, rendered_width: f64, rendered_height: f64) {
        let Some(image) = &self.image else {
            return;
        };
        self.geometry = Some(DisplayGeometry::new(
            image.bitmap.width(),
            image.bitmap.height(),
            rendered_width,
            rendered_height,
        ));
        self.selector.image_rendered(rendered_width, rendered_height);
    }

    /// Clear everything back to the freshly-constructed state. The busy
    /// flag is left to the in-flight request (if any) to resolve; its
    /// response will be discarded as stale.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.image = None;
        self.geometry = None;
        self.selector.clear();
        self.artifact = None;
        self.result = None;
        self.error = None;
    }

    // ---- crop gestures ---------------------------------------------------

    /// Pointer or touch down over the image container.
    pub fn pointer_start(&mut self, event: &PointerEvent, container: Option<&ContainerRect>) {
        if let Some(point) = container_position(event, container) {
            self.selector.begin(point);
        }
    }

    /// Pointer or touch move while dragging.
    pub fn pointer_move(&mut self, event: &PointerEvent, container: Option<&ContainerRect>) {
        if let Some(point) = container_position(event, container) {
            self.selector.update(point);
        }
    }

    /// Pointer up, leave, or cancel: ends the drag and rasterizes the
    /// committed region into the fixed-size artifact.
    pub fn pointer_end(&mut self) {
        if let Some(region) = self.selector.finish() {
            self.commit_region(region);
        }
    }

    /// Discard the committed artifact and await a new drag; the loaded
    /// image is kept.
    pub fn recrop(&mut self) {
        self.artifact = None;
        self.selector.reset_region();
    }

    fn commit_region(&mut self, region: CropRegion) {
        let (Some(image), Some(geometry)) = (&self.image, &self.geometry) else {
            return;
        };
        match render_artifact(self.rasterizer.as_ref(), &image.bitmap, &region, geometry) {
            Ok(Some(artifact)) => {
                debug!(jpeg_bytes = artifact.bytes.len(), "Crop artifact committed");
                self.artifact = Some(artifact);
            }
            Ok(None) => {}
            Err(e) => {
                // Prior artifact state is preserved; nothing partial.
                warn!(error = %e, "Rasterization failed");
            }
        }
    }

    // ---- submission lifecycle --------------------------------------------

    /// Start a submission: returns the request to run, or `None` when there
    /// is nothing to analyze or one is already outstanding (the submit
    /// control is expected to be disabled while busy).
    pub fn begin_analysis(&mut self, mode: AnalysisMode) -> Option<AnalysisRequest> {
        if self.busy {
            warn!("Submission already outstanding");
            return None;
        }
        let Some(image) = &self.image else {
            warn!("Nothing to analyze");
            return None;
        };

        let payload = match &self.artifact {
            Some(artifact) => FilePayload::from(artifact),
            None => FilePayload::from(&image.source),
        };

        self.busy = true;
        self.error = None;
        Some(AnalysisRequest {
            mode,
            payload,
            generation: self.generation,
        })
    }

    /// Apply a finished submission. Outcomes for an image that has since
    /// been replaced or cleared are dropped.
    pub fn finish_analysis(&mut self, outcome: AnalysisOutcome) {
        self.busy = false;
        if outcome.generation != self.generation {
            debug!("Discarding stale detection response");
            return;
        }
        match outcome.outcome {
            Ok(result) => {
                self.result = Some(result);
                self.error = None;
            }
            Err(e) => {
                warn!(error = %e, "Analysis failed");
                self.error = Some(ANALYSIS_FAILED_MESSAGE.to_string());
            }
        }
    }

    /// Convenience for linear callers: begin, run, and finish in one step.
    /// Returns false when no request was started.
    pub async fn analyze(&mut self, client: &DetectorClient, mode: AnalysisMode) -> bool {
        let Some(request) = self.begin_analysis(mode) else {
            return false;
        };
        let outcome = request.run(client).await;
        self.finish_analysis(outcome);
        true
    }

    // ---- accessors -------------------------------------------------------

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    /// Natural size of the decoded bitmap.
    pub fn natural_size(&self) -> Option<(u32, u32)> {
        self.image
            .as_ref()
            .map(|image| (image.bitmap.width(), image.bitmap.height()))
    }

    /// Data URL of the original image, for previews.
    pub fn preview_data_url(&self) -> Option<String> {
        self.image.as_ref().map(|image| image.source.data_url())
    }

    /// Data URL of the committed crop, for previews.
    pub fn cropped_data_url(&self) -> Option<String> {
        self.artifact.as_ref().map(CroppedArtifact::data_url)
    }

    pub fn geometry(&self) -> Option<DisplayGeometry> {
        self.geometry
    }

    pub fn crop_region(&self) -> CropRegion {
        self.selector.region()
    }

    pub fn is_dragging(&self) -> bool {
        self.selector.is_dragging()
    }

    pub fn artifact(&self) -> Option<&CroppedArtifact> {
        self.artifact.as_ref()
    }

    pub fn result(&self) -> Option<&DetectionResult> {
        self.result.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }
}

impl Default for AnalyzerSession {
    fn default() -> Self {
        Self::new()
    }
}
