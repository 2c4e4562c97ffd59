//! Rasterization of a committed crop region.
//!
//! Maps the display-space region into natural pixels, resamples it into a
//! fixed-size square, and JPEG-encodes the result. The resampling backend
//! sits behind the [`Rasterize`] trait so the core never depends on a
//! particular drawing API.

use image::codecs::jpeg::JpegEncoder;
use image::{imageops::FilterType, ColorType, DynamicImage, RgbImage};
use tracing::debug;

use crate::error::{CropError, CropResult};
use fakelens_models::{CroppedArtifact, CropRegion, DisplayGeometry, PixelRect, CROP_SIZE};

/// JPEG quality for encoded artifacts.
const JPEG_QUALITY: u8 = 90;

/// Decode raw file bytes into a bitmap.
pub fn decode_image(bytes: &[u8]) -> CropResult<DynamicImage> {
    image::load_from_memory(bytes).map_err(CropError::Decode)
}

/// Capability interface: given source pixels, a source rectangle in natural
/// pixels, and a target size, produce the resampled target pixels.
pub trait Rasterize {
    fn rasterize(
        &self,
        source: &DynamicImage,
        source_rect: &PixelRect,
        target_size: u32,
    ) -> CropResult<RgbImage>;
}

/// Default backend: crop + resample via the `image` crate.
#[derive(Debug, Clone)]
pub struct ImageRasterizer {
    filter: FilterType,
}

impl ImageRasterizer {
    pub fn new() -> Self {
        Self {
            filter: FilterType::Triangle,
        }
    }

    /// Override the resampling filter.
    pub fn with_filter(mut self, filter: FilterType) -> Self {
        self.filter = filter;
        self
    }
}

impl Default for ImageRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterize for ImageRasterizer {
    fn rasterize(
        &self,
        source: &DynamicImage,
        source_rect: &PixelRect,
        target_size: u32,
    ) -> CropResult<RgbImage> {
        let (x, y, width, height) = clamp_to_bitmap(source_rect, source.width(), source.height())?;
        let cropped = source.crop_imm(x, y, width, height);
        let resized = cropped.resize_exact(target_size, target_size, self.filter);
        Ok(resized.to_rgb8())
    }
}

/// Snap a natural-space rectangle onto the bitmap's integer pixel grid.
fn clamp_to_bitmap(
    rect: &PixelRect,
    bitmap_width: u32,
    bitmap_height: u32,
) -> CropResult<(u32, u32, u32, u32)> {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return Err(CropError::invalid_geometry(format!(
            "source rectangle {}x{} is empty",
            rect.width, rect.height
        )));
    }

    let x = (rect.x.max(0.0) as u32).min(bitmap_width.saturating_sub(1));
    let y = (rect.y.max(0.0) as u32).min(bitmap_height.saturating_sub(1));
    let width = (rect.width.round() as u32).clamp(1, bitmap_width - x);
    let height = (rect.height.round() as u32).clamp(1, bitmap_height - y);

    Ok((x, y, width, height))
}

/// Encode target pixels as a JPEG byte buffer.
fn encode_jpeg(pixels: &RgbImage) -> CropResult<Vec<u8>> {
    let mut bytes = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY);
    encoder
        .encode(
            pixels.as_raw(),
            pixels.width(),
            pixels.height(),
            ColorType::Rgb8,
        )
        .map_err(CropError::Encode)?;
    Ok(bytes)
}

/// Produce the fixed-size artifact for a committed region.
///
/// Returns `Ok(None)` when the region is empty or the geometry cannot
/// scale; prior state is preserved and nothing partial is produced. A
/// committed gesture with positive side always yields a CROP_SIZE x
/// CROP_SIZE JPEG.
pub fn render_artifact(
    rasterizer: &dyn Rasterize,
    source: &DynamicImage,
    region: &CropRegion,
    geometry: &DisplayGeometry,
) -> CropResult<Option<CroppedArtifact>> {
    if region.is_empty() || geometry.is_degenerate() {
        return Ok(None);
    }

    let source_rect = region.to_natural(geometry);
    let pixels = rasterizer.rasterize(source, &source_rect, CROP_SIZE)?;
    let bytes = encode_jpeg(&pixels)?;
    debug!(
        region_side = region.side,
        jpeg_bytes = bytes.len(),
        "Rasterized crop region"
    );
    Ok(Some(CroppedArtifact::new(bytes)))
}
