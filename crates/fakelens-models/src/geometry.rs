//! Display/natural geometry and crop regions.
//!
//! All interactive coordinates are container-relative display pixels; the
//! natural (decoded bitmap) space is only entered at rasterization time via
//! [`DisplayGeometry`] scale factors.

use serde::{Deserialize, Serialize};

/// A point in container-relative display pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Bounding rectangle of the interactive container, in viewport pixels.
///
/// Only the origin participates in coordinate mapping; the size is carried
/// for overlay layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContainerRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ContainerRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Natural (decoded bitmap) size paired with the on-screen rendered size.
///
/// Recomputed every time a new image is loaded and rendered; the
/// natural-to-rendered ratios are the scale factors applied when a display
/// region is rasterized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayGeometry {
    /// Decoded bitmap width in pixels
    pub natural_width: u32,
    /// Decoded bitmap height in pixels
    pub natural_height: u32,
    /// On-screen rendered width in display pixels
    pub rendered_width: f64,
    /// On-screen rendered height in display pixels
    pub rendered_height: f64,
}

impl DisplayGeometry {
    pub fn new(
        natural_width: u32,
        natural_height: u32,
        rendered_width: f64,
        rendered_height: f64,
    ) -> Self {
        Self {
            natural_width,
            natural_height,
            rendered_width,
            rendered_height,
        }
    }

    /// Horizontal display-to-natural scale factor.
    pub fn scale_x(&self) -> f64 {
        self.natural_width as f64 / self.rendered_width
    }

    /// Vertical display-to-natural scale factor.
    pub fn scale_y(&self) -> f64 {
        self.natural_height as f64 / self.rendered_height
    }

    /// True when either rendered dimension is unusable for scaling.
    pub fn is_degenerate(&self) -> bool {
        !(self.rendered_width > 0.0 && self.rendered_height > 0.0)
    }
}

/// A rectangle in natural bitmap pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// A square crop region in container-relative display pixels.
///
/// Invariants: `side >= 0`, and the region stays inside the rendered image
/// (`x + side <= rendered_width`, `y + side <= rendered_height`). The drag
/// state machine maintains these by clamping the side length against the
/// distances to the right and bottom edges.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CropRegion {
    pub x: f64,
    pub y: f64,
    pub side: f64,
}

impl CropRegion {
    pub fn new(x: f64, y: f64, side: f64) -> Self {
        Self { x, y, side }
    }

    /// The zero-size region: nothing selected, no crop box drawn.
    pub fn empty() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Default region installed when an image is rendered: a centered
    /// square with side equal to half the shorter rendered dimension.
    pub fn centered_default(rendered_width: f64, rendered_height: f64) -> Self {
        let side = rendered_width.min(rendered_height) / 2.0;
        Self::new(
            (rendered_width - side) / 2.0,
            (rendered_height - side) / 2.0,
            side,
        )
    }

    /// A zero-size region yields no crop box and no artifact.
    pub fn is_empty(&self) -> bool {
        self.side <= 0.0
    }

    /// Check containment within a rendered image of the given size.
    pub fn fits_within(&self, rendered_width: f64, rendered_height: f64) -> bool {
        self.x >= 0.0
            && self.y >= 0.0
            && self.side >= 0.0
            && self.x + self.side <= rendered_width
            && self.y + self.side <= rendered_height
    }

    /// Map this display-space region into natural bitmap pixels.
    ///
    /// The horizontal and vertical scale factors differ in general, so the
    /// square display region maps to a rectangle in natural space.
    pub fn to_natural(&self, geometry: &DisplayGeometry) -> PixelRect {
        let sx = geometry.scale_x();
        let sy = geometry.scale_y();
        PixelRect::new(self.x * sx, self.y * sy, self.side * sx, self.side * sy)
    }
}
