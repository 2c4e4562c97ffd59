//! Crop-region drag state machine.
//!
//! Tracks the Idle -> Dragging -> Idle lifecycle and keeps the region
//! square and inside the rendered image at every step. Transitions are
//! plain value updates with no rendering dependencies.

use fakelens_models::{CropRegion, Point};
use tracing::debug;

/// Drag lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging,
}

/// The interactive crop selector.
///
/// Owns the current region and the rendered image size it is clamped to.
/// Pointer transitions are ignored until an image has been rendered.
#[derive(Debug, Clone, Default)]
pub struct CropSelector {
    phase: DragPhase,
    region: CropRegion,
    rendered: Option<(f64, f64)>,
}

impl CropSelector {
    pub fn new() -> Self {
        Self {
            phase: DragPhase::Idle,
            region: CropRegion::empty(),
            rendered: None,
        }
    }

    /// Current region. Zero side means nothing is selected.
    pub fn region(&self) -> CropRegion {
        self.region
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == DragPhase::Dragging
    }

    /// Record the rendered image size and install the default centered
    /// region. Called whenever a newly loaded image is laid out.
    pub fn image_rendered(&mut self, width: f64, height: f64) {
        self.rendered = Some((width, height));
        self.phase = DragPhase::Idle;
        self.region = CropRegion::centered_default(width, height);
        debug!(width, height, "Selector bound to rendered image");
    }

    /// Begin a drag: the region collapses onto the pointer with side zero.
    pub fn begin(&mut self, point: Point) {
        if self.rendered.is_none() {
            return;
        }
        self.phase = DragPhase::Dragging;
        self.region = CropRegion::new(point.x, point.y, 0.0);
    }

    /// Grow the region toward the pointer. Only the side length changes:
    /// it is the minimum of the drag deltas and the distances from the
    /// origin to the right and bottom edges, which keeps the region square
    /// and inside the image. Ignored while idle.
    pub fn update(&mut self, point: Point) {
        if self.phase != DragPhase::Dragging {
            return;
        }
        let Some((width, height)) = self.rendered else {
            return;
        };

        let dx = (point.x - self.region.x).abs();
        let dy = (point.y - self.region.y).abs();
        let side = dx
            .min(dy)
            .min(width - self.region.x)
            .min(height - self.region.y)
            .max(0.0);

        self.region.side = side;
    }

    /// End the drag (pointer up, leave, or cancel all land here).
    ///
    /// Returns the committed region when it has a positive side; a
    /// zero-size region commits nothing but persists as drawn.
    pub fn finish(&mut self) -> Option<CropRegion> {
        if self.phase != DragPhase::Dragging {
            return None;
        }
        self.phase = DragPhase::Idle;
        if self.region.is_empty() {
            debug!("Drag ended with empty region");
            None
        } else {
            Some(self.region)
        }
    }

    /// Recrop: zero the region and await a new drag. The rendered bounds
    /// are kept so the next gesture needs no reload.
    pub fn reset_region(&mut self) {
        self.phase = DragPhase::Idle;
        self.region = CropRegion::empty();
    }

    /// Full reset to the freshly-constructed state.
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selector_400x300() -> CropSelector {
        let mut selector = CropSelector::new();
        selector.image_rendered(400.0, 300.0);
        selector
    }

    #[test]
    fn test_default_region_on_render() {
        let selector = selector_400x300();
        let region = selector.region();
        assert_eq!(region.side, 150.0);
        assert_eq!(region.x, 125.0);
        assert_eq!(region.y, 75.0);
        assert_eq!(selector.phase(), DragPhase::Idle);
    }

    #[test]
    fn test_drag_scenario_clamps_to_smallest_delta() {
        // 800x600 natural displayed at 400x300: drag (50,50) -> (150,120).
        let mut selector = selector_400x300();
        selector.begin(Point::new(50.0, 50.0));
        assert!(selector.is_dragging());
        selector.update(Point::new(150.0, 120.0));
        let region = selector.finish().unwrap();
        assert_eq!(region.side, 70.0);
        assert_eq!((region.x, region.y), (50.0, 50.0));
    }

    #[test]
    fn test_region_clamped_to_edges() {
        let mut selector = selector_400x300();
        selector.begin(Point::new(350.0, 50.0));
        selector.update(Point::new(600.0, 300.0));
        let region = selector.finish().unwrap();
        // 50 display pixels remain to the right edge.
        assert_eq!(region.side, 50.0);
        assert!(region.fits_within(400.0, 300.0));
    }

    #[test]
    fn test_region_always_square_within_bounds() {
        let mut selector = selector_400x300();
        selector.begin(Point::new(10.0, 200.0));
        for step in 0..50 {
            let t = step as f64 * 10.0;
            selector.update(Point::new(10.0 + t, 200.0 + t * 0.7));
            assert!(selector.region().fits_within(400.0, 300.0));
        }
    }

    #[test]
    fn test_zero_drag_commits_nothing() {
        let mut selector = selector_400x300();
        selector.begin(Point::new(50.0, 50.0));
        assert!(selector.finish().is_none());
        assert!(selector.region().is_empty());
    }

    #[test]
    fn test_move_ignored_while_idle() {
        let mut selector = selector_400x300();
        let before = selector.region();
        selector.update(Point::new(200.0, 200.0));
        assert_eq!(selector.region(), before);
    }

    #[test]
    fn test_ignored_before_render() {
        let mut selector = CropSelector::new();
        selector.begin(Point::new(50.0, 50.0));
        assert!(!selector.is_dragging());
        assert!(selector.finish().is_none());
    }

    #[test]
    fn test_recrop_keeps_bounds() {
        let mut selector = selector_400x300();
        selector.begin(Point::new(50.0, 50.0));
        selector.update(Point::new(150.0, 150.0));
        selector.finish().unwrap();

        selector.reset_region();
        assert!(selector.region().is_empty());

        // A new drag still works against the retained bounds.
        selector.begin(Point::new(50.0, 50.0));
        selector.update(Point::new(150.0, 120.0));
        assert_eq!(selector.finish().unwrap().side, 70.0);
    }

    #[test]
    fn test_origin_outside_image_never_commits() {
        let mut selector = selector_400x300();
        selector.begin(Point::new(410.0, 50.0));
        selector.update(Point::new(500.0, 150.0));
        // Distance to the right edge is negative; side clamps to zero.
        assert!(selector.region().is_empty());
        assert!(selector.finish().is_none());
    }
}
