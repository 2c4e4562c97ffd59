//! Pointer and touch coordinate mapping.
//!
//! Converts viewport event positions into container-relative display
//! coordinates. Mouse and touch gestures share one code path; touch input
//! uses the first active touch point.

use fakelens_models::{ContainerRect, Point};

/// A pointer or touch event position in viewport coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerEvent {
    /// Mouse event with client coordinates
    Mouse { client_x: f64, client_y: f64 },
    /// Touch event with all active touch points, in registration order
    Touch { touches: Vec<Point> },
}

impl PointerEvent {
    pub fn mouse(client_x: f64, client_y: f64) -> Self {
        Self::Mouse { client_x, client_y }
    }

    pub fn touch(touches: Vec<Point>) -> Self {
        Self::Touch { touches }
    }

    /// The viewport position this event maps from: the mouse position, or
    /// the first active touch point. `None` for an empty touch list.
    fn client_position(&self) -> Option<Point> {
        match self {
            PointerEvent::Mouse { client_x, client_y } => Some(Point::new(*client_x, *client_y)),
            PointerEvent::Touch { touches } => touches.first().copied(),
        }
    }
}

/// Map an event to container-relative coordinates.
///
/// Returns `None` when the container is not mounted yet or a touch event
/// carries no touch points; callers treat that as "no gesture".
pub fn container_position(event: &PointerEvent, container: Option<&ContainerRect>) -> Option<Point> {
    let container = container?;
    let client = event.client_position()?;
    Some(Point::new(
        client.x - container.left,
        client.y - container.top,
    ))
}
