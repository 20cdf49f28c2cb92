//! Window element, anchored to a wall.

use super::{ElementId, Wall};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Window opening style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WindowKind {
    #[default]
    Fixed,
    Sliding,
    Casement,
    Awning,
}

/// A window placed along a wall at a normalized position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Window {
    pub(crate) id: ElementId,
    /// Id of the wall this window sits on.
    pub wall: ElementId,
    /// Normalized position along the wall, clamped to [0, 1].
    pub position: f64,
    /// Opening width in meters.
    pub width: f64,
    /// Opening height in meters.
    pub height: f64,
    /// Height of the sill above the floor, meters.
    pub sill_height: f64,
    pub kind: WindowKind,
}

impl Window {
    pub fn new(
        wall: ElementId,
        position: f64,
        width: f64,
        height: f64,
        sill_height: f64,
        kind: WindowKind,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            wall,
            position: position.clamp(0.0, 1.0),
            width,
            height,
            sill_height,
            kind,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    /// World position of the window center on the given wall.
    pub fn anchor_point(&self, wall: &Wall) -> Point {
        Point::new(
            wall.start.x + (wall.end.x - wall.start.x) * self.position,
            wall.start.y + (wall.end.y - wall.start.y) * self.position,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::DEFAULT_WALL_COLOR;

    #[test]
    fn test_anchor_point_at_midpoint() {
        let wall = Wall::new(
            Point::new(0.0, 0.0),
            Point::new(0.0, 6.0),
            0.15,
            2.8,
            DEFAULT_WALL_COLOR,
        );
        let window = Window::new(wall.id(), 0.5, 1.2, 1.0, 0.9, WindowKind::Casement);
        let anchor = window.anchor_point(&wall);
        assert!((anchor.x - 0.0).abs() < f64::EPSILON);
        assert!((anchor.y - 3.0).abs() < f64::EPSILON);
    }
}
