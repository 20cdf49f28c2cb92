//! Door element, anchored to a wall.

use super::{ElementId, Wall};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Door opening style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DoorKind {
    #[default]
    Single,
    Double,
    Sliding,
    Folding,
}

/// A door placed along a wall at a normalized position.
///
/// The referenced wall may have been deleted; consumers resolve the anchor
/// lazily and skip silently when the wall is gone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Door {
    pub(crate) id: ElementId,
    /// Id of the wall this door sits on.
    pub wall: ElementId,
    /// Normalized position along the wall, clamped to [0, 1].
    pub position: f64,
    /// Opening width in meters.
    pub width: f64,
    /// Opening height in meters.
    pub height: f64,
    pub kind: DoorKind,
}

impl Door {
    pub fn new(wall: ElementId, position: f64, width: f64, height: f64, kind: DoorKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            wall,
            position: position.clamp(0.0, 1.0),
            width,
            height,
            kind,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    /// World position of the door center on the given wall.
    pub fn anchor_point(&self, wall: &Wall) -> Point {
        Point::new(
            wall.start.x + (wall.end.x - wall.start.x) * self.position,
            wall.start.y + (wall.end.y - wall.start.y) * self.position,
        )
    }
}
