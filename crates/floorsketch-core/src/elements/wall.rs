//! Wall segment element.

use super::{Color, ElementId};
use crate::geometry;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default wall color (dark plaster).
pub const DEFAULT_WALL_COLOR: Color = Color::rgb(42, 42, 42);

/// A straight wall segment between two world points.
///
/// `start != end` is an invariant; degenerate walls are rejected before
/// construction by [`crate::plan::PlanDocument::create_wall`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wall {
    pub(crate) id: ElementId,
    /// Start point in world meters.
    pub start: Point,
    /// End point in world meters.
    pub end: Point,
    /// Thickness in meters, > 0.
    pub thickness: f64,
    /// Height in meters, > 0.
    pub height: f64,
    /// Render color.
    pub color: Color,
    /// Optional surface material name.
    #[serde(default)]
    pub material: Option<String>,
}

impl Wall {
    /// Create a new wall.
    pub fn new(start: Point, end: Point, thickness: f64, height: f64, color: Color) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            thickness,
            height,
            color,
            material: None,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Length of the wall in meters.
    pub fn length(&self) -> f64 {
        geometry::distance(self.start, self.end)
    }

    /// Midpoint of the wall centerline.
    pub fn midpoint(&self) -> Point {
        self.start.midpoint(self.end)
    }

    /// Direction of the wall in degrees, [0, 360).
    pub fn angle_degrees(&self) -> f64 {
        geometry::angle_between(self.start, self.end)
    }

    /// Whether `point` lies on the wall centerline within `tolerance` meters.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        geometry::distance_to_segment(point, self.start, self.end)
            <= tolerance + self.thickness / 2.0
    }

    /// Whether this wall connects `a` and `b` (in either direction) within
    /// `tolerance` meters per endpoint.
    pub fn connects(&self, a: Point, b: Point, tolerance: f64) -> bool {
        let forward = geometry::distance(self.start, a) <= tolerance
            && geometry::distance(self.end, b) <= tolerance;
        let reverse = geometry::distance(self.start, b) <= tolerance
            && geometry::distance(self.end, a) <= tolerance;
        forward || reverse
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wall(start: Point, end: Point) -> Wall {
        Wall::new(start, end, 0.15, 2.8, DEFAULT_WALL_COLOR)
    }

    #[test]
    fn test_length_and_angle() {
        let w = wall(Point::new(0.0, 0.0), Point::new(3.0, 4.0));
        assert!((w.length() - 5.0).abs() < f64::EPSILON);

        let horizontal = wall(Point::new(0.0, 0.0), Point::new(2.0, 0.0));
        assert!((horizontal.angle_degrees() - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_midpoint() {
        let w = wall(Point::new(0.0, 0.0), Point::new(4.0, 2.0));
        let mid = w.midpoint();
        assert!((mid.x - 2.0).abs() < f64::EPSILON);
        assert!((mid.y - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hit_test_accounts_for_thickness() {
        let w = wall(Point::new(0.0, 0.0), Point::new(4.0, 0.0));
        assert!(w.hit_test(Point::new(2.0, 0.05), 0.0));
        assert!(!w.hit_test(Point::new(2.0, 0.5), 0.1));
    }

    #[test]
    fn test_connects_either_direction() {
        let w = wall(Point::new(0.0, 0.0), Point::new(4.0, 0.0));
        assert!(w.connects(Point::new(0.0, 0.0), Point::new(4.0, 0.0), 0.05));
        assert!(w.connects(Point::new(4.0, 0.0), Point::new(0.01, 0.0), 0.05));
        assert!(!w.connects(Point::new(0.0, 0.0), Point::new(3.0, 0.0), 0.05));
    }
}
