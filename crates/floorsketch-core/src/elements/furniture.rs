//! Furniture element.

use super::{Color, ElementId};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A furniture item placed freely on the plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Furniture {
    pub(crate) id: ElementId,
    /// Display name, e.g. "Sofa".
    pub name: String,
    /// Catalog category, e.g. "seating".
    pub category: String,
    /// Center position in world meters.
    pub position: Point,
    /// Rotation around the center, radians counterclockwise.
    pub rotation: f64,
    /// Footprint width in meters.
    pub width: f64,
    /// Footprint depth in meters.
    pub depth: f64,
    pub color: Color,
}

impl Furniture {
    pub fn new(
        name: String,
        category: String,
        position: Point,
        width: f64,
        depth: f64,
        color: Color,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            category,
            position,
            rotation: 0.0,
            width,
            depth,
            color,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Unrotated footprint rectangle centered on `position`.
    pub fn footprint(&self) -> Rect {
        Rect::new(
            self.position.x - self.width / 2.0,
            self.position.y - self.depth / 2.0,
            self.position.x + self.width / 2.0,
            self.position.y + self.depth / 2.0,
        )
    }

    /// Whether `point` falls inside the (unrotated) footprint, inflated by
    /// `tolerance` meters.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.footprint().inflate(tolerance, tolerance).contains(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footprint_centered() {
        let item = Furniture::new(
            "Sofa".to_string(),
            "seating".to_string(),
            Point::new(2.0, 3.0),
            2.0,
            1.0,
            Color::rgb(120, 120, 120),
        );
        let rect = item.footprint();
        assert!((rect.x0 - 1.0).abs() < f64::EPSILON);
        assert!((rect.y0 - 2.5).abs() < f64::EPSILON);
        assert!((rect.x1 - 3.0).abs() < f64::EPSILON);
        assert!((rect.y1 - 3.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hit_test() {
        let item = Furniture::new(
            "Table".to_string(),
            "tables".to_string(),
            Point::ZERO,
            1.0,
            1.0,
            Color::rgb(120, 120, 120),
        );
        assert!(item.hit_test(Point::new(0.4, 0.4), 0.0));
        assert!(!item.hit_test(Point::new(0.8, 0.0), 0.1));
    }
}
