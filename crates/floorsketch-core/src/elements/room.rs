//! Room polygon element.

use super::{Color, ElementId};
use crate::geometry;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default floor material for new rooms.
pub const DEFAULT_FLOOR_MATERIAL: &str = "ceramic";

/// Fill colors cycled through for consecutively created rooms.
pub const ROOM_PALETTE: [Color; 6] = [
    Color::rgb(201, 169, 98),
    Color::rgb(98, 155, 201),
    Color::rgb(120, 201, 98),
    Color::rgb(201, 98, 130),
    Color::rgb(160, 120, 201),
    Color::rgb(201, 140, 85),
];

/// A closed polygonal room.
///
/// `points` are the polygon vertices in order; the last implicitly connects
/// back to the first. `area` is derived from the vertices and kept in sync
/// by [`Room::set_points`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub(crate) id: ElementId,
    /// Display name, e.g. "Room 3".
    pub name: String,
    /// Polygon vertices in world meters, >= 3, implicitly closed.
    pub points: Vec<Point>,
    /// Fill color.
    pub color: Color,
    /// Floor material name.
    pub floor_material: String,
    /// Area in square meters, derived from `points`.
    area: f64,
}

impl Room {
    /// Create a room, deriving the area from the vertices.
    pub fn new(name: String, points: Vec<Point>, color: Color, floor_material: String) -> Self {
        let area = geometry::polygon_area(&points);
        Self {
            id: Uuid::new_v4(),
            name,
            points,
            color,
            floor_material,
            area,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Area in square meters.
    pub fn area(&self) -> f64 {
        self.area
    }

    /// Replace the vertices and recompute the area.
    pub fn set_points(&mut self, points: Vec<Point>) {
        self.area = geometry::polygon_area(&points);
        self.points = points;
    }

    /// Vertex mean, used for label placement.
    pub fn centroid(&self) -> Point {
        geometry::polygon_centroid(&self.points)
    }

    /// Whether `point` lies inside the room polygon.
    pub fn contains(&self, point: Point) -> bool {
        geometry::point_in_polygon(point, &self.points)
    }
}
