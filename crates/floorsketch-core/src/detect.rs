//! Room detection for closed wall chains.

use kurbo::Point;

use crate::geometry;

/// Minimum area in square meters for a detected room.
///
/// Filters out slivers produced by accidental near-closures.
pub const MIN_ROOM_AREA: f64 = 0.5;

/// A closed region derived from a wall chain, before it becomes a persisted
/// [`crate::elements::Room`].
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedRoom {
    /// Polygon vertices, implicitly closed.
    pub points: Vec<Point>,
    /// Area in square meters.
    pub area: f64,
    /// Vertex mean, for label placement.
    pub centroid: Point,
}

/// Test whether a closed chain of points forms a valid room region.
///
/// Only the single loop the user just closed is considered; latent cycles in
/// the wider wall graph are never searched. Returns `None` for fewer than 3
/// points, for self-intersecting chains, and for regions below
/// [`MIN_ROOM_AREA`].
pub fn detect_room(points: &[Point]) -> Option<DetectedRoom> {
    if points.len() < 3 {
        return None;
    }

    if is_self_intersecting(points) {
        log::debug!("rejecting self-intersecting chain of {} points", points.len());
        return None;
    }

    let area = geometry::polygon_area(points);
    if area < MIN_ROOM_AREA {
        log::debug!("rejecting chain with area {area:.3} m²");
        return None;
    }

    Some(DetectedRoom {
        points: points.to_vec(),
        area,
        centroid: geometry::polygon_centroid(points),
    })
}

/// Whether any two non-adjacent edges of the implicitly closed polygon cross.
fn is_self_intersecting(points: &[Point]) -> bool {
    let n = points.len();
    for i in 0..n {
        let (a1, a2) = (points[i], points[(i + 1) % n]);
        for j in i + 1..n {
            // Adjacent edges share an endpoint and always "intersect" there.
            if j == i || (j + 1) % n == i || (i + 1) % n == j {
                continue;
            }
            let (b1, b2) = (points[j], points[(j + 1) % n]);
            if geometry::segments_intersect(a1, a2, b1, b2) {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_rectangle() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 3.0),
            Point::new(0.0, 3.0),
        ];
        let room = detect_room(&points).expect("rectangle is a room");
        assert!((room.area - 12.0).abs() < 1e-12);
        assert!((room.centroid.x - 2.0).abs() < f64::EPSILON);
        assert!((room.centroid.y - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rejects_too_few_points() {
        let points = [Point::new(0.0, 0.0), Point::new(1.0, 0.0)];
        assert!(detect_room(&points).is_none());
    }

    #[test]
    fn test_rejects_sliver_area() {
        // 1 m x 0.2 m = 0.2 m², below the minimum.
        let points = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 0.2),
            Point::new(0.0, 0.2),
        ];
        assert!(detect_room(&points).is_none());
    }

    #[test]
    fn test_rejects_self_intersecting_chain() {
        // Bowtie: edges (0-1) and (2-3) cross.
        let points = [
            Point::new(0.0, 0.0),
            Point::new(4.0, 4.0),
            Point::new(4.0, 0.0),
            Point::new(0.0, 4.0),
        ];
        assert!(detect_room(&points).is_none());
    }

    #[test]
    fn test_accepts_l_shape() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 2.0),
            Point::new(2.0, 2.0),
            Point::new(2.0, 4.0),
            Point::new(0.0, 4.0),
        ];
        let room = detect_room(&points).expect("L-shape is a room");
        assert!((room.area - 12.0).abs() < 1e-12);
    }
}
