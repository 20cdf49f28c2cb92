//! Pure geometry helpers shared by the snap engine and room detection.

use kurbo::Point;

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    (b - a).hypot()
}

/// Closest point on the segment `[a, b]` to `p`, clamped to the segment.
///
/// A degenerate segment (`a == b`) returns `a`.
pub fn project_onto_segment(p: Point, a: Point, b: Point) -> Point {
    let seg = b - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return a;
    }
    let t = ((p - a).dot(seg) / len_sq).clamp(0.0, 1.0);
    Point::new(a.x + t * seg.x, a.y + t * seg.y)
}

/// Distance from `p` to the segment `[a, b]`.
pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    distance(p, project_onto_segment(p, a, b))
}

/// Area of a polygon via the shoelace formula (implicitly closed).
///
/// Returns 0 for fewer than 3 points.
pub fn polygon_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..points.len() {
        let j = (i + 1) % points.len();
        sum += points[i].x * points[j].y;
        sum -= points[j].x * points[i].y;
    }
    sum.abs() / 2.0
}

/// Arithmetic mean of the vertices.
///
/// Not the area-weighted centroid, but sufficient for label placement.
/// Returns the origin for an empty slice.
pub fn polygon_centroid(points: &[Point]) -> Point {
    if points.is_empty() {
        return Point::ZERO;
    }
    let sum = points
        .iter()
        .fold((0.0, 0.0), |(x, y), p| (x + p.x, y + p.y));
    let n = points.len() as f64;
    Point::new(sum.0 / n, sum.1 / n)
}

/// Angle of the direction from `a` to `b`, in degrees normalized to [0, 360).
pub fn angle_between(a: Point, b: Point) -> f64 {
    let angle = (b.y - a.y).atan2(b.x - a.x).to_degrees();
    if angle < 0.0 { angle + 360.0 } else { angle }
}

/// Smallest absolute difference between two angles in degrees, in [0, 180].
pub fn angle_difference(a: f64, b: f64) -> f64 {
    let diff = (a - b).rem_euclid(360.0);
    if diff > 180.0 { 360.0 - diff } else { diff }
}

/// Test whether the segments `[a1, a2]` and `[b1, b2]` intersect.
///
/// Uses the cross-product orientation test; collinear overlaps count as
/// intersections, shared endpoints do as well.
pub fn segments_intersect(a1: Point, a2: Point, b1: Point, b2: Point) -> bool {
    fn orient(p: Point, q: Point, r: Point) -> f64 {
        (q.x - p.x) * (r.y - p.y) - (q.y - p.y) * (r.x - p.x)
    }
    fn on_segment(p: Point, q: Point, r: Point) -> bool {
        r.x >= p.x.min(q.x) && r.x <= p.x.max(q.x) && r.y >= p.y.min(q.y) && r.y <= p.y.max(q.y)
    }

    let d1 = orient(b1, b2, a1);
    let d2 = orient(b1, b2, a2);
    let d3 = orient(a1, a2, b1);
    let d4 = orient(a1, a2, b2);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    (d1 == 0.0 && on_segment(b1, b2, a1))
        || (d2 == 0.0 && on_segment(b1, b2, a2))
        || (d3 == 0.0 && on_segment(a1, a2, b1))
        || (d4 == 0.0 && on_segment(a1, a2, b2))
}

/// Even-odd point-in-polygon test (implicitly closed polygon).
pub fn point_in_polygon(p: Point, points: &[Point]) -> bool {
    if points.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (pi, pj) = (points[i], points[j]);
        if (pi.y > p.y) != (pj.y > p.y)
            && p.x < (pj.x - pi.x) * (p.y - pi.y) / (pj.y - pi.y) + pi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let d = distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0));
        assert!((d - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_projection_clamps_to_segment() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(4.0, 0.0);

        let mid = project_onto_segment(Point::new(2.0, 3.0), a, b);
        assert!((mid.x - 2.0).abs() < f64::EPSILON);
        assert!((mid.y - 0.0).abs() < f64::EPSILON);

        // Beyond the end is clamped to the endpoint, not the infinite line.
        let past = project_onto_segment(Point::new(7.0, 1.0), a, b);
        assert!((past.x - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_projection_degenerate_segment() {
        let a = Point::new(1.0, 1.0);
        let p = project_onto_segment(Point::new(5.0, 5.0), a, a);
        assert_eq!(p, a);
    }

    #[test]
    fn test_distance_to_segment() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(4.0, 0.0);
        let d = distance_to_segment(Point::new(2.0, 3.0), a, b);
        assert!((d - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_polygon_area_unit_square() {
        let square = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ];
        assert!((polygon_area(&square) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_polygon_area_triangle() {
        let triangle = [
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(0.0, 3.0),
        ];
        assert!((polygon_area(&triangle) - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_polygon_area_degenerate() {
        assert_eq!(polygon_area(&[]), 0.0);
        assert_eq!(polygon_area(&[Point::ZERO, Point::new(1.0, 0.0)]), 0.0);
    }

    #[test]
    fn test_polygon_centroid() {
        let square = [
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(2.0, 2.0),
            Point::new(0.0, 2.0),
        ];
        let c = polygon_centroid(&square);
        assert!((c.x - 1.0).abs() < f64::EPSILON);
        assert!((c.y - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_angle_between_normalized() {
        let origin = Point::ZERO;
        assert!((angle_between(origin, Point::new(1.0, 0.0)) - 0.0).abs() < 1e-9);
        assert!((angle_between(origin, Point::new(0.0, 1.0)) - 90.0).abs() < 1e-9);
        assert!((angle_between(origin, Point::new(-1.0, 0.0)) - 180.0).abs() < 1e-9);
        // atan2 would give -90 here; normalization brings it into [0, 360).
        assert!((angle_between(origin, Point::new(0.0, -1.0)) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_angle_difference_wraps() {
        assert!((angle_difference(350.0, 10.0) - 20.0).abs() < 1e-9);
        assert!((angle_difference(10.0, 350.0) - 20.0).abs() < 1e-9);
        assert!((angle_difference(90.0, 270.0) - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_segments_intersect_crossing() {
        assert!(segments_intersect(
            Point::new(0.0, 0.0),
            Point::new(4.0, 4.0),
            Point::new(0.0, 4.0),
            Point::new(4.0, 0.0),
        ));
    }

    #[test]
    fn test_segments_intersect_disjoint() {
        assert!(!segments_intersect(
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(1.0, 1.0),
        ));
    }

    #[test]
    fn test_segments_intersect_shared_endpoint() {
        assert!(segments_intersect(
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(2.0, 2.0),
        ));
    }

    #[test]
    fn test_point_in_polygon() {
        let square = [
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 4.0),
            Point::new(0.0, 4.0),
        ];
        assert!(point_in_polygon(Point::new(2.0, 2.0), &square));
        assert!(!point_in_polygon(Point::new(5.0, 2.0), &square));
    }
}
