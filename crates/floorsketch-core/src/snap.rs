//! Multi-strategy point snapping against the existing plan.

use kurbo::Point;

use crate::elements::{ElementId, Room, Wall};
use crate::geometry;
use crate::session::SessionState;
use crate::settings::ViewSettings;

/// Screen-space tolerance for endpoint and midpoint snapping, in pixels.
/// Expressed in pixels so the catch radius feels constant at any zoom.
pub const SNAP_TOLERANCE_PX: f64 = 12.0;

/// Tighter screen-space tolerance for snapping onto the side of a wall.
pub const EXTENSION_TOLERANCE_PX: f64 = 8.0;

/// World-space catch radius for grid snapping, in meters. Deliberately not
/// scaled by zoom: the grid is an absolute lattice.
pub const GRID_TOLERANCE: f64 = 0.15;

/// Angular tolerance for parallel alignment (0.1 rad).
pub const PARALLEL_TOLERANCE_DEG: f64 = 0.1 * (180.0 / std::f64::consts::PI);

/// Angular tolerance for perpendicular alignment (0.15 rad).
pub const PERPENDICULAR_TOLERANCE_DEG: f64 = 0.15 * (180.0 / std::f64::consts::PI);

/// Why a candidate point was adjusted.
///
/// Ordered by priority: precise alignment to existing structure always beats
/// looser alignment to the abstract grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapKind {
    #[default]
    None,
    Grid,
    Perpendicular,
    Parallel,
    WallExtension,
    WallMidpoint,
    WallEndpoint,
}

impl SnapKind {
    /// Short label for the on-screen snap indicator.
    pub fn label(self) -> &'static str {
        match self {
            SnapKind::None => "",
            SnapKind::Grid => "grid",
            SnapKind::Perpendicular => "perpendicular",
            SnapKind::Parallel => "parallel",
            SnapKind::WallExtension => "on wall",
            SnapKind::WallMidpoint => "midpoint",
            SnapKind::WallEndpoint => "endpoint",
        }
    }
}

/// Result of a snap query. Recomputed on every pointer move, never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResult {
    /// The adjusted point.
    pub point: Point,
    /// Which rule fired.
    pub kind: SnapKind,
    /// Wall that produced the snap, for indicator highlighting.
    pub source_wall: Option<ElementId>,
    /// Exact angle in degrees for parallel/perpendicular snaps.
    pub angle_degrees: Option<f64>,
}

impl SnapResult {
    /// A result that leaves the candidate unchanged.
    pub fn none(point: Point) -> Self {
        Self {
            point,
            kind: SnapKind::None,
            source_wall: None,
            angle_degrees: None,
        }
    }

    pub fn is_snapped(&self) -> bool {
        self.kind != SnapKind::None
    }
}

/// Everything the snap engine reads. Borrowed per query; the engine holds no
/// state of its own.
pub struct SnapContext<'a> {
    pub walls: &'a [Wall],
    pub rooms: &'a [Room],
    pub session: &'a SessionState,
    pub settings: &'a ViewSettings,
    /// Current camera scale in pixels per meter, for tolerance conversion.
    pub scale: f64,
}

/// Snap a candidate world point against the drawing context.
///
/// Strategies are evaluated in priority order; the first hit wins, with
/// closest-distance tie-breaking inside each strategy.
pub fn snap(candidate: Point, ctx: &SnapContext) -> SnapResult {
    if !ctx.settings.snap_enabled {
        return SnapResult::none(candidate);
    }

    let tolerance = SNAP_TOLERANCE_PX / ctx.scale;
    let extension_tolerance = EXTENSION_TOLERANCE_PX / ctx.scale;

    snap_to_endpoints(candidate, ctx, tolerance)
        .or_else(|| snap_to_midpoints(candidate, ctx, tolerance))
        .or_else(|| snap_to_wall_side(candidate, ctx, extension_tolerance))
        .or_else(|| snap_parallel(candidate, ctx))
        .or_else(|| snap_perpendicular(candidate, ctx))
        .or_else(|| snap_to_grid(candidate, ctx.settings.grid_size))
        .unwrap_or_else(|| SnapResult::none(candidate))
}

/// Wall endpoints and room corners. Highest priority: prevents gaps at
/// corners.
fn snap_to_endpoints(candidate: Point, ctx: &SnapContext, tolerance: f64) -> Option<SnapResult> {
    let mut best: Option<(f64, Point, Option<ElementId>)> = None;
    let mut consider = |point: Point, source: Option<ElementId>| {
        let dist = geometry::distance(candidate, point);
        if dist <= tolerance && best.is_none_or(|(d, _, _)| dist < d) {
            best = Some((dist, point, source));
        }
    };

    for wall in ctx.walls {
        consider(wall.start, Some(wall.id()));
        consider(wall.end, Some(wall.id()));
    }
    for room in ctx.rooms {
        for &corner in &room.points {
            consider(corner, None);
        }
    }

    best.map(|(_, point, source_wall)| SnapResult {
        point,
        kind: SnapKind::WallEndpoint,
        source_wall,
        angle_degrees: None,
    })
}

/// Wall midpoints, for T-junctions.
fn snap_to_midpoints(candidate: Point, ctx: &SnapContext, tolerance: f64) -> Option<SnapResult> {
    let mut best: Option<(f64, Point, ElementId)> = None;
    for wall in ctx.walls {
        let mid = wall.midpoint();
        let dist = geometry::distance(candidate, mid);
        if dist <= tolerance && best.is_none_or(|(d, _, _)| dist < d) {
            best = Some((dist, mid, wall.id()));
        }
    }
    best.map(|(_, point, id)| SnapResult {
        point,
        kind: SnapKind::WallMidpoint,
        source_wall: Some(id),
        angle_degrees: None,
    })
}

/// Perpendicular projection onto a wall's segment, so a new wall can start
/// flush against the side of an existing one.
fn snap_to_wall_side(candidate: Point, ctx: &SnapContext, tolerance: f64) -> Option<SnapResult> {
    let mut best: Option<(f64, Point, ElementId)> = None;
    for wall in ctx.walls {
        let projected = geometry::project_onto_segment(candidate, wall.start, wall.end);
        let dist = geometry::distance(candidate, projected);
        if dist <= tolerance && best.is_none_or(|(d, _, _)| dist < d) {
            best = Some((dist, projected, wall.id()));
        }
    }
    best.map(|(_, point, id)| SnapResult {
        point,
        kind: SnapKind::WallExtension,
        source_wall: Some(id),
        angle_degrees: None,
    })
}

/// Rotate the in-progress segment onto the exact angle of a nearly-parallel
/// existing wall (or its reciprocal), preserving the distance from the
/// anchor.
fn snap_parallel(candidate: Point, ctx: &SnapContext) -> Option<SnapResult> {
    let anchor = ctx.session.pending()?.start;
    let distance = geometry::distance(anchor, candidate);
    if distance < f64::EPSILON {
        return None;
    }
    let angle = geometry::angle_between(anchor, candidate);

    let mut best: Option<(f64, f64, ElementId)> = None;
    for wall in ctx.walls {
        let wall_angle = wall.angle_degrees();
        for target in [wall_angle, (wall_angle + 180.0) % 360.0] {
            let diff = geometry::angle_difference(angle, target);
            if diff <= PARALLEL_TOLERANCE_DEG && best.is_none_or(|(d, _, _)| diff < d) {
                best = Some((diff, target, wall.id()));
            }
        }
    }

    best.map(|(_, target, id)| {
        let rad = target.to_radians();
        SnapResult {
            point: Point::new(
                anchor.x + distance * rad.cos(),
                anchor.y + distance * rad.sin(),
            ),
            kind: SnapKind::Parallel,
            source_wall: Some(id),
            angle_degrees: Some(target),
        }
    })
}

/// Snap onto the exact perpendicular of the previous chain segment. Needs at
/// least two committed anchors.
fn snap_perpendicular(candidate: Point, ctx: &SnapContext) -> Option<SnapResult> {
    let previous_angle = ctx.session.previous_segment_angle()?;
    let anchor = ctx.session.pending()?.start;
    let distance = geometry::distance(anchor, candidate);
    if distance < f64::EPSILON {
        return None;
    }
    let angle = geometry::angle_between(anchor, candidate);

    let mut best: Option<(f64, f64)> = None;
    for target in [
        (previous_angle + 90.0) % 360.0,
        (previous_angle + 270.0) % 360.0,
    ] {
        let diff = geometry::angle_difference(angle, target);
        if diff <= PERPENDICULAR_TOLERANCE_DEG && best.is_none_or(|(d, _)| diff < d) {
            best = Some((diff, target));
        }
    }

    best.map(|(_, target)| {
        let rad = target.to_radians();
        SnapResult {
            point: Point::new(
                anchor.x + distance * rad.cos(),
                anchor.y + distance * rad.sin(),
            ),
            kind: SnapKind::Perpendicular,
            source_wall: None,
            angle_degrees: Some(target),
        }
    })
}

/// Round to the nearest grid intersection, accepted only within the fixed
/// world-space catch radius.
fn snap_to_grid(candidate: Point, grid_size: f64) -> Option<SnapResult> {
    let snapped = Point::new(
        (candidate.x / grid_size).round() * grid_size,
        (candidate.y / grid_size).round() * grid_size,
    );
    if geometry::distance(candidate, snapped) <= GRID_TOLERANCE {
        Some(SnapResult {
            point: snapped,
            kind: SnapKind::Grid,
            source_wall: None,
            angle_degrees: None,
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::DEFAULT_WALL_COLOR;
    use crate::session::Segment;

    const SCALE: f64 = 50.0;

    fn wall(start: Point, end: Point) -> Wall {
        Wall::new(start, end, 0.15, 2.8, DEFAULT_WALL_COLOR)
    }

    fn ctx<'a>(
        walls: &'a [Wall],
        session: &'a SessionState,
        settings: &'a ViewSettings,
    ) -> SnapContext<'a> {
        SnapContext {
            walls,
            rooms: &[],
            session,
            settings,
            scale: SCALE,
        }
    }

    fn active_session(anchors: Vec<Point>) -> SessionState {
        let last = *anchors.last().unwrap();
        SessionState::Active {
            anchors,
            pending: Segment {
                start: last,
                end: last,
            },
        }
    }

    #[test]
    fn test_disabled_returns_candidate() {
        let mut settings = ViewSettings::default();
        settings.snap_enabled = false;
        let walls = [wall(Point::ZERO, Point::new(4.0, 0.0))];
        let session = SessionState::Idle;

        let candidate = Point::new(0.01, 0.01);
        let result = snap(candidate, &ctx(&walls, &session, &settings));
        assert_eq!(result.kind, SnapKind::None);
        assert_eq!(result.point, candidate);
    }

    #[test]
    fn test_endpoint_beats_grid() {
        // Both the wall endpoint at the origin and the grid point at the
        // origin are in range; the endpoint rule must win.
        let settings = ViewSettings::default();
        let walls = [wall(Point::ZERO, Point::new(4.0, 0.0))];
        let session = SessionState::Idle;

        let result = snap(Point::new(0.05, 0.05), &ctx(&walls, &session, &settings));
        assert_eq!(result.kind, SnapKind::WallEndpoint);
        assert_eq!(result.point, Point::ZERO);
        assert_eq!(result.source_wall, Some(walls[0].id()));
    }

    #[test]
    fn test_endpoint_picks_closest() {
        let settings = ViewSettings::default();
        let walls = [
            wall(Point::ZERO, Point::new(4.0, 0.0)),
            wall(Point::new(0.1, 0.1), Point::new(4.0, 4.0)),
        ];
        let session = SessionState::Idle;

        let result = snap(Point::new(0.08, 0.08), &ctx(&walls, &session, &settings));
        assert_eq!(result.kind, SnapKind::WallEndpoint);
        assert_eq!(result.point, Point::new(0.1, 0.1));
    }

    #[test]
    fn test_midpoint_snap() {
        let settings = ViewSettings::default();
        let walls = [wall(Point::ZERO, Point::new(4.0, 0.0))];
        let session = SessionState::Idle;

        let result = snap(Point::new(2.05, 0.1), &ctx(&walls, &session, &settings));
        assert_eq!(result.kind, SnapKind::WallMidpoint);
        assert_eq!(result.point, Point::new(2.0, 0.0));
    }

    #[test]
    fn test_wall_side_projection() {
        let settings = ViewSettings::default();
        let walls = [wall(Point::ZERO, Point::new(4.0, 0.0))];
        let session = SessionState::Idle;

        // 1 m along the wall, 10 cm off its side: inside the extension
        // tolerance (8 px / 50 px/m = 16 cm) but far from endpoints and
        // midpoint, and off-grid.
        let result = snap(Point::new(1.1, 0.1), &ctx(&walls, &session, &settings));
        assert_eq!(result.kind, SnapKind::WallExtension);
        assert!((result.point.x - 1.1).abs() < 1e-9);
        assert!(result.point.y.abs() < 1e-9);
    }

    #[test]
    fn test_parallel_alignment() {
        let settings = ViewSettings::default();
        // Existing wall at exactly 30°, outside the configured angle set.
        let angle = 30.0_f64.to_radians();
        let walls = [wall(
            Point::new(10.0, 10.0),
            Point::new(10.0 + 4.0 * angle.cos(), 10.0 + 4.0 * angle.sin()),
        )];
        let session = active_session(vec![Point::ZERO]);

        // Candidate ~2° off the wall's direction from the anchor.
        let off = 32.0_f64.to_radians();
        let candidate = Point::new(3.0 * off.cos(), 3.0 * off.sin());
        let result = snap(candidate, &ctx(&walls, &session, &settings));
        assert_eq!(result.kind, SnapKind::Parallel);
        assert!((result.angle_degrees.unwrap() - 30.0).abs() < 1e-9);
        // Distance from anchor preserved.
        assert!((geometry::distance(Point::ZERO, result.point) - 3.0).abs() < 1e-9);
        let snapped_angle = geometry::angle_between(Point::ZERO, result.point);
        assert!((snapped_angle - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_parallel_reciprocal_direction() {
        let settings = ViewSettings::default();
        let angle = 30.0_f64.to_radians();
        let walls = [wall(
            Point::new(10.0, 10.0),
            Point::new(10.0 + 4.0 * angle.cos(), 10.0 + 4.0 * angle.sin()),
        )];
        let session = active_session(vec![Point::ZERO]);

        // Candidate heading the opposite way, ~208°.
        let off = 208.0_f64.to_radians();
        let candidate = Point::new(3.0 * off.cos(), 3.0 * off.sin());
        let result = snap(candidate, &ctx(&walls, &session, &settings));
        assert_eq!(result.kind, SnapKind::Parallel);
        assert!((result.angle_degrees.unwrap() - 210.0).abs() < 1e-9);
    }

    #[test]
    fn test_perpendicular_needs_two_anchors() {
        let settings = ViewSettings::default();
        let walls: [Wall; 0] = [];

        // Previous segment runs at 30°; candidate ~3° off its perpendicular.
        let first = Point::ZERO;
        let second = Point::new(4.0 * 30.0_f64.to_radians().cos(), 4.0 * 30.0_f64.to_radians().sin());
        let session = active_session(vec![first, second]);

        let off = 123.0_f64.to_radians();
        let candidate = Point::new(
            second.x + 2.0 * off.cos(),
            second.y + 2.0 * off.sin(),
        );
        let result = snap(candidate, &ctx(&walls, &session, &settings));
        assert_eq!(result.kind, SnapKind::Perpendicular);
        assert!((result.angle_degrees.unwrap() - 120.0).abs() < 1e-9);

        // With only one anchor there is no previous segment to be
        // perpendicular to.
        let session = active_session(vec![first]);
        let result = snap(candidate, &ctx(&walls, &session, &settings));
        assert_ne!(result.kind, SnapKind::Perpendicular);
    }

    #[test]
    fn test_grid_snap_within_catch_radius() {
        let settings = ViewSettings::default();
        let walls: [Wall; 0] = [];
        let session = SessionState::Idle;

        let result = snap(Point::new(0.54, 1.02), &ctx(&walls, &session, &settings));
        assert_eq!(result.kind, SnapKind::Grid);
        assert!((result.point.x - 0.5).abs() < 1e-9);
        assert!((result.point.y - 1.0).abs() < 1e-9);

        // Mid-cell, outside the 15 cm radius: unchanged.
        let candidate = Point::new(0.25, 0.25);
        let result = snap(candidate, &ctx(&walls, &session, &settings));
        assert_eq!(result.kind, SnapKind::None);
        assert_eq!(result.point, candidate);
    }

    #[test]
    fn test_room_corner_counts_as_endpoint() {
        let settings = ViewSettings::default();
        let walls: [Wall; 0] = [];
        let rooms = [Room::new(
            "Room 1".to_string(),
            vec![
                Point::new(6.0, 6.0),
                Point::new(8.0, 6.0),
                Point::new(8.0, 8.0),
            ],
            crate::elements::ROOM_PALETTE[0],
            "ceramic".to_string(),
        )];
        let session = SessionState::Idle;
        let ctx = SnapContext {
            walls: &walls,
            rooms: &rooms,
            session: &session,
            settings: &settings,
            scale: SCALE,
        };

        let result = snap(Point::new(6.05, 6.05), &ctx);
        assert_eq!(result.kind, SnapKind::WallEndpoint);
        assert_eq!(result.point, Point::new(6.0, 6.0));
        assert_eq!(result.source_wall, None);
    }
}
