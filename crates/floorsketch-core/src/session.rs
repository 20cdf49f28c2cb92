//! Drawing session state machine for wall chains.

use kurbo::Point;

use crate::angle::AngleConstraint;
use crate::detect;
use crate::elements::{ElementId, DEFAULT_FLOOR_MATERIAL, DEFAULT_WALL_COLOR};
use crate::geometry;
use crate::plan::PlanDocument;
use crate::snap::{self, SnapContext, SnapResult};
use crate::settings::ViewSettings;

/// Minimum committed segment length in meters. Shorter commits are pointer
/// jitter and are silently refused.
pub const MIN_WALL_LENGTH: f64 = 0.1;

/// World-space distance within which a commit closes the chain back onto its
/// first anchor.
pub const CLOSE_TOLERANCE: f64 = 0.3;

/// Per-endpoint tolerance when testing for an already-existing wall.
pub const DUPLICATE_TOLERANCE: f64 = 0.05;

/// A segment of the in-progress chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub fn length(&self) -> f64 {
        geometry::distance(self.start, self.end)
    }

    pub fn angle_degrees(&self) -> f64 {
        geometry::angle_between(self.start, self.end)
    }
}

/// State of an in-progress wall chain.
///
/// A tagged variant rather than nullable flags: a pending segment cannot
/// exist outside an active session.
#[derive(Debug, Clone, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Active {
        /// Vertices committed so far.
        anchors: Vec<Point>,
        /// The segment currently following the pointer.
        pending: Segment,
    },
}

impl SessionState {
    pub fn is_active(&self) -> bool {
        matches!(self, SessionState::Active { .. })
    }

    /// Committed anchors, empty when idle.
    pub fn anchors(&self) -> &[Point] {
        match self {
            SessionState::Idle => &[],
            SessionState::Active { anchors, .. } => anchors,
        }
    }

    /// The segment following the pointer, if a chain is active.
    pub fn pending(&self) -> Option<&Segment> {
        match self {
            SessionState::Idle => None,
            SessionState::Active { pending, .. } => Some(pending),
        }
    }

    /// Angle of the most recently committed segment, available once the
    /// chain has at least two anchors.
    pub fn previous_segment_angle(&self) -> Option<f64> {
        match self {
            SessionState::Active { anchors, .. } if anchors.len() >= 2 => Some(
                geometry::angle_between(anchors[anchors.len() - 2], anchors[anchors.len() - 1]),
            ),
            _ => None,
        }
    }
}

/// Why a commit was refused. Rejections are expected pointer noise, not
/// errors; the session stays active and unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// No active session to commit into.
    SessionIdle,
    /// Segment shorter than [`MIN_WALL_LENGTH`].
    TooShort,
    /// A wall already connects these endpoints.
    DuplicateWall,
}

/// What a commit did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    Rejected(RejectReason),
    /// A wall was created and the chain continues.
    Wall(ElementId),
    /// The chain closed onto its first anchor: a final wall was created, the
    /// session ended, and room detection ran over the anchors.
    Closed {
        wall: ElementId,
        room: Option<ElementId>,
    },
}

/// Drives a wall chain from first click to completion.
///
/// Every point passes through the snap engine and then the angle constraint
/// before it touches the session.
#[derive(Debug, Clone)]
pub struct WallTool {
    pub state: SessionState,
    constraint: AngleConstraint,
    /// Snap result of the most recent pointer, for indicator rendering.
    pub last_snap: Option<SnapResult>,
}

impl WallTool {
    pub fn new(constraint: AngleConstraint) -> Self {
        Self {
            state: SessionState::Idle,
            constraint,
            last_snap: None,
        }
    }

    /// Run a raw world point through snap engine + angle constraint.
    fn resolve(
        &mut self,
        point: Point,
        doc: &PlanDocument,
        settings: &ViewSettings,
        scale: f64,
    ) -> Point {
        let snapped = snap::snap(
            point,
            &SnapContext {
                walls: doc.walls(),
                rooms: doc.rooms(),
                session: &self.state,
                settings,
                scale,
            },
        );
        let mut resolved = snapped.point;
        if settings.angle_snap_enabled {
            if let SessionState::Active { pending, .. } = &self.state {
                resolved = self.constraint.apply(pending.start, resolved);
            }
        }
        self.last_snap = Some(snapped);
        resolved
    }

    /// Start a chain at the given world point. No-op if one is active.
    pub fn begin(
        &mut self,
        point: Point,
        doc: &PlanDocument,
        settings: &ViewSettings,
        scale: f64,
    ) {
        if self.state.is_active() {
            log::debug!("begin ignored: chain already active");
            return;
        }
        let resolved = self.resolve(point, doc, settings, scale);
        self.state = SessionState::Active {
            anchors: vec![resolved],
            pending: Segment {
                start: resolved,
                end: resolved,
            },
        };
    }

    /// Track the pointer: recompute the pending segment's endpoint. No wall
    /// is created. No-op when idle.
    pub fn update(
        &mut self,
        point: Point,
        doc: &PlanDocument,
        settings: &ViewSettings,
        scale: f64,
    ) {
        if !self.state.is_active() {
            return;
        }
        let resolved = self.resolve(point, doc, settings, scale);
        if let SessionState::Active { pending, .. } = &mut self.state {
            pending.end = resolved;
        }
    }

    /// Commit the pending segment at the given point.
    pub fn commit(
        &mut self,
        point: Point,
        doc: &mut PlanDocument,
        settings: &ViewSettings,
        scale: f64,
    ) -> CommitOutcome {
        if !self.state.is_active() {
            return CommitOutcome::Rejected(RejectReason::SessionIdle);
        }
        let resolved = self.resolve(point, doc, settings, scale);

        let (first, start, anchor_count) = match &self.state {
            SessionState::Active { anchors, pending } => {
                (anchors[0], pending.start, anchors.len())
            }
            SessionState::Idle => unreachable!("checked above"),
        };

        if geometry::distance(start, resolved) < MIN_WALL_LENGTH {
            return CommitOutcome::Rejected(RejectReason::TooShort);
        }

        let closing = anchor_count >= 3 && geometry::distance(resolved, first) <= CLOSE_TOLERANCE;
        // The closing wall lands exactly on the first anchor, not merely near it.
        let end = if closing { first } else { resolved };

        if doc.find_wall_between(start, end, DUPLICATE_TOLERANCE).is_some() {
            return CommitOutcome::Rejected(RejectReason::DuplicateWall);
        }

        let Some(wall) = doc.create_wall(
            start,
            end,
            settings.default_wall_thickness,
            settings.default_wall_height,
            DEFAULT_WALL_COLOR,
        ) else {
            return CommitOutcome::Rejected(RejectReason::TooShort);
        };

        if closing {
            let anchors = match std::mem::take(&mut self.state) {
                SessionState::Active { anchors, .. } => anchors,
                SessionState::Idle => Vec::new(),
            };
            let room = detect::detect_room(&anchors)
                .and_then(|detected| doc.create_room(detected.points, None, DEFAULT_FLOOR_MATERIAL));
            self.constraint.unlock();
            log::debug!("chain closed with {} anchors, room: {room:?}", anchors.len());
            CommitOutcome::Closed { wall, room }
        } else {
            if let SessionState::Active { anchors, pending } = &mut self.state {
                anchors.push(resolved);
                *pending = Segment {
                    start: resolved,
                    end: resolved,
                };
            }
            CommitOutcome::Wall(wall)
        }
    }

    /// Abandon the chain, discarding the pending segment. Walls committed
    /// earlier in the session stay in the document.
    pub fn cancel(&mut self) {
        if self.state.is_active() {
            log::debug!("wall chain cancelled");
        }
        self.state = SessionState::Idle;
        self.constraint.unlock();
        self.last_snap = None;
    }

    /// Freeze the current pending angle while a modifier is held.
    pub fn hold_angle(&mut self) {
        if let Some(pending) = self.state.pending() {
            if pending.length() >= f64::EPSILON {
                self.constraint.lock(pending.angle_degrees());
            }
        }
    }

    /// Release the held angle.
    pub fn release_angle(&mut self) {
        self.constraint.unlock();
    }

    pub fn locked_angle(&self) -> Option<f64> {
        self.constraint.locked_angle()
    }
}

/// Explicit room tool: collect polygon vertices click by click, closing when
/// a click lands back on the first vertex.
#[derive(Debug, Clone, Default)]
pub struct RoomTool {
    points: Vec<Point>,
}

impl RoomTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn is_active(&self) -> bool {
        !self.points.is_empty()
    }

    /// Add a vertex. When the point lands within [`CLOSE_TOLERANCE`] of the
    /// first vertex with at least 3 collected, the polygon is closed and a
    /// room is created (subject to room detection's area check).
    pub fn add_point(
        &mut self,
        point: Point,
        doc: &mut PlanDocument,
        settings: &ViewSettings,
        scale: f64,
    ) -> Option<ElementId> {
        let session = SessionState::Idle;
        let snapped = snap::snap(
            point,
            &SnapContext {
                walls: doc.walls(),
                rooms: doc.rooms(),
                session: &session,
                settings,
                scale,
            },
        )
        .point;

        if self.points.len() >= 3
            && geometry::distance(snapped, self.points[0]) <= CLOSE_TOLERANCE
        {
            let points = std::mem::take(&mut self.points);
            return detect::detect_room(&points)
                .and_then(|detected| doc.create_room(detected.points, None, DEFAULT_FLOOR_MATERIAL));
        }

        self.points.push(snapped);
        None
    }

    pub fn cancel(&mut self) {
        self.points.clear();
    }
}
