//! Plan editor: translates input events into engine operations.

use kurbo::Point;
use serde::{Deserialize, Serialize};

use crate::angle::{AngleConstraint, DEFAULT_ANGLE_THRESHOLD_DEG};
use crate::camera::Camera;
use crate::elements::{ElementId, ElementKind};
use crate::error::ConfigError;
use crate::input::{KeyEvent, MouseButton, PointerEvent};
use crate::plan::PlanDocument;
use crate::session::{RoomTool, Segment, SessionState, WallTool};
use crate::settings::{self, ViewSettings, DEFAULT_SNAP_ANGLES};
use crate::snap::{self, SnapContext, SnapResult};

/// Screen-space hit-test tolerance for selection, in pixels.
const HIT_TOLERANCE_PX: f64 = 8.0;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Select,
    Pan,
    Wall,
    Room,
}

/// Owns one editing surface: a document, a camera, the active tool and its
/// state. All methods run synchronously on the caller's thread; a separate
/// render step consumes the exposed data.
#[derive(Debug, Clone)]
pub struct PlanEditor {
    pub document: PlanDocument,
    pub camera: Camera,
    pub settings: ViewSettings,
    tool: ToolKind,
    wall_tool: WallTool,
    room_tool: RoomTool,
    /// Currently selected element, if any.
    pub selected: Option<(ElementId, ElementKind)>,
    /// Snap indicator for the most recent pointer position.
    pub last_snap: Option<SnapResult>,
    /// Screen position of an in-progress pan drag.
    panning: Option<Point>,
}

impl PlanEditor {
    /// Create an editor. Settings are validated up front; a bad
    /// configuration is a host bug and fails here, not mid-drawing.
    pub fn new(
        document: PlanDocument,
        camera: Camera,
        settings: ViewSettings,
    ) -> Result<Self, ConfigError> {
        settings.validate()?;
        // With angle snap disabled the constraint is never applied, but the
        // tool still carries one; fall back to the default angle set.
        let angles = if settings.snap_angles.is_empty() {
            DEFAULT_SNAP_ANGLES.to_vec()
        } else {
            settings.snap_angles.clone()
        };
        let constraint = AngleConstraint::new(angles, DEFAULT_ANGLE_THRESHOLD_DEG)?;
        Ok(Self {
            document,
            camera,
            settings,
            tool: ToolKind::default(),
            wall_tool: WallTool::new(constraint),
            room_tool: RoomTool::new(),
            selected: None,
            last_snap: None,
            panning: None,
        })
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    /// Switch tools. An active drawing session is cancelled; committed walls
    /// stay.
    pub fn set_tool(&mut self, tool: ToolKind) {
        if tool != self.tool {
            self.wall_tool.cancel();
            self.room_tool.cancel();
            self.last_snap = None;
            self.tool = tool;
        }
    }

    /// The in-progress wall segment, for preview rendering.
    pub fn pending_segment(&self) -> Option<Segment> {
        self.wall_tool.state.pending().copied()
    }

    /// Session state of the wall tool.
    pub fn session(&self) -> &SessionState {
        &self.wall_tool.state
    }

    /// Vertices collected so far by the room tool.
    pub fn room_points(&self) -> &[Point] {
        self.room_tool.points()
    }

    /// Measurement labels for the pending segment: formatted distance and
    /// angle, e.g. ("3.45 m", "90°").
    pub fn measurement_labels(&self) -> Option<(String, String)> {
        let pending = self.wall_tool.state.pending()?;
        if pending.length() < f64::EPSILON {
            return None;
        }
        Some((
            self.settings.unit.format_distance(pending.length()),
            settings::format_angle(pending.angle_degrees()),
        ))
    }

    /// Feed a pointer event. Events are handled in delivery order.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { position, button } => match button {
                MouseButton::Middle => self.panning = Some(position),
                MouseButton::Left => self.on_left_down(position),
                MouseButton::Right => {}
            },
            PointerEvent::Move { position } => {
                if let Some(last) = self.panning {
                    self.camera.pan(position - last);
                    self.panning = Some(position);
                } else {
                    self.on_pointer_move(position);
                }
            }
            PointerEvent::Up { .. } => {
                self.panning = None;
            }
            PointerEvent::Scroll { position, delta } => {
                let factor = if delta.y > 0.0 { 0.9 } else { 1.1 };
                self.camera.zoom_at(position, factor);
            }
        }
    }

    /// Feed a keyboard event: Escape cancels the active session, Shift holds
    /// the angle lock while pressed.
    pub fn handle_key(&mut self, event: KeyEvent) {
        match event {
            KeyEvent::Pressed(key) => match key.as_str() {
                "Escape" => {
                    self.wall_tool.cancel();
                    self.room_tool.cancel();
                    self.last_snap = None;
                }
                "Shift" => self.wall_tool.hold_angle(),
                _ => {}
            },
            KeyEvent::Released(key) => {
                if key == "Shift" {
                    self.wall_tool.release_angle();
                }
            }
        }
    }

    fn on_left_down(&mut self, position: Point) {
        let world = self.camera.screen_to_world(position);
        let scale = self.camera.scale();
        match self.tool {
            ToolKind::Wall => {
                if self.wall_tool.state.is_active() {
                    self.wall_tool
                        .commit(world, &mut self.document, &self.settings, scale);
                } else {
                    self.wall_tool
                        .begin(world, &self.document, &self.settings, scale);
                }
                self.last_snap = self.wall_tool.last_snap;
            }
            ToolKind::Room => {
                self.room_tool
                    .add_point(world, &mut self.document, &self.settings, scale);
            }
            ToolKind::Select => {
                self.selected = self.hit_test(world);
            }
            ToolKind::Pan => self.panning = Some(position),
        }
    }

    fn on_pointer_move(&mut self, position: Point) {
        let world = self.camera.screen_to_world(position);
        let scale = self.camera.scale();
        match self.tool {
            ToolKind::Wall => {
                if self.wall_tool.state.is_active() {
                    self.wall_tool
                        .update(world, &self.document, &self.settings, scale);
                    self.last_snap = self.wall_tool.last_snap;
                } else {
                    self.last_snap = Some(self.hover_snap(world, scale));
                }
            }
            ToolKind::Room => {
                self.last_snap = Some(self.hover_snap(world, scale));
            }
            ToolKind::Select | ToolKind::Pan => {}
        }
    }

    /// Snap indicator for a hovering pointer, outside any active session.
    fn hover_snap(&self, world: Point, scale: f64) -> SnapResult {
        let session = SessionState::Idle;
        snap::snap(
            world,
            &SnapContext {
                walls: self.document.walls(),
                rooms: self.document.rooms(),
                session: &session,
                settings: &self.settings,
                scale,
            },
        )
    }

    /// Front-to-back hit test: furniture over walls over rooms.
    fn hit_test(&self, world: Point) -> Option<(ElementId, ElementKind)> {
        let tolerance = HIT_TOLERANCE_PX / self.camera.scale();

        if let Some(item) = self
            .document
            .furniture()
            .iter()
            .rev()
            .find(|f| f.hit_test(world, tolerance))
        {
            return Some((item.id(), ElementKind::Furniture));
        }
        if let Some(wall) = self
            .document
            .walls()
            .iter()
            .rev()
            .find(|w| w.hit_test(world, tolerance))
        {
            return Some((wall.id(), ElementKind::Wall));
        }
        if let Some(room) = self
            .document
            .rooms()
            .iter()
            .rev()
            .find(|r| r.contains(world))
        {
            return Some((room.id(), ElementKind::Room));
        }
        None
    }
}
