//! Plan document: the authoritative store of walls, rooms and fittings.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::elements::{
    Color, Door, ElementId, Furniture, Room, Wall, Window, ROOM_PALETTE,
};
use crate::geometry;

/// Maximum number of undo states to keep.
const MAX_UNDO_HISTORY: usize = 50;

/// A snapshot of document state for undo/redo.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PlanSnapshot {
    walls: Vec<Wall>,
    rooms: Vec<Room>,
    doors: Vec<Door>,
    windows: Vec<Window>,
    furniture: Vec<Furniture>,
    room_counter: usize,
}

/// A floor-plan document.
///
/// Owned explicitly by the host and passed into the engine's entry points;
/// there is no global instance. All mutation happens synchronously on the
/// calling thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanDocument {
    /// Unique document identifier.
    pub id: String,
    /// Document name.
    pub name: String,
    walls: Vec<Wall>,
    rooms: Vec<Room>,
    doors: Vec<Door>,
    windows: Vec<Window>,
    furniture: Vec<Furniture>,
    /// Running count used to name auto-detected rooms.
    room_counter: usize,
    #[serde(skip)]
    undo_stack: Vec<PlanSnapshot>,
    #[serde(skip)]
    redo_stack: Vec<PlanSnapshot>,
}

impl Default for PlanDocument {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

impl PlanDocument {
    /// Create a new empty document.
    pub fn new(name: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            walls: Vec::new(),
            rooms: Vec::new(),
            doors: Vec::new(),
            windows: Vec::new(),
            furniture: Vec::new(),
            room_counter: 0,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn doors(&self) -> &[Door] {
        &self.doors
    }

    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    pub fn furniture(&self) -> &[Furniture] {
        &self.furniture
    }

    pub fn wall(&self, id: ElementId) -> Option<&Wall> {
        self.walls.iter().find(|w| w.id() == id)
    }

    pub fn room(&self, id: ElementId) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id() == id)
    }

    pub fn room_mut(&mut self, id: ElementId) -> Option<&mut Room> {
        self.rooms.iter_mut().find(|r| r.id() == id)
    }

    /// Create a wall and return its id.
    ///
    /// Degenerate walls (`start == end`) are refused; that is expected
    /// pointer noise, not an error.
    pub fn create_wall(
        &mut self,
        start: Point,
        end: Point,
        thickness: f64,
        height: f64,
        color: Color,
    ) -> Option<ElementId> {
        if geometry::distance(start, end) < f64::EPSILON {
            log::debug!("refusing zero-length wall at {start:?}");
            return None;
        }
        self.push_undo();
        let wall = Wall::new(start, end, thickness, height, color);
        let id = wall.id();
        self.walls.push(wall);
        Some(id)
    }

    /// Create a room from polygon points and return its id.
    ///
    /// The room gets a running "Room N" name. When `color` is `None` one is
    /// picked round-robin from [`ROOM_PALETTE`] so consecutive rooms stay
    /// visually distinct. Fewer than 3 points are refused.
    pub fn create_room(
        &mut self,
        points: Vec<Point>,
        color: Option<Color>,
        floor_material: &str,
    ) -> Option<ElementId> {
        if points.len() < 3 {
            log::debug!("refusing room with {} points", points.len());
            return None;
        }
        self.push_undo();
        self.room_counter += 1;
        let color = color.unwrap_or(ROOM_PALETTE[(self.room_counter - 1) % ROOM_PALETTE.len()]);
        let room = Room::new(
            format!("Room {}", self.room_counter),
            points,
            color,
            floor_material.to_string(),
        );
        let id = room.id();
        log::debug!("created {} with area {:.2} m²", room.name, room.area());
        self.rooms.push(room);
        Some(id)
    }

    /// Add a pre-built door. The referenced wall is not validated; a door on
    /// a since-deleted wall is simply skipped by consumers.
    pub fn add_door(&mut self, door: Door) -> ElementId {
        self.push_undo();
        let id = door.id();
        self.doors.push(door);
        id
    }

    /// Add a pre-built window.
    pub fn add_window(&mut self, window: Window) -> ElementId {
        self.push_undo();
        let id = window.id();
        self.windows.push(window);
        id
    }

    /// Add a furniture item.
    pub fn add_furniture(&mut self, item: Furniture) -> ElementId {
        self.push_undo();
        let id = item.id();
        self.furniture.push(item);
        id
    }

    /// Remove a wall. Doors and windows anchored to it are left in place;
    /// consumers resolve the dangling reference lazily and skip.
    pub fn remove_wall(&mut self, id: ElementId) -> Option<Wall> {
        let pos = self.walls.iter().position(|w| w.id() == id)?;
        self.push_undo();
        Some(self.walls.remove(pos))
    }

    pub fn remove_room(&mut self, id: ElementId) -> Option<Room> {
        let pos = self.rooms.iter().position(|r| r.id() == id)?;
        self.push_undo();
        Some(self.rooms.remove(pos))
    }

    pub fn remove_door(&mut self, id: ElementId) -> Option<Door> {
        let pos = self.doors.iter().position(|d| d.id() == id)?;
        self.push_undo();
        Some(self.doors.remove(pos))
    }

    pub fn remove_window(&mut self, id: ElementId) -> Option<Window> {
        let pos = self.windows.iter().position(|w| w.id() == id)?;
        self.push_undo();
        Some(self.windows.remove(pos))
    }

    pub fn remove_furniture(&mut self, id: ElementId) -> Option<Furniture> {
        let pos = self.furniture.iter().position(|f| f.id() == id)?;
        self.push_undo();
        Some(self.furniture.remove(pos))
    }

    /// Find a wall connecting `a` and `b` in either direction, each endpoint
    /// within `tolerance` meters.
    pub fn find_wall_between(&self, a: Point, b: Point, tolerance: f64) -> Option<ElementId> {
        self.walls
            .iter()
            .find(|w| w.connects(a, b, tolerance))
            .map(Wall::id)
    }

    /// Check if the document holds no elements.
    pub fn is_empty(&self) -> bool {
        self.walls.is_empty()
            && self.rooms.is_empty()
            && self.doors.is_empty()
            && self.windows.is_empty()
            && self.furniture.is_empty()
    }

    fn snapshot(&self) -> PlanSnapshot {
        PlanSnapshot {
            walls: self.walls.clone(),
            rooms: self.rooms.clone(),
            doors: self.doors.clone(),
            windows: self.windows.clone(),
            furniture: self.furniture.clone(),
            room_counter: self.room_counter,
        }
    }

    fn restore(&mut self, snapshot: PlanSnapshot) {
        self.walls = snapshot.walls;
        self.rooms = snapshot.rooms;
        self.doors = snapshot.doors;
        self.windows = snapshot.windows;
        self.furniture = snapshot.furniture;
        self.room_counter = snapshot.room_counter;
    }

    /// Push current state to the undo stack (called before every mutation).
    fn push_undo(&mut self) {
        self.undo_stack.push(self.snapshot());
        self.redo_stack.clear();
        if self.undo_stack.len() > MAX_UNDO_HISTORY {
            self.undo_stack.remove(0);
        }
    }

    /// Undo the last change. Returns false if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        if let Some(snapshot) = self.undo_stack.pop() {
            let current = self.snapshot();
            self.redo_stack.push(current);
            self.restore(snapshot);
            true
        } else {
            false
        }
    }

    /// Redo the last undone change. Returns false if there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        if let Some(snapshot) = self.redo_stack.pop() {
            let current = self.snapshot();
            self.undo_stack.push(current);
            self.restore(snapshot);
            true
        } else {
            false
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
