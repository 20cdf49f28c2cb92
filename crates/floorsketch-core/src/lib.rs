//! FloorSketch Core Library
//!
//! Platform-agnostic drafting engine for the FloorSketch floor-plan editor:
//! coordinate transforms, geometric snapping, wall-chain drawing sessions and
//! room detection. Rendering is a consumer concern; the engine only emits
//! data.

pub mod angle;
pub mod camera;
pub mod detect;
pub mod editor;
pub mod elements;
pub mod error;
pub mod geometry;
pub mod input;
pub mod plan;
pub mod session;
pub mod settings;
pub mod snap;

pub use angle::AngleConstraint;
pub use camera::Camera;
pub use detect::{detect_room, DetectedRoom};
pub use editor::{PlanEditor, ToolKind};
pub use elements::{Color, Door, ElementId, ElementKind, Furniture, Room, Wall, Window};
pub use error::ConfigError;
pub use input::{KeyEvent, Modifiers, MouseButton, PointerEvent};
pub use plan::PlanDocument;
pub use session::{CommitOutcome, RejectReason, RoomTool, Segment, SessionState, WallTool};
pub use settings::{Unit, ViewSettings};
pub use snap::{snap, SnapContext, SnapKind, SnapResult};
