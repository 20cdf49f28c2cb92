//! Plan element definitions.

mod door;
mod furniture;
mod room;
mod wall;
mod window;

pub use door::{Door, DoorKind};
pub use furniture::Furniture;
pub use room::{Room, DEFAULT_FLOOR_MATERIAL, ROOM_PALETTE};
pub use wall::{Wall, DEFAULT_WALL_COLOR};
pub use window::{Window, WindowKind};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for any plan element.
pub type ElementId = Uuid;

/// Discriminates element kinds for selection and hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementKind {
    Wall,
    Room,
    Door,
    Window,
    Furniture,
}

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }
}

impl From<peniko::Color> for Color {
    fn from(color: peniko::Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<Color> for peniko::Color {
    fn from(color: Color) -> Self {
        peniko::Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}
