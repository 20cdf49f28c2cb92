//! Camera module for the world/screen transform.

use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Minimum allowed scale in pixels per meter.
pub const MIN_SCALE: f64 = 5.0;
/// Maximum allowed scale in pixels per meter.
pub const MAX_SCALE: f64 = 200.0;
/// Default scale: 50 px per meter reads comfortably on a desktop display.
pub const DEFAULT_SCALE: f64 = 50.0;

/// Camera manages the view transform for the plan surface.
///
/// World coordinates are meters with Y growing "north" and the origin at the
/// center of the surface; screen coordinates are pixels with Y growing
/// downward. The transform is
/// `screen = (x * scale + offset.x + w/2, -y * scale + offset.y + h/2)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// Pixels per world meter. Always within [`MIN_SCALE`, `MAX_SCALE`].
    scale: f64,
    /// Pan translation in pixels.
    pub offset: Vec2,
    /// Render-surface size in pixels.
    pub viewport: Size,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            offset: Vec2::ZERO,
            viewport: Size::ZERO,
        }
    }
}

impl Camera {
    /// Create a camera at the given scale.
    ///
    /// Fails fast on a non-positive scale; that is a host integration bug,
    /// not a drawing-time condition.
    pub fn new(scale: f64, viewport: Size) -> Result<Self, ConfigError> {
        if scale <= 0.0 || !scale.is_finite() {
            return Err(ConfigError::InvalidScale(scale));
        }
        Ok(Self {
            scale: scale.clamp(MIN_SCALE, MAX_SCALE),
            offset: Vec2::ZERO,
            viewport,
        })
    }

    /// Current scale in pixels per meter.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Set the scale, clamped to the sane range.
    pub fn set_scale(&mut self, scale: f64) -> Result<(), ConfigError> {
        if scale <= 0.0 || !scale.is_finite() {
            return Err(ConfigError::InvalidScale(scale));
        }
        self.scale = scale.clamp(MIN_SCALE, MAX_SCALE);
        Ok(())
    }

    /// Convert a world point (meters, Y-up) to screen pixels (Y-down).
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point::new(
            world.x * self.scale + self.offset.x + self.viewport.width / 2.0,
            -world.y * self.scale + self.offset.y + self.viewport.height / 2.0,
        )
    }

    /// Convert a screen point in pixels to world meters. Exact inverse of
    /// [`Camera::world_to_screen`].
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.offset.x - self.viewport.width / 2.0) / self.scale,
            -(screen.y - self.offset.y - self.viewport.height / 2.0) / self.scale,
        )
    }

    /// Pan the camera by a delta in screen pixels.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Zoom by a factor, keeping the given screen point fixed.
    pub fn zoom_at(&mut self, screen_point: Point, factor: f64) {
        let new_scale = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
        if (new_scale - self.scale).abs() < f64::EPSILON {
            return;
        }

        let world_point = self.screen_to_world(screen_point);
        self.scale = new_scale;

        // Adjust offset so world_point stays under the cursor.
        let new_screen = self.world_to_screen(world_point);
        self.offset += Vec2::new(
            screen_point.x - new_screen.x,
            screen_point.y - new_screen.y,
        );
    }

    /// Reset pan and zoom to defaults.
    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
        self.scale = DEFAULT_SCALE;
    }
}
