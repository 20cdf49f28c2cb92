//! View settings and display formatting.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default wall-chain snap angles in degrees.
pub const DEFAULT_SNAP_ANGLES: [f64; 8] = [0.0, 45.0, 90.0, 135.0, 180.0, 225.0, 270.0, 315.0];

/// Display unit for measurement labels.
///
/// The engine always computes in meters; units only affect formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Unit {
    #[default]
    Meters,
    Centimeters,
    Feet,
}

impl Unit {
    /// Conversion factor from meters to this unit.
    pub fn per_meter(self) -> f64 {
        match self {
            Unit::Meters => 1.0,
            Unit::Centimeters => 100.0,
            Unit::Feet => 3.28084,
        }
    }

    /// Unit suffix for labels.
    pub fn suffix(self) -> &'static str {
        match self {
            Unit::Meters => "m",
            Unit::Centimeters => "cm",
            Unit::Feet => "ft",
        }
    }

    /// Format a distance in meters for on-screen labels, e.g. "3.45 m".
    pub fn format_distance(self, meters: f64) -> String {
        format!("{:.2} {}", meters * self.per_meter(), self.suffix())
    }
}

/// Format an angle in degrees for on-screen labels, e.g. "90°".
pub fn format_angle(degrees: f64) -> String {
    format!("{}°", degrees.round() as i64)
}

/// Read-only configuration surface for the drafting engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewSettings {
    /// Grid cell size in meters.
    pub grid_size: f64,
    /// Master switch for the snap engine.
    pub snap_enabled: bool,
    /// Whether wall-chain angle snapping is applied.
    pub angle_snap_enabled: bool,
    /// Angles (degrees) the wall chain snaps to.
    pub snap_angles: Vec<f64>,
    /// Display unit for measurement labels.
    pub unit: Unit,
    /// Whether the host should render the grid.
    pub show_grid: bool,
    /// Whether the host should render measurement labels.
    pub show_measurements: bool,
    /// Thickness for newly drawn walls, meters.
    pub default_wall_thickness: f64,
    /// Height for newly drawn walls, meters.
    pub default_wall_height: f64,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            grid_size: 0.5,
            snap_enabled: true,
            angle_snap_enabled: true,
            snap_angles: DEFAULT_SNAP_ANGLES.to_vec(),
            unit: Unit::Meters,
            show_grid: true,
            show_measurements: true,
            default_wall_thickness: 0.15,
            default_wall_height: 2.8,
        }
    }
}

impl ViewSettings {
    /// Fail fast on configurations that indicate a host integration bug.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size <= 0.0 || !self.grid_size.is_finite() {
            return Err(ConfigError::InvalidGridSize(self.grid_size));
        }
        if self.angle_snap_enabled && self.snap_angles.is_empty() {
            return Err(ConfigError::EmptySnapAngles);
        }
        if self.default_wall_thickness <= 0.0 || self.default_wall_height <= 0.0 {
            return Err(ConfigError::InvalidWallDefaults {
                thickness: self.default_wall_thickness,
                height: self.default_wall_height,
            });
        }
        Ok(())
    }
}
