//! Angle constraint for wall-chain drawing.

use kurbo::Point;

use crate::error::ConfigError;
use crate::geometry;

/// Default snap threshold in degrees.
pub const DEFAULT_ANGLE_THRESHOLD_DEG: f64 = 8.0;

/// Snaps in-progress segments onto a configured set of angles.
///
/// Applied after the snap engine, with the chain's last anchor as the pivot.
/// A momentary lock (modifier held) overrides the threshold entirely until
/// released.
#[derive(Debug, Clone)]
pub struct AngleConstraint {
    snap_angles: Vec<f64>,
    threshold_degrees: f64,
    locked: Option<f64>,
}

impl AngleConstraint {
    /// Create a constraint. An empty angle set or non-positive threshold is
    /// a host integration bug and fails fast.
    pub fn new(snap_angles: Vec<f64>, threshold_degrees: f64) -> Result<Self, ConfigError> {
        if snap_angles.is_empty() {
            return Err(ConfigError::EmptySnapAngles);
        }
        if threshold_degrees <= 0.0 || !threshold_degrees.is_finite() {
            return Err(ConfigError::InvalidAngleThreshold(threshold_degrees));
        }
        Ok(Self {
            snap_angles,
            threshold_degrees,
            locked: None,
        })
    }

    /// Nearest configured angle within the threshold, if any.
    fn nearest_snapped(&self, angle: f64) -> Option<f64> {
        self.snap_angles
            .iter()
            .copied()
            .map(|a| (geometry::angle_difference(angle, a), a))
            .filter(|(diff, _)| *diff <= self.threshold_degrees)
            .min_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(_, a)| a)
    }

    /// Constrain `free` relative to `anchor`, preserving the distance.
    ///
    /// Returns `free` unchanged when no configured angle is within the
    /// threshold, or when the segment is degenerate.
    pub fn apply(&self, anchor: Point, free: Point) -> Point {
        let distance = geometry::distance(anchor, free);
        if distance < f64::EPSILON {
            return free;
        }
        let angle = geometry::angle_between(anchor, free);
        let target = match self.locked {
            Some(locked) => locked,
            None => match self.nearest_snapped(angle) {
                Some(snapped) => snapped,
                None => return free,
            },
        };
        let rad = target.to_radians();
        Point::new(
            anchor.x + distance * rad.cos(),
            anchor.y + distance * rad.sin(),
        )
    }

    /// Freeze the constraint at the given angle (snapped to a configured
    /// angle when one is within threshold). Every subsequent `apply` forces
    /// this exact angle until [`AngleConstraint::unlock`].
    pub fn lock(&mut self, angle_degrees: f64) {
        self.locked = Some(self.nearest_snapped(angle_degrees).unwrap_or(angle_degrees));
    }

    /// Release the momentary lock.
    pub fn unlock(&mut self) {
        self.locked = None;
    }

    pub fn is_locked(&self) -> bool {
        self.locked.is_some()
    }

    pub fn locked_angle(&self) -> Option<f64> {
        self.locked
    }
}
