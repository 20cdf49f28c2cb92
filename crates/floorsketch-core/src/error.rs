//! Configuration-time error types.

use thiserror::Error;

/// Host integration errors caught at configuration time.
///
/// Geometric edge cases (degenerate segments, near-zero walls) are never
/// errors; the engine resolves them to safe defaults. Only misconfiguration
/// fails fast.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("scale must be positive pixels per meter, got {0}")]
    InvalidScale(f64),

    #[error("grid size must be positive meters, got {0}")]
    InvalidGridSize(f64),

    #[error("angle snapping is enabled but the snap angle set is empty")]
    EmptySnapAngles,

    #[error("angle snap threshold must be positive degrees, got {0}")]
    InvalidAngleThreshold(f64),

    #[error("default wall dimensions must be positive, got thickness {thickness} height {height}")]
    InvalidWallDefaults { thickness: f64, height: f64 },
}
