//! Data-driven game balance
//!
//! Starting values for the dot and the spot. Loaded as part of
//! [`Settings`](crate::Settings) and checked once at startup.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay constants for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Dot speed at the start of a run (track lengths per second)
    pub starting_speed: f32,
    /// Spot width at the start of a run (fraction of the track)
    pub starting_target_width: f32,
    /// Dot width (fraction of the track, may be zero)
    pub marker_width: f32,
    /// Optional floor for the spot width. `None` lets it shrink forever.
    pub min_target_width: Option<f32>,
    /// Fixed RNG seed. `None` picks a fresh seed per process.
    pub seed: Option<u64>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            starting_speed: STARTING_SPEED,
            starting_target_width: STARTING_TARGET_WIDTH,
            marker_width: MARKER_WIDTH,
            min_target_width: None,
            seed: None,
        }
    }
}

/// Rejected tuning values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TuningError {
    /// Starting speed is zero, negative or not finite
    StartingSpeed(f32),
    /// Starting spot width is outside (0, 1]
    StartingTargetWidth(f32),
    /// Dot width is outside [0, 1)
    MarkerWidth(f32),
    /// Dot is wider than the starting spot, so no hit is possible
    MarkerWiderThanTarget { marker: f32, target: f32 },
    /// Width floor is outside (0, starting width]
    MinTargetWidth(f32),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StartingSpeed(v) => write!(f, "starting speed must be positive, got {v}"),
            Self::StartingTargetWidth(v) => {
                write!(f, "starting target width must be in (0, 1], got {v}")
            }
            Self::MarkerWidth(v) => write!(f, "marker width must be in [0, 1), got {v}"),
            Self::MarkerWiderThanTarget { marker, target } => write!(
                f,
                "marker width {marker} exceeds starting target width {target}"
            ),
            Self::MinTargetWidth(v) => write!(
                f,
                "minimum target width must be in (0, starting target width], got {v}"
            ),
        }
    }
}

impl std::error::Error for TuningError {}

impl Tuning {
    /// Check every value so the run never starts with degenerate geometry
    pub fn validate(&self) -> Result<(), TuningError> {
        let speed = self.starting_speed;
        if !speed.is_finite() || speed <= 0.0 {
            return Err(TuningError::StartingSpeed(speed));
        }

        let width = self.starting_target_width;
        if !width.is_finite() || width <= 0.0 || width > 1.0 {
            return Err(TuningError::StartingTargetWidth(width));
        }

        let marker = self.marker_width;
        if !marker.is_finite() || !(0.0..1.0).contains(&marker) {
            return Err(TuningError::MarkerWidth(marker));
        }
        if marker > width {
            return Err(TuningError::MarkerWiderThanTarget {
                marker,
                target: width,
            });
        }

        if let Some(min) = self.min_target_width {
            if !min.is_finite() || min <= 0.0 || min > width {
                return Err(TuningError::MinTargetWidth(min));
            }
        }

        Ok(())
    }
}
