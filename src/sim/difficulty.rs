//! Difficulty ramp
//!
//! Each hit makes the dot 2.5% faster and the spot 10% narrower. There is no
//! cap on speed. The spot width only stops shrinking when a floor is tuned.

use serde::{Deserialize, Serialize};

use crate::consts::{SPEED_GROWTH, WIDTH_SHRINK};
use crate::tuning::Tuning;

/// Current dot speed and spot width
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    pub speed: f32,
    pub target_width: f32,
}

impl Difficulty {
    /// Values at the start of a run
    pub fn starting(tuning: &Tuning) -> Self {
        Self {
            speed: tuning.starting_speed,
            target_width: tuning.starting_target_width,
        }
    }

    /// Values after one more hit
    pub fn after_hit(self, min_target_width: Option<f32>) -> Self {
        let mut target_width = self.target_width * WIDTH_SHRINK;
        if let Some(min) = min_target_width {
            target_width = target_width.max(min);
        }
        Self {
            speed: self.speed * SPEED_GROWTH,
            target_width,
        }
    }
}
