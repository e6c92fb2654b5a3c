//! Hit detection on the 1-D track
//!
//! The dot only counts as inside the spot when its whole extent is covered.
//! Touching the spot's edge is fine, poking past it by any amount is a miss.

use serde::{Deserialize, Serialize};

/// A closed span `[start, start + width]` on the normalized track
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub start: f32,
    pub width: f32,
}

impl Interval {
    pub fn new(start: f32, width: f32) -> Self {
        Self { start, width }
    }

    /// Right edge of the span
    #[inline]
    pub fn end(&self) -> f32 {
        self.start + self.width
    }

    /// Whether `other` lies entirely inside this span (edges inclusive)
    #[inline]
    pub fn contains(&self, other: &Interval) -> bool {
        marker_within_target(other.start, other.width, self.start, self.width)
    }
}

/// Check whether the marker's span is fully covered by the target's span
///
/// Both intervals are closed, so a marker that exactly spans the target
/// counts as a hit. Partial overlap never does.
#[inline]
pub fn marker_within_target(
    marker_pos: f32,
    marker_width: f32,
    target_pos: f32,
    target_width: f32,
) -> bool {
    marker_pos >= target_pos && marker_pos + marker_width <= target_pos + target_width
}
