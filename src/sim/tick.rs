//! One playing frame
//!
//! Resolves the fire input against the dot's current position, then moves
//! the dot. Menu and pause handling live in [`crate::game`].

use super::state::{HitOutcome, RunState};

/// Input edges for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Fire pressed since the last frame (key/click/tap)
    pub fire: bool,
    /// Pause pressed since the last frame
    pub pause: bool,
}

/// Advance a run in progress by one frame
///
/// Returns the outcome when the frame carried a fire input. The dot is only
/// moved if the run is still alive afterwards.
pub fn tick(state: &mut RunState, input: &TickInput, dt: f32) -> Option<HitOutcome> {
    let outcome = input.fire.then(|| state.attempt_hit());

    if outcome != Some(HitOutcome::Failure) {
        state.advance(dt);
    }

    outcome
}
