//! Frame-stepped simulation module
//!
//! All gameplay logic lives here:
//! - Positions and widths are fractions of the track, in [0, 1]
//! - Each run owns its seeded RNG
//! - No rendering, storage or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod state;
pub mod tick;

pub use collision::{Interval, marker_within_target};
pub use difficulty::Difficulty;
pub use state::{Direction, HitOutcome, Marker, RunState, Target};
pub use tick::{TickInput, tick};
