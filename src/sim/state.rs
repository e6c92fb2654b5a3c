//! Run state and per-frame simulation
//!
//! Everything that changes while a run is in progress lives here: the dot,
//! the spot, the hit counter and the RNG used to place the spot.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Interval;
use super::difficulty::Difficulty;
use crate::tuning::{Tuning, TuningError};

/// Which way the dot is travelling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// -1.0 for left, +1.0 for right
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

/// The moving dot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    /// Left edge, always in [0, 1 - width]
    pub position: f32,
    pub width: f32,
    pub direction: Direction,
}

impl Marker {
    fn new(width: f32) -> Self {
        Self {
            position: 0.0,
            width,
            direction: Direction::Right,
        }
    }

    pub fn span(&self) -> Interval {
        Interval::new(self.position, self.width)
    }

    /// Move by `distance` along the track, bouncing off both ends
    ///
    /// The bar is unfolded into a loop of length `2 * travel`: the first half
    /// is the rightward pass, the second half the leftward pass. Folding the
    /// new loop coordinate back gives the exact reflected position for any
    /// distance, including several bounces in one step. A dot landing exactly
    /// on the right end still heads right and turns around on the next step.
    pub fn advance(&mut self, distance: f32) {
        let travel = 1.0 - self.width;
        if travel <= 0.0 {
            self.position = 0.0;
            return;
        }

        let period = 2.0 * travel;
        let phase = match self.direction {
            Direction::Right => self.position,
            Direction::Left => period - self.position,
        };
        let phase = (phase + distance).rem_euclid(period);

        if phase <= travel {
            self.position = phase;
            self.direction = Direction::Right;
        } else {
            self.position = period - phase;
            self.direction = Direction::Left;
        }
        self.position = self.position.clamp(0.0, travel);
    }
}

/// The spot the dot must be stopped in
pub type Target = Interval;

/// Result of a fire attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitOutcome {
    Success,
    Failure,
}

/// State of the current run
#[derive(Debug, Clone)]
pub struct RunState {
    tuning: Tuning,
    /// Seed the RNG was created from
    pub seed: u64,
    rng: Pcg32,
    pub marker: Marker,
    pub target: Target,
    pub difficulty: Difficulty,
    /// Successful hits in this run
    pub hit_count: u64,
}

impl RunState {
    /// Create a run with validated tuning and a dedicated RNG
    ///
    /// Uses `tuning.seed` when set, otherwise `fallback_seed`.
    pub fn new(tuning: Tuning, fallback_seed: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        let seed = tuning.seed.unwrap_or(fallback_seed);
        let difficulty = Difficulty::starting(&tuning);
        let mut state = Self {
            marker: Marker::new(tuning.marker_width),
            target: Target::new(0.0, difficulty.target_width),
            rng: Pcg32::seed_from_u64(seed),
            seed,
            difficulty,
            hit_count: 0,
            tuning,
        };
        state.reset();
        Ok(state)
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Start over: zero hits, starting speed and width, dot at the left end
    pub fn reset(&mut self) {
        self.hit_count = 0;
        self.difficulty = Difficulty::starting(&self.tuning);
        self.marker = Marker::new(self.tuning.marker_width);
        self.place_target();
    }

    /// Advance the dot by one frame
    pub fn advance(&mut self, dt: f32) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        let distance = self.difficulty.speed * dt;
        self.marker.advance(distance);
    }

    /// Whether the dot currently sits fully inside the spot
    pub fn is_on_target(&self) -> bool {
        self.target.contains(&self.marker.span())
    }

    /// Fire: score and ramp difficulty on a hit, leave everything as is on a miss
    pub fn attempt_hit(&mut self) -> HitOutcome {
        if !self.is_on_target() {
            return HitOutcome::Failure;
        }

        self.hit_count += 1;
        self.difficulty = self.difficulty.after_hit(self.tuning.min_target_width);
        self.place_target();
        HitOutcome::Success
    }

    /// Move the spot to a uniform random position with the current width
    fn place_target(&mut self) {
        let width = self.difficulty.target_width;
        let max_start = (1.0 - width).max(0.0);
        let start = self.rng.random_range(0.0..=max_start);
        self.target = Target::new(start, width);
    }
}
