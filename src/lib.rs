//! Spot Hit - a one-button timing game
//!
//! A dot bounces along a bar; fire while it sits inside the spot to score.
//! Every hit shrinks the spot and speeds up the dot. A miss ends the run.
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (motion, collision, difficulty)
//! - `game`: Menu/playing/pause state machine driving the simulation
//! - `highscores`: Best-score storage backends
//! - `persistence`: On-disk record format
//! - `platform`: Input edge detection shared by every input source
//! - `tuning`: Data-driven game balance
//! - `settings`: Host preferences loaded from JSON

pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::{Game, GameEvent, GameState, ScoreBoard};
pub use highscores::{FileStore, HighScoreStore, MemoryStore};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Speed multiplier applied after every hit
    pub const SPEED_GROWTH: f32 = 1.025;
    /// Spot width multiplier applied after every hit
    pub const WIDTH_SHRINK: f32 = 0.9;

    /// Starting dot speed (track lengths per second)
    pub const STARTING_SPEED: f32 = 0.5;
    /// Starting spot width (fraction of the track)
    pub const STARTING_TARGET_WIDTH: f32 = 0.5;
    /// Dot width (fraction of the track)
    pub const MARKER_WIDTH: f32 = 0.02;

    /// Default best-score file name
    pub const HIGHSCORE_FILE: &str = "best.score";
}
