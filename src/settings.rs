//! Host settings and preferences
//!
//! Read from an optional JSON file at startup. Every field has a default,
//! so a partial file only overrides what it names.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::HIGHSCORE_FILE;
use crate::game::GameState;
use crate::tuning::{Tuning, TuningError};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Gameplay balance
    pub tuning: Tuning,

    /// Where the best score is kept
    pub highscore_path: PathBuf,
    /// Screen shown first
    pub start_state: GameState,

    // === Terminal host ===
    /// Frame rate cap
    pub max_fps: u32,
    /// Width of the drawn track in terminal cells
    pub track_cells: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tuning: Tuning::default(),
            highscore_path: PathBuf::from(HIGHSCORE_FILE),
            start_state: GameState::MainMenu,
            max_fps: 60,
            track_cells: 60,
        }
    }
}

/// Why settings could not be loaded
#[derive(Debug)]
pub enum SettingsError {
    Io(io::Error),
    Parse(serde_json::Error),
    Tuning(TuningError),
    MaxFps(u32),
    TrackCells(u16),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "cannot read settings: {err}"),
            Self::Parse(err) => write!(f, "invalid settings JSON: {err}"),
            Self::Tuning(err) => write!(f, "invalid tuning: {err}"),
            Self::MaxFps(v) => write!(f, "max_fps must be positive, got {v}"),
            Self::TrackCells(v) => write!(f, "track_cells must be at least 10, got {v}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Tuning(err) => Some(err),
            _ => None,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON text
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json).map_err(SettingsError::Parse)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a file, or use defaults when no file is given
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Ok(Self::default());
        };

        let json = fs::read_to_string(path).map_err(SettingsError::Io)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reject values the game cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.tuning.validate().map_err(SettingsError::Tuning)?;
        if self.max_fps == 0 {
            return Err(SettingsError::MaxFps(self.max_fps));
        }
        if self.track_cells < 10 {
            return Err(SettingsError::TrackCells(self.track_cells));
        }
        Ok(())
    }

    /// Pretty JSON for writing a settings template
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
