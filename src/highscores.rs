//! Best score storage
//!
//! A single number survives between runs: the most spots ever hit in one run.
//! Loading never fails; a missing or unreadable record counts as zero.
//! Saving reports errors but the caller decides what to do with them.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::persistence::{StoreError, decode_record, encode_record};

/// Somewhere the best score can be kept
pub trait HighScoreStore {
    /// Read the stored best score, or 0 if there is none
    fn load(&self) -> u64;

    /// Overwrite the stored best score
    fn save(&mut self, score: u64) -> Result<(), StoreError>;
}

/// Best score kept in a local file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Option<u64>, StoreError> {
        match fs::read(&self.path) {
            Ok(bytes) => decode_record(&bytes).map(Some),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

impl HighScoreStore for FileStore {
    fn load(&self) -> u64 {
        match self.read() {
            Ok(Some(score)) => {
                log::info!("Loaded best score {} from {}", score, self.path.display());
                score
            }
            Ok(None) => {
                log::info!("No best score found, starting fresh");
                0
            }
            Err(err) => {
                log::warn!(
                    "Ignoring unreadable best score at {}: {}",
                    self.path.display(),
                    err
                );
                0
            }
        }
    }

    /// Write to a temp file then rename over the record
    fn save(&mut self, score: u64) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, encode_record(score))?;
        fs::rename(&tmp, &self.path)?;
        log::info!("Best score {} saved to {}", score, self.path.display());
        Ok(())
    }
}

/// Best score kept in memory only (tests, headless hosts)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    score: Option<u64>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that already holds a score
    pub fn with_score(score: u64) -> Self {
        Self {
            score: Some(score),
            saves: 0,
        }
    }

    /// Value last saved, if any
    pub fn stored(&self) -> Option<u64> {
        self.score
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> u64 {
        self.score.unwrap_or(0)
    }

    fn save(&mut self, score: u64) -> Result<(), StoreError> {
        self.score = Some(score);
        self.saves += 1;
        Ok(())
    }
}

/// Best score kept in browser LocalStorage
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    const STORAGE_KEY: &'static str = "spot_hit_best";

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScoreStore for LocalStorageStore {
    fn load(&self) -> u64 {
        let Some(storage) = Self::storage() else {
            log::info!("LocalStorage unavailable, best score starts at 0");
            return 0;
        };

        match storage.get_item(Self::STORAGE_KEY) {
            Ok(Some(text)) => match text.parse::<u64>() {
                Ok(score) => {
                    log::info!("Loaded best score {}", score);
                    score
                }
                Err(_) => {
                    log::warn!("{}", StoreError::BadValue(text));
                    0
                }
            },
            _ => {
                log::info!("No best score found, starting fresh");
                0
            }
        }
    }

    fn save(&mut self, score: u64) -> Result<(), StoreError> {
        let storage = Self::storage().ok_or(StoreError::Unavailable)?;
        storage
            .set_item(Self::STORAGE_KEY, &score.to_string())
            .map_err(|_| StoreError::Unavailable)?;
        log::info!("Best score {} saved", score);
        Ok(())
    }
}
