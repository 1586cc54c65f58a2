//! Best-score persistence
//!
//! The only state that survives a run. The engine reads it when a run ends
//! and writes it back if the run beat it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::persistence::{self, StoreError};

/// Persistence collaborator for the best score
pub trait HighScoreStore: Send {
    /// Current best score (0 when nothing was recorded yet)
    fn high_score(&self) -> u64;

    /// Record a new best score.
    ///
    /// Implementations swallow and log their own failures; a broken store
    /// must never end a run.
    fn set_high_score(&mut self, score: u64);
}

/// Volatile store, used by tests and by runs without a save file
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScore {
    best: u64,
}

impl MemoryHighScore {
    pub fn new(best: u64) -> Self {
        Self { best }
    }
}

impl HighScoreStore for MemoryHighScore {
    fn high_score(&self) -> u64 {
        self.best
    }

    fn set_high_score(&mut self, score: u64) {
        self.best = score;
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct HighScoreRecord {
    best: u64,
}

/// High score kept in a JSON file
#[derive(Debug, Clone)]
pub struct JsonHighScoreFile {
    path: PathBuf,
    record: HighScoreRecord,
}

impl JsonHighScoreFile {
    /// Open the store, starting fresh when the file is missing or unreadable
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let record = match persistence::read_json::<HighScoreRecord>(&path) {
            Ok(record) => {
                log::info!("Loaded high score {} from {}", record.best, path.display());
                record
            }
            Err(err) => {
                log::info!("No high score found, starting fresh ({err})");
                HighScoreRecord::default()
            }
        };
        Self { path, record }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<(), StoreError> {
        persistence::write_json(&self.path, &self.record)
    }
}

impl HighScoreStore for JsonHighScoreFile {
    fn high_score(&self) -> u64 {
        self.record.best
    }

    fn set_high_score(&mut self, score: u64) {
        self.record.best = score;
        match self.save() {
            Ok(()) => log::info!("High score {} saved", score),
            Err(err) => log::warn!("Could not save high score: {err}"),
        }
    }
}
