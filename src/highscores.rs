//! High score persistence
//!
//! The simulation never touches storage. The host loads the best score into
//! `GameState::new` and calls [`record_final_score`] once a run has ended.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::sim::GameState;

/// Storage backend for the single best score
pub trait HighScoreStore {
    /// Best score so far; 0 when nothing is stored
    fn load(&self) -> u64;
    fn save(&mut self, score: u64);
}

/// On-disk format
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
struct HighScoreFile {
    high_score: u64,
}

/// JSON file store
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&self) -> u64 {
        let Ok(json) = fs::read_to_string(&self.path) else {
            log::info!("No high score found, starting fresh");
            return 0;
        };
        match serde_json::from_str::<HighScoreFile>(&json) {
            Ok(file) => {
                log::info!("Loaded high score {}", file.high_score);
                file.high_score
            }
            Err(e) => {
                log::warn!("Ignoring unreadable high score file {}: {e}", self.path.display());
                0
            }
        }
    }

    fn save(&mut self, score: u64) {
        let json = match serde_json::to_string(&HighScoreFile { high_score: score }) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not encode high score: {e}");
                return;
            }
        };
        match fs::write(&self.path, json) {
            Ok(()) => log::info!("High score {score} saved"),
            Err(e) => log::warn!("Could not save high score to {}: {e}", self.path.display()),
        }
    }
}

/// In-memory store for tests and hosts without storage
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryStore {
    pub value: u64,
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> u64 {
        self.value
    }

    fn save(&mut self, score: u64) {
        self.value = score;
    }
}

/// Save the run's score if the run is over and it beats the stored best.
/// Returns whether a new record was written.
pub fn record_final_score(store: &mut impl HighScoreStore, state: &GameState) -> bool {
    if !state.status.is_finished() {
        return false;
    }
    let score = state.player.score;
    if score <= store.load() {
        return false;
    }
    store.save(score);
    true
}
