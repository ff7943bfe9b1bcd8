//! Run settings and difficulty presets
//!
//! Persisted as JSON next to the high-score file. A missing or unreadable
//! file is not an error: defaults are used and a warning is logged.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::ENEMY_BULLET_CAP;

/// Difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    Lunatic,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
            Difficulty::Lunatic => "Lunatic",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "norm" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            "lunatic" => Some(Difficulty::Lunatic),
            _ => None,
        }
    }

    pub fn starting_lives(&self) -> u8 {
        match self {
            Difficulty::Easy => 4,
            Difficulty::Normal | Difficulty::Hard => 3,
            Difficulty::Lunatic => 2,
        }
    }

    pub fn starting_bombs(&self) -> u8 {
        match self {
            Difficulty::Easy => 4,
            Difficulty::Normal => 3,
            Difficulty::Hard | Difficulty::Lunatic => 2,
        }
    }
}

/// Settings for a headless run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: Difficulty,
    /// Fixed RNG seed; `None` picks a fresh one per run
    pub seed: Option<u64>,
    /// Enemy bullet cap, oldest dropped first
    pub bullet_cap: usize,
    /// Where the best score is kept
    pub high_score_path: PathBuf,
    /// Length of an autopilot session (ticks)
    pub autopilot_ticks: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            seed: None,
            bullet_cap: ENEMY_BULLET_CAP,
            high_score_path: PathBuf::from("danmaku_highscore.json"),
            // Five minutes at 60 ticks per second
            autopilot_ticks: 18_000,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::info!("No settings at {} ({e}), using defaults", path.display());
                return Self::default();
            }
        };
        match serde_json::from_str(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring malformed settings in {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON. Failures are logged, not returned.
    pub fn save(&self, path: &Path) {
        let json = match serde_json::to_string_pretty(self) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not encode settings: {e}");
                return;
            }
        };
        match fs::write(path, json) {
            Ok(()) => log::info!("Settings saved to {}", path.display()),
            Err(e) => log::warn!("Could not save settings to {}: {e}", path.display()),
        }
    }
}
