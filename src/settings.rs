//! Session settings and the round difficulty table
//!
//! Loaded from a JSON file when the host provides one; anything missing falls
//! back to the defaults below.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Rounds in a default session
pub const DEFAULT_ROUNDS: usize = 5;

/// Difficulty of one round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundConfig {
    /// Rings to break through
    pub num_rings: usize,
    /// Gap width (degrees)
    pub gap_size: f32,
    /// Ring rotation (degrees per frame)
    pub rotation_speed: f32,
    /// Celebration hold after the winner escapes (seconds)
    pub pause_after: f32,
}

impl RoundConfig {
    /// Round `i` of the escalating table: one more ring, a 5° narrower gap and
    /// 0.1°/frame faster rotation per round
    pub fn escalating(i: usize) -> Self {
        Self {
            num_rings: 5 + i,
            gap_size: (75.0 - i as f32 * 5.0).max(5.0),
            rotation_speed: 0.6 + i as f32 * 0.1,
            pause_after: 0.7,
        }
    }

    /// Default table for `rounds` rounds
    pub fn table(rounds: usize) -> Vec<Self> {
        (0..rounds).map(Self::escalating).collect()
    }
}

/// Session timing and round table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Logical frame rate (frames per second of output video)
    pub fps: u32,
    /// Hook (arena reveal) length in frames; 0 starts play on the first update
    pub hook_frames: u32,
    /// End-card length in frames
    pub endcard_frames: u32,
    /// White flash between rounds (seconds)
    pub flash_secs: f32,
    /// Shortest allowed winner pause (seconds)
    pub min_pause_secs: f32,
    /// Round table, played in order
    pub rounds: Vec<RoundConfig>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fps: 60,
            hook_frames: 0,
            endcard_frames: 90,
            flash_secs: 0.25,
            min_pause_secs: 0.5,
            rounds: RoundConfig::table(DEFAULT_ROUNDS),
        }
    }
}

impl Settings {
    /// Flash length in frames
    pub fn flash_frames(&self) -> u32 {
        (self.fps as f32 * self.flash_secs).round() as u32
    }

    /// Winner pause for `round` in frames, never shorter than the minimum pause
    pub fn pause_frames(&self, round: usize) -> u32 {
        let configured = self
            .rounds
            .get(round)
            .map(|r| (r.pause_after * self.fps as f32).round() as u32)
            .unwrap_or(0);
        let minimum = (self.fps as f32 * self.min_pause_secs).round() as u32;
        configured.max(minimum)
    }

    /// Check everything a session depends on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fps == 0 {
            return Err(ConfigError::ZeroFps);
        }
        if self.rounds.is_empty() {
            return Err(ConfigError::NoRounds);
        }
        for (round, cfg) in self.rounds.iter().enumerate() {
            if cfg.num_rings == 0 {
                return Err(ConfigError::NoRings { round });
            }
            if !(cfg.gap_size > 0.0 && cfg.gap_size <= 360.0) {
                return Err(ConfigError::BadGapSize {
                    round,
                    gap_size: cfg.gap_size,
                });
            }
        }
        Ok(())
    }

    /// Parse settings from JSON
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Bad settings file {}: {e}, using defaults", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read {}: {e}, using defaults", path.display());
                Self::default()
            }
        }
    }
}
