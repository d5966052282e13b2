//! Construction-time errors
//!
//! Everything after `Game::new` degrades to a fallback instead of failing, so
//! this is the only error a host has to handle.

use std::fmt;

/// Invalid session configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Frame width or height is zero
    EmptyFrame { width: u32, height: u32 },
    /// Frame rate is zero
    ZeroFps,
    /// Round table has no entries
    NoRounds,
    /// A round spawns no rings
    NoRings { round: usize },
    /// A round's gap size is outside (0, 360] degrees
    BadGapSize { round: usize, gap_size: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyFrame { width, height } => {
                write!(f, "frame size must be non-zero, got {width}x{height}")
            }
            ConfigError::ZeroFps => write!(f, "frame rate must be non-zero"),
            ConfigError::NoRounds => write!(f, "round table is empty"),
            ConfigError::NoRings { round } => {
                write!(f, "round {} has no rings", round + 1)
            }
            ConfigError::BadGapSize { round, gap_size } => write!(
                f,
                "round {} gap size {gap_size} is outside (0, 360]",
                round + 1
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
