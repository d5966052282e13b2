//! Ring Escape - a deterministic ball-escape battle for short-form video
//!
//! Core modules:
//! - `sim`: Deterministic simulation (rings, balls, collisions, round/phase state machine)
//! - `game`: Host-facing facade driving the simulation frame by frame
//! - `renderer`: CPU rasteriser painting the arena into an RGBA frame buffer
//! - `effects`, `audio`, `texture`: Collaborator seams (visual effects, audio cues, ball icons)
//! - `settings`, `themes`: Data-driven timing, round table and rival rosters

pub mod audio;
pub mod effects;
pub mod error;
pub mod game;
pub mod palette;
pub mod renderer;
pub mod scoreboard;
pub mod settings;
pub mod sim;
pub mod texture;
pub mod themes;

pub use error::ConfigError;
pub use game::{Game, GameConfig, SessionSummary};
pub use palette::Rgb;
pub use scoreboard::Scoreboard;
pub use settings::{RoundConfig, Settings};
pub use themes::{Team, ThemeDatabase};

use glam::Vec2;

/// Simulation constants
pub mod consts {
    /// Hit points every ring starts with
    pub const RING_HP: u8 = 3;
    /// Frames a ring ignores further contact after a bounce
    pub const RING_DEBOUNCE_FRAMES: u64 = 3;
    /// Touch band half-width as a multiple of the ball radius
    pub const CONTACT_MARGIN: f32 = 1.2;

    /// Ring thickness relative to frame height
    pub const RING_THICKNESS_RATIO: f32 = 0.018;
    /// Gap between adjacent rings relative to frame height
    pub const RING_SPACING_RATIO: f32 = 0.014;
    /// Radius inside the innermost ring relative to frame height
    pub const BASE_RADIUS_RATIO: f32 = 0.12;
    /// Ball radius relative to frame height
    pub const BALL_RADIUS_RATIO: f32 = 0.022;
    /// Ball speed (px/frame) relative to frame height
    pub const BALL_SPEED_RATIO: f32 = 0.0085;

    /// Hard cap on ball speed (px/frame)
    pub const MAX_BALL_SPEED: f32 = 25.0;
    /// Speed multiplier applied by a boost
    pub const BOOST_FACTOR: f32 = 1.4;
    /// Bounces against one ring before a ball gets boosted
    pub const BOOST_BOUNCE_THRESHOLD: u32 = 5;
    /// Outward push after a bounce so the ball does not stick in the band
    pub const COLLISION_PUSHBACK: f32 = 4.0;
    /// Frames a ball ignores a ring it just bounced off
    pub const COLLISION_COOLDOWN: u32 = 6;
    /// Universal cooldown after any bounce
    pub const BOUNCE_COOLDOWN: u32 = 5;
    /// Max bounce jitter (radians)
    pub const BOUNCE_JITTER: f32 = 0.05;
    /// Ball trail length (points)
    pub const TRAIL_LENGTH: usize = 15;

    /// Balls per round
    pub const BALLS_PER_ROUND: usize = 2;
    /// Spawn distance of balls from the arena center
    pub const SPAWN_OFFSET: f32 = 55.0;
    /// Angular jitter on spawn placement (radians)
    pub const SPAWN_JITTER: f32 = 0.2;
    /// Distance past the outermost ring a ball must reach to escape
    pub const ESCAPE_MARGIN: f32 = 100.0;
    /// Velocity scale while balls drift during the hook
    pub const HOOK_DRIFT_SCALE: f32 = 0.15;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let a = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if a >= 360.0 { 0.0 } else { a }
}

/// Angle of `pos` around `center`, in degrees [0, 360)
#[inline]
pub fn angle_degrees(pos: Vec2, center: Vec2) -> f32 {
    let d = pos - center;
    normalize_degrees(d.y.atan2(d.x).to_degrees())
}

/// Convert polar (r, theta) around `center` to cartesian
#[inline]
pub fn polar_to_cartesian(center: Vec2, r: f32, theta: f32) -> Vec2 {
    center + Vec2::new(r * theta.cos(), r * theta.sin())
}
