//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One frame per tick
//! - Seeded RNG only
//! - Stable iteration order (ring slot, roster order)
//! - No rendering, audio or I/O

pub mod ball;
pub mod collision;
pub mod ring;
pub mod round;
pub mod state;
pub mod tick;

pub use ball::Ball;
pub use collision::{Resolution, contain_stray, reflect_velocity, resolve_ball};
pub use ring::{Contact, Ring};
pub use round::{detect_escape, ring_color, spawn_round};
pub use state::{ArenaGeometry, GameEvent, GamePhase, GameState, HOOK_TEXTS};
pub use tick::tick;
