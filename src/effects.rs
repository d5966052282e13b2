//! Visual effect sink
//!
//! Particles, shake and bloom belong to the host. The game only reports where
//! and how strong; every call is fire-and-forget.

use glam::Vec2;

use crate::palette::Rgb;

/// Receiver for visual effect requests
pub trait EffectSink {
    /// Particle burst at `pos`
    fn explosion(&mut self, pos: Vec2, color: Rgb, count: u32);
    /// Glow dot behind a moving ball
    fn trail_point(&mut self, pos: Vec2, color: Rgb);
    /// Add screen-shake trauma in [0, 1]
    fn shake(&mut self, trauma: f32);
    /// Full-screen white flash
    fn flash(&mut self, strength: f32);
    /// Confetti dropped from `pos`
    fn confetti(&mut self, pos: Vec2, count: u32);
}

/// Discards every effect
#[derive(Debug, Default, Clone, Copy)]
pub struct NullEffects;

impl EffectSink for NullEffects {
    fn explosion(&mut self, _pos: Vec2, _color: Rgb, _count: u32) {}
    fn trail_point(&mut self, _pos: Vec2, _color: Rgb) {}
    fn shake(&mut self, _trauma: f32) {}
    fn flash(&mut self, _strength: f32) {}
    fn confetti(&mut self, _pos: Vec2, _count: u32) {}
}
