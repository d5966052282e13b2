//! Ball entity
//!
//! Balls move in pixels per frame. Per-ring state (bounce counters and
//! cooldowns) is indexed by the ring's slot in the current round and is sized
//! when the round spawns.

use std::collections::VecDeque;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::palette::{self, Rgb};
use crate::texture::IconSlot;

/// A ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Cruising speed (px/frame)
    pub base_speed: f32,
    /// Forced speed multiplier (1.0 = free speed)
    pub speed_multiplier: f32,
    /// Team / rival name (scoreboard key)
    pub team: String,
    pub base_color: Rgb,
    pub color: Rgb,
    /// Search query handed to the icon provider (themed rivals only)
    #[serde(default)]
    pub search_query: Option<String>,
    /// Recent positions, oldest first
    pub trail: VecDeque<Vec2>,
    /// Bounces per ring slot since last gap pass
    pub bounce_counts: Vec<u32>,
    /// Frames remaining before a ring slot can be hit again
    pub ring_cooldowns: Vec<u32>,
    /// Frames remaining on the universal bounce cooldown
    pub bounce_cooldown: u32,
    /// Ring slot of the most recent bounce
    pub last_bounce_ring: Option<usize>,
    pub boosted: bool,
    pub escaped: bool,
    /// Cached icon resolution
    #[serde(skip)]
    pub icon: IconSlot,
}

impl Ball {
    /// Create a ball heading at `heading` radians with `speed` px/frame
    pub fn new(
        pos: Vec2,
        heading: f32,
        speed: f32,
        radius: f32,
        team: impl Into<String>,
        color: Rgb,
        ring_count: usize,
    ) -> Self {
        Self {
            pos,
            vel: Vec2::new(heading.cos(), heading.sin()) * speed,
            radius,
            base_speed: speed,
            speed_multiplier: 1.0,
            team: team.into(),
            base_color: color,
            color,
            search_query: None,
            trail: VecDeque::with_capacity(TRAIL_LENGTH + 1),
            bounce_counts: vec![0; ring_count],
            ring_cooldowns: vec![0; ring_count],
            bounce_cooldown: 0,
            last_bounce_ring: None,
            boosted: false,
            escaped: false,
            icon: IconSlot::default(),
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Rescale velocity to `target` speed, keeping direction
    fn rescale_to(&mut self, target: f32) {
        let speed = self.speed();
        if speed > 0.0 {
            self.vel *= target / speed;
        }
    }

    fn push_trail(&mut self) {
        self.trail.push_back(self.pos);
        while self.trail.len() > TRAIL_LENGTH {
            self.trail.pop_front();
        }
    }

    /// Integrate one frame of motion and tick down cooldowns
    pub fn advance(&mut self) {
        if self.speed_multiplier != 1.0 {
            self.rescale_to(self.base_speed * self.speed_multiplier);
        }

        self.pos += self.vel;

        if self.speed() > MAX_BALL_SPEED {
            self.rescale_to(MAX_BALL_SPEED);
        }

        self.push_trail();

        self.bounce_cooldown = self.bounce_cooldown.saturating_sub(1);
        for cd in &mut self.ring_cooldowns {
            *cd = cd.saturating_sub(1);
        }
    }

    /// Slow visual drift used during the hook (no cooldowns, no collisions)
    pub fn drift(&mut self, scale: f32) {
        self.pos += self.vel * scale;
        self.push_trail();
    }

    /// Reflect off a surface with unit `normal`, then rotate by a small random jitter
    pub fn bounce<R: Rng + ?Sized>(&mut self, normal: Vec2, rng: &mut R) {
        self.vel = super::collision::reflect_velocity(self.vel, normal);
        let jitter = rng.random_range(-BOUNCE_JITTER..BOUNCE_JITTER);
        self.vel = Vec2::from_angle(jitter).rotate(self.vel);
    }

    /// Count a bounce against ring `slot`, boosting on the fifth and starting cooldowns
    pub fn record_bounce(&mut self, slot: usize) {
        if let Some(count) = self.bounce_counts.get_mut(slot) {
            *count += 1;
            if *count >= BOOST_BOUNCE_THRESHOLD && !self.boosted {
                self.apply_boost();
            }
        }
        self.last_bounce_ring = Some(slot);
        self.bounce_cooldown = BOUNCE_COOLDOWN;
        if let Some(cd) = self.ring_cooldowns.get_mut(slot) {
            *cd = COLLISION_COOLDOWN;
        }
    }

    fn apply_boost(&mut self) {
        self.boosted = true;
        self.rescale_to(self.base_speed * BOOST_FACTOR);
        self.color = palette::BOOST;
    }

    /// Drop a boost after passing through a gap
    pub fn reset_speed(&mut self) {
        if self.boosted {
            self.boosted = false;
            self.rescale_to(self.base_speed);
            self.color = self.base_color;
        }
    }

    /// Forget bounces against ring `slot`
    pub fn clear_bounces(&mut self, slot: usize) {
        if let Some(count) = self.bounce_counts.get_mut(slot) {
            *count = 0;
        }
    }

    pub fn is_on_cooldown(&self, slot: usize) -> bool {
        self.ring_cooldowns.get(slot).is_some_and(|&cd| cd > 0)
    }

    /// Speed relative to base speed, capped at 2.0 (drives audio/visual intensity)
    pub fn speed_ratio(&self) -> f32 {
        if self.base_speed > 0.0 {
            (self.speed() / self.base_speed).min(2.0)
        } else {
            1.0
        }
    }
}
