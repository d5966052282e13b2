//! Rotating ring with a single gap
//!
//! A ring is an annulus between `radius - thickness` and `radius` around the
//! arena center. Its gap is an angular window (degrees) that turns with the
//! ring. Angles follow screen convention: 0° points right, 90° points down.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{CONTACT_MARGIN, RING_DEBOUNCE_FRAMES, RING_HP};
use crate::palette::Rgb;
use crate::{angle_degrees, normalize_degrees};

/// Result of testing a ball against a ring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Ball is not touching the ring (or the ring is debouncing)
    None,
    /// Ball touched solid ring and should reflect
    Bounce,
    /// Ball touched the ring inside its gap
    Gap,
}

/// A rotating ring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ring {
    /// Outer radius (px)
    pub radius: f32,
    /// Radial thickness (px), inner edge at `radius - thickness`
    pub thickness: f32,
    /// Gap start before rotation (degrees)
    pub gap_angle: f32,
    /// Gap width (degrees)
    pub gap_size: f32,
    /// Current rotation offset (degrees, [0, 360))
    pub rotation: f32,
    /// Degrees per frame
    pub rotation_speed: f32,
    pub hp: u8,
    pub max_hp: u8,
    pub alive: bool,
    pub base_color: Rgb,
    /// Damage-faded color
    pub color: Rgb,
    /// Frame of the last bounce against this ring
    pub last_collision_frame: Option<u64>,
}

impl Ring {
    pub fn new(
        radius: f32,
        thickness: f32,
        gap_angle: f32,
        gap_size: f32,
        rotation_speed: f32,
        color: Rgb,
    ) -> Self {
        Self {
            radius,
            thickness,
            gap_angle: normalize_degrees(gap_angle),
            gap_size,
            rotation: 0.0,
            rotation_speed,
            hp: RING_HP,
            max_hp: RING_HP,
            alive: true,
            base_color: color,
            color,
            last_collision_frame: None,
        }
    }

    #[inline]
    pub fn inner_radius(&self) -> f32 {
        self.radius - self.thickness
    }

    #[inline]
    pub fn outer_radius(&self) -> f32 {
        self.radius
    }

    /// Advance rotation by one frame
    pub fn update(&mut self) {
        self.rotation = normalize_degrees(self.rotation + self.rotation_speed);
    }

    /// Current gap start (degrees, [0, 360))
    #[inline]
    pub fn gap_start(&self) -> f32 {
        normalize_degrees(self.gap_angle + self.rotation)
    }

    /// Check if an angle (degrees) falls in the gap window `[start, start + size)`
    pub fn is_in_gap(&self, angle: f32) -> bool {
        if self.gap_size >= 360.0 {
            return true;
        }
        if self.gap_size <= 0.0 {
            return false;
        }
        let angle = normalize_degrees(angle);
        let start = self.gap_start();
        let end = start + self.gap_size;

        if end <= 360.0 {
            angle >= start && angle < end
        } else {
            // Window crosses 0°
            angle >= start || angle < end - 360.0
        }
    }

    /// Test a ball against this ring
    ///
    /// The ball touches the ring when its center lies within
    /// `ball_radius * 1.2` of either edge. Bounces are debounced per ring for a
    /// few frames so one contact does not trigger twice.
    pub fn check_collision(
        &mut self,
        ball_pos: Vec2,
        ball_radius: f32,
        center: Vec2,
        frame: u64,
    ) -> Contact {
        if self
            .last_collision_frame
            .is_some_and(|last| frame.saturating_sub(last) < RING_DEBOUNCE_FRAMES)
        {
            return Contact::None;
        }

        let dist = (ball_pos - center).length();
        let margin = ball_radius * CONTACT_MARGIN;
        let inner = self.inner_radius();
        let outer = self.outer_radius();

        let at_inner = dist > inner - margin && dist < inner + margin;
        let at_outer = dist > outer - margin && dist < outer + margin;
        if !(at_inner || at_outer) {
            return Contact::None;
        }

        if self.is_in_gap(angle_degrees(ball_pos, center)) {
            Contact::Gap
        } else {
            self.last_collision_frame = Some(frame);
            Contact::Bounce
        }
    }

    /// Remove one hit point. Returns true if this destroyed the ring.
    pub fn take_damage(&mut self) -> bool {
        if !self.alive {
            return false;
        }
        self.hp = self.hp.saturating_sub(1);
        if self.hp == 0 {
            self.alive = false;
            return true;
        }
        self.color = self
            .base_color
            .scaled(self.hp as f32 / self.max_hp as f32);
        false
    }

    /// Outward radial unit normal at the ball position
    pub fn bounce_normal(&self, ball_pos: Vec2, center: Vec2) -> Vec2 {
        let d = ball_pos - center;
        let dist = d.length();
        if dist > 0.0 { d / dist } else { Vec2::new(0.0, -1.0) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polar_to_cartesian;
    use proptest::prelude::*;

    fn ring(gap_angle: f32, gap_size: f32) -> Ring {
        Ring::new(200.0, 20.0, gap_angle, gap_size, 0.0, Rgb::new(90, 150, 240))
    }

    #[test]
    fn test_gap_boundary_half_open() {
        let r = ring(0.0, 60.0);
        assert!(r.is_in_gap(0.0));
        assert!(r.is_in_gap(30.0));
        assert!(r.is_in_gap(59.99));
        assert!(!r.is_in_gap(60.0));
        assert!(!r.is_in_gap(180.0));
        assert!(!r.is_in_gap(359.9));
    }

    #[test]
    fn test_gap_wraparound() {
        let r = ring(350.0, 20.0);
        assert!(r.is_in_gap(5.0));
        assert!(r.is_in_gap(350.0));
        assert!(r.is_in_gap(359.5));
        assert!(r.is_in_gap(0.0));
        assert!(!r.is_in_gap(10.0));
        assert!(!r.is_in_gap(349.0));
        assert!(!r.is_in_gap(180.0));
    }

    #[test]
    fn test_gap_follows_rotation() {
        let mut r = ring(0.0, 60.0);
        r.rotation_speed = 90.0;
        r.update();
        assert!(!r.is_in_gap(30.0));
        assert!(r.is_in_gap(120.0));
        for _ in 0..3 {
            r.update();
        }
        assert_eq!(r.rotation, 0.0);
        assert!(r.is_in_gap(30.0));
    }

    #[test]
    fn test_full_gap_covers_everything() {
        let r = ring(123.0, 360.0);
        assert!(r.is_in_gap(0.0));
        assert!(r.is_in_gap(122.0));
    }

    #[test]
    fn test_check_collision_bounce_and_debounce() {
        let mut r = ring(0.0, 60.0);
        let center = Vec2::new(360.0, 640.0);
        // At the outer edge, 180° is solid
        let pos = polar_to_cartesian(center, 200.0, std::f32::consts::PI);

        assert_eq!(r.check_collision(pos, 10.0, center, 10), Contact::Bounce);
        assert_eq!(r.last_collision_frame, Some(10));
        assert_eq!(r.check_collision(pos, 10.0, center, 11), Contact::None);
        assert_eq!(r.check_collision(pos, 10.0, center, 12), Contact::None);
        assert_eq!(r.check_collision(pos, 10.0, center, 13), Contact::Bounce);
    }

    #[test]
    fn test_check_collision_gap_does_not_stamp() {
        let mut r = ring(0.0, 60.0);
        let center = Vec2::ZERO;
        let pos = polar_to_cartesian(center, 180.0, 30.0_f32.to_radians());

        assert_eq!(r.check_collision(pos, 10.0, center, 5), Contact::Gap);
        assert_eq!(r.last_collision_frame, None);
        assert_eq!(r.check_collision(pos, 10.0, center, 6), Contact::Gap);
    }

    #[test]
    fn test_check_collision_band() {
        let mut r = ring(0.0, 60.0);
        let center = Vec2::ZERO;
        let theta = std::f32::consts::PI;
        // Inner edge at 180, margin 12
        assert_eq!(
            r.check_collision(polar_to_cartesian(center, 100.0, theta), 10.0, center, 0),
            Contact::None
        );
        assert_eq!(
            r.check_collision(polar_to_cartesian(center, 170.0, theta), 10.0, center, 0),
            Contact::Bounce
        );
        assert_eq!(
            r.check_collision(polar_to_cartesian(center, 230.0, theta), 10.0, center, 100),
            Contact::None
        );
    }

    #[test]
    fn test_take_damage_fades_then_destroys() {
        let mut r = ring(0.0, 60.0);
        assert!(!r.take_damage());
        assert_eq!(r.hp, 2);
        assert_eq!(r.color, r.base_color.scaled(2.0 / 3.0));
        assert!(!r.take_damage());
        assert_eq!(r.hp, 1);
        assert!(r.take_damage());
        assert_eq!(r.hp, 0);
        assert!(!r.alive);

        // Dead rings stay dead and never go below zero
        assert!(!r.take_damage());
        assert_eq!(r.hp, 0);
    }

    #[test]
    fn test_bounce_normal() {
        let r = ring(0.0, 60.0);
        let center = Vec2::new(10.0, 10.0);
        let n = r.bounce_normal(Vec2::new(13.0, 14.0), center);
        assert!((n - Vec2::new(0.6, 0.8)).length() < 1e-5);
        assert_eq!(r.bounce_normal(center, center), Vec2::new(0.0, -1.0));
    }

    proptest! {
        #[test]
        fn prop_gap_window_is_exactly_size_wide(
            gap_angle in 0.0f32..360.0,
            gap_size in 1.0f32..359.0,
            rotation in 0.0f32..360.0,
            t in 0.0f32..1.0,
        ) {
            let mut r = ring(gap_angle, gap_size);
            r.rotation = rotation;
            let start = r.gap_start();

            let inside = start + 0.01 + t * (gap_size - 0.02);
            prop_assert!(r.is_in_gap(inside));

            let outside = start + gap_size + 0.01 + t * (360.0 - gap_size - 0.02);
            prop_assert!(!r.is_in_gap(outside));
        }
    }
}
