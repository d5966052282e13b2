//! Collision resolution between balls and rings
//!
//! Rings are tested innermost first and the first contact wins: a ball gets
//! at most one collision response per frame, even when its touch band
//! overlaps two rings.

use glam::Vec2;
use rand::Rng;

use super::ball::Ball;
use super::ring::{Contact, Ring};
use super::state::GameEvent;
use crate::consts::COLLISION_PUSHBACK;

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// What happened to a ball this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Ring slot that was hit
    pub slot: usize,
    /// Gap pass or bounce
    pub contact: Contact,
}

/// Resolve one ball against the live rings
///
/// Dead rings and rings this ball is cooling down from are skipped. A gap
/// contact damages the ring and drops any speed boost; a bounce reflects the
/// ball, pushes it along the normal and counts towards a boost.
pub fn resolve_ball<R: Rng + ?Sized>(
    ball: &mut Ball,
    rings: &mut [Ring],
    center: Vec2,
    frame: u64,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) -> Option<Resolution> {
    let count = rings.len();
    for (slot, ring) in rings.iter_mut().enumerate() {
        if !ring.alive || ball.is_on_cooldown(slot) {
            continue;
        }

        match ring.check_collision(ball.pos, ball.radius, center, frame) {
            Contact::None => continue,
            Contact::Gap => {
                let destroyed = ring.take_damage();
                ball.clear_bounces(slot);
                ball.reset_speed();
                if destroyed {
                    log::debug!("Ring {slot} destroyed by {} at frame {frame}", ball.team);
                }
                events.push(GameEvent::RingHit {
                    slot,
                    pitch: count - 1 - slot,
                    pos: ball.pos,
                    color: if destroyed { ring.base_color } else { ring.color },
                    destroyed,
                });
                return Some(Resolution {
                    slot,
                    contact: Contact::Gap,
                });
            }
            Contact::Bounce => {
                let normal = ring.bounce_normal(ball.pos, center);
                ball.bounce(normal, rng);
                ball.pos += normal * COLLISION_PUSHBACK;
                ball.record_bounce(slot);
                events.push(GameEvent::Bounce {
                    pos: ball.pos,
                    speed_ratio: ball.speed_ratio(),
                });
                return Some(Resolution {
                    slot,
                    contact: Contact::Bounce,
                });
            }
        }
    }
    None
}

/// Turn back a ball that got past every live ring without breaking them
///
/// Only applies while some ring is alive; such a ball can never win. It is
/// stopped at the escape radius and sent straight back at the center, so its
/// path is sure to cross the live rings again. Returns true if the ball was turned.
pub fn contain_stray(ball: &mut Ball, center: Vec2, escape_radius: f32) -> bool {
    let offset = ball.pos - center;
    let dist = offset.length();
    if dist <= escape_radius || dist == 0.0 {
        return false;
    }
    let normal = offset / dist;
    ball.vel = -normal * ball.speed();
    ball.pos = center + normal * escape_radius;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{self, Rgb};
    use crate::polar_to_cartesian;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::f32::consts::PI;

    fn rings() -> Vec<Ring> {
        // Inner ring gap [0, 60), outer ring gap [180, 240)
        vec![
            Ring::new(150.0, 20.0, 0.0, 60.0, 0.0, Rgb::new(100, 100, 255)),
            Ring::new(200.0, 20.0, 180.0, 60.0, 0.0, Rgb::new(255, 100, 100)),
        ]
    }

    fn ball_at(r: f32, theta: f32, heading: f32) -> Ball {
        Ball::new(
            polar_to_cartesian(Vec2::ZERO, r, theta),
            heading,
            5.0,
            10.0,
            "RED",
            palette::RED,
            2,
        )
    }

    #[test]
    fn test_reflect_velocity() {
        let velocity = Vec2::new(100.0, 0.0);
        let normal = Vec2::new(-1.0, 0.0);
        let reflected = reflect_velocity(velocity, normal);
        assert!((reflected.x - (-100.0)).abs() < 0.001);
        assert!(reflected.y.abs() < 0.001);
    }

    #[test]
    fn test_gap_pass_damages_ring() {
        let mut rings = rings();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut events = Vec::new();
        let mut ball = ball_at(130.0, 30.0_f32.to_radians(), 0.0);

        let res = resolve_ball(&mut ball, &mut rings, Vec2::ZERO, 10, &mut rng, &mut events);
        assert_eq!(res, Some(Resolution { slot: 0, contact: Contact::Gap }));
        assert_eq!(rings[0].hp, 2);
        assert_eq!(rings[1].hp, 3);
        assert!(matches!(
            events[0],
            GameEvent::RingHit { slot: 0, pitch: 1, destroyed: false, .. }
        ));
    }

    #[test]
    fn test_outer_ring_break_takes_lowest_pitch() {
        let mut rings = rings();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut events = Vec::new();
        // Inside the outer ring's gap, well clear of the inner ring
        let mut ball = ball_at(180.0, 210.0_f32.to_radians(), 0.0);

        let res = resolve_ball(&mut ball, &mut rings, Vec2::ZERO, 10, &mut rng, &mut events);
        assert_eq!(res, Some(Resolution { slot: 1, contact: Contact::Gap }));
        assert!(matches!(events[0], GameEvent::RingHit { slot: 1, pitch: 0, .. }));
    }

    #[test]
    fn test_bounce_reflects_and_pushes_out() {
        let mut rings = rings();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut events = Vec::new();
        // Inner ring solid at 180°, ball heading outward (towards -x)
        let mut ball = ball_at(130.0, PI, PI);
        let before = ball.pos;

        let res = resolve_ball(&mut ball, &mut rings, Vec2::ZERO, 10, &mut rng, &mut events);
        assert_eq!(res, Some(Resolution { slot: 0, contact: Contact::Bounce }));
        // Velocity now points back towards center
        assert!(ball.vel.x > 0.0);
        assert!((ball.pos - before - Vec2::new(-COLLISION_PUSHBACK, 0.0)).length() < 1e-3);
        assert!(ball.is_on_cooldown(0));
        assert_eq!(ball.bounce_counts[0], 1);
        assert_eq!(rings[0].last_collision_frame, Some(10));
        assert!(matches!(events[0], GameEvent::Bounce { .. }));
    }

    #[test]
    fn test_first_ring_wins() {
        let mut rings = rings();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut events = Vec::new();
        // A 20px ball (margin 24) at r=165 touches both rings' bands
        let mut ball = ball_at(165.0, PI / 2.0, 0.0);
        ball.radius = 20.0;

        let res = resolve_ball(&mut ball, &mut rings, Vec2::ZERO, 10, &mut rng, &mut events);
        assert_eq!(res.map(|r| r.slot), Some(0));
        assert_eq!(events.len(), 1);
        assert!(rings[1].last_collision_frame.is_none());
    }

    #[test]
    fn test_dead_and_cooling_rings_are_skipped() {
        let mut rings = rings();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut events = Vec::new();
        let mut ball = ball_at(165.0, PI / 2.0, 0.0);
        ball.radius = 20.0;

        rings[0].alive = false;
        rings[0].hp = 0;
        ball.record_bounce(1);

        let res = resolve_ball(&mut ball, &mut rings, Vec2::ZERO, 10, &mut rng, &mut events);
        assert_eq!(res, None);
        assert!(events.is_empty());
    }

    #[test]
    fn test_contain_stray() {
        let mut ball = ball_at(500.0, 0.0, 0.0);
        assert!(contain_stray(&mut ball, Vec2::ZERO, 400.0));
        assert!((ball.pos.length() - 400.0).abs() < 1e-3);
        assert!(ball.vel.x < 0.0);

        let mut inside = ball_at(300.0, 0.0, 0.0);
        assert!(!contain_stray(&mut inside, Vec2::ZERO, 400.0));
        assert!(inside.vel.x > 0.0);
    }
}
