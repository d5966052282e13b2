//! Fixed timestep simulation tick
//!
//! One call advances the session by exactly one video frame.

use glam::Vec2;
use rand::Rng;

use super::collision::{contain_stray, resolve_ball};
use super::round::{detect_escape, spawn_round};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::HOOK_DRIFT_SCALE;

/// Flash strength between rounds
pub const ROUND_FLASH_STRENGTH: f32 = 0.95;
/// Confetti pieces in the burst when a round is won
pub const WIN_CONFETTI: u32 = 200;

/// Advance the game state by one frame
pub fn tick(state: &mut GameState) {
    if state.phase == GamePhase::Done {
        return;
    }

    state.frame_count += 1;
    state.phase_frame += 1;

    match state.phase {
        GamePhase::Hook => tick_hook(state),
        GamePhase::Playing => tick_playing(state),
        GamePhase::WinnerPause => tick_winner_pause(state),
        GamePhase::Flash => tick_flash(state),
        GamePhase::Endcard => tick_endcard(state),
        GamePhase::Done => {}
    }
}

/// Arena reveal: rings turn, balls drift, nothing collides
fn tick_hook(state: &mut GameState) {
    for ring in &mut state.rings {
        ring.update();
    }
    for ball in &mut state.balls {
        ball.drift(HOOK_DRIFT_SCALE);
    }

    if state.phase_frame >= state.settings.hook_frames && state.enter_phase(GamePhase::Playing) {
        // Start from clean positions
        let round = state.round_index;
        spawn_round(state, round);
    }
}

fn tick_playing(state: &mut GameState) {
    state.round_frame += 1;

    for ring in state.rings.iter_mut().filter(|r| r.alive) {
        ring.update();
    }

    let center = state.geometry.center;
    let frame = state.frame_count;
    let escape_radius = state.escape_radius();
    {
        let GameState {
            balls,
            rings,
            rng,
            events,
            ..
        } = state;
        for ball in balls.iter_mut() {
            ball.advance();
            if ball.escaped {
                continue;
            }
            resolve_ball(ball, rings, center, frame, rng, events);
            if rings.iter().any(|r| r.alive) {
                contain_stray(ball, center, escape_radius);
            }
        }
    }

    if detect_escape(state).is_some() {
        state.events.push(GameEvent::Confetti {
            pos: center,
            count: WIN_CONFETTI,
        });
        state.enter_phase(GamePhase::WinnerPause);
    }
}

/// Celebration hold, then flash into the next round or finish
fn tick_winner_pause(state: &mut GameState) {
    if state.phase_frame % 3 == 0 {
        let pos = confetti_drop(state, 100.0);
        state.events.push(GameEvent::Confetti { pos, count: 5 });
    }

    if state.phase_frame >= state.settings.pause_frames(state.round_index) {
        if state.round_index + 1 < state.total_rounds() {
            if state.enter_phase(GamePhase::Flash) {
                state.events.push(GameEvent::Flash {
                    strength: ROUND_FLASH_STRENGTH,
                });
            }
        } else {
            state.enter_phase(GamePhase::Endcard);
        }
    }
}

fn tick_flash(state: &mut GameState) {
    if state.phase_frame >= state.settings.flash_frames() && state.enter_phase(GamePhase::Playing) {
        let next = state.round_index + 1;
        spawn_round(state, next);
    }
}

fn tick_endcard(state: &mut GameState) {
    if state.phase_frame % 2 == 0 {
        let pos = confetti_drop(state, 50.0);
        state.events.push(GameEvent::Confetti { pos, count: 4 });
    }

    if state.phase_frame >= state.settings.endcard_frames {
        state.enter_phase(GamePhase::Done);
    }
}

/// Random point on the top edge, `margin` px in from either side
fn confetti_drop(state: &mut GameState, margin: f32) -> Vec2 {
    let width = state.width as f32;
    let x = if width > 2.0 * margin {
        state.rng.random_range(margin..width - margin)
    } else {
        width / 2.0
    };
    Vec2::new(x, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    fn state_with(settings: Settings) -> GameState {
        GameState::new(1080, 1920, 42, settings, Vec::new(), None)
    }

    fn kill_rings(state: &mut GameState) {
        for ring in &mut state.rings {
            ring.alive = false;
            ring.hp = 0;
        }
    }

    /// Put ball 0 past the escape radius, moving outward
    fn launch_winner(state: &mut GameState) {
        kill_rings(state);
        let r = state.escape_radius() + 50.0;
        state.balls[0].pos = state.geometry.center + Vec2::new(r, 0.0);
        state.balls[0].vel = Vec2::new(5.0, 0.0);
    }

    #[test]
    fn test_zero_hook_starts_play_on_first_tick() {
        let mut s = state_with(Settings::default());
        tick(&mut s);
        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.frame_count, 1);
        assert_eq!(s.phase_frame, 0);
        assert_eq!(s.round_index, 0);
    }

    #[test]
    fn test_hook_drifts_without_collisions() {
        let mut s = state_with(Settings {
            hook_frames: 10,
            ..Settings::default()
        });
        let start = s.balls[0].pos;
        let vel = s.balls[0].vel;
        let rotation = s.rings[0].rotation;

        tick(&mut s);
        assert_eq!(s.phase, GamePhase::Hook);
        assert!((s.balls[0].pos - (start + vel * HOOK_DRIFT_SCALE)).length() < 1e-4);
        assert_ne!(s.rings[0].rotation, rotation);

        for _ in 0..9 {
            tick(&mut s);
        }
        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.frame_count, 10);
    }

    #[test]
    fn test_playing_counts_round_frames() {
        let mut s = state_with(Settings::default());
        tick(&mut s);
        for _ in 0..5 {
            tick(&mut s);
        }
        assert_eq!(s.round_frame, 5);
        assert_eq!(s.frame_count, 6);
    }

    #[test]
    fn test_winner_enters_pause() {
        let mut s = state_with(Settings::default());
        tick(&mut s);
        launch_winner(&mut s);
        tick(&mut s);

        assert_eq!(s.phase, GamePhase::WinnerPause);
        assert_eq!(s.round_winner.as_deref(), Some("RED"));
        assert_eq!(s.scoreboard.get("RED"), Some(1));
        assert!(s.events.iter().any(|e| matches!(e, GameEvent::RoundWon { .. })));
        assert!(s.events.contains(&GameEvent::Confetti {
            pos: s.geometry.center,
            count: WIN_CONFETTI
        }));
    }

    #[test]
    fn test_pause_then_flash_then_next_round() {
        let mut s = state_with(Settings::default());
        tick(&mut s);
        launch_winner(&mut s);
        tick(&mut s);
        s.drain_events();

        let pause = s.settings.pause_frames(0);
        for _ in 0..pause - 1 {
            tick(&mut s);
            assert_eq!(s.phase, GamePhase::WinnerPause);
        }
        tick(&mut s);
        assert_eq!(s.phase, GamePhase::Flash);
        assert!(s.events.contains(&GameEvent::Flash {
            strength: ROUND_FLASH_STRENGTH
        }));
        let confetti = s
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::Confetti { count: 5, .. }))
            .count();
        assert_eq!(confetti, (pause / 3) as usize);

        for _ in 0..s.settings.flash_frames() {
            tick(&mut s);
        }
        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.round_index, 1);
        assert_eq!(s.rings.len(), 6);
        assert_eq!(s.round_winner, None);
        // Scoreboard survives the new round
        assert_eq!(s.scoreboard.get("RED"), Some(1));
    }

    #[test]
    fn test_last_round_goes_to_endcard_then_done() {
        let mut s = state_with(Settings {
            rounds: crate::settings::RoundConfig::table(1),
            ..Settings::default()
        });
        tick(&mut s);
        launch_winner(&mut s);
        tick(&mut s);
        for _ in 0..s.settings.pause_frames(0) {
            tick(&mut s);
        }
        assert_eq!(s.phase, GamePhase::Endcard);

        for _ in 0..s.settings.endcard_frames {
            tick(&mut s);
        }
        assert_eq!(s.phase, GamePhase::Done);
        assert!(s.is_done());

        let frames = s.frame_count;
        tick(&mut s);
        assert_eq!(s.frame_count, frames);
    }

    #[test]
    fn test_stray_ball_is_held_while_rings_live() {
        let mut s = state_with(Settings::default());
        tick(&mut s);
        let r = s.escape_radius() + 300.0;
        s.balls[1].pos = s.geometry.center + Vec2::new(0.0, r);
        s.balls[1].vel = Vec2::new(0.0, 5.0);
        tick(&mut s);

        let d = (s.balls[1].pos - s.geometry.center).length();
        assert!(d <= s.escape_radius() + 1e-2);
        assert!(s.balls[1].vel.y < 0.0);
        assert!(!s.balls[1].escaped);
        assert_eq!(s.phase, GamePhase::Playing);
    }

    #[test]
    fn test_confetti_drop_stays_inside_margins() {
        let mut s = state_with(Settings::default());
        for _ in 0..100 {
            let p = confetti_drop(&mut s, 100.0);
            assert!(p.x >= 100.0 && p.x < 980.0);
            assert_eq!(p.y, 0.0);
        }
        s.width = 120;
        assert_eq!(confetti_drop(&mut s, 100.0).x, 60.0);
    }
}
