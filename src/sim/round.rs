//! Round spawning and winner detection

use std::f32::consts::TAU;

use rand::Rng;

use super::ball::Ball;
use super::ring::Ring;
use super::state::{GameEvent, GameState, roll_background};
use crate::consts::*;
use crate::palette::{RING_COLORS, Rgb};
use crate::polar_to_cartesian;

/// Ring color for `slot` of `rings`; the outermost ring takes the first palette entry
pub fn ring_color(slot: usize, rings: usize) -> Rgb {
    let from_outside = rings.saturating_sub(1).saturating_sub(slot);
    RING_COLORS[from_outside % RING_COLORS.len()]
}

/// Replace the live rings and balls with a fresh round
pub fn spawn_round(state: &mut GameState, round: usize) {
    let Some(cfg) = state.settings.rounds.get(round).cloned() else {
        log::error!("No round {round} in a {}-round table", state.total_rounds());
        return;
    };

    if !state.background_fixed {
        state.background = roll_background(&mut state.rng);
    }

    let geo = state.geometry;
    let n = cfg.num_rings;

    state.rings = (0..n)
        .map(|slot| {
            let gap_angle = state.rng.random_range(0.0..360.0);
            Ring::new(
                geo.ring_radius(slot),
                geo.ring_thickness,
                gap_angle,
                cfg.gap_size,
                cfg.rotation_speed,
                ring_color(slot, n),
            )
        })
        .collect();

    state.balls = state
        .roster
        .iter()
        .take(BALLS_PER_ROUND)
        .enumerate()
        .map(|(j, team)| {
            let angle = j as f32 * TAU / BALLS_PER_ROUND as f32
                + state.rng.random_range(-SPAWN_JITTER..SPAWN_JITTER);
            let pos = polar_to_cartesian(geo.center, SPAWN_OFFSET, angle);
            let heading = state.rng.random_range(0.0..TAU);
            let mut ball = Ball::new(
                pos,
                heading,
                geo.ball_speed,
                geo.ball_radius,
                team.name.clone(),
                team.color,
                n,
            );
            ball.search_query = team.search_query.clone();
            ball
        })
        .collect();

    state.round_index = round;
    state.round_winner = None;
    state.round_frame = 0;
    state.events.push(GameEvent::RoundStarted { round, rings: n });

    log::info!(
        "Round {}/{}: {} rings, gap {}°, rotation {}°/frame",
        round + 1,
        state.total_rounds(),
        n,
        cfg.gap_size,
        cfg.rotation_speed
    );
}

/// Crown the first ball that escaped every (dead) ring
///
/// Only one ball can win a round: the first match in roster order is marked
/// escaped, scored and reported. Returns its index.
pub fn detect_escape(state: &mut GameState) -> Option<usize> {
    if state.rings.iter().any(|r| r.alive) {
        return None;
    }

    let center = state.geometry.center;
    let escape = state.escape_radius();
    let idx = state
        .balls
        .iter()
        .position(|b| !b.escaped && (b.pos - center).length() > escape)?;

    let ball = &mut state.balls[idx];
    ball.escaped = true;
    let team = ball.team.clone();
    let pos = ball.pos;

    let wins = state.scoreboard.record_win(&team);
    state.round_winner = Some(team.clone());
    state.round_winners.push(team.clone());
    log::info!(
        "{team} wins round {} after {} frames ({wins} total)",
        state.round_index + 1,
        state.round_frame
    );
    state.events.push(GameEvent::RoundWon {
        round: state.round_index,
        team,
        pos,
    });
    Some(idx)
}
