//! CPU rendering module
//!
//! Paints a `GameState` into an RGBA `FrameBuffer`. Captions are composited
//! by the host, so everything here is shapes and color.

pub mod frame;
pub mod shapes;

pub use frame::{FrameBuffer, Rgba};

use glam::Vec2;

use crate::consts::BALLS_PER_ROUND;
use crate::palette::{self, Rgb};
use crate::sim::{Ball, GamePhase, GameState};

/// Background grid spacing (px)
const GRID_SIZE: f32 = 50.0;
/// Scoreboard strip height relative to frame height
const STRIP_RATIO: f32 = 0.065;
/// Trail opacity
const TRAIL_ALPHA: f32 = 0.4;
/// Flash decay per drawn frame
const FLASH_DECAY: f32 = 0.82;

/// Frame painter with the few bits of purely visual state
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    /// Background animation clock
    time: f32,
    /// Current flash intensity in [0, 1]
    flash: f32,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Step the background clock (once per update)
    pub fn advance(&mut self) {
        self.time += 0.015;
        if self.time > 1000.0 {
            self.time = 0.0;
        }
    }

    pub fn trigger_flash(&mut self, strength: f32) {
        self.flash = strength.clamp(0.0, 1.0);
    }

    pub fn flash(&self) -> f32 {
        self.flash
    }

    /// Paint the current frame. A buffer of the wrong size is left untouched.
    pub fn draw(&mut self, state: &GameState, fb: &mut FrameBuffer) -> bool {
        if fb.width() != state.width || fb.height() != state.height {
            log::warn!(
                "Frame buffer is {}x{}, session is {}x{}; skipping draw",
                fb.width(),
                fb.height(),
                state.width,
                state.height
            );
            return false;
        }

        self.draw_background(state, fb);

        if state.phase == GamePhase::Endcard || state.phase == GamePhase::Done {
            draw_endcard(state, fb);
        } else {
            draw_arena(state, fb);
            draw_scoreboard(state, fb);
            match state.phase {
                GamePhase::Hook => draw_hook_overlay(state, fb),
                GamePhase::Playing => draw_round_pips(state, fb),
                GamePhase::WinnerPause => {
                    draw_round_pips(state, fb);
                    draw_winner_banner(state, fb);
                }
                _ => {}
            }
        }

        self.apply_flash(fb);
        true
    }

    /// Pulsing tint plus a slowly drifting grid
    fn draw_background(&self, state: &GameState, fb: &mut FrameBuffer) {
        let pulse = (self.time * 0.5).sin() * 0.15 + 0.85;
        let base = state.background.scaled(pulse);
        fb.fill(base);

        let line = Rgb::new(
            base.r.saturating_add(8),
            base.g.saturating_add(8),
            base.b.saturating_add(8),
        );
        let offset = Vec2::new(self.time * 15.0, self.time * 10.0);
        shapes::grid(fb, GRID_SIZE, offset, line);
    }

    fn apply_flash(&mut self, fb: &mut FrameBuffer) {
        if self.flash < 0.01 {
            self.flash = 0.0;
            return;
        }
        fb.wash(palette::WHITE, self.flash);
        self.flash *= FLASH_DECAY;
    }
}

fn team_color(state: &GameState, name: &str) -> Rgb {
    state
        .roster
        .iter()
        .find(|t| t.name == name)
        .map(|t| t.color)
        .unwrap_or(palette::RED)
}

fn draw_arena(state: &GameState, fb: &mut FrameBuffer) {
    let center = state.geometry.center;
    let dot = (state.height as f32 * 0.008).max(1.0);
    shapes::disk(fb, center, dot, palette::CENTER_DOT, 1.0);

    // Outermost first
    for ring in state.rings.iter().rev().filter(|r| r.alive) {
        shapes::annulus(
            fb,
            center,
            ring.inner_radius(),
            ring.outer_radius(),
            ring.color,
            1.0,
            |a| ring.is_in_gap(a),
        );
    }

    for ball in &state.balls {
        draw_ball(ball, fb);
    }
}

fn draw_ball(ball: &Ball, fb: &mut FrameBuffer) {
    let trail: Vec<Vec2> = ball.trail.iter().copied().collect();
    let trail_color = if ball.boosted {
        palette::BOOST_TRAIL
    } else {
        ball.color
    };
    shapes::trail(fb, &trail, ball.radius, trail_color, TRAIL_ALPHA);

    match ball.icon.texture() {
        Some(texture) => shapes::textured_disk(fb, ball.pos, ball.radius, texture),
        None => shapes::disk(fb, ball.pos, ball.radius, ball.color, 1.0),
    }

    // Specular highlight
    let highlight = ball.pos - Vec2::splat(ball.radius * 0.3);
    shapes::disk(fb, highlight, ball.radius * 0.3, palette::WHITE, 0.5);
}

/// Dark strip with one column per ball: color bar plus a pip per round won
fn draw_scoreboard(state: &GameState, fb: &mut FrameBuffer) {
    let w = state.width as f32;
    let strip_h = (state.height as f32 * STRIP_RATIO).floor();
    shapes::fill_rect(fb, Vec2::ZERO, Vec2::new(w, strip_h), Rgb::new(0, 0, 0), 0.75);

    let n = state.balls.len();
    if n == 0 {
        return;
    }
    let seg = w / n as f32;
    let pip_r = (strip_h * 0.12).max(2.0);

    for (i, ball) in state.balls.iter().enumerate() {
        let x0 = seg * i as f32;
        let x_mid = x0 + seg / 2.0;

        let bar_min = Vec2::new(x_mid - seg * 0.3, strip_h * 0.2);
        let bar_max = Vec2::new(x_mid + seg * 0.3, strip_h * 0.42);
        shapes::fill_rect(fb, bar_min, bar_max, ball.base_color, 1.0);

        let wins = state.scoreboard.get(&ball.team).unwrap_or(0);
        let pips_w = wins as f32 * pip_r * 3.0;
        for k in 0..wins {
            let x = x_mid - pips_w / 2.0 + pip_r * 1.5 + k as f32 * pip_r * 3.0;
            shapes::disk(fb, Vec2::new(x, strip_h * 0.7), pip_r, palette::WHITE, 1.0);
        }

        if i + 1 < n {
            let x = seg * (i + 1) as f32;
            shapes::fill_rect(
                fb,
                Vec2::new(x, 4.0),
                Vec2::new(x + 1.0, strip_h - 4.0),
                Rgb::new(80, 80, 80),
                1.0,
            );
        }
    }
}

/// Caption pill fading in over the first part of the hook
fn draw_hook_overlay(state: &GameState, fb: &mut FrameBuffer) {
    let ramp = (state.settings.hook_frames as f32 * 0.4).max(1.0);
    let alpha = (state.phase_frame as f32 / ramp).min(1.0);
    let (w, h) = (state.width as f32, state.height as f32);
    let min = Vec2::new(w * 0.1, h * 0.47);
    let max = Vec2::new(w * 0.9, h * 0.53);
    shapes::fill_rect(fb, min, max, Rgb::new(0, 0, 0), alpha * 0.78);
}

/// One pip per round in the bottom-left corner; the finale's pip is orange
fn draw_round_pips(state: &GameState, fb: &mut FrameBuffer) {
    let total = state.total_rounds();
    let r = (state.height as f32 * 0.006).max(2.0);
    let y = state.height as f32 - 30.0;
    for i in 0..total {
        let pos = Vec2::new(18.0 + r + i as f32 * r * 3.0, y);
        let finale = i + 1 == total;
        let color = if finale {
            Rgb::new(255, 100, 0)
        } else {
            Rgb::new(200, 200, 200)
        };
        let alpha = if i <= state.round_index { 1.0 } else { 0.3 };
        shapes::disk(fb, pos, r, color, alpha);
    }
}

/// Pulsing band in the winner's color across the middle of the screen
fn draw_winner_banner(state: &GameState, fb: &mut FrameBuffer) {
    let Some(winner) = state.round_winner.as_deref() else {
        return;
    };
    let pulse = (state.frame_count as f32 * 0.12).sin().abs() * 0.25 + 0.75;
    let color = team_color(state, winner).brightened(pulse);
    let (w, h) = (state.width as f32, state.height as f32);
    let cy = h / 2.0 + 40.0;

    shapes::fill_rect(
        fb,
        Vec2::new(0.0, cy - h * 0.04 + 3.0),
        Vec2::new(w, cy + h * 0.04 + 3.0),
        Rgb::new(0, 0, 0),
        0.6,
    );
    shapes::fill_rect(
        fb,
        Vec2::new(w * 0.15, cy - h * 0.025),
        Vec2::new(w * 0.85, cy + h * 0.025),
        color,
        0.9,
    );
}

/// Champion disk above one tally bar per featured team
fn draw_endcard(state: &GameState, fb: &mut FrameBuffer) {
    fb.wash(Rgb::new(8, 8, 10), 0.82);

    let (w, h) = (state.width as f32, state.height as f32);
    let center = Vec2::new(w / 2.0, h / 2.0);

    if let Some(champion) = state.scoreboard.champion() {
        let color = team_color(state, &champion.name);
        let glow = (state.frame_count as f32 * 0.1).sin().abs();
        let r = h * 0.08;
        shapes::disk(fb, center - Vec2::new(0.0, r), r * 1.25, color, 0.15 + glow * 0.15);
        shapes::disk(fb, center - Vec2::new(0.0, r), r, color, 1.0);
    }

    let featured: Vec<_> = state.roster.iter().take(BALLS_PER_ROUND).collect();
    let most = state
        .scoreboard
        .champion()
        .map(|c| c.wins)
        .unwrap_or(0)
        .max(1) as f32;
    let bar_w = w * 0.5 / featured.len().max(1) as f32;
    let max_h = h * 0.12;
    let base_y = center.y + h * 0.18;
    for (i, team) in featured.iter().enumerate() {
        let wins = state.scoreboard.get(&team.name).unwrap_or(0) as f32;
        let x = w * 0.25 + i as f32 * bar_w;
        let top = base_y - max_h * wins / most;
        shapes::fill_rect(
            fb,
            Vec2::new(x + bar_w * 0.15, top),
            Vec2::new(x + bar_w * 0.85, base_y),
            team.color,
            1.0,
        );
    }
}
