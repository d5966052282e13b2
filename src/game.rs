//! Host-facing session facade
//!
//! `Game` owns the simulation state and its collaborators. The host calls
//! `update` once per video frame and `draw` whenever it wants pixels; sounds
//! and effects are reported through the audio log and the effect sink.

use std::collections::HashMap;

use serde::Serialize;

use crate::audio::AudioLog;
use crate::effects::{EffectSink, NullEffects};
use crate::error::ConfigError;
use crate::palette::Rgb;
use crate::renderer::{FrameBuffer, Renderer};
use crate::scoreboard::Scoreboard;
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, tick};
use crate::texture::{IconSlot, NoTextures, TextureProvider, resolve_icon};
use crate::themes::Team;

/// Explosion particles when a ring breaks (half for a plain hit)
const EXPLOSION_PARTICLES: u32 = 60;

/// Everything needed to start a session
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub width: u32,
    pub height: u32,
    pub seed: u64,
    /// Theme category; enables ball icons
    pub theme: Option<String>,
    /// Rivals in roster order (fewer than two uses the default teams)
    pub rivals: Vec<Team>,
    /// Fixed background tint (random per round otherwise)
    pub background: Option<Rgb>,
    pub settings: Settings,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 1080,
            height: 1920,
            seed: 0,
            theme: None,
            rivals: Vec::new(),
            background: None,
            settings: Settings::default(),
        }
    }
}

/// Session outcome for the host's metadata step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub seed: u64,
    pub width: u32,
    pub height: u32,
    pub theme: Option<String>,
    pub hook_text: String,
    pub frames: u64,
    pub duration_secs: f32,
    pub rounds_played: usize,
    pub round_winners: Vec<String>,
    pub scoreboard: Scoreboard,
    pub champion: Option<String>,
    pub done: bool,
}

/// A ball-escape session
pub struct Game {
    state: GameState,
    renderer: Renderer,
    audio: AudioLog,
    effects: Box<dyn EffectSink>,
    textures: Box<dyn TextureProvider>,
    theme: Option<String>,
    /// Icon per team, shared across rounds
    icons: HashMap<String, IconSlot>,
}

impl Game {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        if config.width == 0 || config.height == 0 {
            return Err(ConfigError::EmptyFrame {
                width: config.width,
                height: config.height,
            });
        }
        config.settings.validate()?;

        log::info!(
            "New session {}x{} seed {} ({} rounds{})",
            config.width,
            config.height,
            config.seed,
            config.settings.rounds.len(),
            config
                .theme
                .as_deref()
                .map(|t| format!(", theme {t}"))
                .unwrap_or_default()
        );

        let state = GameState::new(
            config.width,
            config.height,
            config.seed,
            config.settings,
            config.rivals,
            config.background,
        );

        Ok(Self {
            state,
            renderer: Renderer::new(),
            audio: AudioLog::new(),
            effects: Box::new(NullEffects),
            textures: Box::new(NoTextures),
            theme: config.theme,
            icons: HashMap::new(),
        })
    }

    pub fn with_effects(mut self, effects: Box<dyn EffectSink>) -> Self {
        self.effects = effects;
        self
    }

    pub fn with_textures(mut self, textures: Box<dyn TextureProvider>) -> Self {
        self.textures = textures;
        self
    }

    /// Advance one frame
    pub fn update(&mut self) {
        if self.state.is_done() {
            return;
        }
        tick(&mut self.state);
        self.renderer.advance();

        for event in self.state.drain_events() {
            self.dispatch(event);
        }

        if matches!(self.state.phase, GamePhase::Hook | GamePhase::Playing) {
            for ball in &self.state.balls {
                if let Some(&pos) = ball.trail.back() {
                    let color = if ball.boosted {
                        crate::palette::BOOST_TRAIL
                    } else {
                        ball.color
                    };
                    self.effects.trail_point(pos, color);
                }
            }
        }
    }

    fn dispatch(&mut self, event: GameEvent) {
        let t = self.state.time_secs();
        match event {
            GameEvent::RingHit {
                pitch,
                pos,
                color,
                destroyed,
                ..
            } => {
                self.audio.ring_break(pitch, t);
                let (count, trauma) = if destroyed {
                    (EXPLOSION_PARTICLES, 0.10)
                } else {
                    (EXPLOSION_PARTICLES / 2, 0.05)
                };
                self.effects.explosion(pos, color, count);
                self.effects.shake(trauma);
            }
            GameEvent::Bounce { speed_ratio, .. } => {
                self.audio.bounce(speed_ratio, t);
                self.effects.shake(0.04 * speed_ratio);
            }
            GameEvent::RoundWon { .. } => {
                self.audio.win(t);
                self.effects.shake(0.4);
            }
            GameEvent::Flash { strength } => {
                self.renderer.trigger_flash(strength);
                self.effects.flash(strength);
            }
            GameEvent::Confetti { pos, count } => self.effects.confetti(pos, count),
            GameEvent::RoundStarted { round, rings } => {
                log::debug!("Round {round} spawned with {rings} rings");
            }
            GameEvent::PhaseChanged { .. } => {}
        }
    }

    /// Ask the provider for any icon not yet resolved
    fn resolve_icons(&mut self) {
        for ball in self.state.balls.iter_mut().filter(|b| !b.icon.is_resolved()) {
            let slot = self.icons.entry(ball.team.clone()).or_insert_with(|| {
                resolve_icon(
                    self.textures.as_mut(),
                    self.theme.as_deref(),
                    &ball.team,
                    ball.search_query.as_deref(),
                    ball.base_color,
                    (ball.radius * 2.0) as u32,
                )
            });
            ball.icon = slot.clone();
        }
    }

    /// Paint the current frame into `fb` (must match the session size)
    pub fn draw(&mut self, fb: &mut FrameBuffer) {
        self.resolve_icons();
        self.renderer.draw(&self.state, fb);
    }

    pub fn is_done(&self) -> bool {
        self.state.is_done()
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.state.scoreboard
    }

    /// Overall champion (ties go to roster order)
    pub fn champion(&self) -> Option<&str> {
        self.state.scoreboard.champion().map(|e| e.name.as_str())
    }

    /// Every team tied for the most wins
    pub fn winners(&self) -> Vec<&str> {
        self.state.scoreboard.leaders()
    }

    pub fn round_winners(&self) -> &[String] {
        &self.state.round_winners
    }

    pub fn theme(&self) -> Option<&str> {
        self.theme.as_deref()
    }

    pub fn hook_text(&self) -> &str {
        self.state.hook_text
    }

    pub fn audio_log(&self) -> &AudioLog {
        &self.audio
    }

    pub fn frame_count(&self) -> u64 {
        self.state.frame_count
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            seed: self.state.seed,
            width: self.state.width,
            height: self.state.height,
            theme: self.theme.clone(),
            hook_text: self.state.hook_text.to_string(),
            frames: self.state.frame_count,
            duration_secs: self.state.time_secs(),
            rounds_played: self.state.round_winners.len(),
            round_winners: self.state.round_winners.clone(),
            scoreboard: self.state.scoreboard.clone(),
            champion: self.champion().map(str::to_string),
            done: self.is_done(),
        }
    }
}
