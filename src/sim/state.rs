//! Game state and phase bookkeeping
//!
//! Everything a session needs to replay deterministically lives here: the
//! seeded RNG, the live round objects, the phase counters and the scoreboard.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::ring::Ring;
use crate::consts::*;
use crate::palette::Rgb;
use crate::scoreboard::Scoreboard;
use crate::settings::Settings;
use crate::themes::{Team, default_roster};

/// Opening captions, one picked per session
pub const HOOK_TEXTS: [&str; 5] = [
    "Who will win?",
    "Watch till the end!",
    "Can you predict this?",
    "The finale is INSANE",
    "Comment your pick!",
];

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Arena reveal before the first round
    Hook,
    /// Live round
    Playing,
    /// Celebration hold after a ball escapes
    WinnerPause,
    /// White flash between rounds
    Flash,
    /// Final standings
    Endcard,
    /// Session over, updates are no-ops
    Done,
}

impl GamePhase {
    /// Transition table
    pub fn can_enter(self, next: GamePhase) -> bool {
        use GamePhase::*;
        matches!(
            (self, next),
            (Hook, Playing)
                | (Playing, WinnerPause)
                | (WinnerPause, Flash)
                | (WinnerPause, Endcard)
                | (Flash, Playing)
                | (Endcard, Done)
        )
    }
}

/// Something the host-side collaborators react to (sound, particles, shake)
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A ball passed through a ring's gap
    RingHit {
        slot: usize,
        /// Break note index, 0 for the outermost ring
        pitch: usize,
        pos: Vec2,
        color: Rgb,
        destroyed: bool,
    },
    /// A ball bounced off solid ring
    Bounce { pos: Vec2, speed_ratio: f32 },
    /// A round's objects were spawned
    RoundStarted { round: usize, rings: usize },
    /// A ball escaped every ring
    RoundWon {
        round: usize,
        team: String,
        pos: Vec2,
    },
    PhaseChanged { from: GamePhase, to: GamePhase },
    Flash { strength: f32 },
    Confetti { pos: Vec2, count: u32 },
}

/// Pixel sizes derived from the frame height
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArenaGeometry {
    pub center: Vec2,
    pub ring_thickness: f32,
    pub ring_spacing: f32,
    /// Free radius inside the innermost ring
    pub base_radius: f32,
    pub ball_radius: f32,
    /// Ball cruising speed (px/frame)
    pub ball_speed: f32,
}

impl ArenaGeometry {
    /// Thickness and ball radius never drop below one pixel, so tiny frames
    /// still have a contact band
    pub fn new(width: u32, height: u32) -> Self {
        let h = height as f32;
        Self {
            center: Vec2::new(width as f32 / 2.0, h / 2.0),
            ring_thickness: (h * RING_THICKNESS_RATIO).floor().max(1.0),
            ring_spacing: (h * RING_SPACING_RATIO).floor(),
            base_radius: (h * BASE_RADIUS_RATIO).floor(),
            ball_radius: (h * BALL_RADIUS_RATIO).floor().max(1.0),
            ball_speed: h * BALL_SPEED_RATIO,
        }
    }

    /// Outer radius of ring `slot` (0 = innermost)
    pub fn ring_radius(&self, slot: usize) -> f32 {
        self.base_radius + (slot + 1) as f32 * (self.ring_thickness + self.ring_spacing)
    }

    /// Outer radius of the outermost of `rings` rings
    pub fn max_radius(&self, rings: usize) -> f32 {
        self.ring_radius(rings.saturating_sub(1))
    }

    /// Distance a ball must pass to escape `rings` rings
    pub fn escape_radius(&self, rings: usize) -> f32 {
        self.max_radius(rings) + ESCAPE_MARGIN
    }
}

/// Random dark, blue-leaning background tint
pub fn roll_background<R: Rng + ?Sized>(rng: &mut R) -> Rgb {
    Rgb::new(
        rng.random_range(5..=25),
        rng.random_range(5..=20),
        rng.random_range(30..=60),
    )
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    /// The only randomness source
    pub rng: Pcg32,
    pub width: u32,
    pub height: u32,
    pub geometry: ArenaGeometry,
    pub settings: Settings,

    pub phase: GamePhase,
    /// Frames since the current phase began
    pub phase_frame: u32,
    /// Global frame counter (never resets)
    pub frame_count: u64,
    /// Current round (0-based)
    pub round_index: usize,
    /// Frames since the current round started playing
    pub round_frame: u32,
    pub round_winner: Option<String>,
    /// Winner of each completed round, in order
    pub round_winners: Vec<String>,

    /// Live rings, slot 0 innermost
    pub rings: Vec<Ring>,
    /// Live balls, in roster order
    pub balls: Vec<Ball>,

    /// Teams in play, scoreboard order
    pub roster: Vec<Team>,
    pub scoreboard: Scoreboard,

    /// Background tint
    pub background: Rgb,
    /// Host fixed the tint, so rounds keep it
    pub background_fixed: bool,
    pub hook_text: &'static str,

    /// Events produced since the host last drained them
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session and pre-spawn round 1 so the hook can show the arena
    ///
    /// Fewer than two rivals falls back to the default roster.
    pub fn new(
        width: u32,
        height: u32,
        seed: u64,
        settings: Settings,
        rivals: Vec<Team>,
        background: Option<Rgb>,
    ) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);

        let roster = if rivals.len() >= BALLS_PER_ROUND {
            rivals
        } else {
            if !rivals.is_empty() {
                log::warn!(
                    "{} rival(s) supplied, need {BALLS_PER_ROUND}; using default teams",
                    rivals.len()
                );
            }
            default_roster()
        };
        let scoreboard = Scoreboard::new(roster.iter().map(|t| t.name.clone()));

        let background_fixed = background.is_some();
        let background = match background {
            Some(color) => color,
            None => roll_background(&mut rng),
        };
        let hook_text = HOOK_TEXTS[rng.random_range(0..HOOK_TEXTS.len())];

        let mut state = Self {
            seed,
            rng,
            width,
            height,
            geometry: ArenaGeometry::new(width, height),
            settings,
            phase: GamePhase::Hook,
            phase_frame: 0,
            frame_count: 0,
            round_index: 0,
            round_frame: 0,
            round_winner: None,
            round_winners: Vec::new(),
            rings: Vec::new(),
            balls: Vec::new(),
            roster,
            scoreboard,
            background,
            background_fixed,
            hook_text,
            events: Vec::new(),
        };

        super::round::spawn_round(&mut state, 0);
        state
    }

    /// Move to `next`, resetting the phase counter
    ///
    /// Transitions missing from [`GamePhase::can_enter`] are refused.
    pub fn enter_phase(&mut self, next: GamePhase) -> bool {
        if !self.phase.can_enter(next) {
            log::error!("Refusing phase change {:?} -> {:?}", self.phase, next);
            return false;
        }
        log::info!(
            "Phase {:?} -> {:?} at frame {}",
            self.phase,
            next,
            self.frame_count
        );
        self.events.push(GameEvent::PhaseChanged {
            from: self.phase,
            to: next,
        });
        self.phase = next;
        self.phase_frame = 0;
        true
    }

    /// Seconds since the session began (audio timestamps)
    pub fn time_secs(&self) -> f32 {
        self.frame_count as f32 / self.settings.fps as f32
    }

    pub fn total_rounds(&self) -> usize {
        self.settings.rounds.len()
    }

    /// Escape distance for the live round
    pub fn escape_radius(&self) -> f32 {
        self.geometry.escape_radius(self.rings.len())
    }

    pub fn is_done(&self) -> bool {
        self.phase == GamePhase::Done
    }

    /// Take every pending event
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette;

    fn state(seed: u64) -> GameState {
        GameState::new(1080, 1920, seed, Settings::default(), Vec::new(), None)
    }

    #[test]
    fn test_transition_table() {
        use GamePhase::*;
        assert!(Hook.can_enter(Playing));
        assert!(Playing.can_enter(WinnerPause));
        assert!(WinnerPause.can_enter(Flash));
        assert!(WinnerPause.can_enter(Endcard));
        assert!(Flash.can_enter(Playing));
        assert!(Endcard.can_enter(Done));

        assert!(!Hook.can_enter(Endcard));
        assert!(!Playing.can_enter(Flash));
        assert!(!Playing.can_enter(Playing));
        assert!(!Done.can_enter(Hook));
        assert!(!Done.can_enter(Playing));
    }

    #[test]
    fn test_illegal_transition_is_refused() {
        let mut s = state(1);
        s.phase_frame = 7;
        assert!(!s.enter_phase(GamePhase::Done));
        assert_eq!(s.phase, GamePhase::Hook);
        assert_eq!(s.phase_frame, 7);

        assert!(s.enter_phase(GamePhase::Playing));
        assert_eq!(s.phase_frame, 0);
        assert!(s.events.contains(&GameEvent::PhaseChanged {
            from: GamePhase::Hook,
            to: GamePhase::Playing
        }));
    }

    #[test]
    fn test_geometry_for_portrait_video() {
        let g = ArenaGeometry::new(1080, 1920);
        assert_eq!(g.center, Vec2::new(540.0, 960.0));
        assert_eq!(g.ring_thickness, 34.0);
        assert_eq!(g.ring_spacing, 26.0);
        assert_eq!(g.base_radius, 230.0);
        assert_eq!(g.ball_radius, 42.0);
        assert_eq!(g.ring_radius(0), 290.0);
        assert_eq!(g.max_radius(5), 530.0);
        assert_eq!(g.escape_radius(5), 630.0);
    }

    #[test]
    fn test_geometry_for_tiny_frames() {
        for height in [1, 20, 40, 45] {
            let g = ArenaGeometry::new(24, height);
            assert_eq!(g.ring_thickness, 1.0);
            assert_eq!(g.ball_radius, 1.0);
        }
        let g = ArenaGeometry::new(24, 60);
        assert_eq!(g.ring_thickness, 1.0);
        assert_eq!(g.ball_radius, 1.0);
        assert_eq!(g.ring_spacing, 0.0);
    }

    #[test]
    fn test_new_prespawns_first_round() {
        let s = state(42);
        assert_eq!(s.phase, GamePhase::Hook);
        assert_eq!(s.rings.len(), 5);
        assert_eq!(s.balls.len(), 2);
        assert_eq!(s.balls[0].team, "RED");
        assert_eq!(s.balls[1].team, "BLUE");
        assert_eq!(s.scoreboard.entries.len(), 3);
        assert!(HOOK_TEXTS.contains(&s.hook_text));
    }

    #[test]
    fn test_too_few_rivals_fall_back() {
        let one = vec![Team::new("Solo", palette::WHITE)];
        let s = GameState::new(1080, 1920, 3, Settings::default(), one, None);
        assert_eq!(s.roster.len(), 3);
        assert_eq!(s.scoreboard.get("Solo"), None);
        assert_eq!(s.scoreboard.get("RED"), Some(0));
    }

    #[test]
    fn test_fixed_background_is_kept() {
        let tint = Rgb::new(1, 2, 3);
        let s = GameState::new(1080, 1920, 3, Settings::default(), Vec::new(), Some(tint));
        assert!(s.background_fixed);
        assert_eq!(s.background, tint);
    }

    #[test]
    fn test_rolled_background_range() {
        let mut rng = Pcg32::seed_from_u64(9);
        for _ in 0..200 {
            let c = roll_background(&mut rng);
            assert!((5..=25).contains(&c.r));
            assert!((5..=20).contains(&c.g));
            assert!((30..=60).contains(&c.b));
        }
    }

    #[test]
    fn test_same_seed_same_arena() {
        let a = state(1234);
        let b = state(1234);
        assert_eq!(a.background, b.background);
        assert_eq!(a.hook_text, b.hook_text);
        for (ra, rb) in a.rings.iter().zip(&b.rings) {
            assert_eq!(ra.gap_angle, rb.gap_angle);
        }
        for (ba, bb) in a.balls.iter().zip(&b.balls) {
            assert_eq!(ba.pos, bb.pos);
            assert_eq!(ba.vel, bb.vel);
        }
    }
}
