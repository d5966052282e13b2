//! Audio cue log
//!
//! Nothing is synthesised here. Every sound the game would make is recorded as
//! a timestamped cue; the host bakes the log into a track after rendering.

use serde::{Deserialize, Serialize};

/// Reference pitch (Hz)
pub const BASE_FREQUENCY: f32 = 220.0;
/// Major pentatonic ratios
pub const PENTATONIC: [f32; 5] = [1.0, 1.125, 1.25, 1.5, 1.667];

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CueKind {
    /// Rising start whistle at t = 0
    Intro,
    /// Ball hits solid ring
    Bounce,
    /// Ball passes a gap
    Break,
    /// Round won
    Win,
}

/// One tone for the synthesiser
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AudioCue {
    /// Start time (seconds)
    pub time: f32,
    #[serde(rename = "type")]
    pub kind: CueKind,
    /// Hz
    pub freq: f32,
    /// Seconds
    pub dur: f32,
    pub volume: f32,
}

fn note(idx: usize) -> f32 {
    PENTATONIC[idx % PENTATONIC.len()]
}

/// Timestamped cue recorder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioLog {
    cues: Vec<AudioCue>,
    /// Walks the scale one step per bounce
    scale_idx: usize,
}

impl Default for AudioLog {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioLog {
    /// Empty log apart from the intro swoosh, so the video never opens silent
    pub fn new() -> Self {
        let mut log = Self {
            cues: Vec::new(),
            scale_idx: 0,
        };
        for i in 0..3 {
            log.cues.push(AudioCue {
                time: i as f32 * 0.06,
                kind: CueKind::Intro,
                freq: BASE_FREQUENCY * note(i) * 1.5,
                dur: 0.15,
                volume: 0.12,
            });
        }
        log
    }

    /// Bounce: next note of the scale, pitched up with speed
    pub fn bounce(&mut self, speed_ratio: f32, time: f32) {
        let freq = BASE_FREQUENCY * note(self.scale_idx) * (0.85 + speed_ratio * 0.3);
        self.scale_idx += 1;
        self.cues.push(AudioCue {
            time,
            kind: CueKind::Bounce,
            freq,
            dur: 0.08,
            volume: 0.18,
        });
    }

    /// Gap pass: low note chosen by ring slot
    pub fn ring_break(&mut self, pitch_index: usize, time: f32) {
        self.cues.push(AudioCue {
            time,
            kind: CueKind::Break,
            freq: BASE_FREQUENCY * note(pitch_index) * 0.5,
            dur: 0.15,
            volume: 0.22,
        });
    }

    /// Win: ascending three-note arpeggio
    pub fn win(&mut self, time: f32) {
        for (i, idx) in [0, 2, 4].into_iter().enumerate() {
            self.cues.push(AudioCue {
                time: time + i as f32 * 0.05,
                kind: CueKind::Win,
                freq: BASE_FREQUENCY * note(idx) * 2.0,
                dur: 0.2,
                volume: 0.15,
            });
        }
    }

    pub fn cues(&self) -> &[AudioCue] {
        &self.cues
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    /// Cue list as JSON for the synthesiser
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.cues)
    }
}
