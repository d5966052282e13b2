//! Colors for game elements

use serde::{Deserialize, Serialize};

/// 8-bit RGB color, serialized as `[r, g, b]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale every channel by `factor` (clamped to [0, 1]), truncating like an int cast
    pub fn scaled(self, factor: f32) -> Self {
        let f = factor.clamp(0.0, 1.0);
        Self {
            r: (self.r as f32 * f) as u8,
            g: (self.g as f32 * f) as u8,
            b: (self.b as f32 * f) as u8,
        }
    }

    /// Scale every channel by `factor`, saturating at 255
    pub fn brightened(self, factor: f32) -> Self {
        let f = factor.max(0.0);
        Self {
            r: (self.r as f32 * f).min(255.0) as u8,
            g: (self.g as f32 * f).min(255.0) as u8,
            b: (self.b as f32 * f).min(255.0) as u8,
        }
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(c: Rgb) -> Self {
        [c.r, c.g, c.b]
    }
}

/// Team colors for the default roster
pub const RED: Rgb = Rgb::new(255, 50, 50);
pub const BLUE: Rgb = Rgb::new(50, 120, 255);
pub const GREEN: Rgb = Rgb::new(50, 255, 120);

/// Ball color while speed-boosted
pub const BOOST: Rgb = Rgb::new(255, 220, 80);
/// Trail color while speed-boosted
pub const BOOST_TRAIL: Rgb = Rgb::new(255, 255, 150);
pub const WHITE: Rgb = Rgb::new(255, 255, 255);
pub const CENTER_DOT: Rgb = Rgb::new(40, 40, 60);

/// Ring colors, outermost ring first
pub const RING_COLORS: [Rgb; 8] = [
    Rgb::new(140, 70, 255),
    Rgb::new(110, 120, 255),
    Rgb::new(70, 150, 255),
    Rgb::new(20, 200, 230),
    Rgb::new(30, 210, 180),
    Rgb::new(50, 220, 110),
    Rgb::new(250, 200, 20),
    Rgb::new(255, 130, 30),
];
