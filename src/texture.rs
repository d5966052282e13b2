//! Ball icon textures
//!
//! Themed balls can show an icon instead of a plain disk. Icons come from an
//! injected `TextureProvider` and are resolved once per ball. A failed load is
//! cached as `Fallback` so the provider is never asked twice and the ball is
//! drawn in its solid color.

use std::fmt;
use std::sync::Arc;

use crate::palette::Rgb;

/// Square RGBA icon, row-major
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    size: u32,
    pixels: Vec<[u8; 4]>,
}

impl Texture {
    /// Build a texture, checking the pixel count matches `size * size`
    pub fn new(size: u32, pixels: Vec<[u8; 4]>) -> Result<Self, TextureError> {
        let expected = size as usize * size as usize;
        if size == 0 || pixels.len() != expected {
            return Err(TextureError::BadDimensions {
                size,
                len: pixels.len(),
            });
        }
        Ok(Self { size, pixels })
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.pixels
    }

    fn is_well_formed(&self) -> bool {
        self.size > 0 && self.pixels.len() == self.size as usize * self.size as usize
    }

    /// Sample by normalized coordinates in [0, 1); transparent when out of range
    pub fn sample(&self, u: f32, v: f32) -> [u8; 4] {
        let max = self.size.saturating_sub(1) as f32;
        let x = (u.clamp(0.0, 1.0) * max).round() as usize;
        let y = (v.clamp(0.0, 1.0) * max).round() as usize;
        self.pixels
            .get(y * self.size as usize + x)
            .copied()
            .unwrap_or([0; 4])
    }
}

/// What a ball asks the provider for
#[derive(Debug, Clone, PartialEq)]
pub struct TextureRequest<'a> {
    /// Theme category (e.g. "FOOTBALL")
    pub category: &'a str,
    /// Rival name shown on the ball
    pub name: &'a str,
    /// Image search query
    pub search_query: &'a str,
    /// Ball color, for providers that tint or draw placeholders
    pub color: Rgb,
    /// Ball diameter in pixels
    pub diameter: u32,
}

/// Why an icon could not be produced
#[derive(Debug, Clone, PartialEq)]
pub enum TextureError {
    /// Provider has nothing for this request
    NotFound(String),
    /// Provider failed while fetching or decoding
    Unavailable(String),
    /// Pixel buffer does not match the declared size
    BadDimensions { size: u32, len: usize },
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureError::NotFound(name) => write!(f, "no texture for '{name}'"),
            TextureError::Unavailable(why) => write!(f, "texture provider unavailable: {why}"),
            TextureError::BadDimensions { size, len } => {
                write!(f, "texture of size {size} has {len} pixels")
            }
        }
    }
}

impl std::error::Error for TextureError {}

/// Source of ball icons
pub trait TextureProvider {
    fn load(&mut self, request: &TextureRequest<'_>) -> Result<Texture, TextureError>;
}

/// Provider that never has an icon (every ball uses its color)
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTextures;

impl TextureProvider for NoTextures {
    fn load(&mut self, request: &TextureRequest<'_>) -> Result<Texture, TextureError> {
        Err(TextureError::NotFound(request.name.to_string()))
    }
}

/// Icon resolution cached on a ball
#[derive(Debug, Clone, Default)]
pub enum IconSlot {
    /// Not asked yet
    #[default]
    Unresolved,
    /// Icon loaded
    Ready(Arc<Texture>),
    /// Load failed or the ball is not themed; draw the solid color
    Fallback,
}

impl IconSlot {
    pub fn is_resolved(&self) -> bool {
        !matches!(self, IconSlot::Unresolved)
    }

    pub fn texture(&self) -> Option<&Texture> {
        match self {
            IconSlot::Ready(tex) => Some(tex),
            _ => None,
        }
    }
}

/// Resolve an icon for one ball, turning any failure into `Fallback`
pub fn resolve_icon(
    provider: &mut dyn TextureProvider,
    category: Option<&str>,
    name: &str,
    search_query: Option<&str>,
    color: Rgb,
    diameter: u32,
) -> IconSlot {
    let (Some(category), Some(search_query)) = (category, search_query) else {
        return IconSlot::Fallback;
    };

    let request = TextureRequest {
        category,
        name,
        search_query,
        color,
        diameter,
    };
    match provider.load(&request) {
        Ok(texture) if !texture.is_well_formed() => {
            log::warn!(
                "Icon for {name} has {} pixels for size {}, using color",
                texture.pixels.len(),
                texture.size
            );
            IconSlot::Fallback
        }
        Ok(texture) => {
            log::info!("Loaded icon for {name} ({}px)", texture.size);
            IconSlot::Ready(Arc::new(texture))
        }
        Err(e) => {
            log::warn!("Icon for {name} unavailable, using color: {e}");
            IconSlot::Fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Checker {
        calls: usize,
    }

    impl TextureProvider for Checker {
        fn load(&mut self, request: &TextureRequest<'_>) -> Result<Texture, TextureError> {
            self.calls += 1;
            let size = 2;
            let c = [request.color.r, request.color.g, request.color.b, 255];
            Texture::new(size, vec![c, [0, 0, 0, 255], [0, 0, 0, 255], c])
        }
    }

    #[test]
    fn test_texture_dimension_check() {
        assert!(Texture::new(2, vec![[0; 4]; 4]).is_ok());
        assert_eq!(
            Texture::new(2, vec![[0; 4]; 3]),
            Err(TextureError::BadDimensions { size: 2, len: 3 })
        );
        assert!(Texture::new(0, Vec::new()).is_err());
    }

    #[test]
    fn test_sample_corners() {
        let tex = Texture::new(2, vec![[1; 4], [2; 4], [3; 4], [4; 4]]).unwrap();
        assert_eq!(tex.sample(0.0, 0.0), [1; 4]);
        assert_eq!(tex.sample(1.0, 0.0), [2; 4]);
        assert_eq!(tex.sample(0.0, 1.0), [3; 4]);
        assert_eq!(tex.sample(1.0, 1.0), [4; 4]);
    }

    #[test]
    fn test_resolve_icon_success() {
        let mut provider = Checker { calls: 0 };
        let slot = resolve_icon(
            &mut provider,
            Some("SPORT"),
            "Lions",
            Some("lions logo"),
            Rgb::new(200, 10, 10),
            40,
        );
        assert!(slot.texture().is_some());
        assert_eq!(provider.calls, 1);
    }

    #[test]
    fn test_resolve_icon_failure_falls_back() {
        let slot = resolve_icon(
            &mut NoTextures,
            Some("SPORT"),
            "Lions",
            Some("lions logo"),
            Rgb::new(200, 10, 10),
            40,
        );
        assert!(matches!(slot, IconSlot::Fallback));
        assert!(slot.is_resolved());
    }

    struct Truncated;

    impl TextureProvider for Truncated {
        fn load(&mut self, _request: &TextureRequest<'_>) -> Result<Texture, TextureError> {
            Ok(Texture {
                size: 8,
                pixels: Vec::new(),
            })
        }
    }

    #[test]
    fn test_malformed_icon_falls_back() {
        let slot = resolve_icon(
            &mut Truncated,
            Some("SPORT"),
            "Lions",
            Some("lions logo"),
            Rgb::new(200, 10, 10),
            40,
        );
        assert!(matches!(slot, IconSlot::Fallback));
    }

    #[test]
    fn test_sample_out_of_range_is_transparent() {
        let tex = Texture {
            size: 8,
            pixels: Vec::new(),
        };
        assert_eq!(tex.sample(0.5, 0.5), [0; 4]);
    }

    #[test]
    fn test_unthemed_ball_skips_provider() {
        let mut provider = Checker { calls: 0 };
        let slot = resolve_icon(&mut provider, None, "RED", None, Rgb::new(1, 2, 3), 40);
        assert!(matches!(slot, IconSlot::Fallback));
        assert_eq!(provider.calls, 0);
    }
}
