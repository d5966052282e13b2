//! CPU frame buffer
//!
//! Pixels are `Pod` so the whole buffer can go to an encoder as raw bytes.

use bytemuck::{Pod, Zeroable};

use crate::palette::Rgb;

/// 8-bit RGBA pixel
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(c: Rgb) -> Self {
        Self::new(c.r, c.g, c.b, 255)
    }
}

#[inline]
fn mix(dst: u8, src: u8, alpha: f32) -> u8 {
    (dst as f32 + (src as f32 - dst as f32) * alpha).round() as u8
}

/// Row-major RGBA8 image
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgba::new(0, 0, 0, 255); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Raw RGBA bytes, row-major
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn fill(&mut self, color: Rgb) {
        self.pixels.fill(Rgba::opaque(color));
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Rgba> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Blend `color` over the pixel at (x, y); off-screen writes are dropped
    #[inline]
    pub fn blend(&mut self, x: i32, y: i32, color: Rgb, alpha: f32) {
        let Some(i) = self.index(x, y) else {
            return;
        };
        let a = alpha.clamp(0.0, 1.0);
        if a <= 0.0 {
            return;
        }
        let p = &mut self.pixels[i];
        p.r = mix(p.r, color.r, a);
        p.g = mix(p.g, color.g, a);
        p.b = mix(p.b, color.b, a);
        p.a = 255;
    }

    /// Blend every pixel towards `color`
    pub fn wash(&mut self, color: Rgb, alpha: f32) {
        let a = alpha.clamp(0.0, 1.0);
        if a <= 0.0 {
            return;
        }
        for p in &mut self.pixels {
            p.r = mix(p.r, color.r, a);
            p.g = mix(p.g, color.g, a);
            p.b = mix(p.b, color.b, a);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_layout() {
        let mut fb = FrameBuffer::new(2, 1);
        fb.fill(Rgb::new(1, 2, 3));
        assert_eq!(fb.as_bytes(), &[1, 2, 3, 255, 1, 2, 3, 255]);
    }

    #[test]
    fn test_blend_and_bounds() {
        let mut fb = FrameBuffer::new(4, 4);
        fb.blend(1, 1, Rgb::new(200, 100, 0), 0.5);
        assert_eq!(fb.get(1, 1), Some(Rgba::new(100, 50, 0, 255)));
        fb.blend(-1, 0, Rgb::new(255, 255, 255), 1.0);
        fb.blend(4, 0, Rgb::new(255, 255, 255), 1.0);
        assert_eq!(fb.get(4, 0), None);
        assert_eq!(fb.get(0, 0), Some(Rgba::new(0, 0, 0, 255)));
    }

    #[test]
    fn test_wash() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.wash(Rgb::new(255, 255, 255), 1.0);
        assert!(fb.pixels().iter().all(|p| *p == Rgba::new(255, 255, 255, 255)));
    }
}
