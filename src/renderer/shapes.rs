//! Rasterised 2D primitives

use glam::Vec2;

use super::frame::FrameBuffer;
use crate::angle_degrees;
use crate::palette::Rgb;
use crate::texture::Texture;

/// Pixel range covering [lo, hi] clipped to [0, max)
fn span(lo: f32, hi: f32, max: u32) -> std::ops::Range<i32> {
    let a = lo.floor().max(0.0) as i32;
    let b = (hi.ceil() + 1.0).min(max as f32) as i32;
    a..b.max(a)
}

/// Edge coverage of a pixel `d` px inside a boundary (1px feather)
#[inline]
fn coverage(d: f32) -> f32 {
    (d + 0.5).clamp(0.0, 1.0)
}

pub fn fill_rect(fb: &mut FrameBuffer, min: Vec2, max: Vec2, color: Rgb, alpha: f32) {
    for y in span(min.y, max.y - 1.0, fb.height()) {
        for x in span(min.x, max.x - 1.0, fb.width()) {
            fb.blend(x, y, color, alpha);
        }
    }
}

/// Anti-aliased filled circle
pub fn disk(fb: &mut FrameBuffer, center: Vec2, radius: f32, color: Rgb, alpha: f32) {
    if radius <= 0.0 {
        return;
    }
    for y in span(center.y - radius, center.y + radius, fb.height()) {
        for x in span(center.x - radius, center.x + radius, fb.width()) {
            let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            let c = coverage(radius - p.distance(center));
            if c > 0.0 {
                fb.blend(x, y, color, alpha * c);
            }
        }
    }
}

/// Band between `inner` and `outer`, leaving out angles where `in_gap` holds
pub fn annulus(
    fb: &mut FrameBuffer,
    center: Vec2,
    inner: f32,
    outer: f32,
    color: Rgb,
    alpha: f32,
    in_gap: impl Fn(f32) -> bool,
) {
    for y in span(center.y - outer, center.y + outer, fb.height()) {
        for x in span(center.x - outer, center.x + outer, fb.width()) {
            let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            let d = p.distance(center);
            let c = coverage(outer - d).min(coverage(d - inner));
            if c > 0.0 && !in_gap(angle_degrees(p, center)) {
                fb.blend(x, y, color, alpha * c);
            }
        }
    }
}

/// Fading trail, `points` oldest first; newer points are larger
pub fn trail(fb: &mut FrameBuffer, points: &[Vec2], radius: f32, color: Rgb, alpha: f32) {
    let n = points.len().max(1) as f32;
    for (i, &p) in points.iter().enumerate() {
        let fade = (i + 1) as f32 / n;
        disk(fb, p, (radius * fade * 0.8).max(1.0), color, alpha);
    }
}

/// Circle filled with a texture stretched over its bounding square
pub fn textured_disk(fb: &mut FrameBuffer, center: Vec2, radius: f32, texture: &Texture) {
    if radius <= 0.0 {
        return;
    }
    let size = radius * 2.0;
    let origin = center - Vec2::splat(radius);
    for y in span(center.y - radius, center.y + radius, fb.height()) {
        for x in span(center.x - radius, center.x + radius, fb.width()) {
            let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            let c = coverage(radius - p.distance(center));
            if c <= 0.0 {
                continue;
            }
            let uv = (p - origin) / size;
            let [r, g, b, a] = texture.sample(uv.x, uv.y);
            fb.blend(x, y, Rgb::new(r, g, b), c * a as f32 / 255.0);
        }
    }
}

/// One-pixel grid lines every `spacing` px, shifted by `offset`
pub fn grid(fb: &mut FrameBuffer, spacing: f32, offset: Vec2, color: Rgb) {
    if spacing < 1.0 {
        return;
    }
    let (w, h) = (fb.width() as i32, fb.height() as i32);
    let mut x = -offset.x.rem_euclid(spacing);
    while x < w as f32 {
        let xi = x.round() as i32;
        for y in 0..h {
            fb.blend(xi, y, color, 1.0);
        }
        x += spacing;
    }
    let mut y = -offset.y.rem_euclid(spacing);
    while y < h as f32 {
        let yi = y.round() as i32;
        for x in 0..w {
            fb.blend(x, yi, color, 1.0);
        }
        y += spacing;
    }
}
