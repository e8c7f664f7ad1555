//! Texture overlays painted on a transparent layer and composited last.
//!
//! Densities scale with the normalized intensity `i` in [0, 1]: noise and
//! paper test one uniform draw per grid cell, lines and dots draw a fixed
//! count of marks.

use abstract_art_core::color::ColorSpec;
use abstract_art_core::config::{TextureConfig, TextureKind};
use abstract_art_core::error::RenderError;
use abstract_art_core::prng::Xorshift64;
use glam::DVec2;
use tiny_skia::{FillRule, PathBuilder, Rect, Stroke, Transform};

use crate::canvas::Canvas;
use crate::raster::{ellipse_path, solid_paint};

const NOISE_GRID: usize = 5;
const PAPER_GRID: usize = 3;
const PAPER_GREY: u8 = 200;

/// Builds the overlay layer for `config` at the given canvas size.
pub fn overlay(
    width: u32,
    height: u32,
    config: &TextureConfig,
    rng: &mut Xorshift64,
) -> Result<Canvas, RenderError> {
    let mut layer = Canvas::new(width, height)?;
    let intensity = config.normalized_intensity();
    match config.kind {
        TextureKind::Noise => noise(&mut layer, intensity, rng),
        TextureKind::Lines => lines(&mut layer, intensity, rng),
        TextureKind::Dots => dots(&mut layer, intensity, rng),
        TextureKind::Paper => paper(&mut layer, intensity, rng),
    }
    Ok(layer)
}

fn dot(layer: &mut Canvas, x: f64, y: f64, size: f64, alpha: u8) {
    if let Some(path) = ellipse_path(DVec2::new(x, y), DVec2::splat(size)) {
        layer.pixmap_mut().fill_path(
            &path,
            &solid_paint(ColorSpec::BLACK.with_alpha(alpha)),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }
}

fn noise(layer: &mut Canvas, intensity: f64, rng: &mut Xorshift64) {
    let (w, h) = layer.size();
    for x in (0..w as usize).step_by(NOISE_GRID) {
        for y in (0..h as usize).step_by(NOISE_GRID) {
            if rng.next_uniform() < intensity * 0.3 {
                let size = rng.next_int(1, 4) as f64;
                let alpha = rng.next_int(30, 100) as u8;
                dot(layer, x as f64, y as f64, size, alpha);
            }
        }
    }
}

fn lines(layer: &mut Canvas, intensity: f64, rng: &mut Xorshift64) {
    let (w, h) = layer.size();
    let count = (50.0 * intensity) as usize;
    for _ in 0..count {
        let x1 = rng.next_int(0, w as i64);
        let y1 = rng.next_int(0, h as i64);
        let x2 = x1 + rng.next_int(-50, 50);
        let y2 = y1 + rng.next_int(-50, 50);
        let width = rng.next_int(1, 3) as f32;
        let alpha = rng.next_int(30, 80) as u8;

        let mut pb = PathBuilder::new();
        pb.move_to(x1 as f32, y1 as f32);
        pb.line_to(x2 as f32, y2 as f32);
        let Some(path) = pb.finish() else {
            continue;
        };
        let stroke = Stroke {
            width,
            ..Stroke::default()
        };
        layer.pixmap_mut().stroke_path(
            &path,
            &solid_paint(ColorSpec::BLACK.with_alpha(alpha)),
            &stroke,
            Transform::identity(),
            None,
        );
    }
}

fn dots(layer: &mut Canvas, intensity: f64, rng: &mut Xorshift64) {
    let (w, h) = layer.size();
    let count = (500.0 * intensity) as usize;
    for _ in 0..count {
        let x = rng.next_int(0, w as i64) as f64;
        let y = rng.next_int(0, h as i64) as f64;
        let size = rng.next_int(1, 4) as f64;
        let alpha = rng.next_int(30, 100) as u8;
        dot(layer, x, y, size, alpha);
    }
}

fn paper(layer: &mut Canvas, intensity: f64, rng: &mut Xorshift64) {
    let (w, h) = layer.size();
    for x in (0..w as usize).step_by(PAPER_GRID) {
        for y in (0..h as usize).step_by(PAPER_GRID) {
            if rng.next_uniform() < intensity * 0.1 {
                let alpha = rng.next_int(5, 15) as u8;
                let Some(rect) = Rect::from_xywh(x as f32, y as f32, 2.0, 2.0) else {
                    continue;
                };
                let grain = ColorSpec::rgba(PAPER_GREY, PAPER_GREY, PAPER_GREY, alpha);
                layer.pixmap_mut().fill_rect(
                    rect,
                    &solid_paint(grain),
                    Transform::identity(),
                    None,
                );
            }
        }
    }
}
