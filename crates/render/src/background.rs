//! Background painting, the first stage of every render.

use abstract_art_core::color::ColorSpec;
use abstract_art_core::config::{BackgroundMode, RenderConfig};
use abstract_art_core::error::RenderError;
use abstract_art_core::harmony::random_srgb;
use abstract_art_core::paint::{random_gradient, Fill};
use abstract_art_core::prng::Xorshift64;
use glam::DVec2;
use tiny_skia::{FillRule, Rect, Stroke, Transform};

use crate::canvas::Canvas;
use crate::raster::{ellipse_path, solid_paint, FillPaint};

const PATTERN_CIRCLES: usize = 100;
const PATTERN_ALPHA: u8 = 50;

fn random_color(rng: &mut Xorshift64) -> ColorSpec {
    ColorSpec::from_srgb(random_srgb(rng), 255)
}

/// Paints the configured background over the whole canvas.
pub fn paint(
    canvas: &mut Canvas,
    config: &RenderConfig,
    rng: &mut Xorshift64,
) -> Result<(), RenderError> {
    match config.background.mode {
        BackgroundMode::Random => canvas.fill(random_color(rng)),
        BackgroundMode::Solid => canvas.fill(ColorSpec::from_srgb(config.background.color, 255)),
        BackgroundMode::Gradient => gradient(canvas, config, rng)?,
        BackgroundMode::Pattern => pattern(canvas, rng),
    }
    Ok(())
}

fn gradient(
    canvas: &mut Canvas,
    config: &RenderConfig,
    rng: &mut Xorshift64,
) -> Result<(), RenderError> {
    let size = canvas.size();
    let base = random_color(rng);
    let gradient = random_gradient(base, config.gradient.kind, config.gradient.stops(), size, rng);
    let fill = FillPaint::new(&Fill::Gradient(gradient), size)?;
    let rect = Rect::from_xywh(0.0, 0.0, size.0 as f32, size.1 as f32)
        .ok_or_else(|| RenderError::Canvas("invalid background bounds".into()))?;
    canvas
        .pixmap_mut()
        .fill_rect(rect, &fill.paint(), Transform::identity(), None);
    Ok(())
}

/// White canvas under translucent circles, each with a thin black outline.
fn pattern(canvas: &mut Canvas, rng: &mut Xorshift64) {
    canvas.fill(ColorSpec::WHITE);
    let (w, h) = canvas.size();
    let outline = solid_paint(ColorSpec::BLACK);
    let stroke = Stroke {
        width: 1.0,
        ..Stroke::default()
    };
    for _ in 0..PATTERN_CIRCLES {
        let color = random_color(rng).with_alpha(PATTERN_ALPHA);
        let size = rng.next_int(10, 100) as f64;
        let x = rng.next_int(0, w as i64) as f64;
        let y = rng.next_int(0, h as i64) as f64;
        let Some(path) = ellipse_path(DVec2::new(x, y), DVec2::splat(size)) else {
            continue;
        };
        let pixmap = canvas.pixmap_mut();
        pixmap.fill_path(
            &path,
            &solid_paint(color),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
        pixmap.stroke_path(&path, &outline, &stroke, Transform::identity(), None);
    }
}
