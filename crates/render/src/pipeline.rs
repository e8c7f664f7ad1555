//! The render pipeline: one config in, one finished raster out.
//!
//! Stages run in a fixed order against a single PRNG stream seeded from the
//! config: background, working colors, shapes (each drawn under every
//! symmetry placement), then the optional texture overlay. Identical configs
//! therefore always produce identical pixels.

use abstract_art_core::color::ColorSpec;
use abstract_art_core::config::RenderConfig;
use abstract_art_core::error::{ConfigError, RenderError};
use abstract_art_core::geometry::{ShapeKind, ShapeParams};
use abstract_art_core::harmony;
use abstract_art_core::paint::ShapePaint;
use abstract_art_core::palette::Palette;
use abstract_art_core::prng::Xorshift64;
use abstract_art_core::symmetry::Symmetry;
use log::{debug, trace};
use serde::Serialize;

use crate::background;
use crate::canvas::Canvas;
use crate::raster::ShapeRaster;
use crate::texture;

/// A finished render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedImage {
    pub width: u32,
    pub height: u32,
    /// Straight RGBA8, row-major.
    #[serde(skip)]
    pub pixels: Vec<u8>,
    /// Logical shapes drawn, before symmetry.
    pub shape_count_used: usize,
    pub seed_used: u64,
    /// Shape draws including every symmetry copy.
    pub copies_drawn: usize,
}

impl RenderedImage {
    /// One-line status, e.g. `Rendered 75 shapes with seed 42`.
    pub fn summary(&self) -> String {
        format!(
            "Rendered {} shapes with seed {}",
            self.shape_count_used, self.seed_used
        )
    }
}

/// The colors shapes are painted with: the explicit palette selection when
/// there is one, otherwise the harmony derived from the base hue.
pub fn working_colors(
    config: &RenderConfig,
    rng: &mut Xorshift64,
) -> Result<Vec<ColorSpec>, RenderError> {
    let colors: Vec<ColorSpec> = if config.palette.selected.is_empty() {
        harmony::derive(config.harmony.mode, config.harmony.base(), rng)
            .into_iter()
            .map(|hsv| ColorSpec::from_hsv(hsv, 255))
            .collect()
    } else {
        Palette::new(config.palette.colors.clone())
            .select(&config.palette.selected)?
            .into_iter()
            .map(|c| ColorSpec::from_srgb(c, 255))
            .collect()
    };
    if colors.is_empty() {
        return Err(RenderError::EmptyColorSet);
    }
    Ok(colors)
}

/// Renders `config` into a new image.
///
/// The config is validated before the PRNG is seeded; a rejected config
/// never produces a partial canvas.
pub fn render(config: &RenderConfig) -> Result<RenderedImage, RenderError> {
    config.validate()?;
    let (width, height) = (config.width, config.height);
    debug!("rendering {width}x{height} with seed {}", config.seed);

    let mut rng = Xorshift64::new(config.seed);
    let mut canvas = Canvas::new(width, height)?;
    background::paint(&mut canvas, config, &mut rng)?;

    let colors = working_colors(config, &mut rng)?;
    let kinds: Vec<ShapeKind> = config.shapes.enabled.iter().copied().collect();
    let params = ShapeParams::from_config(config);
    let symmetry = Symmetry::new(
        config.symmetry.mode,
        config.symmetry.sections,
        width,
        height,
    );
    let arc_width = config.stroke.width.max(1) as f64;
    let shape_count = config.shape_count();
    debug!(
        "{} working colors, {} shape kinds, {shape_count} shapes x{}",
        colors.len(),
        kinds.len(),
        symmetry.multiplicity()
    );

    let mut copies_drawn = 0;
    for index in 0..shape_count {
        let color = *rng.next_choice(&colors).ok_or(RenderError::EmptyColorSet)?;
        let kind = *rng
            .next_choice(&kinds)
            .ok_or(ConfigError::EmptyShapeSet)?;
        let paint = ShapePaint::resolve(
            color,
            &config.transparency,
            &config.gradient,
            &config.stroke,
            (width, height),
            &mut rng,
        );
        let geometry = kind.generate(&params, &mut rng);
        trace!("shape {index}: {}", kind.name());

        let raster = ShapeRaster::new(&geometry, &paint, (width, height), arc_width)?;
        let pixmap = canvas.pixmap_mut();
        copies_drawn += symmetry.draw(|placement| {
            if let Some(raster) = &raster {
                raster.draw(pixmap, placement);
            }
            Ok::<(), RenderError>(())
        })?;
    }

    if config.texture.enabled {
        debug!(
            "texture overlay {} at {}",
            config.texture.kind.name(),
            config.texture.intensity
        );
        let layer = texture::overlay(width, height, &config.texture, &mut rng)?;
        canvas.composite(&layer);
    }

    Ok(RenderedImage {
        width,
        height,
        pixels: canvas.to_rgba(),
        shape_count_used: shape_count,
        seed_used: config.seed,
        copies_drawn,
    })
}
