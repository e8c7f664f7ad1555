//! The raster surface a render paints into.

use abstract_art_core::color::ColorSpec;
use abstract_art_core::error::RenderError;
use tiny_skia::{Pixmap, PixmapPaint, Transform};

use crate::pixel::pixmap_to_rgba;
use crate::raster::to_color;

/// A `width × height` premultiplied RGBA surface.
#[derive(Debug, Clone)]
pub struct Canvas {
    pixmap: Pixmap,
}

impl Canvas {
    /// Allocates a fully transparent canvas.
    ///
    /// Returns `RenderError::Canvas` when the backend refuses the size.
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        let pixmap = Pixmap::new(width, height).ok_or_else(|| {
            RenderError::Canvas(format!("cannot allocate a {width}x{height} canvas"))
        })?;
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn pixmap_mut(&mut self) -> &mut Pixmap {
        &mut self.pixmap
    }

    /// Replaces every pixel with `color`.
    pub fn fill(&mut self, color: ColorSpec) {
        self.pixmap.fill(to_color(color));
    }

    /// Composites `layer` over this canvas with source-over blending.
    pub fn composite(&mut self, layer: &Canvas) {
        self.pixmap.draw_pixmap(
            0,
            0,
            layer.pixmap.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    }

    /// Straight RGBA8 copy of the canvas.
    pub fn to_rgba(&self) -> Vec<u8> {
        pixmap_to_rgba(&self.pixmap)
    }
}
