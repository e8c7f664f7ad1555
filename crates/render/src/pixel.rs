//! Pixel buffer conversion out of tiny-skia's premultiplied storage.

use tiny_skia::Pixmap;

/// Straight (non-premultiplied) RGBA8, row-major, `width * height * 4` bytes.
pub fn pixmap_to_rgba(pixmap: &Pixmap) -> Vec<u8> {
    pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect()
}

/// Drops the alpha channel of an RGBA8 buffer.
pub fn rgba_to_rgb(rgba: &[u8]) -> Vec<u8> {
    rgba.chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect()
}
