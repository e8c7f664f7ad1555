//! PNG and JPEG export of a finished render.
//!
//! Feature-gated behind `export` (default on) so that the pipeline can be
//! embedded without pulling in the `image` crate.

use std::path::{Path, PathBuf};

use abstract_art_core::error::ExportError;
use image::{ImageError, ImageFormat, RgbImage, RgbaImage};

use crate::pipeline::RenderedImage;
use crate::pixel::rgba_to_rgb;

/// Supported output encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    /// Lossy, alpha dropped.
    Jpeg,
}

impl ExportFormat {
    /// Format implied by the file extension, case-insensitive.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(ExportFormat::Png),
            "jpg" | "jpeg" => Some(ExportFormat::Jpeg),
            _ => None,
        }
    }
}

fn encode_error(err: ImageError) -> ExportError {
    match err {
        ImageError::IoError(io) => ExportError::Io(io),
        other => ExportError::Encode(other.to_string()),
    }
}

/// Writes `image` to `path` in `format`.
///
/// Returns `ExportError::SizeMismatch` if the pixel buffer does not match the
/// image dimensions, `ExportError::Io` on write failure.
pub fn export(image: &RenderedImage, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
    let mismatch = || ExportError::SizeMismatch {
        width: image.width,
        height: image.height,
        len: image.pixels.len(),
    };
    match format {
        ExportFormat::Png => {
            let img = RgbaImage::from_raw(image.width, image.height, image.pixels.clone())
                .ok_or_else(mismatch)?;
            img.save_with_format(path, ImageFormat::Png)
                .map_err(encode_error)
        }
        ExportFormat::Jpeg => {
            if image.pixels.len() != image.width as usize * image.height as usize * 4 {
                return Err(mismatch());
            }
            let img = RgbImage::from_raw(image.width, image.height, rgba_to_rgb(&image.pixels))
                .ok_or_else(mismatch)?;
            img.save_with_format(path, ImageFormat::Jpeg)
                .map_err(encode_error)
        }
    }
}

/// Writes `image` choosing the format from the extension.
///
/// An unrecognized or missing extension gets `.png` appended. Returns the
/// path actually written.
pub fn save(image: &RenderedImage, path: &Path) -> Result<PathBuf, ExportError> {
    let (path, format) = match ExportFormat::from_path(path) {
        Some(format) => (path.to_path_buf(), format),
        None => {
            let mut name = path.as_os_str().to_owned();
            name.push(".png");
            (PathBuf::from(name), ExportFormat::Png)
        }
    };
    export(image, &path, format)?;
    log::info!("wrote {}", path.display());
    Ok(path)
}
