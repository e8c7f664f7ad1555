//! Error types for the abstract-art core.
//!
//! Failures are split by when they can happen: [`ConfigError`] before any
//! random draw, [`RenderError`] during a render call, and [`ExportError`]
//! when the finished raster is written out.

use thiserror::Error;

/// A `RenderConfig` failed validation. Always raised before the PRNG is seeded.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Canvas width or height was zero, or `width * height` overflowed.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A `[min, max]` range had `min > max`.
    #[error("invalid {name} range: min {min} is greater than max {max}")]
    InvalidRange { name: String, min: i64, max: i64 },

    /// The minimum shape size was zero.
    #[error("shape sizes must be greater than zero")]
    NonPositiveSize,

    /// No shape kind was enabled.
    #[error("at least one shape kind must be enabled")]
    EmptyShapeSet,

    /// Detail level below the 3-vertex minimum.
    #[error("detail level {0} is too low: must be at least 3")]
    DetailTooLow(u32),

    /// Radial symmetry with fewer than two sections.
    #[error("radial symmetry needs at least 2 sections, got {0}")]
    TooFewSections(u32),

    /// Density outside [0, 1] (or not finite).
    #[error("density {0} is out of range: must be within [0, 1]")]
    DensityOutOfRange(f64),

    /// Texture intensity above 100.
    #[error("texture intensity {0} is out of range: must be within [0, 100]")]
    IntensityOutOfRange(u32),

    /// Alpha bound above 255.
    #[error("alpha {0} is out of range: must be within [0, 255]")]
    AlphaOutOfRange(u32),

    /// Harmony saturation or value outside [0, 1], or hue outside [0, 360].
    #[error("harmony {name} {value} is out of range")]
    HarmonyOutOfRange { name: String, value: f64 },

    /// A selected palette index does not exist.
    #[error("selected palette index {index} is out of bounds for a palette of {len} colors")]
    SelectionOutOfBounds { index: usize, len: usize },

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A named palette does not exist.
    #[error("unknown palette: {0}")]
    UnknownPalette(String),

    /// A mode name (harmony, symmetry, ...) was not recognized.
    #[error("unknown {kind} mode: {name}")]
    UnknownMode { kind: &'static str, name: String },

    /// Gradient complexity of zero (a gradient needs at least two stops).
    #[error("gradient complexity must be at least 1")]
    ZeroGradientComplexity,

    /// Stroke enabled with a zero width.
    #[error("stroke width must be greater than zero")]
    ZeroStrokeWidth,
}

/// A render call failed. No partial canvas is ever returned alongside one.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The configuration was rejected before drawing.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Neither the palette selection nor the harmony engine produced a color.
    #[error("no colors available: palette selection and harmony are both empty")]
    EmptyColorSet,

    /// The raster backend could not allocate or draw.
    #[error("canvas error: {0}")]
    Canvas(String),
}

/// Writing a finished image failed.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The destination could not be created or written.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The encoder rejected the image.
    #[error("encode error: {0}")]
    Encode(String),

    /// The pixel buffer does not match the declared dimensions.
    #[error("pixel buffer of {len} bytes does not match {width}x{height} RGBA")]
    SizeMismatch { width: u32, height: u32, len: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_range_includes_name_and_bounds() {
        let err = ConfigError::InvalidRange {
            name: "size".into(),
            min: 50,
            max: 10,
        };
        let msg = format!("{err}");
        assert!(msg.contains("size"), "missing range name in: {msg}");
        assert!(msg.contains("50"), "missing min in: {msg}");
        assert!(msg.contains("10"), "missing max in: {msg}");
    }

    #[test]
    fn detail_too_low_includes_value() {
        let msg = ConfigError::DetailTooLow(2).to_string();
        assert!(msg.contains('2'), "missing detail in: {msg}");
    }

    #[test]
    fn selection_out_of_bounds_includes_index_and_len() {
        let msg = ConfigError::SelectionOutOfBounds { index: 9, len: 6 }.to_string();
        assert!(msg.contains('9'), "missing index in: {msg}");
        assert!(msg.contains('6'), "missing len in: {msg}");
    }

    #[test]
    fn render_error_wraps_config_error_transparently() {
        let err = RenderError::from(ConfigError::EmptyShapeSet);
        assert_eq!(err.to_string(), ConfigError::EmptyShapeSet.to_string());
        assert!(matches!(err, RenderError::Config(ConfigError::EmptyShapeSet)));
    }

    #[test]
    fn export_error_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err = ExportError::from(io);
        assert!(err.to_string().contains("read-only"));
    }

    #[test]
    fn size_mismatch_reports_dimensions() {
        let err = ExportError::SizeMismatch {
            width: 4,
            height: 3,
            len: 7,
        };
        let msg = err.to_string();
        assert!(msg.contains("4x3"), "missing dimensions in: {msg}");
        assert!(msg.contains('7'), "missing len in: {msg}");
    }

    #[test]
    fn errors_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ConfigError>();
        assert_send_sync::<RenderError>();
        assert_send_sync::<ExportError>();
    }

    #[test]
    fn errors_implement_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<ConfigError>();
        assert_std_error::<RenderError>();
        assert_std_error::<ExportError>();
    }
}
