#![deny(unsafe_code)]
//! Core model for the abstract-art generator.
//!
//! Provides the reproducible `RenderConfig` and its validation, color types
//! (`Srgb`, `Hsv`, `ColorSpec`), named `Palette`s, the color harmony engine,
//! the `Xorshift64` PRNG, shape geometry generators, symmetry placements and
//! per-shape paint resolution. Nothing here touches pixels; rasterization
//! lives in the render crate.

pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod glyph;
pub mod harmony;
pub mod paint;
pub mod palette;
pub mod params;
pub mod prng;
pub mod symmetry;

pub use color::{ColorSpec, Hsv, Srgb};
pub use config::{
    BackgroundConfig, BackgroundMode, GradientConfig, HarmonyConfig, PaletteConfig, RenderConfig,
    ShapeConfig, Span, StrokeConfig, SymmetryConfig, TextContent, TextureConfig, TextureKind,
    TransparencyConfig,
};
pub use error::{ConfigError, ExportError, RenderError};
pub use geometry::{Bounds, ShapeGeometry, ShapeKind, ShapeParams};
pub use harmony::HarmonyMode;
pub use paint::{Fill, Gradient, GradientGeometry, GradientKind, ShapePaint, StrokePolicy};
pub use palette::Palette;
pub use prng::Xorshift64;
pub use symmetry::{Symmetry, SymmetryMode};
