#![deny(unsafe_code)]
//! Raster side of the abstract-art generator.
//!
//! Turns a validated `RenderConfig` from `abstract-art-core` into pixels with
//! tiny-skia: background, shapes under symmetry, texture overlay. The
//! `export` feature (default on) adds PNG/JPEG writing through `image`.

pub mod background;
pub mod canvas;
pub mod pipeline;
pub mod pixel;
pub mod raster;
pub mod texture;

#[cfg(feature = "export")]
pub mod export;

pub use canvas::Canvas;
pub use pipeline::{render, working_colors, RenderedImage};

#[cfg(feature = "export")]
pub use export::{export, save, ExportFormat};
