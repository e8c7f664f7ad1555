//! Reproducible description of one artwork.
//!
//! A [`RenderConfig`] captures everything needed to recreate an image: canvas
//! size, background, palette and harmony, enabled shapes and their ranges,
//! symmetry, post-effects, shape budget and the PRNG seed. Two identical
//! configs fed to the same binary produce byte-identical rasters.
//!
//! Every section deserializes with `#[serde(default)]`, so a config file only
//! needs the fields it changes.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::color::{Hsv, Srgb};
use crate::error::ConfigError;
use crate::geometry::ShapeKind;
use crate::harmony::HarmonyMode;
use crate::paint::{GradientKind, StrokePolicy};
use crate::palette::Palette;
use crate::params::Overrides;
use crate::symmetry::SymmetryMode;

/// Inclusive `[min, max]` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span<T> {
    pub min: T,
    pub max: T,
}

impl<T> Span<T> {
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

impl<T: Copy + Into<i64>> Span<T> {
    /// Rejects `min > max` as `ConfigError::InvalidRange`.
    fn check(&self, name: &str) -> Result<(), ConfigError> {
        let (min, max) = (self.min.into(), self.max.into());
        if min > max {
            return Err(ConfigError::InvalidRange {
                name: name.to_string(),
                min,
                max,
            });
        }
        Ok(())
    }
}

/// How the canvas is painted before any shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundMode {
    /// One flat random color.
    #[default]
    Random,
    /// The configured color.
    Solid,
    /// One random-base gradient across the canvas.
    Gradient,
    /// Translucent random circles over white.
    Pattern,
}

impl BackgroundMode {
    pub const ALL: [BackgroundMode; 4] = [
        BackgroundMode::Random,
        BackgroundMode::Solid,
        BackgroundMode::Gradient,
        BackgroundMode::Pattern,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BackgroundMode::Random => "random",
            BackgroundMode::Solid => "solid",
            BackgroundMode::Gradient => "gradient",
            BackgroundMode::Pattern => "pattern",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.name() == name)
    }
}

/// Overlay painted on top of everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextureKind {
    #[default]
    Noise,
    Lines,
    Dots,
    Paper,
}

impl TextureKind {
    pub const ALL: [TextureKind; 4] = [
        TextureKind::Noise,
        TextureKind::Lines,
        TextureKind::Dots,
        TextureKind::Paper,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TextureKind::Noise => "noise",
            TextureKind::Lines => "lines",
            TextureKind::Dots => "dots",
            TextureKind::Paper => "paper",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }
}

/// What the Text primitive writes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextContent {
    /// One glyph picked per shape from a fixed set.
    #[default]
    Random,
    /// The same literal for every Text shape.
    Literal(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    pub mode: BackgroundMode,
    /// Used by [`BackgroundMode::Solid`] only.
    pub color: Srgb,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            mode: BackgroundMode::Random,
            color: Srgb {
                r: 1.0,
                g: 1.0,
                b: 1.0,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    pub colors: Vec<Srgb>,
    /// Indices into `colors`. Empty means "derive colors from the harmony".
    pub selected: Vec<usize>,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            colors: Palette::default().into_colors(),
            selected: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarmonyConfig {
    /// Degrees, [0, 360].
    pub base_hue: f64,
    pub mode: HarmonyMode,
    pub saturation: f64,
    pub value: f64,
}

impl HarmonyConfig {
    pub fn base(&self) -> Hsv {
        Hsv {
            h: self.base_hue,
            s: self.saturation,
            v: self.value,
        }
    }
}

impl Default for HarmonyConfig {
    fn default() -> Self {
        Self {
            base_hue: 180.0,
            mode: HarmonyMode::Complementary,
            saturation: 0.8,
            value: 0.9,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeConfig {
    pub enabled: BTreeSet<ShapeKind>,
    /// Pixels.
    pub size: Span<u32>,
    /// Degrees; sampled values wrap mod 360.
    pub rotation: Span<i64>,
    /// Vertex count for polygons and stars.
    pub detail: u32,
    pub text: TextContent,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self {
            enabled: ShapeKind::ALL.into_iter().collect(),
            size: Span::new(10, 150),
            rotation: Span::new(0, 360),
            detail: 8,
            text: TextContent::Random,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymmetryConfig {
    pub mode: SymmetryMode,
    /// Copies drawn by [`SymmetryMode::Radial`].
    pub sections: u32,
}

impl Default for SymmetryConfig {
    fn default() -> Self {
        Self {
            mode: SymmetryMode::None,
            sections: 6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransparencyConfig {
    pub enabled: bool,
    /// 0–255.
    pub alpha: Span<u32>,
}

impl Default for TransparencyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            alpha: Span::new(100, 255),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradientConfig {
    pub enabled: bool,
    pub kind: GradientKind,
    /// A gradient carries `complexity + 1` stops.
    pub complexity: u32,
}

impl GradientConfig {
    pub fn stops(&self) -> usize {
        self.complexity as usize + 1
    }
}

impl Default for GradientConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            kind: GradientKind::Linear,
            complexity: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeConfig {
    pub enabled: bool,
    /// Pixels.
    pub width: u32,
    pub policy: StrokePolicy,
}

impl Default for StrokeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            width: 2,
            policy: StrokePolicy::Contrast,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureConfig {
    pub enabled: bool,
    pub kind: TextureKind,
    /// 0–100.
    pub intensity: u32,
}

impl TextureConfig {
    /// Intensity mapped to [0, 1].
    pub fn normalized_intensity(&self) -> f64 {
        self.intensity as f64 / 100.0
    }
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            kind: TextureKind::Noise,
            intensity: 30,
        }
    }
}

/// Complete, immutable description of one render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub background: BackgroundConfig,
    pub palette: PaletteConfig,
    pub harmony: HarmonyConfig,
    pub shapes: ShapeConfig,
    pub symmetry: SymmetryConfig,
    pub transparency: TransparencyConfig,
    pub gradient: GradientConfig,
    pub stroke: StrokeConfig,
    pub texture: TextureConfig,
    /// Shape budget before density is applied.
    pub complexity: u32,
    /// Fraction of the budget drawn, [0, 1].
    pub density: f64,
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            background: BackgroundConfig::default(),
            palette: PaletteConfig::default(),
            harmony: HarmonyConfig::default(),
            shapes: ShapeConfig::default(),
            symmetry: SymmetryConfig::default(),
            transparency: TransparencyConfig::default(),
            gradient: GradientConfig::default(),
            stroke: StrokeConfig::default(),
            texture: TextureConfig::default(),
            complexity: 150,
            density: 0.5,
            seed: 42,
        }
    }
}

impl RenderConfig {
    /// Checks every invariant a render relies on.
    ///
    /// Called by the pipeline before the PRNG is seeded, so a rejected config
    /// never produces a partial image.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidDimensions);
        }
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|px| px.checked_mul(4))
            .ok_or(ConfigError::InvalidDimensions)?;

        let shapes = &self.shapes;
        if shapes.enabled.is_empty() {
            return Err(ConfigError::EmptyShapeSet);
        }
        shapes.size.check("size")?;
        if shapes.size.min == 0 {
            return Err(ConfigError::NonPositiveSize);
        }
        shapes.rotation.check("rotation")?;
        if shapes.detail < 3 {
            return Err(ConfigError::DetailTooLow(shapes.detail));
        }

        if self.symmetry.sections < 2 {
            return Err(ConfigError::TooFewSections(self.symmetry.sections));
        }

        let alpha = &self.transparency.alpha;
        for bound in [alpha.min, alpha.max] {
            if bound > 255 {
                return Err(ConfigError::AlphaOutOfRange(bound));
            }
        }
        alpha.check("alpha")?;

        if !self.density.is_finite() || !(0.0..=1.0).contains(&self.density) {
            return Err(ConfigError::DensityOutOfRange(self.density));
        }
        if self.texture.intensity > 100 {
            return Err(ConfigError::IntensityOutOfRange(self.texture.intensity));
        }
        if self.gradient.complexity == 0 {
            return Err(ConfigError::ZeroGradientComplexity);
        }
        if self.stroke.enabled && self.stroke.width == 0 {
            return Err(ConfigError::ZeroStrokeWidth);
        }

        let harmony = &self.harmony;
        check_unit("hue", harmony.base_hue, 360.0)?;
        check_unit("saturation", harmony.saturation, 1.0)?;
        check_unit("value", harmony.value, 1.0)?;

        let len = self.palette.colors.len();
        if let Some(&index) = self.palette.selected.iter().find(|&&i| i >= len) {
            return Err(ConfigError::SelectionOutOfBounds { index, len });
        }
        Ok(())
    }

    /// Number of shape iterations: `floor(complexity × density)`.
    pub fn shape_count(&self) -> usize {
        (self.complexity as f64 * self.density).floor().max(0.0) as usize
    }

    /// Applies a flat JSON object of overrides on top of this config.
    ///
    /// Scalar keys: `width`, `height`, `seed`, `complexity`, `density`,
    /// `detail`, `sections`, `base_hue`, `saturation`, `value`, `intensity`.
    /// Switches: `gradients`, `stroke`, `transparency`, `texture`. Names:
    /// `palette` (built-in palette, clears the selection), `harmony`,
    /// `symmetry`, `background`, `gradient`, `stroke_policy`, `texture_kind`.
    /// Unknown keys are ignored, missing keys keep the current value. The
    /// result is not validated here.
    pub fn apply_overrides(&mut self, params: &Value) -> Result<(), ConfigError> {
        let o = Overrides::new(params);
        self.width = o.u32("width", self.width);
        self.height = o.u32("height", self.height);
        self.seed = o.u64("seed", self.seed);
        self.complexity = o.u32("complexity", self.complexity);
        self.density = o.f64("density", self.density);
        self.shapes.detail = o.u32("detail", self.shapes.detail);
        self.symmetry.sections = o.u32("sections", self.symmetry.sections);
        self.harmony.base_hue = o.f64("base_hue", self.harmony.base_hue);
        self.harmony.saturation = o.f64("saturation", self.harmony.saturation);
        self.harmony.value = o.f64("value", self.harmony.value);
        self.texture.intensity = o.u32("intensity", self.texture.intensity);
        self.gradient.enabled = o.bool("gradients", self.gradient.enabled);
        self.stroke.enabled = o.bool("stroke", self.stroke.enabled);
        self.transparency.enabled = o.bool("transparency", self.transparency.enabled);
        self.texture.enabled = o.bool("texture", self.texture.enabled);

        if let Some(name) = o.name("palette") {
            self.palette.colors = Palette::from_name(name)?.into_colors();
            self.palette.selected.clear();
        }
        if let Some(mode) = o.mode("harmony", HarmonyMode::from_name)? {
            self.harmony.mode = mode;
        }
        if let Some(mode) = o.mode("symmetry", SymmetryMode::from_name)? {
            self.symmetry.mode = mode;
        }
        if let Some(mode) = o.mode("background", BackgroundMode::from_name)? {
            self.background.mode = mode;
        }
        if let Some(kind) = o.mode("gradient", GradientKind::from_name)? {
            self.gradient.kind = kind;
        }
        if let Some(policy) = o.mode("stroke_policy", StrokePolicy::from_name)? {
            self.stroke.policy = policy;
        }
        if let Some(kind) = o.mode("texture_kind", TextureKind::from_name)? {
            self.texture.kind = kind;
        }
        Ok(())
    }
}

/// Rejects values outside `[0, max]` or non-finite.
fn check_unit(name: &str, value: f64, max: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || !(0.0..=max).contains(&value) {
        return Err(ConfigError::HarmonyOutOfRange {
            name: name.to_string(),
            value,
        });
    }
    Ok(())
}
