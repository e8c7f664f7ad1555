//! Per-shape paint resolution: alpha, fill and stroke.
//!
//! Everything here is backend-agnostic data. The render crate turns a
//! [`ShapePaint`] into rasterizer paints; this module only decides colors,
//! gradient geometry and stop jitter, in a fixed PRNG draw order.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::color::{normalize_hue, ColorSpec, Hsv};
use crate::config::{GradientConfig, StrokeConfig, TransparencyConfig};
use crate::harmony::random_srgb;
use crate::prng::Xorshift64;

/// Max hue jitter per gradient stop, degrees (a tenth of a turn).
const HUE_JITTER: f64 = 36.0;
/// Max saturation and value jitter per gradient stop.
const TONE_JITTER: f64 = 0.2;
/// Luminance above which the contrast stroke is black.
const CONTRAST_THRESHOLD: f64 = 128.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientKind {
    #[default]
    Linear,
    Radial,
    Conical,
    /// One of the three concrete kinds, picked per gradient.
    Random,
}

impl GradientKind {
    pub const ALL: [GradientKind; 4] = [
        GradientKind::Linear,
        GradientKind::Radial,
        GradientKind::Conical,
        GradientKind::Random,
    ];

    const CONCRETE: [GradientKind; 3] = [
        GradientKind::Linear,
        GradientKind::Radial,
        GradientKind::Conical,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GradientKind::Linear => "linear",
            GradientKind::Radial => "radial",
            GradientKind::Conical => "conical",
            GradientKind::Random => "random",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrokePolicy {
    /// Black on light colors, white on dark ones.
    #[default]
    Contrast,
    /// The base color's hue rotated by 180°.
    Complementary,
    Random,
    Black,
    White,
}

impl StrokePolicy {
    pub const ALL: [StrokePolicy; 5] = [
        StrokePolicy::Contrast,
        StrokePolicy::Complementary,
        StrokePolicy::Random,
        StrokePolicy::Black,
        StrokePolicy::White,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StrokePolicy::Contrast => "contrast",
            StrokePolicy::Complementary => "complementary",
            StrokePolicy::Random => "random",
            StrokePolicy::Black => "black",
            StrokePolicy::White => "white",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }
}

/// Where a gradient's colors run, in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GradientGeometry {
    Linear { start: DVec2, end: DVec2 },
    Radial { center: DVec2, radius: f64 },
    /// Sweep around `center` starting at `angle` degrees, counter-clockwise
    /// on screen.
    Conical { center: DVec2, angle: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    /// In [0, 1].
    pub position: f64,
    pub color: ColorSpec,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    pub geometry: GradientGeometry,
    pub stops: Vec<GradientStop>,
}

impl Gradient {
    /// Color at `t` in [0, 1], linearly interpolated between stops in straight RGBA.
    pub fn sample(&self, t: f64) -> ColorSpec {
        let t = t.clamp(0.0, 1.0);
        let Some(first) = self.stops.first() else {
            return ColorSpec::BLACK.with_alpha(0);
        };
        if t <= first.position {
            return first.color;
        }
        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.position {
                let span = b.position - a.position;
                let f = if span > 0.0 { (t - a.position) / span } else { 1.0 };
                return lerp(a.color, b.color, f);
            }
        }
        self.stops[self.stops.len() - 1].color
    }
}

fn lerp(a: ColorSpec, b: ColorSpec, f: f64) -> ColorSpec {
    let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * f).round() as u8;
    ColorSpec::rgba(mix(a.r, b.r), mix(a.g, b.g), mix(a.b, b.b), mix(a.a, b.a))
}

#[derive(Debug, Clone, PartialEq)]
pub enum Fill {
    Solid(ColorSpec),
    Gradient(Gradient),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokePaint {
    pub color: ColorSpec,
    pub width: f64,
}

/// Everything needed to paint one shape, shared by all its symmetry copies.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapePaint {
    /// Chosen color with the resolved alpha.
    pub base: ColorSpec,
    pub fill: Fill,
    pub stroke: Option<StrokePaint>,
}

impl ShapePaint {
    /// Resolves alpha, fill and stroke for `color`, drawing in that order.
    pub fn resolve(
        color: ColorSpec,
        transparency: &TransparencyConfig,
        gradient: &GradientConfig,
        stroke: &StrokeConfig,
        canvas: (u32, u32),
        rng: &mut Xorshift64,
    ) -> Self {
        let base = color.with_alpha(resolve_alpha(transparency, rng));
        let fill = resolve_fill(base, gradient, canvas, rng);
        let stroke = resolve_stroke(base, stroke, rng);
        Self { base, fill, stroke }
    }

    /// Color used when the shape is only stroked (arcs, lines).
    pub fn outline_color(&self) -> ColorSpec {
        self.stroke.map_or(self.base, |s| s.color)
    }
}

/// Integer alpha in the configured range, or opaque without drawing when
/// transparency is off.
pub fn resolve_alpha(config: &TransparencyConfig, rng: &mut Xorshift64) -> u8 {
    if !config.enabled {
        return 255;
    }
    rng.next_int(config.alpha.min as i64, config.alpha.max as i64)
        .clamp(0, 255) as u8
}

pub fn resolve_fill(
    base: ColorSpec,
    config: &GradientConfig,
    canvas: (u32, u32),
    rng: &mut Xorshift64,
) -> Fill {
    if !config.enabled {
        return Fill::Solid(base);
    }
    Fill::Gradient(random_gradient(base, config.kind, config.stops(), canvas, rng))
}

/// Builds a gradient of `stops` jittered variants of `base`.
///
/// Draw order: the kind (only for [`GradientKind::Random`]), the geometry
/// integers, then hue, saturation and value jitter per stop.
pub fn random_gradient(
    base: ColorSpec,
    kind: GradientKind,
    stops: usize,
    (width, height): (u32, u32),
    rng: &mut Xorshift64,
) -> Gradient {
    let kind = match kind {
        GradientKind::Random => rng
            .next_choice(&GradientKind::CONCRETE)
            .copied()
            .unwrap_or(GradientKind::Linear),
        concrete => concrete,
    };
    let (w, h) = (width as i64, height as i64);
    let point = |rng: &mut Xorshift64| {
        let x = rng.next_int(0, w);
        let y = rng.next_int(0, h);
        DVec2::new(x as f64, y as f64)
    };
    let geometry = match kind {
        GradientKind::Radial => {
            let center = point(rng);
            let half = (w.min(h) / 2).max(1);
            let radius = rng.next_int(half.min(50), half) as f64;
            GradientGeometry::Radial { center, radius }
        }
        GradientKind::Conical => {
            let center = point(rng);
            let angle = rng.next_int(0, 360) as f64;
            GradientGeometry::Conical { center, angle }
        }
        GradientKind::Linear | GradientKind::Random => {
            let start = point(rng);
            let end = point(rng);
            GradientGeometry::Linear { start, end }
        }
    };

    let hsv = base.to_hsv();
    let count = stops.max(1);
    let stops = (0..count)
        .map(|i| {
            let position = if count == 1 {
                0.5
            } else {
                i as f64 / (count - 1) as f64
            };
            let jittered = Hsv {
                h: normalize_hue(hsv.h + rng.next_range(-HUE_JITTER, HUE_JITTER)),
                s: (hsv.s + rng.next_range(-TONE_JITTER, TONE_JITTER)).clamp(0.0, 1.0),
                v: (hsv.v + rng.next_range(-TONE_JITTER, TONE_JITTER)).clamp(0.0, 1.0),
            };
            GradientStop {
                position,
                color: ColorSpec::from_hsv(jittered, base.a),
            }
        })
        .collect();
    Gradient { geometry, stops }
}

/// Outline paint, or `None` when strokes are off.
pub fn resolve_stroke(
    base: ColorSpec,
    config: &StrokeConfig,
    rng: &mut Xorshift64,
) -> Option<StrokePaint> {
    if !config.enabled {
        return None;
    }
    Some(StrokePaint {
        color: stroke_color(base, config.policy, rng),
        width: config.width as f64,
    })
}

/// Only [`StrokePolicy::Random`] draws from `rng`.
pub fn stroke_color(base: ColorSpec, policy: StrokePolicy, rng: &mut Xorshift64) -> ColorSpec {
    match policy {
        StrokePolicy::Contrast => {
            if base.luminance() > CONTRAST_THRESHOLD {
                ColorSpec::BLACK
            } else {
                ColorSpec::WHITE
            }
        }
        StrokePolicy::Complementary => {
            let hsv = base.to_hsv();
            ColorSpec::from_hsv(
                Hsv {
                    h: normalize_hue(hsv.h + 180.0),
                    ..hsv
                },
                255,
            )
        }
        StrokePolicy::Random => ColorSpec::from_srgb(random_srgb(rng), 255),
        StrokePolicy::Black => ColorSpec::BLACK,
        StrokePolicy::White => ColorSpec::WHITE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Span;

    fn grey(level: u8) -> ColorSpec {
        ColorSpec::rgb(level, level, level)
    }

    #[test]
    fn names_match_serde_tags() {
        for kind in GradientKind::ALL {
            assert_eq!(GradientKind::from_name(kind.name()), Some(kind));
            assert_eq!(serde_json::to_string(&kind).unwrap(), format!("\"{}\"", kind.name()));
        }
        for policy in StrokePolicy::ALL {
            assert_eq!(StrokePolicy::from_name(policy.name()), Some(policy));
            assert_eq!(serde_json::to_string(&policy).unwrap(), format!("\"{}\"", policy.name()));
        }
    }

    #[test]
    fn contrast_stroke_is_black_on_light_colors() {
        let mut rng = Xorshift64::new(1);
        assert_eq!(stroke_color(grey(250), StrokePolicy::Contrast, &mut rng), ColorSpec::BLACK);
    }

    #[test]
    fn contrast_stroke_is_white_on_dark_colors() {
        let mut rng = Xorshift64::new(1);
        assert_eq!(stroke_color(grey(10), StrokePolicy::Contrast, &mut rng), ColorSpec::WHITE);
    }

    #[test]
    fn complementary_stroke_rotates_hue() {
        let mut rng = Xorshift64::new(1);
        let stroke = stroke_color(ColorSpec::rgb(255, 0, 0), StrokePolicy::Complementary, &mut rng);
        assert_eq!(stroke, ColorSpec::rgb(0, 255, 255));
    }

    #[test]
    fn only_random_stroke_draws() {
        let mut a = Xorshift64::new(3);
        let mut b = Xorshift64::new(3);
        for policy in [
            StrokePolicy::Contrast,
            StrokePolicy::Complementary,
            StrokePolicy::Black,
            StrokePolicy::White,
        ] {
            stroke_color(grey(100), policy, &mut a);
        }
        assert_eq!(a.clone().next_u64(), b.next_u64());
        let random = stroke_color(grey(100), StrokePolicy::Random, &mut a);
        assert_eq!(random.a, 255);
    }

    #[test]
    fn disabled_stroke_is_none() {
        let mut rng = Xorshift64::new(1);
        let config = StrokeConfig {
            enabled: false,
            ..StrokeConfig::default()
        };
        assert_eq!(resolve_stroke(grey(0), &config, &mut rng), None);
    }

    #[test]
    fn alpha_is_opaque_and_drawless_when_transparency_off() {
        let mut a = Xorshift64::new(9);
        let mut b = Xorshift64::new(9);
        let config = TransparencyConfig {
            enabled: false,
            alpha: Span::new(10, 20),
        };
        assert_eq!(resolve_alpha(&config, &mut a), 255);
        assert_eq!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn alpha_within_configured_range() {
        let mut rng = Xorshift64::new(9);
        let config = TransparencyConfig {
            enabled: true,
            alpha: Span::new(100, 120),
        };
        for _ in 0..200 {
            assert!((100..=120).contains(&resolve_alpha(&config, &mut rng)));
        }
    }

    #[test]
    fn gradient_has_complexity_plus_one_evenly_spaced_stops() {
        let mut rng = Xorshift64::new(4);
        let g = random_gradient(grey(128), GradientKind::Linear, 4, (800, 600), &mut rng);
        let positions: Vec<f64> = g.stops.iter().map(|s| s.position).collect();
        assert_eq!(positions.len(), 4);
        for (p, expected) in positions.iter().zip([0.0, 1.0 / 3.0, 2.0 / 3.0, 1.0]) {
            assert!((p - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn gradient_stops_keep_base_alpha() {
        let mut rng = Xorshift64::new(4);
        let base = ColorSpec::rgba(200, 40, 90, 123);
        let g = random_gradient(base, GradientKind::Conical, 3, (800, 600), &mut rng);
        assert!(g.stops.iter().all(|s| s.color.a == 123));
    }

    #[test]
    fn radial_gradient_radius_within_half_canvas() {
        let mut rng = Xorshift64::new(6);
        for _ in 0..100 {
            let g = random_gradient(grey(50), GradientKind::Radial, 2, (800, 600), &mut rng);
            let GradientGeometry::Radial { radius, .. } = g.geometry else {
                panic!("expected radial geometry");
            };
            assert!((50.0..=300.0).contains(&radius));
        }
    }

    #[test]
    fn random_kind_picks_a_concrete_kind() {
        let mut rng = Xorshift64::new(2);
        let g = random_gradient(grey(50), GradientKind::Random, 2, (100, 100), &mut rng);
        assert!(matches!(
            g.geometry,
            GradientGeometry::Linear { .. }
                | GradientGeometry::Radial { .. }
                | GradientGeometry::Conical { .. }
        ));
    }

    #[test]
    fn disabled_gradient_fills_flat_base() {
        let mut rng = Xorshift64::new(2);
        let config = GradientConfig {
            enabled: false,
            ..GradientConfig::default()
        };
        let base = ColorSpec::rgba(1, 2, 3, 4);
        assert_eq!(resolve_fill(base, &config, (10, 10), &mut rng), Fill::Solid(base));
    }

    #[test]
    fn sample_interpolates_between_stops() {
        let g = Gradient {
            geometry: GradientGeometry::Linear {
                start: DVec2::ZERO,
                end: DVec2::X,
            },
            stops: vec![
                GradientStop {
                    position: 0.0,
                    color: grey(0),
                },
                GradientStop {
                    position: 1.0,
                    color: grey(200),
                },
            ],
        };
        assert_eq!(g.sample(0.5), grey(100));
        assert_eq!(g.sample(-1.0), grey(0));
        assert_eq!(g.sample(2.0), grey(200));
    }

    #[test]
    fn outline_color_prefers_stroke() {
        let paint = ShapePaint {
            base: grey(10),
            fill: Fill::Solid(grey(10)),
            stroke: Some(StrokePaint {
                color: ColorSpec::WHITE,
                width: 2.0,
            }),
        };
        assert_eq!(paint.outline_color(), ColorSpec::WHITE);
        let bare = ShapePaint {
            stroke: None,
            ..paint
        };
        assert_eq!(bare.outline_color(), grey(10));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn jittered_stops_stay_near_base_hue(
                seed: u64,
                r: u8,
                g: u8,
                b: u8,
                stops in 1_usize..8,
            ) {
                let base = ColorSpec::rgb(r, g, b);
                let mut rng = Xorshift64::new(seed);
                let gradient = random_gradient(base, GradientKind::Linear, stops, (640, 480), &mut rng);
                prop_assert_eq!(gradient.stops.len(), stops);
                for stop in &gradient.stops {
                    prop_assert!((0.0..=1.0).contains(&stop.position));
                    prop_assert_eq!(stop.color.a, 255);
                }
            }
        }
    }
}
