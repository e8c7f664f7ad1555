//! Color harmony engine.
//!
//! Derives a small working color set from one base hue. All hue arithmetic is
//! mod 360 in HSV space; saturation and value stay within [0, 1].

use serde::{Deserialize, Serialize};

use crate::color::{normalize_hue, srgb_to_hsv, Hsv, Srgb};
use crate::prng::Xorshift64;

/// Rule for deriving related colors from a base hue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HarmonyMode {
    /// Base and base+180.
    #[default]
    Complementary,
    /// base-30, base, base+30.
    Analogous,
    /// Base, base+120, base+240.
    Triadic,
    /// Base, base+60, base+180, base+240.
    Tetradic,
    /// One hue at three saturation/value steps.
    Monochromatic,
    /// Four independent random colors.
    Random,
}

impl HarmonyMode {
    pub const ALL: [HarmonyMode; 6] = [
        HarmonyMode::Complementary,
        HarmonyMode::Analogous,
        HarmonyMode::Triadic,
        HarmonyMode::Tetradic,
        HarmonyMode::Monochromatic,
        HarmonyMode::Random,
    ];

    /// The snake_case name used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            HarmonyMode::Complementary => "complementary",
            HarmonyMode::Analogous => "analogous",
            HarmonyMode::Triadic => "triadic",
            HarmonyMode::Tetradic => "tetradic",
            HarmonyMode::Monochromatic => "monochromatic",
            HarmonyMode::Random => "random",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.name() == name)
    }
}

/// Derives the harmony colors for `base` under `mode`.
///
/// Only [`HarmonyMode::Random`] draws from `rng` (three integer channels per
/// color, four colors); every other mode is a pure function of `base`.
pub fn derive(mode: HarmonyMode, base: Hsv, rng: &mut Xorshift64) -> Vec<Hsv> {
    let base = Hsv {
        h: normalize_hue(base.h),
        s: base.s.clamp(0.0, 1.0),
        v: base.v.clamp(0.0, 1.0),
    };
    let rotate = |offset: f64| Hsv {
        h: normalize_hue(base.h + offset),
        ..base
    };
    match mode {
        HarmonyMode::Complementary => vec![base, rotate(180.0)],
        HarmonyMode::Analogous => vec![rotate(-30.0), base, rotate(30.0)],
        HarmonyMode::Triadic => vec![base, rotate(120.0), rotate(240.0)],
        HarmonyMode::Tetradic => vec![base, rotate(60.0), rotate(180.0), rotate(240.0)],
        HarmonyMode::Monochromatic => vec![
            Hsv {
                h: base.h,
                s: (base.s * 0.7).clamp(0.2, 1.0),
                v: (base.v * 1.2).clamp(0.2, 1.0),
            },
            base,
            Hsv {
                h: base.h,
                s: (base.s * 1.2).clamp(0.2, 1.0),
                v: (base.v * 0.7).clamp(0.2, 1.0),
            },
        ],
        HarmonyMode::Random => (0..4).map(|_| srgb_to_hsv(random_srgb(rng))).collect(),
    }
}

/// Draws an opaque random color as three integer channels in [0, 255].
pub fn random_srgb(rng: &mut Xorshift64) -> Srgb {
    let r = rng.next_int(0, 255);
    let g = rng.next_int(0, 255);
    let b = rng.next_int(0, 255);
    Srgb {
        r: r as f64 / 255.0,
        g: g as f64 / 255.0,
        b: b as f64 / 255.0,
    }
}
