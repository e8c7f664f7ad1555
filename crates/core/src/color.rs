//! Color types and conversion functions for the abstract-art generator.
//!
//! Three representations are used:
//! - [`Srgb`]: float RGB in [0, 1], the configuration-facing type. It
//!   serializes as a `"#rrggbb"` hex string.
//! - [`Hsv`]: float hue (degrees) / saturation / value, where all harmony and
//!   jitter arithmetic happens.
//! - [`ColorSpec`]: 8-bit RGBA, the paint-facing type handed to the raster
//!   backend.
//!
//! Conversions are pure functions; `f64` is used throughout for precision.

use crate::error::ConfigError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// sRGB color with components in [0, 1].
///
/// Serializes as a hex string `"#rrggbb"` for human-readable formats.
/// The hex round-trip has 8-bit quantization (1/255 precision loss),
/// which is acceptable since hex colors are inherently 8-bit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Hue / saturation / value. `h` is in degrees, `s` and `v` in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

/// An 8-bit RGBA color as painted onto the canvas (straight, not premultiplied).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorSpec {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Srgb {
    /// Parses a hex color string like "#ff00aa" or "ff00aa" (case insensitive).
    ///
    /// Returns `ConfigError::InvalidColor` if the input is not a valid 6-digit hex color.
    pub fn from_hex(hex: &str) -> Result<Srgb, ConfigError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(ConfigError::InvalidColor(format!(
                "expected 6 hex digits, got {:?}",
                hex
            )));
        }
        let r = u8::from_str_radix(&hex[0..2], 16)
            .map_err(|e| ConfigError::InvalidColor(format!("invalid red component: {e}")))?;
        let g = u8::from_str_radix(&hex[2..4], 16)
            .map_err(|e| ConfigError::InvalidColor(format!("invalid green component: {e}")))?;
        let b = u8::from_str_radix(&hex[4..6], 16)
            .map_err(|e| ConfigError::InvalidColor(format!("invalid blue component: {e}")))?;
        Ok(Srgb {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        })
    }

    /// Converts the color to a hex string like `"#rrggbb"`.
    ///
    /// Components are quantized to 8-bit (0–255) with rounding.
    pub fn to_hex(self) -> String {
        let r = quantize(self.r);
        let g = quantize(self.g);
        let b = quantize(self.b);
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

impl Serialize for Srgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Srgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Srgb::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

impl ColorSpec {
    pub const BLACK: ColorSpec = ColorSpec::rgb(0, 0, 0);
    pub const WHITE: ColorSpec = ColorSpec::rgb(255, 255, 255);

    /// Creates an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Creates a color with explicit alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Quantizes a float sRGB color with the given alpha.
    pub fn from_srgb(c: Srgb, a: u8) -> Self {
        Self {
            r: quantize(c.r),
            g: quantize(c.g),
            b: quantize(c.b),
            a,
        }
    }

    /// Converts an HSV color (hue wrapped, s/v clamped) with the given alpha.
    pub fn from_hsv(c: Hsv, a: u8) -> Self {
        Self::from_srgb(hsv_to_srgb(c), a)
    }

    pub fn to_srgb(self) -> Srgb {
        Srgb {
            r: self.r as f64 / 255.0,
            g: self.g as f64 / 255.0,
            b: self.b as f64 / 255.0,
        }
    }

    pub fn to_hsv(self) -> Hsv {
        srgb_to_hsv(self.to_srgb())
    }

    /// Returns the same color with a different alpha.
    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Perceptual luminance on the 0–255 scale: `0.299 R + 0.587 G + 0.114 B`.
    pub fn luminance(self) -> f64 {
        0.299 * self.r as f64 + 0.587 * self.g as f64 + 0.114 * self.b as f64
    }
}

/// Rounds a [0, 1] component to 8 bits, clamping out-of-range input.
fn quantize(c: f64) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Converts sRGB to HSV. Achromatic colors get hue 0.
pub fn srgb_to_hsv(c: Srgb) -> Hsv {
    let max = c.r.max(c.g).max(c.b);
    let min = c.r.min(c.g).min(c.b);
    let v = max;
    let delta = max - min;
    if delta <= 0.0 {
        return Hsv { h: 0.0, s: 0.0, v };
    }
    let s = delta / max;
    let rc = (max - c.r) / delta;
    let gc = (max - c.g) / delta;
    let bc = (max - c.b) / delta;
    let sector = if c.r == max {
        bc - gc
    } else if c.g == max {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };
    Hsv {
        h: normalize_hue(sector * 60.0),
        s,
        v,
    }
}

/// Converts HSV to sRGB. Hue wraps mod 360; saturation and value are clamped to [0, 1].
pub fn hsv_to_srgb(c: Hsv) -> Srgb {
    let s = c.s.clamp(0.0, 1.0);
    let v = c.v.clamp(0.0, 1.0);
    if s == 0.0 {
        return Srgb { r: v, g: v, b: v };
    }
    let h = normalize_hue(c.h) / 60.0;
    let sector = h.floor();
    let f = h - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    let (r, g, b) = match sector as u8 % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    Srgb { r, g, b }
}

/// Normalizes a hue angle to [0, 360).
pub fn normalize_hue(h: f64) -> f64 {
    let h = h.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if h >= 360.0 {
        0.0
    } else {
        h
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-6;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    // -- HSV conversion tests --

    #[test]
    fn pure_red_has_hue_zero() {
        let hsv = srgb_to_hsv(Srgb {
            r: 1.0,
            g: 0.0,
            b: 0.0,
        });
        assert!(approx_eq(hsv.h, 0.0));
        assert!(approx_eq(hsv.s, 1.0));
        assert!(approx_eq(hsv.v, 1.0));
    }

    #[test]
    fn pure_green_and_blue_hues() {
        let green = srgb_to_hsv(Srgb {
            r: 0.0,
            g: 1.0,
            b: 0.0,
        });
        let blue = srgb_to_hsv(Srgb {
            r: 0.0,
            g: 0.0,
            b: 1.0,
        });
        assert!(approx_eq(green.h, 120.0), "green hue {}", green.h);
        assert!(approx_eq(blue.h, 240.0), "blue hue {}", blue.h);
    }

    #[test]
    fn magenta_hue_wraps_below_360() {
        let hsv = srgb_to_hsv(Srgb {
            r: 1.0,
            g: 0.0,
            b: 0.5,
        });
        assert!(hsv.h > 300.0 && hsv.h < 360.0, "hue {}", hsv.h);
    }

    #[test]
    fn gray_is_achromatic_with_hue_zero() {
        let hsv = srgb_to_hsv(Srgb {
            r: 0.4,
            g: 0.4,
            b: 0.4,
        });
        assert_eq!(hsv.h, 0.0);
        assert_eq!(hsv.s, 0.0);
        assert!(approx_eq(hsv.v, 0.4));
    }

    #[test]
    fn hsv_to_srgb_yellow() {
        let rgb = hsv_to_srgb(Hsv {
            h: 60.0,
            s: 1.0,
            v: 1.0,
        });
        assert!(approx_eq(rgb.r, 1.0));
        assert!(approx_eq(rgb.g, 1.0));
        assert!(approx_eq(rgb.b, 0.0));
    }

    #[test]
    fn hsv_to_srgb_wraps_hue_and_clamps_sv() {
        let wrapped = hsv_to_srgb(Hsv {
            h: 480.0,
            s: 1.5,
            v: 2.0,
        });
        let direct = hsv_to_srgb(Hsv {
            h: 120.0,
            s: 1.0,
            v: 1.0,
        });
        assert_eq!(wrapped, direct);
    }

    #[test]
    fn normalize_hue_handles_negatives() {
        assert!(approx_eq(normalize_hue(-30.0), 330.0));
        assert!(approx_eq(normalize_hue(720.0), 0.0));
        assert!(normalize_hue(-1e-20) < 360.0);
    }

    // -- ColorSpec tests --

    #[test]
    fn luminance_of_near_white_and_near_black() {
        let light = ColorSpec::rgb(250, 250, 250);
        let dark = ColorSpec::rgb(10, 10, 10);
        assert!((light.luminance() - 250.0).abs() < 1e-9);
        assert!((dark.luminance() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn with_alpha_keeps_rgb() {
        let c = ColorSpec::rgb(1, 2, 3).with_alpha(40);
        assert_eq!(c, ColorSpec::rgba(1, 2, 3, 40));
    }

    #[test]
    fn color_spec_hsv_round_trip_is_exact_for_8_bit_values() {
        let c = ColorSpec::rgba(255, 87, 51, 200);
        assert_eq!(ColorSpec::from_hsv(c.to_hsv(), 200), c);
    }

    // -- Hex parsing tests --

    #[test]
    fn from_hex_parses_red_with_hash() {
        let red = Srgb::from_hex("#ff0000").unwrap();
        assert!(approx_eq(red.r, 1.0));
        assert!(approx_eq(red.g, 0.0));
        assert!(approx_eq(red.b, 0.0));
    }

    #[test]
    fn from_hex_parses_green_without_hash() {
        let green = Srgb::from_hex("00ff00").unwrap();
        assert!(approx_eq(green.g, 1.0));
    }

    #[test]
    fn from_hex_is_case_insensitive() {
        let upper = Srgb::from_hex("#FF5733").unwrap();
        let lower = Srgb::from_hex("#ff5733").unwrap();
        assert_eq!(upper, lower);
    }

    #[test]
    fn from_hex_returns_error_for_invalid_hex() {
        assert!(Srgb::from_hex("#gggggg").is_err());
        assert!(Srgb::from_hex("#fff").is_err());
        assert!(Srgb::from_hex("").is_err());
        assert!(Srgb::from_hex("#ff00ff00").is_err());
        assert!(Srgb::from_hex("#ffé00").is_err());
    }

    #[test]
    fn to_hex_clamps_out_of_range() {
        let color = Srgb {
            r: 1.5,
            g: -0.1,
            b: 0.5,
        };
        assert_eq!(color.to_hex(), "#ff0080");
    }

    #[test]
    fn from_hex_to_hex_round_trip() {
        let color = Srgb::from_hex("#c0ffee").unwrap();
        assert_eq!(color.to_hex(), "#c0ffee");
    }

    // -- Serde tests --

    #[test]
    fn srgb_serializes_as_hex_string() {
        let red = Srgb {
            r: 1.0,
            g: 0.0,
            b: 0.0,
        };
        assert_eq!(serde_json::to_string(&red).unwrap(), "\"#ff0000\"");
    }

    #[test]
    fn srgb_deserialize_rejects_invalid_hex() {
        let result: Result<Srgb, _> = serde_json::from_str("\"not-a-color\"");
        assert!(result.is_err());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn hsv_round_trip_within_epsilon(
                r in 0.0_f64..=1.0,
                g in 0.0_f64..=1.0,
                b in 0.0_f64..=1.0,
            ) {
                let original = Srgb { r, g, b };
                let back = hsv_to_srgb(srgb_to_hsv(original));
                prop_assert!((back.r - r).abs() < 1e-9, "r: {} vs {}", back.r, r);
                prop_assert!((back.g - g).abs() < 1e-9, "g: {} vs {}", back.g, g);
                prop_assert!((back.b - b).abs() < 1e-9, "b: {} vs {}", back.b, b);
            }

            #[test]
            fn srgb_to_hsv_stays_in_range(
                r in 0.0_f64..=1.0,
                g in 0.0_f64..=1.0,
                b in 0.0_f64..=1.0,
            ) {
                let hsv = srgb_to_hsv(Srgb { r, g, b });
                prop_assert!(hsv.h >= 0.0 && hsv.h < 360.0, "hue {}", hsv.h);
                prop_assert!((0.0..=1.0).contains(&hsv.s));
                prop_assert!((0.0..=1.0).contains(&hsv.v));
            }

            #[test]
            fn hsv_to_srgb_always_in_unit_range(
                h in -720.0_f64..720.0,
                s in -1.0_f64..2.0,
                v in -1.0_f64..2.0,
            ) {
                let rgb = hsv_to_srgb(Hsv { h, s, v });
                for c in [rgb.r, rgb.g, rgb.b] {
                    prop_assert!((0.0..=1.0).contains(&c), "component {c} out of range");
                }
            }
        }
    }
}
