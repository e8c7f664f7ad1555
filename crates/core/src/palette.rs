//! Named color palettes and explicit palette selection.
//!
//! A [`Palette`] is an ordered list of [`Srgb`] colors. The render pipeline
//! draws from an explicit selection of palette entries when one is given;
//! otherwise the harmony engine supplies the working colors.

use crate::color::Srgb;
use crate::error::ConfigError;

/// All built-in palette names.
const PALETTE_NAMES: &[&str] = &[
    "default",
    "ocean",
    "neon",
    "earth",
    "monochrome",
    "vapor",
    "fire",
];

/// An ordered list of colors.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Srgb>,
}

impl Palette {
    /// Creates a palette from already-parsed colors. Empty palettes are allowed:
    /// they simply leave the harmony engine in charge.
    pub fn new(colors: Vec<Srgb>) -> Self {
        Self { colors }
    }

    /// Creates a palette by parsing hex color strings.
    ///
    /// Each string can be "#rrggbb" or "rrggbb" (case insensitive).
    pub fn from_hex(hexes: &[&str]) -> Result<Self, ConfigError> {
        let colors = hexes
            .iter()
            .map(|h| Srgb::from_hex(h))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(colors))
    }

    /// Looks up a built-in palette by name.
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        match name {
            "default" => Ok(Self::starter()),
            "ocean" => Ok(Self::ocean()),
            "neon" => Ok(Self::neon()),
            "earth" => Ok(Self::earth()),
            "monochrome" => Ok(Self::monochrome()),
            "vapor" => Ok(Self::vapor()),
            "fire" => Ok(Self::fire()),
            _ => Err(ConfigError::UnknownPalette(name.to_string())),
        }
    }

    /// Returns all built-in palette names.
    pub fn list_names() -> &'static [&'static str] {
        PALETTE_NAMES
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Srgb] {
        &self.colors
    }

    pub fn into_colors(self) -> Vec<Srgb> {
        self.colors
    }

    /// Returns the selected entries, in selection order.
    ///
    /// Returns `ConfigError::SelectionOutOfBounds` for any index past the end.
    pub fn select(&self, indices: &[usize]) -> Result<Vec<Srgb>, ConfigError> {
        indices
            .iter()
            .map(|&index| {
                self.colors
                    .get(index)
                    .copied()
                    .ok_or(ConfigError::SelectionOutOfBounds {
                        index,
                        len: self.colors.len(),
                    })
            })
            .collect()
    }

    // -- Built-in palettes --

    /// Warm orange, green, blue, yellow, pink, cyan.
    pub fn starter() -> Self {
        Self::builtin(&["#ff5733", "#33ff57", "#3357ff", "#f3ff33", "#ff33f3", "#33fff3"])
    }

    /// Deep blues to cyan.
    pub fn ocean() -> Self {
        Self::builtin(&["#001f3f", "#003366", "#005f73", "#0a9396", "#94d2bd"])
    }

    /// Vibrant pinks, greens, yellows.
    pub fn neon() -> Self {
        Self::builtin(&["#ff00ff", "#00ff41", "#ffff00", "#ff0080", "#00ffff"])
    }

    /// Browns, greens, golds.
    pub fn earth() -> Self {
        Self::builtin(&["#5c4033", "#8b6914", "#6b8e23", "#daa520", "#d2b48c"])
    }

    /// Black to white via grays.
    pub fn monochrome() -> Self {
        Self::builtin(&["#000000", "#404040", "#808080", "#c0c0c0", "#ffffff"])
    }

    /// Pastel purples, pinks, teals.
    pub fn vapor() -> Self {
        Self::builtin(&["#7b2d8e", "#c77dff", "#ff9ebb", "#80ced6", "#a0e7e5"])
    }

    /// Reds, oranges, yellows.
    pub fn fire() -> Self {
        Self::builtin(&["#800000", "#cc0000", "#ff4500", "#ff8c00", "#ffd700"])
    }

    /// Built-in hex tables are compile-time constants; a typo is a programming
    /// error caught by `every_named_palette_resolves`.
    fn builtin(hexes: &[&str]) -> Self {
        Self::from_hex(hexes).expect("built-in palette hex values are valid")
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::starter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_named_palette_resolves() {
        for name in Palette::list_names() {
            let palette = Palette::from_name(name).unwrap();
            assert!(!palette.is_empty(), "palette {name} is empty");
        }
    }

    #[test]
    fn unknown_palette_name_is_rejected() {
        let err = Palette::from_name("plaid").unwrap_err();
        assert_eq!(err, ConfigError::UnknownPalette("plaid".into()));
    }

    #[test]
    fn default_palette_has_six_starter_colors() {
        let palette = Palette::default();
        assert_eq!(palette.len(), 6);
        assert_eq!(palette.colors()[0].to_hex(), "#ff5733");
        assert_eq!(palette.colors()[5].to_hex(), "#33fff3");
    }

    #[test]
    fn from_hex_with_invalid_hex_returns_error() {
        assert!(Palette::from_hex(&["#ff0000", "#zzzzzz"]).is_err());
    }

    #[test]
    fn from_hex_with_empty_slice_is_empty_palette() {
        assert!(Palette::from_hex(&[]).unwrap().is_empty());
    }

    #[test]
    fn select_preserves_selection_order() {
        let palette = Palette::from_hex(&["#ff0000", "#00ff00", "#0000ff"]).unwrap();
        let picked = palette.select(&[2, 0]).unwrap();
        assert_eq!(picked[0].to_hex(), "#0000ff");
        assert_eq!(picked[1].to_hex(), "#ff0000");
    }

    #[test]
    fn select_out_of_bounds_is_rejected() {
        let palette = Palette::from_hex(&["#ff0000"]).unwrap();
        let err = palette.select(&[0, 3]).unwrap_err();
        assert_eq!(err, ConfigError::SelectionOutOfBounds { index: 3, len: 1 });
    }

    #[test]
    fn select_nothing_is_empty() {
        assert!(Palette::default().select(&[]).unwrap().is_empty());
    }
}
