//! Symmetry placements.
//!
//! A [`Symmetry`] expands one shape into the affine placements it is drawn
//! under. Every placement is computed independently from the canvas, so radial
//! copies never accumulate transform state from one another.

use std::f64::consts::TAU;

use glam::{DAffine2, DVec2};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymmetryMode {
    #[default]
    None,
    /// Mirror across the vertical center line.
    Horizontal,
    /// Mirror across the horizontal center line.
    Vertical,
    /// `sections` rotated copies about the canvas center.
    Radial,
}

impl SymmetryMode {
    pub const ALL: [SymmetryMode; 4] = [
        SymmetryMode::None,
        SymmetryMode::Horizontal,
        SymmetryMode::Vertical,
        SymmetryMode::Radial,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SymmetryMode::None => "none",
            SymmetryMode::Horizontal => "horizontal",
            SymmetryMode::Vertical => "vertical",
            SymmetryMode::Radial => "radial",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.name() == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Symmetry {
    pub mode: SymmetryMode,
    pub sections: u32,
    pub width: f64,
    pub height: f64,
}

impl Symmetry {
    pub fn new(mode: SymmetryMode, sections: u32, width: u32, height: u32) -> Self {
        Self {
            mode,
            sections,
            width: width as f64,
            height: height as f64,
        }
    }

    /// Copies drawn per shape.
    pub fn multiplicity(&self) -> usize {
        match self.mode {
            SymmetryMode::None => 1,
            SymmetryMode::Horizontal | SymmetryMode::Vertical => 2,
            SymmetryMode::Radial => self.sections as usize,
        }
    }

    /// All placements, the identity first.
    pub fn placements(&self) -> Vec<DAffine2> {
        match self.mode {
            SymmetryMode::None => vec![DAffine2::IDENTITY],
            SymmetryMode::Horizontal => vec![
                DAffine2::IDENTITY,
                DAffine2::from_translation(DVec2::new(self.width, 0.0))
                    * DAffine2::from_scale(DVec2::new(-1.0, 1.0)),
            ],
            SymmetryMode::Vertical => vec![
                DAffine2::IDENTITY,
                DAffine2::from_translation(DVec2::new(0.0, self.height))
                    * DAffine2::from_scale(DVec2::new(1.0, -1.0)),
            ],
            SymmetryMode::Radial => {
                let center = DVec2::new(self.width / 2.0, self.height / 2.0);
                let step = TAU / self.sections as f64;
                (0..self.sections)
                    .map(|i| {
                        DAffine2::from_translation(center)
                            * DAffine2::from_angle(step * i as f64)
                            * DAffine2::from_translation(-center)
                    })
                    .collect()
            }
        }
    }

    /// Calls `draw` once per placement and returns how many copies were drawn.
    ///
    /// Stops at the first error.
    pub fn draw<E>(&self, mut draw: impl FnMut(DAffine2) -> Result<(), E>) -> Result<usize, E> {
        let placements = self.placements();
        for placement in &placements {
            draw(*placement)?;
        }
        Ok(placements.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn close(a: DVec2, b: DVec2) -> bool {
        (a - b).length() < EPSILON
    }

    #[test]
    fn none_draws_once_untransformed() {
        let s = Symmetry::new(SymmetryMode::None, 6, 800, 600);
        assert_eq!(s.placements(), vec![DAffine2::IDENTITY]);
        assert_eq!(s.multiplicity(), 1);
    }

    #[test]
    fn horizontal_mirrors_x_about_center() {
        let s = Symmetry::new(SymmetryMode::Horizontal, 6, 800, 600);
        let mirror = s.placements()[1];
        assert!(close(
            mirror.transform_point2(DVec2::new(100.0, 50.0)),
            DVec2::new(700.0, 50.0)
        ));
    }

    #[test]
    fn vertical_mirrors_y_about_center() {
        let s = Symmetry::new(SymmetryMode::Vertical, 6, 800, 600);
        let mirror = s.placements()[1];
        assert!(close(
            mirror.transform_point2(DVec2::new(100.0, 50.0)),
            DVec2::new(100.0, 550.0)
        ));
    }

    #[test]
    fn radial_four_places_at_quarter_turns() {
        let s = Symmetry::new(SymmetryMode::Radial, 4, 800, 600);
        let center = DVec2::new(400.0, 300.0);
        let p = DVec2::new(500.0, 300.0);
        let placed: Vec<DVec2> = s.placements().iter().map(|t| t.transform_point2(p)).collect();
        assert_eq!(placed.len(), 4);
        assert!(close(placed[0], p));
        assert!(close(placed[1], DVec2::new(400.0, 400.0)));
        assert!(close(placed[2], center * 2.0 - p), "180° is a point reflection");
        assert!(close(placed[3], DVec2::new(400.0, 200.0)));
    }

    #[test]
    fn radial_keeps_center_fixed() {
        let s = Symmetry::new(SymmetryMode::Radial, 7, 640, 480);
        let center = DVec2::new(320.0, 240.0);
        for t in s.placements() {
            assert!(close(t.transform_point2(center), center));
        }
    }

    #[test]
    fn draw_counts_copies_and_stops_on_error() {
        let s = Symmetry::new(SymmetryMode::Radial, 5, 100, 100);
        let mut seen = 0;
        let copies: Result<usize, ()> = s.draw(|_| {
            seen += 1;
            Ok(())
        });
        assert_eq!(copies, Ok(5));
        assert_eq!(seen, 5);

        let mut calls = 0;
        let failed = s.draw(|_| {
            calls += 1;
            if calls == 2 {
                Err("boom")
            } else {
                Ok(())
            }
        });
        assert_eq!(failed, Err("boom"));
        assert_eq!(calls, 2);
    }

    #[test]
    fn mode_names_round_trip() {
        for mode in SymmetryMode::ALL {
            assert_eq!(SymmetryMode::from_name(mode.name()), Some(mode));
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn multiplicity_matches_placements(
                sections in 2_u32..32,
                mode_index in 0_usize..4,
            ) {
                let s = Symmetry::new(SymmetryMode::ALL[mode_index], sections, 300, 200);
                prop_assert_eq!(s.placements().len(), s.multiplicity());
            }

            #[test]
            fn radial_placements_preserve_distance_to_center(
                sections in 2_u32..24,
                x in 0.0_f64..800.0,
                y in 0.0_f64..600.0,
            ) {
                let s = Symmetry::new(SymmetryMode::Radial, sections, 800, 600);
                let center = DVec2::new(400.0, 300.0);
                let p = DVec2::new(x, y);
                let r = (p - center).length();
                for t in s.placements() {
                    prop_assert!(((t.transform_point2(p) - center).length() - r).abs() < 1e-6);
                }
            }
        }
    }
}
