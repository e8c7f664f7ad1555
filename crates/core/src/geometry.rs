//! Shape primitives and their random geometry generators.
//!
//! Each [`ShapeKind`] has one generator that turns a [`ShapeParams`] plus the
//! shared PRNG into a concrete [`ShapeGeometry`] in canvas pixel space
//! (origin top-left, y down). Generators draw a fixed sequence of values per
//! kind, so the stream stays reproducible for a given seed and config.

use std::f64::consts::{PI, TAU};

use glam::{DAffine2, DVec2};
use serde::{Deserialize, Serialize};

use crate::config::{RenderConfig, Span, TextContent};
use crate::glyph;
use crate::prng::Xorshift64;

/// Glyphs picked from when the text content is [`TextContent::Random`].
pub const RANDOM_GLYPHS: [&str; 14] = [
    "A", "B", "C", "1", "2", "3", "!", "@", "#", "&", "*", "X", "Y", "Z",
];

/// Distance kept between a centered shape and the canvas edge.
const CENTER_MARGIN: i64 = 50;
const SPIRAL_MARGIN: i64 = 100;
/// Angular step between spiral samples, degrees.
const SPIRAL_STEP: usize = 5;

/// The closed set of drawable primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    RotatedRect,
    Ellipse,
    Polygon,
    Spiral,
    Bezier,
    Star,
    Arc,
    Donut,
    Cross,
    Line,
    Text,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 11] = [
        ShapeKind::RotatedRect,
        ShapeKind::Ellipse,
        ShapeKind::Polygon,
        ShapeKind::Spiral,
        ShapeKind::Bezier,
        ShapeKind::Star,
        ShapeKind::Arc,
        ShapeKind::Donut,
        ShapeKind::Cross,
        ShapeKind::Line,
        ShapeKind::Text,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::RotatedRect => "rotated_rect",
            ShapeKind::Ellipse => "ellipse",
            ShapeKind::Polygon => "polygon",
            ShapeKind::Spiral => "spiral",
            ShapeKind::Bezier => "bezier",
            ShapeKind::Star => "star",
            ShapeKind::Arc => "arc",
            ShapeKind::Donut => "donut",
            ShapeKind::Cross => "cross",
            ShapeKind::Line => "line",
            ShapeKind::Text => "text",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    /// Samples one geometry of this kind.
    pub fn generate(self, params: &ShapeParams<'_>, rng: &mut Xorshift64) -> ShapeGeometry {
        match self {
            ShapeKind::RotatedRect => rotated_rect(params, rng),
            ShapeKind::Ellipse => ellipse(params, rng),
            ShapeKind::Polygon => polygon(params, rng),
            ShapeKind::Spiral => spiral(params, rng),
            ShapeKind::Bezier => bezier(params, rng),
            ShapeKind::Star => star(params, rng),
            ShapeKind::Arc => arc(params, rng),
            ShapeKind::Donut => donut(params, rng),
            ShapeKind::Cross => cross(params, rng),
            ShapeKind::Line => line(params, rng),
            ShapeKind::Text => text(params, rng),
        }
    }
}

/// Axis-aligned rectangle in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: DVec2,
    pub max: DVec2,
}

impl Bounds {
    pub fn new(min: DVec2, max: DVec2) -> Self {
        Self { min, max }
    }

    pub fn from_origin_size(origin: DVec2, size: DVec2) -> Self {
        Self::new(origin, origin + size)
    }

    /// Smallest bounds containing every point. `None` for no points.
    pub fn from_points(points: impl IntoIterator<Item = DVec2>) -> Option<Self> {
        points.into_iter().fold(None, |acc, p| {
            Some(match acc {
                None => Self::new(p, p),
                Some(b) => Self::new(b.min.min(p), b.max.max(p)),
            })
        })
    }

    pub fn size(&self) -> DVec2 {
        self.max - self.min
    }

    pub fn center(&self) -> DVec2 {
        (self.min + self.max) * 0.5
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        Self::new(self.min.min(other.min), self.max.max(other.max))
    }

    /// True when `other` lies entirely inside `self` (edges inclusive).
    pub fn contains(&self, other: &Bounds) -> bool {
        other.min.cmpge(self.min).all() && other.max.cmple(self.max).all()
    }
}

/// Concrete geometry of one shape, in canvas pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeGeometry {
    /// `rotation` in degrees, about the box center.
    RotatedRect {
        origin: DVec2,
        size: DVec2,
        rotation: f64,
    },
    Ellipse {
        origin: DVec2,
        size: DVec2,
    },
    Polygon {
        points: Vec<DVec2>,
    },
    /// Open polyline starting at the spiral center.
    Spiral {
        points: Vec<DVec2>,
    },
    /// Start, first control, second control, end.
    Bezier {
        points: [DVec2; 4],
        width: f64,
    },
    /// Alternating outer and inner vertices.
    Star {
        points: Vec<DVec2>,
    },
    /// Elliptical arc inscribed in a box; angles in degrees, counter-clockwise
    /// on screen from the positive x axis.
    Arc {
        origin: DVec2,
        size: DVec2,
        start: f64,
        span: f64,
    },
    Donut {
        center: DVec2,
        outer: f64,
        inner: f64,
    },
    Cross {
        center: DVec2,
        size: f64,
        thickness: f64,
    },
    Line {
        start: DVec2,
        end: DVec2,
        width: f64,
    },
    /// `position` is the left end of the baseline.
    Text {
        position: DVec2,
        text: String,
        size: f64,
    },
}

impl ShapeGeometry {
    pub fn kind(&self) -> ShapeKind {
        match self {
            ShapeGeometry::RotatedRect { .. } => ShapeKind::RotatedRect,
            ShapeGeometry::Ellipse { .. } => ShapeKind::Ellipse,
            ShapeGeometry::Polygon { .. } => ShapeKind::Polygon,
            ShapeGeometry::Spiral { .. } => ShapeKind::Spiral,
            ShapeGeometry::Bezier { .. } => ShapeKind::Bezier,
            ShapeGeometry::Star { .. } => ShapeKind::Star,
            ShapeGeometry::Arc { .. } => ShapeKind::Arc,
            ShapeGeometry::Donut { .. } => ShapeKind::Donut,
            ShapeGeometry::Cross { .. } => ShapeKind::Cross,
            ShapeGeometry::Line { .. } => ShapeKind::Line,
            ShapeGeometry::Text { .. } => ShapeKind::Text,
        }
    }

    /// Arcs and lines are only ever stroked, never filled.
    pub fn is_stroke_only(&self) -> bool {
        matches!(self, ShapeGeometry::Arc { .. } | ShapeGeometry::Line { .. })
    }

    /// Stroke width carried by the geometry itself, overriding the configured one.
    pub fn own_stroke_width(&self) -> Option<f64> {
        match self {
            ShapeGeometry::Bezier { width, .. } | ShapeGeometry::Line { width, .. } => Some(*width),
            _ => None,
        }
    }

    /// Corners of a rotated rectangle, clockwise from the top-left.
    pub fn corners(&self) -> Option<[DVec2; 4]> {
        let ShapeGeometry::RotatedRect {
            origin,
            size,
            rotation,
        } = self
        else {
            return None;
        };
        let center = *origin + *size * 0.5;
        let turn = DAffine2::from_translation(center)
            * DAffine2::from_angle(rotation.to_radians())
            * DAffine2::from_translation(-center);
        Some([
            *origin,
            *origin + DVec2::new(size.x, 0.0),
            *origin + *size,
            *origin + DVec2::new(0.0, size.y),
        ]
        .map(|p| turn.transform_point2(p)))
    }

    /// Horizontal and vertical bars of a cross.
    pub fn cross_bars(&self) -> Option<[Bounds; 2]> {
        let ShapeGeometry::Cross {
            center,
            size,
            thickness,
        } = self
        else {
            return None;
        };
        let half_long = size / 2.0;
        let half_thick = thickness / 2.0;
        Some([
            Bounds::new(
                *center - DVec2::new(half_long, half_thick),
                *center + DVec2::new(half_long, half_thick),
            ),
            Bounds::new(
                *center - DVec2::new(half_thick, half_long),
                *center + DVec2::new(half_thick, half_long),
            ),
        ])
    }

    /// Filled glyph cells of a text shape.
    pub fn text_cells(&self) -> Option<Vec<Bounds>> {
        match self {
            ShapeGeometry::Text {
                position,
                text,
                size,
            } => Some(glyph::layout(text, *position, *size)),
            _ => None,
        }
    }

    /// Axis-aligned extent of the shape, ignoring stroke width.
    pub fn bounds(&self) -> Option<Bounds> {
        match self {
            ShapeGeometry::RotatedRect { .. } => Bounds::from_points(self.corners()?),
            ShapeGeometry::Ellipse { origin, size } | ShapeGeometry::Arc { origin, size, .. } => {
                Some(Bounds::from_origin_size(*origin, *size))
            }
            ShapeGeometry::Polygon { points }
            | ShapeGeometry::Spiral { points }
            | ShapeGeometry::Star { points } => Bounds::from_points(points.iter().copied()),
            ShapeGeometry::Bezier { points, .. } => Bounds::from_points(*points),
            ShapeGeometry::Donut { center, outer, .. } => Some(Bounds::new(
                *center - DVec2::splat(*outer),
                *center + DVec2::splat(*outer),
            )),
            ShapeGeometry::Cross { .. } => {
                let [h, v] = self.cross_bars()?;
                Some(h.union(&v))
            }
            ShapeGeometry::Line { start, end, .. } => Bounds::from_points([*start, *end]),
            ShapeGeometry::Text { .. } => {
                let cells = self.text_cells()?;
                let first = *cells.first()?;
                Some(cells.iter().fold(first, |acc, c| acc.union(c)))
            }
        }
    }
}

/// Samples `segments + 1` points along an elliptical arc inscribed in the box.
///
/// Angles are degrees measured counter-clockwise on screen, so y grows
/// opposite to the sine.
pub fn arc_points(origin: DVec2, size: DVec2, start: f64, span: f64, segments: usize) -> Vec<DVec2> {
    let radii = size * 0.5;
    let center = origin + radii;
    let segments = segments.max(1);
    (0..=segments)
        .map(|i| {
            let theta = (start + span * i as f64 / segments as f64).to_radians();
            center + DVec2::new(radii.x * theta.cos(), -radii.y * theta.sin())
        })
        .collect()
}

/// Everything a generator needs from the config.
#[derive(Debug, Clone, Copy)]
pub struct ShapeParams<'a> {
    pub width: i64,
    pub height: i64,
    pub size: Span<u32>,
    pub rotation: Span<i64>,
    pub detail: u32,
    pub text: &'a TextContent,
}

impl<'a> ShapeParams<'a> {
    pub fn from_config(config: &'a RenderConfig) -> Self {
        Self {
            width: config.width as i64,
            height: config.height as i64,
            size: config.shapes.size,
            rotation: config.shapes.rotation,
            detail: config.shapes.detail,
            text: &config.shapes.text,
        }
    }

    fn size_min(&self) -> i64 {
        self.size.min as i64
    }

    fn size_max(&self) -> i64 {
        self.size.max as i64
    }
}

fn sample_size(p: &ShapeParams<'_>, rng: &mut Xorshift64) -> f64 {
    rng.next_int(p.size_min(), p.size_max()) as f64
}

fn sample_half_size(p: &ShapeParams<'_>, rng: &mut Xorshift64) -> f64 {
    rng.next_int(p.size_min() / 2, p.size_max() / 2) as f64
}

/// Samples a box no larger than the canvas and places it fully inside.
fn sample_box(p: &ShapeParams<'_>, rng: &mut Xorshift64) -> (DVec2, DVec2) {
    let w = rng.next_int(p.size_min(), p.size_max()).min(p.width);
    let h = rng.next_int(p.size_min(), p.size_max()).min(p.height);
    let x = rng.next_int(0, p.width - w);
    let y = rng.next_int(0, p.height - h);
    (
        DVec2::new(x as f64, y as f64),
        DVec2::new(w as f64, h as f64),
    )
}

/// One coordinate in `[margin, dim - margin]`, or the midpoint when the
/// canvas is too small for the margin.
fn sample_axis(rng: &mut Xorshift64, dim: i64, margin: i64) -> f64 {
    let v = rng.next_int(margin, dim - margin);
    if dim < 2 * margin {
        dim as f64 / 2.0
    } else {
        v as f64
    }
}

fn sample_center(p: &ShapeParams<'_>, rng: &mut Xorshift64, margin: i64) -> DVec2 {
    let x = sample_axis(rng, p.width, margin);
    let y = sample_axis(rng, p.height, margin);
    DVec2::new(x, y)
}

fn sample_point(p: &ShapeParams<'_>, rng: &mut Xorshift64) -> DVec2 {
    let x = rng.next_int(0, p.width);
    let y = rng.next_int(0, p.height);
    DVec2::new(x as f64, y as f64)
}

fn polar(center: DVec2, radius: f64, angle: f64) -> DVec2 {
    center + radius * DVec2::new(angle.cos(), angle.sin())
}

fn rotated_rect(p: &ShapeParams<'_>, rng: &mut Xorshift64) -> ShapeGeometry {
    let (origin, size) = sample_box(p, rng);
    let rotation = rng.next_int(p.rotation.min, p.rotation.max).rem_euclid(360) as f64;
    ShapeGeometry::RotatedRect {
        origin,
        size,
        rotation,
    }
}

fn ellipse(p: &ShapeParams<'_>, rng: &mut Xorshift64) -> ShapeGeometry {
    let (origin, size) = sample_box(p, rng);
    ShapeGeometry::Ellipse { origin, size }
}

fn polygon(p: &ShapeParams<'_>, rng: &mut Xorshift64) -> ShapeGeometry {
    let center = sample_center(p, rng, CENTER_MARGIN);
    let points = (0..p.detail)
        .map(|i| {
            let angle = TAU * i as f64 / p.detail as f64;
            polar(center, sample_half_size(p, rng), angle)
        })
        .collect();
    ShapeGeometry::Polygon { points }
}

fn spiral(p: &ShapeParams<'_>, rng: &mut Xorshift64) -> ShapeGeometry {
    let center = sample_center(p, rng, SPIRAL_MARGIN);
    let size = sample_half_size(p, rng);
    let turns = rng.next_int(3, 8) as usize;
    let total = (turns * 360) as f64;
    let points = std::iter::once(center)
        .chain((0..turns * 360).step_by(SPIRAL_STEP).map(|deg| {
            let deg = deg as f64;
            polar(center, size * (1.0 + deg / total), deg.to_radians())
        }))
        .collect();
    ShapeGeometry::Spiral { points }
}

fn bezier(p: &ShapeParams<'_>, rng: &mut Xorshift64) -> ShapeGeometry {
    let points = [
        sample_point(p, rng),
        sample_point(p, rng),
        sample_point(p, rng),
        sample_point(p, rng),
    ];
    let width = rng.next_int(1, 5) as f64;
    ShapeGeometry::Bezier { points, width }
}

fn star(p: &ShapeParams<'_>, rng: &mut Xorshift64) -> ShapeGeometry {
    let center = sample_center(p, rng, CENTER_MARGIN);
    let outer = sample_half_size(p, rng);
    let inner = outer * 0.5;
    let points = (0..2 * p.detail)
        .map(|i| {
            let radius = if i % 2 == 0 { outer } else { inner };
            polar(center, radius, PI * i as f64 / p.detail as f64)
        })
        .collect();
    ShapeGeometry::Star { points }
}

fn arc(p: &ShapeParams<'_>, rng: &mut Xorshift64) -> ShapeGeometry {
    let (origin, size) = sample_box(p, rng);
    let start = rng.next_int(0, 360) as f64;
    let span = rng.next_int(45, 270) as f64;
    ShapeGeometry::Arc {
        origin,
        size,
        start,
        span,
    }
}

fn donut(p: &ShapeParams<'_>, rng: &mut Xorshift64) -> ShapeGeometry {
    let center = sample_center(p, rng, CENTER_MARGIN);
    let outer = sample_half_size(p, rng);
    let inner = outer * rng.next_range(0.3, 0.7);
    ShapeGeometry::Donut {
        center,
        outer,
        inner,
    }
}

fn cross(p: &ShapeParams<'_>, rng: &mut Xorshift64) -> ShapeGeometry {
    let center = sample_center(p, rng, CENTER_MARGIN);
    let size = rng.next_int(p.size_min(), p.size_max());
    let thickness = rng.next_int(5, (size / 3).max(5));
    ShapeGeometry::Cross {
        center,
        size: size as f64,
        thickness: thickness as f64,
    }
}

fn line(p: &ShapeParams<'_>, rng: &mut Xorshift64) -> ShapeGeometry {
    let start = sample_point(p, rng);
    let length = sample_size(p, rng);
    let angle = rng.next_range(0.0, TAU);
    let width = rng.next_int(1, 5) as f64;
    ShapeGeometry::Line {
        start,
        end: polar(start, length, angle),
        width,
    }
}

fn text(p: &ShapeParams<'_>, rng: &mut Xorshift64) -> ShapeGeometry {
    let position = sample_center(p, rng, CENTER_MARGIN);
    let size = sample_size(p, rng);
    let text = match p.text {
        TextContent::Random => rng
            .next_choice(&RANDOM_GLYPHS)
            .copied()
            .unwrap_or("A")
            .to_string(),
        TextContent::Literal(literal) => literal.clone(),
    };
    ShapeGeometry::Text {
        position,
        text,
        size,
    }
}
