//! Geometry and paint conversion into tiny-skia paths and paints.
//!
//! A [`ShapeRaster`] is built once per logical shape and then drawn under each
//! symmetry placement, so every copy shares one path and one shader.

use abstract_art_core::color::ColorSpec;
use abstract_art_core::error::RenderError;
use abstract_art_core::geometry::{arc_points, ShapeGeometry};
use abstract_art_core::paint::{Fill, Gradient, GradientGeometry, ShapePaint};
use glam::{DAffine2, DVec2};
use tiny_skia::{
    ColorU8, FillRule, FilterQuality, GradientStop, LinearGradient, Paint, Path, PathBuilder,
    Pattern, Pixmap, Point, RadialGradient, Rect, Shader, SpreadMode, Stroke, Transform,
};

pub(crate) fn to_color(c: ColorSpec) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

/// Maps a glam affine onto tiny-skia's row layout `(sx, ky, kx, sy, tx, ty)`.
pub(crate) fn to_transform(t: DAffine2) -> Transform {
    let m = t.matrix2;
    Transform::from_row(
        m.x_axis.x as f32,
        m.x_axis.y as f32,
        m.y_axis.x as f32,
        m.y_axis.y as f32,
        t.translation.x as f32,
        t.translation.y as f32,
    )
}

fn to_point(p: DVec2) -> Point {
    Point::from_xy(p.x as f32, p.y as f32)
}

/// Solid paint with anti-aliasing on.
pub(crate) fn solid_paint(color: ColorSpec) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(to_color(color));
    paint.anti_alias = true;
    paint
}

pub(crate) fn ellipse_path(origin: DVec2, size: DVec2) -> Option<Path> {
    let rect = Rect::from_xywh(origin.x as f32, origin.y as f32, size.x as f32, size.y as f32)?;
    PathBuilder::from_oval(rect)
}

fn polyline(points: &[DVec2], close: bool) -> Option<Path> {
    let (first, rest) = points.split_first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(first.x as f32, first.y as f32);
    for p in rest {
        pb.line_to(p.x as f32, p.y as f32);
    }
    if close {
        pb.close();
    }
    pb.finish()
}

fn push_bounds(pb: &mut PathBuilder, min: DVec2, max: DVec2) -> Option<()> {
    let rect = Rect::from_ltrb(min.x as f32, min.y as f32, max.x as f32, max.y as f32)?;
    pb.push_rect(rect);
    Some(())
}

/// The path a geometry is filled and stroked along, with its fill rule.
///
/// `None` for degenerate geometry (zero-size boxes, empty text).
pub fn shape_path(geometry: &ShapeGeometry) -> Option<(Path, FillRule)> {
    let path = match geometry {
        ShapeGeometry::RotatedRect { .. } => polyline(&geometry.corners()?, true)?,
        ShapeGeometry::Ellipse { origin, size } => ellipse_path(*origin, *size)?,
        ShapeGeometry::Polygon { points } | ShapeGeometry::Star { points } => {
            polyline(points, true)?
        }
        ShapeGeometry::Spiral { points } => polyline(points, false)?,
        ShapeGeometry::Bezier { points, .. } => {
            let [start, c1, c2, end] = *points;
            let mut pb = PathBuilder::new();
            pb.move_to(start.x as f32, start.y as f32);
            pb.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                end.x as f32,
                end.y as f32,
            );
            pb.finish()?
        }
        ShapeGeometry::Arc {
            origin,
            size,
            start,
            span,
        } => {
            let segments = span.abs().ceil().max(1.0) as usize;
            polyline(&arc_points(*origin, *size, *start, *span, segments), false)?
        }
        ShapeGeometry::Donut {
            center,
            outer,
            inner,
        } => {
            let mut pb = PathBuilder::new();
            pb.push_circle(center.x as f32, center.y as f32, *outer as f32);
            pb.push_circle(center.x as f32, center.y as f32, *inner as f32);
            return pb.finish().map(|p| (p, FillRule::EvenOdd));
        }
        ShapeGeometry::Cross { .. } => {
            let mut pb = PathBuilder::new();
            for bar in geometry.cross_bars()? {
                push_bounds(&mut pb, bar.min, bar.max)?;
            }
            pb.finish()?
        }
        ShapeGeometry::Line { start, end, .. } => polyline(&[*start, *end], false)?,
        ShapeGeometry::Text { .. } => {
            let mut pb = PathBuilder::new();
            for cell in geometry.text_cells()? {
                push_bounds(&mut pb, cell.min, cell.max)?;
            }
            pb.finish()?
        }
    };
    Some((path, FillRule::Winding))
}

enum FillSource {
    Solid(ColorSpec),
    Shader(Shader<'static>),
    /// Pre-rendered sweep used through a pattern shader.
    Sweep(Pixmap),
}

/// A resolved [`Fill`] ready to hand out tiny-skia paints.
pub struct FillPaint {
    source: FillSource,
}

impl FillPaint {
    pub fn new(fill: &Fill, canvas: (u32, u32)) -> Result<Self, RenderError> {
        let source = match fill {
            Fill::Solid(color) => FillSource::Solid(*color),
            Fill::Gradient(gradient) => gradient_source(gradient, canvas)?,
        };
        Ok(Self { source })
    }

    pub fn paint(&self) -> Paint<'_> {
        let mut paint = Paint::default();
        paint.anti_alias = true;
        match &self.source {
            FillSource::Solid(color) => paint.set_color(to_color(*color)),
            FillSource::Shader(shader) => paint.shader = shader.clone(),
            FillSource::Sweep(pixmap) => {
                paint.shader = Pattern::new(
                    pixmap.as_ref(),
                    SpreadMode::Pad,
                    FilterQuality::Nearest,
                    1.0,
                    Transform::identity(),
                );
            }
        }
        paint
    }
}

fn gradient_source(gradient: &Gradient, canvas: (u32, u32)) -> Result<FillSource, RenderError> {
    let stops: Vec<GradientStop> = gradient
        .stops
        .iter()
        .map(|s| GradientStop::new(s.position as f32, to_color(s.color)))
        .collect();
    let shader = match gradient.geometry {
        GradientGeometry::Linear { start, end } => LinearGradient::new(
            to_point(start),
            to_point(end),
            stops,
            SpreadMode::Pad,
            Transform::identity(),
        ),
        GradientGeometry::Radial { center, radius } => RadialGradient::new(
            to_point(center),
            to_point(center),
            radius as f32,
            stops,
            SpreadMode::Pad,
            Transform::identity(),
        ),
        GradientGeometry::Conical { center, angle } => {
            return Ok(FillSource::Sweep(sweep_pixmap(gradient, center, angle, canvas)?));
        }
    };
    // tiny-skia rejects some degenerate gradients; fall back to the first stop.
    Ok(match shader {
        Some(shader) => FillSource::Shader(shader),
        None => {
            log::trace!("degenerate gradient, filling flat");
            FillSource::Solid(gradient.sample(0.0))
        }
    })
}

/// Renders a conical sweep: the color at a pixel is the gradient sampled at
/// its counter-clockwise screen angle from `angle`, as a fraction of a turn.
fn sweep_pixmap(
    gradient: &Gradient,
    center: DVec2,
    angle: f64,
    (width, height): (u32, u32),
) -> Result<Pixmap, RenderError> {
    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| RenderError::Canvas(format!("cannot allocate {width}x{height} sweep")))?;
    let w = width as usize;
    for (i, px) in pixmap.pixels_mut().iter_mut().enumerate() {
        let x = (i % w) as f64 + 0.5 - center.x;
        let y = (i / w) as f64 + 0.5 - center.y;
        let theta = (-y).atan2(x).to_degrees();
        let t = (theta - angle).rem_euclid(360.0) / 360.0;
        let c = gradient.sample(t);
        *px = ColorU8::from_rgba(c.r, c.g, c.b, c.a).premultiply();
    }
    Ok(pixmap)
}

/// One shape, ready to draw under any placement.
pub struct ShapeRaster {
    path: Path,
    fill_rule: FillRule,
    /// `None` for stroke-only shapes.
    fill: Option<FillPaint>,
    outline: Option<(ColorSpec, f32)>,
}

impl ShapeRaster {
    /// Builds the path and paints for `geometry`.
    ///
    /// `arc_width` is the outline width for shapes that carry none of their own
    /// and have no stroke paint. Returns `Ok(None)` for degenerate geometry.
    pub fn new(
        geometry: &ShapeGeometry,
        paint: &ShapePaint,
        canvas: (u32, u32),
        arc_width: f64,
    ) -> Result<Option<Self>, RenderError> {
        let Some((path, fill_rule)) = shape_path(geometry) else {
            return Ok(None);
        };
        let own_width = geometry.own_stroke_width();
        let (fill, outline) = if geometry.is_stroke_only() {
            let width = own_width
                .or(paint.stroke.map(|s| s.width))
                .unwrap_or(arc_width);
            (None, Some((paint.outline_color(), width as f32)))
        } else {
            let outline = paint
                .stroke
                .map(|s| (s.color, own_width.unwrap_or(s.width) as f32));
            (Some(FillPaint::new(&paint.fill, canvas)?), outline)
        };
        Ok(Some(Self {
            path,
            fill_rule,
            fill,
            outline,
        }))
    }

    pub fn is_stroke_only(&self) -> bool {
        self.fill.is_none()
    }

    pub fn draw(&self, pixmap: &mut Pixmap, placement: DAffine2) {
        let transform = to_transform(placement);
        if let Some(fill) = &self.fill {
            pixmap.fill_path(&self.path, &fill.paint(), self.fill_rule, transform, None);
        }
        if let Some((color, width)) = self.outline {
            let stroke = Stroke {
                width,
                ..Stroke::default()
            };
            pixmap.stroke_path(&self.path, &solid_paint(color), &stroke, transform, None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use abstract_art_core::paint::{GradientStop as Stop, StrokePaint};

    fn pixel(pixmap: &Pixmap, x: u32, y: u32) -> ColorU8 {
        pixmap
            .pixel(x, y)
            .map(|p| p.demultiply())
            .unwrap_or_else(|| panic!("({x}, {y}) outside pixmap"))
    }

    fn flat(color: ColorSpec, stroke: Option<StrokePaint>) -> ShapePaint {
        ShapePaint {
            base: color,
            fill: Fill::Solid(color),
            stroke,
        }
    }

    fn blank(w: u32, h: u32) -> Pixmap {
        Pixmap::new(w, h).unwrap()
    }

    #[test]
    fn transform_keeps_glam_semantics() {
        let affine = DAffine2::from_translation(DVec2::new(10.0, 20.0))
            * DAffine2::from_scale(DVec2::new(-1.0, 1.0));
        let mut points = [Point::from_xy(3.0, 4.0)];
        to_transform(affine).map_points(&mut points);
        let p = points[0];
        let expected = affine.transform_point2(DVec2::new(3.0, 4.0));
        assert!((p.x as f64 - expected.x).abs() < 1e-4);
        assert!((p.y as f64 - expected.y).abs() < 1e-4);
    }

    #[test]
    fn donut_leaves_its_hole_unpainted() {
        let geometry = ShapeGeometry::Donut {
            center: DVec2::new(50.0, 50.0),
            outer: 40.0,
            inner: 20.0,
        };
        let red = ColorSpec::rgb(255, 0, 0);
        let raster = ShapeRaster::new(&geometry, &flat(red, None), (100, 100), 2.0)
            .unwrap()
            .unwrap();
        let mut pixmap = blank(100, 100);
        raster.draw(&mut pixmap, DAffine2::IDENTITY);
        assert_eq!(pixel(&pixmap, 50, 50).alpha(), 0, "hole must stay empty");
        assert_eq!(pixel(&pixmap, 50, 80), ColorU8::from_rgba(255, 0, 0, 255));
    }

    #[test]
    fn line_is_stroked_with_base_color_when_stroke_is_off() {
        let geometry = ShapeGeometry::Line {
            start: DVec2::new(0.0, 10.5),
            end: DVec2::new(20.0, 10.5),
            width: 3.0,
        };
        let blue = ColorSpec::rgb(0, 0, 255);
        let raster = ShapeRaster::new(&geometry, &flat(blue, None), (20, 20), 2.0)
            .unwrap()
            .unwrap();
        assert!(raster.is_stroke_only());
        let mut pixmap = blank(20, 20);
        raster.draw(&mut pixmap, DAffine2::IDENTITY);
        assert_eq!(pixel(&pixmap, 10, 10), ColorU8::from_rgba(0, 0, 255, 255));
        assert_eq!(pixel(&pixmap, 10, 2).alpha(), 0);
    }

    #[test]
    fn closed_shape_gets_fill_and_outline() {
        let geometry = ShapeGeometry::RotatedRect {
            origin: DVec2::new(10.0, 10.0),
            size: DVec2::new(40.0, 40.0),
            rotation: 0.0,
        };
        let paint = flat(
            ColorSpec::rgb(255, 255, 0),
            Some(StrokePaint {
                color: ColorSpec::BLACK,
                width: 4.0,
            }),
        );
        let raster = ShapeRaster::new(&geometry, &paint, (60, 60), 2.0)
            .unwrap()
            .unwrap();
        let mut pixmap = blank(60, 60);
        raster.draw(&mut pixmap, DAffine2::IDENTITY);
        assert_eq!(pixel(&pixmap, 30, 30), ColorU8::from_rgba(255, 255, 0, 255));
        assert_eq!(pixel(&pixmap, 10, 30), ColorU8::from_rgba(0, 0, 0, 255));
    }

    #[test]
    fn mirrored_placement_paints_opposite_side() {
        let geometry = ShapeGeometry::Ellipse {
            origin: DVec2::new(0.0, 0.0),
            size: DVec2::new(20.0, 20.0),
        };
        let green = ColorSpec::rgb(0, 255, 0);
        let raster = ShapeRaster::new(&geometry, &flat(green, None), (100, 20), 2.0)
            .unwrap()
            .unwrap();
        let mirror = DAffine2::from_translation(DVec2::new(100.0, 0.0))
            * DAffine2::from_scale(DVec2::new(-1.0, 1.0));
        let mut pixmap = blank(100, 20);
        raster.draw(&mut pixmap, mirror);
        assert_eq!(pixel(&pixmap, 10, 10).alpha(), 0);
        assert_eq!(pixel(&pixmap, 90, 10), ColorU8::from_rgba(0, 255, 0, 255));
    }

    #[test]
    fn text_path_covers_glyph_cells() {
        let geometry = ShapeGeometry::Text {
            position: DVec2::new(0.0, 70.0),
            text: "-".into(),
            size: 70.0,
        };
        let (path, rule) = shape_path(&geometry).unwrap();
        assert_eq!(rule, FillRule::Winding);
        let b = path.bounds();
        assert_eq!((b.left(), b.top(), b.right(), b.bottom()), (0.0, 30.0, 50.0, 40.0));
    }

    #[test]
    fn blank_text_is_degenerate() {
        let geometry = ShapeGeometry::Text {
            position: DVec2::new(10.0, 10.0),
            text: "  ".into(),
            size: 14.0,
        };
        assert!(shape_path(&geometry).is_none());
    }

    #[test]
    fn sweep_starts_at_angle_and_runs_counter_clockwise() {
        let gradient = Gradient {
            geometry: GradientGeometry::Conical {
                center: DVec2::new(50.0, 50.0),
                angle: 0.0,
            },
            stops: vec![
                Stop {
                    position: 0.0,
                    color: ColorSpec::BLACK,
                },
                Stop {
                    position: 1.0,
                    color: ColorSpec::WHITE,
                },
            ],
        };
        let pixmap = sweep_pixmap(&gradient, DVec2::new(50.0, 50.0), 0.0, (100, 100)).unwrap();
        let east = pixel(&pixmap, 95, 49).red();
        let north = pixel(&pixmap, 49, 5).red();
        let south = pixel(&pixmap, 49, 95).red();
        assert!(east < 10, "east {east}");
        assert!((north as i32 - 64).abs() < 10, "north {north}");
        assert!((south as i32 - 191).abs() < 10, "south {south}");
    }

    #[test]
    fn solid_fill_paint_has_no_shader_allocation() {
        let fill = FillPaint::new(&Fill::Solid(ColorSpec::rgb(1, 2, 3)), (10, 10)).unwrap();
        assert!(matches!(fill.paint().shader, Shader::SolidColor(_)));
    }
}
