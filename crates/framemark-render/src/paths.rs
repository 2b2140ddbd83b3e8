//! Conversion of annotation geometry into tiny-skia paths.

use kurbo::{Arc as KurboArc, PathEl, Point, Shape as _, Vec2};
use tiny_skia::{Path, PathBuilder};

const FLATTEN_TOLERANCE: f64 = 0.1;

pub(crate) fn segment(a: Point, b: Point) -> Option<Path> {
    let mut pb = PathBuilder::new();
    pb.move_to(a.x as f32, a.y as f32);
    pb.line_to(b.x as f32, b.y as f32);
    pb.finish()
}

/// Open polyline through `points`.
pub(crate) fn polyline(points: &[Point]) -> Option<Path> {
    let (first, rest) = points.split_first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(first.x as f32, first.y as f32);
    for p in rest {
        pb.line_to(p.x as f32, p.y as f32);
    }
    pb.finish()
}

pub(crate) fn circle(center: Point, radius: f64) -> Option<Path> {
    if !(radius > 0.0 && radius.is_finite()) {
        return None;
    }
    PathBuilder::from_circle(center.x as f32, center.y as f32, radius as f32)
}

/// Circular arc from `start_deg` sweeping `sweep_deg`, both in image
/// coordinates (y down, positive sweep runs clockwise on screen).
pub(crate) fn arc(center: Point, radius: f64, start_deg: f64, sweep_deg: f64) -> Option<Path> {
    let arc = KurboArc::new(
        center,
        Vec2::new(radius, radius),
        start_deg.to_radians(),
        sweep_deg.to_radians(),
        0.0,
    );
    from_kurbo(arc.path_elements(FLATTEN_TOLERANCE))
}

fn from_kurbo(elements: impl Iterator<Item = PathEl>) -> Option<Path> {
    let mut pb = PathBuilder::new();
    for el in elements {
        match el {
            PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(p1, p2) => {
                pb.quad_to(p1.x as f32, p1.y as f32, p2.x as f32, p2.y as f32)
            }
            PathEl::CurveTo(p1, p2, p3) => pb.cubic_to(
                p1.x as f32,
                p1.y as f32,
                p2.x as f32,
                p2.y as f32,
                p3.x as f32,
                p3.y as f32,
            ),
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}

/// Start and end direction, in degrees, of the non-reflex arc between the two
/// legs of an angle. The end is always greater than the start.
pub(crate) fn angle_arc_span(vertex: Point, point1: Point, point3: Point) -> (f64, f64) {
    let a1 = (point1.y - vertex.y).atan2(point1.x - vertex.x).to_degrees();
    let a3 = (point3.y - vertex.y).atan2(point3.x - vertex.x).to_degrees();
    let (start, end) = (a1.min(a3), a1.max(a3));
    if end - start > 180.0 {
        (end, start + 360.0)
    } else {
        (start, end)
    }
}
