//! Geometry kernel: distances and angle measurement.
//!
//! Pure functions over [`kurbo::Point`]. Nothing here allocates or holds state.

use kurbo::{Point, Vec2};

/// Euclidean distance between two points.
pub fn distance(p1: Point, p2: Point) -> f64 {
    (p2 - p1).hypot()
}

/// Distance from a point to the segment `a -> b`.
///
/// The closest point's parametric position is clamped to `[0, 1]`, so points
/// beyond either end measure to that endpoint. A zero-length segment
/// degenerates to `distance(point, a)`.
pub fn point_to_segment_distance(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq == 0.0 {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = a + seg * t;
    distance(point, proj)
}

/// Angle in degrees formed at `vertex` by the rays towards `p1` and `p3`.
///
/// Always in `[0, 180]`. When either arm has zero length (a point coincides
/// with the vertex) the angle is undefined and `0.0` is returned instead of
/// NaN.
pub fn angle_at_vertex(p1: Point, vertex: Point, p3: Point) -> f64 {
    let v1: Vec2 = p1 - vertex;
    let v3: Vec2 = p3 - vertex;
    let a = v1.hypot();
    let c = v3.hypot();
    if a == 0.0 || c == 0.0 {
        return 0.0;
    }
    // Law of cosines on the triangle (p1, vertex, p3): b is the side opposite the vertex.
    let b_sq = (p3 - p1).hypot2();
    let cos = ((a * a + c * c - b_sq) / (2.0 * a * c)).clamp(-1.0, 1.0);
    cos.acos().to_degrees().clamp(0.0, 180.0)
}

/// Direction of the vector `from -> to` in degrees, as returned by `atan2`
/// (range `(-180, 180]`, y axis pointing down in image space).
pub fn direction_degrees(from: Point, to: Point) -> f64 {
    (to.y - from.y).atan2(to.x - from.x).to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_distance() {
        assert!((distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0)) - 5.0).abs() < EPS);
        assert!(distance(Point::new(2.0, 2.0), Point::new(2.0, 2.0)).abs() < EPS);
    }

    #[test]
    fn test_segment_distance_perpendicular() {
        let d = point_to_segment_distance(
            Point::new(50.0, 10.0),
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
        );
        assert!((d - 10.0).abs() < EPS);
    }

    #[test]
    fn test_segment_distance_clamped_to_endpoint() {
        let d = point_to_segment_distance(
            Point::new(103.0, 4.0),
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
        );
        assert!((d - 5.0).abs() < EPS);

        let d = point_to_segment_distance(
            Point::new(-3.0, -4.0),
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
        );
        assert!((d - 5.0).abs() < EPS);
    }

    #[test]
    fn test_segment_distance_zero_length() {
        let a = Point::new(5.0, 5.0);
        let d = point_to_segment_distance(Point::new(8.0, 9.0), a, a);
        assert!((d - 5.0).abs() < EPS);
    }

    #[test]
    fn test_right_angle() {
        let angle =
            angle_at_vertex(Point::new(0.0, 1.0), Point::new(0.0, 0.0), Point::new(1.0, 0.0));
        assert!((angle - 90.0).abs() < EPS);
    }

    #[test]
    fn test_straight_and_zero_angle() {
        let straight = angle_at_vertex(Point::new(-1.0, 0.0), Point::ZERO, Point::new(1.0, 0.0));
        assert!((straight - 180.0).abs() < EPS);

        let zero = angle_at_vertex(Point::new(1.0, 0.0), Point::ZERO, Point::new(5.0, 0.0));
        assert!(zero.abs() < 1e-6);
    }

    #[test]
    fn test_angle_range_over_samples() {
        let vertex = Point::new(10.0, -3.0);
        for i in 0..36 {
            for j in 0..36 {
                let a = (i as f64 * 10.0).to_radians();
                let b = (j as f64 * 10.0 + 5.0).to_radians();
                let p1 = Point::new(vertex.x + 7.0 * a.cos(), vertex.y + 7.0 * a.sin());
                let p3 = Point::new(vertex.x + 3.0 * b.cos(), vertex.y + 3.0 * b.sin());
                let angle = angle_at_vertex(p1, vertex, p3);
                assert!((0.0..=180.0).contains(&angle), "angle {angle} out of range");
            }
        }
    }

    #[test]
    fn test_degenerate_angle_is_zero() {
        let v = Point::new(4.0, 4.0);
        assert_eq!(angle_at_vertex(v, v, Point::new(1.0, 1.0)), 0.0);
        assert_eq!(angle_at_vertex(Point::new(1.0, 1.0), v, v), 0.0);
        assert_eq!(angle_at_vertex(v, v, v), 0.0);
    }

    #[test]
    fn test_direction_degrees() {
        assert!((direction_degrees(Point::ZERO, Point::new(0.0, 1.0)) - 90.0).abs() < EPS);
        assert!((direction_degrees(Point::ZERO, Point::new(-1.0, 0.0)) - 180.0).abs() < EPS);
    }
}
