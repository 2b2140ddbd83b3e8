//! Circle shape.

use super::{DrawingStyle, ShapeHeader};
use crate::geometry::distance;
use kurbo::{Circle as KurboCircle, Point};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// A circle defined by center and radius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    #[serde(flatten)]
    pub(crate) header: ShapeHeader,
    pub center: Point,
    /// Radius in pixels, `>= 0`.
    pub radius: f64,
    #[serde(default)]
    pub label: String,
    /// Fill the disc instead of stroking the ring.
    #[serde(default)]
    pub fill: bool,
}

impl Circle {
    /// Create a new circle. Negative radii are clamped to zero.
    pub fn new(center: Point, radius: f64, frame_number: u32, style: DrawingStyle) -> Self {
        Self {
            header: ShapeHeader::new(frame_number, style),
            center,
            radius: radius.max(0.0),
            label: String::new(),
            fill: false,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_fill(mut self, fill: bool) -> Self {
        self.fill = fill;
        self
    }

    pub fn header(&self) -> &ShapeHeader {
        &self.header
    }

    pub fn area(&self) -> f64 {
        PI * self.radius * self.radius
    }

    pub fn circumference(&self) -> f64 {
        2.0 * PI * self.radius
    }

    /// True when `point` lies inside or on the circle.
    pub fn contains_point(&self, point: Point) -> bool {
        distance(self.center, point) <= self.radius
    }

    pub fn as_kurbo(&self) -> KurboCircle {
        KurboCircle::new(self.center, self.radius)
    }

    pub(crate) fn hit_distance(&self, point: Point) -> f64 {
        (distance(point, self.center) - self.radius).abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn circle(r: f64) -> Circle {
        Circle::new(Point::new(50.0, 50.0), r, 0, DrawingStyle::default())
    }

    #[test]
    fn test_measurements() {
        let c = circle(10.0);
        assert!((c.area() - 314.159_265_358_979).abs() < 1e-9);
        assert!((c.circumference() - 62.831_853_071_795_86).abs() < 1e-9);
    }

    #[test]
    fn test_contains_point() {
        let c = circle(10.0);
        assert!(c.contains_point(Point::new(50.0, 50.0)));
        assert!(c.contains_point(Point::new(60.0, 50.0)));
        assert!(!c.contains_point(Point::new(60.1, 50.0)));
    }

    #[test]
    fn test_negative_radius_clamped() {
        assert_eq!(circle(-3.0).radius, 0.0);
    }

    #[test]
    fn test_hit_distance_to_perimeter() {
        let c = circle(10.0);
        assert!((c.hit_distance(Point::new(50.0, 50.0)) - 10.0).abs() < 1e-9);
        assert!((c.hit_distance(Point::new(63.0, 50.0)) - 3.0).abs() < 1e-9);
        assert!(c.hit_distance(Point::new(50.0, 40.0)).abs() < 1e-9);
    }
}
