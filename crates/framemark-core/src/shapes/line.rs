//! Line shape.

use super::{DrawingStyle, ShapeHeader};
use crate::geometry::{distance, point_to_segment_distance};
use kurbo::{Line as KurboLine, Point};
use serde::{Deserialize, Serialize};

/// A straight measurement segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    #[serde(flatten)]
    pub(crate) header: ShapeHeader,
    /// Start point.
    pub start: Point,
    /// End point.
    pub end: Point,
    /// Optional label; empty means unlabeled.
    #[serde(default)]
    pub label: String,
}

impl Line {
    /// Create a new line on `frame_number`.
    pub fn new(start: Point, end: Point, frame_number: u32, style: DrawingStyle) -> Self {
        Self {
            header: ShapeHeader::new(frame_number, style),
            start,
            end,
            label: String::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn header(&self) -> &ShapeHeader {
        &self.header
    }

    /// Get the length of the line.
    pub fn length(&self) -> f64 {
        distance(self.start, self.end)
    }

    /// Direction from start to end in degrees, normalized to `[0, 360)`.
    pub fn angle_from_horizontal(&self) -> f64 {
        let deg = (self.end.y - self.start.y)
            .atan2(self.end.x - self.start.x)
            .to_degrees();
        let deg = if deg < 0.0 { deg + 360.0 } else { deg };
        // Tiny negative angles round up to exactly 360.
        if deg >= 360.0 { 0.0 } else { deg }
    }

    /// Deviation from the vertical axis in degrees.
    pub fn angle_from_vertical(&self) -> f64 {
        (90.0 - self.angle_from_horizontal()).abs()
    }

    /// Get the midpoint of the line.
    pub fn midpoint(&self) -> Point {
        self.as_kurbo().midpoint()
    }

    /// Get as a kurbo Line.
    pub fn as_kurbo(&self) -> KurboLine {
        KurboLine::new(self.start, self.end)
    }

    pub(crate) fn hit_distance(&self, point: Point) -> f64 {
        point_to_segment_distance(point, self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(x0: f64, y0: f64, x1: f64, y1: f64) -> Line {
        Line::new(Point::new(x0, y0), Point::new(x1, y1), 0, DrawingStyle::default())
    }

    #[test]
    fn test_length_and_angle() {
        let l = line(0.0, 0.0, 3.0, 4.0);
        assert!((l.length() - 5.0).abs() < 1e-9);
        assert!((l.angle_from_horizontal() - 53.130_102_354).abs() < 1e-6);
    }

    #[test]
    fn test_length_matches_distance() {
        let pts = [(0.0, 0.0), (-4.5, 2.0), (10.0, -7.25), (3.0, 3.0)];
        for a in pts {
            for b in pts {
                let l = line(a.0, a.1, b.0, b.1);
                assert_eq!(l.length(), distance(l.start, l.end));
            }
        }
    }

    #[test]
    fn test_angle_from_horizontal_range() {
        for i in 0..72 {
            let t = (i as f64 * 5.0).to_radians();
            let l = line(1.0, 1.0, 1.0 + t.cos() * 10.0, 1.0 + t.sin() * 10.0);
            let a = l.angle_from_horizontal();
            assert!((0.0..360.0).contains(&a), "{a}");
        }
        // Pointing up in image space (negative y) lands in the upper half.
        assert!((line(0.0, 0.0, 0.0, -1.0).angle_from_horizontal() - 270.0).abs() < 1e-9);
        assert_eq!(line(0.0, 0.0, 0.0, 0.0).angle_from_horizontal(), 0.0);
        assert_eq!(line(0.0, 0.0, 5.0, -0.0).angle_from_horizontal(), 0.0);
    }

    #[test]
    fn test_angle_from_vertical() {
        assert!(line(0.0, 0.0, 0.0, 10.0).angle_from_vertical().abs() < 1e-9);
        assert!((line(0.0, 0.0, 10.0, 0.0).angle_from_vertical() - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_midpoint() {
        let mid = line(0.0, 0.0, 100.0, 100.0).midpoint();
        assert!((mid.x - 50.0).abs() < f64::EPSILON);
        assert!((mid.y - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hit_distance() {
        let l = line(0.0, 0.0, 100.0, 0.0);
        assert!((l.hit_distance(Point::new(50.0, 3.0)) - 3.0).abs() < 1e-9);
        assert!((l.hit_distance(Point::new(106.0, 8.0)) - 10.0).abs() < 1e-9);
    }
}
