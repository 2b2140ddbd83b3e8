//! Three-point angle shape.

use super::{DrawingStyle, ShapeHeader};
use crate::geometry::{angle_at_vertex, point_to_segment_distance};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Display length of the bisector ray, in pixels.
pub const BISECTOR_LENGTH: f64 = 100.0;

fn default_true() -> bool {
    true
}

fn default_arc_radius() -> u32 {
    50
}

/// An angle measured at `vertex` between the legs to `point1` and `point3`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Angle {
    #[serde(flatten)]
    pub(crate) header: ShapeHeader,
    pub point1: Point,
    pub vertex: Point,
    pub point3: Point,
    #[serde(default)]
    pub label: String,
    /// Draw the arc between the two legs.
    #[serde(default = "default_true")]
    pub show_arc: bool,
    /// Arc radius in pixels.
    #[serde(default = "default_arc_radius")]
    pub arc_radius: u32,
}

impl Angle {
    pub fn new(
        point1: Point,
        vertex: Point,
        point3: Point,
        frame_number: u32,
        style: DrawingStyle,
    ) -> Self {
        Self {
            header: ShapeHeader::new(frame_number, style),
            point1,
            vertex,
            point3,
            label: String::new(),
            show_arc: true,
            arc_radius: default_arc_radius(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_show_arc(mut self, show_arc: bool) -> Self {
        self.show_arc = show_arc;
        self
    }

    pub fn with_arc_radius(mut self, radius: u32) -> Self {
        self.arc_radius = radius;
        self
    }

    pub fn header(&self) -> &ShapeHeader {
        &self.header
    }

    /// Angle at the vertex in degrees, `[0, 180]`. Zero when a leg has no length.
    pub fn measure(&self) -> f64 {
        angle_at_vertex(self.point1, self.vertex, self.point3)
    }

    /// Bisector ray from the vertex, `BISECTOR_LENGTH` pixels long.
    ///
    /// Follows the sum of the two leg unit vectors. When the legs are opposite
    /// the ray is perpendicular to them; when a leg is degenerate the ray has
    /// no length.
    pub fn bisector(&self) -> (Point, Point) {
        let v1: Vec2 = self.point1 - self.vertex;
        let v3: Vec2 = self.point3 - self.vertex;
        if v1.hypot2() == 0.0 || v3.hypot2() == 0.0 {
            return (self.vertex, self.vertex);
        }
        let sum = v1.normalize() + v3.normalize();
        let dir = if sum.hypot2() < 1e-12 {
            v1.normalize().turn_90()
        } else {
            sum.normalize()
        };
        (self.vertex, self.vertex + dir * BISECTOR_LENGTH)
    }

    pub(crate) fn hit_distance(&self, point: Point) -> f64 {
        let d1 = point_to_segment_distance(point, self.point1, self.vertex);
        let d2 = point_to_segment_distance(point, self.vertex, self.point3);
        d1.min(d2)
    }
}
