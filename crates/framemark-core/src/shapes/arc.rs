//! Circular arc shape.

use super::{DrawingStyle, ShapeHeader};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// An arc segment of a circle. Angles are in degrees and kept exactly as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arc {
    #[serde(flatten)]
    pub(crate) header: ShapeHeader,
    pub center: Point,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    #[serde(default)]
    pub label: String,
}

impl Arc {
    pub fn new(
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        frame_number: u32,
        style: DrawingStyle,
    ) -> Self {
        Self {
            header: ShapeHeader::new(frame_number, style),
            center,
            radius: radius.max(0.0),
            start_angle,
            end_angle,
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

    /// Signed angular span `end - start` in degrees.
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Length along the arc: `radius * radians(|end - start|)`.
    pub fn arc_length(&self) -> f64 {
        self.radius * self.sweep().abs().to_radians()
    }
}
