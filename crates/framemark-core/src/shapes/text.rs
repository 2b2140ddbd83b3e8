//! Text annotation shape.

use super::{DrawingStyle, ShapeHeader};
use crate::geometry::distance;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Largest accepted `font_scale`.
pub const MAX_FONT_SCALE: f64 = 20.0;

fn default_font_scale() -> f64 {
    1.0
}

fn default_true() -> bool {
    true
}

/// Free text anchored at a point (baseline-left of the first glyph).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    #[serde(flatten)]
    pub(crate) header: ShapeHeader,
    pub position: Point,
    pub text: String,
    #[serde(default = "default_font_scale")]
    pub font_scale: f64,
    /// Paint a translucent box behind the text.
    #[serde(default = "default_true")]
    pub background: bool,
}

impl Text {
    pub fn new(
        position: Point,
        text: impl Into<String>,
        frame_number: u32,
        style: DrawingStyle,
    ) -> Self {
        Self {
            header: ShapeHeader::new(frame_number, style),
            position,
            text: text.into(),
            font_scale: default_font_scale(),
            background: true,
        }
    }

    pub fn with_font_scale(mut self, font_scale: f64) -> Self {
        self.font_scale = font_scale;
        self
    }

    pub fn with_background(mut self, background: bool) -> Self {
        self.background = background;
        self
    }

    pub fn header(&self) -> &ShapeHeader {
        &self.header
    }

    /// Whether `font_scale` is a positive finite value no larger than [`MAX_FONT_SCALE`].
    pub fn has_valid_scale(&self) -> bool {
        self.font_scale > 0.0 && self.font_scale <= MAX_FONT_SCALE
    }

    pub(crate) fn hit_distance(&self, point: Point) -> f64 {
        distance(point, self.position)
    }
}
