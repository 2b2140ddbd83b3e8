//! Tunable layout constants for the compositor.

use serde::{Deserialize, Serialize};

/// Sizes and offsets used when drawing shapes and their labels.
///
/// Distances are in frame pixels. Label scales are multiplied by
/// `font_px_per_scale` to get the glyph height.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub label_padding: f32,
    /// Opacity of the black box behind labels.
    pub label_background_alpha: f32,
    pub font_px_per_scale: f32,
    pub line_label_scale: f64,
    pub angle_label_scale: f64,
    pub circle_label_scale: f64,
    pub arc_label_scale: f64,
    pub endpoint_dot_radius: f32,
    pub vertex_dot_radius: f32,
    pub center_dot_radius: f32,
    /// Distance of the line label above the midpoint.
    pub line_label_offset: f64,
    /// Gap between the top of a circle or arc and its label.
    pub circle_label_offset: f64,
    /// Label position relative to the angle vertex.
    pub angle_label_offset: (f64, f64),
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            label_padding: 4.0,
            label_background_alpha: 0.6,
            font_px_per_scale: 30.0,
            line_label_scale: 0.5,
            angle_label_scale: 0.6,
            circle_label_scale: 0.5,
            arc_label_scale: 0.5,
            endpoint_dot_radius: 4.0,
            vertex_dot_radius: 5.0,
            center_dot_radius: 3.0,
            line_label_offset: 10.0,
            circle_label_offset: 15.0,
            angle_label_offset: (20.0, -20.0),
        }
    }
}
