//! Three-click angle tool.

use super::{TARGET, ToolState};
use crate::diagnostics::{Emitter, SharedSink, log_sink};
use crate::shapes::{Angle, DrawingStyle, Shape};
use kurbo::Point;

#[derive(Debug, Clone, Copy)]
struct AngleDraft {
    frame_number: u32,
    point1: Point,
    vertex: Option<Point>,
    point3: Option<Point>,
}

impl AngleDraft {
    fn click_count(&self) -> u8 {
        1 + u8::from(self.vertex.is_some()) + u8::from(self.point3.is_some())
    }
}

/// First click sets `point1`, the second the vertex, the third `point3`.
#[derive(Debug, Clone)]
pub struct AngleTool {
    style: DrawingStyle,
    draft: Option<AngleDraft>,
    log: Emitter,
}

impl AngleTool {
    pub fn new(style: DrawingStyle) -> Self {
        Self::with_diagnostics(style, log_sink())
    }

    pub fn with_diagnostics(style: DrawingStyle, sink: SharedSink) -> Self {
        Self {
            style,
            draft: None,
            log: Emitter::new(sink, TARGET),
        }
    }

    pub fn style(&self) -> DrawingStyle {
        self.style
    }

    pub fn set_style(&mut self, style: DrawingStyle) {
        self.style = style;
    }

    pub fn state(&self) -> ToolState {
        if self.draft.is_some() {
            ToolState::Drawing
        } else {
            ToolState::Idle
        }
    }

    /// Points placed so far, 0 to 3.
    pub fn click_count(&self) -> u8 {
        self.draft.as_ref().map_or(0, AngleDraft::click_count)
    }

    pub fn start_drawing(&mut self, point: Point, frame_number: u32) {
        self.draft = Some(AngleDraft {
            frame_number,
            point1: point,
            vertex: None,
            point3: None,
        });
        self.log.debug("AngleTool: first point set");
    }

    /// Place the vertex (second click) or the third point (third click).
    /// Ignored while idle or once all three points are set.
    pub fn add_point(&mut self, point: Point) {
        let Some(draft) = &mut self.draft else {
            return;
        };
        if draft.vertex.is_none() {
            draft.vertex = Some(point);
            self.log.debug("AngleTool: vertex set");
        } else if draft.point3.is_none() {
            draft.point3 = Some(point);
            self.log.debug("AngleTool: third point set");
        }
    }

    /// Pointer motion does not move any placed point.
    pub fn update_drawing(&mut self, _point: Point) {}

    pub fn finish_drawing(&mut self) -> Option<Shape> {
        let draft = self.draft.take()?;
        let (Some(vertex), Some(point3)) = (draft.vertex, draft.point3) else {
            self.log.debug(format!(
                "AngleTool: discarded after {} of 3 points",
                draft.click_count()
            ));
            return None;
        };
        let angle = Angle::new(draft.point1, vertex, point3, draft.frame_number, self.style)
            .with_show_arc(true);
        self.log.debug(format!("AngleTool: finished angle {:.1}°", angle.measure()));
        Some(angle.into())
    }

    pub fn cancel_drawing(&mut self) {
        self.draft = None;
    }

    /// Available once the vertex is placed. Until the third point exists the
    /// vertex stands in for it and no arc is shown.
    pub fn preview_shape(&self) -> Option<Shape> {
        let draft = self.draft.as_ref()?;
        let vertex = draft.vertex?;
        let point3 = draft.point3.unwrap_or(vertex);
        let style = DrawingStyle::new(self.style.color, self.style.thickness.saturating_sub(1));
        let angle = Angle::new(draft.point1, vertex, point3, draft.frame_number, style)
            .with_show_arc(draft.click_count() == 3);
        Some(angle.into())
    }
}
