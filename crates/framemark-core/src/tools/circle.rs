//! Center-and-drag circle tool.

use super::{TARGET, ToolState};
use crate::diagnostics::{Emitter, SharedSink, log_sink};
use crate::geometry::distance;
use crate::shapes::{Circle, DrawingStyle, Shape};
use kurbo::Point;

/// Circles smaller than this are discarded on finish.
pub const MIN_CIRCLE_RADIUS: f64 = 5.0;

#[derive(Debug, Clone, Copy)]
struct CircleDraft {
    frame_number: u32,
    center: Point,
    radius: f64,
}

/// Press to fix the center, drag to set the radius, release to finish.
#[derive(Debug, Clone)]
pub struct CircleTool {
    style: DrawingStyle,
    draft: Option<CircleDraft>,
    log: Emitter,
}

impl CircleTool {
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

    /// Current radius of the gesture, 0 while idle.
    pub fn radius(&self) -> f64 {
        self.draft.map_or(0.0, |d| d.radius)
    }

    pub fn start_drawing(&mut self, point: Point, frame_number: u32) {
        self.draft = Some(CircleDraft {
            frame_number,
            center: point,
            radius: 0.0,
        });
        self.log.debug(format!("CircleTool: center set at ({}, {})", point.x, point.y));
    }

    pub fn update_drawing(&mut self, point: Point) {
        if let Some(draft) = &mut self.draft {
            draft.radius = distance(draft.center, point);
        }
    }

    pub fn finish_drawing(&mut self) -> Option<Shape> {
        let draft = self.draft.take()?;
        if draft.radius < MIN_CIRCLE_RADIUS {
            self.log.debug(format!(
                "CircleTool: discarded circle with radius {:.1}px",
                draft.radius
            ));
            return None;
        }
        let circle = Circle::new(draft.center, draft.radius, draft.frame_number, self.style);
        self.log.debug(format!("CircleTool: finished circle with radius {:.1}px", draft.radius));
        Some(circle.into())
    }

    pub fn cancel_drawing(&mut self) {
        self.draft = None;
    }

    /// Thinner outline of the circle being dragged; none until it has a radius.
    pub fn preview_shape(&self) -> Option<Shape> {
        let draft = self.draft.as_ref()?;
        if draft.radius <= 0.0 {
            return None;
        }
        let style = DrawingStyle::new(self.style.color, self.style.thickness.saturating_sub(1));
        Some(Circle::new(draft.center, draft.radius, draft.frame_number, style).into())
    }
}
