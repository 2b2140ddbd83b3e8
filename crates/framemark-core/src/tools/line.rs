//! Two-point line tool.

use super::{TARGET, ToolState};
use crate::diagnostics::{Emitter, SharedSink, log_sink};
use crate::shapes::{DrawingStyle, Line, Shape};
use kurbo::Point;

#[derive(Debug, Clone, Copy)]
struct LineDraft {
    frame_number: u32,
    start: Point,
    end: Point,
}

/// Press to set the start, drag to move the end, release to finish.
///
/// There is no minimum length: a click without a drag yields a zero-length line.
#[derive(Debug, Clone)]
pub struct LineTool {
    style: DrawingStyle,
    draft: Option<LineDraft>,
    log: Emitter,
}

impl LineTool {
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

    pub fn start_drawing(&mut self, point: Point, frame_number: u32) {
        self.draft = Some(LineDraft {
            frame_number,
            start: point,
            end: point,
        });
        self.log.debug(format!("LineTool: started at ({}, {})", point.x, point.y));
    }

    pub fn update_drawing(&mut self, point: Point) {
        if let Some(draft) = &mut self.draft {
            draft.end = point;
        }
    }

    pub fn finish_drawing(&mut self) -> Option<Shape> {
        let draft = self.draft.take()?;
        let line = Line::new(draft.start, draft.end, draft.frame_number, self.style);
        self.log.debug(format!("LineTool: finished line with length {:.1}px", line.length()));
        Some(line.into())
    }

    pub fn cancel_drawing(&mut self) {
        self.draft = None;
    }

    pub fn preview_shape(&self) -> Option<Shape> {
        let draft = self.draft.as_ref()?;
        Some(Line::new(draft.start, draft.end, draft.frame_number, self.style).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_gesture() {
        let mut tool = LineTool::new(DrawingStyle::default());
        assert_eq!(tool.state(), ToolState::Idle);
        assert!(tool.preview_shape().is_none());

        tool.start_drawing(Point::new(0.0, 0.0), 12);
        assert_eq!(tool.state(), ToolState::Drawing);
        tool.update_drawing(Point::new(3.0, 4.0));

        let Some(Shape::Line(preview)) = tool.preview_shape() else {
            panic!("expected line preview");
        };
        assert_eq!(preview.end, Point::new(3.0, 4.0));

        let Some(Shape::Line(line)) = tool.finish_drawing() else {
            panic!("expected line");
        };
        assert!((line.length() - 5.0).abs() < 1e-9);
        assert_eq!(line.header().frame_number(), 12);
        assert_eq!(tool.state(), ToolState::Idle);
    }

    #[test]
    fn test_zero_length_line_is_kept() {
        let mut tool = LineTool::new(DrawingStyle::default());
        tool.start_drawing(Point::new(7.0, 7.0), 0);
        let shape = tool.finish_drawing();
        assert!(matches!(shape, Some(Shape::Line(l)) if l.length() == 0.0));
    }

    #[test]
    fn test_update_while_idle_is_ignored() {
        let mut tool = LineTool::new(DrawingStyle::default());
        tool.update_drawing(Point::new(1.0, 1.0));
        assert_eq!(tool.state(), ToolState::Idle);
        assert!(tool.finish_drawing().is_none());
    }

    #[test]
    fn test_cancel() {
        let mut tool = LineTool::new(DrawingStyle::default());
        tool.start_drawing(Point::ZERO, 0);
        tool.cancel_drawing();
        assert_eq!(tool.state(), ToolState::Idle);
        assert!(tool.preview_shape().is_none());
        assert!(tool.finish_drawing().is_none());
    }
}
