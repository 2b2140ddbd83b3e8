//! Click-to-place text tool. The text itself comes from the host's input dialog.

use super::{TARGET, ToolState};
use crate::diagnostics::{Emitter, SharedSink, log_sink};
use crate::shapes::{DrawingStyle, Shape, Text};
use kurbo::Point;

#[derive(Debug, Clone, Copy)]
struct TextDraft {
    frame_number: u32,
    position: Point,
}

#[derive(Debug, Clone)]
pub struct TextTool {
    style: DrawingStyle,
    draft: Option<TextDraft>,
    text: String,
    font_scale: f64,
    log: Emitter,
}

impl TextTool {
    pub fn new(style: DrawingStyle) -> Self {
        Self::with_diagnostics(style, log_sink())
    }

    pub fn with_diagnostics(style: DrawingStyle, sink: SharedSink) -> Self {
        Self {
            style,
            draft: None,
            text: String::new(),
            font_scale: 1.0,
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

    /// Pending text content.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn start_drawing(&mut self, point: Point, frame_number: u32) {
        self.draft = Some(TextDraft {
            frame_number,
            position: point,
        });
        self.log.debug(format!("TextTool: position set at ({}, {})", point.x, point.y));
    }

    /// Supply the annotation text before finishing.
    pub fn set_text(&mut self, text: impl Into<String>, font_scale: f64) {
        self.text = text.into();
        self.font_scale = font_scale;
    }

    /// Position is fixed once placed.
    pub fn update_drawing(&mut self, _point: Point) {}

    pub fn finish_drawing(&mut self) -> Option<Shape> {
        let draft = self.draft.take();
        let text = std::mem::take(&mut self.text);
        let draft = draft?;
        if text.is_empty() {
            self.log.debug("TextTool: discarded empty text");
            return None;
        }
        self.log.debug(format!("TextTool: finished text '{text}'"));
        let shape = Text::new(draft.position, text, draft.frame_number, self.style)
            .with_font_scale(self.font_scale)
            .with_background(true);
        Some(shape.into())
    }

    pub fn cancel_drawing(&mut self) {
        self.draft = None;
        self.text.clear();
    }

    /// Shown once the position is placed and text has been supplied.
    pub fn preview_shape(&self) -> Option<Shape> {
        let draft = self.draft.as_ref()?;
        if self.text.is_empty() {
            return None;
        }
        let shape = Text::new(draft.position, self.text.clone(), draft.frame_number, self.style)
            .with_font_scale(self.font_scale);
        Some(shape.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_with_content() {
        let mut tool = TextTool::new(DrawingStyle::text_default());
        tool.start_drawing(Point::new(10.0, 20.0), 3);
        tool.set_text("Impact", 0.8);
        let Some(Shape::Text(text)) = tool.finish_drawing() else {
            panic!("expected text");
        };
        assert_eq!(text.text, "Impact");
        assert_eq!(text.font_scale, 0.8);
        assert!(text.background);
        assert_eq!(text.position, Point::new(10.0, 20.0));
        assert_eq!(tool.state(), ToolState::Idle);
        assert!(tool.text().is_empty());
    }

    #[test]
    fn test_empty_text_discarded() {
        let mut tool = TextTool::new(DrawingStyle::text_default());
        tool.start_drawing(Point::ZERO, 0);
        assert!(tool.finish_drawing().is_none());
        assert_eq!(tool.state(), ToolState::Idle);
    }

    #[test]
    fn test_text_without_position_discarded() {
        let mut tool = TextTool::new(DrawingStyle::text_default());
        tool.set_text("orphan", 1.0);
        assert!(tool.finish_drawing().is_none());
        assert!(tool.text().is_empty());
    }

    #[test]
    fn test_preview_and_cancel() {
        let mut tool = TextTool::new(DrawingStyle::text_default());
        tool.start_drawing(Point::ZERO, 0);
        assert!(tool.preview_shape().is_none());
        tool.set_text("draft", 1.0);
        assert!(matches!(tool.preview_shape(), Some(Shape::Text(_))));
        tool.cancel_drawing();
        assert!(tool.preview_shape().is_none());
        assert!(tool.text().is_empty());
    }
}
