//! Interactive drawing tools and the manager that routes pointer events to them.

mod angle;
mod circle;
mod line;
mod text;

pub use angle::AngleTool;
pub use circle::{CircleTool, MIN_CIRCLE_RADIUS};
pub use line::LineTool;
pub use text::TextTool;

use crate::diagnostics::{Emitter, SharedSink, log_sink};
use crate::shapes::{DrawingStyle, Shape};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

pub(crate) const TARGET: &str = "framemark::tools";

/// Available drawing tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    Line,
    Angle,
    Circle,
    Text,
}

impl ToolKind {
    pub const ALL: [ToolKind; 4] = [
        ToolKind::Line,
        ToolKind::Angle,
        ToolKind::Circle,
        ToolKind::Text,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ToolKind::Line => "line",
            ToolKind::Angle => "angle",
            ToolKind::Circle => "circle",
            ToolKind::Text => "text",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of a tool interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolState {
    /// Waiting for the first pointer press.
    #[default]
    Idle,
    /// A gesture is in progress.
    Drawing,
}

/// Owns one instance of each tool and routes pointer events to the active one.
#[derive(Debug, Clone)]
pub struct ToolManager {
    current: Option<ToolKind>,
    enabled: bool,
    line: LineTool,
    angle: AngleTool,
    circle: CircleTool,
    text: TextTool,
    log: Emitter,
}

impl Default for ToolManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolManager {
    pub fn new() -> Self {
        Self::with_diagnostics(log_sink())
    }

    pub fn with_diagnostics(sink: SharedSink) -> Self {
        let style = DrawingStyle::default();
        Self {
            current: None,
            enabled: true,
            line: LineTool::with_diagnostics(style, sink.clone()),
            angle: AngleTool::with_diagnostics(style, sink.clone()),
            circle: CircleTool::with_diagnostics(style, sink.clone()),
            text: TextTool::with_diagnostics(DrawingStyle::text_default(), sink.clone()),
            log: Emitter::new(sink, TARGET),
        }
    }

    pub fn current_tool(&self) -> Option<ToolKind> {
        self.current
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Select a tool, cancelling any gesture in progress.
    pub fn set_tool(&mut self, kind: ToolKind) {
        self.cancel();
        self.current = Some(kind);
        self.log.debug(format!("Tool set to {kind}"));
    }

    pub fn clear_tool(&mut self) {
        self.cancel();
        self.current = None;
    }

    /// Disabling cancels the gesture in progress; events are ignored until re-enabled.
    pub fn set_enabled(&mut self, enabled: bool) {
        if !enabled {
            self.cancel();
        }
        self.enabled = enabled;
    }

    /// Apply colour and thickness to every tool except text, which keeps its own style.
    pub fn set_style(&mut self, style: DrawingStyle) {
        self.line.set_style(style);
        self.angle.set_style(style);
        self.circle.set_style(style);
    }

    pub fn style(&self) -> DrawingStyle {
        self.line.style()
    }

    pub fn set_text_style(&mut self, style: DrawingStyle) {
        self.text.set_style(style);
    }

    pub fn line_tool(&self) -> &LineTool {
        &self.line
    }

    pub fn angle_tool(&self) -> &AngleTool {
        &self.angle
    }

    pub fn circle_tool(&self) -> &CircleTool {
        &self.circle
    }

    pub fn text_tool(&self) -> &TextTool {
        &self.text
    }

    fn active(&self) -> Option<ToolKind> {
        if self.enabled { self.current } else { None }
    }

    /// Pointer press. Returns a shape when the press completes one (the third
    /// angle click).
    pub fn pointer_down(&mut self, point: Point, frame_number: u32) -> Option<Shape> {
        match self.active()? {
            ToolKind::Line => {
                self.line.start_drawing(point, frame_number);
                None
            }
            ToolKind::Circle => {
                self.circle.start_drawing(point, frame_number);
                None
            }
            ToolKind::Text => {
                self.text.start_drawing(point, frame_number);
                None
            }
            ToolKind::Angle => {
                if self.angle.state() == ToolState::Idle {
                    self.angle.start_drawing(point, frame_number);
                    return None;
                }
                self.angle.add_point(point);
                if self.angle.click_count() == 3 {
                    self.angle.finish_drawing()
                } else {
                    None
                }
            }
        }
    }

    pub fn pointer_move(&mut self, point: Point) {
        match self.active() {
            Some(ToolKind::Line) => self.line.update_drawing(point),
            Some(ToolKind::Circle) => self.circle.update_drawing(point),
            Some(ToolKind::Angle) => self.angle.update_drawing(point),
            Some(ToolKind::Text) => self.text.update_drawing(point),
            None => {}
        }
    }

    /// Pointer release. Only drag tools finish here.
    pub fn pointer_up(&mut self) -> Option<Shape> {
        match self.active()? {
            ToolKind::Line => self.line.finish_drawing(),
            ToolKind::Circle => self.circle.finish_drawing(),
            ToolKind::Angle | ToolKind::Text => None,
        }
    }

    /// Result of the host's text dialog. `None` or empty text cancels the placement.
    pub fn submit_text(&mut self, text: Option<String>) -> Option<Shape> {
        if self.active()? != ToolKind::Text || self.text.state() != ToolState::Drawing {
            return None;
        }
        match text.filter(|t| !t.is_empty()) {
            Some(text) => {
                self.text.set_text(text, 1.0);
                self.text.finish_drawing()
            }
            None => {
                self.text.cancel_drawing();
                None
            }
        }
    }

    /// Abort the gesture in progress, if any.
    pub fn cancel(&mut self) {
        if self.is_drawing() {
            self.log.debug("Drawing cancelled");
        }
        self.line.cancel_drawing();
        self.angle.cancel_drawing();
        self.circle.cancel_drawing();
        self.text.cancel_drawing();
    }

    pub fn is_drawing(&self) -> bool {
        self.state() == ToolState::Drawing
    }

    pub fn state(&self) -> ToolState {
        match self.current {
            Some(ToolKind::Line) => self.line.state(),
            Some(ToolKind::Angle) => self.angle.state(),
            Some(ToolKind::Circle) => self.circle.state(),
            Some(ToolKind::Text) => self.text.state(),
            None => ToolState::Idle,
        }
    }

    /// Ephemeral shape for the gesture in progress.
    pub fn preview_shape(&self) -> Option<Shape> {
        match self.active()? {
            ToolKind::Line => self.line.preview_shape(),
            ToolKind::Angle => self.angle.preview_shape(),
            ToolKind::Circle => self.circle.preview_shape(),
            ToolKind::Text => self.text.preview_shape(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::MemorySink;
    use crate::shapes::Rgb;
    use std::sync::Arc;

    #[test]
    fn test_no_tool_ignores_events() {
        let mut tools = ToolManager::new();
        assert!(tools.pointer_down(Point::ZERO, 0).is_none());
        tools.pointer_move(Point::new(5.0, 5.0));
        assert!(tools.pointer_up().is_none());
        assert!(!tools.is_drawing());
    }

    #[test]
    fn test_line_drag() {
        let mut tools = ToolManager::new();
        tools.set_tool(ToolKind::Line);
        assert!(tools.pointer_down(Point::new(10.0, 10.0), 7).is_none());
        assert!(tools.is_drawing());
        tools.pointer_move(Point::new(40.0, 50.0));
        assert!(matches!(tools.preview_shape(), Some(Shape::Line(_))));

        let Some(Shape::Line(line)) = tools.pointer_up() else {
            panic!("expected line");
        };
        assert!((line.length() - 50.0).abs() < 1e-9);
        assert_eq!(line.header().frame_number(), 7);
        assert!(!tools.is_drawing());
    }

    #[test]
    fn test_angle_clicks() {
        let mut tools = ToolManager::new();
        tools.set_tool(ToolKind::Angle);
        assert!(tools.pointer_down(Point::new(100.0, 0.0), 2).is_none());
        assert!(tools.pointer_up().is_none());
        assert!(tools.pointer_down(Point::ZERO, 2).is_none());
        assert!(tools.pointer_up().is_none());
        assert!(tools.is_drawing());

        let Some(Shape::Angle(angle)) = tools.pointer_down(Point::new(0.0, 100.0), 2) else {
            panic!("expected angle");
        };
        assert!((angle.measure() - 90.0).abs() < 1e-9);
        assert!(!tools.is_drawing());
    }

    #[test]
    fn test_circle_below_minimum() {
        let mut tools = ToolManager::new();
        tools.set_tool(ToolKind::Circle);
        tools.pointer_down(Point::new(50.0, 50.0), 0);
        tools.pointer_move(Point::new(50.0, 48.0));
        assert!(tools.pointer_up().is_none());

        tools.pointer_down(Point::new(50.0, 50.0), 0);
        tools.pointer_move(Point::new(50.0, 45.0));
        assert!(matches!(tools.pointer_up(), Some(Shape::Circle(_))));
    }

    #[test]
    fn test_text_dialog() {
        let mut tools = ToolManager::new();
        tools.set_tool(ToolKind::Text);
        assert!(tools.pointer_down(Point::new(5.0, 5.0), 1).is_none());
        assert!(tools.pointer_up().is_none());
        assert!(tools.is_drawing());

        let Some(Shape::Text(text)) = tools.submit_text(Some("note".into())) else {
            panic!("expected text");
        };
        assert_eq!(text.text, "note");
        assert_eq!(text.header().color(), Rgb::white());

        tools.pointer_down(Point::new(5.0, 5.0), 1);
        assert!(tools.submit_text(Some(String::new())).is_none());
        assert!(!tools.is_drawing());

        tools.pointer_down(Point::new(5.0, 5.0), 1);
        assert!(tools.submit_text(None).is_none());
        assert!(!tools.is_drawing());
    }

    #[test]
    fn test_switching_tool_cancels() {
        let sink = Arc::new(MemorySink::new());
        let mut tools = ToolManager::with_diagnostics(sink.clone());
        tools.set_tool(ToolKind::Line);
        tools.pointer_down(Point::ZERO, 0);
        tools.set_tool(ToolKind::Circle);
        assert!(!tools.is_drawing());
        assert!(tools.line_tool().preview_shape().is_none());
        assert!(sink.records().iter().any(|r| r.message == "Drawing cancelled"));
    }

    #[test]
    fn test_disabled_ignores_events() {
        let mut tools = ToolManager::new();
        tools.set_tool(ToolKind::Line);
        tools.pointer_down(Point::ZERO, 0);
        tools.set_enabled(false);
        assert!(!tools.is_drawing());

        tools.pointer_down(Point::ZERO, 0);
        assert!(!tools.is_drawing());
        assert!(tools.pointer_up().is_none());

        tools.set_enabled(true);
        tools.pointer_down(Point::ZERO, 0);
        assert!(tools.is_drawing());
    }

    #[test]
    fn test_style_skips_text() {
        let mut tools = ToolManager::new();
        let red = DrawingStyle::new(Rgb::new(255, 0, 0), 4);
        tools.set_style(red);
        assert_eq!(tools.style(), red);
        assert_eq!(tools.circle_tool().style(), red);
        assert_eq!(tools.text_tool().style(), DrawingStyle::text_default());
    }

    #[test]
    fn test_escape_cancels_angle() {
        let mut tools = ToolManager::new();
        tools.set_tool(ToolKind::Angle);
        tools.pointer_down(Point::ZERO, 0);
        tools.pointer_down(Point::new(1.0, 0.0), 0);
        tools.cancel();
        assert_eq!(tools.angle_tool().click_count(), 0);
        assert!(tools.preview_shape().is_none());
    }
}
