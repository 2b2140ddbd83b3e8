//! Frame compositor.

use crate::font::LabelFont;
use crate::label::{Label, draw_label};
use crate::options::RenderOptions;
use crate::paths;
use framemark_core::diagnostics::{Emitter, SharedSink, log_sink};
use framemark_core::shapes::{Angle, Arc, Circle, Line, MAX_FONT_SCALE, Rgb, Shape, ShapeId, Text};
use image::{Rgba, RgbaImage};
use kurbo::Point;
use thiserror::Error;
use tiny_skia::{ColorU8, LineCap, LineJoin, Paint, Path, Pixmap, Stroke, Transform};

const TARGET: &str = "framemark::render";

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Frame is empty")]
    EmptyFrame,
    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),
    #[error("Invalid font data")]
    InvalidFont,
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Stroke width for a shape, widened when it is the selected one.
pub fn effective_thickness(thickness: u32, selected: bool) -> u32 {
    if selected {
        thickness.saturating_mul(2).max(thickness.saturating_add(2))
    } else {
        thickness
    }
}

/// Draws annotation shapes onto copies of video frames.
///
/// Holds no per-frame state; one renderer can serve any number of frames.
#[derive(Debug, Clone)]
pub struct FrameRenderer {
    font: LabelFont,
    options: RenderOptions,
    log: Emitter,
}

impl Default for FrameRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameRenderer {
    /// Renderer using the system sans-serif font, if one is installed.
    pub fn new() -> Self {
        let font = LabelFont::system_default().unwrap_or_else(LabelFont::fallback);
        Self::with_diagnostics(font, RenderOptions::default(), log_sink())
    }

    pub fn with_font(font: LabelFont) -> Self {
        Self::with_diagnostics(font, RenderOptions::default(), log_sink())
    }

    pub fn with_diagnostics(font: LabelFont, options: RenderOptions, sink: SharedSink) -> Self {
        let log = Emitter::new(sink, TARGET);
        if !font.has_glyphs() {
            log.warn("No label font available; labels will be drawn without text");
        }
        Self { font, options, log }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn font(&self) -> &LabelFont {
        &self.font
    }

    /// Composite `shapes` onto a copy of `frame` in list order.
    ///
    /// Shapes whose geometry cannot be drawn are skipped with a warning.
    pub fn render(
        &self,
        frame: &RgbaImage,
        shapes: &[Shape],
        show_measurements: bool,
        selected: Option<ShapeId>,
    ) -> RenderResult<RgbaImage> {
        let (width, height) = frame.dimensions();
        let mut pixmap = Pixmap::new(width, height).ok_or(RenderError::EmptyFrame)?;

        let mut output = frame.clone();
        if shapes.is_empty() {
            return Ok(output);
        }

        // tiny-skia works on premultiplied pixels; frames are straight alpha.
        for (dst, src) in pixmap.pixels_mut().iter_mut().zip(frame.pixels()) {
            let [r, g, b, a] = src.0;
            *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
        }

        for shape in shapes {
            let thickness = effective_thickness(shape.thickness(), selected == Some(shape.id()));
            let drawn = match shape {
                Shape::Line(line) => {
                    self.draw_line(&mut pixmap, line, thickness, show_measurements);
                    Ok(())
                }
                Shape::Angle(angle) => {
                    self.draw_angle(&mut pixmap, angle, thickness, show_measurements);
                    Ok(())
                }
                Shape::Circle(circle) => {
                    self.draw_circle(&mut pixmap, circle, thickness, show_measurements);
                    Ok(())
                }
                Shape::Arc(arc) => self.draw_arc(&mut pixmap, arc, thickness, show_measurements),
                Shape::Text(text) => self.draw_text(&mut pixmap, text),
            };
            if let Err(e) = drawn {
                self.log.warn(format!("Skipped {} {}: {e}", shape.kind(), shape.id()));
            }
        }

        for (dst, src) in output.pixels_mut().zip(pixmap.pixels()) {
            let c = src.demultiply();
            *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
        }
        Ok(output)
    }

    fn draw_line(&self, pixmap: &mut Pixmap, line: &Line, thickness: u32, show_label: bool) {
        let color = line.header().color();
        if let Some(path) = paths::segment(line.start, line.end) {
            stroke(pixmap, &path, color, thickness as f32);
        }
        let r = self.options.endpoint_dot_radius;
        dot(pixmap, line.start, r, color);
        dot(pixmap, line.end, r, color);

        if show_label {
            let measurement =
                format!("{:.0}px @ {:.1}°", line.length(), line.angle_from_horizontal());
            let text = with_prefix(&line.label, measurement);
            let mid = line.midpoint();
            self.label(
                pixmap,
                &text,
                Point::new(mid.x, mid.y - self.options.line_label_offset),
                self.options.line_label_scale,
                color,
            );
        }
    }

    fn draw_angle(&self, pixmap: &mut Pixmap, angle: &Angle, thickness: u32, show_label: bool) {
        let color = angle.header().color();
        if let Some(path) = paths::polyline(&[angle.point1, angle.vertex, angle.point3]) {
            stroke(pixmap, &path, color, thickness as f32);
        }
        let r = self.options.endpoint_dot_radius;
        dot(pixmap, angle.point1, r, color);
        dot(pixmap, angle.vertex, self.options.vertex_dot_radius, color);
        dot(pixmap, angle.point3, r, color);

        if angle.show_arc {
            let (start, end) = paths::angle_arc_span(angle.vertex, angle.point1, angle.point3);
            let radius = f64::from(angle.arc_radius);
            let arc_path = paths::arc(angle.vertex, radius, start, end - start);
            match arc_path {
                Some(path) => {
                    let width = angle.header().thickness().saturating_sub(1).max(1);
                    stroke(pixmap, &path, color, width as f32);
                }
                None => self
                    .log
                    .debug(format!("No arc to draw for angle {}", angle.header().id())),
            }
        }

        if show_label {
            let text = with_prefix(&angle.label, format!("{:.1}°", angle.measure()));
            let (dx, dy) = self.options.angle_label_offset;
            self.label(
                pixmap,
                &text,
                Point::new(angle.vertex.x + dx, angle.vertex.y + dy),
                self.options.angle_label_scale,
                color,
            );
        }
    }

    fn draw_circle(&self, pixmap: &mut Pixmap, circle: &Circle, thickness: u32, show_label: bool) {
        let color = circle.header().color();
        if let Some(path) = paths::circle(circle.center, circle.radius) {
            if circle.fill {
                fill(pixmap, &path, color);
            } else {
                stroke(pixmap, &path, color, thickness as f32);
            }
        }
        dot(pixmap, circle.center, self.options.center_dot_radius, color);

        if show_label {
            let text = with_prefix(&circle.label, format!("r={:.0}px", circle.radius));
            let anchor = Point::new(
                circle.center.x,
                circle.center.y - circle.radius - self.options.circle_label_offset,
            );
            self.label(pixmap, &text, anchor, self.options.circle_label_scale, color);
        }
    }

    fn draw_arc(
        &self,
        pixmap: &mut Pixmap,
        arc: &Arc,
        thickness: u32,
        show_label: bool,
    ) -> RenderResult<()> {
        if !(arc.radius > 0.0 && arc.radius.is_finite()) {
            return Err(RenderError::DegenerateGeometry(format!("arc radius {}", arc.radius)));
        }
        if !arc.start_angle.is_finite() || !arc.end_angle.is_finite() {
            return Err(RenderError::DegenerateGeometry("non-finite arc angles".into()));
        }
        let path = paths::arc(arc.center, arc.radius, arc.start_angle, arc.sweep())
            .ok_or_else(|| {
                RenderError::DegenerateGeometry(format!(
                    "empty arc span {}° to {}°",
                    arc.start_angle, arc.end_angle
                ))
            })?;

        let color = arc.header().color();
        stroke(pixmap, &path, color, thickness as f32);
        dot(pixmap, arc.center, self.options.center_dot_radius, color);

        if show_label {
            let text = arc_caption(arc);
            let anchor = Point::new(
                arc.center.x,
                arc.center.y - arc.radius - self.options.circle_label_offset,
            );
            self.label(pixmap, &text, anchor, self.options.arc_label_scale, arc.header().color());
        }
        Ok(())
    }

    fn draw_text(&self, pixmap: &mut Pixmap, text: &Text) -> RenderResult<()> {
        if !text.has_valid_scale() {
            return Err(RenderError::DegenerateGeometry(format!(
                "font scale {} outside (0, {MAX_FONT_SCALE}]",
                text.font_scale
            )));
        }
        let label = Label {
            text: &text.text,
            anchor: (text.position.x as i32, text.position.y as i32),
            scale: text.font_scale,
            color: text.header().color(),
            background: text.background,
            weight: text.header().thickness(),
        };
        draw_label(pixmap, &self.font, &self.options, &label);
        Ok(())
    }

    fn label(&self, pixmap: &mut Pixmap, text: &str, anchor: Point, scale: f64, color: Rgb) {
        let label = Label {
            text,
            anchor: (anchor.x as i32, anchor.y as i32),
            scale,
            color,
            background: true,
            weight: 1,
        };
        draw_label(pixmap, &self.font, &self.options, &label);
    }
}

fn with_prefix(label: &str, measurement: String) -> String {
    if label.is_empty() {
        measurement
    } else {
        format!("{label}: {measurement}")
    }
}

fn arc_caption(arc: &Arc) -> String {
    with_prefix(&arc.label, format!("{:.0}px", arc.arc_length()))
}

fn paint_for(color: Rgb) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, 255);
    paint.anti_alias = true;
    paint
}

fn stroke(pixmap: &mut Pixmap, path: &Path, color: Rgb, width: f32) {
    // Anything wider already covers the whole pixmap.
    let max_width = 2.0 * (pixmap.width() + pixmap.height()) as f32;
    let stroke = Stroke {
        width: width.min(max_width),
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Default::default()
    };
    pixmap.stroke_path(path, &paint_for(color), &stroke, Transform::identity(), None);
}

fn fill(pixmap: &mut Pixmap, path: &Path, color: Rgb) {
    pixmap.fill_path(
        path,
        &paint_for(color),
        tiny_skia::FillRule::Winding,
        Transform::identity(),
        None,
    );
}

fn dot(pixmap: &mut Pixmap, center: Point, radius: f32, color: Rgb) {
    if let Some(path) = paths::circle(center, f64::from(radius)) {
        fill(pixmap, &path, color);
    }
}
