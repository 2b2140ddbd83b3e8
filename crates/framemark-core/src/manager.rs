//! Per-frame shape storage with undo/redo.

use crate::diagnostics::{Emitter, SharedSink, log_sink};
use crate::shapes::{DrawingStyle, Shape, ShapeId};
use kurbo::Point;
use std::collections::BTreeMap;

const TARGET: &str = "framemark::manager";

/// Frame number -> shapes in insertion (z) order.
pub type FrameMap = BTreeMap<u32, Vec<Shape>>;

/// A recorded mutation. Pushed once and never modified afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add(Shape),
    Remove(Shape),
    ClearFrame { frame_number: u32, shapes: Vec<Shape> },
    ClearAll(FrameMap),
}

/// Owns all annotation shapes of a session, bucketed by frame.
///
/// Every mutating entry point records a [`Command`] and drops the redo
/// history.
#[derive(Debug)]
pub struct DrawingManager {
    frames: FrameMap,
    undo_stack: Vec<Command>,
    redo_stack: Vec<Command>,
    style: DrawingStyle,
    log: Emitter,
}

impl Default for DrawingManager {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawingManager {
    /// Create an empty manager reporting to the `log` facade.
    pub fn new() -> Self {
        Self::with_diagnostics(log_sink())
    }

    /// Create an empty manager reporting to `sink`.
    pub fn with_diagnostics(sink: SharedSink) -> Self {
        Self {
            frames: FrameMap::new(),
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            style: DrawingStyle::default(),
            log: Emitter::new(sink, TARGET),
        }
    }

    /// Current drawing style for new shapes.
    pub fn style(&self) -> DrawingStyle {
        self.style
    }

    pub fn set_style(&mut self, style: DrawingStyle) {
        self.style = style;
    }

    fn push_command(&mut self, command: Command) {
        self.undo_stack.push(command);
        self.redo_stack.clear();
    }

    fn append(&mut self, shape: Shape) {
        self.frames
            .entry(shape.frame_number())
            .or_default()
            .push(shape);
    }

    /// Remove the first entry of the shape's frame with the same id.
    fn take(&mut self, frame_number: u32, id: ShapeId) -> Option<Shape> {
        let bucket = self.frames.get_mut(&frame_number)?;
        let index = bucket.iter().position(|s| s.id() == id)?;
        Some(bucket.remove(index))
    }

    /// Add a shape to its frame.
    pub fn add_shape(&mut self, shape: Shape) {
        self.log.debug(format!(
            "Added {} {} to frame {}",
            shape.kind(),
            shape.id(),
            shape.frame_number()
        ));
        self.append(shape.clone());
        self.push_command(Command::Add(shape));
    }

    /// Add many shapes, one undoable `Add` each.
    pub fn load_shapes(&mut self, shapes: impl IntoIterator<Item = Shape>) -> usize {
        let mut count = 0;
        for shape in shapes {
            self.add_shape(shape);
            count += 1;
        }
        count
    }

    /// Remove a shape from its frame. Returns false if it is not present.
    pub fn remove_shape(&mut self, shape: &Shape) -> bool {
        match self.take(shape.frame_number(), shape.id()) {
            Some(removed) => {
                self.log.debug(format!(
                    "Removed shape {} from frame {}",
                    removed.id(),
                    removed.frame_number()
                ));
                self.push_command(Command::Remove(removed));
                true
            }
            None => {
                self.log.warn(format!(
                    "Shape {} not found in frame {}",
                    shape.id(),
                    shape.frame_number()
                ));
                false
            }
        }
    }

    /// Remove a shape by id, searching every frame.
    pub fn remove_shape_by_id(&mut self, id: ShapeId) -> bool {
        match self.shape_by_id(id).cloned() {
            Some(shape) => self.remove_shape(&shape),
            None => {
                self.log.warn(format!("Shape {id} not found"));
                false
            }
        }
    }

    /// Empty one frame. Returns false when the frame has never held shapes.
    pub fn clear_frame(&mut self, frame_number: u32) -> bool {
        let Some(bucket) = self.frames.get_mut(&frame_number) else {
            return false;
        };
        let shapes = std::mem::take(bucket);
        self.log.debug(format!(
            "Cleared {} shapes from frame {}",
            shapes.len(),
            frame_number
        ));
        self.push_command(Command::ClearFrame { frame_number, shapes });
        true
    }

    /// Remove every frame and shape.
    pub fn clear_all(&mut self) {
        let snapshot = std::mem::take(&mut self.frames);
        self.log.debug(format!(
            "Cleared all shapes ({} frames)",
            snapshot.len()
        ));
        self.push_command(Command::ClearAll(snapshot));
    }

    /// Undo the last change.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(command) = self.undo_stack.pop() else {
            self.log.debug("Undo stack is empty");
            return false;
        };
        match &command {
            Command::Add(shape) => {
                if self.take(shape.frame_number(), shape.id()).is_none() {
                    self.log.warn(format!("Undo add: shape {} already gone", shape.id()));
                }
                self.log.debug(format!("Undid add of shape {}", shape.id()));
            }
            Command::Remove(shape) => {
                self.append(shape.clone());
                self.log.debug(format!("Undid remove of shape {}", shape.id()));
            }
            Command::ClearFrame { frame_number, shapes } => {
                self.frames.insert(*frame_number, shapes.clone());
                self.log.debug(format!("Undid clear of frame {frame_number}"));
            }
            Command::ClearAll(snapshot) => {
                self.frames = snapshot.clone();
                self.log.debug("Undid clear of all frames");
            }
        }
        self.redo_stack.push(command);
        true
    }

    /// Redo the last undone change.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(command) = self.redo_stack.pop() else {
            self.log.debug("Redo stack is empty");
            return false;
        };
        match &command {
            Command::Add(shape) => {
                self.append(shape.clone());
                self.log.debug(format!("Redid add of shape {}", shape.id()));
            }
            Command::Remove(shape) => {
                if self.take(shape.frame_number(), shape.id()).is_none() {
                    self.log.warn(format!("Redo remove: shape {} already gone", shape.id()));
                }
                self.log.debug(format!("Redid remove of shape {}", shape.id()));
            }
            Command::ClearFrame { frame_number, .. } => {
                if let Some(bucket) = self.frames.get_mut(frame_number) {
                    bucket.clear();
                }
                self.log.debug(format!("Redid clear of frame {frame_number}"));
            }
            Command::ClearAll(_) => {
                self.frames.clear();
                self.log.debug("Redid clear of all frames");
            }
        }
        self.undo_stack.push(command);
        true
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Shapes of one frame in z-order; empty if the frame has none.
    pub fn shapes_for_frame(&self, frame_number: u32) -> &[Shape] {
        self.frames
            .get(&frame_number)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All shapes, by ascending frame then z-order.
    pub fn all_shapes(&self) -> impl Iterator<Item = &Shape> {
        self.frames.values().flatten()
    }

    /// Total number of shapes across all frames.
    pub fn shape_count(&self) -> usize {
        self.frames.values().map(Vec::len).sum()
    }

    /// Number of frame buckets (including ones emptied by removal).
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Frame numbers that have a bucket, ascending.
    pub fn frames(&self) -> impl Iterator<Item = u32> + '_ {
        self.frames.keys().copied()
    }

    pub fn shape_by_id(&self, id: ShapeId) -> Option<&Shape> {
        self.all_shapes().find(|s| s.id() == id)
    }

    /// Nearest shape on `frame_number` within `tolerance` pixels of `point`.
    ///
    /// On equal distance the earlier (lower) shape wins.
    pub fn find_shape_at_point(
        &self,
        frame_number: u32,
        point: Point,
        tolerance: f64,
    ) -> Option<&Shape> {
        let mut nearest: Option<&Shape> = None;
        let mut nearest_distance = f64::INFINITY;
        for shape in self.shapes_for_frame(frame_number) {
            let Some(dist) = shape.hit_distance(point) else {
                continue;
            };
            if dist < nearest_distance && dist <= tolerance {
                nearest_distance = dist;
                nearest = Some(shape);
            }
        }
        nearest
    }

    /// Commands available to undo, oldest first.
    pub fn undo_history(&self) -> &[Command] {
        &self.undo_stack
    }

    /// Commands available to redo, oldest first.
    pub fn redo_history(&self) -> &[Command] {
        &self.redo_stack
    }
}
