//! FrameMark Core Library
//!
//! Annotation shapes for video frames, their geometry, per-frame storage with
//! undo/redo, interactive drawing tools and JSON persistence.

pub mod diagnostics;
pub mod geometry;
pub mod manager;
pub mod settings;
pub mod shapes;
pub mod storage;
pub mod tools;

pub use diagnostics::{Diagnostic, DiagnosticSink, Emitter, LogSink, MemorySink, SharedSink};
pub use manager::DrawingManager;
pub use settings::{DEFAULT_HIT_TOLERANCE, Settings};
pub use shapes::{DrawingStyle, Rgb, Shape, ShapeId, ShapeKind};
pub use storage::{DrawingStorage, LoadedDrawings, StorageError, StorageResult};
pub use tools::{ToolKind, ToolManager, ToolState};
