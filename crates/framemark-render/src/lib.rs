//! FrameMark Render Library
//!
//! CPU compositing of annotation shapes onto video frames with tiny-skia.

mod font;
mod label;
mod options;
mod paths;
mod renderer;

pub use font::{LabelFont, TextMetrics};
pub use options::RenderOptions;
pub use renderer::{FrameRenderer, RenderError, RenderResult, effective_thickness};
