//! On-disk document layout.

use serde::{Deserialize, Serialize};

/// Version written into every saved document.
pub const FORMAT_VERSION: &str = "1.0";

/// Top-level JSON object of a drawings file.
///
/// Shapes stay as raw records here so that one bad record does not reject the
/// whole file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawingDocument {
    #[serde(default = "unknown_version")]
    pub version: String,
    #[serde(default)]
    pub video_path: Option<String>,
    #[serde(default)]
    pub created_at: f64,
    #[serde(default)]
    pub shape_count: usize,
    #[serde(default)]
    pub shapes: Vec<serde_json::Value>,
}

fn unknown_version() -> String {
    "0.0".to_string()
}
