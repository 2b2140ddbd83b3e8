//! User-tunable annotation settings.

use crate::shapes::DrawingStyle;
use crate::storage::{StorageError, StorageResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default pointer tolerance for hit-testing, in pixels.
pub const DEFAULT_HIT_TOLERANCE: f64 = 10.0;

/// Session settings persisted as JSON. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Style for line, angle and circle tools.
    pub style: DrawingStyle,
    /// Style for text annotations.
    pub text_style: DrawingStyle,
    pub hit_tolerance: f64,
    /// Draw measurement labels next to shapes.
    pub show_measurements: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            style: DrawingStyle::default(),
            text_style: DrawingStyle::text_default(),
            hit_tolerance: DEFAULT_HIT_TOLERANCE,
            show_measurements: true,
        }
    }
}

impl Settings {
    pub fn from_json_file(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| StorageError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        serde_json::from_str(&json).map_err(|e| {
            StorageError::Serialization(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    pub fn to_json_file(&self, path: impl AsRef<Path>) -> StorageResult<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        fs::write(path, json)
            .map_err(|e| StorageError::Io(format!("Failed to write {}: {}", path.display(), e)))
    }
}
