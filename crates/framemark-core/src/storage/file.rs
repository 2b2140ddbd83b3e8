//! JSON file storage for annotations.

use super::document::{DrawingDocument, FORMAT_VERSION};
use super::{StorageError, StorageResult};
use crate::diagnostics::{Emitter, SharedSink, log_sink};
use crate::shapes::{Shape, timestamp_now};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const TARGET: &str = "framemark::storage";

/// Result of [`DrawingStorage::load`].
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDrawings {
    pub shapes: Vec<Shape>,
    pub video_path: Option<String>,
    /// Version string found in the file.
    pub version: String,
}

/// Reads and writes `.drawings.json` files.
///
/// Records that cannot be decoded are skipped with a warning; only unreadable
/// files and malformed documents fail a load.
#[derive(Debug, Clone)]
pub struct DrawingStorage {
    log: Emitter,
}

impl Default for DrawingStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawingStorage {
    pub fn new() -> Self {
        Self::with_diagnostics(log_sink())
    }

    pub fn with_diagnostics(sink: SharedSink) -> Self {
        Self {
            log: Emitter::new(sink, TARGET),
        }
    }

    /// Write `shapes` to `path` as a pretty-printed document.
    pub fn save(
        &self,
        shapes: &[Shape],
        path: impl AsRef<Path>,
        video_path: Option<&str>,
    ) -> StorageResult<()> {
        let path = path.as_ref();
        let records = shapes
            .iter()
            .map(Shape::to_record)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        let document = DrawingDocument {
            version: FORMAT_VERSION.to_string(),
            video_path: video_path.map(str::to_string),
            created_at: timestamp_now(),
            shape_count: records.len(),
            shapes: records,
        };
        let json = serde_json::to_string_pretty(&document)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        fs::write(path, json).map_err(|e| {
            self.log.error(format!("Failed to save drawings: {e}"));
            StorageError::Io(format!("Failed to write {}: {}", path.display(), e))
        })?;

        self.log.info(format!("Saved {} shapes to {}", shapes.len(), path.display()));
        Ok(())
    }

    /// Read a document from `path`.
    pub fn load(&self, path: impl AsRef<Path>) -> StorageResult<LoadedDrawings> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            self.log.error(format!("Failed to load drawings: {e}"));
            match e.kind() {
                io::ErrorKind::NotFound => StorageError::NotFound(path.display().to_string()),
                _ => StorageError::Io(format!("Failed to read {}: {}", path.display(), e)),
            }
        })?;

        let document: DrawingDocument = serde_json::from_str(&json).map_err(|e| {
            self.log.error(format!("Failed to load drawings: {e}"));
            StorageError::Serialization(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        if document.version != FORMAT_VERSION {
            self.log.warn(format!(
                "Loading drawings from version {} (current: {})",
                document.version, FORMAT_VERSION
            ));
        }

        let shapes = self.decode_records(&document.shapes);
        self.log.info(format!("Loaded {} shapes from {}", shapes.len(), path.display()));

        Ok(LoadedDrawings {
            shapes,
            video_path: document.video_path,
            version: document.version,
        })
    }

    /// `<video stem>.drawings.json`.
    pub fn default_filename(video_path: impl AsRef<Path>) -> String {
        let stem = video_path
            .as_ref()
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        format!("{stem}.drawings.json")
    }

    /// Look for the default drawings file in the working directory, then next
    /// to the video. Load failures are logged and yield `None`.
    pub fn auto_load(&self, video_path: impl AsRef<Path>) -> Option<Vec<Shape>> {
        let video_path = video_path.as_ref();
        let filename = Self::default_filename(video_path);
        let mut candidates = vec![PathBuf::from(&filename)];
        if let Some(dir) = video_path.parent() {
            candidates.push(dir.join(&filename));
        }

        let path = candidates.into_iter().find(|p| p.exists())?;
        match self.load(&path) {
            Ok(loaded) => {
                self.log.info(format!(
                    "Auto-loaded {} drawings for {}",
                    loaded.shapes.len(),
                    video_path.display()
                ));
                Some(loaded.shapes)
            }
            Err(e) => {
                self.log.warn(format!("Failed to auto-load drawings: {e}"));
                None
            }
        }
    }

    /// Group shape records by frame number.
    pub fn export_by_frame(&self, shapes: &[Shape]) -> BTreeMap<u32, Vec<serde_json::Value>> {
        let mut frames: BTreeMap<u32, Vec<serde_json::Value>> = BTreeMap::new();
        for shape in shapes {
            match shape.to_record() {
                Ok(record) => frames.entry(shape.frame_number()).or_default().push(record),
                Err(e) => self.log.warn(format!("Failed to serialize shape {}: {e}", shape.id())),
            }
        }
        frames
    }

    /// Flatten a frame-grouped map back into shapes.
    pub fn import_by_frame(&self, frames: &BTreeMap<u32, Vec<serde_json::Value>>) -> Vec<Shape> {
        frames
            .values()
            .flat_map(|records| self.decode_records(records))
            .collect()
    }

    fn decode_records(&self, records: &[serde_json::Value]) -> Vec<Shape> {
        records
            .iter()
            .filter_map(|record| match Shape::from_record(record) {
                Ok(shape) => Some(shape),
                Err(e) => {
                    self.log.warn(format!("Failed to deserialize shape: {e}"));
                    None
                }
            })
            .collect()
    }
}
