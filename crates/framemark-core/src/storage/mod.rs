//! Persistence of annotations as `.drawings.json` documents.

mod document;
mod file;

pub use document::{DrawingDocument, FORMAT_VERSION};
pub use file::{DrawingStorage, LoadedDrawings};

use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Drawings file not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
