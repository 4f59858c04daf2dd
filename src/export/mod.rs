//! Export formats for spritesheet metadata.
//!
//! Metadata is written as JSON in the TexturePacker "hash" layout. The
//! exporter owns formatting concerns (indentation, directory creation) so
//! the packing code only builds the document.

pub mod json;

pub use json::*;

use thiserror::Error;

/// Error type for metadata export
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExportError {
    /// Writing the metadata file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The document could not be encoded as JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result alias for exporters.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Options for export operations.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Pretty print output (with indentation)
    pub pretty: bool,
    /// Spaces per indentation level when pretty printing
    pub indent: usize,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { pretty: true, indent: 4 }
    }
}
