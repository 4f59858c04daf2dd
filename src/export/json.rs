//! JSON hash export format.
//!
//! # Example Output
//!
//! ```json
//! {
//!     "frames": {
//!         "01.png": {
//!             "frame": { "x": 0, "y": 0, "w": 64, "h": 48 },
//!             "rotated": false,
//!             "trimmed": false,
//!             "spriteSourceSize": { "x": 0, "y": 0, "w": 64, "h": 48 },
//!             "sourceSize": { "w": 64, "h": 48 }
//!         }
//!     },
//!     "animations": { "all": ["01.png"] },
//!     "meta": {
//!         "app": "sprep",
//!         "version": "4",
//!         "image": "flap.png",
//!         "format": "RGBA8888",
//!         "size": { "w": 64, "h": 48 },
//!         "scale": "1"
//!     }
//! }
//! ```

use crate::export::{ExportOptions, Result};
use crate::spritesheet::SheetMetadata;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// JSON format exporter.
#[derive(Debug, Default)]
pub struct JsonExporter;

impl JsonExporter {
    /// Create a new JSON exporter.
    pub fn new() -> Self {
        Self
    }

    /// Export sheet metadata to a JSON string.
    pub fn export_to_string(
        &self,
        metadata: &SheetMetadata,
        options: &ExportOptions,
    ) -> Result<String> {
        if !options.pretty {
            return Ok(serde_json::to_string(metadata)?);
        }

        let indent = " ".repeat(options.indent);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
        let mut buf = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        metadata.serialize(&mut serializer)?;

        // serde_json only ever emits UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Export sheet metadata to `output_path`, creating parent directories.
    pub fn export(
        &self,
        metadata: &SheetMetadata,
        output_path: &Path,
        options: &ExportOptions,
    ) -> Result<()> {
        let json = self.export_to_string(metadata, options)?;

        crate::output::ensure_parent_dir(output_path)?;

        let mut file = File::create(output_path)?;
        file.write_all(json.as_bytes())?;

        Ok(())
    }
}
