//! Combine command implementation

use std::path::Path;
use std::process::ExitCode;

use super::{EXIT_ERROR, EXIT_SUCCESS};
use crate::config::CombineConfig;
use crate::spritesheet::{combine_directory, SpritesheetError};

/// Stack the PNG frames of `directory` into a spritesheet.
///
/// An empty directory is reported but is not a failure.
pub fn run_combine(directory: &Path, config: &CombineConfig) -> ExitCode {
    match combine_directory(directory, &config.sheet_options()) {
        Ok(output) => {
            log::info!("packed {} frame(s)", output.frame_count);
            println!("Spritesheet saved as {}", output.image_path.display());
            println!("Metadata saved as {}", output.json_path.display());
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e @ SpritesheetError::NoImages(_)) => {
            println!("{}", e);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
