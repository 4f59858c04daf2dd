//! Resize command implementation

use std::path::Path;
use std::process::ExitCode;

use super::{EXIT_ERROR, EXIT_SUCCESS};
use crate::config::ResizeConfig;
use crate::resize::resize_file;

/// Resize `input` to the configured width and save it as `output`.
pub fn run_resize(input: &Path, output: &Path, config: &ResizeConfig) -> ExitCode {
    match resize_file(input, output, config.width) {
        Ok((width, height)) => {
            log::info!("{} -> {}x{}", input.display(), width, height);
            println!("Saved resized image to: {}", output.display());
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}: {}", input.display(), e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
