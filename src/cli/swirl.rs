//! Swirl command implementation

use std::path::Path;
use std::process::ExitCode;

use super::{EXIT_ERROR, EXIT_SUCCESS};
use crate::burst::create_burst_sprites;
use crate::config::SwirlConfig;

/// Render the bubble burst animation for `input` into `output_dir`.
pub fn run_swirl(input: &Path, output_dir: &Path, config: &SwirlConfig) -> ExitCode {
    match create_burst_sprites(input, output_dir, &config.burst_config()) {
        Ok(written) => {
            for path in &written {
                println!("Saved {}", path.display());
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
