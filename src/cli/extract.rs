//! Extract command implementation

use std::path::Path;
use std::process::ExitCode;

use super::{EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};
use crate::config::ExtractConfig;
use crate::extract::{extract_file, ExtractError, ExtractOutcome};

/// Save the SVG following each heading of the page at `input`.
pub fn run_extract(input: &Path, config: &ExtractConfig) -> ExitCode {
    let outcomes = match extract_file(input, &config.heading, &config.out) {
        Ok(outcomes) => outcomes,
        Err(e @ ExtractError::Selector(_)) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
        Err(e) => {
            eprintln!("Error: {}: {}", input.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    for outcome in &outcomes {
        match outcome {
            ExtractOutcome::Saved { path, .. } => {
                let name = path.file_name().unwrap_or(path.as_os_str());
                println!("Saved: {}", name.to_string_lossy());
            }
            ExtractOutcome::NoSvg { heading } => {
                println!("No <svg> found after heading: {}", heading);
            }
            ExtractOutcome::EmptyName { heading } => {
                println!("Skipped heading without a usable file name: {}", heading);
            }
        }
    }
    ExitCode::from(EXIT_SUCCESS)
}
