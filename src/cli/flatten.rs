//! Flatten command implementation

use std::path::Path;
use std::process::ExitCode;

use super::{EXIT_ERROR, EXIT_SUCCESS};
use crate::config::FlattenConfig;
use crate::svg::flatten::{default_output_path, flatten_svg_file};

/// Flatten the SVG at `input`, writing next to it unless `output` is given.
pub fn run_flatten(input: &Path, output: Option<&Path>, config: &FlattenConfig) -> ExitCode {
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(input, &config.suffix));

    match flatten_svg_file(input, &output, &config.options()) {
        Ok(report) => {
            log::info!(
                "{} ellipse(s), {} circle(s), {} path(s) flattened",
                report.ellipses,
                report.circles,
                report.paths
            );
            println!("Done. Wrote flattened SVG to: {}", output.display());
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}: {}", input.display(), e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
