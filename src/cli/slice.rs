//! Slice command implementation

use std::path::Path;
use std::process::ExitCode;

use super::{EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};
use crate::config::SliceConfig;
use crate::slice::{slice_butterfly, MaxWingWidth, SliceSpec};

/// Slice the butterfly at `input` into `output_dir`.
pub fn run_slice(
    input: &Path,
    output_dir: &Path,
    body_width: u32,
    min_wing_width: u32,
    max_wing_width: &str,
    config: &SliceConfig,
) -> ExitCode {
    let max_wing_width: MaxWingWidth = match max_wing_width.parse() {
        Ok(max) => max,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let spec = SliceSpec {
        outputs: config.outputs,
        aliases: config.aliases.clone(),
        ..SliceSpec::new(body_width, min_wing_width, max_wing_width)
    };

    match slice_butterfly(input, output_dir, &spec) {
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
