//! sprep - command-line entry point

use std::process::ExitCode;

use sprep::cli;

fn main() -> ExitCode {
    cli::run()
}
