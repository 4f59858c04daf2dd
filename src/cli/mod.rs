//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod combine;
mod extract;
mod flatten;
mod resize;
mod slice;
mod swirl;

use clap::{ArgAction, Parser, Subcommand};
use env_logger::{Builder, Env};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::{load_config, merge_cli_overrides, CliOverrides, PrepConfig};

/// Process exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// sprep - prepare sprite assets: spritesheets, resizing, butterfly slicing,
/// bubble bursts and SVG cleanup
#[derive(Parser)]
#[command(name = "sprep")]
#[command(
    about = "Prepare 2D sprite assets: spritesheets, resizing, butterfly slicing, bubble bursts and SVG cleanup"
)]
#[command(version)]
pub struct Cli {
    /// Config file (default: nearest sprep.toml, then the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Stack every PNG in a directory into <dir>.png plus <dir>_sprites.json
    Combine {
        /// Directory holding the frames
        directory: PathBuf,
    },

    /// Resize an image to a fixed width, keeping the aspect ratio
    Resize {
        /// Image to resize
        input: PathBuf,

        /// Where to write the result (format follows the extension)
        output: PathBuf,

        /// Target width in pixels [default: 800]
        #[arg(long)]
        width: Option<u32>,
    },

    /// Rebuild a top-down butterfly at several wing widths
    Slice {
        /// Butterfly PNG
        input: PathBuf,

        /// Directory receiving 01.png, 02.png, ...
        output_dir: PathBuf,

        /// Body width in pixels
        body_width: u32,

        /// Narrowest wing width in pixels
        min_wing_width: u32,

        /// Widest wing width in pixels, or 'auto' for (width / 2) - body_width
        #[arg(default_value = "auto")]
        max_wing_width: String,

        /// Number of wing widths to render [default: 7]
        #[arg(long)]
        outputs: Option<u32>,
    },

    /// Render a bubble burst animation
    Swirl {
        /// Bubble image
        input: PathBuf,

        /// Directory receiving the frames
        output_dir: PathBuf,

        /// Number of frames [default: 10]
        #[arg(long)]
        frames: Option<u32>,

        /// Swirl radians reached on the last frame [default: 1.28]
        #[arg(long, allow_negative_numbers = true)]
        strength: Option<f64>,

        /// Frame file suffix: 01-<prefix>.png [default: break]
        #[arg(long)]
        prefix: Option<String>,

        /// Seed for the drop flight paths [default: 42]
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Bake transforms of ellipses, circles and paths into path geometry
    Flatten {
        /// SVG file
        input: PathBuf,

        /// Output file [default: <input stem>_flat.<ext>]
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Samples per path segment [default: 20]
        #[arg(long)]
        steps: Option<u32>,
    },

    /// Save the inline SVG following each heading of an HTML page
    Extract {
        /// HTML file
        input: PathBuf,

        /// Output directory [default: svgs]
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// CSS selector of the naming headings [default: h1]
        #[arg(long)]
        heading: Option<String>,
    },
}

/// Initialise `env_logger`; `RUST_LOG` wins over the `-v` count.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let _ = Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp(None)
        .try_init();
}

/// Load the config file and apply command-line overrides.
fn resolve_config(path: Option<&Path>, overrides: &CliOverrides) -> Result<PrepConfig, ExitCode> {
    let mut config = match load_config(path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            return Err(ExitCode::from(EXIT_INVALID_ARGS));
        }
    };
    merge_cli_overrides(&mut config, overrides);

    let errors = config.validate();
    if !errors.is_empty() {
        for error in errors {
            eprintln!("Error: {}", error);
        }
        return Err(ExitCode::from(EXIT_INVALID_ARGS));
    }
    Ok(config)
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let overrides = match &cli.command {
        Commands::Combine { .. } => CliOverrides::default(),
        Commands::Resize { width, .. } => CliOverrides { width: *width, ..Default::default() },
        Commands::Slice { outputs, .. } => CliOverrides { outputs: *outputs, ..Default::default() },
        Commands::Swirl { frames, strength, prefix, seed, .. } => CliOverrides {
            frames: *frames,
            strength: *strength,
            prefix: prefix.clone(),
            seed: *seed,
            ..Default::default()
        },
        Commands::Flatten { steps, .. } => CliOverrides { steps: *steps, ..Default::default() },
        Commands::Extract { out, heading, .. } => CliOverrides {
            out: out.clone(),
            heading: heading.clone(),
            ..Default::default()
        },
    };

    let config = match resolve_config(cli.config.as_deref(), &overrides) {
        Ok(config) => config,
        Err(code) => return code,
    };

    match cli.command {
        Commands::Combine { directory } => combine::run_combine(&directory, &config.combine),
        Commands::Resize { input, output, .. } => {
            resize::run_resize(&input, &output, &config.resize)
        }
        Commands::Slice {
            input,
            output_dir,
            body_width,
            min_wing_width,
            max_wing_width,
            ..
        } => slice::run_slice(
            &input,
            &output_dir,
            body_width,
            min_wing_width,
            &max_wing_width,
            &config.slice,
        ),
        Commands::Swirl { input, output_dir, .. } => {
            swirl::run_swirl(&input, &output_dir, &config.swirl)
        }
        Commands::Flatten { input, output, .. } => {
            flatten::run_flatten(&input, output.as_deref(), &config.flatten)
        }
        Commands::Extract { input, .. } => extract::run_extract(&input, &config.extract),
    }
}
