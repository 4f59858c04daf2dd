//! Configuration loading and discovery for `sprep.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::PrepConfig;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name searched for when no explicit config is given
pub const CONFIG_FILE: &str = "sprep.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse sprep.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error(
        "Config validation failed:\n{}",
        .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n")
    )]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override resize width
    pub width: Option<u32>,
    /// Override number of slice variants
    pub outputs: Option<u32>,
    /// Override burst frame count
    pub frames: Option<u32>,
    /// Override burst swirl strength
    pub strength: Option<f64>,
    /// Override burst file prefix
    pub prefix: Option<String>,
    /// Override drop RNG seed
    pub seed: Option<u64>,
    /// Override samples per path segment
    pub steps: Option<u32>,
    /// Override heading selector
    pub heading: Option<String>,
    /// Override extraction output directory
    pub out: Option<PathBuf>,
}

/// Find sprep.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for sprep.toml
/// 2. Check XDG_CONFIG_HOME/sprep/sprep.toml (or ~/.config/sprep/sprep.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find sprep.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("sprep").join(CONFIG_FILE);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Find sprep.toml by walking up from `start`.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a sprep.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses `find_config()`
/// to locate the config file. If no config file is found, returns the
/// defaults.
///
/// # Example
/// ```ignore
/// let config = load_config(None)?;
/// let config = load_config(Some(Path::new("assets/sprep.toml")))?;
/// ```
pub fn load_config(path: Option<&Path>) -> Result<PrepConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => {
            log::debug!("loading config from {}", p.display());
            load_config_file(&p)
        }
        None => Ok(default_config()),
    }
}

fn load_config_file(path: &Path) -> Result<PrepConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: PrepConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// Configuration used when no sprep.toml is found.
pub fn default_config() -> PrepConfig {
    PrepConfig::default()
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values.
pub fn merge_cli_overrides(config: &mut PrepConfig, overrides: &CliOverrides) {
    if let Some(width) = overrides.width {
        config.resize.width = width;
    }

    if let Some(outputs) = overrides.outputs {
        config.slice.outputs = outputs;
    }

    if let Some(frames) = overrides.frames {
        config.swirl.frames = frames;
    }
    if let Some(strength) = overrides.strength {
        config.swirl.strength = strength;
    }
    if let Some(ref prefix) = overrides.prefix {
        config.swirl.prefix = prefix.clone();
    }
    if let Some(seed) = overrides.seed {
        config.swirl.seed = seed;
    }

    if let Some(steps) = overrides.steps {
        config.flatten.steps = steps;
    }

    if let Some(ref heading) = overrides.heading {
        config.extract.heading = heading.clone();
    }
    if let Some(ref out) = overrides.out {
        config.extract.out = out.clone();
    }
}
