//! Configuration schema types for `sprep.toml`
//!
//! Every section is optional; missing values fall back to the tool defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::burst::BurstConfig;
use crate::extract::{DEFAULT_HEADING, DEFAULT_OUT_DIR};
use crate::resize::DEFAULT_WIDTH;
use crate::slice::{DEFAULT_ALIASES, DEFAULT_OUTPUTS};
use crate::spritesheet::SheetOptions;
use crate::svg::flatten::DEFAULT_SUFFIX;
use crate::svg::path::{DEFAULT_PRECISION, DEFAULT_STEPS};
use crate::svg::FlattenOptions;

/// Highest precision accepted for path coordinates
const MAX_PRECISION: usize = 12;

/// `[combine]` - spritesheet metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombineConfig {
    pub app: String,
    pub version: String,
    pub format: String,
    pub scale: String,
    /// Spaces per JSON indentation level
    pub indent: usize,
}

impl Default for CombineConfig {
    fn default() -> Self {
        let sheet = SheetOptions::default();
        Self {
            app: sheet.app,
            version: sheet.version,
            format: sheet.format,
            scale: sheet.scale,
            indent: sheet.indent,
        }
    }
}

impl CombineConfig {
    pub fn sheet_options(&self) -> SheetOptions {
        SheetOptions {
            app: self.app.clone(),
            version: self.version.clone(),
            format: self.format.clone(),
            scale: self.scale.clone(),
            indent: self.indent,
        }
    }
}

/// `[resize]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizeConfig {
    /// Target width in pixels
    pub width: u32,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self { width: DEFAULT_WIDTH }
    }
}

/// `[slice]` - butterfly variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliceConfig {
    /// Number of wing widths rendered
    pub outputs: u32,
    /// `[source, copy]` frame numbers duplicated after slicing
    pub aliases: Vec<[u32; 2]>,
}

impl Default for SliceConfig {
    fn default() -> Self {
        Self {
            outputs: DEFAULT_OUTPUTS,
            aliases: DEFAULT_ALIASES.to_vec(),
        }
    }
}

/// `[swirl]` - bubble burst animation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwirlConfig {
    pub frames: u32,
    /// Swirl radians reached on the last frame
    pub strength: f64,
    pub prefix: String,
    pub drops: u32,
    pub seed: u64,
}

impl Default for SwirlConfig {
    fn default() -> Self {
        let burst = BurstConfig::default();
        Self {
            frames: burst.frames,
            strength: burst.strength,
            prefix: burst.prefix,
            drops: burst.drops,
            seed: burst.seed,
        }
    }
}

impl SwirlConfig {
    pub fn burst_config(&self) -> BurstConfig {
        BurstConfig {
            frames: self.frames,
            strength: self.strength,
            drops: self.drops,
            seed: self.seed,
            prefix: self.prefix.clone(),
        }
    }
}

/// `[flatten]` - SVG transform baking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlattenConfig {
    /// Samples per path segment
    pub steps: u32,
    /// Appended to the input stem for the default output name
    pub suffix: String,
    /// Decimal places in written coordinates
    pub precision: usize,
}

impl Default for FlattenConfig {
    fn default() -> Self {
        Self {
            steps: DEFAULT_STEPS,
            suffix: DEFAULT_SUFFIX.to_string(),
            precision: DEFAULT_PRECISION,
        }
    }
}

impl FlattenConfig {
    pub fn options(&self) -> FlattenOptions {
        FlattenOptions { steps: self.steps, precision: self.precision }
    }
}

/// `[extract]` - inline SVG extraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// CSS selector for the headings naming each SVG
    pub heading: String,
    pub out: PathBuf,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            heading: DEFAULT_HEADING.to_string(),
            out: PathBuf::from(DEFAULT_OUT_DIR),
        }
    }
}

/// Complete sprep.toml configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrepConfig {
    #[serde(default)]
    pub combine: CombineConfig,
    #[serde(default)]
    pub resize: ResizeConfig,
    #[serde(default)]
    pub slice: SliceConfig,
    #[serde(default)]
    pub swirl: SwirlConfig,
    #[serde(default)]
    pub flatten: FlattenConfig,
    #[serde(default)]
    pub extract: ExtractConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "swirl.frames")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sprep.toml: '{}' {}", self.field, self.message)
    }
}

impl PrepConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();
        let mut fail = |field: &str, message: &str| {
            errors.push(ConfigValidationError {
                field: field.to_string(),
                message: message.to_string(),
            });
        };

        if self.combine.version.trim().is_empty() {
            fail("combine.version", "must be a non-empty string");
        }

        if self.resize.width == 0 {
            fail("resize.width", "must be a positive integer");
        }

        if self.slice.outputs == 0 {
            fail("slice.outputs", "must be a positive integer");
        }
        if self.slice.aliases.iter().any(|[source, copy]| *source == 0 || *copy == 0) {
            fail("slice.aliases", "frame numbers start at 1");
        }

        if self.swirl.frames == 0 {
            fail("swirl.frames", "must be a positive integer");
        }
        if !self.swirl.strength.is_finite() {
            fail("swirl.strength", "must be a finite number");
        }
        if self.swirl.prefix.trim().is_empty() {
            fail("swirl.prefix", "must be a non-empty string");
        }

        if self.flatten.steps == 0 {
            fail("flatten.steps", "must be a positive integer");
        }
        if self.flatten.suffix.is_empty() {
            fail("flatten.suffix", "must be a non-empty string");
        }
        if self.flatten.precision > MAX_PRECISION {
            fail("flatten.precision", "must be at most 12");
        }

        if self.extract.heading.trim().is_empty() {
            fail("extract.heading", "must be a non-empty selector");
        }
        if self.extract.out.as_os_str().is_empty() {
            fail("extract.out", "must be a non-empty path");
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: PrepConfig = toml::from_str("").unwrap();
        assert_eq!(config, PrepConfig::default());
        assert_eq!(config.resize.width, 800);
        assert_eq!(config.slice.outputs, 7);
        assert_eq!(config.slice.aliases, vec![[5, 8], [3, 9], [1, 10]]);
        assert_eq!(config.swirl.frames, 10);
        assert_eq!(config.swirl.strength, 1.28);
        assert_eq!(config.swirl.prefix, "break");
        assert_eq!(config.flatten.steps, 20);
        assert_eq!(config.flatten.suffix, "_flat");
        assert_eq!(config.extract.heading, "h1");
        assert_eq!(config.extract.out, PathBuf::from("svgs"));
        assert!(config.is_valid());
    }

    #[test]
    fn test_full_config_parse() {
        let toml = r#"
[combine]
app = "my-game"
indent = 2

[resize]
width = 640

[slice]
outputs = 5
aliases = [[4, 6]]

[swirl]
frames = 12
strength = 6.28
prefix = "pop"
drops = 8
seed = 7

[flatten]
steps = 8
suffix = ".baked"
precision = 2

[extract]
heading = "h2.title"
out = "icons"
"#;
        let config: PrepConfig = toml::from_str(toml).unwrap();

        assert_eq!(config.combine.app, "my-game");
        assert_eq!(config.combine.indent, 2);
        assert_eq!(config.combine.format, "RGBA8888");
        assert_eq!(config.resize.width, 640);
        assert_eq!(config.slice.aliases, vec![[4, 6]]);
        assert_eq!(config.swirl.burst_config().drops, 8);
        assert_eq!(config.swirl.burst_config().seed, 7);
        assert_eq!(config.flatten.options().precision, 2);
        assert_eq!(config.extract.heading, "h2.title");
        assert!(config.is_valid());
    }

    #[test]
    fn test_validation_zero_frames() {
        let config: PrepConfig = toml::from_str("[swirl]\nframes = 0").unwrap();
        let errors = config.validate();
        assert!(errors.iter().any(|e| e.field == "swirl.frames"));
        assert_eq!(
            errors[0].to_string(),
            "sprep.toml: 'swirl.frames' must be a positive integer"
        );
    }

    #[test]
    fn test_validation_collects_all() {
        let toml = r#"
[resize]
width = 0

[flatten]
steps = 0
precision = 40

[slice]
aliases = [[0, 3]]
"#;
        let config: PrepConfig = toml::from_str(toml).unwrap();
        let fields: Vec<_> = config.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec!["resize.width", "slice.aliases", "flatten.steps", "flatten.precision"]
        );
    }

    #[test]
    fn test_negative_width_is_parse_error() {
        assert!(toml::from_str::<PrepConfig>("[resize]\nwidth = -5").is_err());
    }
}
