//! Butterfly slicing - rebuilds a top-down butterfly at several wing widths
//!
//! The source sprite is cut into left wing, body and right wing around the
//! horizontal center. The body keeps its width while both wings are
//! stretched or squeezed, producing the frames of a flapping animation.

use image::imageops::FilterType;
use image::{Rgba, RgbaImage};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use crate::output::{save_png, OutputError};

/// Number of variants produced when none is configured
pub const DEFAULT_OUTPUTS: u32 = 7;

/// Extra copies written after slicing: `(source index, copy index)`.
///
/// Repeating frames 5, 3 and 1 as 8, 9 and 10 lets a 10-frame loop flap
/// back down without a second pass.
pub const DEFAULT_ALIASES: [[u32; 2]; 3] = [[5, 8], [3, 9], [1, 10]];

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Error type for slicing
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SliceError {
    /// The body does not fit around the horizontal center
    #[error(
        "body width {body_width} is too large or the butterfly is not centered properly \
         (image width {image_width})"
    )]
    BodyOutOfBounds { body_width: u32, image_width: u32 },
    /// One of the wing crops has no pixels
    #[error("{0} wing region is empty")]
    EmptyWing(&'static str),
    /// Wing width bounds are unusable
    #[error("invalid wing widths: {0}")]
    InvalidWidths(String),
    /// `max_wing_width` argument is neither `auto` nor a number
    #[error("max wing width must be 'auto' or a positive integer, got '{0}'")]
    InvalidMaxWing(String),
    /// Loading the source failed
    #[error("failed to load '{path}': {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    /// Writing a variant failed
    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Upper bound for the wing width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaxWingWidth {
    /// Half the image width minus the body width
    Auto,
    /// Explicit pixel width
    Fixed(u32),
}

impl FromStr for MaxWingWidth {
    type Err = SliceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        if value.eq_ignore_ascii_case("auto") {
            return Ok(MaxWingWidth::Auto);
        }
        value
            .parse::<u32>()
            .map(MaxWingWidth::Fixed)
            .map_err(|_| SliceError::InvalidMaxWing(s.to_string()))
    }
}

/// Parameters for one slicing run
#[derive(Debug, Clone, PartialEq)]
pub struct SliceSpec {
    pub body_width: u32,
    pub min_wing_width: u32,
    pub max_wing_width: MaxWingWidth,
    pub outputs: u32,
    pub aliases: Vec<[u32; 2]>,
}

impl SliceSpec {
    /// Spec with the default variant count and aliases.
    pub fn new(body_width: u32, min_wing_width: u32, max_wing_width: MaxWingWidth) -> Self {
        Self {
            body_width,
            min_wing_width,
            max_wing_width,
            outputs: DEFAULT_OUTPUTS,
            aliases: DEFAULT_ALIASES.to_vec(),
        }
    }
}

/// The three crops of a butterfly sprite
#[derive(Debug, Clone)]
pub struct ButterflyParts {
    pub left_wing: RgbaImage,
    pub body: RgbaImage,
    pub right_wing: RgbaImage,
}

/// One rebuilt butterfly
#[derive(Debug, Clone)]
pub struct SliceVariant {
    /// Output number; `1` is the widest
    pub number: u32,
    pub wing_width: u32,
    pub image: RgbaImage,
}

/// File name of variant `number`: `07.png`, `01.png`, ...
pub fn variant_file_name(number: u32) -> String {
    format!("{:02}.png", number)
}

/// Cut `image` into left wing, body and right wing.
///
/// The body is centered on `width / 2`, both in integer pixels.
pub fn split_butterfly(image: &RgbaImage, body_width: u32) -> Result<ButterflyParts, SliceError> {
    let (w, h) = image.dimensions();
    let center_x = (w / 2) as i64;
    let body_left = center_x - (body_width / 2) as i64;
    let body_right = body_left + body_width as i64;

    if body_left < 0 || body_right > w as i64 {
        return Err(SliceError::BodyOutOfBounds { body_width, image_width: w });
    }
    let (body_left, body_right) = (body_left as u32, body_right as u32);

    if body_left == 0 {
        return Err(SliceError::EmptyWing("left"));
    }
    if body_right == w {
        return Err(SliceError::EmptyWing("right"));
    }

    let crop = |x: u32, width: u32| image::imageops::crop_imm(image, x, 0, width, h).to_image();

    Ok(ButterflyParts {
        left_wing: crop(0, body_left),
        body: crop(body_left, body_width),
        right_wing: crop(body_right, w - body_right),
    })
}

/// Resolve the maximum wing width for an image `image_width` pixels wide.
pub fn resolve_max_wing(
    image_width: u32,
    body_width: u32,
    min_wing_width: u32,
    max_wing_width: MaxWingWidth,
) -> Result<u32, SliceError> {
    let max = match max_wing_width {
        MaxWingWidth::Fixed(max) => max as i64,
        MaxWingWidth::Auto => (image_width / 2) as i64 - body_width as i64,
    };

    if max < min_wing_width as i64 {
        return Err(SliceError::InvalidWidths(format!(
            "max wing width ({}) is less than min wing width ({})",
            max, min_wing_width
        )));
    }
    Ok(max as u32)
}

/// Evenly spaced wing widths from `min` to `max`, truncated to whole pixels.
///
/// # Examples
///
/// ```
/// use sprep::slice::wing_widths;
///
/// assert_eq!(wing_widths(10, 40, 4), vec![10, 20, 30, 40]);
/// assert_eq!(wing_widths(10, 40, 1), vec![10]);
/// ```
pub fn wing_widths(min: u32, max: u32, outputs: u32) -> Vec<u32> {
    let step = if outputs > 1 { (max as f64 - min as f64) / (outputs - 1) as f64 } else { 0.0 };
    (0..outputs).map(|i| (min as f64 + i as f64 * step) as u32).collect()
}

/// Rebuild a butterfly with both wings resized to `wing_width`.
pub fn assemble(parts: &ButterflyParts, wing_width: u32) -> RgbaImage {
    let h = parts.body.height();
    let body_width = parts.body.width();

    let left = image::imageops::resize(&parts.left_wing, wing_width, h, FilterType::Lanczos3);
    let right = image::imageops::resize(&parts.right_wing, wing_width, h, FilterType::Lanczos3);

    let mut canvas = RgbaImage::from_pixel(wing_width * 2 + body_width, h, TRANSPARENT);
    image::imageops::replace(&mut canvas, &left, 0, 0);
    image::imageops::replace(&mut canvas, &parts.body, wing_width as i64, 0);
    image::imageops::replace(&mut canvas, &right, (wing_width + body_width) as i64, 0);
    canvas
}

/// Render every variant described by `spec`.
///
/// Variants are returned narrowest first; the narrowest carries the highest
/// number.
pub fn render_variants(
    image: &RgbaImage,
    spec: &SliceSpec,
) -> Result<Vec<SliceVariant>, SliceError> {
    if spec.outputs == 0 {
        return Err(SliceError::InvalidWidths("at least one output is required".to_string()));
    }
    if spec.min_wing_width == 0 {
        return Err(SliceError::InvalidWidths("min wing width must be positive".to_string()));
    }

    let parts = split_butterfly(image, spec.body_width)?;
    let max = resolve_max_wing(
        image.width(),
        spec.body_width,
        spec.min_wing_width,
        spec.max_wing_width,
    )?;
    let widths = wing_widths(spec.min_wing_width, max, spec.outputs);
    log::debug!("wing widths: {:?}", widths);

    Ok(widths
        .par_iter()
        .enumerate()
        .map(|(i, &wing_width)| SliceVariant {
            number: spec.outputs - i as u32,
            wing_width,
            image: assemble(&parts, wing_width),
        })
        .collect())
}

/// Slice the butterfly at `input` and write the variants into `output_dir`.
///
/// Returns every written path, aliases included.
pub fn slice_butterfly(
    input: &Path,
    output_dir: &Path,
    spec: &SliceSpec,
) -> Result<Vec<PathBuf>, SliceError> {
    let image = image::open(input)
        .map_err(|source| SliceError::Load { path: input.to_path_buf(), source })?
        .to_rgba8();

    let variants = render_variants(&image, spec)?;
    std::fs::create_dir_all(output_dir).map_err(OutputError::from)?;

    let mut written = Vec::new();
    for variant in &variants {
        let path = output_dir.join(variant_file_name(variant.number));
        save_png(&variant.image, &path)?;
        written.push(path);

        for [source, copy] in &spec.aliases {
            if *source == variant.number {
                let alias = output_dir.join(variant_file_name(*copy));
                save_png(&variant.image, &alias)?;
                written.push(alias);
            }
        }
    }

    Ok(written)
}
