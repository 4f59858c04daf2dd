//! Aspect-preserving resize to a fixed width

use image::imageops::FilterType;
use image::DynamicImage;
use std::path::Path;
use thiserror::Error;

use crate::output::ensure_parent_dir;

/// Width used when none is configured
pub const DEFAULT_WIDTH: u32 = 800;

/// Error type for resize operations
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ResizeError {
    /// Requested width is zero
    #[error("target width must be positive")]
    ZeroWidth,
    /// Source image has no pixels
    #[error("source image is empty ({0}x{1})")]
    EmptySource(u32, u32),
    /// Decoding or encoding failed
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    /// File system failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Height that keeps the aspect ratio at `new_width`.
///
/// Truncates like an integer cast, but never returns less than one pixel.
///
/// # Examples
///
/// ```
/// use sprep::resize::target_height;
///
/// assert_eq!(target_height(1600, 1200, 800), 600);
/// assert_eq!(target_height(3, 1, 800), 266);
/// ```
pub fn target_height(width: u32, height: u32, new_width: u32) -> u32 {
    let scaled = (new_width as f64 / width as f64) * height as f64;
    (scaled as u32).max(1)
}

/// Resize `image` to `new_width` with Lanczos filtering.
///
/// The color type of the input is kept.
pub fn resize_to_width(image: &DynamicImage, new_width: u32) -> Result<DynamicImage, ResizeError> {
    if new_width == 0 {
        return Err(ResizeError::ZeroWidth);
    }
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(ResizeError::EmptySource(width, height));
    }

    let new_height = target_height(width, height, new_width);
    log::debug!("resizing {}x{} -> {}x{}", width, height, new_width, new_height);
    Ok(image.resize_exact(new_width, new_height, FilterType::Lanczos3))
}

/// Load `input`, resize it to `new_width` and save it to `output`.
///
/// The output format follows the output file extension. Returns the new
/// dimensions.
pub fn resize_file(input: &Path, output: &Path, new_width: u32) -> Result<(u32, u32), ResizeError> {
    let image = image::open(input)?;
    let resized = resize_to_width(&image, new_width)?;

    ensure_parent_dir(output)?;
    resized.save(output)?;

    Ok((resized.width(), resized.height()))
}
