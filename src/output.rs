//! PNG output and file path generation

use image::{ImageFormat, RgbaImage};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for writing frames and sheets
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// PNG encoding failed
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Create the parent directory of `path` if it is missing.
pub fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Encode `image` as PNG at `path`, whatever its extension.
///
/// Parent directories are created when they don't exist yet.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), OutputError> {
    ensure_parent_dir(path)?;
    image.save_with_format(path, ImageFormat::Png)?;
    log::debug!("wrote {}x{} image to {}", image.width(), image.height(), path.display());
    Ok(())
}

/// Drop trailing path separators so `frames/` and `frames` name the same thing.
///
/// A bare root (`/`) is returned unchanged.
pub fn trim_trailing_separators(path: &Path) -> PathBuf {
    let raw = path.as_os_str().to_string_lossy();
    let trimmed = raw.trim_end_matches(['/', '\\']);
    if trimmed.is_empty() {
        path.to_path_buf()
    } else {
        PathBuf::from(trimmed)
    }
}

/// Append `suffix` to a path's file name, keeping it in the same directory.
///
/// `frames` + `_sprites.json` → `frames_sprites.json`.
pub fn with_name_suffix(path: &Path, suffix: &str) -> PathBuf {
    let path = trim_trailing_separators(path);
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}

/// Insert `suffix` between a file's stem and its extension.
///
/// | Input | Suffix | Output |
/// |-------|--------|--------|
/// | `art/leaf.svg` | `_flat` | `art/leaf_flat.svg` |
/// | `leaf` | `_flat` | `leaf_flat` |
pub fn with_stem_suffix(path: &Path, suffix: &str) -> PathBuf {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("output");
    let file_name = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}{}.{}", stem, suffix, ext),
        None => format!("{}{}", stem, suffix),
    };
    path.with_file_name(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_with_stem_suffix() {
        assert_eq!(
            with_stem_suffix(Path::new("art/leaf.svg"), "_flat"),
            PathBuf::from("art/leaf_flat.svg")
        );
        assert_eq!(with_stem_suffix(Path::new("leaf"), "_flat"), PathBuf::from("leaf_flat"));
    }

    #[test]
    fn test_with_name_suffix() {
        assert_eq!(with_name_suffix(Path::new("frames"), ".png"), PathBuf::from("frames.png"));
        assert_eq!(
            with_name_suffix(Path::new("assets/frames/"), "_sprites.json"),
            PathBuf::from("assets/frames_sprites.json")
        );
    }

    #[test]
    fn test_trim_trailing_separators() {
        assert_eq!(trim_trailing_separators(Path::new("frames//")), PathBuf::from("frames"));
        assert_eq!(trim_trailing_separators(Path::new("/")), PathBuf::from("/"));
    }

    #[test]
    fn test_save_png_basic() {
        use tempfile::tempdir;

        let dir = tempdir().unwrap();
        let path = dir.path().join("test.png");

        let image = RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 255]));
        save_png(&image, &path).unwrap();

        assert!(path.exists());
        let loaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(loaded.dimensions(), (2, 2));
        assert_eq!(*loaded.get_pixel(0, 0), Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn test_save_png_creates_directories() {
        use tempfile::tempdir;

        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/dir/test.png");

        let image = RgbaImage::from_pixel(1, 1, Rgba([0, 255, 0, 255]));
        save_png(&image, &path).unwrap();

        assert!(path.exists());
    }
}
