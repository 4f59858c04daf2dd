//! Spritesheet packing - stacks a directory of PNG frames into one vertical strip
//!
//! Frames are placed top to bottom in file-name order, each at x = 0. The
//! metadata follows the TexturePacker "JSON hash" layout that PixiJS and most
//! 2D engines load directly.

use glob::{glob_with, MatchOptions, Pattern};
use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::export::{ExportError, ExportOptions, JsonExporter};
use crate::output::{save_png, trim_trailing_separators, with_name_suffix, OutputError};

/// Transparent color for the sheet background
const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Frame files are matched on this exact, case-sensitive suffix
const PNG_SUFFIX: &str = ".png";

/// Name of the animation listing every frame
pub const ALL_ANIMATION: &str = "all";

/// Error type for spritesheet packing
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SpritesheetError {
    /// Input directory is missing or unreadable
    #[error("cannot read '{path}': {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Input path exists but is a file
    #[error("'{0}' is not a directory")]
    NotADirectory(PathBuf),
    /// The directory path cannot be used as a glob
    #[error("cannot search '{0}': {1}")]
    Pattern(PathBuf, #[source] glob::PatternError),
    /// The directory holds no `.png` files
    #[error("No PNG images found in '{0}'")]
    NoImages(PathBuf),
    /// A frame could not be decoded
    #[error("failed to load frame '{path}': {source}")]
    Frame {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    /// Writing the sheet image failed
    #[error(transparent)]
    Output(#[from] OutputError),
    /// Writing the metadata failed
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Meta-section values written into every sheet
#[derive(Debug, Clone, PartialEq)]
pub struct SheetOptions {
    /// Identifier of the producing tool
    pub app: String,
    /// Metadata format version
    pub version: String,
    /// Pixel format label
    pub format: String,
    /// Scale label
    pub scale: String,
    /// JSON indentation width
    pub indent: usize,
}

impl Default for SheetOptions {
    fn default() -> Self {
        Self {
            app: env!("CARGO_PKG_NAME").to_string(),
            version: "4".to_string(),
            format: "RGBA8888".to_string(),
            scale: "1".to_string(),
            indent: 4,
        }
    }
}

/// A named frame to be stacked
#[derive(Debug, Clone)]
pub struct SheetFrame {
    pub name: String,
    pub image: RgbaImage,
}

/// Rectangle in sheet pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// Width/height pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSize {
    pub w: u32,
    pub h: u32,
}

/// Per-frame entry in the "frames" map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameEntry {
    pub frame: FrameRect,
    pub rotated: bool,
    pub trimmed: bool,
    pub sprite_source_size: FrameRect,
    pub source_size: FrameSize,
}

/// The "meta" section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetMeta {
    pub app: String,
    pub version: String,
    pub image: String,
    pub format: String,
    pub size: FrameSize,
    pub scale: String,
}

/// Complete sheet metadata document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetMetadata {
    pub frames: BTreeMap<String, FrameEntry>,
    pub animations: BTreeMap<String, Vec<String>>,
    pub meta: SheetMeta,
}

/// A packed sheet: pixels plus metadata
#[derive(Debug)]
pub struct Spritesheet {
    pub image: RgbaImage,
    pub metadata: SheetMetadata,
}

/// Files written by [`combine_directory`]
#[derive(Debug, Clone, PartialEq)]
pub struct CombineOutput {
    pub image_path: PathBuf,
    pub json_path: PathBuf,
    pub frame_count: usize,
}

/// List the `.png` files directly inside `dir`, sorted by file name.
///
/// Subdirectories are not searched.
pub fn collect_pngs(dir: &Path) -> Result<Vec<PathBuf>, SpritesheetError> {
    let meta = std::fs::metadata(dir)
        .map_err(|source| SpritesheetError::ReadDir { path: dir.to_path_buf(), source })?;
    if !meta.is_dir() {
        return Err(SpritesheetError::NotADirectory(dir.to_path_buf()));
    }

    let pattern =
        PathBuf::from(Pattern::escape(&dir.to_string_lossy())).join(format!("*{}", PNG_SUFFIX));
    let paths = glob_with(&pattern.to_string_lossy(), MatchOptions::new())
        .map_err(|e| SpritesheetError::Pattern(dir.to_path_buf(), e))?;

    let mut files = Vec::new();
    for entry in paths {
        match entry {
            Ok(path) => {
                if path.is_file() {
                    files.push(path);
                }
            }
            Err(e) => log::warn!("skipping unreadable entry: {}", e),
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Stack frames top to bottom.
///
/// The sheet is as wide as the widest frame and as tall as all frames
/// together. Returns the sheet and each frame's rectangle in input order.
///
/// # Examples
///
/// ```
/// use image::{Rgba, RgbaImage};
/// use sprep::spritesheet::{stack_frames, SheetFrame};
///
/// let frames = vec![
///     SheetFrame {
///         name: "a.png".into(),
///         image: RgbaImage::from_pixel(4, 2, Rgba([255, 0, 0, 255])),
///     },
///     SheetFrame {
///         name: "b.png".into(),
///         image: RgbaImage::from_pixel(2, 3, Rgba([0, 0, 255, 255])),
///     },
/// ];
/// let (sheet, rects) = stack_frames(&frames);
/// assert_eq!(sheet.dimensions(), (4, 5));
/// assert_eq!(rects[1].y, 2);
/// ```
pub fn stack_frames(frames: &[SheetFrame]) -> (RgbaImage, Vec<FrameRect>) {
    let max_width = frames.iter().map(|f| f.image.width()).max().unwrap_or(0);
    let total_height: u32 = frames.iter().map(|f| f.image.height()).sum();

    let mut sheet = RgbaImage::from_pixel(max_width, total_height, TRANSPARENT);
    let mut rects = Vec::with_capacity(frames.len());

    let mut y_offset = 0u32;
    for frame in frames {
        image::imageops::replace(&mut sheet, &frame.image, 0, y_offset as i64);
        rects.push(FrameRect {
            x: 0,
            y: y_offset,
            w: frame.image.width(),
            h: frame.image.height(),
        });
        y_offset += frame.image.height();
    }

    (sheet, rects)
}

/// Build the metadata document for frames placed at `rects`.
pub fn build_metadata(
    frames: &[SheetFrame],
    rects: &[FrameRect],
    image_name: &str,
    sheet_size: (u32, u32),
    options: &SheetOptions,
) -> SheetMetadata {
    let mut entries = BTreeMap::new();
    let mut names = Vec::with_capacity(frames.len());

    for (frame, rect) in frames.iter().zip(rects) {
        entries.insert(
            frame.name.clone(),
            FrameEntry {
                frame: *rect,
                rotated: false,
                trimmed: false,
                sprite_source_size: FrameRect { x: 0, y: 0, w: rect.w, h: rect.h },
                source_size: FrameSize { w: rect.w, h: rect.h },
            },
        );
        names.push(frame.name.clone());
    }

    SheetMetadata {
        frames: entries,
        animations: BTreeMap::from([(ALL_ANIMATION.to_string(), names)]),
        meta: SheetMeta {
            app: options.app.clone(),
            version: options.version.clone(),
            image: image_name.to_string(),
            format: options.format.clone(),
            size: FrameSize { w: sheet_size.0, h: sheet_size.1 },
            scale: options.scale.clone(),
        },
    }
}

/// Pack frames into a sheet whose image file is called `image_name`.
pub fn pack_spritesheet(
    frames: &[SheetFrame],
    image_name: &str,
    options: &SheetOptions,
) -> Spritesheet {
    let (image, rects) = stack_frames(frames);
    let metadata = build_metadata(frames, &rects, image_name, image.dimensions(), options);
    Spritesheet { image, metadata }
}

/// Output paths for a frame directory: `<dir>.png` and `<dir>_sprites.json`.
pub fn sheet_paths(dir: &Path) -> (PathBuf, PathBuf) {
    (with_name_suffix(dir, ".png"), with_name_suffix(dir, "_sprites.json"))
}

/// Pack every PNG in `dir` and write the sheet image and metadata next to it.
pub fn combine_directory(
    dir: &Path,
    options: &SheetOptions,
) -> Result<CombineOutput, SpritesheetError> {
    let files = collect_pngs(dir)?;
    if files.is_empty() {
        return Err(SpritesheetError::NoImages(dir.to_path_buf()));
    }

    let mut frames = Vec::with_capacity(files.len());
    for path in &files {
        let image = image::open(path)
            .map_err(|source| SpritesheetError::Frame { path: path.clone(), source })?
            .to_rgba8();
        let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        log::debug!("frame {} is {}x{}", name, image.width(), image.height());
        frames.push(SheetFrame { name, image });
    }

    // `.` and `..` have no name to suffix; name the outputs after the real directory
    let named_dir = match trim_trailing_separators(dir).file_name() {
        Some(_) => dir.to_path_buf(),
        None => std::fs::canonicalize(dir)
            .map_err(|source| SpritesheetError::ReadDir { path: dir.to_path_buf(), source })?,
    };
    let (image_path, json_path) = sheet_paths(&named_dir);
    let image_name =
        image_path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    let sheet = pack_spritesheet(&frames, &image_name, options);

    save_png(&sheet.image, &image_path)?;
    let export_options = ExportOptions { pretty: true, indent: options.indent };
    JsonExporter::new().export(&sheet.metadata, &json_path, &export_options)?;

    Ok(CombineOutput { image_path, json_path, frame_count: frames.len() })
}
