//! Bubble burst animation
//!
//! Each frame swirls the bubble around three vortices, punches a growing hole
//! in its center and draws water drops flying outward while fading.

use image::{Rgba, RgbaImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::output::{save_png, OutputError};
use crate::paint::{clear_disc, fill_polygon};
use crate::swirl::{frame_progress, swirl_three_centers};

/// Drop color before alpha is applied
const DROP_RGB: [u8; 3] = [230, 240, 255];

/// Error type for burst rendering
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BurstError {
    /// Loading the bubble failed
    #[error("failed to load '{path}': {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    /// Bubble is too small to have a radius
    #[error("image {0}x{1} is too small to burst")]
    TooSmall(u32, u32),
    /// Zero frames requested
    #[error("frame count must be positive")]
    NoFrames,
    /// Writing a frame failed
    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Settings for one burst animation
#[derive(Debug, Clone, PartialEq)]
pub struct BurstConfig {
    pub frames: u32,
    /// Swirl amount in radians reached on the last frame
    pub strength: f64,
    pub drops: u32,
    pub seed: u64,
    /// File name suffix: `01-<prefix>.png`
    pub prefix: String,
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            frames: 10,
            strength: 1.28,
            drops: 5,
            seed: 42,
            prefix: "break".to_string(),
        }
    }
}

/// Flight path of one drop, fixed for the whole animation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterDrop {
    pub start_angle_deg: f64,
    pub arc_deg: f64,
    pub start_r: f64,
    pub end_r: f64,
    pub start_size: f64,
    pub end_size: f64,
}

impl WaterDrop {
    /// Center, orientation and size of the drop at progress `frac`.
    fn at(&self, center: (f64, f64), frac: f64) -> ((f64, f64), f64, f64) {
        let angle = self.start_angle_deg + self.arc_deg * frac;
        let r = self.start_r + (self.end_r - self.start_r) * frac;
        let size = self.start_size + (self.end_size - self.start_size) * frac;
        let rad = angle.to_radians();
        ((center.0 + r * rad.cos(), center.1 + r * rad.sin()), angle, size)
    }
}

/// Generate `count` drops spread evenly around the circle.
///
/// The same seed always yields the same drops.
pub fn create_drops(count: u32, max_r: f64, seed: u64) -> Vec<WaterDrop> {
    let mut rng = StdRng::seed_from_u64(seed);
    let step = if count > 0 { 360.0 / count as f64 } else { 0.0 };

    (0..count)
        .map(|i| {
            let start_angle_deg = i as f64 * step + rng.gen_range(-10.0..=10.0);
            let arc_deg = rng.gen_range(60.0..=120.0);
            let start_r = (2.0 / 3.0) * max_r + rng.gen_range(-0.05 * max_r..=0.05 * max_r);
            let end_r = max_r + rng.gen_range(-0.1 * max_r..=0.05 * max_r);
            let start_size = rng.gen_range(2.0..=4.0);
            let end_size = rng.gen_range(8.0..=12.0);
            WaterDrop { start_angle_deg, arc_deg, start_r, end_r, start_size, end_size }
        })
        .collect()
}

/// Teardrop outline of `size` at `(x, y)` rotated by `angle_deg`.
///
/// Tip first, then clockwise: `(0,-s) (0.6s,0.4s) (0,s) (-0.6s,0.4s)` before
/// rotation.
pub fn teardrop_polygon(x: f64, y: f64, angle_deg: f64, size: f64) -> [(f64, f64); 4] {
    let local = [
        (0.0, -size),
        (size * 0.6, size * 0.4),
        (0.0, size),
        (-size * 0.6, size * 0.4),
    ];
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    local.map(|(lx, ly)| (x + lx * cos - ly * sin, y + lx * sin + ly * cos))
}

/// Paint every drop for frame `index` of `total`.
pub fn draw_drops(
    canvas: &mut RgbaImage,
    drops: &[WaterDrop],
    center: (f64, f64),
    index: u32,
    total: u32,
) {
    let frac = frame_progress(index, total);
    let alpha = (255.0 * (1.0 - frac)) as u8;
    let color = Rgba([DROP_RGB[0], DROP_RGB[1], DROP_RGB[2], alpha]);

    for drop in drops {
        let ((x, y), angle, size) = drop.at(center, frac);
        fill_polygon(canvas, &teardrop_polygon(x, y, angle, size), color);
    }
}

/// Radius of the hole punched into frame `index` of `total`.
pub fn hole_radius(index: u32, total: u32, max_radius: u32) -> i32 {
    ((index + 1) as f64 / total as f64 * max_radius as f64) as i32
}

/// Render every frame of the burst animation, in order.
pub fn render_burst(
    bubble: &RgbaImage,
    config: &BurstConfig,
) -> Result<Vec<RgbaImage>, BurstError> {
    if config.frames == 0 {
        return Err(BurstError::NoFrames);
    }
    let (w, h) = bubble.dimensions();
    let (cx, cy) = (w / 2, h / 2);
    let max_radius = cx.min(cy);
    if max_radius == 0 {
        return Err(BurstError::TooSmall(w, h));
    }

    let drops = create_drops(config.drops, max_radius as f64, config.seed);
    log::debug!(
        "burst: {} frames, {} drops, max radius {}",
        config.frames,
        drops.len(),
        max_radius
    );

    let frames = (0..config.frames)
        .into_par_iter()
        .map(|i| {
            let mut frame = swirl_three_centers(bubble, i, config.frames, config.strength);
            let radius = hole_radius(i, config.frames, max_radius);
            clear_disc(&mut frame, cx as i32, cy as i32, radius);
            draw_drops(&mut frame, &drops, (cx as f64, cy as f64), i, config.frames);
            frame
        })
        .collect();

    Ok(frames)
}

/// File name of frame `index` (zero based): `01-break.png`, ...
pub fn frame_file_name(index: u32, prefix: &str) -> String {
    format!("{:02}-{}.png", index + 1, prefix)
}

/// Burst the bubble at `input` and write every frame into `output_dir`.
pub fn create_burst_sprites(
    input: &Path,
    output_dir: &Path,
    config: &BurstConfig,
) -> Result<Vec<PathBuf>, BurstError> {
    let bubble = image::open(input)
        .map_err(|source| BurstError::Load { path: input.to_path_buf(), source })?
        .to_rgba8();

    let frames = render_burst(&bubble, config)?;
    std::fs::create_dir_all(output_dir).map_err(OutputError::from)?;

    let mut written = Vec::with_capacity(frames.len());
    for (i, frame) in frames.iter().enumerate() {
        let path = output_dir.join(frame_file_name(i as u32, &config.prefix));
        save_png(frame, &path)?;
        written.push(path);
    }
    Ok(written)
}
