//! Swirl distortion - polar-coordinate pixel remapping
//!
//! Every destination pixel looks up its source by rotating around a center.
//! The rotation grows linearly with distance up to half the shorter image
//! side and stays constant beyond it. Sampling is nearest-neighbour with
//! round-half-to-even; samples that land outside the image are transparent.

use image::{Rgba, RgbaImage};
use std::f64::consts::PI;

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Swirl `image` around `center` by `amount` radians at full radius.
///
/// # Examples
///
/// ```
/// use image::{Rgba, RgbaImage};
/// use sprep::swirl::swirl_once;
///
/// let image = RgbaImage::from_pixel(8, 8, Rgba([255, 255, 255, 255]));
/// let same = swirl_once(&image, (4.0, 4.0), 0.0);
/// assert_eq!(same, image);
/// ```
pub fn swirl_once(image: &RgbaImage, center: (f64, f64), amount: f64) -> RgbaImage {
    let (width, height) = image.dimensions();
    let (cx, cy) = center;
    let max_r = width.min(height) as f64 / 2.0;

    RgbaImage::from_fn(width, height, |x, y| {
        let dx = x as f64 - cx;
        let dy = y as f64 - cy;
        let r = (dx * dx + dy * dy).sqrt();

        if r == 0.0 {
            return *image.get_pixel(x, y);
        }

        let theta = dy.atan2(dx);
        let frac = if max_r > 0.0 { (r / max_r).min(1.0) } else { 1.0 };
        let new_theta = theta + frac * amount;

        let nx = (cx + r * new_theta.cos()).round_ties_even();
        let ny = (cy + r * new_theta.sin()).round_ties_even();

        if nx >= 0.0 && ny >= 0.0 && nx < width as f64 && ny < height as f64 {
            *image.get_pixel(nx as u32, ny as u32)
        } else {
            TRANSPARENT
        }
    })
}

/// The three vortex centers used by the burst effect.
///
/// They sit on a circle of half the bubble radius around the image center,
/// at 0°, 120° and 240°.
pub fn swirl_centers(width: u32, height: u32) -> [(f64, f64); 3] {
    let cx = width as f64 / 2.0;
    let cy = height as f64 / 2.0;
    let swirl_radius = cx.min(cy) / 2.0;

    let mut centers = [(0.0, 0.0); 3];
    for (i, center) in centers.iter_mut().enumerate() {
        let angle = (120.0 * i as f64) * PI / 180.0;
        *center = (cx + swirl_radius * angle.cos(), cy + swirl_radius * angle.sin());
    }
    centers
}

/// Animation progress of frame `index` out of `total`, from 0.0 to 1.0.
///
/// A single-frame animation is fully progressed.
pub fn frame_progress(index: u32, total: u32) -> f64 {
    if total > 1 {
        index as f64 / (total - 1) as f64
    } else {
        1.0
    }
}

/// Swirl around the three burst centers in sequence.
///
/// The swirl amount ramps from zero on the first frame to `strength` on the
/// last.
pub fn swirl_three_centers(
    image: &RgbaImage,
    frame_index: u32,
    total_frames: u32,
    strength: f64,
) -> RgbaImage {
    let amount = strength * frame_progress(frame_index, total_frames);
    let (width, height) = image.dimensions();

    swirl_centers(width, height)
        .iter()
        .fold(image.clone(), |current, &center| swirl_once(&current, center, amount))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_fn(w, h, |x, y| Rgba([(x * 16) as u8, (y * 16) as u8, 0, 255]))
    }

    #[test]
    fn test_zero_amount_is_identity() {
        let image = gradient(9, 7);
        assert_eq!(swirl_once(&image, (3.3, 2.7), 0.0), image);
    }

    #[test]
    fn test_center_pixel_is_copied() {
        let image = gradient(9, 9);
        let out = swirl_once(&image, (4.0, 4.0), 2.5);
        assert_eq!(out.get_pixel(4, 4), image.get_pixel(4, 4));
    }

    #[test]
    fn test_half_turn_at_full_radius() {
        // A pixel 4 px right of center with max_r = 4 rotates by PI and
        // samples the pixel 4 px left of center.
        let image = gradient(10, 8);
        let out = swirl_once(&image, (4.0, 4.0), PI);
        assert_eq!(out.get_pixel(8, 4), image.get_pixel(0, 4));
    }

    #[test]
    fn test_ties_round_to_even() {
        // Pixel (9, 4) is 4.75 px from the center and lands exactly on
        // x = -0.5, which rounds to 0 and stays inside the image.
        let image = gradient(10, 8);
        let out = swirl_once(&image, (4.25, 4.0), PI);
        assert_eq!(out.get_pixel(9, 4), image.get_pixel(0, 4));
        assert_ne!(*out.get_pixel(9, 4), TRANSPARENT);
    }

    #[test]
    fn test_out_of_bounds_is_transparent() {
        // A corner rotated by a quarter turn around the center lands outside
        // a wide image.
        let image = gradient(16, 4);
        let out = swirl_once(&image, (8.0, 2.0), PI / 2.0);
        assert_eq!(*out.get_pixel(0, 0), TRANSPARENT);
    }

    #[test]
    fn test_swirl_centers_triangle() {
        let centers = swirl_centers(100, 100);
        assert!((centers[0].0 - 75.0).abs() < 1e-9);
        assert!((centers[0].1 - 50.0).abs() < 1e-9);
        assert!((centers[1].0 - 37.5).abs() < 1e-9);
        assert!((centers[2].1 - (50.0 - 25.0 * (3f64).sqrt() / 2.0)).abs() < 1e-9);
    }

    #[test]
    fn test_frame_progress() {
        assert_eq!(frame_progress(0, 10), 0.0);
        assert_eq!(frame_progress(9, 10), 1.0);
        assert_eq!(frame_progress(0, 1), 1.0);
    }

    #[test]
    fn test_first_frame_is_unswirled() {
        let image = gradient(12, 12);
        assert_eq!(swirl_three_centers(&image, 0, 10, 6.28), image);
    }
}
