//! Pixel painting on RGBA canvases
//!
//! Fills rasterized shapes into images, either blending a color over the
//! existing pixels or clearing alpha.

use image::{Rgba, RgbaImage};

use crate::shapes::{rasterize_disc, rasterize_polygon};

/// Blend `color` over every pixel covered by the polygon.
///
/// Pixels outside the canvas are ignored.
pub fn fill_polygon(canvas: &mut RgbaImage, vertices: &[(f64, f64)], color: Rgba<u8>) {
    if color[3] == 0 {
        return;
    }
    let (w, h) = canvas.dimensions();
    for (x, y) in rasterize_polygon(vertices) {
        if x < 0 || y < 0 || x as u32 >= w || y as u32 >= h {
            continue;
        }
        let (x, y) = (x as u32, y as u32);
        let blended = alpha_blend(&color, canvas.get_pixel(x, y));
        canvas.put_pixel(x, y, blended);
    }
}

/// Zero the alpha of every pixel inside the disc; color channels are kept.
pub fn clear_disc(canvas: &mut RgbaImage, cx: i32, cy: i32, radius: i32) {
    let (w, h) = canvas.dimensions();
    for (x, y) in rasterize_disc(cx, cy, radius) {
        if x < 0 || y < 0 || x as u32 >= w || y as u32 >= h {
            continue;
        }
        canvas.get_pixel_mut(x as u32, y as u32)[3] = 0;
    }
}

/// Alpha blend source over destination
pub fn alpha_blend(src: &Rgba<u8>, dst: &Rgba<u8>) -> Rgba<u8> {
    let src_a = src[3] as f32 / 255.0;
    let dst_a = dst[3] as f32 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);

    if out_a == 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let blend = |s: u8, d: u8| -> u8 {
        let s_f = s as f32 / 255.0;
        let d_f = d as f32 / 255.0;
        let out = (s_f * src_a + d_f * dst_a * (1.0 - src_a)) / out_a;
        (out.clamp(0.0, 1.0) * 255.0).round() as u8
    };

    Rgba([
        blend(src[0], dst[0]),
        blend(src[1], dst[1]),
        blend(src[2], dst[2]),
        (out_a * 255.0).round() as u8,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alpha_blend_opaque_source_wins() {
        let out = alpha_blend(&Rgba([10, 20, 30, 255]), &Rgba([200, 200, 200, 255]));
        assert_eq!(out, Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn test_alpha_blend_over_transparent() {
        let out = alpha_blend(&Rgba([230, 240, 255, 128]), &Rgba([0, 0, 0, 0]));
        assert_eq!(out, Rgba([230, 240, 255, 128]));
    }

    #[test]
    fn test_alpha_blend_half() {
        let out = alpha_blend(&Rgba([255, 255, 255, 128]), &Rgba([0, 0, 0, 255]));
        assert_eq!(out[3], 255);
        assert!(out[0] > 120 && out[0] < 135);
    }

    #[test]
    fn test_fill_polygon_clips_to_canvas() {
        let mut canvas = RgbaImage::new(4, 4);
        let big = [(-10.0, -10.0), (10.0, -10.0), (10.0, 10.0), (-10.0, 10.0)];
        fill_polygon(&mut canvas, &big, Rgba([1, 2, 3, 255]));
        assert!(canvas.pixels().all(|p| *p == Rgba([1, 2, 3, 255])));
    }

    #[test]
    fn test_fill_polygon_transparent_color_is_noop() {
        let mut canvas = RgbaImage::from_pixel(2, 2, Rgba([9, 9, 9, 255]));
        fill_polygon(&mut canvas, &[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0)], Rgba([0, 0, 0, 0]));
        assert!(canvas.pixels().all(|p| *p == Rgba([9, 9, 9, 255])));
    }

    #[test]
    fn test_clear_disc_keeps_color() {
        let mut canvas = RgbaImage::from_pixel(9, 9, Rgba([50, 60, 70, 255]));
        clear_disc(&mut canvas, 4, 4, 2);
        assert_eq!(*canvas.get_pixel(4, 4), Rgba([50, 60, 70, 0]));
        assert_eq!(*canvas.get_pixel(6, 4), Rgba([50, 60, 70, 0]));
        assert_eq!(*canvas.get_pixel(0, 0), Rgba([50, 60, 70, 255]));
    }
}
