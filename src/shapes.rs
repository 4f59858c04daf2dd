//! Shape rasterization primitives.
//!
//! Converts geometric shapes into sets of integer pixel coordinates. Callers
//! decide what to do with the covered pixels (punch alpha, blend a color).

use std::collections::HashSet;

/// Rasterize a filled circle.
///
/// Returns every pixel whose offset from (cx, cy) lies within radius `r`
/// (`dx² + dy² <= r²`). A radius of zero or less covers nothing.
///
/// # Examples
///
/// ```
/// use sprep::shapes::rasterize_disc;
///
/// let pixels = rasterize_disc(5, 5, 2);
/// assert!(pixels.contains(&(5, 5)));
/// assert!(pixels.contains(&(7, 5)));
/// assert!(!pixels.contains(&(7, 7)));
/// ```
pub fn rasterize_disc(cx: i32, cy: i32, r: i32) -> HashSet<(i32, i32)> {
    let mut pixels = HashSet::new();

    if r <= 0 {
        return pixels;
    }

    // i64 keeps the squared terms from overflowing on large radii
    let r_sq = (r as i64) * (r as i64);
    for dy in -r..=r {
        let dy_sq = (dy as i64) * (dy as i64);
        // Widest span on this row
        let mut half = 0i32;
        while ((half + 1) as i64) * ((half + 1) as i64) + dy_sq <= r_sq {
            half += 1;
        }
        for dx in -half..=half {
            pixels.insert((cx + dx, cy + dy));
        }
    }

    pixels
}

/// Rasterize a filled polygon with floating point vertices.
///
/// Scanline fill with the even-odd rule, sampling each pixel at its center
/// `(x + 0.5, y + 0.5)`. Fewer than three vertices cover nothing.
///
/// # Examples
///
/// ```
/// use sprep::shapes::rasterize_polygon;
///
/// let square = [(1.0, 1.0), (4.0, 1.0), (4.0, 4.0), (1.0, 4.0)];
/// let pixels = rasterize_polygon(&square);
/// assert_eq!(pixels.len(), 9);
/// assert!(pixels.contains(&(1, 1)));
/// assert!(!pixels.contains(&(4, 4)));
/// ```
pub fn rasterize_polygon(vertices: &[(f64, f64)]) -> HashSet<(i32, i32)> {
    let mut pixels = HashSet::new();

    if vertices.len() < 3 {
        return pixels;
    }

    let min_y = vertices.iter().map(|(_, y)| *y).fold(f64::INFINITY, f64::min);
    let max_y = vertices.iter().map(|(_, y)| *y).fold(f64::NEG_INFINITY, f64::max);
    if !min_y.is_finite() || !max_y.is_finite() {
        return pixels;
    }

    let first_row = (min_y - 0.5).ceil() as i32;
    let last_row = (max_y - 0.5).floor() as i32;

    for row in first_row..=last_row {
        let scan_y = row as f64 + 0.5;
        let mut crossings = Vec::new();

        for i in 0..vertices.len() {
            let (x1, y1) = vertices[i];
            let (x2, y2) = vertices[(i + 1) % vertices.len()];

            // Half-open on y so shared vertices are counted once
            if (y1 <= scan_y && scan_y < y2) || (y2 <= scan_y && scan_y < y1) {
                crossings.push(x1 + (scan_y - y1) * (x2 - x1) / (y2 - y1));
            }
        }

        crossings.sort_by(|a, b| a.total_cmp(b));

        for pair in crossings.chunks(2) {
            if let [start, end] = pair {
                let first_col = (start - 0.5).ceil() as i32;
                let last_col = (end - 0.5).floor() as i32;
                for col in first_col..=last_col {
                    pixels.insert((col, row));
                }
            }
        }
    }

    pixels
}
