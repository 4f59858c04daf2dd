//! 2D affine matrices in SVG `matrix(a b c d e f)` order

use std::ops::Mul;

/// Affine transform mapping `(x, y)` to `(a x + c y + e, b x + d y + f)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix {
    pub const IDENTITY: Matrix = Matrix { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: 0.0, f: 0.0 };

    pub const fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    pub const fn translate(tx: f64, ty: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    pub const fn scale(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Rotation by `deg` degrees about the origin.
    pub fn rotate(deg: f64) -> Self {
        let (sin, cos) = deg.to_radians().sin_cos();
        Self::new(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// Rotation by `deg` degrees about `(cx, cy)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sprep::svg::Matrix;
    ///
    /// let m = Matrix::rotate_about(90.0, 5.0, 5.0);
    /// let (x, y) = m.apply(5.0, 5.0);
    /// assert!((x - 5.0).abs() < 1e-9 && (y - 5.0).abs() < 1e-9);
    /// ```
    pub fn rotate_about(deg: f64, cx: f64, cy: f64) -> Self {
        Self::translate(cx, cy) * Self::rotate(deg) * Self::translate(-cx, -cy)
    }

    pub fn skew_x(deg: f64) -> Self {
        Self::new(1.0, 0.0, deg.to_radians().tan(), 1.0, 0.0, 0.0)
    }

    pub fn skew_y(deg: f64) -> Self {
        Self::new(1.0, deg.to_radians().tan(), 0.0, 1.0, 0.0, 0.0)
    }

    /// `self × other`: `other` is applied to a point first.
    pub fn multiply(&self, other: &Matrix) -> Matrix {
        let (m1, m2) = (self, other);
        Matrix {
            a: m1.a * m2.a + m1.c * m2.b,
            b: m1.b * m2.a + m1.d * m2.b,
            c: m1.a * m2.c + m1.c * m2.d,
            d: m1.b * m2.c + m1.d * m2.d,
            e: m1.a * m2.e + m1.c * m2.f + m1.e,
            f: m1.b * m2.e + m1.d * m2.f + m1.f,
        }
    }

    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (self.a * x + self.c * y + self.e, self.b * x + self.d * y + self.f)
    }
}

impl Mul for Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Matrix) -> Matrix {
        self.multiply(&rhs)
    }
}
