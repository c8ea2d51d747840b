//! Polygon moments of a closed contour.
//!
//! Moments are integrated over the polygon interior with Green's theorem, so
//! a contour with `n` vertices costs `O(n)` regardless of the enclosed area.

use nalgebra::Matrix2;

use crate::geometry::PixelPoint;

/// Spatial and central moments up to second order.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContourMoments {
    pub m00: f64,
    pub m10: f64,
    pub m01: f64,
    pub m20: f64,
    pub m11: f64,
    pub m02: f64,
    pub mu20: f64,
    pub mu11: f64,
    pub mu02: f64,
}

impl ContourMoments {
    /// Moments of the polygon traced by `contour`, closing edge included.
    ///
    /// Orientation is normalised so `m00` is non-negative. Polygons with
    /// (near-)zero enclosed area yield all-zero moments.
    pub fn from_contour(contour: &[PixelPoint]) -> Self {
        let Some(last) = contour.last() else {
            return Self::default();
        };

        let (mut a00, mut a10, mut a01) = (0.0f64, 0.0f64, 0.0f64);
        let (mut a20, mut a11, mut a02) = (0.0f64, 0.0f64, 0.0f64);
        let mut prev_x = f64::from(last.x);
        let mut prev_y = f64::from(last.y);

        for p in contour {
            let x = f64::from(p.x);
            let y = f64::from(p.y);
            let cross = prev_x * y - x * prev_y;
            let xx = x * x;
            let yy = y * y;
            let x_sum = prev_x + x;
            let y_sum = prev_y + y;

            a00 += cross;
            a10 += cross * x_sum;
            a01 += cross * y_sum;
            a20 += cross * (prev_x * x_sum + xx);
            a11 += cross * (prev_x * (y_sum + prev_y) + x * (y_sum + y));
            a02 += cross * (prev_y * y_sum + yy);

            prev_x = x;
            prev_y = y;
        }

        if a00.abs() <= f64::from(f32::EPSILON) {
            return Self::default();
        }

        let sign = a00.signum();
        let m00 = sign * a00 / 2.0;
        let m10 = sign * a10 / 6.0;
        let m01 = sign * a01 / 6.0;
        let m20 = sign * a20 / 12.0;
        let m11 = sign * a11 / 24.0;
        let m02 = sign * a02 / 12.0;

        let cx = m10 / m00;
        let cy = m01 / m00;

        Self {
            m00,
            m10,
            m01,
            m20,
            m11,
            m02,
            mu20: m20 - m10 * cx,
            mu11: m11 - m10 * cy,
            mu02: m02 - m01 * cy,
        }
    }

    /// Ratio of the smaller to the larger principal moment of inertia.
    ///
    /// Returns 1 when the shape is too close to rotationally symmetric for
    /// the principal axes to be well defined (`denominator <= eps`).
    pub fn inertia_ratio(&self, eps: f64) -> f64 {
        let denom = ((2.0 * self.mu11).powi(2) + (self.mu20 - self.mu02).powi(2)).sqrt();
        if denom <= eps {
            return 1.0;
        }

        let eig = Matrix2::new(self.mu20, self.mu11, self.mu11, self.mu02).symmetric_eigenvalues();
        let i_min = eig[0].min(eig[1]);
        let i_max = eig[0].max(eig[1]);
        if i_max.abs() <= f64::EPSILON {
            return 1.0;
        }
        i_min / i_max
    }
}
