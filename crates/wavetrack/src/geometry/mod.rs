//! Planar primitives shared by candidate detection and wave tracking.
//!
//! Coordinates follow the image convention: `x` grows to the right, `y`
//! grows downward, and pixel positions are integer.

mod axis;
mod bounding;
mod roi;

pub use axis::AxisLine;
pub use bounding::{trimmed_min_area_rect, BoundingPolygon};
pub use roi::{left_edge_projection, SearchRoi};

/// Integer pixel coordinate.
pub type PixelPoint = imageproc::point::Point<i32>;

/// Tangent of an angle given in degrees.
#[inline]
pub(crate) fn tan_deg(angle_deg: f64) -> f64 {
    angle_deg.to_radians().tan()
}

/// Integer mean of a point set (truncating), or `None` for an empty set.
pub fn mean_point(points: &[PixelPoint]) -> Option<PixelPoint> {
    if points.is_empty() {
        return None;
    }
    let (sum_x, sum_y) = points.iter().fold((0i64, 0i64), |(sx, sy), p| {
        (sx + i64::from(p.x), sy + i64::from(p.y))
    });
    let n = points.len() as i64;
    Some(PixelPoint::new((sum_x / n) as i32, (sum_y / n) as i32))
}
