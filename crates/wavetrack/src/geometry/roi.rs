use image::{GrayImage, Luma};
use imageproc::drawing::draw_polygon_mut;

use super::{tan_deg, PixelPoint};

/// Trapezoidal search region spanning the full frame width.
///
/// The region is a band of half-height `buffer_px` centered on the line
/// through the wave centroid at the configured axis angle. Vertices are
/// always ordered upper-left, upper-right, lower-right, lower-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchRoi {
    pub upper_left: PixelPoint,
    pub upper_right: PixelPoint,
    pub lower_right: PixelPoint,
    pub lower_left: PixelPoint,
}

impl SearchRoi {
    /// Build the band around `centroid` for a frame of width `frame_width`.
    ///
    /// Edge offsets are truncated to whole pixels before the buffer is applied.
    /// Corner rows saturate at the `i32` range.
    pub fn around(centroid: PixelPoint, angle_deg: f64, buffer_px: i32, frame_width: u32) -> Self {
        let tan = tan_deg(angle_deg);
        let width = i32::try_from(frame_width).unwrap_or(i32::MAX);
        let delta_y_left = (f64::from(centroid.x) * tan) as i32;
        let delta_y_right = (f64::from(width.saturating_sub(centroid.x)) * tan) as i32;
        let left_y = centroid.y.saturating_add(delta_y_left);
        let right_y = centroid.y.saturating_sub(delta_y_right);

        Self {
            upper_left: PixelPoint::new(0, left_y.saturating_sub(buffer_px)),
            upper_right: PixelPoint::new(width, right_y.saturating_sub(buffer_px)),
            lower_right: PixelPoint::new(width, right_y.saturating_add(buffer_px)),
            lower_left: PixelPoint::new(0, left_y.saturating_add(buffer_px)),
        }
    }

    pub fn vertices(&self) -> [PixelPoint; 4] {
        [
            self.upper_left,
            self.upper_right,
            self.lower_right,
            self.lower_left,
        ]
    }

    /// Vertical span `[top, bottom]` of the region at the frame's left edge.
    pub fn left_edge_span(&self) -> [i32; 2] {
        [self.upper_left.y, self.lower_left.y]
    }

    /// Whether a left-edge projection falls inside this region.
    pub fn contains_left_y(&self, left_y: i32) -> bool {
        let [top, bottom] = self.left_edge_span();
        left_y >= top && left_y <= bottom
    }

    /// Nonzero mask pixels covered by this region, in row-major order.
    pub fn select(&self, mask: &GrayImage) -> Vec<PixelPoint> {
        let (w, h) = mask.dimensions();
        let mut region = GrayImage::new(w, h);
        draw_polygon_mut(&mut region, &self.vertices(), Luma([255u8]));

        mask.enumerate_pixels()
            .zip(region.pixels())
            .filter(|((_, _, m), r)| m[0] != 0 && r[0] != 0)
            .map(|((x, y, _), _)| PixelPoint::new(x as i32, y as i32))
            .collect()
    }
}

/// Row at which the axis line through `centroid` meets the frame's left edge.
pub fn left_edge_projection(centroid: PixelPoint, angle_deg: f64) -> i32 {
    let delta_y_left = (f64::from(centroid.x) * tan_deg(angle_deg)) as i32;
    centroid.y.saturating_add(delta_y_left)
}
