//! Synthetic masks and contours shared by unit tests.

use image::{GrayImage, Luma};

use crate::geometry::PixelPoint;

/// `w × h` mask with a filled `bw × bh` rectangle whose top-left pixel is `(x0, y0)`.
///
/// The rectangle is clipped to the frame.
pub(crate) fn band_mask(w: u32, h: u32, x0: u32, y0: u32, bw: u32, bh: u32) -> GrayImage {
    let mut img = GrayImage::new(w, h);
    for y in y0..(y0 + bh).min(h) {
        for x in x0..(x0 + bw).min(w) {
            img.put_pixel(x, y, Luma([255]));
        }
    }
    img
}

/// Four-vertex polygon of the rectangle `[x0, x0 + w] × [y0, y0 + h]`.
pub(crate) fn rect_contour(x0: i32, y0: i32, w: i32, h: i32) -> Vec<PixelPoint> {
    vec![
        PixelPoint::new(x0, y0),
        PixelPoint::new(x0 + w, y0),
        PixelPoint::new(x0 + w, y0 + h),
        PixelPoint::new(x0, y0 + h),
    ]
}
