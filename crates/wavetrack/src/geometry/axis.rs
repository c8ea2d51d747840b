use super::{tan_deg, PixelPoint};

/// Line `a·x + b·y + c = 0` in frame coordinates.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AxisLine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl AxisLine {
    /// Line through `point` with image-space slope `tan(angle_deg)`.
    pub fn through(point: PixelPoint, angle_deg: f64) -> Self {
        let slope = tan_deg(angle_deg);
        Self {
            a: slope,
            b: -1.0,
            c: f64::from(point.y) - slope * f64::from(point.x),
        }
    }

    /// Perpendicular distance from `point` to the line.
    pub fn distance_to(&self, point: PixelPoint) -> f64 {
        let x = f64::from(point.x);
        let y = f64::from(point.y);
        (self.a * x + self.b * y + self.c).abs() / (self.a * self.a + self.b * self.b).sqrt()
    }
}
