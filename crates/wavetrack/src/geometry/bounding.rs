//! Display-only bounding polygon of a wave representation.
//!
//! Points farther than three standard deviations from the mean on either
//! axis are dropped, then the minimum-area enclosing rectangle of the rest is
//! found with rotating calipers over the convex hull.

use imageproc::geometry::convex_hull;
use nalgebra::Vector2;

use super::PixelPoint;

/// Corners of a (possibly rotated) rectangle, in traversal order.
pub type BoundingPolygon = [[f64; 2]; 4];

const OUTLIER_SIGMAS: f64 = 3.0;

/// Minimum-area rectangle over the 3-sigma-trimmed subset of `points`.
///
/// Returns `None` for an empty point set.
pub fn trimmed_min_area_rect(points: &[PixelPoint]) -> Option<BoundingPolygon> {
    let inliers = trim_outliers(points, OUTLIER_SIGMAS);
    min_area_rect(&inliers)
}

fn trim_outliers(points: &[PixelPoint], n_sigma: f64) -> Vec<PixelPoint> {
    if points.is_empty() {
        return Vec::new();
    }
    let n = points.len() as f64;
    let mean_x = points.iter().map(|p| f64::from(p.x)).sum::<f64>() / n;
    let mean_y = points.iter().map(|p| f64::from(p.y)).sum::<f64>() / n;
    let var_x = points
        .iter()
        .map(|p| (f64::from(p.x) - mean_x).powi(2))
        .sum::<f64>()
        / n;
    let var_y = points
        .iter()
        .map(|p| (f64::from(p.y) - mean_y).powi(2))
        .sum::<f64>()
        / n;
    let (lim_x, lim_y) = (n_sigma * var_x.sqrt(), n_sigma * var_y.sqrt());

    points
        .iter()
        .copied()
        .filter(|p| {
            (f64::from(p.x) - mean_x).abs() <= lim_x && (f64::from(p.y) - mean_y).abs() <= lim_y
        })
        .collect()
}

fn min_area_rect(points: &[PixelPoint]) -> Option<BoundingPolygon> {
    let hull: Vec<Vector2<f64>> = convex_hull(points)
        .into_iter()
        .map(|p| Vector2::new(f64::from(p.x), f64::from(p.y)))
        .collect();

    let first = hull.first()?;
    let collapsed = [[first.x, first.y]; 4];

    let mut best: Option<(f64, BoundingPolygon)> = None;
    for i in 0..hull.len() {
        let edge = hull[(i + 1) % hull.len()] - hull[i];
        let len = edge.norm();
        if len <= f64::EPSILON {
            continue;
        }
        let u = edge / len;
        let v = Vector2::new(-u.y, u.x);

        let (mut u_min, mut u_max) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut v_min, mut v_max) = (f64::INFINITY, f64::NEG_INFINITY);
        for p in &hull {
            let pu = p.dot(&u);
            let pv = p.dot(&v);
            u_min = u_min.min(pu);
            u_max = u_max.max(pu);
            v_min = v_min.min(pv);
            v_max = v_max.max(pv);
        }

        let area = (u_max - u_min) * (v_max - v_min);
        if best.as_ref().map_or(true, |(a, _)| area < *a) {
            let corner = |s: f64, t: f64| {
                let c = u * s + v * t;
                [c.x, c.y]
            };
            best = Some((
                area,
                [
                    corner(u_min, v_min),
                    corner(u_max, v_min),
                    corner(u_max, v_max),
                    corner(u_min, v_max),
                ],
            ));
        }
    }

    // Every hull edge degenerate: all points coincide.
    Some(best.map_or(collapsed, |(_, rect)| rect))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn filled(x0: i32, y0: i32, w: i32, h: i32) -> Vec<PixelPoint> {
        (y0..y0 + h)
            .flat_map(|y| (x0..x0 + w).map(move |x| PixelPoint::new(x, y)))
            .collect()
    }

    fn rect_area(r: &BoundingPolygon) -> f64 {
        let e1 = [r[1][0] - r[0][0], r[1][1] - r[0][1]];
        let e2 = [r[3][0] - r[0][0], r[3][1] - r[0][1]];
        (e1[0] * e1[0] + e1[1] * e1[1]).sqrt() * (e2[0] * e2[0] + e2[1] * e2[1]).sqrt()
    }

    #[test]
    fn axis_aligned_block_gives_tight_rectangle() {
        let pts = filled(10, 20, 30, 5);
        let rect = trimmed_min_area_rect(&pts).expect("non-empty");
        assert_relative_eq!(rect_area(&rect), 29.0 * 4.0, epsilon = 1e-9);
        for corner in rect {
            assert!(corner[0] >= 10.0 - 1e-9 && corner[0] <= 39.0 + 1e-9);
            assert!(corner[1] >= 20.0 - 1e-9 && corner[1] <= 24.0 + 1e-9);
        }
    }

    #[test]
    fn distant_outlier_is_trimmed() {
        let mut pts = filled(100, 100, 20, 20);
        pts.push(PixelPoint::new(319, 0));
        let rect = trimmed_min_area_rect(&pts).expect("non-empty");
        assert_relative_eq!(rect_area(&rect), 19.0 * 19.0, epsilon = 1e-6);
    }

    #[test]
    fn single_point_collapses_rectangle() {
        let rect = trimmed_min_area_rect(&[PixelPoint::new(4, 7)]).expect("non-empty");
        assert_eq!(rect, [[4.0, 7.0]; 4]);
    }

    #[test]
    fn empty_points_yield_none() {
        assert!(trimmed_min_area_rect(&[]).is_none());
    }
}
