use crate::geometry::{mean_point, PixelPoint};

use super::moments::ContourMoments;

/// Area and shape gates applied to raw contours.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CandidateFilterConfig {
    /// Minimum enclosed contour area `m00` (pixels²).
    pub min_area: f64,
    /// Inclusive lower bound on the inertia ratio.
    pub min_inertia_ratio: f64,
    /// Exclusive upper bound on the inertia ratio.
    pub max_inertia_ratio: f64,
    /// Principal-axis denominator below which a shape counts as symmetric.
    pub degenerate_eps: f64,
}

impl Default for CandidateFilterConfig {
    fn default() -> Self {
        Self {
            min_area: 100.0,
            min_inertia_ratio: 0.0,
            max_inertia_ratio: 0.1,
            degenerate_eps: 1e-2,
        }
    }
}

/// A contour that passed the candidate gates, tagged with its frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub contour: Vec<PixelPoint>,
    pub frame_number: usize,
}

impl Candidate {
    /// Integer mean of the contour vertices.
    pub fn centroid(&self) -> Option<PixelPoint> {
        mean_point(&self.contour)
    }
}

/// Whether `contour` passes the area and inertia-ratio gates.
pub fn keep_contour(contour: &[PixelPoint], cfg: &CandidateFilterConfig) -> bool {
    let moments = ContourMoments::from_contour(contour);
    if moments.m00 < cfg.min_area {
        return false;
    }
    let ratio = moments.inertia_ratio(cfg.degenerate_eps);
    ratio >= cfg.min_inertia_ratio && ratio < cfg.max_inertia_ratio
}

/// Filter raw contours into candidates, preserving encounter order.
pub fn filter_candidates<C: AsRef<[PixelPoint]>>(
    raw_contours: &[C],
    frame_number: usize,
    cfg: &CandidateFilterConfig,
) -> Vec<Candidate> {
    raw_contours
        .iter()
        .map(AsRef::as_ref)
        .filter(|contour| keep_contour(contour, cfg))
        .map(|contour| Candidate {
            contour: contour.to_vec(),
            frame_number,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::rect_contour;

    #[test]
    fn small_area_is_rejected_even_when_elongated() {
        let cfg = CandidateFilterConfig::default();
        // 30x3 -> area 90, ratio 0.01
        assert!(!keep_contour(&rect_contour(0, 0, 30, 3), &cfg));
    }

    #[test]
    fn symmetric_shape_is_rejected() {
        let cfg = CandidateFilterConfig::default();
        assert!(!keep_contour(&rect_contour(50, 50, 20, 20), &cfg));
    }

    #[test]
    fn elongated_band_is_accepted() {
        let cfg = CandidateFilterConfig::default();
        assert!(keep_contour(&rect_contour(100, 85, 120, 10), &cfg));
    }

    #[test]
    fn moderately_elongated_shape_hits_exclusive_upper_bound() {
        let cfg = CandidateFilterConfig::default();
        // ratio = (h/w)^2 = 0.25 for a 40x20 rectangle
        assert!(!keep_contour(&rect_contour(0, 0, 40, 20), &cfg));
        let loose = CandidateFilterConfig {
            max_inertia_ratio: 0.3,
            ..cfg
        };
        assert!(keep_contour(&rect_contour(0, 0, 40, 20), &loose));
    }

    #[test]
    fn accepted_candidates_keep_encounter_order_and_frame() {
        let cfg = CandidateFilterConfig::default();
        let raw = vec![
            rect_contour(10, 10, 120, 10),
            rect_contour(50, 50, 20, 20),
            rect_contour(10, 100, 200, 8),
        ];
        let out = filter_candidates(&raw, 7, &cfg);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].contour, raw[0]);
        assert_eq!(out[1].contour, raw[2]);
        assert!(out.iter().all(|c| c.frame_number == 7));
    }

    #[test]
    fn candidate_centroid_is_vertex_mean() {
        let c = Candidate {
            contour: rect_contour(10, 20, 40, 6),
            frame_number: 1,
        };
        assert_eq!(c.centroid(), Some(PixelPoint::new(30, 23)));
    }
}
