//! Candidate extraction: area and elongation gates over raw contours.

mod candidate;
mod moments;

pub use candidate::{filter_candidates, keep_contour, Candidate, CandidateFilterConfig};
pub use moments::ContourMoments;
