//! wavetrack — multi-wave tracking and recognition from foreground masks.
//!
//! Input per frame is a binary foreground mask plus the raw contours traced
//! from it. The stages are:
//!
//! 1. **Detection** – area and inertia-ratio gates turn raw contours into
//!    candidates (elongated blobs only).
//! 2. **Wave update** – every live wave re-derives its pixels from a
//!    trapezoidal search band, then its centroid, mass, displacement from its
//!    birth axis, and recognition latch.
//! 3. **Reap** – dead waves leave the live set; recognized ones are archived.
//! 4. **Dedup** – a wave shadowing an older wave's band is dropped.
//! 5. **Admission** – candidates outside every band become new waves.
//!
//! # Public API
//! - [`WaveTracker`] as the entry point, fed frame by frame
//! - [`TrackerConfig`] and its parts for tuning
//! - [`RecognitionPolicy`] for custom recognition rules
//! - [`TrackingReport`] / [`RecognizedWave`] / [`FrameSummary`] results
//!
//! The building blocks in [`detection`], [`geometry`], [`wave`] and
//! [`tracking`] are public for callers that drive the phases themselves.

pub mod detection;
mod error;
pub mod geometry;
mod pipeline;
mod tracker;
pub mod tracking;
pub mod wave;

#[cfg(test)]
pub(crate) mod test_utils;

pub use detection::{Candidate, CandidateFilterConfig};
pub use error::TrackError;
pub use geometry::PixelPoint;
pub use pipeline::{FrameSummary, RecognizedWave, TrackingReport};
pub use tracker::WaveTracker;
pub use tracking::{FrameSize, SearchRegionConfig, TrackerConfig};
pub use wave::{RecognitionPolicy, RecognitionThresholds, Wave, WaveDynamics, WaveId};
