//! Frame step orchestrator: filter → track_all → reap → dedup → admit.

use image::GrayImage;

use crate::detection::filter_candidates;
use crate::geometry::PixelPoint;
use crate::tracking::{admit, dedup_waves, reap, track_all, TrackerConfig};
use crate::wave::{RecognitionPolicy, UpdateContext, Wave, WaveIdGenerator};

use super::FrameSummary;

/// Everything carried from one frame to the next.
#[derive(Debug, Clone, Default)]
pub(crate) struct TrackingState {
    /// Live waves, oldest first.
    pub waves: Vec<Wave>,
    /// Dead recognized waves in removal order.
    pub archive: Vec<Wave>,
    pub ids: WaveIdGenerator,
    pub discarded: usize,
}

/// Advance `state` by one frame.
///
/// Inputs are assumed validated. Admission is skipped on the final frame,
/// since every live wave is force-killed there.
pub(crate) fn run_frame<C: AsRef<[PixelPoint]>>(
    state: &mut TrackingState,
    mask: &GrayImage,
    raw_contours: &[C],
    frame_number: usize,
    total_frames: usize,
    config: &TrackerConfig,
    policy: &dyn RecognitionPolicy,
) -> FrameSummary {
    let candidates = filter_candidates(raw_contours, frame_number, &config.candidate);
    let n_candidates = candidates.len();

    let ctx = UpdateContext {
        mask,
        frame_number,
        total_frames,
        search: &config.search,
        policy,
    };
    track_all(&mut state.waves, &ctx);

    let archived_before = state.archive.len();
    let discarded = reap(&mut state.waves, &mut state.archive);
    state.discarded += discarded;
    let archived = state.archive.len() - archived_before;

    let duplicates = dedup_waves(&mut state.waves);

    let admitted = if frame_number < total_frames {
        admit(candidates, &mut state.waves, &mut state.ids, config)
    } else {
        0
    };

    for wave in &state.waves {
        tracing::trace!(
            id = wave.id(),
            history = wave.centroid_history().len(),
            max_displacement = wave.max_displacement(),
            mass = wave.mass(),
            max_mass = wave.max_mass(),
            recognized = wave.is_recognized(),
            death = ?wave.death_frame(),
            "wave state"
        );
    }

    let summary = FrameSummary {
        frame_number,
        candidates: n_candidates,
        archived,
        discarded,
        duplicates,
        admitted,
        live: state.waves.len(),
    };
    tracing::debug!(
        frame = frame_number,
        candidates = summary.candidates,
        archived = summary.archived,
        discarded = summary.discarded,
        duplicates = summary.duplicates,
        admitted = summary.admitted,
        live = summary.live,
        "frame processed"
    );
    summary
}
