use crate::detection::Candidate;
use crate::geometry::left_edge_projection;
use crate::wave::{UpdateContext, Wave, WaveIdGenerator};

use super::TrackerConfig;

/// Run the per-frame update cycle on every live wave.
///
/// Updates only read the shared mask, so with the `parallel` feature they
/// run concurrently.
pub fn track_all(waves: &mut [Wave], ctx: &UpdateContext<'_>) {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        waves.par_iter_mut().for_each(|wave| wave.update(ctx));
    }
    #[cfg(not(feature = "parallel"))]
    {
        for wave in waves.iter_mut() {
            wave.update(ctx);
        }
    }
}

/// Move dead waves out of the live set.
///
/// Recognized waves are appended to `archive` in live-set order; the rest are
/// dropped. Returns the number of dropped waves.
pub fn reap(waves: &mut Vec<Wave>, archive: &mut Vec<Wave>) -> usize {
    let (dead, alive): (Vec<Wave>, Vec<Wave>) =
        std::mem::take(waves).into_iter().partition(Wave::is_dead);
    *waves = alive;

    let mut discarded = 0usize;
    for wave in dead {
        if wave.is_recognized() {
            tracing::info!(
                id = wave.id(),
                birth = wave.birth_frame(),
                death = ?wave.death_frame(),
                max_mass = wave.max_mass(),
                max_displacement = wave.max_displacement(),
                "archived recognized wave"
            );
            archive.push(wave);
        } else {
            tracing::debug!(id = wave.id(), death = ?wave.death_frame(), "discarded wave");
            discarded += 1;
        }
    }
    discarded
}

/// Whether `left_y` falls in the left-edge span of any wave's search band.
fn covered_by_any(left_y: i32, waves: &[Wave]) -> bool {
    waves.iter().any(|w| w.search_roi().contains_left_y(left_y))
}

/// Promote candidates not already covered by a tracked wave.
///
/// Coverage is checked against every wave in `waves`, including those
/// admitted earlier in the same call. Returns the number of new waves.
pub fn admit(
    candidates: Vec<Candidate>,
    waves: &mut Vec<Wave>,
    ids: &mut WaveIdGenerator,
    cfg: &TrackerConfig,
) -> usize {
    let angle = cfg.search.axis_angle_deg;
    let mut admitted = 0usize;

    for candidate in candidates {
        let Some(centroid) = candidate.centroid() else {
            continue;
        };
        let left_y = left_edge_projection(centroid, angle);
        if covered_by_any(left_y, waves) {
            continue;
        }

        let wave = Wave::spawn(
            candidate,
            centroid,
            ids.next_id(),
            &cfg.search,
            cfg.frame_size.width,
            cfg.history_len,
        );
        tracing::debug!(
            id = wave.id(),
            birth = wave.birth_frame(),
            cx = centroid.x,
            cy = centroid.y,
            "admitted wave"
        );
        waves.push(wave);
        admitted += 1;
    }
    admitted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{band_mask, rect_contour};
    use crate::wave::RecognitionThresholds;
    use image::GrayImage;

    fn candidate(x0: i32, y0: i32, frame: usize) -> Candidate {
        Candidate {
            contour: rect_contour(x0, y0, 120, 10),
            frame_number: frame,
        }
    }

    fn step(waves: &mut [Wave], mask: &GrayImage, frame: usize, total: usize, cfg: &TrackerConfig) {
        let policy = RecognitionThresholds::default();
        track_all(
            waves,
            &UpdateContext {
                mask,
                frame_number: frame,
                total_frames: total,
                search: &cfg.search,
                policy: &policy,
            },
        );
    }

    #[test]
    fn admit_assigns_sequential_ids() {
        let cfg = TrackerConfig::default();
        let mut ids = WaveIdGenerator::new();
        let mut waves = Vec::new();
        let n = admit(
            vec![candidate(100, 20, 1), candidate(100, 120, 1)],
            &mut waves,
            &mut ids,
            &cfg,
        );
        assert_eq!(n, 2);
        assert_eq!(waves.iter().map(Wave::id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn covered_candidate_is_never_admitted() {
        let cfg = TrackerConfig::default();
        let mut ids = WaveIdGenerator::new();
        let mut waves = Vec::new();
        admit(vec![candidate(100, 85, 1)], &mut waves, &mut ids, &cfg);

        // Same row band, shifted horizontally: projection lands in the band.
        let n = admit(vec![candidate(60, 88, 2)], &mut waves, &mut ids, &cfg);
        assert_eq!(n, 0);
        assert_eq!(waves.len(), 1);
        assert_eq!(ids.peek(), 2);
    }

    #[test]
    fn same_call_admissions_shadow_later_candidates() {
        let cfg = TrackerConfig::default();
        let mut ids = WaveIdGenerator::new();
        let mut waves = Vec::new();
        let n = admit(
            vec![candidate(100, 85, 1), candidate(100, 87, 1)],
            &mut waves,
            &mut ids,
            &cfg,
        );
        assert_eq!(n, 1);
    }

    #[test]
    fn reap_splits_recognized_from_discarded() {
        let cfg = TrackerConfig::default();
        let mut ids = WaveIdGenerator::new();
        let mut waves = Vec::new();
        admit(
            vec![candidate(100, 20, 1), candidate(100, 120, 1)],
            &mut waves,
            &mut ids,
            &cfg,
        );

        // Upper wave drifts until recognized, lower one never shows up again.
        for frame in 2..=9 {
            let dy = 2 * (frame as u32 - 1);
            let mask = band_mask(320, 180, 100, 20 + dy, 120, 10);
            step(&mut waves, &mask, frame, 50, &cfg);
        }
        assert_eq!(waves.len(), 2);
        assert!(waves[0].is_recognized());
        assert!(waves[1].is_dead());

        let mut archive = Vec::new();
        let discarded = reap(&mut waves, &mut archive);
        assert_eq!(discarded, 1);
        assert!(archive.is_empty());
        assert_eq!(waves.len(), 1);

        step(&mut waves, &band_mask(320, 180, 100, 40, 120, 10), 50, 50, &cfg);
        let discarded = reap(&mut waves, &mut archive);
        assert_eq!(discarded, 0);
        assert!(waves.is_empty());
        assert_eq!(archive.len(), 1);
        assert_eq!(archive[0].id(), 1);
        assert_eq!(archive[0].death_frame(), Some(50));
    }
}
