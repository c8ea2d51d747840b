use crate::wave::Wave;

/// Remove waves that shadow an older wave's search band.
///
/// Waves are visited youngest first (birth descending, then id descending). A
/// wave whose left-edge projection falls inside the band of any wave after it
/// in that order is a duplicate of that older wave and is dropped. Survivors
/// are returned to oldest-first order (birth, then id ascending). Returns the
/// number of removed waves.
pub fn dedup_waves(waves: &mut Vec<Wave>) -> usize {
    waves.sort_by(|a, b| {
        b.birth_frame()
            .cmp(&a.birth_frame())
            .then_with(|| b.id().cmp(&a.id()))
    });

    let mut keep = vec![true; waves.len()];
    for i in 0..waves.len() {
        let Some(left_y) = waves[i].left_edge_y() else {
            continue;
        };
        let shadowed = waves[i + 1..]
            .iter()
            .any(|older| older.search_roi().contains_left_y(left_y));
        if shadowed {
            tracing::debug!(
                id = waves[i].id(),
                birth = waves[i].birth_frame(),
                left_y,
                "removed duplicate wave"
            );
            keep[i] = false;
        }
    }

    let before = waves.len();
    let input = std::mem::take(waves);
    *waves = input
        .into_iter()
        .enumerate()
        .filter_map(|(index, wave)| keep[index].then_some(wave))
        .collect();
    waves.sort_by(|a, b| {
        a.birth_frame()
            .cmp(&b.birth_frame())
            .then_with(|| a.id().cmp(&b.id()))
    });
    before - waves.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::Candidate;
    use crate::test_utils::rect_contour;
    use crate::tracking::SearchRegionConfig;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    fn wave(id: u64, birth: usize, y0: i32) -> Wave {
        let candidate = Candidate {
            contour: rect_contour(100, y0, 120, 10),
            frame_number: birth,
        };
        let c = candidate.centroid().expect("non-empty contour");
        Wave::spawn(candidate, c, id, &SearchRegionConfig::default(), 320, 20)
    }

    fn ids(waves: &[Wave]) -> Vec<u64> {
        waves.iter().map(Wave::id).collect()
    }

    #[test]
    fn older_wave_survives_regardless_of_input_order() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..16 {
            let mut waves = vec![wave(1, 2, 85), wave(2, 6, 90), wave(3, 4, 10)];
            waves.shuffle(&mut rng);
            let removed = dedup_waves(&mut waves);
            assert_eq!(removed, 1);
            assert_eq!(ids(&waves), vec![1, 3]);
        }
    }

    #[test]
    fn equal_birth_keeps_lower_id() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..16 {
            let mut waves = vec![wave(4, 3, 85), wave(9, 3, 88)];
            waves.shuffle(&mut rng);
            dedup_waves(&mut waves);
            assert_eq!(ids(&waves), vec![4]);
        }
    }

    #[test]
    fn distinct_bands_are_kept_in_birth_order() {
        let mut waves = vec![wave(5, 9, 140), wave(2, 1, 20), wave(3, 4, 80)];
        assert_eq!(dedup_waves(&mut waves), 0);
        assert_eq!(ids(&waves), vec![2, 3, 5]);
    }

    #[test]
    fn chain_of_shadows_keeps_only_the_oldest() {
        // Each band is shadowed by the next-older one; a removed wave still
        // shadows the waves younger than itself.
        let mut waves = vec![wave(1, 1, 60), wave(2, 2, 75), wave(3, 3, 90)];
        dedup_waves(&mut waves);
        assert_eq!(ids(&waves), vec![1]);
    }
}
