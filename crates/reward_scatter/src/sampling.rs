//! Weighted index sampling over slot windows.
//!
//! This module provides the draws the scheduler is built on:
//! - [pick_weighted_index]: one index with probability proportional to its weight.
//! - [pick_distinct_weighted]: up to `k` distinct indices without replacement.
//!
//! All draws consume uniform floats from a caller-supplied [rand::RngCore],
//! so a fixed seed reproduces the exact sequence of picks.
use rand::RngCore;

/// Generate a random float in the range [0, 1].
#[inline]
pub(crate) fn rand01(rng: &mut dyn RngCore) -> f32 {
    (rng.next_u32() as f32) / ((u32::MAX as f32) + 1.0)
}

/// Draws one index with probability proportional to its entry in `weights`.
///
/// `total` must be the sum of `weights`; passing it in lets callers that
/// already accumulated the sum avoid a second pass. Returns `None` when the
/// slice is empty or `total` is not a positive finite number. Floating-point
/// residue at the end of the scan falls back to the last index, so a valid
/// call always yields an index.
pub fn pick_weighted_index<R: RngCore>(weights: &[f32], total: f32, rng: &mut R) -> Option<usize> {
    if weights.is_empty() || !total.is_finite() || total <= 0.0 {
        return None;
    }

    let r = rand01(rng) * total;
    let mut acc = 0.0f32;
    for (i, &w) in weights.iter().enumerate() {
        acc += w;
        if r <= acc {
            return Some(i);
        }
    }
    Some(weights.len() - 1)
}

/// Draws up to `k` distinct indices, proportional to `weights`, without replacement.
///
/// Each pick zeroes its weight before the next draw. Stops early once the
/// remaining weight mass reaches zero, so the result may be shorter than `k`.
pub fn pick_distinct_weighted<R: RngCore>(weights: &[f32], k: usize, rng: &mut R) -> Vec<usize> {
    let k = k.min(weights.len());
    let mut remaining = weights.to_vec();
    let mut picks = Vec::with_capacity(k);

    for _ in 0..k {
        let total: f32 = remaining.iter().sum();
        let Some(idx) = pick_weighted_index(&remaining, total, rng) else {
            break;
        };
        picks.push(idx);
        remaining[idx] = 0.0;
    }

    picks
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    struct FixedRng {
        value: u32,
    }

    impl RngCore for FixedRng {
        fn next_u32(&mut self) -> u32 {
            self.value
        }

        fn next_u64(&mut self) -> u64 {
            self.value as u64
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            let bytes = self.value.to_le_bytes();
            for (i, b) in dest.iter_mut().enumerate() {
                *b = bytes[i % 4];
            }
        }
    }

    #[test]
    fn rand01_stays_in_unit_interval() {
        for value in [0, 1, u32::MAX / 2, u32::MAX - 1, u32::MAX] {
            let mut rng = FixedRng { value };
            let r = rand01(&mut rng);
            assert!((0.0..=1.0).contains(&r), "rand01({value}) = {r}");
        }
    }

    #[test]
    fn none_for_empty_or_non_positive_total() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(pick_weighted_index(&[], 0.0, &mut rng), None);
        assert_eq!(pick_weighted_index(&[1.0, 1.0], 0.0, &mut rng), None);
        assert_eq!(pick_weighted_index(&[1.0, 1.0], -2.0, &mut rng), None);
        assert_eq!(pick_weighted_index(&[1.0, 1.0], f32::NAN, &mut rng), None);
    }

    #[test]
    fn picks_follow_cumulative_weights() {
        let weights = [0.7, 0.3];
        let total = 1.0;

        let mut rng_low = FixedRng { value: 0 };
        assert_eq!(pick_weighted_index(&weights, total, &mut rng_low), Some(0));

        let mut rng_high = FixedRng {
            value: (0.8 * u32::MAX as f32) as u32,
        };
        assert_eq!(pick_weighted_index(&weights, total, &mut rng_high), Some(1));
    }

    #[test]
    fn zero_weight_entries_are_never_picked() {
        let weights = [0.0, 1.0, 0.0];
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..64 {
            assert_eq!(pick_weighted_index(&weights, 1.0, &mut rng), Some(1));
        }
    }

    #[test]
    fn overshooting_total_falls_back_to_last_index() {
        // r lands beyond the true weight mass when total overstates the sum.
        let mut rng = FixedRng {
            value: u32::MAX - 1,
        };
        assert_eq!(pick_weighted_index(&[0.1, 0.1], 10.0, &mut rng), Some(1));
    }

    #[test]
    fn distinct_picks_are_distinct_and_bounded() {
        let weights = [1.0, 2.0, 3.0, 4.0, 5.0];
        let mut rng = StdRng::seed_from_u64(42);
        let picks = pick_distinct_weighted(&weights, 3, &mut rng);
        assert_eq!(picks.len(), 3);
        let mut sorted = picks.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 3);
        assert!(picks.iter().all(|&i| i < weights.len()));
    }

    #[test]
    fn distinct_picks_stop_when_mass_runs_out() {
        let weights = [0.0, 1.0, 0.0];
        let mut rng = StdRng::seed_from_u64(3);
        let picks = pick_distinct_weighted(&weights, 3, &mut rng);
        assert_eq!(picks, vec![1]);
    }

    #[test]
    fn requesting_more_than_len_is_clamped() {
        let weights = [1.0, 1.0];
        let mut rng = StdRng::seed_from_u64(9);
        let picks = pick_distinct_weighted(&weights, 10, &mut rng);
        assert_eq!(picks.len(), 2);
    }

    #[test]
    fn determinism_for_same_seed() {
        let weights = [0.5, 1.5, 2.5, 0.25];
        let mut rng_a = StdRng::seed_from_u64(123);
        let mut rng_b = StdRng::seed_from_u64(123);
        let a = pick_distinct_weighted(&weights, 4, &mut rng_a);
        let b = pick_distinct_weighted(&weights, 4, &mut rng_b);
        assert_eq!(a, b);
    }

    #[test]
    fn empirical_frequencies_roughly_match_weights() {
        let weights = [1.0, 3.0];
        let mut rng = StdRng::seed_from_u64(2024);
        let mut counts = [0usize; 2];
        let draws = 4000;
        for _ in 0..draws {
            let idx = pick_weighted_index(&weights, 4.0, &mut rng).unwrap();
            counts[idx] += 1;
        }
        let ratio = counts[1] as f32 / draws as f32;
        // Expected 0.75 with a generous margin.
        assert!((0.65..0.85).contains(&ratio), "ratio = {ratio}");
    }
}
