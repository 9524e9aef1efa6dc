//! Top-k selection over one similarity row.
//!
//! ## Algorithm
//! 1. Drop the query's own index from the candidate list
//! 2. Clamp k to the number of remaining candidates
//! 3. `select_nth_unstable_by` moves the k best to the front in O(N)
//! 4. Sort only those k, O(k log k)
//!
//! ## Ordering
//! Descending score. Equal scores are ordered by lower index first, and NaN
//! ranks below every other score (negative infinity included). The order is
//! total, so the result does not depend on how the unstable selection
//! shuffles equal elements.

use std::cmp::Ordering;

/// Comparator used for both selection and the final sort
fn rank_order(row: &[f32], a: usize, b: usize) -> Ordering {
    let (score_a, score_b) = (row[a], row[b]);
    let by_score = match (score_a.is_nan(), score_b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => score_b.partial_cmp(&score_a).unwrap_or(Ordering::Equal),
    };
    by_score.then_with(|| a.cmp(&b))
}

/// Indices of the `k` highest scores in `row`, excluding `self_index`.
///
/// The result has `min(k, row.len() - 1)` entries, sorted best first. An
/// empty row, `k == 0`, or a `self_index` outside the row all yield an
/// empty vector.
pub fn select_top_k(row: &[f32], self_index: usize, k: usize) -> Vec<usize> {
    if self_index >= row.len() {
        return Vec::new();
    }

    let k = k.min(row.len() - 1);
    if k == 0 {
        return Vec::new();
    }

    let mut candidates: Vec<usize> = (0..row.len()).filter(|&i| i != self_index).collect();

    if k < candidates.len() {
        candidates.select_nth_unstable_by(k - 1, |&a, &b| rank_order(row, a, b));
        candidates.truncate(k);
    }
    candidates.sort_unstable_by(|&a, &b| rank_order(row, a, b));

    candidates
}

/// Every index except `self_index`, fully sorted with the same ordering as
/// [`select_top_k`].
///
/// O(N log N); useful as a baseline and when the whole ranking is needed.
pub fn rank_all(row: &[f32], self_index: usize) -> Vec<usize> {
    let mut ranked: Vec<usize> = (0..row.len()).filter(|&i| i != self_index).collect();
    ranked.sort_by(|&a, &b| rank_order(row, a, b));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// Deterministic pseudo-random rows (LCG) with plenty of repeated scores
    fn generate_row(len: usize, seed: u64) -> Vec<f32> {
        let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (0..len)
            .map(|_| {
                state = state
                    .wrapping_mul(6364136223846793005)
                    .wrapping_add(1442695040888963407);
                // 16 distinct values so ties are common
                ((state >> 33) % 16) as f32 / 16.0
            })
            .collect()
    }

    #[test]
    fn test_two_tied_best_scores() {
        let row = [0.1, 0.9, 0.9, 0.2, 0.05];
        assert_eq!(select_top_k(&row, 0, 2), vec![1, 2]);
    }

    #[test]
    fn test_k_clamped_to_remaining_items() {
        let row = [0.3, 1.0, 0.7];
        assert_eq!(select_top_k(&row, 1, 5), vec![2, 0]);
    }

    #[test]
    fn test_k_zero_is_empty() {
        assert!(select_top_k(&[0.5, 0.4, 0.3], 0, 0).is_empty());
    }

    #[test]
    fn test_single_item_row_is_empty() {
        assert!(select_top_k(&[1.0], 0, 5).is_empty());
    }

    #[test]
    fn test_empty_row_is_empty() {
        assert!(select_top_k(&[], 0, 5).is_empty());
    }

    #[test]
    fn test_self_index_out_of_range_is_empty() {
        assert!(select_top_k(&[0.1, 0.2], 2, 1).is_empty());
    }

    #[test]
    fn test_self_excluded_even_when_highest() {
        let row = [0.2, 0.3, 1.0, 0.1];
        assert_eq!(select_top_k(&row, 2, 2), vec![1, 0]);
    }

    #[test]
    fn test_self_excluded_when_everything_is_negative_infinity() {
        let row = [f32::NEG_INFINITY; 4];
        assert_eq!(select_top_k(&row, 0, 3), vec![1, 2, 3]);
        assert_eq!(select_top_k(&row, 3, 2), vec![0, 1]);
    }

    #[test]
    fn test_nan_ranks_last() {
        let row = [1.0, f32::NAN, f32::NEG_INFINITY, 0.5];
        assert_eq!(select_top_k(&row, 0, 3), vec![3, 2, 1]);
        assert_eq!(select_top_k(&row, 0, 1), vec![3]);
    }

    #[test]
    fn test_ties_broken_by_lower_index() {
        let row = [0.5, 0.5, 0.9, 0.5, 0.5];
        assert_eq!(select_top_k(&row, 2, 2), vec![0, 1]);
        assert_eq!(select_top_k(&row, 0, 3), vec![2, 1, 3]);
    }

    #[test]
    fn test_matches_full_sort_prefix() {
        for seed in 0..200u64 {
            let len = 1 + (seed as usize % 40);
            let row = generate_row(len, seed);
            let self_index = (seed as usize * 7) % len;
            let full = rank_all(&row, self_index);

            for k in [0, 1, 2, 5, len / 2, len, len + 3] {
                let expected: Vec<usize> = full.iter().copied().take(k).collect();
                assert_eq!(
                    select_top_k(&row, self_index, k),
                    expected,
                    "seed={seed} len={len} self={self_index} k={k}"
                );
            }
        }
    }

    #[test]
    fn test_result_properties() {
        for seed in 0..100u64 {
            let len = 2 + (seed as usize % 30);
            let row = generate_row(len, seed + 1000);
            let self_index = seed as usize % len;
            let k = seed as usize % (len + 2);

            let result = select_top_k(&row, self_index, k);

            // Length is exactly min(k, len - 1)
            assert_eq!(result.len(), k.min(len - 1));
            // Never the query itself
            assert!(!result.contains(&self_index));
            // No duplicates
            let unique: HashSet<_> = result.iter().collect();
            assert_eq!(unique.len(), result.len());
            // Descending by score
            assert!(result.windows(2).all(|w| row[w[0]] >= row[w[1]]));
            // Nothing left out scores higher than the worst selected
            if let Some(&last) = result.last() {
                for i in (0..len).filter(|i| *i != self_index && !result.contains(i)) {
                    assert!(row[i] <= row[last]);
                }
            }
        }
    }

    #[test]
    fn test_k_larger_than_row_returns_all_other_indices() {
        let row = generate_row(12, 42);
        let result = select_top_k(&row, 5, 100);
        let expected: HashSet<usize> = (0..12).filter(|&i| i != 5).collect();
        assert_eq!(result.iter().copied().collect::<HashSet<_>>(), expected);
    }

    #[test]
    fn test_idempotent() {
        let row = generate_row(64, 7);
        assert_eq!(select_top_k(&row, 3, 10), select_top_k(&row, 3, 10));
    }
}
