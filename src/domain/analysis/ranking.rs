//! Dense ranking of scores.

/// Dense-ranks scores in descending order.
///
/// The highest score gets rank 1. Equal scores share a rank, and the next
/// distinct score gets the previous rank plus one, so ranks always form the
/// contiguous sequence `1..=k` for k distinct scores. The output is aligned
/// with the input; nothing is reordered.
///
/// Equality is exact. `NaN` never equals anything and would get a rank of
/// its own; the engine never produces one.
pub fn dense_rank(scores: &[f64]) -> Vec<u32> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

    let mut ranks = vec![0u32; scores.len()];
    let mut rank = 0u32;
    let mut previous: Option<f64> = None;

    for index in order {
        let score = scores[index];
        if previous != Some(score) {
            rank += 1;
            previous = Some(score);
        }
        ranks[index] = rank;
    }

    ranks
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_scores_have_no_ranks() {
        assert!(dense_rank(&[]).is_empty());
    }

    #[test]
    fn distinct_scores_rank_descending() {
        assert_eq!(dense_rank(&[0.2, 0.9, 0.5]), vec![3, 1, 2]);
    }

    #[test]
    fn ties_share_rank_without_gaps() {
        // 0.8 x2 -> 1, 0.5 -> 2 (not 3), 0.1 -> 3
        assert_eq!(dense_rank(&[0.5, 0.8, 0.1, 0.8]), vec![2, 1, 3, 1]);
    }

    #[test]
    fn all_equal_scores_are_all_first() {
        assert_eq!(dense_rank(&[0.5, 0.5, 0.5]), vec![1, 1, 1]);
    }

    proptest! {
        #[test]
        fn ranks_are_contiguous_from_one(scores in prop::collection::vec(0u8..10, 1..40)) {
            let scores: Vec<f64> = scores.into_iter().map(|s| f64::from(s) / 10.0).collect();
            let ranks = dense_rank(&scores);

            let mut distinct = ranks.clone();
            distinct.sort_unstable();
            distinct.dedup();
            let expected: Vec<u32> = (1..=distinct.len() as u32).collect();
            prop_assert_eq!(distinct, expected);
        }

        #[test]
        fn equal_scores_get_equal_ranks(scores in prop::collection::vec(0u8..5, 2..30)) {
            let scores: Vec<f64> = scores.into_iter().map(f64::from).collect();
            let ranks = dense_rank(&scores);

            for i in 0..scores.len() {
                for j in 0..scores.len() {
                    if scores[i] == scores[j] {
                        prop_assert_eq!(ranks[i], ranks[j]);
                    } else if scores[i] > scores[j] {
                        prop_assert!(ranks[i] < ranks[j]);
                    }
                }
            }
        }
    }
}
