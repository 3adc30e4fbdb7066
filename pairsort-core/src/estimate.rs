/// Worst-case answers to insert one item into a sorted run of `ordered_len`:
/// ceil(log2(ordered_len + 1)), and 0 for an empty run.
fn comparisons_to_insert(ordered_len: usize) -> usize {
    (ordered_len + 1).next_power_of_two().trailing_zeros() as usize
}

/// Worst-case answers to merge `new_count` items into an existing ranking of
/// `existing_len` items.
///
/// Each new item inserts into a run one longer than the last, so the k-th
/// insertion (zero-based) costs `comparisons_to_insert(existing_len + k)`.
/// Callers use these budgets up front ("at most 17 questions") and to show
/// how many questions can still be left.
pub fn max_comparisons_partial(existing_len: usize, new_count: usize) -> usize {
    (0..new_count)
        .map(|k| comparisons_to_insert(existing_len + k))
        .sum()
}

/// Worst-case answers to rank `num_items` from scratch.
///
/// The first item seeds the run for free; the rest insert one by one. This
/// is exactly a merge into an empty ranking.
pub fn max_comparisons_full(num_items: usize) -> usize {
    max_comparisons_partial(0, num_items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_budget_small_counts() {
        assert_eq!(max_comparisons_full(0), 0);
        assert_eq!(max_comparisons_full(1), 0);
        assert_eq!(max_comparisons_full(2), 1);
        assert_eq!(max_comparisons_full(3), 3);
        assert_eq!(max_comparisons_full(4), 5);
        assert_eq!(max_comparisons_full(5), 8);
    }

    #[test]
    fn test_full_budget_power_of_two_boundary() {
        // 1 + 2 + 2 + 3 + 3 + 3 + 3 = 17, then eight 4-answer insertions.
        assert_eq!(max_comparisons_full(8), 17);
        assert_eq!(max_comparisons_full(16), 49);
    }

    #[test]
    fn test_partial_budget_counts_growing_runs() {
        // One item into three: ceil(log2(4)) = 2.
        assert_eq!(max_comparisons_partial(3, 1), 2);
        // Runs of 3, 4, 5: 2 + 3 + 3.
        assert_eq!(max_comparisons_partial(3, 3), 8);
        assert_eq!(max_comparisons_partial(1, 1), 1);
        assert_eq!(max_comparisons_partial(100, 0), 0);
    }

    #[test]
    fn test_budgets_grow_monotonically() {
        for n in 0..64 {
            assert!(max_comparisons_full(n) <= max_comparisons_full(n + 1));
            assert!(
                max_comparisons_partial(n, 3) <= max_comparisons_partial(n + 1, 3)
            );
        }
    }
}
