//! Fixed-Length Question Selection
//!
//! The player flow always runs on exactly [`QUESTION_SET_SIZE`] questions.
//! The pool is shuffled uniformly (no fixed seed; every call may return a
//! different order), then cycled up or truncated down to the fixed size.
//! The contract holds for any non-empty pool.

use rand::seq::SliceRandom;

/// Number of questions served per quiz run
pub const QUESTION_SET_SIZE: usize = 5;

/// Shuffle a question pool and fit it to the fixed set size
///
/// - fewer than 5 questions: repeat items by cycling the shuffled order
/// - more than 5 questions: keep the first 5 of the shuffled order
/// - empty pool: returned unchanged (callers reject that case up front)
pub fn fixed_length_set<T: Clone>(mut pool: Vec<T>) -> Vec<T> {
    if pool.is_empty() {
        return pool;
    }

    pool.shuffle(&mut rand::thread_rng());
    cycle_to_size(pool, QUESTION_SET_SIZE)
}

/// Cycle a non-empty list up to `size` items, or truncate it down
fn cycle_to_size<T: Clone>(mut items: Vec<T>, size: usize) -> Vec<T> {
    let original = items.len();
    while items.len() < size {
        let take = original.min(size - items.len());
        let repeats: Vec<T> = items[..take].to_vec();
        items.extend(repeats);
    }
    items.truncate(size);
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_exactly_five_for_all_pool_sizes() {
        // Pad-up and truncate-down cases from the selection contract
        for pool_size in [1usize, 3, 5, 12] {
            let pool: Vec<usize> = (0..pool_size).collect();
            let set = fixed_length_set(pool);
            assert_eq!(set.len(), QUESTION_SET_SIZE, "pool size {pool_size}");
        }
    }

    #[test]
    fn test_single_question_repeats() {
        let set = fixed_length_set(vec![42]);
        assert_eq!(set, vec![42, 42, 42, 42, 42]);
    }

    #[test]
    fn test_padding_only_repeats_pool_members() {
        let set = fixed_length_set(vec![1, 2]);
        assert_eq!(set.len(), 5);
        assert!(set.iter().all(|item| [1, 2].contains(item)));
        // Both members appear: cycling starts from the shuffled pool
        let distinct: HashSet<_> = set.iter().collect();
        assert_eq!(distinct.len(), 2);
    }

    #[test]
    fn test_truncation_keeps_distinct_items() {
        let set = fixed_length_set((0..12).collect::<Vec<_>>());
        let distinct: HashSet<_> = set.iter().collect();
        assert_eq!(distinct.len(), QUESTION_SET_SIZE);
    }

    #[test]
    fn test_empty_pool_stays_empty() {
        let set: Vec<u8> = fixed_length_set(Vec::new());
        assert!(set.is_empty());
    }

    #[test]
    fn test_shuffle_is_not_fixed() {
        // With 12 items there are enough permutations that 20 draws
        // producing identical prefixes would mean the shuffle is broken.
        let pool: Vec<usize> = (0..12).collect();
        let first = fixed_length_set(pool.clone());
        let all_same = (0..20).all(|_| fixed_length_set(pool.clone()) == first);
        assert!(!all_same);
    }
}
