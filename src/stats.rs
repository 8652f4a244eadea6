//! Adjacent pair statistics over a token sequence.

use std::collections::HashSet;

use crate::types::{PairCounts, Token, TokenPair};

/// Counts every adjacent pair in `ids`.
///
/// Every one of the `n - 1` windows is counted, so overlapping occurrences
/// contribute separately: `[1, 1, 1]` yields `{(1, 1): 2}`.
pub fn get_stats(ids: &[Token]) -> PairCounts {
    let mut counts = PairCounts::new();
    accumulate_stats(ids, &mut counts);
    counts
}

/// Adds the adjacent pair counts of `ids` into an existing mapping.
pub fn accumulate_stats(ids: &[Token], counts: &mut PairCounts) {
    for window in ids.windows(2) {
        *counts.entry(TokenPair(window[0], window[1])).or_insert(0) += 1;
    }
}

/// Returns the distinct adjacent pairs in `ids`, without counting them.
pub fn distinct_pairs(ids: &[Token]) -> HashSet<TokenPair> {
    ids.windows(2)
        .map(|window| TokenPair(window[0], window[1]))
        .collect()
}

/// Picks the most frequent pair.
///
/// Ties are broken by the smallest pair, comparing the first token and
/// then the second. Returns `None` when `counts` is empty.
pub fn most_frequent_pair(counts: &PairCounts) -> Option<(TokenPair, usize)> {
    counts
        .iter()
        .max_by(|(pair_a, freq_a), (pair_b, freq_b)| {
            // reversed pair comparison so the smaller pair is the "max"
            freq_a.cmp(freq_b).then_with(|| pair_b.cmp(pair_a))
        })
        .map(|(&pair, &freq)| (pair, freq))
}
