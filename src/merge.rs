//! Rewrites a token sequence by applying one merge rule.

use crate::types::{Token, TokenPair};

/// Replaces every occurrence of `pair` in `ids` with `idx`.
///
/// The scan is greedy from left to right and occurrences never overlap:
/// once a pair is merged both of its tokens are consumed, so
/// `[1, 1, 1]` with `(1, 1) -> 99` becomes `[99, 1]`.
///
/// # Example
///
/// ```
/// use basic_bpe::{merge, TokenPair};
///
/// assert_eq!(merge(&[1, 2, 3, 1, 2], TokenPair(1, 2), 4), vec![4, 3, 4]);
/// ```
pub fn merge(ids: &[Token], pair: TokenPair, idx: Token) -> Vec<Token> {
    let mut merged = Vec::with_capacity(ids.len());
    let mut i = 0;

    while i < ids.len() {
        if i + 1 < ids.len() && ids[i] == pair.0 && ids[i + 1] == pair.1 {
            merged.push(idx);
            i += 2;
        } else {
            merged.push(ids[i]);
            i += 1;
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_all_occurrences() {
        let merged = merge(&[1, 2, 3, 1, 2], TokenPair(1, 2), 4);
        assert_eq!(merged, vec![4, 3, 4]);
    }

    #[test]
    fn test_merge_non_overlapping_left_to_right() {
        assert_eq!(merge(&[1, 1, 1], TokenPair(1, 1), 99), vec![99, 1]);
        assert_eq!(merge(&[1, 1, 1, 1], TokenPair(1, 1), 99), vec![99, 99]);
    }

    #[test]
    fn test_trailing_token_kept() {
        assert_eq!(merge(&[1, 2, 1], TokenPair(1, 2), 7), vec![7, 1]);
        assert_eq!(merge(&[5], TokenPair(5, 5), 7), vec![5]);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(merge(&[], TokenPair(1, 2), 3), Vec::<Token>::new());
    }

    #[test]
    fn test_length_shrinks_only_on_match() {
        let ids = [3, 4, 5, 3, 4];
        let merged = merge(&ids, TokenPair(3, 4), 300);
        assert_eq!(merged.len(), ids.len() - 2);

        // reversed pair never occurs adjacently
        let untouched = merge(&ids, TokenPair(4, 3), 300);
        assert_eq!(untouched, ids.to_vec());
    }
}
