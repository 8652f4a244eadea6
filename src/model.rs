//! BPE model: the vocabulary and the merge table learned during training.
//!
//! The vocabulary stores the fully expanded byte sequence of every token so
//! decoding is a single lookup per ID. The merge table keeps both a hash
//! index for encoding and the insertion order, which is the merge priority.

use std::collections::HashMap;

use crate::{
    error::ModelError,
    types::{ByteSeq, NUM_BYTE_TOKENS, Token, TokenPair},
};

/// Vocabulary and merge rules shared by the encoder and decoder.
///
/// # Example
///
/// ```
/// use basic_bpe::BpeModel;
///
/// let model = BpeModel::from_merges(vec![((97, 98), 256), ((256, 99), 257)])?;
/// assert_eq!(model.vocab_size(), 258);
/// assert_eq!(model.token_bytes(257), Some(&b"abc"[..]));
/// # Ok::<(), basic_bpe::ModelError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BpeModel {
    /// Maps token pairs to the merged token that replaces them.
    merges: HashMap<TokenPair, Token>,

    /// Merge rules in the order they were learned.
    merge_history: Vec<(TokenPair, Token)>,

    /// Maps token IDs to their byte sequences.
    ///
    /// - vocab[0..256]: Base vocabulary (single bytes)
    /// - vocab[256..]: Merged tokens (concatenated byte sequences)
    vocab: Vec<ByteSeq>,
}

impl Default for BpeModel {
    fn default() -> Self {
        Self::new()
    }
}

impl BpeModel {
    /// Creates a model holding only the 256 single-byte tokens.
    pub fn new() -> Self {
        let vocab = (0..NUM_BYTE_TOKENS).map(|b| vec![b as u8]).collect();

        Self {
            merges: HashMap::new(),
            merge_history: Vec::new(),
            vocab,
        }
    }

    /// Rebuilds a model from an ordered merge list.
    ///
    /// # Arguments
    ///
    /// * `merge_history` - Merge rules as `((left, right), merged)`.
    ///   Order determines merge priority (earlier = higher priority).
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NonSequentialMerge`] if merged IDs are not
    /// `256, 257, ...` in order, [`ModelError::UndefinedToken`] if a rule
    /// refers to a token not defined by an earlier rule, or
    /// [`ModelError::DuplicateMerge`] if a pair appears twice.
    pub fn from_merges(
        merge_history: impl IntoIterator<Item = ((Token, Token), Token)>,
    ) -> Result<Self, ModelError> {
        let mut model = Self::new();

        for ((left, right), tok) in merge_history {
            let pair = TokenPair(left, right);
            let expected = model.vocab_size();

            if tok != expected {
                return Err(ModelError::NonSequentialMerge {
                    expected,
                    found: tok,
                });
            }
            if let Some(&token) = [left, right].iter().find(|&&t| t >= expected) {
                return Err(ModelError::UndefinedToken { pair, token });
            }
            if model.merges.contains_key(&pair) {
                return Err(ModelError::DuplicateMerge(pair));
            }

            model.add_merge(pair);
        }

        Ok(model)
    }

    /// Records a new merge rule and mints the next token ID for it.
    ///
    /// The merged token's bytes are the concatenation of both halves.
    /// Both tokens of `pair` must already be in the vocabulary.
    pub(crate) fn add_merge(&mut self, pair: TokenPair) -> Token {
        let tok = self.vocab.len();

        let (left, right) = (&self.vocab[pair.0], &self.vocab[pair.1]);
        let mut merged_bytes = Vec::with_capacity(left.len() + right.len());
        merged_bytes.extend_from_slice(left);
        merged_bytes.extend_from_slice(right);

        self.vocab.push(merged_bytes);
        self.merges.insert(pair, tok);
        self.merge_history.push((pair, tok));

        tok
    }

    /// Looks up the merged token for a pair, if a rule exists.
    pub fn get_merge(&self, left: Token, right: Token) -> Option<Token> {
        self.merges.get(&TokenPair(left, right)).copied()
    }

    /// Checks if a token pair can be merged according to learned rules.
    pub fn can_merge(&self, left: Token, right: Token) -> bool {
        self.merges.contains_key(&TokenPair(left, right))
    }

    /// Returns the merge table keyed by pair.
    pub fn merges(&self) -> &HashMap<TokenPair, Token> {
        &self.merges
    }

    /// Returns the merge rules in the order they were learned.
    pub fn merge_history(&self) -> &[(TokenPair, Token)] {
        &self.merge_history
    }

    /// Returns the total number of merge rules.
    pub fn num_merges(&self) -> usize {
        self.merge_history.len()
    }

    /// Returns the vocabulary, indexed by token ID.
    pub fn vocab(&self) -> &[ByteSeq] {
        &self.vocab
    }

    /// Returns the number of tokens, always `256 + num_merges()`.
    pub fn vocab_size(&self) -> usize {
        self.vocab.len()
    }

    /// Returns the byte sequence of one token.
    pub fn token_bytes(&self, token: Token) -> Option<&[u8]> {
        self.vocab.get(token).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_byte_identities() {
        let model = BpeModel::new();
        assert_eq!(model.vocab_size(), 256);
        assert_eq!(model.num_merges(), 0);
        for b in 0..=255u8 {
            assert_eq!(model.token_bytes(b as Token), Some(&[b][..]));
        }
        assert_eq!(model.token_bytes(256), None);
    }

    #[test]
    fn test_add_merge_concatenates() {
        let mut model = BpeModel::new();
        let ab = model.add_merge(TokenPair(97, 98));
        let abab = model.add_merge(TokenPair(ab, ab));

        assert_eq!(ab, 256);
        assert_eq!(abab, 257);
        assert_eq!(model.token_bytes(abab), Some(&b"abab"[..]));
        assert_eq!(model.get_merge(97, 98), Some(256));
        assert!(model.can_merge(256, 256));
        assert!(!model.can_merge(98, 97));
        assert_eq!(
            model.merge_history(),
            &[(TokenPair(97, 98), 256), (TokenPair(256, 256), 257)]
        );
    }

    #[test]
    fn test_from_merges_nested() {
        let history = vec![((97, 98), 256), ((256, 99), 257)];
        let model = BpeModel::from_merges(history).expect("valid merge history");

        assert_eq!(model.vocab_size(), 258);
        assert_eq!(model.vocab()[97], vec![97]);
        assert_eq!(model.vocab()[256], vec![97, 98]);
        assert_eq!(model.vocab()[257], vec![97, 98, 99]);
        assert_eq!(model.merges().len(), 2);
    }

    #[test]
    fn test_from_merges_rejects_gap() {
        let result = BpeModel::from_merges(vec![((97, 98), 300)]);
        assert_eq!(
            result,
            Err(ModelError::NonSequentialMerge {
                expected: 256,
                found: 300
            })
        );
    }

    #[test]
    fn test_from_merges_rejects_undefined_token() {
        let result = BpeModel::from_merges(vec![((97, 256), 256)]);
        assert_eq!(
            result,
            Err(ModelError::UndefinedToken {
                pair: TokenPair(97, 256),
                token: 256
            })
        );
    }

    #[test]
    fn test_from_merges_rejects_duplicate_pair() {
        let result = BpeModel::from_merges(vec![((97, 98), 256), ((97, 98), 257)]);
        assert_eq!(result, Err(ModelError::DuplicateMerge(TokenPair(97, 98))));
    }

    #[test]
    fn test_from_merges_round_trips_history() {
        let mut model = BpeModel::new();
        model.add_merge(TokenPair(1, 2));
        model.add_merge(TokenPair(256, 3));

        let history = model
            .merge_history()
            .iter()
            .map(|&(pair, tok)| (pair.into(), tok));
        let rebuilt = BpeModel::from_merges(history).expect("valid merge history");
        assert_eq!(rebuilt, model);
    }
}
