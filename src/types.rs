//! Type aliases and shared types for BPE training and encoding.
//!
//! These type aliases provide semantic clarity throughout the codebase.

use std::{collections::HashMap, fmt};

/// Represents a token identifier in the vocabulary.
///
/// IDs `0..256` are the raw byte values; every merge learned during training
/// mints the next ID starting at 256.
pub type Token = usize;

/// Frequency count for token pairs.
pub type TokenFreq = usize;

/// A sequence of raw bytes.
pub type ByteSeq = Vec<u8>;

/// Number of base tokens, one per possible byte value.
pub const NUM_BYTE_TOKENS: usize = 256;

/// A pair of adjacent tokens.
///
/// Used as a key for looking up merge rules during encoding and for
/// tracking pair frequencies during training. Ordering is by first token,
/// then second token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenPair(pub Token, pub Token);

impl From<(Token, Token)> for TokenPair {
    fn from((left, right): (Token, Token)) -> Self {
        Self(left, right)
    }
}

impl From<TokenPair> for (Token, Token) {
    fn from(pair: TokenPair) -> Self {
        (pair.0, pair.1)
    }
}

impl fmt::Display for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

/// Occurrence count of every adjacent pair in one token sequence.
pub type PairCounts = HashMap<TokenPair, TokenFreq>;
