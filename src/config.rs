//! Training configuration.

use crate::types::NUM_BYTE_TOKENS;

/// Settings for one training run.
///
/// # Example
///
/// ```
/// use basic_bpe::TrainConfig;
///
/// let cfg = TrainConfig::new(260).verbose(true);
/// assert_eq!(cfg.num_merges(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainConfig {
    /// Target vocabulary size, including the 256 byte tokens.
    pub vocab_size: usize,
    /// Report every merge and show a progress bar.
    pub verbose: bool,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            vocab_size: NUM_BYTE_TOKENS,
            verbose: false,
        }
    }
}

impl TrainConfig {
    /// Creates a quiet configuration for the given target vocabulary size.
    pub fn new(vocab_size: usize) -> Self {
        Self {
            vocab_size,
            ..Self::default()
        }
    }

    /// Sets the target vocabulary size.
    #[must_use]
    pub fn vocab_size(mut self, vocab_size: usize) -> Self {
        self.vocab_size = vocab_size;
        self
    }

    /// Enables or disables per-merge reporting.
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Number of merges requested. Zero when `vocab_size <= 256`.
    pub fn num_merges(&self) -> usize {
        self.vocab_size.saturating_sub(NUM_BYTE_TOKENS)
    }
}
