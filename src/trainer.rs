//! Core BPE training loop.
//!
//! Every step recounts all adjacent pairs of the working sequence, merges
//! the most frequent one into a freshly minted token and rewrites the
//! sequence. Time complexity is O(M * N) for M merges over N tokens.

use log::{debug, info};

use crate::{
    config::TrainConfig,
    error::TrainError,
    merge::merge,
    model::BpeModel,
    progress::progress_bar,
    stats::{get_stats, most_frequent_pair},
    types::{Token, TokenFreq, TokenPair},
};

/// One merge performed by [`BPETrainer::merge_step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeRecord {
    /// The pair that was merged.
    pub pair: TokenPair,
    /// The token minted for the pair.
    pub token: Token,
    /// How often the pair occurred before the merge.
    pub freq: TokenFreq,
}

impl MergeRecord {
    /// Formats the per-merge training report; `iteration` is 1-based.
    pub fn report(&self, iteration: usize, total: usize) -> String {
        format!(
            "merge {iteration}/{total}: {} -> {} ({} occurrences)",
            self.pair, self.token, self.freq
        )
    }
}

/// BPE training state: the working token sequence and the model learned so far.
#[derive(Debug, Clone)]
pub struct BPETrainer {
    /// Current token sequence, shrinking with every merge.
    tokens: Vec<Token>,

    /// Vocabulary and merge rules learned so far.
    model: BpeModel,
}

impl BPETrainer {
    /// Creates a trainer over raw corpus bytes, one token per byte.
    ///
    /// # Example
    /// ```
    /// use basic_bpe::BPETrainer;
    ///
    /// let mut trainer = BPETrainer::new(b"aaabdaaabac");
    /// trainer.merge_step();
    /// assert_eq!(trainer.get_encodings().len(), 9);
    /// ```
    pub fn new(text: &[u8]) -> Self {
        Self {
            tokens: text.iter().map(|&b| Token::from(b)).collect(),
            model: BpeModel::new(),
        }
    }

    /// Performs one merge of the most frequent pair.
    ///
    /// Ties between equally frequent pairs go to the smallest pair.
    /// Returns `None` if fewer than two tokens remain.
    pub fn merge_step(&mut self) -> Option<MergeRecord> {
        let stats = get_stats(&self.tokens);
        let (pair, freq) = most_frequent_pair(&stats)?;

        let token = self.model.add_merge(pair);
        self.tokens = merge(&self.tokens, pair, token);

        Some(MergeRecord { pair, token, freq })
    }

    /// Merges until the model holds `cfg.num_merges()` merges and returns how
    /// many were performed by this call.
    ///
    /// Merges learned by earlier calls count towards the target, so the
    /// vocabulary never grows past `cfg.vocab_size`. Stops early once no
    /// adjacent pair is left.
    ///
    /// # Errors
    ///
    /// Returns [`TrainError::ProgressBarSetup`] if the progress bar shown in
    /// verbose mode fails to build.
    pub fn train(&mut self, cfg: &TrainConfig) -> Result<usize, TrainError> {
        let num_merges = cfg.num_merges();
        let already = self.model.num_merges().min(num_merges);
        let pb = progress_bar(num_merges as u64, "Training merges", cfg.verbose)
            .map_err(TrainError::ProgressBarSetup)?;
        pb.set_position(already as u64);

        let mut performed = 0;
        for i in already..num_merges {
            let Some(record) = self.merge_step() else {
                debug!("no more pairs to merge after {i} merges");
                break;
            };
            performed += 1;

            let report = record.report(i + 1, num_merges);
            if cfg.verbose {
                pb.suspend(|| info!("{report}"));
            } else {
                debug!("{report}");
            }
            pb.inc(1);
        }

        pb.finish_and_clear();
        info!(
            "training finished: {performed} new merges, {}/{num_merges} total, vocab size {}, {} tokens remain",
            self.model.num_merges(),
            self.model.vocab_size(),
            self.tokens.len()
        );

        Ok(performed)
    }

    /// Get the current token sequence.
    pub fn get_encodings(&self) -> &[Token] {
        &self.tokens
    }

    /// Returns the model learned so far.
    pub fn model(&self) -> &BpeModel {
        &self.model
    }

    /// Consumes the trainer, returning the learned model.
    pub fn into_model(self) -> BpeModel {
        self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_merge() {
        let mut trainer = BPETrainer::new(b"aaabdaaabac");
        let merged = trainer.train(&TrainConfig::new(259)).expect("training failed");

        assert_eq!(merged, 3);
        // aa -> 256; (256, a) and (a, b) then tie at 2 and the smaller
        // (a, b) wins -> 257; finally (256, 257) -> 258
        assert_eq!(
            trainer.model().merge_history(),
            &[
                (TokenPair(97, 97), 256),
                (TokenPair(97, 98), 257),
                (TokenPair(256, 257), 258)
            ]
        );
        assert_eq!(trainer.get_encodings(), &[258, 100, 258, 97, 99]);
        assert_eq!(trainer.model().token_bytes(258), Some(&b"aaab"[..]));
    }

    #[test]
    fn test_merge_step_reports_frequency() {
        let mut trainer = BPETrainer::new(b"abab");
        let record = trainer.merge_step().expect("pairs available");
        assert_eq!(
            record,
            MergeRecord {
                pair: TokenPair(97, 98),
                token: 256,
                freq: 2
            }
        );
        assert_eq!(trainer.get_encodings(), &[256, 256]);
    }

    #[test]
    fn test_overlapping_run_merges_left_to_right() {
        let mut trainer = BPETrainer::new(b"aaa");
        let record = trainer.merge_step().expect("pairs available");
        assert_eq!(record.freq, 2);
        assert_eq!(trainer.get_encodings(), &[256, 97]);
    }

    #[test]
    fn test_tie_break_smallest_pair() {
        // every pair occurs once; (97, 122) is the smallest
        let mut trainer = BPETrainer::new(b"zyxaz");
        let record = trainer.merge_step().expect("pairs available");
        assert_eq!(record.pair, TokenPair(97, 122));
        assert_eq!(trainer.get_encodings(), &[122, 121, 120, 256]);
    }

    #[test]
    fn test_empty_sequence() {
        let mut trainer = BPETrainer::new(b"");
        assert_eq!(trainer.train(&TrainConfig::new(300)).expect("training failed"), 0);
        assert_eq!(trainer.get_encodings(), &[] as &[Token]);
        assert_eq!(trainer.model().vocab_size(), 256);
    }

    #[test]
    fn test_single_token() {
        let mut trainer = BPETrainer::new(b"x");
        assert!(trainer.merge_step().is_none());
        assert_eq!(trainer.get_encodings(), &[120]);
    }

    #[test]
    fn test_small_vocab_performs_no_merges() {
        let mut trainer = BPETrainer::new(b"hello hello");
        assert_eq!(trainer.train(&TrainConfig::new(256)).expect("training failed"), 0);
        assert_eq!(trainer.train(&TrainConfig::new(100)).expect("training failed"), 0);
        assert_eq!(trainer.model().num_merges(), 0);
    }

    #[test]
    fn test_stops_early_when_sequence_collapses() {
        let mut trainer = BPETrainer::new(b"abcd");
        let performed = trainer.train(&TrainConfig::new(1000)).expect("training failed");

        // 4 tokens collapse into one after 3 merges
        assert_eq!(performed, 3);
        assert_eq!(trainer.get_encodings().len(), 1);
        assert_eq!(trainer.model().vocab_size(), 259);
    }

    #[test]
    fn test_verbose_training() {
        let mut trainer = BPETrainer::new(b"MY name is Rajdeep Aher");
        let cfg = TrainConfig::new(260).verbose(true);
        assert_eq!(trainer.train(&cfg).expect("training failed"), 4);
        assert_eq!(trainer.into_model().vocab_size(), 260);
    }

    #[test]
    fn test_merge_report_format() {
        let mut trainer = BPETrainer::new(b"abab");
        let record = trainer.merge_step().expect("pairs available");
        assert_eq!(
            record.report(1, 4),
            "merge 1/4: (97, 98) -> 256 (2 occurrences)"
        );
    }

    #[test]
    fn test_repeated_train_respects_target() {
        let mut trainer = BPETrainer::new(b"the quick brown fox jumps over the lazy dog");
        let cfg = TrainConfig::new(260);

        assert_eq!(trainer.train(&cfg).expect("training failed"), 4);
        assert_eq!(trainer.train(&cfg).expect("training failed"), 0);
        assert_eq!(trainer.model().vocab_size(), cfg.vocab_size);

        // a larger target continues minting from the next free id
        assert_eq!(trainer.train(&TrainConfig::new(262)).expect("training failed"), 2);
        let ids: Vec<Token> = trainer.model().merge_history().iter().map(|&(_, tok)| tok).collect();
        assert_eq!(ids, (256..262).collect::<Vec<_>>());
    }
}
