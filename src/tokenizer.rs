//! Byte-level BPE tokenizer tying training, encoding and decoding together.
//!
//! The tokenizer owns a single [`BpeModel`]. Training replaces it; encoding
//! and decoding only read it, so a trained tokenizer can be shared across
//! Rayon workers for batch processing.

use indicatif::ParallelProgressIterator;
use rayon::prelude::*;

use crate::{
    config::TrainConfig,
    decoder,
    encoder,
    error::{DecodeError, EncodeError, ErrorMode, TrainError},
    model::BpeModel,
    progress::progress_bar,
    trainer::BPETrainer,
    types::{ByteSeq, Token, TokenPair},
};

/// BPE tokenizer over raw bytes, without any pre-splitting.
///
/// # Example
///
/// ```
/// use basic_bpe::BasicTokenizer;
///
/// let mut tokenizer = BasicTokenizer::new();
/// tokenizer.train("MY name is Rajdeep Aher", 260, false)?;
///
/// let ids = tokenizer.encode("abracadabra");
/// assert_eq!(tokenizer.decode(&ids)?, "abracadabra");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct BasicTokenizer {
    model: BpeModel,
}

impl BasicTokenizer {
    /// Creates an untrained tokenizer holding only the 256 byte tokens.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing model, e.g. one rebuilt with [`BpeModel::from_merges`].
    pub fn from_model(model: BpeModel) -> Self {
        Self { model }
    }

    /// Learns merges from `text` until the vocabulary reaches `vocab_size`.
    ///
    /// Returns the number of merges performed, which is lower than
    /// `vocab_size - 256` when the corpus runs out of pairs.
    ///
    /// # Errors
    ///
    /// Returns [`TrainError::ProgressBarSetup`] if the progress bar shown in
    /// verbose mode fails to build.
    pub fn train(
        &mut self,
        text: impl AsRef<[u8]>,
        vocab_size: usize,
        verbose: bool,
    ) -> Result<usize, TrainError> {
        self.train_with_config(text, &TrainConfig::new(vocab_size).verbose(verbose))
    }

    /// Learns merges from `text` according to `cfg`.
    ///
    /// Any previously learned merges are discarded.
    ///
    /// # Errors
    ///
    /// Returns [`TrainError::ProgressBarSetup`] if the progress bar shown in
    /// verbose mode fails to build.
    pub fn train_with_config(
        &mut self,
        text: impl AsRef<[u8]>,
        cfg: &TrainConfig,
    ) -> Result<usize, TrainError> {
        let mut trainer = BPETrainer::new(text.as_ref());
        let performed = trainer.train(cfg)?;
        self.model = trainer.into_model();
        Ok(performed)
    }

    /// Encodes text into token IDs.
    pub fn encode(&self, text: &str) -> Vec<Token> {
        self.encode_bytes(text.as_bytes())
    }

    /// Encodes raw bytes into token IDs.
    pub fn encode_bytes(&self, bytes: &[u8]) -> Vec<Token> {
        encoder::encode(bytes, &self.model)
    }

    /// Encode many texts in parallel using Rayon.
    ///
    /// Results are returned in the same order as `texts`.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::ProgressBarSetup`] if the progress bar template
    /// fails to compile.
    pub fn encode_batch(
        &self,
        texts: &[&str],
        show_progress: bool,
    ) -> Result<Vec<Vec<Token>>, EncodeError> {
        let pb = progress_bar(texts.len() as u64, "Encoding texts", show_progress)
            .map_err(EncodeError::ProgressBarSetup)?;

        Ok(texts
            .par_iter()
            .progress_with(pb)
            .map(|text| self.encode(text))
            .collect())
    }

    /// Decodes token IDs into text, failing on invalid UTF-8.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::UnknownToken`] if a token ID is not found in the
    /// vocabulary, or [`DecodeError::InvalidUtf8`] if the decoded bytes are
    /// not valid UTF-8.
    pub fn decode(&self, tokens: &[Token]) -> Result<String, DecodeError> {
        self.decode_with(tokens, ErrorMode::Strict)
    }

    /// Decodes token IDs into text using the given UTF-8 error handling.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::UnknownToken`] if a token ID is not found in the
    /// vocabulary, or [`DecodeError::InvalidUtf8`] if the decoded bytes are
    /// not valid UTF-8 (only in `Strict` mode).
    pub fn decode_with(&self, tokens: &[Token], errors: ErrorMode) -> Result<String, DecodeError> {
        decoder::decode_to_string(tokens, &self.model, errors)
    }

    /// Decodes token IDs into raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::UnknownToken`] if a token ID is not found in the
    /// vocabulary.
    pub fn decode_bytes(&self, tokens: &[Token]) -> Result<ByteSeq, DecodeError> {
        decoder::decode(tokens, &self.model)
    }

    /// Decodes multiple token sequences in parallel.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] from one of the failing sequences (not
    /// necessarily the earliest in input order), or
    /// [`DecodeError::ProgressBarSetup`] if the progress bar template fails
    /// to compile.
    pub fn decode_batch(
        &self,
        token_seqs: &[&[Token]],
        errors: ErrorMode,
        show_progress: bool,
    ) -> Result<Vec<String>, DecodeError> {
        let pb = progress_bar(token_seqs.len() as u64, "Decoding tokens", show_progress)
            .map_err(DecodeError::ProgressBarSetup)?;

        token_seqs
            .par_iter()
            .progress_with(pb)
            .map(|tokens| self.decode_with(tokens, errors))
            .collect()
    }

    /// Renders one vocabulary entry as text, replacing invalid UTF-8.
    ///
    /// Returns `None` for unknown token IDs.
    pub fn render_token(&self, token: Token) -> Option<String> {
        self.model
            .token_bytes(token)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// Returns the merge rules in the order they were learned.
    pub fn merge_history(&self) -> &[(TokenPair, Token)] {
        self.model.merge_history()
    }

    /// Returns the number of learned merges.
    pub fn num_merges(&self) -> usize {
        self.model.num_merges()
    }

    /// Returns the vocabulary size (number of tokens).
    pub fn vocab_size(&self) -> usize {
        self.model.vocab_size()
    }

    /// Returns the underlying model.
    pub fn model(&self) -> &BpeModel {
        &self.model
    }
}
