//! Byte-level BPE (Byte-Pair Encoding) tokenizer.
//!
//! Training repeatedly merges the most frequent adjacent token pair into a
//! new token. Encoding replays the learned merges in the order they were
//! learned, and decoding concatenates the byte sequence of every token.
//!
//! Python bindings are available behind the `python` feature.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(unused_must_use)]

mod config;
mod decoder;
mod encoder;
mod error;
mod merge;
mod model;
mod progress;
mod stats;
mod tokenizer;
mod trainer;
mod types;

#[cfg(feature = "python")]
mod python;

pub use config::TrainConfig;
pub use decoder::{decode, decode_to_string};
pub use encoder::{encode, encode_tokens};
pub use error::{DecodeError, EncodeError, ErrorMode, ModelError, TrainError};
pub use merge::merge;
pub use model::BpeModel;
pub use stats::{accumulate_stats, distinct_pairs, get_stats, most_frequent_pair};
pub use tokenizer::BasicTokenizer;
pub use trainer::{BPETrainer, MergeRecord};
pub use types::{ByteSeq, NUM_BYTE_TOKENS, PairCounts, Token, TokenFreq, TokenPair};
