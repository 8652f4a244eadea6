//! Error types for BPE tokenizer, model and trainer operations.

use std::{error::Error, fmt, str::FromStr};

use indicatif::style::TemplateError;

use crate::types::{Token, TokenPair};

/// What to do when decoded bytes are not valid UTF-8.
///
/// Only affects conversion to `String`; an unknown token ID is an error in
/// every mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail with [`DecodeError::InvalidUtf8`].
    #[default]
    Strict,
    /// Substitute U+FFFD for every invalid sequence.
    Replace,
}

impl FromStr for ErrorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "replace" => Ok(Self::Replace),
            other => Err(format!("unsupported UTF-8 error mode {other:?}, use strict or replace")),
        }
    }
}

/// Failure while turning token IDs back into bytes or text.
#[derive(Debug)]
pub enum DecodeError {
    /// The ID has no vocabulary entry.
    UnknownToken(Token),
    /// Strict mode met bytes that are not UTF-8.
    InvalidUtf8(std::string::FromUtf8Error),
    /// Progress bar template string was invalid.
    ProgressBarSetup(TemplateError),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownToken(t) => write!(f, "token {t} is not in the vocabulary"),
            Self::InvalidUtf8(e) => write!(f, "decoded bytes are not UTF-8: {e}"),
            Self::ProgressBarSetup(msg) => write!(f, "template parsing failed: {msg}"),
        }
    }
}

impl Error for DecodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidUtf8(e) => Some(e),
            Self::ProgressBarSetup(e) => Some(e),
            Self::UnknownToken(_) => None,
        }
    }
}

/// Errors that can occur during batch text encoding.
///
/// Encoding a single text never fails; only the progress reporting
/// around batches can.
#[derive(Debug)]
pub enum EncodeError {
    /// Progress bar template string was invalid.
    ProgressBarSetup(TemplateError),
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProgressBarSetup(msg) => write!(f, "template parsing failed: {msg}"),
        }
    }
}

impl Error for EncodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ProgressBarSetup(e) => Some(e),
        }
    }
}

/// Errors that can occur during training.
///
/// A small vocabulary or a short corpus is not an error: training
/// simply performs fewer merges.
#[derive(Debug)]
pub enum TrainError {
    /// Progress bar template string was invalid.
    ProgressBarSetup(TemplateError),
}

impl fmt::Display for TrainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProgressBarSetup(msg) => write!(f, "template parsing failed: {msg}"),
        }
    }
}

impl Error for TrainError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ProgressBarSetup(e) => Some(e),
        }
    }
}

/// Errors that can occur when rebuilding a model from a merge list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// Merged token IDs must be minted consecutively starting at 256.
    NonSequentialMerge { expected: Token, found: Token },
    /// A merge refers to a token that does not exist yet.
    UndefinedToken { pair: TokenPair, token: Token },
    /// The same pair was given two merge rules.
    DuplicateMerge(TokenPair),
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonSequentialMerge { expected, found } => {
                write!(f, "non-sequential merge token: expected {expected}, found {found}")
            }
            Self::UndefinedToken { pair, token } => {
                write!(f, "merge {pair} refers to undefined token {token}")
            }
            Self::DuplicateMerge(pair) => write!(f, "duplicate merge rule for pair {pair}"),
        }
    }
}

impl Error for ModelError {}
