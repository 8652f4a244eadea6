//! BPE Decoder - maps token IDs back to bytes.

use crate::{
    error::{DecodeError, ErrorMode},
    model::BpeModel,
    types::{ByteSeq, Token},
};

/// Decodes a token sequence back into bytes.
///
/// # Errors
///
/// Returns [`DecodeError::UnknownToken`] for the first token ID that is not
/// in the vocabulary; no token is ever skipped.
pub fn decode(tokens: &[Token], model: &BpeModel) -> Result<ByteSeq, DecodeError> {
    let mut result = Vec::with_capacity(tokens.len());
    for &token in tokens {
        let bytes = model
            .token_bytes(token)
            .ok_or(DecodeError::UnknownToken(token))?;
        result.extend_from_slice(bytes);
    }
    Ok(result)
}

/// Decodes a token sequence into a string.
///
/// # Errors
///
/// Returns [`DecodeError::UnknownToken`] if a token ID is not found in the
/// vocabulary, or [`DecodeError::InvalidUtf8`] if the decoded bytes are not
/// valid UTF-8 (only in `Strict` mode).
pub fn decode_to_string(
    tokens: &[Token],
    model: &BpeModel,
    errors: ErrorMode,
) -> Result<String, DecodeError> {
    let bytes = decode(tokens, model)?;

    match errors {
        ErrorMode::Strict => String::from_utf8(bytes).map_err(DecodeError::InvalidUtf8),
        ErrorMode::Replace => Ok(String::from_utf8_lossy(&bytes).into_owned()),
    }
}
