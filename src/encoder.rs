//! BPE Encoder - applies learned merge rules to raw bytes.
//!
//! The encoder applies merges in the order they were learned during training:
//! on every pass it looks at the distinct adjacent pairs, picks the one whose
//! merged token is the lowest (learned earliest) and rewrites the whole
//! sequence with it. Encoding never mints new tokens.

use crate::{merge::merge, model::BpeModel, stats::distinct_pairs, types::Token};

/// Encodes raw bytes into token IDs.
///
/// # Example
///
/// ```
/// use basic_bpe::{BpeModel, encode};
///
/// let model = BpeModel::from_merges(vec![((97, 98), 256)])?;
/// assert_eq!(encode(b"abc", &model), vec![256, 99]);
/// # Ok::<(), basic_bpe::ModelError>(())
/// ```
pub fn encode(text: &[u8], model: &BpeModel) -> Vec<Token> {
    let tokens = text.iter().map(|&b| Token::from(b)).collect();
    encode_tokens(tokens, model)
}

/// Applies learned merges to an existing token sequence until none applies.
///
/// Feeding the output back in returns it unchanged.
pub fn encode_tokens(mut tokens: Vec<Token>, model: &BpeModel) -> Vec<Token> {
    while tokens.len() >= 2 {
        // lowest merged token = earliest learned rule
        let best = distinct_pairs(&tokens)
            .into_iter()
            .filter_map(|pair| model.get_merge(pair.0, pair.1).map(|tok| (tok, pair)))
            .min();

        let Some((tok, pair)) = best else {
            break;
        };
        tokens = merge(&tokens, pair, tok);
    }

    tokens
}
