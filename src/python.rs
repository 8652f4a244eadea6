//! PyO3 bindings exposing [`BasicTokenizer`] as a Python extension module.

use pyo3::{exceptions::PyValueError, prelude::*};

use crate::{error::ErrorMode, tokenizer::BasicTokenizer, types::Token};

/// Python wrapper for the byte-level BPE tokenizer.
#[pyclass(name = "BasicTokenizer")]
pub struct PyBasicTokenizer {
    tokenizer: BasicTokenizer,
}

#[pymethods]
impl PyBasicTokenizer {
    #[new]
    fn new() -> Self {
        PyBasicTokenizer {
            tokenizer: BasicTokenizer::new(),
        }
    }

    /// Learns merges from `text`; returns the number of merges performed.
    ///
    /// With `verbose=True` the progress bar is drawn on stderr, but the
    /// per-merge lines go through the `log` facade. Python installs no `log`
    /// backend, so those lines stay silent unless a bridge such as `pyo3-log`
    /// is initialised by the extension.
    #[pyo3(signature = (text, vocab_size, verbose=false))]
    fn train(&mut self, text: &str, vocab_size: usize, verbose: bool) -> PyResult<usize> {
        self.tokenizer
            .train(text, vocab_size, verbose)
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }

    fn encode(&self, text: &str) -> Vec<Token> {
        self.tokenizer.encode(text)
    }

    #[pyo3(signature = (ids, errors="strict"))]
    fn decode(&self, ids: Vec<Token>, errors: &str) -> PyResult<String> {
        let mode: ErrorMode = errors.parse().map_err(PyValueError::new_err)?;
        self.tokenizer
            .decode_with(&ids, mode)
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }

    fn merge_history(&self) -> Vec<((Token, Token), Token)> {
        self.tokenizer
            .merge_history()
            .iter()
            .map(|&(pair, tok)| (pair.into(), tok))
            .collect()
    }

    fn render_token(&self, id: Token) -> Option<String> {
        self.tokenizer.render_token(id)
    }

    fn vocab_size(&self) -> usize {
        self.tokenizer.vocab_size()
    }
}

#[pymodule]
fn _basic_bpe(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyBasicTokenizer>()?;
    Ok(())
}
