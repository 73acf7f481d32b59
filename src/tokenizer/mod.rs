//! Token counting.
//!
//! The aggregator only needs "text in, token count out". [`TokenCounter`]
//! captures that, so the BPE tokenizer can be swapped for a deterministic
//! counter in tests. Any `Fn(&str) -> usize` is a counter.

use tiktoken_rs::CoreBPE;
use tracing::{debug, warn};

use crate::error::{Result, UsageError};

/// Default model identifier used to select an encoding.
pub const DEFAULT_MODEL: &str = "gpt-4";

/// Encoding used when the model identifier is not recognized.
pub const FALLBACK_ENCODING: &str = "cl100k_base";

/// Counts tokens in a piece of text.
pub trait TokenCounter {
    /// Number of tokens in `text`.
    fn count(&self, text: &str) -> usize;
}

impl<F> TokenCounter for F
where
    F: Fn(&str) -> usize,
{
    fn count(&self, text: &str) -> usize {
        self(text)
    }
}

/// Which encoding a [`TiktokenCounter`] ended up with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodingSource {
    /// Encoding resolved from the model identifier.
    Model(String),
    /// Model unknown; fell back to [`FALLBACK_ENCODING`].
    Fallback,
}

/// BPE token counter backed by tiktoken encodings.
pub struct TiktokenCounter {
    bpe: CoreBPE,
    source: EncodingSource,
}

impl std::fmt::Debug for TiktokenCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TiktokenCounter")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl TiktokenCounter {
    /// Select the encoding for `model`, falling back to `cl100k_base`.
    pub fn for_model(model: &str) -> Result<Self> {
        match tiktoken_rs::get_bpe_from_model(model) {
            Ok(bpe) => {
                debug!(model, "Using model encoding");
                Ok(Self {
                    bpe,
                    source: EncodingSource::Model(model.to_string()),
                })
            }
            Err(e) => {
                warn!(model, error = %e, "Unknown model, falling back to {FALLBACK_ENCODING}");
                let bpe = tiktoken_rs::cl100k_base().map_err(|e| UsageError::TokenizerError {
                    model: model.to_string(),
                    message: e.to_string(),
                })?;
                Ok(Self {
                    bpe,
                    source: EncodingSource::Fallback,
                })
            }
        }
    }

    /// Where the encoding came from.
    pub fn source(&self) -> &EncodingSource {
        &self.source
    }

    /// Short label for logs and reports.
    pub fn encoding_label(&self) -> &str {
        match &self.source {
            EncodingSource::Model(model) => model,
            EncodingSource::Fallback => FALLBACK_ENCODING,
        }
    }
}

impl TokenCounter for TiktokenCounter {
    fn count(&self, text: &str) -> usize {
        if text.is_empty() {
            return 0;
        }
        self.bpe.encode_ordinary(text).len()
    }
}

/// Number of whitespace-separated words in `text`.
///
/// The ASCII information separators `\x1c`..=`\x1f` count as whitespace too.
pub fn count_words(text: &str) -> usize {
    text.split(is_word_separator)
        .filter(|word| !word.is_empty())
        .count()
}

fn is_word_separator(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_counter() {
        let counter = |text: &str| text.len();
        assert_eq!(counter.count("abcd"), 4);
    }

    #[test]
    fn test_known_model() {
        let counter = TiktokenCounter::for_model("gpt-4").unwrap();
        assert_eq!(counter.source(), &EncodingSource::Model("gpt-4".to_string()));
        assert_eq!(counter.count(""), 0);
        assert!(counter.count("hello world") >= 2);
    }

    #[test]
    fn test_unknown_model_falls_back() {
        let counter = TiktokenCounter::for_model("definitely-not-a-model").unwrap();
        assert_eq!(counter.source(), &EncodingSource::Fallback);
        assert_eq!(counter.encoding_label(), "cl100k_base");
        assert_eq!(counter.count("hello"), 1);
    }

    #[test]
    fn test_count_words() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("  one\ttwo\nthree  "), 3);
        assert_eq!(count_words("a  b"), 2);
    }

    #[test]
    fn test_count_words_information_separators() {
        assert_eq!(count_words("one\x1ctwo\x1dthree\x1efour\x1ffive"), 5);
        assert_eq!(count_words("\x1f\x1f"), 0);
        assert_eq!(count_words("no\u{a0}break\u{3000}space"), 3);
    }
}
