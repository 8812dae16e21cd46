//! Tokenizer trait — the narrow NLP capability the classifier depends on.
//!
//! The classifier only ever needs two things from an NLP library: the
//! literal text of each token, and a list of named entities. Anything that
//! can provide those (a rule-based splitter, a remote service, a test stub)
//! can be plugged in behind this trait.

use crate::error::TokenizerError;
use serde::{Deserialize, Serialize};

/// A single token. `text` is already lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
}

impl Token {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into().to_lowercase(),
        }
    }
}

/// The tokenizer capability.
///
/// Implementations may be slow; callers run them off the async executor.
pub trait Tokenizer: Send + Sync {
    /// A short name for diagnostics (e.g. "word").
    fn name(&self) -> &str;

    /// Split `text` into tokens.
    fn tokenize(&self, text: &str) -> Result<Vec<Token>, TokenizerError>;

    /// Extract named-entity strings from `text`.
    fn extract_entities(&self, text: &str) -> Result<Vec<String>, TokenizerError>;
}
