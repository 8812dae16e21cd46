//! Tokenizer adapter — the classifier's only view of the NLP capability.
//!
//! Two explicit construction paths:
//! - [`TokenizerAdapter::new`] wraps a working tokenizer
//! - [`TokenizerAdapter::unavailable`] stands in when none could be set up
//!
//! Either way the adapter never fails: an unavailable capability, or one that
//! returns an error, yields empty token and entity lists.

use admitbot_core::tokenizer::{Token, Tokenizer};
use std::sync::Arc;
use tracing::warn;

use crate::word::WordTokenizer;

#[derive(Clone)]
pub struct TokenizerAdapter {
    inner: Option<Arc<dyn Tokenizer>>,
}

impl TokenizerAdapter {
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        Self {
            inner: Some(tokenizer),
        }
    }

    /// An adapter with no capability behind it.
    pub fn unavailable() -> Self {
        Self { inner: None }
    }

    pub fn is_available(&self) -> bool {
        self.inner.is_some()
    }

    /// Name of the wrapped tokenizer, or "unavailable".
    pub fn name(&self) -> &str {
        self.inner.as_deref().map_or("unavailable", |t| t.name())
    }

    /// Lower-case and tokenize `text`.
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let Some(tokenizer) = &self.inner else {
            return Vec::new();
        };
        match tokenizer.tokenize(&text.to_lowercase()) {
            Ok(tokens) => tokens,
            Err(e) => {
                warn!(tokenizer = %tokenizer.name(), error = %e, "Tokenization failed, using empty token list");
                Vec::new()
            }
        }
    }

    /// Extract named entities from `text`.
    pub fn extract_entities(&self, text: &str) -> Vec<String> {
        let Some(tokenizer) = &self.inner else {
            return Vec::new();
        };
        match tokenizer.extract_entities(&text.to_lowercase()) {
            Ok(entities) => entities,
            Err(e) => {
                warn!(tokenizer = %tokenizer.name(), error = %e, "Entity extraction failed, using empty entity list");
                Vec::new()
            }
        }
    }
}

impl Default for TokenizerAdapter {
    fn default() -> Self {
        Self::new(Arc::new(WordTokenizer::new()))
    }
}

impl std::fmt::Debug for TokenizerAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenizerAdapter")
            .field("tokenizer", &self.name())
            .finish()
    }
}
