//! Query analysis for AdmitBot.
//!
//! - [`WordTokenizer`] — built-in rule-based implementation of the
//!   [`Tokenizer`](admitbot_core::Tokenizer) capability
//! - [`TokenizerAdapter`] — wraps any tokenizer and degrades to empty output
//!   when the capability is missing or fails
//! - [`QueryClassifier`] — keyword-based intent and program detection

pub mod adapter;
pub mod classifier;
pub mod word;

pub use adapter::TokenizerAdapter;
pub use classifier::{QueryClassifier, INTENT_KEYWORDS, PROGRAM_KEYWORDS};
pub use word::WordTokenizer;
