//! Rule-based word tokenizer with pattern entity extraction.
//!
//! Tokens are runs of alphanumeric characters; every other non-whitespace
//! character becomes a token of its own, so `"deadline?"` yields
//! `["deadline", "?"]`. E-mail addresses stay whole. Entities are dates, money amounts and e-mail
//! addresses, returned in the order they appear.

use admitbot_core::error::TokenizerError;
use admitbot_core::tokenizer::{Token, Tokenizer};
use regex_lite::Regex;
use std::sync::LazyLock;

// Patterns are constants, so failing to compile them is a programming error.
static DATE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(
            r"\b(?:january|february|march|april|may|june|july|august|september|october|november|december)\s+\d{1,2}(?:st|nd|rd|th)?(?:,?\s+\d{4})?\b",
        )
        .expect("Invalid regex: month-day date"),
        Regex::new(r"\b\d{4}-\d{2}-\d{2}\b").expect("Invalid regex: ISO date"),
    ]
});

static MONEY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\d+(?:\.\d+)?").expect("Invalid regex: money amount"));

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}").expect("Invalid regex: e-mail address")
});

/// Splits text into word and punctuation tokens.
#[derive(Debug, Clone, Default)]
pub struct WordTokenizer;

impl WordTokenizer {
    pub fn new() -> Self {
        Self
    }
}

impl Tokenizer for WordTokenizer {
    fn name(&self) -> &str {
        "word"
    }

    fn tokenize(&self, text: &str) -> Result<Vec<Token>, TokenizerError> {
        let lower = text.to_lowercase();
        let mut tokens = Vec::new();
        let mut rest = 0;

        for email in EMAIL_PATTERN.find_iter(&lower) {
            split_words(&lower[rest..email.start()], &mut tokens);
            tokens.push(Token::new(email.as_str()));
            rest = email.end();
        }
        split_words(&lower[rest..], &mut tokens);

        Ok(tokens)
    }

    fn extract_entities(&self, text: &str) -> Result<Vec<String>, TokenizerError> {
        let lower = text.to_lowercase();

        let mut found: Vec<(usize, &str)> = DATE_PATTERNS
            .iter()
            .chain([&*MONEY_PATTERN, &*EMAIL_PATTERN])
            .flat_map(|re| re.find_iter(&lower))
            .map(|m| (m.start(), m.as_str()))
            .collect();

        found.sort_by_key(|(start, _)| *start);
        found.dedup_by_key(|(start, _)| *start);

        Ok(found.into_iter().map(|(_, s)| s.to_string()).collect())
    }
}

fn split_words(text: &str, tokens: &mut Vec<Token>) {
    let mut word = String::new();
    for c in text.chars() {
        if c.is_alphanumeric() {
            word.push(c);
            continue;
        }
        if !word.is_empty() {
            tokens.push(Token::new(std::mem::take(&mut word)));
        }
        if !c.is_whitespace() {
            tokens.push(Token::new(c.to_string()));
        }
    }
    if !word.is_empty() {
        tokens.push(Token::new(word));
    }
}
