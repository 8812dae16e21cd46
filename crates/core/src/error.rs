//! Error types for the AdmitBot domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant. None of these ever reach
//! the chat or upload boundary: the assistant absorbs them into reply text.

use std::path::PathBuf;
use thiserror::Error;

/// The top-level error type for all AdmitBot operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Knowledge base errors ---
    #[error("Knowledge base error: {0}")]
    KnowledgeBase(#[from] KnowledgeBaseError),

    // --- Tokenizer errors ---
    #[error("Tokenizer error: {0}")]
    Tokenizer(#[from] TokenizerError),

    // --- Session errors ---
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    // --- Handler errors ---
    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Error)]
pub enum KnowledgeBaseError {
    #[error("Failed to read knowledge base at {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("Failed to parse knowledge base at {path}: {reason}")]
    Parse { path: PathBuf, reason: String },
}

#[derive(Debug, Clone, Error)]
pub enum TokenizerError {
    #[error("Tokenizer capability unavailable: {0}")]
    Unavailable(String),

    #[error("Tokenization failed: {0}")]
    Failed(String),
}

#[derive(Debug, Clone, Error)]
pub enum SessionError {
    #[error("Session storage error: {0}")]
    Storage(String),
}

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("Invalid deadline date for {program}: {value}")]
    InvalidDate { program: String, value: String },

    #[error("Session lookup failed: {0}")]
    Session(#[from] SessionError),
}
