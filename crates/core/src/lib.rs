//! # AdmitBot Core
//!
//! Domain types, traits, and error definitions for the AdmitBot admissions
//! assistant. This crate does **not depend on an async runtime**; it defines the
//! domain model that every other crate implements against.
//!
//! ## Design Philosophy
//!
//! Every swappable subsystem is defined as a trait here. Implementations live
//! in their respective crates:
//! - [`Tokenizer`] — implemented by `admitbot-nlp`
//! - [`SessionStore`] — implemented by `admitbot-memory`
//!
//! The knowledge base is plain data and is loaded here, since every handler
//! reads it and nothing ever writes it.

pub mod error;
pub mod intent;
pub mod knowledge;
pub mod session;
pub mod tokenizer;
pub mod upload;

// Re-export key types at crate root for ergonomics
pub use error::{Error, Result};
pub use intent::{Intent, Program, QueryAnalysis};
pub use knowledge::{FeeSchedule, KnowledgeBase};
pub use session::{Session, SessionStore};
pub use tokenizer::{Token, Tokenizer};
pub use upload::FileRef;
