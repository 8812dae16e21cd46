//! Session model and the store trait that owns it.
//!
//! A session is created lazily the first time a user id sends a message or
//! uploads a file, and lives until the process exits. Only the store mutates
//! sessions; everything else goes through the [`SessionStore`] interface.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::error::SessionError;

/// Per-user conversational and upload state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Raw query strings, in call order
    #[serde(default)]
    pub messages: Vec<String>,

    /// Uploaded file names, in upload order
    #[serde(default)]
    pub documents: Vec<String>,

    /// When the session was first touched
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            documents: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// The core session store trait.
///
/// Reads of an unknown user id behave like an empty session; appends create
/// the session on first use.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Human-readable name of this store (e.g., "in_memory").
    fn name(&self) -> &str;

    /// Append a raw query to the user's message history.
    async fn append_message(&self, user_id: &str, message: &str) -> Result<(), SessionError>;

    /// Append an uploaded file name to the user's documents.
    async fn append_document(&self, user_id: &str, file_name: &str) -> Result<(), SessionError>;

    /// Snapshot of the user's session, if one exists.
    async fn get(&self, user_id: &str) -> Result<Option<Session>, SessionError>;

    /// Number of messages recorded so far (0 for unknown users).
    async fn message_count(&self, user_id: &str) -> Result<usize, SessionError> {
        Ok(self.get(user_id).await?.map_or(0, |s| s.message_count()))
    }

    /// Number of documents recorded so far (0 for unknown users).
    async fn document_count(&self, user_id: &str) -> Result<usize, SessionError> {
        Ok(self.get(user_id).await?.map_or(0, |s| s.document_count()))
    }

    /// Number of sessions held.
    async fn len(&self) -> Result<usize, SessionError>;
}
