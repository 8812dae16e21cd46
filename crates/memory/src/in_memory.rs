//! In-memory session store — sessions live for the lifetime of the process.

use admitbot_core::error::SessionError;
use admitbot_core::session::{Session, SessionStore};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// A session store backed by a `HashMap` keyed by user id.
///
/// Clones share the same underlying map.
#[derive(Clone)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn append_message(&self, user_id: &str, message: &str) -> Result<(), SessionError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.entry(user_id.to_string()).or_default();
        session.messages.push(message.to_string());
        debug!(user_id, messages = session.message_count(), "Message recorded");
        Ok(())
    }

    async fn append_document(&self, user_id: &str, file_name: &str) -> Result<(), SessionError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.entry(user_id.to_string()).or_default();
        session.documents.push(file_name.to_string());
        debug!(user_id, documents = session.document_count(), "Document recorded");
        Ok(())
    }

    async fn get(&self, user_id: &str) -> Result<Option<Session>, SessionError> {
        Ok(self.sessions.read().await.get(user_id).cloned())
    }

    async fn message_count(&self, user_id: &str) -> Result<usize, SessionError> {
        Ok(self
            .sessions
            .read()
            .await
            .get(user_id)
            .map_or(0, Session::message_count))
    }

    async fn document_count(&self, user_id: &str) -> Result<usize, SessionError> {
        Ok(self
            .sessions
            .read()
            .await
            .get(user_id)
            .map_or(0, Session::document_count))
    }

    async fn len(&self) -> Result<usize, SessionError> {
        Ok(self.sessions.read().await.len())
    }
}
