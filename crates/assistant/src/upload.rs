//! Simulated upload acknowledgment: validate the extension, record the name.

use crate::interaction_log::{InteractionKind, InteractionLog};
use crate::responses::{self, INVALID_FILE_TYPE, UPLOAD_APOLOGY};
use admitbot_core::session::SessionStore;
use admitbot_core::upload::FileRef;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub struct UploadAcknowledger {
    sessions: Arc<dyn SessionStore>,
    log: Arc<InteractionLog>,
    /// Lower-case, without the leading dot
    allowed_extensions: Vec<String>,
}

impl UploadAcknowledger {
    pub fn new(sessions: Arc<dyn SessionStore>, log: Arc<InteractionLog>) -> Self {
        Self {
            sessions,
            log,
            allowed_extensions: ["pdf", "jpg", "jpeg", "png"].map(String::from).to_vec(),
        }
    }

    pub fn with_allowed_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.allowed_extensions = extensions
            .into_iter()
            .map(|e| e.as_ref().trim_start_matches('.').to_lowercase())
            .collect();
        self
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.allowed_extensions
    }

    pub fn is_allowed(&self, file: &FileRef) -> bool {
        file.extension()
            .is_some_and(|ext| self.allowed_extensions.iter().any(|a| *a == ext))
    }

    /// Validate and record an upload. Always returns reply text.
    pub async fn acknowledge(&self, user_id: &str, file: &FileRef) -> String {
        self.log.log(InteractionKind::Upload, user_id, &file.name);

        if !self.is_allowed(file) {
            info!(user_id, file_name = %file.name, "Upload rejected: unsupported file type");
            return INVALID_FILE_TYPE.to_string();
        }

        match self.sessions.append_document(user_id, &file.name).await {
            Ok(()) => {
                info!(user_id, file_name = %file.name, size_bytes = ?file.size_bytes, "Upload accepted");
                responses::upload_success(&file.name)
            }
            Err(e) => {
                warn!(user_id, file_name = %file.name, error = %e, "Failed to record upload");
                UPLOAD_APOLOGY.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use admitbot_memory::InMemorySessionStore;

    fn acknowledger() -> (UploadAcknowledger, InMemorySessionStore, Arc<InteractionLog>) {
        let store = InMemorySessionStore::new();
        let log = Arc::new(InteractionLog::new());
        (
            UploadAcknowledger::new(Arc::new(store.clone()), log.clone()),
            store,
            log,
        )
    }

    #[tokio::test]
    async fn accepts_allowed_extension_case_insensitively() {
        let (ack, store, log) = acknowledger();
        let reply = ack.acknowledge("u1", &FileRef::new("transcript.PDF")).await;

        assert_eq!(
            reply,
            "Document 'transcript.PDF' uploaded successfully! We'll process it shortly."
        );
        let session = store.get("u1").await.unwrap().unwrap();
        assert_eq!(session.documents, vec!["transcript.PDF"]);
        assert_eq!(log.entries_by_kind(InteractionKind::Upload).len(), 1);
    }

    #[tokio::test]
    async fn rejects_missing_or_unknown_extension() {
        let (ack, store, log) = acknowledger();

        for name in ["transcript", "transcript.docx", "archive.pdf.zip"] {
            let reply = ack.acknowledge("u1", &FileRef::new(name)).await;
            assert_eq!(reply, INVALID_FILE_TYPE);
        }
        assert_eq!(store.document_count("u1").await.unwrap(), 0);
        assert_eq!(log.count(), 3);
    }

    #[tokio::test]
    async fn custom_extensions_replace_defaults() {
        let (ack, _, _) = acknowledger();
        let ack = ack.with_allowed_extensions([".TXT"]);

        assert_eq!(ack.allowed_extensions(), ["txt"]);
        assert!(ack.is_allowed(&FileRef::new("notes.txt")));
        assert!(!ack.is_allowed(&FileRef::new("scan.png")));
    }

    #[tokio::test]
    async fn multiple_uploads_accumulate() {
        let (ack, store, _) = acknowledger();
        ack.acknowledge("u1", &FileRef::new("cv.pdf").with_size(2048)).await;
        ack.acknowledge("u1", &FileRef::new("photo.jpeg")).await;
        assert_eq!(store.document_count("u1").await.unwrap(), 2);
    }
}
