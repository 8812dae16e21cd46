//! The response orchestrator.
//!
//! Each query becomes a background turn that classifies, composes and
//! records the message. The caller waits for it up to the response bound;
//! past that it gets a placeholder and the turn finishes on its own.

use crate::handlers::{Clock, HandlerRequest, ResponseHandlers};
use crate::interaction_log::{FileSink, InteractionKind, InteractionLog, InteractionSink, TracingSink};
use crate::responses::{
    self, FALLBACK_REPLIES, GENERIC_APOLOGY, GREETING_REPLIES, PLACEHOLDER_REPLIES,
};
use crate::upload::UploadAcknowledger;
use admitbot_config::AppConfig;
use admitbot_core::error::Error;
use admitbot_core::intent::{Intent, QueryAnalysis};
use admitbot_core::knowledge::KnowledgeBase;
use admitbot_core::session::SessionStore;
use admitbot_core::upload::FileRef;
use admitbot_memory::InMemorySessionStore;
use admitbot_nlp::{QueryClassifier, TokenizerAdapter, WordTokenizer};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

const DEFAULT_RESPONSE_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_GREETING_WINDOW: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyStatus {
    Success,
    /// The generic apology was sent
    Error,
}

/// Whether the reply is the real answer or a "still processing" stand-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    OnTime,
    Placeholder,
}

/// The outcome of one query.
#[derive(Debug)]
pub struct Reply {
    pub text: String,
    pub status: ReplyStatus,
    pub delivery: Delivery,
    /// The unfinished turn when a placeholder was sent, resolving to the
    /// real answer and its status. Dropping it leaves the turn running.
    pub late: Option<JoinHandle<ChatReply>>,
}

impl Reply {
    fn on_time(text: String) -> Self {
        Self {
            text,
            status: ReplyStatus::Success,
            delivery: Delivery::OnTime,
            late: None,
        }
    }

    fn apology() -> Self {
        Self {
            text: GENERIC_APOLOGY.to_string(),
            status: ReplyStatus::Error,
            delivery: Delivery::OnTime,
            late: None,
        }
    }
}

/// Envelope returned at the chat boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
    pub status: ReplyStatus,
}

impl ChatReply {
    fn success(response: String) -> Self {
        Self {
            response,
            status: ReplyStatus::Success,
        }
    }

    fn apology() -> Self {
        Self {
            response: GENERIC_APOLOGY.to_string(),
            status: ReplyStatus::Error,
        }
    }
}

/// The assistant service. Construct once and share it behind an `Arc`.
pub struct Assistant {
    classifier: Arc<QueryClassifier>,
    handlers: ResponseHandlers,
    uploads: UploadAcknowledger,
    sessions: Arc<dyn SessionStore>,
    log: Arc<InteractionLog>,
    /// How long a caller waits before getting a placeholder
    response_timeout: Duration,
    /// Message count (before this query) up to which a greeting is answered
    greeting_window: usize,
}

impl std::fmt::Debug for Assistant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assistant")
            .field("tokenizer", &self.classifier.tokenizer().name())
            .field("session_store", &self.sessions.name())
            .field("response_timeout", &self.response_timeout)
            .field("greeting_window", &self.greeting_window)
            .finish()
    }
}

impl Assistant {
    pub fn new(
        kb: Arc<KnowledgeBase>,
        classifier: QueryClassifier,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        let log = Arc::new(InteractionLog::new());
        Self {
            classifier: Arc::new(classifier),
            handlers: ResponseHandlers::new(kb, sessions.clone()).with_interaction_log(log.clone()),
            uploads: UploadAcknowledger::new(sessions.clone(), log.clone()),
            sessions,
            log,
            response_timeout: DEFAULT_RESPONSE_TIMEOUT,
            greeting_window: DEFAULT_GREETING_WINDOW,
        }
    }

    /// Build the full service from configuration: knowledge base from disk
    /// (or defaults), the word tokenizer, an in-memory session store and the
    /// configured interaction log sinks.
    pub fn from_config(config: &AppConfig) -> Self {
        let kb = Arc::new(KnowledgeBase::load(&config.knowledge_base_path));
        let classifier = QueryClassifier::new(TokenizerAdapter::new(Arc::new(WordTokenizer::new())));
        let sessions: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());

        let mut sinks: Vec<Box<dyn InteractionSink>> = vec![Box::new(TracingSink)];
        if config.logging.enabled {
            match FileSink::open(&config.logging.interaction_log) {
                Ok(sink) => sinks.push(Box::new(sink)),
                Err(e) => warn!(
                    path = %config.logging.interaction_log.display(),
                    error = %e,
                    "Interaction log file unavailable, logging to tracing only"
                ),
            }
        }

        Self::new(kb, classifier, sessions)
            .with_interaction_log(Arc::new(InteractionLog::with_sinks(sinks)))
            .with_response_timeout(config.assistant.response_timeout())
            .with_greeting_window(config.assistant.greeting_window)
            .with_allowed_extensions(&config.upload.allowed_extensions)
    }

    pub fn with_response_timeout(mut self, timeout: Duration) -> Self {
        self.response_timeout = timeout;
        self
    }

    pub fn with_greeting_window(mut self, window: usize) -> Self {
        self.greeting_window = window;
        self
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.handlers = self.handlers.with_clock(clock);
        self
    }

    pub fn with_interaction_log(mut self, log: Arc<InteractionLog>) -> Self {
        self.handlers = self.handlers.with_interaction_log(log.clone());
        self.uploads = UploadAcknowledger::new(self.sessions.clone(), log.clone())
            .with_allowed_extensions(self.uploads.allowed_extensions());
        self.log = log;
        self
    }

    pub fn with_allowed_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.uploads = self.uploads.with_allowed_extensions(extensions);
        self
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        self.handlers.knowledge_base()
    }

    pub fn sessions(&self) -> &Arc<dyn SessionStore> {
        &self.sessions
    }

    pub fn interaction_log(&self) -> &Arc<InteractionLog> {
        &self.log
    }

    pub fn response_timeout(&self) -> Duration {
        self.response_timeout
    }

    /// Answer a query within the response bound.
    #[instrument(skip(self, message))]
    pub async fn respond(&self, user_id: &str, message: &str) -> Reply {
        self.log.log(InteractionKind::Query, user_id, message);

        let initial_greeting = match self.sessions.message_count(user_id).await {
            Ok(count) => count <= self.greeting_window,
            Err(e) => {
                warn!(error = %e, "Session lookup failed");
                return Reply::apology();
            }
        };

        let turn = Turn {
            classifier: self.classifier.clone(),
            handlers: self.handlers.clone(),
            sessions: self.sessions.clone(),
            user_id: user_id.to_string(),
            message: message.to_string(),
            initial_greeting,
        };
        let mut handle = tokio::spawn(turn.run());

        match tokio::time::timeout(self.response_timeout, &mut handle).await {
            Ok(Ok(Ok(text))) => Reply::on_time(text),
            Ok(Ok(Err(e))) => {
                warn!(error = %e, "Turn failed");
                Reply::apology()
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Turn task aborted");
                Reply::apology()
            }
            Err(_) => {
                info!(
                    timeout_ms = self.response_timeout.as_millis() as u64,
                    "Response bound elapsed, sending placeholder"
                );
                let user_id = user_id.to_string();
                let late = tokio::spawn(async move {
                    let reply = match handle.await {
                        Ok(Ok(text)) => ChatReply::success(text),
                        Ok(Err(e)) => {
                            warn!(user_id = %user_id, error = %e, "Late turn failed");
                            ChatReply::apology()
                        }
                        Err(e) => {
                            warn!(user_id = %user_id, error = %e, "Late turn task aborted");
                            ChatReply::apology()
                        }
                    };
                    debug!(
                        user_id = %user_id,
                        status = ?reply.status,
                        chars = reply.response.len(),
                        "Late turn finished"
                    );
                    reply
                });
                Reply {
                    text: responses::pick(PLACEHOLDER_REPLIES).to_string(),
                    status: ReplyStatus::Success,
                    delivery: Delivery::Placeholder,
                    late: Some(late),
                }
            }
        }
    }

    /// Reply text for a query. Never fails.
    pub async fn get_response(&self, user_id: &str, message: &str) -> String {
        self.respond(user_id, message).await.text
    }

    pub async fn chat(&self, user_id: &str, message: &str) -> ChatReply {
        let reply = self.respond(user_id, message).await;
        ChatReply {
            response: reply.text,
            status: reply.status,
        }
    }

    #[instrument(skip(self, file), fields(file_name = %file.name))]
    pub async fn handle_file_upload(&self, user_id: &str, file: &FileRef) -> String {
        self.uploads.acknowledge(user_id, file).await
    }
}

/// One query's background work.
struct Turn {
    classifier: Arc<QueryClassifier>,
    handlers: ResponseHandlers,
    sessions: Arc<dyn SessionStore>,
    user_id: String,
    message: String,
    initial_greeting: bool,
}

impl Turn {
    async fn run(self) -> Result<String, Error> {
        let classifier = self.classifier.clone();
        let query = self.message.clone();
        let analysis = tokio::task::spawn_blocking(move || classifier.classify(&query))
            .await
            .map_err(|e| Error::Internal(format!("classification task failed: {e}")))?;

        let text = self.compose(&analysis).await;

        self.sessions
            .append_message(&self.user_id, &self.message)
            .await?;
        Ok(text)
    }

    async fn compose(&self, analysis: &QueryAnalysis) -> String {
        if self.initial_greeting && analysis.has_intent(Intent::Greeting) {
            return responses::pick(GREETING_REPLIES).to_string();
        }
        if analysis.intents.is_empty() {
            return responses::pick(FALLBACK_REPLIES).to_string();
        }

        let request = HandlerRequest {
            user_id: &self.user_id,
            query: &self.message,
            programs: &analysis.programs,
        };

        let mut parts = Vec::with_capacity(analysis.intents.len());
        for intent in &analysis.intents {
            let text = self.handlers.dispatch(*intent, &request).await;
            if !text.is_empty() {
                parts.push(text);
            }
        }

        if !parts.is_empty() {
            parts.join("\n\n")
        } else if !analysis.programs.is_empty() {
            responses::program_prompt(&analysis.program_list())
        } else {
            responses::pick(FALLBACK_REPLIES).to_string()
        }
    }
}
