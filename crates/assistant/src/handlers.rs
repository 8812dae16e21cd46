//! Per-intent response handlers.
//!
//! Each handler turns the detected programs (or the session, for status)
//! into reply text. A failing handler contributes its own apology fragment
//! and never affects the others.

use crate::interaction_log::{InteractionKind, InteractionLog};
use crate::responses::{self, CONTACT_FALLBACK};
use admitbot_core::error::HandlerError;
use admitbot_core::intent::{Intent, Program};
use admitbot_core::knowledge::KnowledgeBase;
use admitbot_core::session::SessionStore;
use chrono::{Local, NaiveDate};
use std::sync::Arc;
use tracing::warn;

/// Source of "today" for deadline arithmetic.
pub type Clock = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DISPLAY_DATE_FORMAT: &str = "%B %d, %Y";

/// What a handler gets to see of the current query.
#[derive(Debug, Clone, Copy)]
pub struct HandlerRequest<'a> {
    pub user_id: &'a str,
    pub query: &'a str,
    pub programs: &'a [Program],
}

#[derive(Clone)]
pub struct ResponseHandlers {
    kb: Arc<KnowledgeBase>,
    sessions: Arc<dyn SessionStore>,
    log: Arc<InteractionLog>,
    clock: Clock,
}

impl std::fmt::Debug for ResponseHandlers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseHandlers")
            .field("session_store", &self.sessions.name())
            .field("faq_topics", &self.kb.faqs.len())
            .finish()
    }
}

impl ResponseHandlers {
    pub fn new(kb: Arc<KnowledgeBase>, sessions: Arc<dyn SessionStore>) -> Self {
        Self {
            kb,
            sessions,
            log: Arc::new(InteractionLog::new()),
            clock: Arc::new(|| Local::now().date_naive()),
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_interaction_log(mut self, log: Arc<InteractionLog>) -> Self {
        self.log = log;
        self
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.kb
    }

    /// Run the handler for one intent. Greeting has no handler and yields an
    /// empty string.
    pub async fn dispatch(&self, intent: Intent, request: &HandlerRequest<'_>) -> String {
        let outcome = match intent {
            Intent::Deadline => self.deadline(request.programs),
            Intent::Documents => Ok(self.documents(request.programs)),
            Intent::Fees => Ok(self.fees(request.programs)),
            Intent::Status => self.status(request.user_id).await,
            Intent::Help => Ok(self.help(request.query)),
            Intent::Upload => Ok(self.upload()),
            Intent::Contact => Ok(self.contact()),
            Intent::Greeting => Ok(String::new()),
        };

        match outcome {
            Ok(text) => text,
            Err(e) => {
                warn!(intent = intent.label(), user_id = request.user_id, error = %e, "Handler failed");
                self.log.log(
                    InteractionKind::HandlerError,
                    request.user_id,
                    &format!("{intent}: {e}"),
                );
                responses::handler_apology(intent).to_string()
            }
        }
    }

    pub fn deadline(&self, programs: &[Program]) -> Result<String, HandlerError> {
        self.deadline_on(programs, (self.clock)())
    }

    /// Deadline lines relative to `today`; the day count may be negative.
    pub fn deadline_on(&self, programs: &[Program], today: NaiveDate) -> Result<String, HandlerError> {
        if programs.is_empty() {
            return Ok(
                "Which program deadline are you interested in? (undergraduate/graduate/phd/scholarship)"
                    .into(),
            );
        }

        let mut lines = Vec::with_capacity(programs.len());
        for program in programs {
            let Some(raw) = self.kb.deadline(*program) else {
                lines.push(format!("I don't have deadline information for {program} program."));
                continue;
            };
            let date = NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| {
                HandlerError::InvalidDate {
                    program: program.label().into(),
                    value: raw.into(),
                }
            })?;
            let days = date.signed_duration_since(today).num_days();
            lines.push(format!(
                "The application deadline for {program} program is {}. That's {days} days from today.",
                date.format(DISPLAY_DATE_FORMAT)
            ));
        }
        Ok(lines.join("\n"))
    }

    pub fn documents(&self, programs: &[Program]) -> String {
        if programs.is_empty() {
            return "Which program documents are you asking about? (undergraduate/graduate/phd)".into();
        }

        programs
            .iter()
            .map(|program| match self.kb.documents_for(*program) {
                Some(docs) => {
                    let mut block = format!("Required documents for {program} program:");
                    for doc in docs {
                        block.push_str("\n- ");
                        block.push_str(doc);
                    }
                    block
                }
                None => format!("I don't have document requirements for {program} program."),
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn fees(&self, programs: &[Program]) -> String {
        if programs.is_empty() {
            return "Which program fees are you asking about? (undergraduate/graduate/phd)".into();
        }

        programs
            .iter()
            .map(|program| match self.kb.fees_for(*program) {
                Some(fees) => format!(
                    "Fee structure for {program} program:\n- Application fee: ${}\n- Tuition deposit (if admitted): ${}",
                    fees.application_fee, fees.tuition_deposit
                ),
                None => format!("I don't have fee information for {program} program."),
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub async fn status(&self, user_id: &str) -> Result<String, HandlerError> {
        let documents = self.sessions.document_count(user_id).await?;
        Ok(if documents > 0 {
            format!("Your application is being processed. We've received {documents} documents from you.")
        } else {
            "Your application is currently under review. We'll notify you when there's an update."
                .into()
        })
    }

    pub fn help(&self, query: &str) -> String {
        let lower = query.to_lowercase();
        if lower.contains("upload") || lower.contains("file") {
            return responses::upload_instructions();
        }

        let mut text = String::from("I can help with:");
        for topic in self.kb.faq_topics() {
            text.push_str("\n- ");
            text.push_str(&title_case(topic));
        }
        text.push_str("\n\nPlease ask about any specific topic.");
        text
    }

    pub fn upload(&self) -> String {
        responses::upload_instructions()
    }

    pub fn contact(&self) -> String {
        self.kb.faq("contact").unwrap_or(CONTACT_FALLBACK).to_string()
    }
}

/// `visa_requirements` → `Visa Requirements`
fn title_case(topic: &str) -> String {
    topic
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use admitbot_core::error::SessionError;
    use admitbot_core::knowledge::FeeSchedule;
    use admitbot_core::session::Session;
    use admitbot_memory::InMemorySessionStore;
    use async_trait::async_trait;

    struct BrokenStore;

    #[async_trait]
    impl SessionStore for BrokenStore {
        fn name(&self) -> &str {
            "broken"
        }
        async fn append_message(&self, _: &str, _: &str) -> Result<(), SessionError> {
            Err(SessionError::Storage("disk on fire".into()))
        }
        async fn append_document(&self, _: &str, _: &str) -> Result<(), SessionError> {
            Err(SessionError::Storage("disk on fire".into()))
        }
        async fn get(&self, _: &str) -> Result<Option<Session>, SessionError> {
            Err(SessionError::Storage("disk on fire".into()))
        }
        async fn len(&self) -> Result<usize, SessionError> {
            Ok(0)
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn handlers_with(kb: KnowledgeBase) -> (ResponseHandlers, InMemorySessionStore) {
        let store = InMemorySessionStore::new();
        let handlers = ResponseHandlers::new(Arc::new(kb), Arc::new(store.clone()))
            .with_clock(Arc::new(|| date(2024, 12, 10)));
        (handlers, store)
    }

    fn request<'a>(query: &'a str, programs: &'a [Program]) -> HandlerRequest<'a> {
        HandlerRequest {
            user_id: "u1",
            query,
            programs,
        }
    }

    #[test]
    fn deadline_counts_calendar_days() {
        let (h, _) = handlers_with(KnowledgeBase::default());
        let text = h.deadline(&[Program::Undergraduate]).unwrap();
        assert_eq!(
            text,
            "The application deadline for undergraduate program is December 15, 2024. That's 5 days from today."
        );
    }

    #[test]
    fn deadline_in_the_past_is_negative() {
        let (h, _) = handlers_with(KnowledgeBase::default());
        let text = h.deadline_on(&[Program::Scholarship], date(2024, 9, 20)).unwrap();
        assert!(text.ends_with("That's -5 days from today."));
    }

    #[test]
    fn deadline_without_program_asks() {
        let (h, _) = handlers_with(KnowledgeBase::default());
        assert_eq!(
            h.deadline(&[]).unwrap(),
            "Which program deadline are you interested in? (undergraduate/graduate/phd/scholarship)"
        );
    }

    #[test]
    fn deadline_lines_join_with_newline() {
        let mut kb = KnowledgeBase::default();
        kb.deadlines.remove(&Program::Phd);
        let (h, _) = handlers_with(kb);
        let text = h.deadline(&[Program::Graduate, Program::Phd]).unwrap();
        let lines: Vec<&str> = text.split('\n').collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("The application deadline for graduate program is November 30, 2024."));
        assert_eq!(lines[1], "I don't have deadline information for phd program.");
    }

    #[test]
    fn malformed_deadline_is_an_error() {
        let mut kb = KnowledgeBase::default();
        kb.deadlines.insert(Program::Graduate, "2024-13-45".into());
        let (h, _) = handlers_with(kb);
        assert!(matches!(
            h.deadline(&[Program::Graduate]),
            Err(HandlerError::InvalidDate { .. })
        ));
    }

    #[tokio::test]
    async fn malformed_deadline_dispatches_to_apology_and_logs() {
        let mut kb = KnowledgeBase::default();
        kb.deadlines.insert(Program::Graduate, "not a date".into());
        let log = Arc::new(InteractionLog::new());
        let (h, _) = handlers_with(kb);
        let h = h.with_interaction_log(log.clone());

        let programs = [Program::Graduate];
        let text = h.dispatch(Intent::Deadline, &request("graduate deadline", &programs)).await;
        assert_eq!(text, "I encountered an error while checking deadlines.");
        assert_eq!(log.entries_by_kind(InteractionKind::HandlerError).len(), 1);

        // Other handlers are unaffected.
        let fees = h.dispatch(Intent::Fees, &request("graduate fees", &programs)).await;
        assert!(fees.starts_with("Fee structure for graduate program:"));
    }

    #[test]
    fn documents_lists_each_program() {
        let (h, _) = handlers_with(KnowledgeBase::default());
        let text = h.documents(&[Program::Undergraduate, Program::Scholarship]);
        let blocks: Vec<&str> = text.split("\n\n").collect();
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].starts_with("Required documents for undergraduate program:\n- "));
        assert_eq!(blocks[0].lines().count(), 5);
        assert_eq!(blocks[1], "I don't have document requirements for scholarship program.");
    }

    #[test]
    fn documents_without_program_asks() {
        let (h, _) = handlers_with(KnowledgeBase::default());
        assert_eq!(
            h.documents(&[]),
            "Which program documents are you asking about? (undergraduate/graduate/phd)"
        );
    }

    #[test]
    fn fees_render_amounts_as_written() {
        let mut kb = KnowledgeBase::default();
        kb.fees.insert(Program::Scholarship, FeeSchedule::new(0, 25));
        let (h, _) = handlers_with(kb);

        assert_eq!(
            h.fees(&[Program::Graduate]),
            "Fee structure for graduate program:\n- Application fee: $75\n- Tuition deposit (if admitted): $750"
        );
        assert!(h.fees(&[Program::Scholarship]).contains("- Application fee: $0"));
        assert_eq!(
            h.fees(&[]),
            "Which program fees are you asking about? (undergraduate/graduate/phd)"
        );
    }

    #[test]
    fn fees_missing_program() {
        let (h, _) = handlers_with(KnowledgeBase::default());
        assert_eq!(
            h.fees(&[Program::Scholarship]),
            "I don't have fee information for scholarship program."
        );
    }

    #[tokio::test]
    async fn status_reflects_uploaded_documents() {
        let (h, store) = handlers_with(KnowledgeBase::default());
        assert_eq!(
            h.status("u1").await.unwrap(),
            "Your application is currently under review. We'll notify you when there's an update."
        );

        store.append_document("u1", "a.pdf").await.unwrap();
        store.append_document("u1", "b.png").await.unwrap();
        assert_eq!(
            h.status("u1").await.unwrap(),
            "Your application is being processed. We've received 2 documents from you."
        );
    }

    #[tokio::test]
    async fn status_store_failure_becomes_apology() {
        let h = ResponseHandlers::new(Arc::new(KnowledgeBase::default()), Arc::new(BrokenStore));
        let text = h.dispatch(Intent::Status, &request("status", &[])).await;
        assert_eq!(text, "I encountered an error while checking your application status.");
    }

    #[test]
    fn help_lists_topics_in_knowledge_base_order() {
        let (h, _) = handlers_with(KnowledgeBase::default());
        assert_eq!(
            h.help("help"),
            "I can help with:\n\
             - Application Process\n\
             - Visa Requirements\n\
             - Housing Options\n\
             - Contact\n\
             - Upload Help\n\
             \n\
             Please ask about any specific topic."
        );
    }

    #[test]
    fn help_about_files_gives_upload_instructions() {
        let (h, _) = handlers_with(KnowledgeBase::default());
        assert_eq!(h.help("help with my FILE"), responses::upload_instructions());
        assert_eq!(h.upload(), responses::upload_instructions());
    }

    #[test]
    fn contact_prefers_faq_entry() {
        let mut kb = KnowledgeBase::default();
        kb.faqs.insert("contact".into(), "Call us.".into());
        let (h, _) = handlers_with(kb);
        assert_eq!(h.contact(), "Call us.");

        let mut kb = KnowledgeBase::default();
        kb.faqs.clear();
        let (h, _) = handlers_with(kb);
        assert_eq!(h.contact(), CONTACT_FALLBACK);
    }

    #[tokio::test]
    async fn greeting_has_no_handler() {
        let (h, _) = handlers_with(KnowledgeBase::default());
        assert!(h.dispatch(Intent::Greeting, &request("hi", &[])).await.is_empty());
    }

    #[tokio::test]
    async fn greeting_dispatch_never_fails() {
        let log = Arc::new(InteractionLog::new());
        let h = ResponseHandlers::new(Arc::new(KnowledgeBase::default()), Arc::new(BrokenStore))
            .with_interaction_log(log.clone());

        let text = h.dispatch(Intent::Greeting, &request("hi", &[])).await;
        assert!(text.is_empty());
        assert_ne!(text, responses::handler_apology(Intent::Greeting));
        assert!(log.entries_by_kind(InteractionKind::HandlerError).is_empty());
    }

    #[test]
    fn title_case_topics() {
        assert_eq!(title_case("upload_help"), "Upload Help");
        assert_eq!(title_case("contact"), "Contact");
    }
}
