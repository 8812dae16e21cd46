//! Keyword-based intent and program classification.
//!
//! Intents match on **exact token text**: a token equal to one of the
//! intent's keywords. Keywords containing a space can therefore never match
//! a single token and are inert; they stay in the tables as written.
//!
//! Programs match on **substring containment** over the whole lower-cased
//! query, so `"undergraduate"` also mentions `graduate`, and `"ms"` is found
//! inside words like `"programs"`.

use admitbot_core::intent::{Intent, Program, QueryAnalysis};
use std::collections::HashSet;
use tracing::debug;

use crate::adapter::TokenizerAdapter;

/// Intent keyword lists, in scan order.
pub const INTENT_KEYWORDS: [(Intent, &[&str]); 8] = [
    (
        Intent::Deadline,
        &["deadline", "due", "when", "last date", "cutoff", "close", "final date"],
    ),
    (
        Intent::Documents,
        &[
            "document",
            "paperwork",
            "required",
            "need",
            "submit",
            "upload",
            "file",
            "transcript",
            "cv",
            "resume",
            "certificate",
        ],
    ),
    (
        Intent::Fees,
        &["fee", "payment", "cost", "price", "charge", "tuition", "deposit"],
    ),
    (
        Intent::Status,
        &["status", "progress", "check", "review", "decision", "update", "track"],
    ),
    (
        Intent::Help,
        &["help", "assistance", "support", "guide", "explain", "how to", "what is"],
    ),
    (
        Intent::Greeting,
        &["hello", "hi", "hey", "greetings", "good morning", "good afternoon"],
    ),
    (
        Intent::Upload,
        &["upload", "send", "submit", "attach", "provide"],
    ),
    (
        Intent::Contact,
        &["contact", "email", "phone", "number", "address", "reach"],
    ),
];

/// Program keyword lists, in scan order.
pub const PROGRAM_KEYWORDS: [(Program, &[&str]); 4] = [
    (
        Program::Undergraduate,
        &["undergrad", "bachelor", "undergraduate", "college"],
    ),
    (
        Program::Graduate,
        &["graduate", "master", "masters", "ms", "mba"],
    ),
    (Program::Phd, &["phd", "doctorate", "doctoral"]),
    (
        Program::Scholarship,
        &["scholarship", "financial aid", "grant"],
    ),
];

/// Classifies a query into intents and program mentions.
#[derive(Debug, Clone, Default)]
pub struct QueryClassifier {
    tokenizer: TokenizerAdapter,
}

impl QueryClassifier {
    pub fn new(tokenizer: TokenizerAdapter) -> Self {
        Self { tokenizer }
    }

    pub fn tokenizer(&self) -> &TokenizerAdapter {
        &self.tokenizer
    }

    /// Analyze a raw query.
    pub fn classify(&self, query: &str) -> QueryAnalysis {
        let lower = query.to_lowercase();
        let tokens = self.tokenizer.tokenize(&lower);
        let token_texts: HashSet<&str> = tokens.iter().map(|t| t.text.as_str()).collect();

        let mut analysis = QueryAnalysis {
            entities: self.tokenizer.extract_entities(&lower),
            ..QueryAnalysis::default()
        };

        for (intent, keywords) in INTENT_KEYWORDS {
            if keywords.iter().any(|kw| token_texts.contains(kw)) {
                analysis.add_intent(intent);
            }
        }

        for (program, keywords) in PROGRAM_KEYWORDS {
            if keywords.iter().any(|kw| lower.contains(kw)) {
                analysis.add_program(program);
            }
        }

        debug!(
            tokens = tokens.len(),
            intents = ?analysis.intents,
            programs = ?analysis.programs,
            entities = analysis.entities.len(),
            "Query classified"
        );

        analysis
    }
}
