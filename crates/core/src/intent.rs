//! Intents, program types, and the per-query analysis result.
//!
//! Both vocabularies are closed: the classifier can only ever produce the
//! variants listed here, and the `ALL` arrays fix the scan order used for
//! detection and for multi-intent composition.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The topical category of a user query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Deadline,
    Documents,
    Fees,
    Status,
    Help,
    Greeting,
    Upload,
    Contact,
}

impl Intent {
    /// Every intent, in detection order.
    pub const ALL: [Intent; 8] = [
        Intent::Deadline,
        Intent::Documents,
        Intent::Fees,
        Intent::Status,
        Intent::Help,
        Intent::Greeting,
        Intent::Upload,
        Intent::Contact,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Intent::Deadline => "deadline",
            Intent::Documents => "documents",
            Intent::Fees => "fees",
            Intent::Status => "status",
            Intent::Help => "help",
            Intent::Greeting => "greeting",
            Intent::Upload => "upload",
            Intent::Contact => "contact",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An admissions track a query can be about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Program {
    Undergraduate,
    Graduate,
    Phd,
    Scholarship,
}

impl Program {
    /// Every program, in detection order.
    pub const ALL: [Program; 4] = [
        Program::Undergraduate,
        Program::Graduate,
        Program::Phd,
        Program::Scholarship,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Program::Undergraduate => "undergraduate",
            Program::Graduate => "graduate",
            Program::Phd => "phd",
            Program::Scholarship => "scholarship",
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What the classifier found in a single query.
///
/// `intents` and `programs` keep detection order and never hold duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryAnalysis {
    /// Named entities extracted by the tokenizer
    #[serde(default)]
    pub entities: Vec<String>,

    /// Detected intents
    #[serde(default)]
    pub intents: Vec<Intent>,

    /// Mentioned program types
    #[serde(default)]
    pub programs: Vec<Program>,
}

impl QueryAnalysis {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an intent unless it is already present.
    pub fn add_intent(&mut self, intent: Intent) {
        if !self.intents.contains(&intent) {
            self.intents.push(intent);
        }
    }

    /// Record a program unless it is already present.
    pub fn add_program(&mut self, program: Program) {
        if !self.programs.contains(&program) {
            self.programs.push(program);
        }
    }

    pub fn has_intent(&self, intent: Intent) -> bool {
        self.intents.contains(&intent)
    }

    /// True when no intent was detected at all.
    pub fn is_unclassified(&self) -> bool {
        self.intents.is_empty()
    }

    /// Program labels joined with ", " (e.g. "undergraduate, phd").
    pub fn program_list(&self) -> String {
        self.programs
            .iter()
            .map(Program::label)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
