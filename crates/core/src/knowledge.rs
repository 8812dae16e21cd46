//! Knowledge base — the static admissions data every handler reads from.
//!
//! Loading follows a two-path contract:
//!
//! 1. [`KnowledgeBase::try_load`] reads and parses the JSON document and
//!    reports exactly what went wrong.
//! 2. [`KnowledgeBase::load`] never fails: an absent or corrupt document is
//!    replaced by the built-in defaults.
//!
//! The knowledge base is immutable once loaded and shared behind an `Arc`.

use crate::error::KnowledgeBaseError;
use crate::intent::Program;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, warn};

/// Default knowledge base file name, relative to the working directory.
pub const DEFAULT_KNOWLEDGE_BASE_FILE: &str = "admission_data.json";

/// Application fee and tuition deposit for one program.
///
/// Amounts keep their JSON representation so `50` renders as `$50`
/// and `49.5` as `$49.5`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeSchedule {
    pub application_fee: Number,
    pub tuition_deposit: Number,
}

impl FeeSchedule {
    pub fn new(application_fee: u64, tuition_deposit: u64) -> Self {
        Self {
            application_fee: Number::from(application_fee),
            tuition_deposit: Number::from(tuition_deposit),
        }
    }
}

/// Static admissions data: deadlines, document checklists, fees and FAQs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    /// Program → ISO calendar date (`YYYY-MM-DD`). Parsed lazily by the
    /// deadline handler so one bad entry only affects that handler.
    #[serde(default)]
    pub deadlines: BTreeMap<Program, String>,

    /// Program → ordered list of required documents
    #[serde(default)]
    pub documents: BTreeMap<Program, Vec<String>>,

    /// Program → fee schedule
    #[serde(default)]
    pub fees: BTreeMap<Program, FeeSchedule>,

    /// Topic key (snake_case) → answer text, in document order
    #[serde(default)]
    pub faqs: IndexMap<String, String>,
}

impl KnowledgeBase {
    /// Load the knowledge base, substituting the defaults on any failure.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            info!(
                "No knowledge base found at {}, using built-in defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::try_load(path) {
            Ok(kb) => {
                debug!(
                    path = %path.display(),
                    programs = kb.deadlines.len(),
                    faqs = kb.faqs.len(),
                    "Knowledge base loaded"
                );
                kb
            }
            Err(e) => {
                warn!(error = %e, "Falling back to built-in knowledge base");
                Self::default()
            }
        }
    }

    /// Load the knowledge base from a JSON file, reporting failures.
    pub fn try_load(path: &Path) -> Result<Self, KnowledgeBaseError> {
        let content = std::fs::read_to_string(path).map_err(|e| KnowledgeBaseError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| KnowledgeBaseError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    pub fn deadline(&self, program: Program) -> Option<&str> {
        self.deadlines.get(&program).map(String::as_str)
    }

    pub fn documents_for(&self, program: Program) -> Option<&[String]> {
        self.documents.get(&program).map(Vec::as_slice)
    }

    pub fn fees_for(&self, program: Program) -> Option<&FeeSchedule> {
        self.fees.get(&program)
    }

    pub fn faq(&self, topic: &str) -> Option<&str> {
        self.faqs.get(topic).map(String::as_str)
    }

    /// FAQ topic keys in the order the knowledge base lists them.
    pub fn faq_topics(&self) -> impl Iterator<Item = &str> {
        self.faqs.keys().map(String::as_str)
    }

    /// Pretty JSON for the built-in defaults (used by `admitbot onboard`).
    pub fn default_json() -> String {
        serde_json::to_string_pretty(&Self::default()).unwrap_or_default()
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        let deadlines = BTreeMap::from([
            (Program::Undergraduate, "2024-12-15".to_string()),
            (Program::Graduate, "2024-11-30".to_string()),
            (Program::Phd, "2024-10-31".to_string()),
            (Program::Scholarship, "2024-09-15".to_string()),
        ]);

        let documents = BTreeMap::from([
            (
                Program::Undergraduate,
                strings(&[
                    "High school transcripts",
                    "Standardized test scores",
                    "Personal statement",
                    "Letters of recommendation",
                ]),
            ),
            (
                Program::Graduate,
                strings(&[
                    "Bachelor's degree transcripts",
                    "GRE/GMAT scores",
                    "Statement of purpose",
                    "Letters of recommendation",
                ]),
            ),
            (
                Program::Phd,
                strings(&[
                    "Master's degree transcripts",
                    "Research proposal",
                    "Publications (if any)",
                    "Letters of recommendation",
                ]),
            ),
        ]);

        let fees = BTreeMap::from([
            (Program::Undergraduate, FeeSchedule::new(50, 500)),
            (Program::Graduate, FeeSchedule::new(75, 750)),
            (Program::Phd, FeeSchedule::new(100, 0)),
        ]);

        let faqs = IndexMap::from([
            (
                "application_process".to_string(),
                "The application process involves submitting an online form, required documents, and paying the application fee. You'll receive a confirmation email once submitted.".to_string(),
            ),
            (
                "visa_requirements".to_string(),
                "International students need to provide proof of financial support, acceptance letter, and valid passport to apply for a student visa.".to_string(),
            ),
            (
                "housing_options".to_string(),
                "We offer on-campus dormitories and can provide information about off-campus housing options.".to_string(),
            ),
            (
                "contact".to_string(),
                "You can reach the admissions office at admissions@university.edu or call +1 (555) 123-4567.".to_string(),
            ),
            (
                "upload_help".to_string(),
                "You can upload documents through our portal after creating an account. Accepted formats are PDF, JPG, and PNG.".to_string(),
            ),
        ]);

        Self {
            deadlines,
            documents,
            fees,
            faqs,
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_cover_every_program_deadline() {
        let kb = KnowledgeBase::default();
        for program in Program::ALL {
            assert!(kb.deadline(program).is_some(), "missing deadline for {program}");
        }
        assert!(kb.documents_for(Program::Scholarship).is_none());
        assert!(kb.fees_for(Program::Scholarship).is_none());
        assert_eq!(kb.documents_for(Program::Phd).unwrap().len(), 4);
    }

    #[test]
    fn missing_file_returns_defaults() {
        let kb = KnowledgeBase::load(Path::new("/nonexistent/admission_data.json"));
        assert_eq!(kb, KnowledgeBase::default());
    }

    #[test]
    fn corrupt_file_returns_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ this is not json").unwrap();

        assert!(matches!(
            KnowledgeBase::try_load(file.path()),
            Err(KnowledgeBaseError::Parse { .. })
        ));
        assert_eq!(KnowledgeBase::load(file.path()), KnowledgeBase::default());
    }

    #[test]
    fn unknown_program_key_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"deadlines": {{"postdoc": "2025-01-01"}}}}"#).unwrap();

        assert!(KnowledgeBase::try_load(file.path()).is_err());
        assert_eq!(KnowledgeBase::load(file.path()), KnowledgeBase::default());
    }

    #[test]
    fn valid_file_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "deadlines": {{"graduate": "2025-03-01"}},
                "documents": {{"graduate": ["CV"]}},
                "fees": {{"graduate": {{"application_fee": 80, "tuition_deposit": 99.5}}}},
                "faqs": {{"contact": "Call us."}}
            }}"#
        )
        .unwrap();

        let kb = KnowledgeBase::load(file.path());
        assert_eq!(kb.deadline(Program::Graduate), Some("2025-03-01"));
        assert!(kb.deadline(Program::Undergraduate).is_none());
        assert_eq!(kb.documents_for(Program::Graduate).unwrap(), ["CV".to_string()]);
        let fees = kb.fees_for(Program::Graduate).unwrap();
        assert_eq!(fees.application_fee.to_string(), "80");
        assert_eq!(fees.tuition_deposit.to_string(), "99.5");
        assert_eq!(kb.faq("contact"), Some("Call us."));
    }

    #[test]
    fn faq_topics_keep_document_order() {
        let kb = KnowledgeBase::default();
        let topics: Vec<&str> = kb.faq_topics().collect();
        assert_eq!(
            topics,
            [
                "application_process",
                "visa_requirements",
                "housing_options",
                "contact",
                "upload_help"
            ]
        );

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"faqs": {{"zebra": "z", "contact": "c", "alpha": "a"}}}}"#
        )
        .unwrap();
        let kb = KnowledgeBase::try_load(file.path()).unwrap();
        assert_eq!(kb.faq_topics().collect::<Vec<_>>(), ["zebra", "contact", "alpha"]);
    }

    #[test]
    fn default_json_roundtrips() {
        let parsed: KnowledgeBase = serde_json::from_str(&KnowledgeBase::default_json()).unwrap();
        assert_eq!(parsed, KnowledgeBase::default());
    }
}
