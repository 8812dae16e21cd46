//! Canned reply text.

use admitbot_core::intent::Intent;
use rand::seq::IndexedRandom;

pub const GREETING_REPLIES: &[&str] = &[
    "Hello! Welcome to University Admission Assistant. How can I help you today?",
    "Hi there! I'm here to help with your university admission questions.",
    "Welcome! Ask me anything about university admissions.",
];

pub const FALLBACK_REPLIES: &[&str] = &[
    "I'm sorry, I didn't understand that. I can help with admission deadlines, required documents, fees, and application status.",
    "Could you rephrase that? I specialize in university admission queries.",
    "I'm not sure I follow. I can assist with admission-related questions.",
];

/// Sent when the response bound elapses before the reply is ready.
pub const PLACEHOLDER_REPLIES: &[&str] = &[
    "I'm still processing your request. Please wait a moment while I gather the information.",
    "I'm working on your question and will respond shortly.",
    "Just a moment while I retrieve the information you requested.",
];

pub const UPLOAD_HELP: &str = "You can upload documents like transcripts, recommendation letters, or your CV by clicking the 'Upload File' button.";
pub const FILE_TYPES: &str = "I accept PDF, JPG, and PNG files for uploads.";

pub const CONTACT_FALLBACK: &str =
    "You can contact the admissions office at admissions@university.edu";

pub const GENERIC_APOLOGY: &str =
    "I encountered an error processing your request. Please try again.";
pub const UPLOAD_APOLOGY: &str = "I encountered an error processing your upload.";
pub const INVALID_FILE_TYPE: &str = "Invalid file type. Please upload PDF, JPG, or PNG files.";

/// Uniformly random member of a reply pool.
pub fn pick(pool: &[&'static str]) -> &'static str {
    pool.choose(&mut rand::rng()).copied().unwrap_or_default()
}

/// Upload help followed by the accepted file types.
pub fn upload_instructions() -> String {
    format!("{UPLOAD_HELP} {FILE_TYPES}")
}

pub fn upload_success(file_name: &str) -> String {
    format!("Document '{file_name}' uploaded successfully! We'll process it shortly.")
}

/// Offered when only program mentions were understood.
pub fn program_prompt(programs: &str) -> String {
    format!(
        "I can help with information about {programs} programs. Would you like to know about deadlines, required documents, or fees?"
    )
}

/// The fragment a handler contributes when it fails.
pub fn handler_apology(intent: Intent) -> &'static str {
    match intent {
        Intent::Deadline => "I encountered an error while checking deadlines.",
        Intent::Documents => "I encountered an error while checking document requirements.",
        Intent::Fees => "I encountered an error while checking fee information.",
        Intent::Status => "I encountered an error while checking your application status.",
        Intent::Help => "I encountered an error while preparing help information.",
        Intent::Upload => "I encountered an error while explaining file uploads.",
        Intent::Contact => "I encountered an error while retrieving contact information.",
        // Greeting has no handler, so dispatch never reaches this arm.
        Intent::Greeting => GENERIC_APOLOGY,
    }
}
