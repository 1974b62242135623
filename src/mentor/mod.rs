//! Keyword-matched mentor replies.

mod knowledge;
mod service;

use crate::backend::MentorResponse;
pub use knowledge::{DEFAULT_RESPONSE, KNOWLEDGE_BASE, KnowledgeEntry, SUGGESTED_QUESTIONS};
pub use service::{MentorError, MentorReply, MentorService};

/// Case-insensitive substring match over the knowledge base, first entry wins.
pub fn find_response(question: &str) -> &'static MentorResponse {
    let lower = question.to_lowercase();
    KNOWLEDGE_BASE
        .iter()
        .find(|entry| entry.keywords.iter().any(|kw| lower.contains(kw)))
        .map(|entry| &entry.response)
        .unwrap_or(&*DEFAULT_RESPONSE)
}
