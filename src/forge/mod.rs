//! LogicForge: mistake profiling over an external analysis service.

mod client;
mod quiz;
mod store;
mod types;
mod views;

pub use client::ForgeClient;
pub use quiz::{QUIZ, QuizQuestion, SkillLevel, score};
pub use store::{CognitiveProfile, ForgeStore, ProfileRecord, SubmissionRecord};
pub use types::{
    AnalysisResult, AnalyzeRequest, ImprovementEntry, MistakeTag, Problem, ProblemRequest, Severity,
};
pub use views::{Analytics, Dashboard, TagWeight, TimelinePoint, build_analytics, build_dashboard};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ForgeError {
    #[error("Code must not be empty")]
    EmptyCode,
    #[error("Analysis service is not configured")]
    NotConfigured,
    #[error("Analysis service returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("Analysis request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Profile not found: {0}")]
    ProfileNotFound(String),
    #[error("Invalid quiz submission: {0}")]
    InvalidQuiz(String),
    #[error("Storage operation failed: {0}")]
    Storage(String),
    #[error("Malformed stored data: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<sea_orm::DbErr> for ForgeError {
    fn from(e: sea_orm::DbErr) -> Self {
        Self::Storage(e.to_string())
    }
}

impl From<tokio::task::JoinError> for ForgeError {
    fn from(e: tokio::task::JoinError) -> Self {
        Self::Storage(e.to_string())
    }
}
