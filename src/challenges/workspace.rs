use crate::answers::{AnswersStore, SavedAnswer};
use crate::backend::{BackendError, Challenge};
use crate::challenges::catalog::{body_of, category_for, difficulty_label, title_of};
use crate::queries::ChallengeQueries;
use crate::storage::StorageError;
use crate::utils;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("Answer must not be empty")]
    EmptyAnswer,
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error("Failed to save answer: {0}")]
    Storage(#[from] StorageError),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceView {
    pub id: String,
    pub title: String,
    pub body: String,
    pub difficulty_label: &'static str,
    pub category: &'static str,
    pub estimated_time: u32,
    pub answer: String,
    pub word_count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedAnswer {
    pub challenge_id: String,
    #[serde(flatten)]
    pub saved: SavedAnswer,
    pub word_count: usize,
}

pub struct Workspace {
    queries: Arc<ChallengeQueries>,
    answers: Arc<AnswersStore>,
    submit_delay: Duration,
}

impl Workspace {
    pub fn new(
        queries: Arc<ChallengeQueries>,
        answers: Arc<AnswersStore>,
        submit_delay: Duration,
    ) -> Self {
        Self {
            queries,
            answers,
            submit_delay,
        }
    }

    pub async fn open(&self, challenge_id: &str) -> Result<WorkspaceView, WorkspaceError> {
        let challenge = self.queries.challenge(challenge_id).await?;
        let answer = self.answers.load(challenge_id).await;
        Ok(view(&challenge, answer))
    }

    /// The challenge must exist; the answer is stored locally only.
    pub async fn submit_answer(
        &self,
        challenge_id: &str,
        answer: &str,
    ) -> Result<SubmittedAnswer, WorkspaceError> {
        if answer.trim().is_empty() {
            return Err(WorkspaceError::EmptyAnswer);
        }
        self.queries.challenge(challenge_id).await?;

        tokio::time::sleep(self.submit_delay).await;
        let saved = self.answers.save(challenge_id, answer).await?;
        info!("Saved answer for {}", challenge_id);

        Ok(SubmittedAnswer {
            challenge_id: challenge_id.to_string(),
            word_count: utils::word_count(answer),
            saved,
        })
    }
}

fn view(challenge: &Challenge, answer: String) -> WorkspaceView {
    WorkspaceView {
        id: challenge.id.clone(),
        title: title_of(&challenge.description).to_string(),
        body: body_of(&challenge.description).to_string(),
        difficulty_label: difficulty_label(challenge.difficulty),
        category: category_for(&challenge.id),
        estimated_time: challenge.estimated_time,
        word_count: utils::word_count(&answer),
        answer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::challenges::seed_if_empty;
    use crate::queries::tests::FakeBackend;
    use crate::storage::MemoryStorage;

    async fn workspace(delay: Duration) -> (Workspace, Arc<AnswersStore>) {
        let queries = ChallengeQueries::new();
        queries.connect(Arc::new(FakeBackend::default())).await;
        seed_if_empty(&queries).await.unwrap();

        let answers = Arc::new(AnswersStore::new(MemoryStorage::new()));
        (Workspace::new(queries, answers.clone(), delay), answers)
    }

    #[tokio::test]
    async fn test_open_and_submit() {
        let (ws, answers) = workspace(Duration::ZERO).await;

        let view = ws.open("cache-strategy").await.unwrap();
        assert_eq!(view.title, "Design a Caching Strategy for an E-Commerce Platform");
        assert!(view.body.starts_with("An e-commerce site"));
        assert_eq!(view.category, "Caching");
        assert_eq!(view.difficulty_label, "Intermediate");
        assert_eq!(view.answer, "");
        assert_eq!(view.word_count, 0);

        let submitted = ws
            .submit_answer("cache-strategy", "Use Redis with\nwrite-through")
            .await
            .unwrap();
        assert_eq!(submitted.word_count, 4);
        assert_eq!(answers.load("cache-strategy").await, "Use Redis with\nwrite-through");

        let view = ws.open("cache-strategy").await.unwrap();
        assert_eq!(view.answer, "Use Redis with\nwrite-through");
        assert_eq!(view.word_count, 4);
    }

    #[tokio::test]
    async fn test_rejects_blank_and_unknown() {
        let (ws, answers) = workspace(Duration::ZERO).await;

        assert!(matches!(
            ws.submit_answer("cache-strategy", "   ").await,
            Err(WorkspaceError::EmptyAnswer)
        ));
        assert!(matches!(
            ws.submit_answer("missing", "answer").await,
            Err(WorkspaceError::Backend(BackendError::NotFound(_)))
        ));
        assert!(answers.load_all().await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_waits_for_delay() {
        let (ws, _) = workspace(Duration::from_millis(800)).await;

        let started = tokio::time::Instant::now();
        ws.submit_answer("ride-sharing-db", "timescale").await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(800));
    }
}
