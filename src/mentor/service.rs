use crate::mentor::find_response;
use crate::notes::{NotesStore, SavedNote};
use crate::queries::ChallengeQueries;
use crate::storage::StorageError;
use rand::Rng;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum MentorError {
    #[error("Question must not be empty")]
    EmptyQuestion,
    #[error("Failed to save note: {0}")]
    Storage(#[from] StorageError),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorReply {
    pub note: SavedNote,
    /// Whether the backend accepted the response.
    pub persisted: bool,
}

pub struct MentorService {
    notes: Arc<NotesStore>,
    queries: Arc<ChallengeQueries>,
    thinking_delay: (Duration, Duration),
}

impl MentorService {
    pub fn new(
        notes: Arc<NotesStore>,
        queries: Arc<ChallengeQueries>,
        thinking_delay: (Duration, Duration),
    ) -> Self {
        Self {
            notes,
            queries,
            thinking_delay,
        }
    }

    pub async fn ask(&self, session_id: &str, question: &str) -> Result<MentorReply, MentorError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(MentorError::EmptyQuestion);
        }

        tokio::time::sleep(self.pick_delay()).await;

        let response = find_response(question);
        let note = self.notes.save(question, response).await?;
        debug!("Mentor answered with: {}", response.approach);

        let persisted = match self.queries.store_mentor_response(session_id, response).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to persist mentor response for {}: {}", session_id, e);
                false
            }
        };

        Ok(MentorReply { note, persisted })
    }

    fn pick_delay(&self) -> Duration {
        let (min, max) = self.thinking_delay;
        if max <= min {
            return min;
        }
        rand::thread_rng().gen_range(min..max)
    }
}
