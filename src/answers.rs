use crate::storage::{StorageError, StoragePort};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

const ANSWERS_KEY: &str = "skillbridge_answers";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedAnswer {
    pub answer: String,
    pub saved_at: DateTime<Utc>,
}

/// Challenge answers keyed by challenge id.
pub struct AnswersStore {
    storage: Arc<dyn StoragePort>,
    write_lock: Mutex<()>,
}

impl AnswersStore {
    pub fn new(storage: Arc<dyn StoragePort>) -> Self {
        Self {
            storage,
            write_lock: Mutex::new(()),
        }
    }

    pub async fn load_all(&self) -> HashMap<String, SavedAnswer> {
        let Some(raw) = self.storage.get(ANSWERS_KEY).await else {
            return HashMap::new();
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            debug!("Discarding unreadable answers: {}", e);
            HashMap::new()
        })
    }

    /// Empty string when nothing was saved for `challenge_id`.
    pub async fn load(&self, challenge_id: &str) -> String {
        self.load_all()
            .await
            .remove(challenge_id)
            .map(|saved| saved.answer)
            .unwrap_or_default()
    }

    pub async fn save(&self, challenge_id: &str, answer: &str) -> Result<SavedAnswer, StorageError> {
        let _guard = self.write_lock.lock().await;

        let saved = SavedAnswer {
            answer: answer.to_string(),
            saved_at: Utc::now(),
        };

        let mut all = self.load_all().await;
        all.insert(challenge_id.to_string(), saved.clone());
        self.storage
            .set(ANSWERS_KEY, &serde_json::to_string(&all)?)
            .await?;
        Ok(saved)
    }
}
