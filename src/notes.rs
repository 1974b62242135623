//! Saved mentor notes, kept as one JSON array under a single storage key.

use crate::backend::MentorResponse;
use crate::storage::{StorageError, StoragePort};
use crate::utils;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

const NOTES_KEY: &str = "skillbridge_mentor_notes";
const APPROACH_PREVIEW_CHARS: usize = 40;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedNote {
    pub id: String,
    pub question: String,
    pub response: MentorResponse,
    pub saved_at: DateTime<Utc>,
}

/// List entry with the display fields derived from a note.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteSummary {
    #[serde(flatten)]
    pub note: SavedNote,
    pub saved_ago: String,
    pub approach_preview: String,
}

impl NoteSummary {
    pub fn new(note: SavedNote, now: DateTime<Utc>) -> Self {
        Self {
            saved_ago: utils::format_time_ago(note.saved_at, now),
            approach_preview: utils::preview(&note.response.approach, APPROACH_PREVIEW_CHARS),
            note,
        }
    }
}

pub struct NotesStore {
    storage: Arc<dyn StoragePort>,
    write_lock: Mutex<()>,
}

impl NotesStore {
    pub fn new(storage: Arc<dyn StoragePort>) -> Self {
        Self {
            storage,
            write_lock: Mutex::new(()),
        }
    }

    pub async fn list(&self) -> Vec<SavedNote> {
        let Some(raw) = self.storage.get(NOTES_KEY).await else {
            return Vec::new();
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            debug!("Discarding unreadable notes: {}", e);
            Vec::new()
        })
    }

    pub async fn save(
        &self,
        question: &str,
        response: &MentorResponse,
    ) -> Result<SavedNote, StorageError> {
        let _guard = self.write_lock.lock().await;

        let note = SavedNote {
            id: uuid::Uuid::new_v4().to_string(),
            question: question.to_string(),
            response: response.clone(),
            saved_at: Utc::now(),
        };

        let mut notes = self.list().await;
        notes.push(note.clone());
        self.write(&notes).await?;
        Ok(note)
    }

    /// Returns `false` when no note has the given id.
    pub async fn delete(&self, id: &str) -> Result<bool, StorageError> {
        let _guard = self.write_lock.lock().await;

        let mut notes = self.list().await;
        let before = notes.len();
        notes.retain(|n| n.id != id);
        if notes.len() == before {
            return Ok(false);
        }

        self.write(&notes).await?;
        Ok(true)
    }

    pub async fn clear(&self) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        self.storage.remove(NOTES_KEY).await
    }

    async fn write(&self, notes: &[SavedNote]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(notes)?;
        self.storage.set(NOTES_KEY, &raw).await
    }
}
