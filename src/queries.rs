//! Cache-aware read/write wrappers over the backend handle.
//!
//! The handle starts out empty. Until [`ChallengeQueries::connect`] runs, the
//! list read yields an empty list and every other operation fails with
//! [`BackendError::NotReady`].

use crate::backend::{Backend, BackendError, Challenge, MentorResponse};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Default)]
pub struct ChallengeQueries {
    actor: RwLock<Option<Arc<dyn Backend>>>,
    list_cache: RwLock<Option<Vec<Challenge>>>,
    item_cache: RwLock<HashMap<String, Challenge>>,
}

impl ChallengeQueries {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub async fn connect(&self, backend: Arc<dyn Backend>) {
        *self.actor.write().await = Some(backend);
        self.invalidate_all().await;
    }

    pub async fn is_ready(&self) -> bool {
        self.actor.read().await.is_some()
    }

    async fn actor(&self) -> Result<Arc<dyn Backend>, BackendError> {
        self.actor.read().await.clone().ok_or(BackendError::NotReady)
    }

    pub async fn all_challenges(&self) -> Result<Vec<Challenge>, BackendError> {
        let Some(actor) = self.actor.read().await.clone() else {
            return Ok(Vec::new());
        };

        if let Some(cached) = self.list_cache.read().await.as_ref() {
            return Ok(cached.clone());
        }

        let list = actor.get_all_challenges().await?;
        debug!("Fetched {} challenges", list.len());
        *self.list_cache.write().await = Some(list.clone());
        Ok(list)
    }

    pub async fn challenge(&self, id: &str) -> Result<Challenge, BackendError> {
        let actor = self.actor().await?;

        if let Some(cached) = self.item_cache.read().await.get(id) {
            return Ok(cached.clone());
        }

        let challenge = actor.get_challenge(id).await?;
        self.item_cache
            .write()
            .await
            .insert(id.to_string(), challenge.clone());
        Ok(challenge)
    }

    pub async fn add_challenge(
        &self,
        id: &str,
        description: &str,
        difficulty: u32,
        estimated_time: u32,
    ) -> Result<(), BackendError> {
        let actor = self.actor().await?;
        actor
            .add_challenge(id, description, difficulty, estimated_time)
            .await?;
        *self.list_cache.write().await = None;
        Ok(())
    }

    pub async fn store_mentor_response(
        &self,
        session_id: &str,
        response: &MentorResponse,
    ) -> Result<(), BackendError> {
        self.actor()
            .await?
            .store_mentor_response(session_id, response)
            .await
    }

    pub async fn refetch(&self) -> Result<Vec<Challenge>, BackendError> {
        *self.list_cache.write().await = None;
        self.all_challenges().await
    }

    async fn invalidate_all(&self) {
        *self.list_cache.write().await = None;
        self.item_cache.write().await.clear();
    }
}
