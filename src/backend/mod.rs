mod error;
mod sqlite;

use async_trait::async_trait;
pub use error::BackendError;
use serde::{Deserialize, Serialize};
pub use sqlite::SqliteBackend;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    pub id: String,
    pub description: String,
    pub difficulty: u32,
    pub estimated_time: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorResponse {
    pub approach: String,
    pub trade_offs: String,
    pub real_world_analogy: String,
    pub better_alternative: String,
}

/// Remote CRUD contract consumed by the query layer.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn add_challenge(
        &self,
        id: &str,
        description: &str,
        difficulty: u32,
        estimated_time: u32,
    ) -> Result<(), BackendError>;

    async fn get_all_challenges(&self) -> Result<Vec<Challenge>, BackendError>;

    async fn get_challenge(&self, id: &str) -> Result<Challenge, BackendError>;

    async fn store_mentor_response(
        &self,
        session_id: &str,
        response: &MentorResponse,
    ) -> Result<(), BackendError>;
}
