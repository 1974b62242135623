use crate::backend::{Backend, BackendError, Challenge, MentorResponse};
use crate::entity::{challenges, mentor_responses};
use crate::utils;
use anyhow::Result;
use async_trait::async_trait;
use sea_orm::*;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

const MAX_DIFFICULTY: u32 = 3;

pub struct SqliteBackend {
    db_url: String,
}

impl SqliteBackend {
    pub async fn new(data_dir: &Path) -> Result<Arc<Self>> {
        std::fs::create_dir_all(data_dir)?;
        let db_url = utils::sqlite_url(data_dir);

        tokio::task::spawn_blocking({
            let db_url = db_url.clone();
            move || -> Result<()> {
                let db = Database::connect(&db_url)?;

                db.get_schema_builder()
                    .register(challenges::Entity)
                    .register(mentor_responses::Entity)
                    .apply(&db)?;

                Ok(())
            }
        })
        .await??;

        info!("Challenge backend ready (rusqlite)");
        Ok(Arc::new(Self { db_url }))
    }
}

#[async_trait]
impl Backend for SqliteBackend {
    async fn add_challenge(
        &self,
        id: &str,
        description: &str,
        difficulty: u32,
        estimated_time: u32,
    ) -> Result<(), BackendError> {
        if id.trim().is_empty() {
            return Err(BackendError::Invalid("id must not be empty".to_string()));
        }
        if !(1..=MAX_DIFFICULTY).contains(&difficulty) {
            return Err(BackendError::Invalid(format!(
                "difficulty must be between 1 and {}, got {}",
                MAX_DIFFICULTY, difficulty
            )));
        }

        let estimated_time = i32::try_from(estimated_time).map_err(|_| {
            BackendError::Invalid(format!(
                "estimated time must be at most {} minutes, got {}",
                i32::MAX,
                estimated_time
            ))
        })?;

        let record = challenges::ActiveModel {
            rowid: NotSet,
            id: Set(id.to_string()),
            description: Set(description.to_string()),
            difficulty: Set(difficulty as i32),
            estimated_time: Set(estimated_time),
            created_us: Set(chrono::Utc::now().timestamp_micros()),
        };

        let db_url = self.db_url.clone();
        let id = id.to_string();

        tokio::task::spawn_blocking(move || -> Result<(), BackendError> {
            let db = Database::connect(&db_url)?;

            let existing = challenges::Entity::find()
                .filter(challenges::Column::Id.eq(&id))
                .one(&db)?;
            if existing.is_some() {
                return Err(BackendError::Duplicate(id));
            }

            challenges::Entity::insert(record).exec(&db)?;
            info!("Added challenge: {}", id);
            Ok(())
        })
        .await?
    }

    async fn get_all_challenges(&self) -> Result<Vec<Challenge>, BackendError> {
        let db_url = self.db_url.clone();

        tokio::task::spawn_blocking(move || -> Result<Vec<Challenge>, BackendError> {
            let db = Database::connect(&db_url)?;
            let rows = challenges::Entity::find()
                .order_by_asc(challenges::Column::Rowid)
                .all(&db)?;

            Ok(rows.into_iter().map(|r| r.into()).collect())
        })
        .await?
    }

    async fn get_challenge(&self, id: &str) -> Result<Challenge, BackendError> {
        let db_url = self.db_url.clone();
        let id = id.to_string();

        tokio::task::spawn_blocking(move || -> Result<Challenge, BackendError> {
            let db = Database::connect(&db_url)?;
            challenges::Entity::find()
                .filter(challenges::Column::Id.eq(&id))
                .one(&db)?
                .map(|r| r.into())
                .ok_or(BackendError::NotFound(id))
        })
        .await?
    }

    async fn store_mentor_response(
        &self,
        session_id: &str,
        response: &MentorResponse,
    ) -> Result<(), BackendError> {
        let record = mentor_responses::ActiveModel {
            rowid: NotSet,
            session_id: Set(session_id.to_string()),
            approach: Set(response.approach.clone()),
            trade_offs: Set(response.trade_offs.clone()),
            real_world_analogy: Set(response.real_world_analogy.clone()),
            better_alternative: Set(response.better_alternative.clone()),
            timestamp_us: Set(chrono::Utc::now().timestamp_micros()),
        };

        let db_url = self.db_url.clone();
        tokio::task::spawn_blocking(move || -> Result<(), BackendError> {
            let db = Database::connect(&db_url)?;
            mentor_responses::Entity::insert(record).exec(&db)?;
            Ok(())
        })
        .await?
    }
}

impl From<challenges::Model> for Challenge {
    fn from(r: challenges::Model) -> Self {
        Self {
            id: r.id,
            description: r.description,
            difficulty: u32::try_from(r.difficulty).unwrap_or_default(),
            estimated_time: u32::try_from(r.estimated_time).unwrap_or_default(),
        }
    }
}
