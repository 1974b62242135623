use crate::entity::{cognitive_profiles, profiles, submissions};
use crate::forge::quiz::{self, QUIZ, SkillLevel};
use crate::forge::types::{ImprovementEntry, MistakeTag};
use crate::forge::ForgeError;
use crate::utils;
use anyhow::Result;
use chrono::{DateTime, Utc};
use sea_orm::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

const QUIZ_OPTIONS: [&str; 4] = ["a", "b", "c", "d"];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    pub user_id: String,
    pub display_name: Option<String>,
    pub skill_level: Option<String>,
    pub streak_count: u32,
    pub quiz_completed: bool,
    pub quiz_answers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CognitiveProfile {
    pub user_id: String,
    pub tag_weights: BTreeMap<String, f64>,
    pub dominant_weakness: Option<String>,
    pub total_submissions: u32,
    pub improvement_history: Vec<ImprovementEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    pub id: String,
    pub user_id: String,
    pub language: String,
    pub code: String,
    pub mistake_tags: Vec<MistakeTag>,
    pub created_at: DateTime<Utc>,
}

/// Profiles, cognitive profiles and submissions for LogicForge users.
pub struct ForgeStore {
    db_url: String,
}

impl ForgeStore {
    pub async fn new(data_dir: &Path) -> Result<Arc<Self>> {
        std::fs::create_dir_all(data_dir)?;
        let db_url = utils::sqlite_url(data_dir);

        tokio::task::spawn_blocking({
            let db_url = db_url.clone();
            move || -> Result<()> {
                let db = Database::connect(&db_url)?;

                db.get_schema_builder()
                    .register(profiles::Entity)
                    .register(cognitive_profiles::Entity)
                    .register(submissions::Entity)
                    .apply(&db)?;

                Ok(())
            }
        })
        .await??;

        info!("Forge store ready");
        Ok(Arc::new(Self { db_url }))
    }

    /// Returns the user's profile, creating a blank one on first sight.
    pub async fn ensure_profile(&self, user_id: &str) -> Result<ProfileRecord, ForgeError> {
        let db_url = self.db_url.clone();
        let user_id = user_id.to_string();

        tokio::task::spawn_blocking(move || -> Result<ProfileRecord, ForgeError> {
            let db = Database::connect(&db_url)?;
            if let Some(row) = find_profile(&db, &user_id)? {
                return row.try_into();
            }

            let record = profiles::ActiveModel {
                rowid: NotSet,
                user_id: Set(user_id.clone()),
                display_name: Set(None),
                skill_level: Set(None),
                streak_count: Set(0),
                quiz_completed: Set(false),
                quiz_answers: Set("[]".to_string()),
            };
            profiles::Entity::insert(record).exec(&db)?;
            info!("Created profile for {}", user_id);

            find_profile(&db, &user_id)?
                .ok_or(ForgeError::ProfileNotFound(user_id))?
                .try_into()
        })
        .await?
    }

    pub async fn profile(&self, user_id: &str) -> Result<ProfileRecord, ForgeError> {
        let db_url = self.db_url.clone();
        let user_id = user_id.to_string();

        tokio::task::spawn_blocking(move || -> Result<ProfileRecord, ForgeError> {
            let db = Database::connect(&db_url)?;
            find_profile(&db, &user_id)?
                .ok_or(ForgeError::ProfileNotFound(user_id))?
                .try_into()
        })
        .await?
    }

    /// Stores the quiz answers, derives the skill level and makes sure an
    /// empty cognitive profile exists.
    pub async fn complete_quiz(
        &self,
        user_id: &str,
        answers: &[String],
    ) -> Result<ProfileRecord, ForgeError> {
        if answers.len() != QUIZ.len() {
            return Err(ForgeError::InvalidQuiz(format!(
                "expected {} answers, got {}",
                QUIZ.len(),
                answers.len()
            )));
        }
        if let Some(bad) = answers.iter().find(|a| !QUIZ_OPTIONS.contains(&a.as_str())) {
            return Err(ForgeError::InvalidQuiz(format!("unknown option: {}", bad)));
        }

        let level = SkillLevel::from_correct(quiz::score(answers));
        let answers_json = serde_json::to_string(answers)?;

        self.ensure_profile(user_id).await?;

        let db_url = self.db_url.clone();
        let user_id = user_id.to_string();

        tokio::task::spawn_blocking(move || -> Result<ProfileRecord, ForgeError> {
            let db = Database::connect(&db_url)?;

            let row = find_profile(&db, &user_id)?
                .ok_or_else(|| ForgeError::ProfileNotFound(user_id.clone()))?;
            let mut active = row.into_active_model();
            active.quiz_completed = Set(true);
            active.quiz_answers = Set(answers_json);
            active.skill_level = Set(Some(level.as_str().to_string()));
            let updated = active.update(&db)?;

            let existing = cognitive_profiles::Entity::find()
                .filter(cognitive_profiles::Column::UserId.eq(&user_id))
                .one(&db)?;
            if existing.is_none() {
                let record = cognitive_profiles::ActiveModel {
                    rowid: NotSet,
                    user_id: Set(user_id.clone()),
                    tag_weights: Set("{}".to_string()),
                    dominant_weakness: Set(None),
                    total_submissions: Set(0),
                    improvement_history: Set("[]".to_string()),
                };
                cognitive_profiles::Entity::insert(record).exec(&db)?;
            }

            info!("Quiz completed for {} ({})", user_id, level.as_str());
            updated.try_into()
        })
        .await?
    }

    pub async fn cognitive_profile(
        &self,
        user_id: &str,
    ) -> Result<Option<CognitiveProfile>, ForgeError> {
        let db_url = self.db_url.clone();
        let user_id = user_id.to_string();

        tokio::task::spawn_blocking(move || -> Result<Option<CognitiveProfile>, ForgeError> {
            let db = Database::connect(&db_url)?;
            cognitive_profiles::Entity::find()
                .filter(cognitive_profiles::Column::UserId.eq(&user_id))
                .one(&db)?
                .map(CognitiveProfile::try_from)
                .transpose()
        })
        .await?
    }

    /// Stores an analysed submission and bumps the submission counter on the
    /// cognitive profile when one exists.
    pub async fn record_submission(
        &self,
        user_id: &str,
        language: &str,
        code: &str,
        tags: &[MistakeTag],
    ) -> Result<SubmissionRecord, ForgeError> {
        let record = submissions::ActiveModel {
            rowid: NotSet,
            id: Set(uuid::Uuid::new_v4().to_string()),
            user_id: Set(user_id.to_string()),
            language: Set(language.to_string()),
            code: Set(code.to_string()),
            mistake_tags: Set(serde_json::to_string(tags)?),
            created_us: Set(Utc::now().timestamp_micros()),
        };

        let db_url = self.db_url.clone();
        let user_id = user_id.to_string();

        tokio::task::spawn_blocking(move || -> Result<SubmissionRecord, ForgeError> {
            let db = Database::connect(&db_url)?;
            let id = submissions::Entity::insert(record).exec(&db)?.last_insert_id;

            if let Some(cognitive) = cognitive_profiles::Entity::find()
                .filter(cognitive_profiles::Column::UserId.eq(&user_id))
                .one(&db)?
            {
                let total = cognitive.total_submissions + 1;
                let mut active = cognitive.into_active_model();
                active.total_submissions = Set(total);
                active.update(&db)?;
            }

            let row = submissions::Entity::find()
                .filter(submissions::Column::Rowid.eq(id))
                .one(&db)?
                .ok_or_else(|| ForgeError::Storage(format!("submission {} vanished", id)))?;
            debug!("Recorded submission {} for {}", row.id, user_id);
            row.try_into()
        })
        .await?
    }

    /// All submissions of a user, oldest first.
    pub async fn submissions(&self, user_id: &str) -> Result<Vec<SubmissionRecord>, ForgeError> {
        let db_url = self.db_url.clone();
        let user_id = user_id.to_string();

        tokio::task::spawn_blocking(move || -> Result<Vec<SubmissionRecord>, ForgeError> {
            let db = Database::connect(&db_url)?;
            submissions::Entity::find()
                .filter(submissions::Column::UserId.eq(&user_id))
                .order_by_asc(submissions::Column::CreatedUs)
                .order_by_asc(submissions::Column::Rowid)
                .all(&db)?
                .into_iter()
                .map(SubmissionRecord::try_from)
                .collect()
        })
        .await?
    }

    /// Newest first.
    pub async fn recent_submissions(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<SubmissionRecord>, ForgeError> {
        let db_url = self.db_url.clone();
        let user_id = user_id.to_string();

        tokio::task::spawn_blocking(move || -> Result<Vec<SubmissionRecord>, ForgeError> {
            let db = Database::connect(&db_url)?;
            submissions::Entity::find()
                .filter(submissions::Column::UserId.eq(&user_id))
                .order_by_desc(submissions::Column::CreatedUs)
                .order_by_desc(submissions::Column::Rowid)
                .limit(limit as u64)
                .all(&db)?
                .into_iter()
                .map(SubmissionRecord::try_from)
                .collect()
        })
        .await?
    }
}

fn find_profile(db: &DatabaseConnection, user_id: &str) -> Result<Option<profiles::Model>, DbErr> {
    profiles::Entity::find()
        .filter(profiles::Column::UserId.eq(user_id))
        .one(db)
}

impl TryFrom<profiles::Model> for ProfileRecord {
    type Error = ForgeError;

    fn try_from(r: profiles::Model) -> Result<Self, ForgeError> {
        Ok(Self {
            quiz_answers: serde_json::from_str(&r.quiz_answers)?,
            user_id: r.user_id,
            display_name: r.display_name,
            skill_level: r.skill_level,
            streak_count: u32::try_from(r.streak_count).unwrap_or_default(),
            quiz_completed: r.quiz_completed,
        })
    }
}

impl TryFrom<cognitive_profiles::Model> for CognitiveProfile {
    type Error = ForgeError;

    fn try_from(r: cognitive_profiles::Model) -> Result<Self, ForgeError> {
        Ok(Self {
            tag_weights: serde_json::from_str(&r.tag_weights)?,
            improvement_history: serde_json::from_str(&r.improvement_history)?,
            user_id: r.user_id,
            dominant_weakness: r.dominant_weakness,
            total_submissions: u32::try_from(r.total_submissions).unwrap_or_default(),
        })
    }
}

impl TryFrom<submissions::Model> for SubmissionRecord {
    type Error = ForgeError;

    fn try_from(r: submissions::Model) -> Result<Self, ForgeError> {
        Ok(Self {
            mistake_tags: serde_json::from_str(&r.mistake_tags)?,
            created_at: DateTime::from_timestamp_micros(r.created_us).unwrap_or_default(),
            id: r.id,
            user_id: r.user_id,
            language: r.language,
            code: r.code,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forge::Severity;
    use tempfile::TempDir;

    fn answers(a: &[&str]) -> Vec<String> {
        a.iter().map(ToString::to_string).collect()
    }

    fn tag(name: &str) -> MistakeTag {
        MistakeTag {
            tag: name.to_string(),
            explanation: format!("{} found", name),
            severity: Severity::Medium,
            line_hint: None,
        }
    }

    #[tokio::test]
    async fn test_ensure_profile_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let store = ForgeStore::new(temp_dir.path()).await.unwrap();

        assert!(matches!(
            store.profile("u1").await,
            Err(ForgeError::ProfileNotFound(_))
        ));

        let first = store.ensure_profile("u1").await.unwrap();
        let second = store.ensure_profile("u1").await.unwrap();
        assert_eq!(first, second);
        assert!(!first.quiz_completed);
        assert!(first.quiz_answers.is_empty());
        assert_eq!(store.profile("u1").await.unwrap(), first);
    }

    #[tokio::test]
    async fn test_complete_quiz_sets_level_and_cognitive_profile() {
        let temp_dir = TempDir::new().unwrap();
        let store = ForgeStore::new(temp_dir.path()).await.unwrap();

        let profile = store
            .complete_quiz("u1", &answers(&["b", "a", "c", "a", "a"]))
            .await
            .unwrap();
        assert!(profile.quiz_completed);
        assert_eq!(profile.skill_level.as_deref(), Some("intermediate"));
        assert_eq!(profile.quiz_answers, answers(&["b", "a", "c", "a", "a"]));

        let cognitive = store.cognitive_profile("u1").await.unwrap().unwrap();
        assert!(cognitive.tag_weights.is_empty());
        assert_eq!(cognitive.total_submissions, 0);
        assert!(cognitive.dominant_weakness.is_none());

        // retaking keeps a single cognitive profile
        let profile = store
            .complete_quiz("u1", &answers(&["b", "a", "c", "c", "b"]))
            .await
            .unwrap();
        assert_eq!(profile.skill_level.as_deref(), Some("advanced"));
        assert!(store.cognitive_profile("u1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_complete_quiz_rejects_bad_answers() {
        let temp_dir = TempDir::new().unwrap();
        let store = ForgeStore::new(temp_dir.path()).await.unwrap();

        let err = store
            .complete_quiz("u1", &answers(&["a", "b"]))
            .await
            .unwrap_err();
        assert!(matches!(err, ForgeError::InvalidQuiz(_)));

        let err = store
            .complete_quiz("u1", &answers(&["a", "b", "c", "d", "e"]))
            .await
            .unwrap_err();
        assert!(matches!(err, ForgeError::InvalidQuiz(_)));
        assert!(store.cognitive_profile("u1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_submissions_ordering() {
        let temp_dir = TempDir::new().unwrap();
        let store = ForgeStore::new(temp_dir.path()).await.unwrap();
        store
            .complete_quiz("u1", &answers(&["a", "a", "a", "a", "a"]))
            .await
            .unwrap();

        for i in 0..7 {
            let tags: Vec<MistakeTag> = (0..i % 3).map(|_| tag("off-by-one")).collect();
            store
                .record_submission("u1", "python", &format!("print({})", i), &tags)
                .await
                .unwrap();
        }
        store
            .record_submission("u2", "c", "int main;", &[])
            .await
            .unwrap();

        let all = store.submissions("u1").await.unwrap();
        assert_eq!(all.len(), 7);
        assert_eq!(all[0].code, "print(0)");
        assert_eq!(all[6].code, "print(6)");
        assert_eq!(all[2].mistake_tags.len(), 2);

        let recent = store.recent_submissions("u1", 5).await.unwrap();
        let codes: Vec<&str> = recent.iter().map(|s| s.code.as_str()).collect();
        assert_eq!(
            codes,
            vec!["print(6)", "print(5)", "print(4)", "print(3)", "print(2)"]
        );

        let cognitive = store.cognitive_profile("u1").await.unwrap().unwrap();
        assert_eq!(cognitive.total_submissions, 7);
        assert!(store.cognitive_profile("u2").await.unwrap().is_none());
    }
}
