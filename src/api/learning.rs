use crate::api::{ApiError, AppState};
use crate::backend::Challenge;
use crate::challenges::{self, ChallengeFeed, ChallengeFilter, SubmittedAnswer, WorkspaceView};
use crate::mentor::{MentorReply, SUGGESTED_QUESTIONS};
use crate::notes::NoteSummary;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

type ApiResult<T> = Result<Json<T>, ApiError>;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub session_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewChallenge {
    pub id: String,
    pub description: String,
    pub difficulty: u32,
    pub estimated_time: u32,
}

#[derive(Debug, Serialize)]
pub struct SeedResponse {
    pub total: usize,
    pub challenges: Vec<Challenge>,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub answer: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AskRequest {
    pub question: String,
    /// Defaults to the stored session.
    #[serde(default)]
    pub session_id: Option<String>,
}

pub async fn session(State(state): State<Arc<AppState>>) -> ApiResult<SessionResponse> {
    let session_id = state.sessions.get_or_create().await?;
    Ok(Json(SessionResponse { session_id }))
}

pub async fn list_challenges(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<ChallengeFilter>,
) -> ApiResult<ChallengeFeed> {
    let all = state.queries.all_challenges().await?;
    Ok(Json(challenges::build_feed(&all, &filter)))
}

pub async fn add_challenge(
    State(state): State<Arc<AppState>>,
    Json(new): Json<NewChallenge>,
) -> Result<(StatusCode, Json<Challenge>), ApiError> {
    state
        .queries
        .add_challenge(&new.id, &new.description, new.difficulty, new.estimated_time)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(Challenge {
            id: new.id,
            description: new.description,
            difficulty: new.difficulty,
            estimated_time: new.estimated_time,
        }),
    ))
}

pub async fn seed_challenges(State(state): State<Arc<AppState>>) -> ApiResult<SeedResponse> {
    let challenges = challenges::seed_if_empty(&state.queries).await?;
    Ok(Json(SeedResponse {
        total: challenges.len(),
        challenges,
    }))
}

pub async fn open_challenge(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<WorkspaceView> {
    Ok(Json(state.workspace.open(&id).await?))
}

pub async fn submit_answer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<AnswerRequest>,
) -> ApiResult<SubmittedAnswer> {
    Ok(Json(
        state.workspace.submit_answer(&id, &request.answer).await?,
    ))
}

pub async fn ask_mentor(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AskRequest>,
) -> ApiResult<MentorReply> {
    let session_id = match request.session_id {
        Some(id) => id,
        None => state.sessions.current().await,
    };
    Ok(Json(state.mentor.ask(&session_id, &request.question).await?))
}

pub async fn suggestions() -> Json<[&'static str; 3]> {
    Json(SUGGESTED_QUESTIONS)
}

pub async fn list_notes(State(state): State<Arc<AppState>>) -> Json<Vec<NoteSummary>> {
    let now = chrono::Utc::now();
    Json(
        state
            .notes
            .list()
            .await
            .into_iter()
            .map(|note| NoteSummary::new(note, now))
            .collect(),
    )
}

pub async fn clear_notes(State(state): State<Arc<AppState>>) -> Result<StatusCode, ApiError> {
    state.notes.clear().await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_note(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.notes.delete(&id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("Note not found: {}", id)))
    }
}
