use crate::api::{ApiError, AppState};
use crate::forge::{
    self, AnalysisResult, AnalyzeRequest, Analytics, Dashboard, ForgeClient, ForgeError, Problem,
    ProblemRequest, ProfileRecord, QUIZ, QuizQuestion, SubmissionRecord,
};
use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const RECENT_SUBMISSIONS: usize = 5;

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub result: AnalysisResult,
    pub submission: SubmissionRecord,
}

#[derive(Debug, Deserialize)]
pub struct QuizRequest {
    pub answers: Vec<String>,
}

fn client(state: &AppState) -> Result<&ForgeClient, ApiError> {
    state
        .forge_client
        .as_ref()
        .ok_or_else(|| ForgeError::NotConfigured.into())
}

/// Runs the analysis and keeps the submission in the local profile store.
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let result = client(&state)?.analyze_code(&request).await?;

    state.forge_store.ensure_profile(&request.user_id).await?;
    let submission = state
        .forge_store
        .record_submission(
            &request.user_id,
            &request.language,
            &request.code,
            &result.tags,
        )
        .await?;

    Ok(Json(AnalyzeResponse { result, submission }))
}

pub async fn problem(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ProblemRequest>,
) -> Result<Json<Problem>, ApiError> {
    Ok(Json(
        client(&state)?
            .generate_problem(&request.user_id)
            .await?,
    ))
}

pub async fn quiz() -> Json<&'static [QuizQuestion]> {
    Json(&QUIZ[..])
}

pub async fn complete_quiz(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(request): Json<QuizRequest>,
) -> Result<Json<ProfileRecord>, ApiError> {
    Ok(Json(
        state
            .forge_store
            .complete_quiz(&user_id, &request.answers)
            .await?,
    ))
}

pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<Dashboard>, ApiError> {
    let store = &state.forge_store;
    let profile = store.ensure_profile(&user_id).await?;
    let cognitive = store.cognitive_profile(&user_id).await?;
    let recent = store
        .recent_submissions(&user_id, RECENT_SUBMISSIONS)
        .await?;

    Ok(Json(forge::build_dashboard(
        &profile,
        cognitive.as_ref(),
        recent,
    )))
}

pub async fn analytics(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<Analytics>, ApiError> {
    let store = &state.forge_store;
    let cognitive = store.cognitive_profile(&user_id).await?;
    let submissions = store.submissions(&user_id).await?;

    Ok(Json(forge::build_analytics(cognitive.as_ref(), &submissions)))
}
