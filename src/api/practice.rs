use crate::api::{ApiError, AppState};
use crate::comparison::ComparisonSnapshot;
use crate::conflict::{ConflictTrainer, SCENARIOS, TrainerSnapshot};
use crate::visualizer::{self, DisplayList, DsInfo, DsType};
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct ScenarioSummary {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct MergedRequest {
    pub merged: String,
}

#[derive(Debug, Deserialize)]
pub struct FrameQuery {
    pub ds: String,
    #[serde(default)]
    pub step: usize,
    #[serde(default)]
    pub format: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StructuresRequest {
    pub left: DsType,
    pub right: DsType,
}

pub async fn list_scenarios() -> Json<Vec<ScenarioSummary>> {
    Json(
        SCENARIOS
            .iter()
            .map(|s| ScenarioSummary {
                id: s.id,
                title: s.title,
                description: s.description,
            })
            .collect(),
    )
}

/// Switches the trainer to `id` unless it is already there.
fn select(trainer: &mut ConflictTrainer, id: &str) -> Result<(), ApiError> {
    if trainer.scenario_id() == id || trainer.select(id) {
        Ok(())
    } else {
        Err(ApiError::NotFound(format!("Scenario not found: {}", id)))
    }
}

pub async fn open_scenario(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<TrainerSnapshot>, ApiError> {
    let mut trainer = state.trainer.write().await;
    select(&mut trainer, &id)?;
    Ok(Json(trainer.snapshot()))
}

pub async fn edit_merged(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<MergedRequest>,
) -> Result<Json<TrainerSnapshot>, ApiError> {
    let mut trainer = state.trainer.write().await;
    select(&mut trainer, &id)?;
    trainer.set_merged(&request.merged);
    Ok(Json(trainer.snapshot()))
}

pub async fn check_merge(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<TrainerSnapshot>, ApiError> {
    let mut trainer = state.trainer.write().await;
    select(&mut trainer, &id)?;
    trainer.check();
    Ok(Json(trainer.snapshot()))
}

pub async fn reveal_hint(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<TrainerSnapshot>, ApiError> {
    let mut trainer = state.trainer.write().await;
    select(&mut trainer, &id)?;
    trainer.reveal_hint();
    Ok(Json(trainer.snapshot()))
}

pub async fn reset_scenario(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<TrainerSnapshot>, ApiError> {
    let mut trainer = state.trainer.write().await;
    select(&mut trainer, &id)?;
    trainer.reset();
    Ok(Json(trainer.snapshot()))
}

pub async fn structures() -> Json<Vec<DsInfo>> {
    Json(DsType::ALL.iter().map(DsType::info).collect())
}

pub async fn frame(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FrameQuery>,
) -> Result<Response, ApiError> {
    let ds: DsType = query
        .ds
        .parse()
        .map_err(|e: anyhow::Error| ApiError::BadRequest(e.to_string()))?;

    let mut list = DisplayList::default();
    visualizer::render_frame(&mut list, ds, &state.dataset, state.target, query.step);

    match query.format.as_deref() {
        None | Some("json") => Ok(Json(list).into_response()),
        Some("svg") => {
            let svg = list.to_svg()?;
            Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response())
        }
        Some(other) => Err(ApiError::BadRequest(format!("Unknown format: {}", other))),
    }
}

pub async fn comparison(State(state): State<Arc<AppState>>) -> Json<ComparisonSnapshot> {
    Json(state.comparison.snapshot().await)
}

pub async fn run_comparison(State(state): State<Arc<AppState>>) -> Json<ComparisonSnapshot> {
    Json(state.comparison.run().await)
}

pub async fn reset_comparison(State(state): State<Arc<AppState>>) -> Json<ComparisonSnapshot> {
    Json(state.comparison.reset().await)
}

pub async fn set_comparison_structures(
    State(state): State<Arc<AppState>>,
    Json(request): Json<StructuresRequest>,
) -> Json<ComparisonSnapshot> {
    Json(
        state
            .comparison
            .set_structures(request.left, request.right)
            .await,
    )
}
