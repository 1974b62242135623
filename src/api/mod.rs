//! HTTP surface over the learning services.

mod error;
mod forge;
mod learning;
mod practice;

pub use error::ApiError;

use crate::answers::AnswersStore;
use crate::challenges::Workspace;
use crate::comparison::ComparisonDriver;
use crate::config::Config;
use crate::conflict::ConflictTrainer;
use crate::forge::{ForgeClient, ForgeStore};
use crate::mentor::MentorService;
use crate::notes::NotesStore;
use crate::queries::ChallengeQueries;
use crate::session::SessionStore;
use crate::storage::StoragePort;
use axum::extract::State;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub struct AppState {
    pub queries: Arc<ChallengeQueries>,
    pub sessions: SessionStore,
    pub notes: Arc<NotesStore>,
    pub workspace: Workspace,
    pub mentor: MentorService,
    pub trainer: RwLock<ConflictTrainer>,
    pub comparison: ComparisonDriver,
    pub forge_store: Arc<ForgeStore>,
    pub forge_client: Option<ForgeClient>,
    pub dataset: Vec<i64>,
    pub target: i64,
}

impl AppState {
    pub fn new(
        config: &Config,
        storage: Arc<dyn StoragePort>,
        queries: Arc<ChallengeQueries>,
        forge_store: Arc<ForgeStore>,
        forge_client: Option<ForgeClient>,
    ) -> Arc<Self> {
        let notes = Arc::new(NotesStore::new(storage.clone()));
        let answers = Arc::new(AnswersStore::new(storage.clone()));

        Arc::new(Self {
            sessions: SessionStore::new(storage),
            workspace: Workspace::new(queries.clone(), answers, config.submit_delay),
            mentor: MentorService::new(notes.clone(), queries.clone(), config.thinking_delay),
            trainer: RwLock::new(ConflictTrainer::default()),
            comparison: ComparisonDriver::new(
                config.dataset.clone(),
                config.target,
                config.step_interval,
            ),
            notes,
            queries,
            forge_store,
            forge_client,
            dataset: config.dataset.clone(),
            target: config.target,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub backend_ready: bool,
    pub forge_configured: bool,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/session", get(learning::session))
        .route(
            "/api/challenges",
            get(learning::list_challenges).post(learning::add_challenge),
        )
        .route("/api/challenges/seed", post(learning::seed_challenges))
        .route("/api/challenges/:id", get(learning::open_challenge))
        .route("/api/challenges/:id/answer", put(learning::submit_answer))
        .route("/api/mentor/ask", post(learning::ask_mentor))
        .route("/api/mentor/suggestions", get(learning::suggestions))
        .route(
            "/api/notes",
            get(learning::list_notes).delete(learning::clear_notes),
        )
        .route("/api/notes/:id", delete(learning::delete_note))
        .route("/api/conflicts", get(practice::list_scenarios))
        .route("/api/conflicts/:id", get(practice::open_scenario))
        .route("/api/conflicts/:id/merged", put(practice::edit_merged))
        .route("/api/conflicts/:id/check", post(practice::check_merge))
        .route("/api/conflicts/:id/hint", post(practice::reveal_hint))
        .route("/api/conflicts/:id/reset", post(practice::reset_scenario))
        .route("/api/visualizer/structures", get(practice::structures))
        .route("/api/visualizer/frame", get(practice::frame))
        .route("/api/comparison", get(practice::comparison))
        .route("/api/comparison/run", post(practice::run_comparison))
        .route("/api/comparison/reset", post(practice::reset_comparison))
        .route(
            "/api/comparison/structures",
            post(practice::set_comparison_structures),
        )
        .route("/api/forge/analyze", post(forge::analyze))
        .route("/api/forge/problem", post(forge::problem))
        .route("/api/forge/quiz", get(forge::quiz))
        .route("/api/forge/:user_id/quiz", post(forge::complete_quiz))
        .route("/api/forge/:user_id/dashboard", get(forge::dashboard))
        .route("/api/forge/:user_id/analytics", get(forge::analytics))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        backend_ready: state.queries.is_ready().await,
        forge_configured: state.forge_client.is_some(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::tests::FakeBackend;
    use crate::storage::MemoryStorage;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{Value, json};
    use std::time::Duration;
    use tempfile::TempDir;
    use tower::ServiceExt;

    struct Harness {
        app: Router,
        state: Arc<AppState>,
        _temp_dir: TempDir,
    }

    async fn harness(connected: bool) -> Harness {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::from_toml(
            r#"
            [server]
            bind = "127.0.0.1:0"
            [storage]
            data_dir = "unused"
            "#,
        )
        .unwrap();
        config.thinking_delay = (Duration::ZERO, Duration::ZERO);
        config.submit_delay = Duration::ZERO;

        let queries = ChallengeQueries::new();
        if connected {
            queries.connect(Arc::new(FakeBackend::default())).await;
        }
        let forge_store = ForgeStore::new(temp_dir.path()).await.unwrap();
        let state = AppState::new(&config, MemoryStorage::new(), queries, forge_store, None);

        Harness {
            app: create_router(state.clone()),
            state,
            _temp_dir: temp_dir,
        }
    }

    async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let h = harness(false).await;
        let (status, body) = call(&h.app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["backend_ready"], false);
        assert_eq!(body["forge_configured"], false);
    }

    #[tokio::test]
    async fn test_challenges_before_backend_is_ready() {
        let h = harness(false).await;

        let (status, body) = call(&h.app, "GET", "/api/challenges", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["challenges"], json!([]));

        let (status, _) = call(&h.app, "POST", "/api/challenges/seed", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

        let (status, _) = call(&h.app, "GET", "/api/challenges/cache-strategy", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_seed_filter_and_answer() {
        let h = harness(true).await;

        let (status, body) = call(&h.app, "POST", "/api/challenges/seed", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 7);

        let (_, body) = call(
            &h.app,
            "GET",
            "/api/challenges?category=Caching&difficulty=all",
            None,
        )
        .await;
        let ids: Vec<&str> = body["challenges"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["cache-strategy"]);

        let (status, body) = call(
            &h.app,
            "PUT",
            "/api/challenges/cache-strategy/answer",
            Some(json!({ "answer": "Write-through with TTLs" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["wordCount"], 3);

        let (_, body) = call(&h.app, "GET", "/api/challenges/cache-strategy", None).await;
        assert_eq!(body["answer"], "Write-through with TTLs");

        let (status, _) = call(
            &h.app,
            "PUT",
            "/api/challenges/missing/answer",
            Some(json!({ "answer": "x" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_add_duplicate_challenge_conflicts() {
        let h = harness(true).await;
        let new = json!({
            "id": "custom",
            "description": "Custom challenge",
            "difficulty": 1,
            "estimatedTime": 10
        });

        let (status, _) = call(&h.app, "POST", "/api/challenges", Some(new.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, body) = call(&h.app, "POST", "/api/challenges", Some(new)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body["error"].as_str().unwrap().contains("custom"));
    }

    #[tokio::test]
    async fn test_mentor_notes_flow() {
        let h = harness(true).await;
        let (_, session) = call(&h.app, "GET", "/api/session", None).await;
        assert!(session["sessionId"].as_str().unwrap().starts_with("session_"));

        let (status, body) = call(
            &h.app,
            "POST",
            "/api/mentor/ask",
            Some(json!({ "question": "How do I use Git rebase?" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["persisted"], true);
        let note_id = body["note"]["id"].as_str().unwrap().to_string();

        let (status, _) = call(
            &h.app,
            "POST",
            "/api/mentor/ask",
            Some(json!({ "question": "   " })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, notes) = call(&h.app, "GET", "/api/notes", None).await;
        assert_eq!(notes.as_array().unwrap().len(), 1);
        assert_eq!(notes[0]["savedAgo"], "just now");
        assert_eq!(notes[0]["question"], "How do I use Git rebase?");

        let uri = format!("/api/notes/{}", note_id);
        let (status, _) = call(&h.app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = call(&h.app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_conflict_trainer_routes() {
        let h = harness(false).await;

        let (_, list) = call(&h.app, "GET", "/api/conflicts", None).await;
        assert_eq!(list.as_array().unwrap().len(), 3);

        let (status, snap) = call(&h.app, "GET", "/api/conflicts/logic-divergence", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(snap["scenarioId"], "logic-divergence");
        assert_eq!(snap["validation"], "idle");
        assert_eq!(snap["markersRemaining"], true);

        let (_, snap) = call(&h.app, "POST", "/api/conflicts/logic-divergence/hint", None).await;
        assert_eq!(snap["hintsShown"], 1);

        let (_, snap) = call(
            &h.app,
            "PUT",
            "/api/conflicts/logic-divergence/merged",
            Some(json!({ "merged": "<<<<<<< HEAD\n=======\n>>>>>>> feature" })),
        )
        .await;
        assert_eq!(snap["hintsShown"], 1);
        let (_, snap) = call(&h.app, "POST", "/api/conflicts/logic-divergence/check", None).await;
        assert_eq!(snap["validation"], "error");
        assert!(snap["explanation"].is_null());

        // switching scenario starts over
        let (_, snap) = call(&h.app, "GET", "/api/conflicts/variable-rename", None).await;
        assert_eq!(snap["hintsShown"], 0);
        assert_eq!(h.state.trainer.read().await.scenario_id(), "variable-rename");

        let (status, _) = call(&h.app, "GET", "/api/conflicts/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_visualizer_frame_formats() {
        let h = harness(false).await;

        let (_, structures) = call(&h.app, "GET", "/api/visualizer/structures", None).await;
        assert_eq!(structures.as_array().unwrap().len(), 4);
        assert_eq!(structures[0]["type"], "bst");

        let (status, frame) = call(&h.app, "GET", "/api/visualizer/frame?ds=bst&step=0", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(frame["width"], 340.0);
        assert_eq!(frame["commands"][0]["kind"], "clear");

        let response = h
            .app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/visualizer/frame?ds=hashmap&step=2&format=svg")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["content-type"], "image/svg+xml");
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(String::from_utf8(bytes.to_vec()).unwrap().starts_with("<svg"));

        let (status, _) = call(&h.app, "GET", "/api/visualizer/frame?ds=heap", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = call(
            &h.app,
            "GET",
            "/api/visualizer/frame?ds=bst&format=png",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_comparison_routes() {
        let h = harness(false).await;

        let (_, snap) = call(
            &h.app,
            "POST",
            "/api/comparison/structures",
            Some(json!({ "left": "hashmap", "right": "linkedlist" })),
        )
        .await;
        assert_eq!(snap["state"], "idle");
        assert_eq!(snap["left"]["info"]["type"], "hashmap");

        let (_, snap) = call(&h.app, "POST", "/api/comparison/run", None).await;
        assert_eq!(snap["state"], "running");

        let (_, snap) = call(&h.app, "POST", "/api/comparison/reset", None).await;
        assert_eq!(snap["state"], "idle");
        assert_eq!(snap["left"]["step"], 0);
    }

    #[tokio::test]
    async fn test_forge_quiz_and_dashboard() {
        let h = harness(false).await;

        let (_, quiz) = call(&h.app, "GET", "/api/forge/quiz", None).await;
        assert_eq!(quiz.as_array().unwrap().len(), 5);
        assert!(quiz[0].get("correct").is_none());

        let (_, dash) = call(&h.app, "GET", "/api/forge/u1/dashboard", None).await;
        assert_eq!(dash["needsOnboarding"], true);
        assert_eq!(dash["displayName"], "Student");

        let (status, _) = call(
            &h.app,
            "POST",
            "/api/forge/u1/quiz",
            Some(json!({ "answers": ["b", "a"] })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, profile) = call(
            &h.app,
            "POST",
            "/api/forge/u1/quiz",
            Some(json!({ "answers": ["b", "a", "c", "c", "b"] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(profile["skillLevel"], "advanced");

        let (_, dash) = call(&h.app, "GET", "/api/forge/u1/dashboard", None).await;
        assert_eq!(dash["needsOnboarding"], false);
        assert_eq!(dash["totalSubmissions"], 0);

        let (_, analytics) = call(&h.app, "GET", "/api/forge/u1/analytics", None).await;
        assert_eq!(analytics["timeline"], json!([]));
    }

    #[tokio::test]
    async fn test_forge_analysis_requires_configuration() {
        let h = harness(false).await;
        let (status, _) = call(
            &h.app,
            "POST",
            "/api/forge/analyze",
            Some(json!({ "code": "x = 1", "language": "python", "userId": "u1" })),
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }
}
