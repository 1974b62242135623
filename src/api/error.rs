use crate::backend::BackendError;
use crate::challenges::WorkspaceError;
use crate::forge::ForgeError;
use crate::mentor::MentorError;
use crate::storage::StorageError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Backend not ready")]
    NotReady,
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unavailable(String),
    #[error("{0}")]
    Upstream(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::NotReady | Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() && !matches!(self, Self::NotReady) {
            error!("Request failed: {}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<BackendError> for ApiError {
    fn from(e: BackendError) -> Self {
        match e {
            BackendError::NotReady => Self::NotReady,
            BackendError::NotFound(_) => Self::NotFound(e.to_string()),
            BackendError::Duplicate(_) => Self::Conflict(e.to_string()),
            BackendError::Invalid(_) => Self::BadRequest(e.to_string()),
            BackendError::Storage(_) => Self::Internal(e.to_string()),
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        Self::Internal(e.to_string())
    }
}

impl From<WorkspaceError> for ApiError {
    fn from(e: WorkspaceError) -> Self {
        match e {
            WorkspaceError::EmptyAnswer => Self::BadRequest(e.to_string()),
            WorkspaceError::Backend(e) => e.into(),
            WorkspaceError::Storage(e) => e.into(),
        }
    }
}

impl From<MentorError> for ApiError {
    fn from(e: MentorError) -> Self {
        match e {
            MentorError::EmptyQuestion => Self::BadRequest(e.to_string()),
            MentorError::Storage(e) => e.into(),
        }
    }
}

impl From<ForgeError> for ApiError {
    fn from(e: ForgeError) -> Self {
        match e {
            ForgeError::EmptyCode | ForgeError::InvalidQuiz(_) => Self::BadRequest(e.to_string()),
            ForgeError::ProfileNotFound(_) => Self::NotFound(e.to_string()),
            ForgeError::NotConfigured => Self::Unavailable(e.to_string()),
            ForgeError::Api { .. } | ForgeError::Http(_) => Self::Upstream(e.to_string()),
            ForgeError::Storage(_) | ForgeError::Serialization(_) => Self::Internal(e.to_string()),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::Internal(e.to_string())
    }
}
