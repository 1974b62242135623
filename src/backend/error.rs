use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Backend not ready")]
    NotReady,
    #[error("Challenge not found: {0}")]
    NotFound(String),
    #[error("Challenge already exists: {0}")]
    Duplicate(String),
    #[error("Invalid challenge: {0}")]
    Invalid(String),
    #[error("Storage operation failed: {0}")]
    Storage(String),
}

impl From<sea_orm::DbErr> for BackendError {
    fn from(e: sea_orm::DbErr) -> Self {
        Self::Storage(e.to_string())
    }
}

impl From<tokio::task::JoinError> for BackendError {
    fn from(e: tokio::task::JoinError) -> Self {
        Self::Storage(e.to_string())
    }
}
