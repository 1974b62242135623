//! Key-value storage port backing the session id, saved notes and saved answers.

mod file;
mod memory;

use async_trait::async_trait;
pub use file::FileStorage;
pub use memory::MemoryStorage;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Each call reads or writes one key atomically. Values are opaque strings;
/// callers own their encoding.
#[async_trait]
pub trait StoragePort: Send + Sync {
    async fn get(&self, key: &str) -> Option<String>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}
