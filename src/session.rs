use crate::storage::{StorageError, StoragePort};
use rand::Rng;
use rand::distributions::Alphanumeric;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

const SESSION_KEY: &str = "skillbridge_session_id";
const SUFFIX_LEN: usize = 11;

pub const UNKNOWN_SESSION: &str = "unknown";

pub struct SessionStore {
    storage: Arc<dyn StoragePort>,
    create_lock: Mutex<()>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn StoragePort>) -> Self {
        Self {
            storage,
            create_lock: Mutex::new(()),
        }
    }

    /// Returns the stored session id, creating and persisting one on first use.
    pub async fn get_or_create(&self) -> Result<String, StorageError> {
        let _guard = self.create_lock.lock().await;

        if let Some(id) = self.storage.get(SESSION_KEY).await {
            return Ok(id);
        }

        let id = generate_session_id();
        self.storage.set(SESSION_KEY, &id).await?;
        info!("Created session {}", id);
        Ok(id)
    }

    pub async fn current(&self) -> String {
        self.storage
            .get(SESSION_KEY)
            .await
            .unwrap_or_else(|| UNKNOWN_SESSION.to_string())
    }
}

fn generate_session_id() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SUFFIX_LEN)
        .map(|c| char::from(c).to_ascii_lowercase())
        .collect();
    format!(
        "session_{}_{}",
        chrono::Utc::now().timestamp_millis(),
        suffix
    )
}
