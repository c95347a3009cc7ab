//! Session result stores.
//!
//! The file store writes the latest finished onboarding as pretty JSON; the
//! in-memory store keeps every result and is meant for tests and demos.

use std::path::PathBuf;

use anyhow::Context;
use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::debug;

use gs_core::ports::SessionResultSinkPort;
use gs_core::session::SessionResult;

pub const DEFAULT_SESSION_RESULT_FILE: &str = "session_result.json";

pub struct FileSessionResultStore {
    path: PathBuf,
}

impl FileSessionResultStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn with_defaults(base_dir: PathBuf) -> Self {
        Self::new(base_dir.join(DEFAULT_SESSION_RESULT_FILE))
    }

    /// Reads back the stored result, `None` when nothing was stored yet.
    pub async fn load(&self) -> anyhow::Result<Option<SessionResult>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        if content.trim().is_empty() {
            return Ok(None);
        }
        let result = serde_json::from_str(&content).context("failed to parse session result")?;
        Ok(Some(result))
    }
}

#[async_trait]
impl SessionResultSinkPort for FileSessionResultStore {
    async fn store(&self, result: &SessionResult) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let json =
            serde_json::to_string_pretty(result).context("failed to serialize session result")?;
        let mut file = fs::File::create(&self.path)
            .await
            .with_context(|| format!("failed to create {}", self.path.display()))?;
        file.write_all(json.as_bytes())
            .await
            .context("failed to write session result")?;
        file.sync_all().await.context("failed to sync session result")?;

        debug!(path = %self.path.display(), session_id = %result.session_id, "session result written");
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemorySessionResultStore {
    results: Mutex<Vec<SessionResult>>,
}

impl InMemorySessionResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn results(&self) -> Vec<SessionResult> {
        self.results.lock().await.clone()
    }
}

#[async_trait]
impl SessionResultSinkPort for InMemorySessionResultStore {
    async fn store(&self, result: &SessionResult) -> anyhow::Result<()> {
        self.results.lock().await.push(result.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use gs_core::session::ProfileDetails;
    use gs_core::SessionId;
    use tempfile::TempDir;

    fn result() -> SessionResult {
        SessionResult {
            session_id: SessionId::from("session-1"),
            phone: "9876543210".into(),
            aadhaar: "123456789012".into(),
            profile: ProfileDetails {
                full_name: "Rahul Sharma".into(),
                email: "rahul@example.com".into(),
                date_of_birth: "1990-04-12".into(),
                address: "123 Main Street".into(),
            },
            biometric_method: "fingerprint".into(),
            completed_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn load_returns_none_when_file_missing() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionResultStore::with_defaults(temp_dir.path().to_path_buf());
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn store_creates_parent_dirs_and_writes_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/dir/result.json");
        let store = FileSessionResultStore::new(path.clone());

        let expected = result();
        store.store(&expected).await.unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"phone\": \"9876543210\""));
        assert_eq!(store.load().await.unwrap(), Some(expected));
    }

    #[tokio::test]
    async fn in_memory_store_keeps_every_result() {
        let store = InMemorySessionResultStore::new();
        store.store(&result()).await.unwrap();
        store.store(&result()).await.unwrap();
        assert_eq!(store.results().await.len(), 2);
    }
}
