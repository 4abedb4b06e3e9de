use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mcbeacon_config::LogType;
use serde::{Deserialize, Serialize};
use tokio::{fs, sync::Mutex};
use tracing::{debug, error, warn};

use super::{RecentPlayers, StateStore};
use crate::error::StatusError;

/// On-disk layout: one JSON object with the two keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedState {
    #[serde(default)]
    last_online: Option<DateTime<Utc>>,
    #[serde(default)]
    recent_players: RecentPlayers,
}

/// JSON file backed store. The file is rewritten as a whole on every change
/// through a temporary file and a rename.
#[derive(Debug)]
pub struct FileStateStore {
    path: PathBuf,
    state: Mutex<PersistedState>,
}

impl FileStateStore {
    /// Opens the store, starting empty when the file is missing or unreadable.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StatusError> {
        let path = path.as_ref().to_path_buf();

        let state = if fs::try_exists(&path).await? {
            match Self::read_state(&path).await {
                Ok(state) => state,
                Err(e) => {
                    warn!(
                        log_type = LogType::Storage.as_str(),
                        "Ignoring unreadable state file {}: {}",
                        path.display(),
                        e
                    );
                    PersistedState::default()
                }
            }
        } else {
            debug!(
                log_type = LogType::Storage.as_str(),
                "No state file at {}, starting empty",
                path.display()
            );
            PersistedState::default()
        };

        Ok(Self {
            path,
            state: Mutex::new(state),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_state(path: &Path) -> Result<PersistedState, StatusError> {
        let content = fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&content)?)
    }

    async fn write_state(&self, state: &PersistedState) -> Result<(), StatusError> {
        let content = serde_json::to_string_pretty(state)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !fs::try_exists(parent).await? {
                fs::create_dir_all(parent).await.map_err(|e| {
                    error!(
                        log_type = LogType::Storage.as_str(),
                        "Failed to create directories {}: {}",
                        parent.display(),
                        e
                    );
                    StatusError::Io(e)
                })?;
            }
        }

        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, content).await?;
        fs::rename(&temp_path, &self.path).await?;

        debug!(
            log_type = LogType::Storage.as_str(),
            "Saved state to {}",
            self.path.display()
        );
        Ok(())
    }
}

#[async_trait]
impl StateStore for FileStateStore {
    async fn last_online(&self) -> Option<DateTime<Utc>> {
        self.state.lock().await.last_online
    }

    async fn set_last_online(&self, at: DateTime<Utc>) -> Result<(), StatusError> {
        let mut state = self.state.lock().await;
        let mut next = state.clone();
        next.last_online = Some(at);
        self.write_state(&next).await?;
        *state = next;
        Ok(())
    }

    async fn recent_players(&self) -> RecentPlayers {
        self.state.lock().await.recent_players.clone()
    }

    async fn set_recent_players(&self, players: &RecentPlayers) -> Result<(), StatusError> {
        let mut state = self.state.lock().await;
        if state.recent_players == *players {
            return Ok(());
        }
        let mut next = state.clone();
        next.recent_players = players.clone();
        self.write_state(&next).await?;
        *state = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_starts_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStateStore::open(temp_dir.path().join("state.json"))
            .await
            .unwrap();

        assert_eq!(store.last_online().await, None);
        assert!(store.recent_players().await.is_empty());
    }

    #[tokio::test]
    async fn test_state_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/dir/state.json");
        let at = DateTime::parse_from_rfc3339("2026-10-18T12:30:00Z")
            .unwrap()
            .with_timezone(&Utc);

        {
            let store = FileStateStore::open(&path).await.unwrap();
            let mut recent = RecentPlayers::new();
            recent.merge(&["Alice", "Bob"]);
            store.set_recent_players(&recent).await.unwrap();
            store.set_last_online(at).await.unwrap();
        }

        let store = FileStateStore::open(&path).await.unwrap();
        assert_eq!(store.last_online().await, Some(at));
        assert_eq!(store.recent_players().await.as_slice(), ["Bob", "Alice"]);
    }

    #[tokio::test]
    async fn test_file_uses_camel_case_keys() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("state.json");

        let store = FileStateStore::open(&path).await.unwrap();
        let mut recent = RecentPlayers::new();
        recent.merge(&["Steve"]);
        store.set_recent_players(&recent).await.unwrap();
        store.set_last_online(Utc::now()).await.unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["recentPlayers"], serde_json::json!(["Steve"]));
        assert!(raw["lastOnline"].is_string());
    }

    #[tokio::test]
    async fn test_corrupt_file_starts_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("state.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = FileStateStore::open(&path).await.unwrap();
        assert!(store.recent_players().await.is_empty());
    }

    #[tokio::test]
    async fn test_failed_write_leaves_state_unchanged() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("state.json");
        let store = FileStateStore::open(&path).await.unwrap();

        // A non-empty directory in place of the file makes the rename fail.
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), "").unwrap();

        let mut recent = RecentPlayers::new();
        recent.merge(&["Alice"]);
        assert!(store.set_recent_players(&recent).await.is_err());
        assert!(store.set_last_online(Utc::now()).await.is_err());

        assert!(store.recent_players().await.is_empty());
        assert_eq!(store.last_online().await, None);
        assert_eq!(store.path(), path);
    }
}
