use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{RecentPlayers, StateStore};
use crate::error::StatusError;

#[derive(Debug, Default)]
struct MemoryState {
    last_online: Option<DateTime<Utc>>,
    recent_players: RecentPlayers,
}

/// Non-persistent store, used by tests and `--no-state` runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStateStore {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn last_online(&self) -> Option<DateTime<Utc>> {
        self.state.read().await.last_online
    }

    async fn set_last_online(&self, at: DateTime<Utc>) -> Result<(), StatusError> {
        self.state.write().await.last_online = Some(at);
        Ok(())
    }

    async fn recent_players(&self) -> RecentPlayers {
        self.state.read().await.recent_players.clone()
    }

    async fn set_recent_players(&self, players: &RecentPlayers) -> Result<(), StatusError> {
        self.state.write().await.recent_players = players.clone();
        Ok(())
    }
}
