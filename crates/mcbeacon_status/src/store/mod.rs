mod file;
mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StatusError;

pub use file::FileStateStore;
pub use memory::MemoryStateStore;

pub const MAX_RECENT_PLAYERS: usize = 10;

/// Durable client-side state that outlives a single run.
///
/// Reads never fail: stores keep the state in memory and only touch the
/// backing medium on writes.
#[async_trait]
pub trait StateStore: Send + Sync {
    async fn last_online(&self) -> Option<DateTime<Utc>>;
    async fn set_last_online(&self, at: DateTime<Utc>) -> Result<(), StatusError>;

    async fn recent_players(&self) -> RecentPlayers;
    async fn set_recent_players(&self, players: &RecentPlayers) -> Result<(), StatusError>;
}

#[async_trait]
impl<T: StateStore + ?Sized> StateStore for Box<T> {
    async fn last_online(&self) -> Option<DateTime<Utc>> {
        (**self).last_online().await
    }

    async fn set_last_online(&self, at: DateTime<Utc>) -> Result<(), StatusError> {
        (**self).set_last_online(at).await
    }

    async fn recent_players(&self) -> RecentPlayers {
        (**self).recent_players().await
    }

    async fn set_recent_players(&self, players: &RecentPlayers) -> Result<(), StatusError> {
        (**self).set_recent_players(players).await
    }
}

/// Most-recent-first player names, without duplicates, at most
/// [`MAX_RECENT_PLAYERS`] long.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct RecentPlayers(Vec<String>);

impl RecentPlayers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves each name to the front, in the order given.
    pub fn merge<S: AsRef<str>>(&mut self, names: &[S]) {
        for name in names {
            let name = name.as_ref();
            self.0.retain(|existing| existing != name);
            self.0.insert(0, name.to_string());
        }
        self.0.truncate(MAX_RECENT_PLAYERS);
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// Hand-edited or older state files may hold duplicates or too many names.
impl From<Vec<String>> for RecentPlayers {
    fn from(names: Vec<String>) -> Self {
        let mut players = RecentPlayers::new();
        for name in names.into_iter().rev() {
            players.merge(&[name]);
        }
        players
    }
}

impl From<RecentPlayers> for Vec<String> {
    fn from(players: RecentPlayers) -> Self {
        players.0
    }
}
