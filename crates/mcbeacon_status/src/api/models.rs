use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    #[serde(default)]
    pub ip: Option<String>,
}

impl StatusResponse {
    pub fn new(status: &str) -> Self {
        Self {
            status: status.to_string(),
            ip: None,
        }
    }

    pub fn with_ip(mut self, ip: &str) -> Self {
        self.ip = Some(ip.to_string());
        self
    }
}

/// Players connected at the time of the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub online: u32,
    pub max: u32,
    #[serde(default)]
    pub players: Vec<String>,
}

impl PlayerSnapshot {
    pub fn new(online: u32, max: u32, players: &[&str]) -> Self {
        Self {
            online,
            max,
            players: players.iter().map(|name| name.to_string()).collect(),
        }
    }
}
