use serde::Deserialize;
use std::path::PathBuf;

use super::{
    avatar::AvatarConfig, logging::LoggingConfig, players::PlayersSourceConfig,
    timing::TimingConfig,
};

pub const DEFAULT_STATE_FILE: &str = "mcbeacon-state.json";

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct BeaconConfig {
    /// Control endpoint answering `?action=status|start|players`.
    pub endpoint: String,
    pub players: PlayersSourceConfig,

    /// Address players connect to, e.g. `play.example.org:25565`.
    pub server_address: Option<String>,
    pub world_seed: Option<String>,

    pub state_file: PathBuf,

    /// Local path or http(s) URL of a newline-delimited text file.
    pub flavor_text: Option<String>,

    pub timing: TimingConfig,
    pub avatar: AvatarConfig,
    pub logging: LoggingConfig,
}

impl Default for BeaconConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            players: PlayersSourceConfig::default(),
            server_address: None,
            world_seed: None,
            state_file: PathBuf::from(DEFAULT_STATE_FILE),
            flavor_text: None,
            timing: TimingConfig::default(),
            avatar: AvatarConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
