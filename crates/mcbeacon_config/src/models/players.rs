use serde::Deserialize;

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PlayersMode {
    /// `GET <endpoint>?action=players`
    #[default]
    Endpoint,
    /// `GET <url>` against an API running next to the game server.
    Direct,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct PlayersSourceConfig {
    pub mode: PlayersMode,
    pub url: Option<String>,
}
