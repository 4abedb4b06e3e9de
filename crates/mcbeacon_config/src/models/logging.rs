use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub debug: bool,
    pub show_target: bool,
    pub show_timestamp: bool,
    pub use_color: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            debug: false,
            show_target: false,
            show_timestamp: true,
            use_color: true,
        }
    }
}

/// Value of the `log_type` field attached to every event, used to filter
/// one subsystem with `RUST_LOG`-style directives or by eye.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogType {
    Poller,
    Api,
    Players,
    Storage,
    Flavor,
    Cli,
}

impl LogType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogType::Poller => "poller",
            LogType::Api => "api",
            LogType::Players => "players",
            LogType::Storage => "storage",
            LogType::Flavor => "flavor",
            LogType::Cli => "cli",
        }
    }
}
