use std::{fs, io, path::Path, time::Duration};

use thiserror::Error;
use tracing::debug;

use crate::{BeaconConfig, LogType, PlayersMode};

pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }
}

pub fn load_config(path: Option<&Path>) -> Result<BeaconConfig, ConfigError> {
    let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));
    debug!(
        log_type = LogType::Cli.as_str(),
        "Loading configuration from {}",
        path.display()
    );

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;

    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<BeaconConfig, ConfigError> {
    let config: BeaconConfig = if content.trim().is_empty() {
        BeaconConfig::default()
    } else {
        serde_yaml::from_str(content)?
    };

    validate(&config)?;
    Ok(config)
}

fn validate(config: &BeaconConfig) -> Result<(), ConfigError> {
    if config.endpoint.trim().is_empty() {
        return Err(ConfigError::invalid("`endpoint` must be set"));
    }

    if config.players.mode == PlayersMode::Direct
        && config.players.url.as_deref().is_none_or(|url| url.trim().is_empty())
    {
        return Err(ConfigError::invalid(
            "`players.url` is required when `players.mode` is `direct`",
        ));
    }

    let timing = &config.timing;
    for (name, value) in [
        ("timing.poll_interval", timing.poll_interval),
        ("timing.auto_refresh", timing.auto_refresh),
        ("timing.polling_timeout", timing.polling_timeout),
        ("timing.request_timeout", timing.request_timeout),
        ("timing.flavor_interval", timing.flavor_interval),
    ] {
        if value == Duration::ZERO {
            return Err(ConfigError::invalid(format!("`{}` must be non-zero", name)));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = parse_config("endpoint: https://control.example.org/\n").unwrap();

        assert_eq!(config.endpoint, "https://control.example.org/");
        assert_eq!(config.players.mode, PlayersMode::Endpoint);
        assert_eq!(config.timing.poll_interval, Duration::from_secs(5));
        assert_eq!(config.timing.auto_refresh, Duration::from_secs(30));
        assert_eq!(config.timing.polling_timeout, Duration::from_secs(120));
        assert_eq!(config.avatar.size, 24);
        assert_eq!(config.state_file, PathBuf::from("mcbeacon-state.json"));
    }

    #[test]
    fn test_full_config() {
        let yaml = r#"
endpoint: https://control.example.org/
players:
  mode: direct
  url: http://play.example.org:8080/
server_address: play.example.org:25565
world_seed: "-4172144997902289642"
state_file: /tmp/beacon/state.json
flavor_text: splashes.txt
timing:
  poll_interval: 2s
  polling_timeout: 1m
avatar:
  base_url: https://heads.example.org/avatar/
  size: 32
logging:
  debug: true
"#;
        let config = parse_config(yaml).unwrap();

        assert_eq!(config.players.mode, PlayersMode::Direct);
        assert_eq!(
            config.players.url.as_deref(),
            Some("http://play.example.org:8080/")
        );
        assert_eq!(config.world_seed.as_deref(), Some("-4172144997902289642"));
        assert_eq!(config.timing.poll_interval, Duration::from_secs(2));
        assert_eq!(config.timing.polling_timeout, Duration::from_secs(60));
        assert_eq!(config.timing.auto_refresh, Duration::from_secs(30));
        assert_eq!(
            config.avatar.url_for("Alice"),
            "https://heads.example.org/avatar/Alice/32"
        );
        assert!(config.logging.debug);
    }

    #[test]
    fn test_missing_endpoint_is_rejected() {
        let err = parse_config("world_seed: '42'\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_direct_mode_requires_url() {
        let err = parse_config("endpoint: https://x/\nplayers:\n  mode: direct\n").unwrap_err();
        assert!(err.to_string().contains("players.url"));
    }

    #[test]
    fn test_zero_interval_is_rejected() {
        let err =
            parse_config("endpoint: https://x/\ntiming:\n  poll_interval: 0s\n").unwrap_err();
        assert!(err.to_string().contains("timing.poll_interval"));
    }

    #[test]
    fn test_load_config_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        fs::write(&config_path, "endpoint: https://control.example.org/\n").unwrap();

        let config = load_config(Some(&config_path)).unwrap();
        assert_eq!(config.endpoint, "https://control.example.org/");
    }

    #[test]
    fn test_load_config_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = load_config(Some(&temp_dir.path().join("nope.yaml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
