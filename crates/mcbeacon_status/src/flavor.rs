use std::time::Duration;

use mcbeacon_config::LogType;
use rand::Rng;
use reqwest::Client;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::error::StatusError;

/// Rotating one-liners shown under the status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlavorText {
    lines: Vec<String>,
}

impl FlavorText {
    pub fn parse(content: &str) -> Self {
        let lines = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        Self { lines }
    }

    /// Reads `source` from an http(s) URL or, otherwise, from the local disk.
    /// A remote fetch is abandoned after `request_timeout`.
    pub async fn load(source: &str, request_timeout: Duration) -> Result<Self, StatusError> {
        let content = if source.starts_with("http://") || source.starts_with("https://") {
            let client = Client::builder()
                .timeout(request_timeout)
                .build()
                .map_err(|e| {
                    StatusError::transport(format!("Failed to build HTTP client: {}", e))
                })?;
            client
                .get(source)
                .send()
                .await?
                .error_for_status()?
                .text()
                .await?
        } else {
            tokio::fs::read_to_string(source).await?
        };

        let flavor = Self::parse(&content);
        debug!(
            log_type = LogType::Flavor.as_str(),
            "Loaded {} flavor lines from {}",
            flavor.len(),
            source
        );
        Ok(flavor)
    }

    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        self.lines.choose(rng).map(String::as_str)
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
