use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct TimingConfig {
    /// Delay between two status checks while following a start.
    #[serde(with = "humantime_serde")]
    pub poll_interval: Duration,

    /// Background refresh cadence, skipped while polling.
    #[serde(with = "humantime_serde")]
    pub auto_refresh: Duration,

    /// Hard limit on a polling session, measured from its start.
    #[serde(with = "humantime_serde")]
    pub polling_timeout: Duration,

    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,

    #[serde(with = "humantime_serde")]
    pub flavor_interval: Duration,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(5),
            auto_refresh: Duration::from_secs(30),
            polling_timeout: Duration::from_secs(120),
            request_timeout: Duration::from_secs(10),
            flavor_interval: Duration::from_secs(30),
        }
    }
}
