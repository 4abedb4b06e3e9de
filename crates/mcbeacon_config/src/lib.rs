pub mod models;

mod loader;

pub use loader::{ConfigError, DEFAULT_CONFIG_PATH, load_config, parse_config};
pub use models::avatar::AvatarConfig;
pub use models::beacon::BeaconConfig;
pub use models::logging::{LogType, LoggingConfig};
pub use models::players::{PlayersMode, PlayersSourceConfig};
pub use models::timing::TimingConfig;
