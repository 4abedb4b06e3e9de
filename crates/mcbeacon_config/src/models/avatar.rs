use serde::Deserialize;

pub const DEFAULT_AVATAR_BASE_URL: &str = "https://mc-heads.net/avatar";

/// Where player head images are served from. Purely decorative.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct AvatarConfig {
    pub base_url: String,
    pub size: u32,
}

impl Default for AvatarConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_AVATAR_BASE_URL.to_string(),
            size: 24,
        }
    }
}

impl AvatarConfig {
    pub fn url_for(&self, name: &str) -> String {
        format!("{}/{}/{}", self.base_url.trim_end_matches('/'), name, self.size)
    }
}
