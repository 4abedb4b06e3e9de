use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatusError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("unexpected response ({status}): {body}")]
    Http { status: u16, body: String },

    #[error("malformed response: {0}")]
    Decode(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl StatusError {
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }
}

impl From<reqwest::Error> for StatusError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            StatusError::Decode(error.to_string())
        } else {
            StatusError::Transport(error.to_string())
        }
    }
}

impl From<serde_json::Error> for StatusError {
    fn from(error: serde_json::Error) -> Self {
        StatusError::Serialization(error.to_string())
    }
}
