use std::fmt;

/// Server state as last reported by the control endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ServerStatus {
    #[default]
    Unknown,
    Running,
    Stopped,
    Pending,
    Starting,
    Stopping,
    /// The last status query failed. Never produced from a response.
    Error,
    /// Any other value the endpoint sent, kept verbatim. This includes a
    /// reported `"error"`, which is not a failed query.
    Other(String),
}

impl ServerStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ServerStatus::Unknown => "unknown",
            ServerStatus::Running => "running",
            ServerStatus::Stopped => "stopped",
            ServerStatus::Pending => "pending",
            ServerStatus::Starting => "starting",
            ServerStatus::Stopping => "stopping",
            ServerStatus::Error => "error",
            ServerStatus::Other(raw) => raw,
        }
    }

    pub fn is_running(&self) -> bool {
        *self == ServerStatus::Running
    }

    /// Statuses that end a polling session.
    pub fn is_settled(&self) -> bool {
        matches!(self, ServerStatus::Running | ServerStatus::Stopped)
    }
}

impl From<&str> for ServerStatus {
    fn from(state: &str) -> Self {
        match state.trim().to_lowercase().as_str() {
            "unknown" => ServerStatus::Unknown,
            "running" => ServerStatus::Running,
            "stopped" => ServerStatus::Stopped,
            "pending" => ServerStatus::Pending,
            "starting" => ServerStatus::Starting,
            "stopping" => ServerStatus::Stopping,
            _ => ServerStatus::Other(state.to_string()),
        }
    }
}

impl fmt::Display for ServerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
