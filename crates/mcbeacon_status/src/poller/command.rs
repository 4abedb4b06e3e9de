use std::str::FromStr;

/// User actions fed into [`StatusPoller::run`](super::StatusPoller::run).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetCommand {
    Start,
    Refresh,
    Address,
    Seed,
    Recent,
    Quit,
}

impl WidgetCommand {
    pub const ALL: [WidgetCommand; 6] = [
        WidgetCommand::Start,
        WidgetCommand::Refresh,
        WidgetCommand::Address,
        WidgetCommand::Seed,
        WidgetCommand::Recent,
        WidgetCommand::Quit,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            WidgetCommand::Start => "start",
            WidgetCommand::Refresh => "refresh",
            WidgetCommand::Address => "address",
            WidgetCommand::Seed => "seed",
            WidgetCommand::Recent => "recent",
            WidgetCommand::Quit => "quit",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            WidgetCommand::Start => "Start the server (only while it is offline)",
            WidgetCommand::Refresh => "Check the server status now",
            WidgetCommand::Address => "Show the server address",
            WidgetCommand::Seed => "Show the world seed",
            WidgetCommand::Recent => "Show recently seen players",
            WidgetCommand::Quit => "Exit",
        }
    }
}

impl FromStr for WidgetCommand {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_lowercase().as_str() {
            "start" | "s" => Ok(WidgetCommand::Start),
            "refresh" | "status" | "r" => Ok(WidgetCommand::Refresh),
            "address" | "addr" | "ip" => Ok(WidgetCommand::Address),
            "seed" => Ok(WidgetCommand::Seed),
            "recent" => Ok(WidgetCommand::Recent),
            "quit" | "exit" | "q" => Ok(WidgetCommand::Quit),
            other => Err(format!("Unknown command: {}", other)),
        }
    }
}
