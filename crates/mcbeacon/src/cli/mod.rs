pub mod format;
pub mod input;
pub mod shutdown;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use input::spawn_command_reader;
pub use shutdown::ShutdownController;

#[derive(Debug, Parser)]
#[command(name = "mcbeacon", version, about = "Status client for a Minecraft server")]
pub struct Cli {
    /// Configuration file (YAML).
    #[arg(short, long, global = true, default_value = mcbeacon_config::DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Keep last-online and recent players in memory only.
    #[arg(long, global = true)]
    pub no_state: bool,

    /// Force debug logging.
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Subcommand, PartialEq, Eq)]
pub enum Commands {
    /// Keep watching the server and accept commands on stdin (default).
    Watch,
    /// Check the status once.
    Status,
    /// Start the server if it is offline.
    Start {
        /// Follow the server until it is online, stopped, or the polling timeout passes.
        #[arg(short, long)]
        wait: bool,
    },
    /// List connected players.
    Players,
    /// Print the server address.
    Address,
    /// Print the world seed.
    Seed,
    /// Show recently seen players and when the server was last online.
    Recent,
}

impl Cli {
    pub fn resolved_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Watch)
    }
}
