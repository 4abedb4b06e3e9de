pub mod app;
pub mod cli;
pub mod presenter;
pub mod telemetry;

pub use app::run;
pub use cli::Cli;
