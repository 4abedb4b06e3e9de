use std::process::ExitCode;

use clap::Parser;
use mcbeacon::Cli;
use mcbeacon::cli::format as fmt;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match mcbeacon::run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", fmt::error("error:"), e);
            ExitCode::FAILURE
        }
    }
}
