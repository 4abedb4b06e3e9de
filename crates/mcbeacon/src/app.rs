use std::process::ExitCode;

use anyhow::{Context, bail};
use chrono::Utc;
use mcbeacon_config::{BeaconConfig, LogType, load_config};
use mcbeacon_status::{
    FileStateStore, FlavorText, HttpStatusApi, MemoryStateStore, PollerSettings, ServerStatus,
    StateStore, StatusPoller, format_relative,
};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::cli::{Cli, Commands, ShutdownController, format as fmt, input, spawn_command_reader};
use crate::presenter::TerminalPresenter;
use crate::telemetry::init_logging;

type Poller = StatusPoller<HttpStatusApi, Box<dyn StateStore>, TerminalPresenter>;

pub async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = load_config(Some(&cli.config))
        .with_context(|| format!("failed to load {}", cli.config.display()))?;

    let mut logging = config.logging.clone();
    logging.debug |= cli.debug;
    if !logging.use_color {
        console::set_colors_enabled(false);
    }
    init_logging(&logging);

    let command = cli.resolved_command();
    debug!(log_type = LogType::Cli.as_str(), "Running {:?}", command);

    match command {
        Commands::Address => return print_setting(config.server_address.as_deref(), "server_address"),
        Commands::Seed => return print_setting(config.world_seed.as_deref(), "world_seed"),
        _ => {}
    }

    let store: Box<dyn StateStore> = if cli.no_state {
        Box::new(MemoryStateStore::new())
    } else {
        let store = FileStateStore::open(&config.state_file)
            .await
            .with_context(|| format!("failed to open {}", config.state_file.display()))?;
        debug!(
            log_type = LogType::Storage.as_str(),
            "Using state file {}",
            store.path().display()
        );
        Box::new(store)
    };

    if command == Commands::Recent {
        print_recent(&*store).await;
        return Ok(ExitCode::SUCCESS);
    }

    let api = HttpStatusApi::from_config(&config)?;
    let mut poller: Poller = StatusPoller::new(
        api,
        store,
        TerminalPresenter::new(),
        PollerSettings::from(&config),
    );

    match command {
        Commands::Status => Ok(exit_code(poller.check_status().await.is_some())),
        Commands::Players => Ok(exit_code(poller.fetch_players().await.is_ok())),
        Commands::Start { wait } => start(poller, wait).await,
        _ => watch(poller, &config).await,
    }
}

fn exit_code(ok: bool) -> ExitCode {
    if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

/// Prints a bare value so it can be piped into a clipboard tool.
fn print_setting(value: Option<&str>, key: &str) -> anyhow::Result<ExitCode> {
    match value {
        Some(value) => {
            println!("{}", value);
            Ok(ExitCode::SUCCESS)
        }
        None => bail!("`{}` is not set in the configuration", key),
    }
}

async fn print_recent(store: &dyn StateStore) {
    println!("{}", fmt::header("Recent Players"));

    match store.last_online().await {
        Some(at) => println!(
            "{} {}",
            fmt::label("Last online:"),
            format_relative(at, Utc::now())
        ),
        None => println!("{}", fmt::secondary("Never seen online")),
    }

    let recent = store.recent_players().await;
    if recent.is_empty() {
        println!("{}", fmt::secondary("No recent players"));
    }
    for name in recent.as_slice() {
        println!("  {}", fmt::entity(name));
    }
}

async fn start(mut poller: Poller, wait: bool) -> anyhow::Result<ExitCode> {
    match poller.check_status().await {
        Some(ServerStatus::Stopped) => {}
        Some(ServerStatus::Running) => {
            println!("{}", fmt::success("Server is already online"));
            return Ok(ExitCode::SUCCESS);
        }
        Some(status) => bail!("server cannot be started while {}", status),
        None => bail!("could not reach the control endpoint"),
    }

    poller.start_server().await.context("start command failed")?;

    if !wait {
        return Ok(ExitCode::SUCCESS);
    }

    poller.run_polling().await;
    Ok(exit_code(poller.state().status.is_running()))
}

async fn watch(poller: Poller, config: &BeaconConfig) -> anyhow::Result<ExitCode> {
    let flavor = match config.flavor_text.as_deref() {
        Some(source) => match FlavorText::load(source, config.timing.request_timeout).await {
            Ok(flavor) => flavor,
            Err(e) => {
                warn!(
                    log_type = LogType::Flavor.as_str(),
                    "Failed to load flavor text from {}: {}", source, e
                );
                FlavorText::default()
            }
        },
        None => FlavorText::default(),
    };
    let mut poller = poller.with_flavor(flavor);

    let shutdown = ShutdownController::new();
    shutdown.listen_for_ctrl_c();

    let (tx, rx) = mpsc::channel(16);
    spawn_command_reader(tx).context("failed to start the command reader")?;

    println!("{}", fmt::header(&format!("mcbeacon {}", env!("CARGO_PKG_VERSION"))));
    println!("{}", input::help_text());

    poller.run(rx, shutdown.subscribe()).await;
    if shutdown.is_shutdown_triggered() {
        println!("{}", fmt::secondary("Interrupted"));
    }
    Ok(ExitCode::SUCCESS)
}
