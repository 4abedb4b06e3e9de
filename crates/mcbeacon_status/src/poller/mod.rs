mod command;
mod state;

use std::future;

use chrono::Utc;
use mcbeacon_config::{AvatarConfig, BeaconConfig, LogType, TimingConfig};
use tokio::sync::{broadcast, mpsc};
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, error, info, instrument, warn};

use crate::api::{PlayerSnapshot, StatusApi};
use crate::error::StatusError;
use crate::flavor::FlavorText;
use crate::presenter::Presenter;
use crate::reflector::{ReflectInput, reflect, reflect_players};
use crate::status::ServerStatus;
use crate::store::StateStore;

pub use command::WidgetCommand;
pub use state::{PollerState, PollingSession};

#[derive(Debug, Clone, Default)]
pub struct PollerSettings {
    pub timing: TimingConfig,
    pub avatar: AvatarConfig,
    pub server_address: Option<String>,
    pub world_seed: Option<String>,
}

impl From<&BeaconConfig> for PollerSettings {
    fn from(config: &BeaconConfig) -> Self {
        Self {
            timing: config.timing.clone(),
            avatar: config.avatar.clone(),
            server_address: config.server_address.clone(),
            world_seed: config.world_seed.clone(),
        }
    }
}

/// Drives status queries and pushes the resulting views to a [`Presenter`].
///
/// Two modes share the same checks: a background refresh on a fixed cadence,
/// and a polling session entered after a start command that follows the
/// server until it settles or the session deadline passes. The background
/// refresh stands down while a session is active.
pub struct StatusPoller<A, S, P> {
    api: A,
    store: S,
    presenter: P,
    settings: PollerSettings,
    state: PollerState,
    flavor: Option<FlavorText>,
}

impl<A, S, P> StatusPoller<A, S, P>
where
    A: StatusApi,
    S: StateStore,
    P: Presenter,
{
    pub fn new(api: A, store: S, presenter: P, settings: PollerSettings) -> Self {
        Self {
            api,
            store,
            presenter,
            settings,
            state: PollerState::new(),
            flavor: None,
        }
    }

    pub fn with_flavor(mut self, flavor: FlavorText) -> Self {
        self.flavor = (!flavor.is_empty()).then_some(flavor);
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn state(&self) -> &PollerState {
        &self.state
    }

    pub fn settings(&self) -> &PollerSettings {
        &self.settings
    }

    /// One status query. Failures are absorbed here: the status becomes
    /// [`ServerStatus::Error`] and `None` is returned.
    #[instrument(skip(self), name = "poller: check_status")]
    pub async fn check_status(&mut self) -> Option<ServerStatus> {
        debug!(log_type = LogType::Poller.as_str(), "Checking server status");

        match self.api.status().await {
            Ok(response) => {
                let status = ServerStatus::from(response.status.as_str());
                info!(
                    log_type = LogType::Poller.as_str(),
                    ip = response.ip.as_deref().unwrap_or("-"),
                    "Status: {}",
                    status
                );

                self.state.status = status.clone();
                self.state.ip = response.ip;

                if status.is_running() {
                    if let Err(e) = self.store.set_last_online(Utc::now()).await {
                        warn!(
                            log_type = LogType::Storage.as_str(),
                            "Failed to save last online time: {}", e
                        );
                    }
                    self.present_status().await;
                    let _ = self.fetch_players().await;
                } else {
                    self.presenter.hide_players();
                    self.present_status().await;
                }

                Some(status)
            }
            Err(e) => {
                error!(
                    log_type = LogType::Poller.as_str(),
                    "Status check failed: {}", e
                );
                self.state.status = ServerStatus::Error;
                self.state.ip = None;
                self.presenter.hide_players();
                self.present_status().await;
                None
            }
        }
    }

    /// Players query. A failure hides the player panel but leaves the server
    /// status alone.
    pub async fn fetch_players(&mut self) -> Result<PlayerSnapshot, StatusError> {
        debug!(log_type = LogType::Players.as_str(), "Fetching players");

        match self.api.players().await {
            Ok(snapshot) => {
                info!(
                    log_type = LogType::Players.as_str(),
                    "Players: {}/{} - {}",
                    snapshot.online,
                    snapshot.max,
                    if snapshot.players.is_empty() {
                        "none".to_string()
                    } else {
                        snapshot.players.join(", ")
                    }
                );

                let view = reflect_players(&snapshot, &self.settings.avatar);
                self.presenter.show_players(&view);
                self.remember_players(&snapshot.players).await;
                Ok(snapshot)
            }
            Err(e) => {
                warn!(
                    log_type = LogType::Players.as_str(),
                    "Players fetch failed: {}", e
                );
                self.presenter.hide_players();
                Err(e)
            }
        }
    }

    async fn remember_players(&mut self, names: &[String]) {
        if names.is_empty() {
            return;
        }

        let mut recent = self.store.recent_players().await;
        recent.merge(names);
        if let Err(e) = self.store.set_recent_players(&recent).await {
            warn!(
                log_type = LogType::Storage.as_str(),
                "Failed to save recent players: {}", e
            );
        }
    }

    /// Sends the start command and, once acknowledged, follows the server
    /// with a polling session. The status is set to `Starting` before any
    /// poll confirms it.
    #[instrument(skip(self), name = "poller: start_server")]
    pub async fn start_server(&mut self) -> Result<(), StatusError> {
        info!(log_type = LogType::Poller.as_str(), "Starting server");
        self.set_loading(true);

        match self.api.start().await {
            Ok(ack) => {
                debug!(
                    log_type = LogType::Api.as_str(),
                    "Start acknowledged: {}", ack
                );
                self.state.status = ServerStatus::Starting;
                self.present_status().await;
                self.begin_polling();
                Ok(())
            }
            Err(e) => {
                error!(
                    log_type = LogType::Poller.as_str(),
                    "Start command failed: {}", e
                );
                self.set_loading(false);
                Err(e)
            }
        }
    }

    /// Enters polling. Returns `false` without touching anything when a
    /// session is already active.
    pub fn begin_polling(&mut self) -> bool {
        if self.state.is_polling() {
            debug!(
                log_type = LogType::Poller.as_str(),
                "Polling already active, ignoring"
            );
            return false;
        }

        let now = Instant::now();
        let timing = &self.settings.timing;
        self.state.session = Some(PollingSession {
            started_at: now,
            deadline: now + timing.polling_timeout,
            next_poll_at: now + timing.poll_interval,
        });

        info!(
            log_type = LogType::Poller.as_str(),
            "Polling started (every {:?}, timeout {:?})",
            timing.poll_interval,
            timing.polling_timeout
        );
        true
    }

    /// One polling tick. The query is abandoned if the session deadline
    /// passes while it is in flight.
    pub async fn poll_once(&mut self) {
        let Some(session) = self.state.session else {
            return;
        };

        let status = match time::timeout_at(session.deadline, self.check_status()).await {
            Ok(status) => status,
            Err(_) => {
                self.expire_polling().await;
                return;
            }
        };

        match status {
            Some(status) if status.is_settled() => {
                let elapsed = session.started_at.elapsed();
                if status.is_running() {
                    info!(
                        log_type = LogType::Poller.as_str(),
                        "Server is now online after {:?}", elapsed
                    );
                } else {
                    warn!(
                        log_type = LogType::Poller.as_str(),
                        "Server stopped unexpectedly after {:?}", elapsed
                    );
                }
                self.end_polling();
            }
            _ => {
                if let Some(session) = self.state.session.as_mut() {
                    session.advance(self.settings.timing.poll_interval, Instant::now());
                }
            }
        }
    }

    /// Deadline handler: leaves polling and checks the status one last time.
    pub async fn expire_polling(&mut self) {
        if !self.state.is_polling() {
            return;
        }

        self.end_polling();
        warn!(
            log_type = LogType::Poller.as_str(),
            "Polling timed out after {:?}", self.settings.timing.polling_timeout
        );
        self.check_status().await;
    }

    fn end_polling(&mut self) {
        self.state.session = None;
        self.set_loading(false);
    }

    /// Runs the current polling session, if any, to its end.
    pub async fn run_polling(&mut self) {
        while let Some(session) = self.state.session {
            tokio::select! {
                biased;
                _ = time::sleep_until(session.deadline) => self.expire_polling().await,
                _ = time::sleep_until(session.next_poll_at) => self.poll_once().await,
            }
        }
    }

    /// Background refresh, skipped while a polling session owns the checks.
    pub async fn auto_refresh(&mut self) -> Option<ServerStatus> {
        if self.state.is_polling() {
            debug!(
                log_type = LogType::Poller.as_str(),
                "Polling active, skipping auto refresh"
            );
            return None;
        }
        self.check_status().await
    }

    pub fn rotate_flavor(&mut self) {
        let Some(flavor) = &self.flavor else {
            return;
        };
        if let Some(line) = flavor.pick(&mut rand::thread_rng()) {
            self.presenter.show_flavor(line);
        }
    }

    pub async fn handle_command(&mut self, command: WidgetCommand) {
        debug!(
            log_type = LogType::Cli.as_str(),
            "Handling command: {}",
            command.name()
        );

        match command {
            WidgetCommand::Start => {
                if self.state.status != ServerStatus::Stopped {
                    self.presenter.show_notice(&format!(
                        "Server can only be started while offline (status: {})",
                        self.state.status
                    ));
                } else if !self.state.is_polling() {
                    // Failure already logged and the loading marker cleared.
                    let _ = self.start_server().await;
                }
            }
            WidgetCommand::Refresh => {
                if self.state.is_polling() {
                    self.presenter
                        .show_notice("Already following a start, status will update shortly");
                } else {
                    self.check_status().await;
                }
            }
            WidgetCommand::Address => {
                let notice = match &self.settings.server_address {
                    Some(address) => format!("Server address: {}", address),
                    None => "No server address configured".to_string(),
                };
                self.presenter.show_notice(&notice);
            }
            WidgetCommand::Seed => {
                let notice = match &self.settings.world_seed {
                    Some(seed) => format!("World seed: {}", seed),
                    None => "No world seed configured".to_string(),
                };
                self.presenter.show_notice(&notice);
            }
            WidgetCommand::Recent => {
                let recent = self.store.recent_players().await;
                let notice = if recent.is_empty() {
                    "No recent players".to_string()
                } else {
                    format!("Recently played: {}", recent.as_slice().join(", "))
                };
                self.presenter.show_notice(&notice);
            }
            WidgetCommand::Quit => {}
        }
    }

    /// Event loop. The first auto refresh tick fires immediately and acts as
    /// the initial check. Returns on [`WidgetCommand::Quit`] or on shutdown; a
    /// closed command channel only stops command handling.
    pub async fn run(
        &mut self,
        mut commands: mpsc::Receiver<WidgetCommand>,
        mut shutdown: broadcast::Receiver<()>,
    ) {
        let mut refresh = time::interval(self.settings.timing.auto_refresh);
        refresh.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut flavor = time::interval(self.settings.timing.flavor_interval);
        flavor.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut commands_open = true;

        info!(log_type = LogType::Poller.as_str(), "Status loop started");

        loop {
            let session = self.state.session;
            let deadline = session.map(|s| s.deadline);
            let next_poll = session.map(|s| s.next_poll_at);
            let has_flavor = self.flavor.is_some();

            tokio::select! {
                biased;
                _ = shutdown.recv() => {
                    info!(log_type = LogType::Poller.as_str(), "Shutdown requested");
                    break;
                }
                _ = sleep_until_opt(deadline) => self.expire_polling().await,
                _ = sleep_until_opt(next_poll) => self.poll_once().await,
                command = commands.recv(), if commands_open => match command {
                    Some(WidgetCommand::Quit) => break,
                    Some(command) => self.handle_command(command).await,
                    None => {
                        debug!(log_type = LogType::Cli.as_str(), "Command channel closed");
                        commands_open = false;
                    }
                },
                _ = refresh.tick() => {
                    self.auto_refresh().await;
                }
                _ = flavor.tick(), if has_flavor => self.rotate_flavor(),
            }
        }

        info!(log_type = LogType::Poller.as_str(), "Status loop stopped");
    }

    async fn present_status(&mut self) {
        let (last_online, recent) = if self.state.status.is_running() {
            (None, Default::default())
        } else {
            (
                self.store.last_online().await,
                self.store.recent_players().await,
            )
        };

        let input = ReflectInput {
            status: &self.state.status,
            ip: self.state.ip.as_deref(),
            last_online,
            recent_players: recent.as_slice(),
        };
        let view = reflect(&input, Utc::now());
        self.presenter.show_status(&view);
    }

    fn set_loading(&mut self, loading: bool) {
        self.state.loading = loading;
        self.presenter.set_loading(loading);
    }
}

async fn sleep_until_opt(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => time::sleep_until(deadline).await,
        None => future::pending().await,
    }
}
