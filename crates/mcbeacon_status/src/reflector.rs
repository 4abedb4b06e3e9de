//! Maps poller output to a description of what should be on screen.
//!
//! Nothing here performs I/O; a [`Presenter`](crate::Presenter) decides how a
//! view is actually drawn.

use std::time::Duration;

use chrono::{DateTime, Utc};
use mcbeacon_config::AvatarConfig;

use crate::api::PlayerSnapshot;
use crate::status::ServerStatus;

pub const NO_PLAYERS_PLACEHOLDER: &str = "No players online";
const PLAYER_STAGGER: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    Online,
    Offline,
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionIcon {
    Confirmed,
    Start,
}

/// The start button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionView {
    pub enabled: bool,
    pub icon: Option<ActionIcon>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusView {
    pub status: ServerStatus,
    pub indicator: Option<Indicator>,
    pub label: String,
    pub action: ActionView,
    pub ip: Option<String>,
    /// Only set while the server is not running.
    pub last_online: Option<String>,
    /// Only filled while the server is not running.
    pub recent_players: Vec<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct ReflectInput<'a> {
    pub status: &'a ServerStatus,
    pub ip: Option<&'a str>,
    pub last_online: Option<DateTime<Utc>>,
    pub recent_players: &'a [String],
}

impl<'a> ReflectInput<'a> {
    pub fn new(status: &'a ServerStatus) -> Self {
        Self {
            status,
            ip: None,
            last_online: None,
            recent_players: &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerEntry {
    pub name: String,
    pub avatar_url: String,
    /// Reveal offset relative to the first entry.
    pub delay: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayersView {
    pub count: String,
    pub entries: Vec<PlayerEntry>,
    pub placeholder: Option<&'static str>,
}

pub fn reflect(input: &ReflectInput<'_>, now: DateTime<Utc>) -> StatusView {
    let status = input.status;

    let (indicator, label, action) = match status {
        ServerStatus::Running => (
            Some(Indicator::Online),
            "Online".to_string(),
            ActionView {
                enabled: false,
                icon: Some(ActionIcon::Confirmed),
                text: "Server Online".to_string(),
            },
        ),
        ServerStatus::Stopped => (
            Some(Indicator::Offline),
            "Offline".to_string(),
            ActionView {
                enabled: true,
                icon: Some(ActionIcon::Start),
                text: "Start Server".to_string(),
            },
        ),
        ServerStatus::Pending | ServerStatus::Starting => pending("Starting..."),
        ServerStatus::Stopping => pending("Stopping..."),
        ServerStatus::Error => (
            Some(Indicator::Offline),
            "Error".to_string(),
            disabled("Error"),
        ),
        ServerStatus::Unknown | ServerStatus::Other(_) => {
            (None, status.to_string(), disabled(status.as_str()))
        }
    };

    let (last_online, recent_players) = if status.is_running() {
        (None, Vec::new())
    } else {
        (
            input.last_online.map(|at| format_relative(at, now)),
            input.recent_players.to_vec(),
        )
    };

    StatusView {
        status: status.clone(),
        indicator,
        label,
        action,
        ip: input.ip.map(str::to_string),
        last_online,
        recent_players,
    }
}

fn pending(text: &str) -> (Option<Indicator>, String, ActionView) {
    (Some(Indicator::Pending), text.to_string(), disabled(text))
}

fn disabled(text: &str) -> ActionView {
    ActionView {
        enabled: false,
        icon: None,
        text: text.to_string(),
    }
}

pub fn reflect_players(snapshot: &PlayerSnapshot, avatar: &AvatarConfig) -> PlayersView {
    let entries: Vec<PlayerEntry> = snapshot
        .players
        .iter()
        .enumerate()
        .map(|(i, name)| PlayerEntry {
            name: name.clone(),
            avatar_url: avatar.url_for(name),
            delay: PLAYER_STAGGER * i as u32,
        })
        .collect();

    PlayersView {
        count: format!("{}/{}", snapshot.online, snapshot.max),
        placeholder: entries.is_empty().then_some(NO_PLAYERS_PLACEHOLDER),
        entries,
    }
}

/// Coarse "time ago" text, rounded down to the largest whole unit.
pub fn format_relative(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - at).num_seconds().max(0);

    let minutes = secs / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if minutes < 1 {
        "Just now".to_string()
    } else if hours < 1 {
        format!("{}m ago", minutes)
    } else if days < 1 {
        format!("{}h ago", hours)
    } else {
        format!("{}d ago", days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn view_for(status: ServerStatus) -> StatusView {
        reflect(&ReflectInput::new(&status), Utc::now())
    }

    #[test]
    fn test_running() {
        let view = view_for(ServerStatus::Running);
        assert_eq!(view.indicator, Some(Indicator::Online));
        assert_eq!(view.label, "Online");
        assert!(!view.action.enabled);
        assert_eq!(view.action.icon, Some(ActionIcon::Confirmed));
    }

    #[test]
    fn test_stopped_enables_start() {
        let view = view_for(ServerStatus::Stopped);
        assert_eq!(view.indicator, Some(Indicator::Offline));
        assert_eq!(view.label, "Offline");
        assert!(view.action.enabled);
        assert_eq!(view.action.icon, Some(ActionIcon::Start));
        assert_eq!(view.action.text, "Start Server");
    }

    #[test]
    fn test_transitional_states() {
        for status in [ServerStatus::Pending, ServerStatus::Starting] {
            let view = view_for(status);
            assert_eq!(view.indicator, Some(Indicator::Pending));
            assert_eq!(view.label, "Starting...");
            assert!(!view.action.enabled);
        }

        let view = view_for(ServerStatus::Stopping);
        assert_eq!(view.indicator, Some(Indicator::Pending));
        assert_eq!(view.label, "Stopping...");
        assert!(!view.action.enabled);
    }

    #[test]
    fn test_unrecognized_status_shows_raw_text() {
        let view = view_for(ServerStatus::Other("hibernating".to_string()));
        assert_eq!(view.indicator, None);
        assert_eq!(view.label, "hibernating");
        assert!(!view.action.enabled);

        let view = view_for(ServerStatus::Unknown);
        assert_eq!(view.indicator, None);
        assert_eq!(view.label, "unknown");
    }

    #[test]
    fn test_error_is_disabled() {
        let view = view_for(ServerStatus::Error);
        assert_eq!(view.label, "Error");
        assert!(!view.action.enabled);
    }

    #[test]
    fn test_reported_error_shows_raw_text() {
        let view = view_for(ServerStatus::from("error"));
        assert_eq!(view.indicator, None);
        assert_eq!(view.label, "error");
        assert!(!view.action.enabled);
    }

    #[test]
    fn test_last_online_only_when_not_running() {
        let now = Utc::now();
        let recent = vec!["Bob".to_string()];
        let stopped = ServerStatus::Stopped;
        let running = ServerStatus::Running;
        let mut input = ReflectInput::new(&stopped);
        input.last_online = Some(now - TimeDelta::minutes(5));
        input.recent_players = &recent;

        let view = reflect(&input, now);
        assert_eq!(view.last_online.as_deref(), Some("5m ago"));
        assert_eq!(view.recent_players, recent);

        input.status = &running;
        let view = reflect(&input, now);
        assert_eq!(view.last_online, None);
        assert!(view.recent_players.is_empty());
    }

    #[test]
    fn test_format_relative_buckets() {
        let now = Utc::now();
        assert_eq!(format_relative(now - TimeDelta::seconds(30), now), "Just now");
        assert_eq!(format_relative(now - TimeDelta::minutes(5), now), "5m ago");
        assert_eq!(format_relative(now - TimeDelta::minutes(59), now), "59m ago");
        assert_eq!(format_relative(now - TimeDelta::hours(3), now), "3h ago");
        assert_eq!(format_relative(now - TimeDelta::days(2), now), "2d ago");
        assert_eq!(
            format_relative(now - TimeDelta::days(2) - TimeDelta::hours(23), now),
            "2d ago"
        );
    }

    #[test]
    fn test_format_relative_future_is_just_now() {
        let now = Utc::now();
        assert_eq!(format_relative(now + TimeDelta::hours(1), now), "Just now");
    }

    #[test]
    fn test_players_view() {
        let snapshot = PlayerSnapshot::new(2, 20, &["Alice", "Bob"]);
        let view = reflect_players(&snapshot, &AvatarConfig::default());

        assert_eq!(view.count, "2/20");
        assert_eq!(view.placeholder, None);
        assert_eq!(view.entries.len(), 2);
        assert_eq!(view.entries[0].name, "Alice");
        assert_eq!(
            view.entries[1].avatar_url,
            "https://mc-heads.net/avatar/Bob/24"
        );
        assert_eq!(view.entries[0].delay, Duration::ZERO);
        assert_eq!(view.entries[1].delay, Duration::from_millis(50));
    }

    #[test]
    fn test_empty_players_view() {
        let snapshot = PlayerSnapshot::new(0, 20, &[]);
        let view = reflect_players(&snapshot, &AvatarConfig::default());

        assert!(view.entries.is_empty());
        assert_eq!(view.placeholder, Some(NO_PLAYERS_PLACEHOLDER));
    }
}
