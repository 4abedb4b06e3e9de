use super::Presenter;
use crate::reflector::{PlayersView, StatusView};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterEvent {
    Status(StatusView),
    Players(PlayersView),
    HidePlayers,
    Loading(bool),
    Flavor(String),
    Notice(String),
}

/// Keeps every call in order, so tests can assert on what would be shown.
#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    events: Vec<PresenterEvent>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[PresenterEvent] {
        &self.events
    }

    pub fn last_status(&self) -> Option<&StatusView> {
        self.events.iter().rev().find_map(|event| match event {
            PresenterEvent::Status(view) => Some(view),
            _ => None,
        })
    }

    pub fn last_players(&self) -> Option<&PlayersView> {
        self.events.iter().rev().find_map(|event| match event {
            PresenterEvent::Players(view) => Some(view),
            _ => None,
        })
    }

    /// Whether the player panel is currently shown.
    pub fn players_visible(&self) -> bool {
        self.events
            .iter()
            .rev()
            .find_map(|event| match event {
                PresenterEvent::Players(_) => Some(true),
                PresenterEvent::HidePlayers => Some(false),
                _ => None,
            })
            .unwrap_or(false)
    }

    pub fn loading(&self) -> bool {
        self.events
            .iter()
            .rev()
            .find_map(|event| match event {
                PresenterEvent::Loading(loading) => Some(*loading),
                _ => None,
            })
            .unwrap_or(false)
    }

    pub fn notices(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                PresenterEvent::Notice(notice) => Some(notice.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn flavors(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                PresenterEvent::Flavor(line) => Some(line.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Presenter for RecordingPresenter {
    fn show_status(&mut self, view: &StatusView) {
        self.events.push(PresenterEvent::Status(view.clone()));
    }

    fn show_players(&mut self, view: &PlayersView) {
        self.events.push(PresenterEvent::Players(view.clone()));
    }

    fn hide_players(&mut self) {
        self.events.push(PresenterEvent::HidePlayers);
    }

    fn set_loading(&mut self, loading: bool) {
        self.events.push(PresenterEvent::Loading(loading));
    }

    fn show_flavor(&mut self, line: &str) {
        self.events.push(PresenterEvent::Flavor(line.to_string()));
    }

    fn show_notice(&mut self, notice: &str) {
        self.events.push(PresenterEvent::Notice(notice.to_string()));
    }
}
