use comfy_table::{Table, presets::UTF8_FULL};
use console::Term;
use mcbeacon_status::{ActionIcon, Indicator, PlayersView, Presenter, StatusView};

use crate::cli::format as fmt;

/// Writes views to stdout. Repeated identical statuses are printed once.
pub struct TerminalPresenter {
    term: Term,
    last_status: Option<StatusView>,
    last_players: Option<PlayersView>,
    loading: bool,
}

impl Default for TerminalPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalPresenter {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
            last_status: None,
            last_players: None,
            loading: false,
        }
    }

    fn write(&self, text: &str) {
        let _ = self.term.write_line(text);
    }
}

pub fn status_line(view: &StatusView) -> String {
    let dot = match view.indicator {
        Some(Indicator::Online) => fmt::success("●"),
        Some(Indicator::Offline) => fmt::error("●"),
        Some(Indicator::Pending) => fmt::warning("●"),
        None => fmt::secondary("○"),
    };

    let action = match (view.action.enabled, view.action.icon) {
        (_, Some(ActionIcon::Confirmed)) => fmt::success(&format!("✓ {}", view.action.text)),
        (true, Some(ActionIcon::Start)) => {
            fmt::label(&format!("▶ {} (type `start`)", view.action.text))
        }
        _ => fmt::secondary(&view.action.text),
    };

    let mut line = format!("{} {}  {}", dot, fmt::label(&view.label), action);
    if let Some(ip) = &view.ip {
        line.push_str(&format!("  {}", fmt::secondary(&format!("IP {}", ip))));
    }
    if let Some(last_online) = &view.last_online {
        line.push_str(&format!(
            "\n  {} {}",
            fmt::secondary("Last online:"),
            last_online
        ));
    }
    if !view.recent_players.is_empty() {
        let names: Vec<String> = view.recent_players.iter().map(|n| fmt::entity(n)).collect();
        line.push_str(&format!(
            "\n  {} {}",
            fmt::secondary("Recently played:"),
            names.join(", ")
        ));
    }
    line
}

pub fn players_table(view: &PlayersView) -> String {
    let mut out = format!("{} {}", fmt::sub_header("Players"), view.count);

    match view.placeholder {
        Some(placeholder) => {
            out.push_str(&format!("\n  {}", fmt::secondary(placeholder)));
        }
        None => {
            let mut table = Table::new();
            table.load_preset(UTF8_FULL).set_header(vec!["#", "Player", "Avatar"]);
            for (i, entry) in view.entries.iter().enumerate() {
                table.add_row(vec![
                    (i + 1).to_string(),
                    entry.name.clone(),
                    entry.avatar_url.clone(),
                ]);
            }
            out.push_str(&format!("\n{}", table));
        }
    }
    out
}

impl Presenter for TerminalPresenter {
    fn show_status(&mut self, view: &StatusView) {
        if self.last_status.as_ref() == Some(view) {
            return;
        }
        self.write(&status_line(view));
        self.last_status = Some(view.clone());
    }

    fn show_players(&mut self, view: &PlayersView) {
        if self.last_players.as_ref() == Some(view) {
            return;
        }
        self.write(&players_table(view));
        self.last_players = Some(view.clone());
    }

    fn hide_players(&mut self) {
        if self.last_players.take().is_some() {
            self.write(&fmt::secondary("Player list hidden"));
        }
    }

    fn set_loading(&mut self, loading: bool) {
        if loading && !self.loading {
            self.write(&fmt::secondary("Working..."));
        }
        self.loading = loading;
    }

    fn show_flavor(&mut self, line: &str) {
        self.write(&fmt::flavor(line));
    }

    fn show_notice(&mut self, notice: &str) {
        self.write(notice);
    }
}
