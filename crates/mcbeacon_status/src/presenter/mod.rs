mod recording;

use crate::reflector::{PlayersView, StatusView};

pub use recording::{PresenterEvent, RecordingPresenter};

/// Rendering surface driven by the poller.
pub trait Presenter: Send {
    fn show_status(&mut self, view: &StatusView);
    fn show_players(&mut self, view: &PlayersView);
    fn hide_players(&mut self);

    /// Busy marker on the start action while a start is in progress.
    fn set_loading(&mut self, loading: bool);

    fn show_flavor(&mut self, line: &str);
    fn show_notice(&mut self, notice: &str);
}
