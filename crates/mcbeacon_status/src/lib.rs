mod error;
mod flavor;
mod status;

pub mod api;
pub mod poller;
pub mod presenter;
pub mod reflector;
pub mod store;

pub use api::*;
pub use error::*;
pub use flavor::FlavorText;
pub use poller::{PollerSettings, PollerState, PollingSession, StatusPoller, WidgetCommand};
pub use presenter::{Presenter, PresenterEvent, RecordingPresenter};
pub use reflector::{
    ActionIcon, ActionView, Indicator, PlayerEntry, PlayersView, ReflectInput, StatusView,
    format_relative, reflect, reflect_players,
};
pub use status::ServerStatus;
pub use store::{FileStateStore, MAX_RECENT_PLAYERS, MemoryStateStore, RecentPlayers, StateStore};
