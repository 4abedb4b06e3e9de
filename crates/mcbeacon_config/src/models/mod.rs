pub mod avatar;
pub mod beacon;
pub mod logging;
pub mod players;
pub mod timing;
