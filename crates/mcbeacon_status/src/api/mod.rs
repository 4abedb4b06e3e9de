pub mod client;
pub mod mock;
pub mod models;

use crate::error::StatusError;
use async_trait::async_trait;

#[async_trait]
pub trait StatusApi: Send + Sync {
    async fn status(&self) -> Result<StatusResponse, StatusError>;

    /// Asks the remote side to boot the server. The acknowledgement body is
    /// only logged.
    async fn start(&self) -> Result<serde_json::Value, StatusError>;

    async fn players(&self) -> Result<PlayerSnapshot, StatusError>;
}

pub use client::HttpStatusApi;
pub use mock::{MockReply, MockStatusApi};
pub use models::*;
