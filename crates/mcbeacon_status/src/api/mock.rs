use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::api::{PlayerSnapshot, StatusApi, StatusResponse};
use crate::error::StatusError;

#[derive(Debug, Clone)]
pub enum MockReply<T> {
    Ok(T),
    /// Fails the call as a transport error with this message.
    Fail(String),
    /// Never answers.
    Hang,
}

impl<T: Clone> MockReply<T> {
    async fn resolve(self) -> Result<T, StatusError> {
        match self {
            MockReply::Ok(value) => Ok(value),
            MockReply::Fail(msg) => Err(StatusError::Transport(msg)),
            MockReply::Hang => std::future::pending().await,
        }
    }
}

#[derive(Debug)]
struct Script<T> {
    queue: VecDeque<MockReply<T>>,
    /// Replayed once the queue is empty.
    fallback: Option<MockReply<T>>,
}

impl<T: Clone> Script<T> {
    fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            fallback: None,
        }
    }

    fn next(&mut self, what: &str) -> MockReply<T> {
        self.queue
            .pop_front()
            .or_else(|| self.fallback.clone())
            .unwrap_or_else(|| MockReply::Fail(format!("no scripted {} reply", what)))
    }
}

/// Scripted in-memory [`StatusApi`]. Replies are served in push order; when
/// a script runs dry the reply set with `always_*` is repeated.
#[derive(Clone)]
pub struct MockStatusApi {
    status: Arc<Mutex<Script<StatusResponse>>>,
    start: Arc<Mutex<Script<serde_json::Value>>>,
    players: Arc<Mutex<Script<PlayerSnapshot>>>,
    status_calls: Arc<AtomicUsize>,
    start_calls: Arc<AtomicUsize>,
    players_calls: Arc<AtomicUsize>,
}

impl Default for MockStatusApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockStatusApi {
    pub fn new() -> Self {
        Self {
            status: Arc::new(Mutex::new(Script::new())),
            start: Arc::new(Mutex::new(Script::new())),
            players: Arc::new(Mutex::new(Script::new())),
            status_calls: Arc::new(AtomicUsize::new(0)),
            start_calls: Arc::new(AtomicUsize::new(0)),
            players_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn push_status(&self, reply: MockReply<StatusResponse>) -> &Self {
        self.status.lock().unwrap().queue.push_back(reply);
        self
    }

    pub fn push_status_str(&self, status: &str) -> &Self {
        self.push_status(MockReply::Ok(StatusResponse::new(status)))
    }

    pub fn always_status(&self, reply: MockReply<StatusResponse>) -> &Self {
        self.status.lock().unwrap().fallback = Some(reply);
        self
    }

    pub fn push_start(&self, reply: MockReply<serde_json::Value>) -> &Self {
        self.start.lock().unwrap().queue.push_back(reply);
        self
    }

    pub fn push_players(&self, reply: MockReply<PlayerSnapshot>) -> &Self {
        self.players.lock().unwrap().queue.push_back(reply);
        self
    }

    pub fn always_players(&self, reply: MockReply<PlayerSnapshot>) -> &Self {
        self.players.lock().unwrap().fallback = Some(reply);
        self
    }

    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }

    pub fn start_calls(&self) -> usize {
        self.start_calls.load(Ordering::SeqCst)
    }

    pub fn players_calls(&self) -> usize {
        self.players_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StatusApi for MockStatusApi {
    async fn status(&self) -> Result<StatusResponse, StatusError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        let reply = self.status.lock().unwrap().next("status");
        reply.resolve().await
    }

    async fn start(&self) -> Result<serde_json::Value, StatusError> {
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        let reply = self.start.lock().unwrap().next("start");
        reply.resolve().await
    }

    async fn players(&self) -> Result<PlayerSnapshot, StatusError> {
        self.players_calls.fetch_add(1, Ordering::SeqCst);
        let reply = self.players.lock().unwrap().next("players");
        reply.resolve().await
    }
}
