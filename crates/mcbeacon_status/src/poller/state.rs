use std::time::Duration;

use tokio::time::Instant;

use crate::status::ServerStatus;

/// An active follow-up after a start command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollingSession {
    pub started_at: Instant,
    /// Session ends here whatever the server reports.
    pub deadline: Instant,
    pub next_poll_at: Instant,
}

impl PollingSession {
    /// Moves to the next tick on the fixed schedule. Ticks that already
    /// passed while a query was in flight are skipped, not replayed.
    pub fn advance(&mut self, interval: Duration, now: Instant) {
        self.next_poll_at += interval;
        if self.next_poll_at <= now {
            let behind = now.duration_since(self.next_poll_at);
            let skipped = behind.as_nanos() / interval.as_nanos() + 1;
            self.next_poll_at += interval * skipped as u32;
        }
    }
}

/// Everything the poller mutates, kept in one place so it can be inspected
/// without a rendering surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollerState {
    pub status: ServerStatus,
    /// IP from the latest successful status response.
    pub ip: Option<String>,
    pub session: Option<PollingSession>,
    pub loading: bool,
}

impl PollerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_polling(&self) -> bool {
        self.session.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(start: Instant) -> PollingSession {
        PollingSession {
            started_at: start,
            deadline: start + Duration::from_secs(120),
            next_poll_at: start + Duration::from_secs(5),
        }
    }

    #[test]
    fn test_advance_keeps_fixed_rate() {
        let start = Instant::now();
        let mut session = session(start);

        session.advance(Duration::from_secs(5), start + Duration::from_secs(9));
        assert_eq!(session.next_poll_at, start + Duration::from_secs(10));
    }

    #[test]
    fn test_advance_skips_missed_ticks() {
        let start = Instant::now();
        let mut session = session(start);

        session.advance(Duration::from_secs(5), start + Duration::from_secs(17));
        assert_eq!(session.next_poll_at, start + Duration::from_secs(20));

        session.advance(Duration::from_secs(5), start + Duration::from_secs(25));
        assert_eq!(session.next_poll_at, start + Duration::from_secs(30));
    }
}
