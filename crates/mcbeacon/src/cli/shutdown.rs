//! Shutdown coordination for graceful termination

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use mcbeacon_config::LogType;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

#[derive(Debug)]
pub struct ShutdownController {
    tx: broadcast::Sender<()>,
    shutdown_triggered: AtomicBool,
}

impl ShutdownController {
    pub fn new() -> Arc<Self> {
        let (tx, _) = broadcast::channel(1);
        Arc::new(Self {
            tx,
            shutdown_triggered: AtomicBool::new(false),
        })
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    pub fn trigger_shutdown(&self, reason: &str) {
        if self.shutdown_triggered.swap(true, Ordering::SeqCst) {
            debug!(
                log_type = LogType::Cli.as_str(),
                "Shutdown already in progress, ignoring additional request"
            );
            return;
        }

        info!(log_type = LogType::Cli.as_str(), "Initiating shutdown: {}", reason);
        let _ = self.tx.send(());
    }

    pub fn is_shutdown_triggered(&self) -> bool {
        self.shutdown_triggered.load(Ordering::SeqCst)
    }

    /// Triggers shutdown on the first Ctrl-C.
    pub fn listen_for_ctrl_c(self: &Arc<Self>) {
        let controller = Arc::clone(self);
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => controller.trigger_shutdown("Ctrl-C received"),
                Err(e) => warn!(
                    log_type = LogType::Cli.as_str(),
                    "Failed to listen for Ctrl-C: {}", e
                ),
            }
        });
    }
}
