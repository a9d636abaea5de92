//! Engine readiness signal
//!
//! The environment that loads the charting engine resolves a [`ReadySignal`]
//! once; the coordinator awaits the matching [`EngineReadiness`] with a bound.

use crate::chart::error::DashboardError;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{Instant, timeout};

pub struct ReadySignal {
    tx: watch::Sender<bool>,
}

impl ReadySignal {
    pub fn mark_ready(&self) {
        self.tx.send_replace(true);
    }
}

#[derive(Clone)]
pub struct EngineReadiness {
    rx: watch::Receiver<bool>,
}

/// Create a linked signal/readiness pair, not yet ready.
pub fn engine_readiness() -> (ReadySignal, EngineReadiness) {
    let (tx, rx) = watch::channel(false);
    (ReadySignal { tx }, EngineReadiness { rx })
}

impl EngineReadiness {
    /// Readiness that is already resolved.
    #[cfg(test)]
    pub fn ready() -> Self {
        let (signal, readiness) = engine_readiness();
        signal.mark_ready();
        readiness
    }

    pub fn is_ready(&self) -> bool {
        *self.rx.borrow()
    }

    /// Wait at most `poll_interval * max_attempts` for the engine.
    ///
    /// Fails early if the signal is dropped without ever being marked ready.
    pub async fn wait(
        &mut self,
        poll_interval: Duration,
        max_attempts: u32,
    ) -> Result<(), DashboardError> {
        let started = Instant::now();
        let limit = poll_interval * max_attempts;
        match timeout(limit, self.rx.wait_for(|ready| *ready)).await {
            Ok(Ok(_)) => Ok(()),
            _ => Err(DashboardError::EngineUnavailable {
                waited: started.elapsed(),
            }),
        }
    }
}
