//! Per-invocation status tick task
//!
//! One driver per outstanding submission. A 1-second tick re-derives the
//! tier from elapsed time and publishes it over a watch channel. The driver
//! is an owned resource: stopping it (or dropping it) aborts the tick task,
//! so a settled or superseded invocation can never receive another tick.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use super::tier::StatusTier;

/// Tick resolution for tier re-evaluation
const TICK: Duration = Duration::from_secs(1);

/// Owns the tick task for one invocation's wait narration
#[derive(Debug)]
pub struct StatusDriver {
    rx: watch::Receiver<StatusTier>,
    task: JoinHandle<()>,
    started: Instant,
}

impl StatusDriver {
    /// Start narrating a fresh invocation; the tier starts at Processing
    /// with zero elapsed time
    pub fn start() -> Self {
        let started = Instant::now();
        let (tx, rx) = watch::channel(StatusTier::Processing);

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(TICK);
            let mut last = StatusTier::Processing;
            loop {
                interval.tick().await;
                // Elapsed time is monotonic, but keep the published tier
                // explicitly non-decreasing as well.
                let tier = StatusTier::for_elapsed(started.elapsed()).max(last);
                if tier != last && tx.send(tier).is_err() {
                    break;
                }
                last = tier;
            }
        });

        Self { rx, task, started }
    }

    /// Subscribe to tier updates
    pub fn subscribe(&self) -> watch::Receiver<StatusTier> {
        self.rx.clone()
    }

    /// Most recently published tier
    pub fn current(&self) -> StatusTier {
        *self.rx.borrow()
    }

    /// Time since the invocation was submitted
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Stop ticking; no further tier is published after this returns
    pub fn stop(&self) {
        self.task.abort();
    }
}

impl Drop for StatusDriver {
    fn drop(&mut self) {
        self.task.abort();
    }
}
