//! Periodic `check_time()` driver.
//!
//! The engine runs no clock of its own; this loop is what turns elapsed
//! wall-clock time into a settlement prompt. Detection latency is bounded by
//! the poll interval.

use std::future::Future;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::clock::Clock;
use crate::events::Event;
use crate::ledger::Ledger;
use crate::session::SessionEngine;
use crate::storage::PollerSettings;

#[derive(Debug, Clone, Copy)]
pub struct ClockPoller {
    interval: Duration,
}

impl ClockPoller {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn from_settings(settings: &PollerSettings) -> Self {
        Self::new(Duration::from_millis(settings.interval_ms.max(1)))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Poll `engine` until `shutdown` resolves.
    ///
    /// The first check happens immediately. Every event produced by
    /// `check_time()` is passed to `on_event` with the engine borrowed
    /// back, so the caller can persist or render the new state.
    pub async fn run<L, C, S, F>(&self, engine: &mut SessionEngine<L, C>, shutdown: S, on_event: F)
    where
        L: Ledger,
        C: Clock,
        S: Future<Output = ()>,
        F: FnMut(&SessionEngine<L, C>, &Event),
    {
        self.run_synced(engine, shutdown, |_| {}, on_event).await
    }

    /// Like [`run`](Self::run), but calls `sync` before every check so the
    /// caller can swap in state that was changed outside this loop.
    pub async fn run_synced<L, C, S, Y, F>(
        &self,
        engine: &mut SessionEngine<L, C>,
        shutdown: S,
        mut sync: Y,
        mut on_event: F,
    ) where
        L: Ledger,
        C: Clock,
        S: Future<Output = ()>,
        Y: FnMut(&mut SessionEngine<L, C>),
        F: FnMut(&SessionEngine<L, C>, &Event),
    {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    debug!("clock poller shutting down");
                    break;
                }
                _ = ticker.tick() => {
                    sync(engine);
                    if let Some(event) = engine.check_time() {
                        on_event(engine, &event);
                    }
                }
            }
        }
    }
}

impl Default for ClockPoller {
    fn default() -> Self {
        Self::from_settings(&PollerSettings::default())
    }
}
