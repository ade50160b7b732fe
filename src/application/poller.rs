//! # Polling Scheduler
//!
//! Background task that snapshots every board on a fixed interval, diffs the new snapshot
//! against the one it owns from the previous cycle, and announces each change once.
//!
//! Cycles never overlap: the next one starts only after the sleep that follows the last.
//! A failed fetch abandons the cycle, keeps the previous snapshot and retries next interval.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::application::detector;
use crate::application::fetcher::BoardSnapshotFetcher;
use crate::domain::traits::NotificationSink;
use crate::domain::types::BoardSnapshot;
use crate::strings::{logs, messages};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    Completed { events: usize },
    Abandoned,
}

pub struct PollingScheduler {
    fetcher: Arc<BoardSnapshotFetcher>,
    sink: Arc<dyn NotificationSink>,
    interval: Duration,
    previous: BoardSnapshot,
    consecutive_failures: u32,
}

impl PollingScheduler {
    /// The first cycle diffs against an empty snapshot, so startup announces nothing.
    pub fn new(
        fetcher: Arc<BoardSnapshotFetcher>,
        sink: Arc<dyn NotificationSink>,
        interval: Duration,
    ) -> Self {
        Self {
            fetcher,
            sink,
            interval,
            previous: BoardSnapshot::default(),
            consecutive_failures: 0,
        }
    }

    pub fn with_baseline(mut self, snapshot: BoardSnapshot) -> Self {
        self.previous = snapshot;
        self
    }

    pub fn previous(&self) -> &BoardSnapshot {
        &self.previous
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    pub async fn run_cycle(&mut self) -> CycleOutcome {
        tracing::info!("{}", logs::CYCLE_START);

        let current = match self.fetcher.fetch_all().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                self.consecutive_failures += 1;
                let line = logs::cycle_abandoned(&e.to_string(), self.consecutive_failures);
                if e.is_retryable() {
                    tracing::warn!("{}", line);
                } else {
                    tracing::error!("{}", line);
                }
                return CycleOutcome::Abandoned;
            }
        };
        self.consecutive_failures = 0;

        let events = detector::diff(&self.previous, &current);
        for event in &events {
            if let Err(e) = self.sink.notify(&messages::change_notification(event)).await {
                tracing::error!("{}", logs::notify_failed(&e));
            }
        }
        self.previous = current;

        tracing::info!(
            events = events.len(),
            boards = self.previous.len(),
            cards = self.previous.card_count(),
            "{}",
            logs::CYCLE_END
        );
        CycleOutcome::Completed {
            events: events.len(),
        }
    }

    /// Spawns the polling loop. Dropping the handle stops it too.
    pub fn start(self) -> PollerHandle {
        let (stop_tx, stop_rx) = watch::channel(false);
        let task = tokio::spawn(self.run(stop_rx));
        PollerHandle { stop_tx, task }
    }

    async fn run(mut self, mut stop_rx: watch::Receiver<bool>) {
        loop {
            if *stop_rx.borrow() {
                break;
            }
            self.run_cycle().await;
            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = stop_rx.changed() => break,
            }
        }
        tracing::info!("{}", logs::POLLER_STOPPED);
    }
}

pub struct PollerHandle {
    stop_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Signals the loop and waits for the current cycle, if any, to finish.
    pub async fn stop(self) {
        let _ = self.stop_tx.send(true);
        if let Err(e) = self.task.await {
            tracing::error!("Listener task ended abnormally: {}", e);
        }
    }
}
