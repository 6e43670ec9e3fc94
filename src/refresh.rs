//! Timer-driven live-update simulation.
//!
//! A spawned task owns the feed, regenerates a full snapshot every
//! `refresh_secs`, and publishes it over a watch channel. Each publish
//! replaces the previous snapshot wholesale. The handle owns the task;
//! `stop()` or dropping it tears the timer down so nothing leaks past the
//! consuming view.

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};

use crate::generator::MockFeed;
use crate::logging::{log_refresh_tick, log_snapshot};
use crate::model::DashboardSnapshot;

pub struct Refresher;

pub struct RefreshHandle {
    rx: watch::Receiver<DashboardSnapshot>,
    task: JoinHandle<()>,
}

impl Refresher {
    /// Start the refresh loop. The first snapshot is generated immediately
    /// so subscribers never observe an empty state.
    pub fn spawn(mut feed: MockFeed) -> RefreshHandle {
        let period_secs = feed.config().refresh_secs;
        let first = feed.snapshot();
        log_snapshot(
            first.seq,
            first.kpis.len(),
            first.alerts.len(),
            first.anomalies.len(),
            first.recommendations.len(),
        );
        let (tx, rx) = watch::channel(first);

        let task = tokio::spawn(async move {
            let mut ticker = interval(Duration::from_secs(period_secs.max(1)));
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // interval fires immediately; consume the initial tick since the
            // first snapshot was already published.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let snap = feed.snapshot();
                log_refresh_tick(snap.seq, period_secs);
                log_snapshot(
                    snap.seq,
                    snap.kpis.len(),
                    snap.alerts.len(),
                    snap.anomalies.len(),
                    snap.recommendations.len(),
                );
                if tx.send(snap).is_err() {
                    // All receivers gone; nothing left to refresh.
                    break;
                }
            }
        });

        RefreshHandle { rx, task }
    }
}

impl RefreshHandle {
    /// New receiver over the snapshot channel. `borrow()` always yields the
    /// latest published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<DashboardSnapshot> {
        self.rx.clone()
    }

    /// Deterministic teardown: abort the timer task.
    pub fn stop(self) {
        self.task.abort();
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
