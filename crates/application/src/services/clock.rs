//! Shared dashboard clock
//!
//! A single background task advances one [`ClockTick`] at a fixed interval.
//! Every card computes its local time from the same tick, so all cards show
//! a consistent "now". The task is aborted when the [`Clock`] is stopped or
//! dropped.

use std::time::Duration;

use chrono::Utc;
use tokio::{sync::watch, task::JoinHandle, time::MissedTickBehavior};
use tracing::{info, trace};

/// Default tick interval: once per second
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// A point in time, as milliseconds since the Unix epoch (UTC)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTick(i64);

impl ClockTick {
    /// The current wall-clock time
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now().timestamp_millis())
    }

    /// A tick at the given UTC milliseconds
    #[must_use]
    pub const fn from_millis(utc_millis: i64) -> Self {
        Self(utc_millis)
    }

    /// Milliseconds since the Unix epoch
    #[must_use]
    pub const fn utc_millis(self) -> i64 {
        self.0
    }
}

/// Repeating tick source with an explicit lifecycle
#[derive(Debug)]
pub struct Clock {
    current: watch::Receiver<ClockTick>,
    task: JoinHandle<()>,
}

impl Clock {
    /// Start ticking from the system clock
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(interval: Duration) -> Self {
        Self::start_with(interval, ClockTick::now)
    }

    /// Start ticking from a custom time source
    ///
    /// The published tick never moves backwards, even if the source does.
    pub fn start_with<F>(interval: Duration, source: F) -> Self
    where
        F: Fn() -> ClockTick + Send + 'static,
    {
        let (tx, rx) = watch::channel(source());

        info!(interval_ms = interval.as_millis(), "Starting dashboard clock");

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // First tick completes immediately; the initial value is already set
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let next = source();
                tx.send_if_modified(|current| {
                    if next > *current {
                        *current = next;
                        true
                    } else {
                        false
                    }
                });
                trace!(utc_millis = tx.borrow().utc_millis(), "Clock tick");
            }
        });

        Self { current: rx, task }
    }

    /// The latest tick
    #[must_use]
    pub fn now(&self) -> ClockTick {
        *self.current.borrow()
    }

    /// Receiver notified on every tick
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ClockTick> {
        self.current.clone()
    }

    /// Stop the repeating tick; the last tick stays readable
    pub fn stop(&self) {
        if !self.task.is_finished() {
            info!("Stopping dashboard clock");
        }
        self.task.abort();
    }

    /// Whether the tick task is still running
    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for Clock {
    fn drop(&mut self) {
        self.task.abort();
    }
}
