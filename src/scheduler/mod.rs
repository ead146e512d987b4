//! Daily rollover detection.
//!
//! A [`RolloverScheduler`] compares the persisted "last reset date" with today's date on each
//! tick and reports a rollover at most once per calendar day. [`RolloverScheduler::spawn`] runs
//! the ticks on a background thread that sleeps until the next local midnight and publishes
//! each rollover on a channel.

use std::{
    io,
    sync::{
        mpsc::{self, Receiver, RecvTimeoutError, Sender},
        Arc,
    },
    thread::{self, JoinHandle},
    time::Duration,
};

use chrono::NaiveDateTime;
use tracing::{debug, error, info};

use crate::core::clock::Clock;
use crate::ledger::{until_next_midnight_in, LocaleFormat};
use crate::storage::{ResetMarkerStore, StoreError};

const THREAD_NAME: &str = "networth-rollover";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Checking,
}

/// Result of a single tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickOutcome {
    /// Today's formatted date at the time of the tick.
    pub today: String,
    /// True when the persisted reset date was stale and has been replaced with `today`.
    pub rolled_over: bool,
    /// How long to wait before the next tick.
    pub next_wakeup: Duration,
}

/// Message published when a new calendar day is detected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rollover {
    pub date: String,
}

pub struct RolloverScheduler {
    marker: Arc<dyn ResetMarkerStore>,
    clock: Arc<dyn Clock>,
    locale: LocaleFormat,
    state: SchedulerState,
}

impl RolloverScheduler {
    pub fn new(
        marker: Arc<dyn ResetMarkerStore>,
        clock: Arc<dyn Clock>,
        locale: LocaleFormat,
    ) -> Self {
        Self {
            marker,
            clock,
            locale,
            state: SchedulerState::Idle,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Real time until the next local midnight, resolved through the clock's time zone.
    pub fn until_next_midnight(&self) -> Duration {
        self.wakeup_after(self.clock.now())
    }

    fn wakeup_after(&self, now: NaiveDateTime) -> Duration {
        until_next_midnight_in(now, |local| self.clock.resolve(local))
    }

    /// Checks for a day change, recording today's date when one happened.
    pub fn tick(&mut self) -> Result<TickOutcome, StoreError> {
        self.state = SchedulerState::Checking;
        let now = self.clock.now();
        let today = self.locale.format_date(now.date());
        let checked = self.check(&today);
        self.state = SchedulerState::Idle;

        let rolled_over = checked?;
        if rolled_over {
            info!(%today, "day rollover detected");
        } else {
            debug!(%today, "no rollover");
        }
        Ok(TickOutcome {
            today,
            rolled_over,
            next_wakeup: self.wakeup_after(now),
        })
    }

    fn check(&self, today: &str) -> Result<bool, StoreError> {
        let last = self.marker.last_reset_date()?;
        if last.as_deref() == Some(today) {
            return Ok(false);
        }
        self.marker.record_reset_date(today)?;
        Ok(true)
    }

    /// Runs the tick loop on a background thread.
    ///
    /// The first tick happens immediately. Failed ticks are logged and the loop still waits for
    /// the next midnight. The loop ends when the handle is shut down or dropped, or when the
    /// receiver is dropped.
    pub fn spawn(mut self) -> io::Result<(SchedulerHandle, Receiver<Rollover>)> {
        let (events_tx, events_rx) = mpsc::channel();
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let thread = thread::Builder::new()
            .name(THREAD_NAME.into())
            .spawn(move || loop {
                let wait = match self.tick() {
                    Ok(outcome) => {
                        if outcome.rolled_over
                            && events_tx
                                .send(Rollover {
                                    date: outcome.today,
                                })
                                .is_err()
                        {
                            debug!("rollover receiver dropped, stopping scheduler");
                            break;
                        }
                        outcome.next_wakeup
                    }
                    Err(err) => {
                        error!(error = %err, "rollover check failed");
                        self.until_next_midnight()
                    }
                };
                match stop_rx.recv_timeout(wait) {
                    Err(RecvTimeoutError::Timeout) => continue,
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            })?;

        info!("rollover scheduler started");
        Ok((
            SchedulerHandle {
                stop: Some(stop_tx),
                thread: Some(thread),
            },
            events_rx,
        ))
    }
}

/// Owner of the background scheduler thread.
pub struct SchedulerHandle {
    stop: Option<Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl SchedulerHandle {
    /// Stops the loop and waits for the thread to exit.
    pub fn shutdown(mut self) {
        self.stop_and_join();
    }

    fn stop_and_join(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                error!("rollover scheduler thread panicked");
            }
        }
    }
}

impl Drop for SchedulerHandle {
    fn drop(&mut self) {
        self.stop_and_join();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::FixedClock;
    use crate::ledger::calendar::zones::new_york_2024;
    use crate::storage::JsonStateFile;
    use chrono::{DateTime, Duration as ChronoDuration, FixedOffset};
    use tempfile::TempDir;

    /// Fixed wall-clock reading interpreted in New York time.
    struct NewYorkClock(FixedClock);

    impl Clock for NewYorkClock {
        fn now(&self) -> NaiveDateTime {
            self.0.now()
        }

        fn resolve(&self, local: NaiveDateTime) -> Option<DateTime<FixedOffset>> {
            new_york_2024(local)
        }
    }

    fn scheduler(
        dir: &TempDir,
        clock: Arc<FixedClock>,
    ) -> (RolloverScheduler, Arc<JsonStateFile>) {
        let marker = Arc::new(JsonStateFile::new(dir.path().join("state.json")));
        let scheduler = RolloverScheduler::new(marker.clone(), clock, LocaleFormat::EnUs);
        (scheduler, marker)
    }

    #[test]
    fn first_tick_rolls_over_and_second_is_a_no_op() {
        let dir = TempDir::new().expect("temp dir");
        let clock = Arc::new(FixedClock::at(2024, 5, 10, 8, 0, 0).unwrap());
        let (mut scheduler, marker) = scheduler(&dir, clock);

        let first = scheduler.tick().unwrap();
        assert!(first.rolled_over);
        assert_eq!(first.today, "5/10/2024");
        assert_eq!(first.next_wakeup, Duration::from_secs(16 * 60 * 60));
        assert_eq!(marker.last_reset_date().unwrap().as_deref(), Some("5/10/2024"));

        let second = scheduler.tick().unwrap();
        assert!(!second.rolled_over);
        assert_eq!(scheduler.state(), SchedulerState::Idle);
    }

    #[test]
    fn crossing_midnight_triggers_one_rollover() {
        let dir = TempDir::new().expect("temp dir");
        let clock = Arc::new(FixedClock::at(2024, 5, 10, 23, 59, 0).unwrap());
        let (mut scheduler, marker) = scheduler(&dir, clock.clone());
        scheduler.tick().unwrap();

        clock.advance(ChronoDuration::minutes(1));
        let outcome = scheduler.tick().unwrap();
        assert!(outcome.rolled_over);
        assert_eq!(marker.last_reset_date().unwrap().as_deref(), Some("5/11/2024"));
        assert!(!scheduler.tick().unwrap().rolled_over);
    }

    #[test]
    fn wakeup_on_spring_forward_day_lands_on_real_midnight() {
        let dir = TempDir::new().expect("temp dir");
        let clock = NewYorkClock(FixedClock::at(2024, 3, 10, 1, 0, 0).unwrap());
        let marker = Arc::new(JsonStateFile::new(dir.path().join("state.json")));
        let mut scheduler = RolloverScheduler::new(marker, Arc::new(clock), LocaleFormat::EnUs);

        let outcome = scheduler.tick().unwrap();
        assert_eq!(outcome.next_wakeup, Duration::from_secs(22 * 60 * 60));
        assert_eq!(scheduler.until_next_midnight(), outcome.next_wakeup);
    }
}
