//! Holds the [`TimedTask`] type

// Copyright (c) 2025 Ferrous Systems
// SPDX-License-Identifier: GPL-3.0-or-later

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::{LatenessSink, NoSamples, Task, TaskId, Tick, tick_reached};

/// The body of a [`TimedTask`]
///
/// You get the task itself, so you can re-arm it with
/// [`TimedTask::inc_run_time`] or [`TimedTask::set_run_time`].
pub type TimedFn<S = NoSamples> = fn(&TimedTask<S>, Tick);

/// A task that runs once the clock reaches its deadline
///
/// The scheduler never moves the deadline. To run periodically, the body
/// should call [`TimedTask::inc_run_time`] with the period. Adding to the
/// deadline rather than to `now` means a late dispatch does not push every
/// later run back too.
///
/// On each dispatch, the number of ticks between the deadline and the start
/// of the pass is pushed into the task's [`LatenessSink`].
///
/// A [parked](TimedTask::park) task never runs, whatever the clock says,
/// until it is given a new deadline.
pub struct TimedTask<S = NoSamples> {
    /// Our ID
    id: TaskId,
    /// The tick at which we can next run
    run_time: AtomicU32,
    /// Cleared while parked
    armed: AtomicBool,
    /// Where lateness samples go
    sink: S,
    /// What to do when we run
    body: TimedFn<S>,
}

impl TimedTask<NoSamples> {
    /// Create a new [`TimedTask`] which can run at tick `when`
    pub const fn new(id: u8, when: Tick, body: TimedFn) -> TimedTask {
        TimedTask::with_sink(id, when, NoSamples, body)
    }
}

impl<S> TimedTask<S>
where
    S: LatenessSink,
{
    /// Create a new [`TimedTask`] which records its lateness into `sink`
    pub const fn with_sink(id: u8, when: Tick, sink: S, body: TimedFn<S>) -> TimedTask<S> {
        TimedTask {
            id: TaskId::new(id),
            run_time: AtomicU32::new(when),
            armed: AtomicBool::new(true),
            sink,
            body,
        }
    }

    /// Set the tick at which the task can next run
    ///
    /// Un-parks the task.
    pub fn set_run_time(&self, when: Tick) {
        self.run_time.store(when, Ordering::Relaxed);
        self.armed.store(true, Ordering::Relaxed);
    }

    /// Move the deadline forward by `inc` ticks
    ///
    /// Wraps around, like the clock does. Un-parks the task.
    pub fn inc_run_time(&self, inc: Tick) {
        // Only one context writes the deadline at a time, so a load/store
        // pair is fine and also works on Armv6-M.
        let when = self.run_time.load(Ordering::Relaxed);
        self.run_time.store(when.wrapping_add(inc), Ordering::Relaxed);
        self.armed.store(true, Ordering::Relaxed);
    }

    /// Stop the task from running until it gets a new deadline
    ///
    /// Use this instead of a far-off deadline like
    /// [`MAX_TIME`](crate::MAX_TIME), which wrap-around comparison treats as
    /// being in the past.
    pub fn park(&self) {
        self.armed.store(false, Ordering::Relaxed);
    }

    /// Is the task parked?
    pub fn is_parked(&self) -> bool {
        !self.armed.load(Ordering::Relaxed)
    }

    /// Get the tick at which the task can next run
    pub fn run_time(&self) -> Tick {
        self.run_time.load(Ordering::Relaxed)
    }

    /// Get the lateness sink
    pub fn sink(&self) -> &S {
        &self.sink
    }
}

impl<S> Task for TimedTask<S>
where
    S: LatenessSink + Sync,
{
    fn id(&self) -> TaskId {
        self.id
    }

    fn can_run(&self, now: Tick) -> bool {
        !self.is_parked() && tick_reached(now, self.run_time())
    }

    fn run(&self, now: Tick) {
        let when = self.run_time();
        if !self.is_parked() && tick_reached(now, when) {
            self.sink.push(now.wrapping_sub(when));
        }
        (self.body)(self, now);
    }
}

impl<S> core::fmt::Debug for TimedTask<S>
where
    S: LatenessSink,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TimedTask")
            .field("id", &self.id)
            .field("run_time", &self.run_time())
            .field("parked", &self.is_parked())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LatenessLog, MAX_DELAY, MAX_TIME};

    const PERIOD: Tick = 100;

    fn rearm(task: &TimedTask, _now: Tick) {
        task.inc_run_time(PERIOD);
    }

    fn rearm_logged(task: &TimedTask<LatenessLog<4>>, _now: Tick) {
        task.inc_run_time(PERIOD);
    }

    fn ignore(_task: &TimedTask, _now: Tick) {}

    #[test]
    fn test_can_run_at_deadline() {
        let task = TimedTask::new(3, 100, ignore);
        assert_eq!(task.id(), TaskId::new(3));
        assert!(!task.can_run(0));
        assert!(!task.can_run(99));
        assert!(task.can_run(100));
        assert!(task.can_run(5000));
    }

    #[test]
    fn test_can_run_across_wrap() {
        let task = TimedTask::new(0, MAX_TIME - 10, ignore);
        assert!(!task.can_run(MAX_TIME - 11));
        assert!(task.can_run(MAX_TIME - 10));
        assert!(task.can_run(MAX_TIME));
        assert!(task.can_run(0));
        assert!(task.can_run(20));

        // Re-arm so the deadline lands after the wrap
        task.inc_run_time(20);
        assert_eq!(task.run_time(), 9);
        assert!(!task.can_run(MAX_TIME));
        assert!(!task.can_run(8));
        assert!(task.can_run(9));
    }

    #[test]
    fn test_set_run_time() {
        let task = TimedTask::new(0, 0, ignore);
        assert!(task.can_run(0));
        task.set_run_time(500);
        assert_eq!(task.run_time(), 500);
        assert!(!task.can_run(499));
        assert!(task.can_run(500));
    }

    #[test]
    fn test_max_time_is_not_never() {
        let task = TimedTask::new(0, MAX_TIME, ignore);
        // Wrap-around comparison puts MAX_TIME just behind tick 0
        assert!(task.can_run(0));
        assert!(task.can_run(1000));
    }

    #[test]
    fn test_parked_task_never_runs() {
        let task = TimedTask::new(0, 100, ignore);
        task.park();
        assert!(task.is_parked());
        for now in [0, 100, 1000, MAX_DELAY, MAX_TIME] {
            assert!(!task.can_run(now));
        }
        // Still parked after the counter wraps
        assert!(!task.can_run(MAX_TIME.wrapping_add(100)));
    }

    #[test]
    fn test_new_deadline_unparks() {
        let task = TimedTask::new(0, 100, ignore);
        task.park();
        task.set_run_time(200);
        assert!(!task.is_parked());
        assert!(!task.can_run(199));
        assert!(task.can_run(200));

        task.park();
        task.inc_run_time(50);
        assert!(!task.is_parked());
        assert_eq!(task.run_time(), 250);
        assert!(task.can_run(250));
    }

    #[test]
    fn test_parked_run_records_nothing() {
        let task = TimedTask::with_sink(0, 100, LatenessLog::<4>::new(), rearm_logged);
        task.park();
        task.run(150);
        assert!(task.sink().is_empty());
    }

    #[test]
    fn test_inc_run_time_composes() {
        let start = MAX_TIME - 1000;
        let period = 77;
        let repeated = TimedTask::new(0, start, ignore);
        for _ in 0..50 {
            repeated.inc_run_time(period);
        }
        let once = TimedTask::new(0, start, ignore);
        once.inc_run_time(period * 50);
        assert_eq!(repeated.run_time(), once.run_time());
        assert_eq!(once.run_time(), start.wrapping_add(3850));
    }

    #[test]
    fn test_rearm_does_not_drift() {
        let task = TimedTask::new(0, 100, rearm);
        // Dispatched 30 ticks late
        task.run(130);
        assert_eq!(task.run_time(), 200);
        assert!(!task.can_run(199));
    }

    #[test]
    fn test_lateness_recorded() {
        let task = TimedTask::with_sink(0, 100, LatenessLog::<4>::new(), rearm_logged);
        task.run(100);
        task.run(215);
        task.run(300);
        assert_eq!(task.sink().pop_oldest(), Some(0));
        assert_eq!(task.sink().pop_oldest(), Some(15));
        assert_eq!(task.sink().pop_oldest(), Some(0));
        assert!(task.sink().is_empty());
    }

    #[test]
    fn test_lateness_across_wrap() {
        let task = TimedTask::with_sink(0, MAX_TIME - 1, LatenessLog::<4>::new(), rearm_logged);
        task.run(3);
        assert_eq!(task.sink().worst(), Some(5));
    }

    #[test]
    fn test_early_run_records_nothing() {
        let task = TimedTask::with_sink(0, 100, LatenessLog::<4>::new(), rearm_logged);
        task.run(50);
        assert!(task.sink().is_empty());
        assert_eq!(task.run_time(), 200);
    }
}

// End of File
