//! Contains the [`TaskScheduler`] type

// Copyright (c) 2025 Ferrous Systems
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::{Clock, DispatchProbe, NoProbe, Task, TaskId, Tick};

/// What happened on one scheduler pass
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Dispatch {
    /// We ran the given task
    Ran(TaskId),
    /// No task could run
    Idle,
}

impl Dispatch {
    /// Get the ID of the task that ran, if any
    pub const fn task_id(self) -> Option<TaskId> {
        match self {
            Dispatch::Ran(id) => Some(id),
            Dispatch::Idle => None,
        }
    }
}

impl core::fmt::Display for Dispatch {
    fn fmt(&self, fmt: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Dispatch::Ran(id) => write!(fmt, "ran {}", id),
            Dispatch::Idle => write!(fmt, "idle"),
        }
    }
}

/// A cooperative, fixed-priority scheduler
///
/// On each pass it reads the clock once, then walks the task list from the
/// start and runs the first task that says it can run. Only one task runs per
/// pass, and the next pass starts again from the top - so a task earlier in
/// the list always wins over a task later in the list.
///
/// Tasks are borrowed, not owned. Usually they live in `static`s.
///
/// Nothing pre-empts a running task. A task that never returns stops the
/// scheduler, and a task that is always ready stops every task after it from
/// running.
pub struct TaskScheduler<'a, C, P = NoProbe> {
    /// A fixed list of all our tasks, in priority order
    tasks: &'a [&'a dyn Task],
    /// Where we get the time from
    clock: C,
    /// Told about every dispatch
    probe: P,
}

impl<'a, C> TaskScheduler<'a, C, NoProbe>
where
    C: Clock,
{
    /// Build the scheduler, with no instrumentation
    pub const fn new(tasks: &'a [&'a dyn Task], clock: C) -> TaskScheduler<'a, C, NoProbe> {
        TaskScheduler::with_probe(tasks, clock, NoProbe)
    }
}

impl<'a, C, P> TaskScheduler<'a, C, P>
where
    C: Clock,
    P: DispatchProbe,
{
    /// Build the scheduler, reporting every dispatch to `probe`
    pub const fn with_probe(
        tasks: &'a [&'a dyn Task],
        clock: C,
        probe: P,
    ) -> TaskScheduler<'a, C, P> {
        TaskScheduler {
            tasks,
            clock,
            probe,
        }
    }

    /// Run the scheduler
    ///
    /// Polls the tasks forever. There is no idle state - if nothing is ready
    /// we just ask again.
    pub fn run_tasks(&self) -> ! {
        #[cfg(feature = "defmt")]
        defmt::info!(
            "Scheduler @ {=usize:08x} running {=usize} tasks",
            self as *const Self as usize,
            self.tasks.len()
        );
        loop {
            self.poll();
        }
    }

    /// Do one scheduler pass, using the time from our clock
    pub fn poll(&self) -> Dispatch {
        let now = self.clock.now();
        self.poll_at(now)
    }

    /// Do one scheduler pass, as if the time was `now`
    ///
    /// Every task in this pass sees the same `now`.
    pub fn poll_at(&self, now: Tick) -> Dispatch {
        let Some(task) = self.tasks.iter().find(|task| task.can_run(now)) else {
            return Dispatch::Idle;
        };
        let id = task.id();
        #[cfg(feature = "defmt")]
        defmt::trace!("> dispatch {} @ {=u32}", id, now);
        self.probe.dispatch_start(id);
        task.run(now);
        self.probe.dispatch_end();
        #[cfg(feature = "defmt")]
        defmt::trace!("< dispatch {}", id);
        Dispatch::Ran(id)
    }

    /// Get the task list, in priority order
    pub fn tasks(&self) -> &'a [&'a dyn Task] {
        self.tasks
    }

    /// How many tasks are we scheduling?
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Do we have no tasks at all?
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Get the clock
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Get the dispatch probe
    pub fn probe(&self) -> &P {
        &self.probe
    }
}


// End of File
