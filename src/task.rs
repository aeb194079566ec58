//! Holds the [`Task`] trait and the [`TaskId`] type

// Copyright (c) 2025 Ferrous Systems
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::Tick;

/// Identifies a task, for diagnostics only
///
/// The scheduler never looks at this when deciding what to run - the order of
/// the task list does that.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(u8);

impl TaskId {
    /// Create a Task ID
    pub const fn new(id: u8) -> TaskId {
        TaskId(id)
    }

    /// Get the raw ID
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl From<u8> for TaskId {
    fn from(id: u8) -> TaskId {
        TaskId(id)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TaskId {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "T{=u8:03}", self.0);
    }
}

impl core::fmt::Display for TaskId {
    fn fmt(&self, fmt: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(fmt, "T{:03}", self.0)
    }
}

/// Something the [`TaskScheduler`](crate::TaskScheduler) can run
///
/// Tasks run to completion. The scheduler asks each task, in order, whether
/// it can run, and runs the first one that says yes. Nothing else happens
/// until that task's [`Task::run`] returns, so keep it short.
///
/// ## Consuming readiness
///
/// A task that reports it can run must, inside [`Task::run`], consume
/// whatever made it ready - clear its flag, move its deadline forward - or
/// the scheduler will pick it again on the very next pass. A task that stays
/// ready forever starves every task after it in the list. The scheduler does
/// not detect this.
///
/// Tasks are shared with interrupt handlers, so all methods take `&self` and
/// tasks must be [`Sync`]. Keep mutable state in atomics.
pub trait Task: Sync {
    /// Get the ID of this task
    fn id(&self) -> TaskId;

    /// Can the task run right now?
    ///
    /// Called on every pass, so it must be cheap and free of side effects.
    fn can_run(&self, now: Tick) -> bool;

    /// Run the task
    ///
    /// `now` is the tick at which this scheduler pass started.
    fn run(&self, now: Tick);
}


// End of File
