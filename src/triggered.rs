//! Holds the [`TriggeredTask`] type

// Copyright (c) 2025 Ferrous Systems
// SPDX-License-Identifier: GPL-3.0-or-later

use core::sync::atomic::{AtomicBool, Ordering};

use crate::{Task, TaskId, Tick};

/// The body of a [`TriggeredTask`]
///
/// You get the task itself, so you can call [`TriggeredTask::reset_runnable`].
pub type TriggeredFn = fn(&TriggeredTask, Tick);

/// A task that runs when something external says so
///
/// An interrupt handler (or another task) calls
/// [`TriggeredTask::set_runnable`], and the task runs on a later scheduler
/// pass. The flag is not cleared for you - the body must call
/// [`TriggeredTask::reset_runnable`], otherwise it runs again on the next
/// pass.
pub struct TriggeredTask {
    /// Our ID
    id: TaskId,
    /// Set when an event has happened and has not been handled yet
    runnable: AtomicBool,
    /// What to do when we run
    body: TriggeredFn,
}

impl TriggeredTask {
    /// Create a new [`TriggeredTask`], which is not yet runnable
    pub const fn new(id: u8, body: TriggeredFn) -> TriggeredTask {
        TriggeredTask {
            id: TaskId::new(id),
            runnable: AtomicBool::new(false),
            body,
        }
    }

    /// Mark the task as runnable
    ///
    /// Safe to call from an interrupt handler.
    pub fn set_runnable(&self) {
        self.runnable.store(true, Ordering::Relaxed);
    }

    /// Mark the task as not runnable
    pub fn reset_runnable(&self) {
        self.runnable.store(false, Ordering::Relaxed);
    }

    /// Is the task currently marked runnable?
    pub fn is_runnable(&self) -> bool {
        self.runnable.load(Ordering::Relaxed)
    }
}

impl Task for TriggeredTask {
    fn id(&self) -> TaskId {
        self.id
    }

    fn can_run(&self, _now: Tick) -> bool {
        self.is_runnable()
    }

    fn run(&self, now: Tick) {
        (self.body)(self, now);
    }
}

impl core::fmt::Debug for TriggeredTask {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TriggeredTask")
            .field("id", &self.id)
            .field("runnable", &self.is_runnable())
            .finish()
    }
}


// End of File
