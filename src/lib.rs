//! # tasksched
//!
//! A cooperative, run-to-completion task scheduler for microcontrollers.
//!
//! You give the [`TaskScheduler`] a fixed list of tasks, in priority order.
//! On every pass it reads the [`Clock`] once, asks each task in turn whether
//! it [can run](Task::can_run), and [runs](Task::run) the first one that can.
//! Then it starts again from the top.
//!
//! Two kinds of task are provided:
//!
//! * [`TriggeredTask`] - runs when something (usually an interrupt handler)
//!   calls [`TriggeredTask::set_runnable`].
//! * [`TimedTask`] - runs once the clock reaches its deadline.
//!
//! You can implement [`Task`] for your own types too.
//!
//! ```rust
//! use tasksched::{SysTickClock, Task, TaskScheduler, TimedTask, Tick, TriggeredTask};
//!
//! static CLOCK: SysTickClock = SysTickClock::new();
//! static BUTTON: TriggeredTask = TriggeredTask::new(0, on_button);
//! static BLINK: TimedTask = TimedTask::new(1, 500, on_blink);
//! static TASKS: [&dyn Task; 2] = [&BUTTON, &BLINK];
//!
//! fn on_button(task: &TriggeredTask, _now: Tick) {
//!     task.reset_runnable();
//! }
//!
//! fn on_blink(task: &TimedTask, _now: Tick) {
//!     task.inc_run_time(500);
//! }
//!
//! let scheduler = TaskScheduler::new(&TASKS, &CLOCK);
//! BUTTON.set_runnable();
//! assert_eq!(scheduler.poll().task_id(), Some(BUTTON.id()));
//! // In firmware you would call `scheduler.run_tasks()`, which never returns
//! ```

// Copyright (c) 2025 Ferrous Systems
// SPDX-License-Identifier: GPL-3.0-or-later

#![no_std]

mod lateness;
mod probe;
mod scheduler;
mod task;
mod tick;
mod timed;
mod triggered;

pub use lateness::{LatenessLog, LatenessSink, NoSamples};
pub use probe::{DispatchProbe, NoProbe, PinProbe};
pub use scheduler::{Dispatch, TaskScheduler};
pub use task::{Task, TaskId};
pub use tick::{Clock, MAX_DELAY, MAX_TIME, SysTickClock, Tick, tick_reached};
pub use timed::{TimedFn, TimedTask};
pub use triggered::{TriggeredFn, TriggeredTask};

// End of File
