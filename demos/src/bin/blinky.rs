//! A simple example showing how to use tasksched
//!
//! A periodic task "blinks" every half second, and every fourth blink it
//! triggers a second task, as an interrupt handler would.

// Copyright (c) 2025 Ferrous Systems
// SPDX-License-Identifier: GPL-3.0-or-later

#![no_std]
#![no_main]

use tasksched::{Task, TaskScheduler, Tick, TimedTask, TriggeredTask};

use tasksched_demos::{CLOCK, SYSTICKS_PER_MS};

const BLINK_PERIOD: Tick = 500;

const RUN_FOR: Tick = 5_000;

static BLINK: TimedTask = TimedTask::new(0, BLINK_PERIOD, blink);

static BUTTON: TriggeredTask = TriggeredTask::new(1, button);

static STOP: TimedTask = TimedTask::new(2, RUN_FOR, stop);

static TASK_LIST: [&dyn Task; 3] = [&BLINK, &BUTTON, &STOP];

#[cortex_m_rt::entry]
fn main() -> ! {
    let cp = cortex_m::Peripherals::take().unwrap();
    defmt::info!("Hello!");
    CLOCK.start(cp.SYST, SYSTICKS_PER_MS);
    let scheduler = TaskScheduler::new(&TASK_LIST, &CLOCK);
    scheduler.run_tasks();
}

/// Our periodic task
fn blink(task: &TimedTask, now: Tick) {
    let count = now / BLINK_PERIOD;
    defmt::info!("Blink {=u32}", count);
    if count % 4 == 0 {
        BUTTON.set_runnable();
    }
    task.inc_run_time(BLINK_PERIOD);
}

/// Our event-driven task
fn button(task: &TriggeredTask, _now: Tick) {
    task.reset_runnable();
    defmt::info!("Button!");
}

/// Ends the demo
fn stop(_task: &TimedTask, _now: Tick) {
    defmt::info!("Done");
    semihosting::process::exit(0);
}

// End of File
