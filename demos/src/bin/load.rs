//! Measures how late periodic tasks run when one of them is slow
//!
//! Each periodic task records its lateness. Once a second, a reporting task
//! prints the worst lateness each task has seen.

// Copyright (c) 2025 Ferrous Systems
// SPDX-License-Identifier: GPL-3.0-or-later

#![no_std]
#![no_main]

use tasksched::{LatenessLog, Task, TaskScheduler, Tick, TimedTask};

use tasksched_demos::{CLOCK, SYSTICKS_PER_MS};

/// How many lateness samples each task keeps
const SAMPLES: usize = 16;

type LoggedTask = TimedTask<LatenessLog<SAMPLES>>;

static FAST: LoggedTask = TimedTask::with_sink(0, 10, LatenessLog::new(), fast);

static MEDIUM: LoggedTask = TimedTask::with_sink(1, 25, LatenessLog::new(), medium);

static SLOW: LoggedTask = TimedTask::with_sink(2, 100, LatenessLog::new(), slow);

static REPORT: TimedTask = TimedTask::new(3, 1000, report);

static TASK_LIST: [&dyn Task; 4] = [&FAST, &MEDIUM, &SLOW, &REPORT];

#[cortex_m_rt::entry]
fn main() -> ! {
    let cp = cortex_m::Peripherals::take().unwrap();
    defmt::info!("Hello!");
    CLOCK.start(cp.SYST, SYSTICKS_PER_MS);
    let scheduler = TaskScheduler::new(&TASK_LIST, &CLOCK);
    scheduler.run_tasks();
}

fn fast(task: &LoggedTask, _now: Tick) {
    task.inc_run_time(10);
}

fn medium(task: &LoggedTask, _now: Tick) {
    task.inc_run_time(25);
}

/// Hogs the CPU for about 3 ms
fn slow(task: &LoggedTask, _now: Tick) {
    cortex_m::asm::delay(3 * SYSTICKS_PER_MS);
    task.inc_run_time(100);
}

fn report(task: &TimedTask, now: Tick) {
    for (name, logged) in [("fast", &FAST), ("medium", &MEDIUM), ("slow", &SLOW)] {
        defmt::info!(
            "{=str}: worst {=u32} ms over {=usize} samples",
            name,
            logged.sink().worst().unwrap_or(0),
            logged.sink().len()
        );
        logged.sink().clear();
    }
    if now >= 5_000 {
        semihosting::process::exit(0);
    }
    task.inc_run_time(1000);
}

// End of File
