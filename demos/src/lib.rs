//! Common panic/fault/timestamp handlers, and the system clock, for the demos

// Copyright (c) 2025 Ferrous Systems
// SPDX-License-Identifier: GPL-3.0-or-later

#![no_std]

use defmt_semihosting as _;
use tasksched::{Clock, SysTickClock};

/// Core clock cycles per millisecond on the MPS2-AN385
pub const SYSTICKS_PER_MS: u32 = 25_000;

/// The millisecond clock every demo schedules against
pub static CLOCK: SysTickClock = SysTickClock::new();

/// Called by hardware once per millisecond, once [`CLOCK`] is started.
#[cortex_m_rt::exception]
fn SysTick() {
    CLOCK.tick();
}

/// Called when a panic occurs.
///
/// Logs the panic to defmt and then crashes the CPU.
#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    defmt::println!("PANIC: {}", defmt::Debug2Format(info));
    cortex_m::asm::udf();
}

/// Called when a HardFault occurs.
///
/// Logs the fault to defmt and then crashes the CPU.
#[cortex_m_rt::exception]
unsafe fn HardFault(info: &cortex_m_rt::ExceptionFrame) -> ! {
    defmt::println!("FAULT: {}", defmt::Debug2Format(info));
    cortex_m::asm::udf();
}

// Log milliseconds in the defmt logs
defmt::timestamp!("{=u32:010}", CLOCK.now());

// End of File
