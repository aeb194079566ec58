//! Holds the [`Tick`] type, the [`Clock`] capability and [`SysTickClock`]

// Copyright (c) 2025 Ferrous Systems
// SPDX-License-Identifier: GPL-3.0-or-later

use core::sync::atomic::{AtomicU32, Ordering};

/// A point in time, in milliseconds since the clock started
///
/// Wraps around every 2^32 ms (about 49.7 days), so always compare with
/// [`tick_reached`] rather than `>=`.
pub type Tick = u32;

/// The largest representable tick value
///
/// This is *not* a "never" marker. Deadlines are compared with wrap-around
/// arithmetic, so a deadline of `MAX_TIME` looks like it is in the past for
/// the first 2^31 ticks after boot. To stop a [`TimedTask`](crate::TimedTask)
/// from running, [park](crate::TimedTask::park) it. To push a deadline as far
/// out as possible, use `now.wrapping_add(MAX_DELAY)`.
pub const MAX_TIME: Tick = Tick::MAX;

/// The furthest into the future a deadline can be placed, relative to now
///
/// Deadlines are compared with wrap-around arithmetic, so anything more than
/// half the counter range ahead looks like it is in the past.
pub const MAX_DELAY: Tick = i32::MAX as Tick;

/// Has `now` reached (or passed) `deadline`?
///
/// Uses modular arithmetic, so this stays correct when the counter wraps
/// between the two values, as long as they are less than 2^31 ticks apart.
#[inline]
pub const fn tick_reached(now: Tick, deadline: Tick) -> bool {
    (now.wrapping_sub(deadline) as i32) >= 0
}

/// Something that can tell us the time
pub trait Clock {
    /// Get the current time in ticks
    fn now(&self) -> Tick;
}

impl<C> Clock for &C
where
    C: Clock + ?Sized,
{
    fn now(&self) -> Tick {
        C::now(self)
    }
}

/// Lets you use a platform function, like `millis`, as a clock
impl Clock for fn() -> Tick {
    fn now(&self) -> Tick {
        self()
    }
}

/// A millisecond counter driven by the Cortex-M SysTick exception
///
/// Put one in a `static`, call [`SysTickClock::start`] once, and call
/// [`SysTickClock::tick`] from your `SysTick` exception handler.
pub struct SysTickClock {
    /// Current tick count
    ticks: AtomicU32,
}

impl SysTickClock {
    /// Create a new clock, starting at zero
    pub const fn new() -> SysTickClock {
        SysTickClock {
            ticks: AtomicU32::new(0),
        }
    }

    /// Configure SysTick to fire once per tick
    ///
    /// `systicks_per_tick` is the number of core clock cycles in one
    /// millisecond.
    pub fn start(&self, mut syst: cortex_m::peripheral::SYST, systicks_per_tick: u32) {
        assert!(systicks_per_tick > 1);
        #[cfg(feature = "defmt")]
        defmt::info!(
            "SysTickClock @ {=usize:08x}, reload {=u32}",
            self as *const SysTickClock as usize,
            systicks_per_tick - 1
        );
        syst.set_reload(systicks_per_tick - 1);
        syst.set_clock_source(cortex_m::peripheral::syst::SystClkSource::Core);
        syst.clear_current();
        syst.enable_counter();
        syst.enable_interrupt();
    }

    /// Advance the clock by one tick
    ///
    /// Call this from the SysTick exception handler.
    pub fn tick(&self) {
        self.advance(1);
    }

    /// Advance the clock by the given number of ticks
    pub fn advance(&self, ticks: Tick) {
        #[cfg(not(any(arm_architecture = "v6-m", arm_architecture = "v8-m.base")))]
        self.ticks.fetch_add(ticks, Ordering::Relaxed);

        // No atomic read-modify-write on these cores
        #[cfg(any(arm_architecture = "v6-m", arm_architecture = "v8-m.base"))]
        cortex_m::interrupt::free(|_| {
            self.ticks.store(
                self.ticks.load(Ordering::Relaxed).wrapping_add(ticks),
                Ordering::Relaxed,
            );
        });
    }

    /// Jump the clock to the given tick
    pub fn set(&self, now: Tick) {
        self.ticks.store(now, Ordering::Relaxed);
    }
}

impl Clock for SysTickClock {
    fn now(&self) -> Tick {
        self.ticks.load(Ordering::Relaxed)
    }
}

impl Default for SysTickClock {
    fn default() -> Self {
        SysTickClock::new()
    }
}


// End of File
