//! Dispatch instrumentation, for measuring load with a logic analyser

// Copyright (c) 2025 Ferrous Systems
// SPDX-License-Identifier: GPL-3.0-or-later

use core::cell::RefCell;

use embedded_hal::digital::OutputPin;

use crate::TaskId;

/// Told when the scheduler starts and finishes running a task
///
/// Implementations must be quick and must not fail.
pub trait DispatchProbe {
    /// The scheduler is about to run the given task
    fn dispatch_start(&self, id: TaskId);

    /// The task has returned
    fn dispatch_end(&self);
}

/// A [`DispatchProbe`] that does nothing
#[derive(Copy, Clone, Debug, Default)]
pub struct NoProbe;

impl DispatchProbe for NoProbe {
    #[inline(always)]
    fn dispatch_start(&self, _id: TaskId) {}

    #[inline(always)]
    fn dispatch_end(&self) {}
}

impl<P> DispatchProbe for &P
where
    P: DispatchProbe + ?Sized,
{
    fn dispatch_start(&self, id: TaskId) {
        P::dispatch_start(self, id)
    }

    fn dispatch_end(&self) {
        P::dispatch_end(self)
    }
}

/// Shows the running task on GPIO pins
///
/// While a task runs, the low `N` bits of its [`TaskId`] are driven onto the
/// ID pins (bit 0 on `id_pins[0]`) and the strobe pin is high. Between tasks,
/// every pin is low. Hook them up to a logic analyser to see what ran and for
/// how long.
///
/// Pin errors are ignored.
pub struct PinProbe<P, const N: usize> {
    pins: RefCell<Pins<P, N>>,
}

/// The pins a [`PinProbe`] drives
struct Pins<P, const N: usize> {
    id: [P; N],
    strobe: P,
}

impl<P, const N: usize> PinProbe<P, N>
where
    P: OutputPin,
{
    /// Create a new probe
    ///
    /// A [`TaskId`] is eight bits wide, so `N` must be no more than 8.
    pub const fn new(id_pins: [P; N], strobe: P) -> PinProbe<P, N> {
        assert!(N <= 8);
        PinProbe {
            pins: RefCell::new(Pins {
                id: id_pins,
                strobe,
            }),
        }
    }

    /// Give the pins back
    pub fn free(self) -> ([P; N], P) {
        let pins = self.pins.into_inner();
        (pins.id, pins.strobe)
    }
}

impl<P, const N: usize> DispatchProbe for PinProbe<P, N>
where
    P: OutputPin,
{
    fn dispatch_start(&self, id: TaskId) {
        let Ok(mut pins) = self.pins.try_borrow_mut() else {
            return;
        };
        for (bit, pin) in pins.id.iter_mut().enumerate() {
            let _ = if (id.get() >> bit) & 1 == 1 {
                pin.set_high()
            } else {
                pin.set_low()
            };
        }
        let _ = pins.strobe.set_high();
    }

    fn dispatch_end(&self) {
        let Ok(mut pins) = self.pins.try_borrow_mut() else {
            return;
        };
        let _ = pins.strobe.set_low();
        for pin in pins.id.iter_mut() {
            let _ = pin.set_low();
        }
    }
}


// End of File
