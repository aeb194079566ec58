//! Records how late [`TimedTask`](crate::TimedTask)s were dispatched

// Copyright (c) 2025 Ferrous Systems
// SPDX-License-Identifier: GPL-3.0-or-later

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

use crate::Tick;

/// Somewhere to put lateness samples
///
/// This is diagnostic only. Implementations must not block and must not
/// fail - if there is no room, drop something.
pub trait LatenessSink {
    /// Record that a task ran `lateness` ticks after its deadline
    fn push(&self, lateness: Tick);
}

/// A [`LatenessSink`] that throws everything away
#[derive(Copy, Clone, Debug, Default)]
pub struct NoSamples;

impl LatenessSink for NoSamples {
    #[inline(always)]
    fn push(&self, _lateness: Tick) {}
}

/// Keeps the most recent `N` lateness samples
///
/// When full, a new sample overwrites the oldest one. Nothing in this crate
/// reads the samples back - that's up to you (a debugger, a telemetry task,
/// etc).
pub struct LatenessLog<const N: usize> {
    samples: Mutex<RefCell<Deque<Tick, N>>>,
}

impl<const N: usize> LatenessLog<N> {
    /// Create an empty log
    pub const fn new() -> Self {
        assert!(N > 0);
        LatenessLog {
            samples: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// How many samples the log can hold
    pub const fn capacity(&self) -> usize {
        N
    }

    /// How many samples are in the log
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.samples.borrow_ref(cs).len())
    }

    /// Is the log empty?
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look at the oldest sample, without removing it
    pub fn oldest(&self) -> Option<Tick> {
        critical_section::with(|cs| self.samples.borrow_ref(cs).front().copied())
    }

    /// Remove and return the oldest sample
    pub fn pop_oldest(&self) -> Option<Tick> {
        critical_section::with(|cs| self.samples.borrow_ref_mut(cs).pop_front())
    }

    /// Get the largest sample in the log
    pub fn worst(&self) -> Option<Tick> {
        critical_section::with(|cs| self.samples.borrow_ref(cs).iter().copied().max())
    }

    /// Throw away all the samples
    pub fn clear(&self) {
        critical_section::with(|cs| self.samples.borrow_ref_mut(cs).clear());
    }
}

impl<const N: usize> LatenessSink for LatenessLog<N> {
    fn push(&self, lateness: Tick) {
        critical_section::with(|cs| {
            let mut samples = self.samples.borrow_ref_mut(cs);
            if samples.is_full() {
                samples.pop_front();
            }
            // Cannot fail, we just made room
            samples.push_back(lateness).ok();
        });
    }
}

impl<const N: usize> Default for LatenessLog<N> {
    fn default() -> Self {
        LatenessLog::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_keeps_samples_in_order() {
        let log = LatenessLog::<4>::new();
        assert!(log.is_empty());
        log.push(3);
        log.push(1);
        log.push(2);
        assert_eq!(log.len(), 3);
        assert_eq!(log.oldest(), Some(3));
        assert_eq!(log.worst(), Some(3));
        assert_eq!(log.pop_oldest(), Some(3));
        assert_eq!(log.pop_oldest(), Some(1));
        assert_eq!(log.pop_oldest(), Some(2));
        assert_eq!(log.pop_oldest(), None);
    }

    #[test]
    fn test_full_log_overwrites_oldest() {
        let log = LatenessLog::<3>::new();
        for sample in 10..15 {
            log.push(sample);
        }
        assert_eq!(log.len(), 3);
        assert_eq!(log.capacity(), 3);
        assert_eq!(log.pop_oldest(), Some(12));
        assert_eq!(log.pop_oldest(), Some(13));
        assert_eq!(log.pop_oldest(), Some(14));
    }

    #[test]
    fn test_clear() {
        let log = LatenessLog::<2>::new();
        log.push(1);
        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.worst(), None);
    }

    #[test]
    fn test_no_samples_is_free() {
        assert_eq!(core::mem::size_of::<NoSamples>(), 0);
        NoSamples.push(100);
    }
}

// End of File
