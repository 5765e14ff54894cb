//! Time sources for time-stamped map data.
//!
//! Timestamps are plain `f64` seconds. [`SystemClock`] counts from the UNIX
//! epoch; [`ManualClock`] only moves when told to, which keeps simulations
//! and tests deterministic.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

/// A source of the current time in seconds.
pub trait Clock {
    /// Current time in seconds. Never negative.
    fn now(&self) -> f64;
}

/// Wall-clock time in seconds since the UNIX epoch.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0.0, |d| d.as_secs_f64())
    }
}

/// A clock advanced explicitly by its owner.
///
/// Clones share the same underlying time, so a simulation can hand one
/// clone to a hazard map and keep another to drive the ticks.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    /// Create a clock reading `start` seconds.
    pub fn new(start: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(start.max(0.0))),
        }
    }

    /// Move the clock forward by `seconds` (negative values are ignored).
    pub fn advance(&self, seconds: f64) {
        if seconds > 0.0 {
            self.now.set(self.now.get() + seconds);
        }
    }

    /// Jump to an absolute time.
    pub fn set(&self, seconds: f64) {
        self.now.set(seconds.max(0.0));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> f64 {
        (**self).now()
    }
}
