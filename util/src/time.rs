//! General time utility functions
//!
//! Also provides the resettable stop watch used for debouncing, driven by an
//! abstract [`Clock`] so that it can run either on wall time or on a
//! simulated time base.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Number of nanoseconds in a second
pub const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// Convert a duration into a number of seconds, or `None` if overflow
pub fn duration_to_seconds(duration: chrono::Duration) -> Option<f64> {
    duration.num_nanoseconds()
        .map(|ns| ns as f64 / NANOS_PER_SECOND as f64)
}

// ---------------------------------------------------------------------------
// CLOCKS
// ---------------------------------------------------------------------------

/// A monotonic source of time.
pub trait Clock {
    /// Seconds since an arbitrary, fixed origin. Must never decrease.
    fn now_s(&self) -> f64;
}

/// Wall clock, measured from the moment the clock was created.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct SimClock {
    time_s: Rc<Cell<f64>>
}

impl SystemClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_s(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

impl SimClock {
    /// Move the clock forward by `dt_s` seconds. Negative steps are ignored.
    pub fn advance(&self, dt_s: f64) {
        if dt_s > 0.0 {
            self.time_s.set(self.time_s.get() + dt_s);
        }
    }
}

impl Clock for SimClock {
    fn now_s(&self) -> f64 {
        self.time_s.get()
    }
}

// ---------------------------------------------------------------------------
// STOP WATCH
// ---------------------------------------------------------------------------

/// Accumulating stop watch.
///
/// Time accrues only while running. `start` on a running watch does nothing,
/// so it may be called every cycle while waiting on a condition.
#[derive(Debug, Clone)]
pub struct StopWatch<C: Clock> {
    clock: C,

    /// Time accumulated over previous runs
    accumulated_s: f64,

    /// Clock time the current run started at, `None` if stopped
    started_at_s: Option<f64>
}

impl<C: Clock> StopWatch<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            accumulated_s: 0.0,
            started_at_s: None
        }
    }

    pub fn start(&mut self) {
        if self.started_at_s.is_none() {
            self.started_at_s = Some(self.clock.now_s());
        }
    }

    pub fn stop(&mut self) {
        self.accumulated_s = self.elapsed_s();
        self.started_at_s = None;
    }

    /// Zero the accumulated time. A running watch keeps running from now.
    pub fn reset(&mut self) {
        self.accumulated_s = 0.0;
        if self.started_at_s.is_some() {
            self.started_at_s = Some(self.clock.now_s());
        }
    }

    pub fn elapsed_s(&self) -> f64 {
        match self.started_at_s {
            Some(t0) => self.accumulated_s + (self.clock.now_s() - t0),
            None => self.accumulated_s
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_duration_to_seconds() {
        assert_eq!(
            duration_to_seconds(chrono::Duration::milliseconds(1500)), 
            Some(1.5)
        );
    }

    #[test]
    fn test_stop_watch() {
        let clock = SimClock::default();
        let mut sw = StopWatch::new(clock.clone());

        // Stopped watches don't accumulate
        clock.advance(1.0);
        assert_eq!(sw.elapsed_s(), 0.0);

        sw.start();
        clock.advance(0.25);
        // Restarting a running watch doesn't move its origin
        sw.start();
        clock.advance(0.25);
        assert!((sw.elapsed_s() - 0.5).abs() < 1e-12);

        sw.stop();
        clock.advance(10.0);
        assert!((sw.elapsed_s() - 0.5).abs() < 1e-12);

        sw.reset();
        assert_eq!(sw.elapsed_s(), 0.0);
    }
}
