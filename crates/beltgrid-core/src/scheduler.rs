//! Wall-clock tick scheduler.
//!
//! The simulation is paced by real time, not by frames: each call to
//! [`TickScheduler::poll`] reports whether a tick is due. At most one tick is
//! reported per call. If several intervals have elapsed (a stalled frame, a
//! debugger pause) the missed ticks are skipped, not replayed.
//!
//! Time is always passed in by the caller, so tests drive the scheduler with
//! a manual clock instead of sleeping.

use std::time::Instant;

/// Default tick interval, in seconds.
pub const DEFAULT_TICK_INTERVAL: f64 = 0.5;

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// A source of monotonically non-decreasing time in seconds.
pub trait Clock {
    fn now_secs(&self) -> f64;
}

/// Seconds elapsed since this clock was created.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_secs(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

// ---------------------------------------------------------------------------
// Scheduler
// ---------------------------------------------------------------------------

/// Decides when a simulation step should run.
#[derive(Debug, Clone, PartialEq)]
pub struct TickScheduler {
    interval_secs: f64,
    last_tick_secs: f64,
}

impl TickScheduler {
    /// A scheduler whose first tick becomes due `interval_secs` after `start_secs`.
    pub fn new(interval_secs: f64, start_secs: f64) -> Self {
        Self {
            interval_secs,
            last_tick_secs: start_secs,
        }
    }

    /// Returns `true` when at least one interval has passed since the last
    /// tick, and records `now_secs` as the new last tick.
    pub fn poll(&mut self, now_secs: f64) -> bool {
        if now_secs - self.last_tick_secs >= self.interval_secs {
            self.last_tick_secs = now_secs;
            true
        } else {
            false
        }
    }

    /// Same as [`poll`](Self::poll), reading time from `clock`.
    pub fn poll_clock(&mut self, clock: &impl Clock) -> bool {
        self.poll(clock.now_secs())
    }

    /// Restart the interval from `now_secs`.
    pub fn reset(&mut self, now_secs: f64) {
        self.last_tick_secs = now_secs;
    }

    pub fn interval(&self) -> f64 {
        self.interval_secs
    }

    pub fn last_tick(&self) -> f64 {
        self.last_tick_secs
    }
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_INTERVAL, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_due_before_interval() {
        let mut s = TickScheduler::new(0.5, 0.0);
        assert!(!s.poll(0.0));
        assert!(!s.poll(0.25));
        assert!(!s.poll(0.499));
        assert_eq!(s.last_tick(), 0.0);
    }

    #[test]
    fn due_exactly_at_interval() {
        let mut s = TickScheduler::new(0.5, 0.0);
        assert!(s.poll(0.5));
        assert_eq!(s.last_tick(), 0.5);
        assert!(!s.poll(0.75));
        assert!(s.poll(1.0));
    }

    #[test]
    fn no_catch_up_after_stall() {
        let mut s = TickScheduler::new(0.5, 0.0);
        // Ten intervals elapse at once: only one tick fires.
        assert!(s.poll(5.0));
        assert!(!s.poll(5.0));
        assert!(!s.poll(5.4));
        assert!(s.poll(5.5));
    }

    #[test]
    fn interval_measured_from_actual_tick_time() {
        let mut s = TickScheduler::new(0.5, 0.0);
        assert!(s.poll(0.75));
        // Next tick is due at 1.25, not 1.0.
        assert!(!s.poll(1.0));
        assert!(s.poll(1.25));
    }

    #[test]
    fn reset_restarts_interval() {
        let mut s = TickScheduler::new(0.5, 0.0);
        s.reset(3.0);
        assert!(!s.poll(3.4));
        assert!(s.poll(3.5));
    }

    #[test]
    fn backwards_time_never_ticks() {
        let mut s = TickScheduler::new(0.5, 10.0);
        assert!(!s.poll(2.0));
    }

    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now_secs();
        let b = clock.now_secs();
        assert!(b >= a);
        assert!(a >= 0.0);
    }
}
