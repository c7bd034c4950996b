//! Interval timers driven by host-supplied timestamps
//!
//! The host passes the current time (milliseconds, e.g. from
//! `performance.now()`) into every frame. Timers compare against that value
//! instead of reading a clock, so tests advance time explicitly.

/// A repeating timer
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interval {
    period_ms: f64,
    next_due: f64,
}

impl Interval {
    /// A timer first due one period after `start`
    pub fn starting_at(start: f64, period_ms: f64) -> Self {
        Self {
            period_ms,
            next_due: start + period_ms,
        }
    }

    pub fn period_ms(&self) -> f64 {
        self.period_ms
    }

    pub fn next_due(&self) -> f64 {
        self.next_due
    }

    /// Fire at most once; missed periods are skipped rather than replayed
    ///
    /// A non-finite `now` never fires and leaves the timer untouched.
    pub fn poll(&mut self, now: f64) -> bool {
        if !now.is_finite() || now < self.next_due {
            return false;
        }
        let missed = ((now - self.next_due) / self.period_ms).floor() + 1.0;
        self.next_due += missed * self.period_ms;
        // Rounding on very large jumps can land exactly on `now`
        if self.next_due <= now {
            self.next_due += self.period_ms;
        }
        true
    }
}

/// Timers that fired during one poll
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Due {
    pub spawn: bool,
    pub density_reset: bool,
}

/// The stream's two periodic jobs
#[derive(Clone, Debug, PartialEq)]
pub struct Scheduler {
    spawn: Interval,
    density_reset: Interval,
}

impl Scheduler {
    pub fn new(start: f64, spawn_interval_ms: f64, density_reset_interval_ms: f64) -> Self {
        Self {
            spawn: Interval::starting_at(start, spawn_interval_ms),
            density_reset: Interval::starting_at(start, density_reset_interval_ms),
        }
    }

    pub fn poll(&mut self, now: f64) -> Due {
        Due {
            spawn: self.spawn.poll(now),
            density_reset: self.density_reset.poll(now),
        }
    }

    pub fn next_spawn(&self) -> f64 {
        self.spawn.next_due()
    }

    pub fn next_density_reset(&self) -> f64 {
        self.density_reset.next_due()
    }
}
