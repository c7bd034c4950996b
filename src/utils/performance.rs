//! Frame timing
//!
//! Motion is per frame, so the host's refresh rate sets the drift speed.
//! `FrameMonitor` keeps a rolling window of frame intervals to report it.

use std::collections::VecDeque;

/// Rolling record of intervals between frames
pub struct FrameMonitor {
    intervals: VecDeque<f64>,
    capacity: usize,
    last_frame: Option<f64>,
}

impl FrameMonitor {
    pub fn new(capacity: usize) -> Self {
        Self {
            intervals: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
            last_frame: None,
        }
    }

    /// Record a frame at `now` (milliseconds)
    pub fn record_frame(&mut self, now: f64) {
        if let Some(last) = self.last_frame {
            let interval = now - last;
            if interval > 0.0 {
                if self.intervals.len() == self.capacity {
                    self.intervals.pop_front();
                }
                self.intervals.push_back(interval);
            }
        }
        self.last_frame = Some(now);
    }

    pub fn average_interval_ms(&self) -> Option<f64> {
        if self.intervals.is_empty() {
            None
        } else {
            Some(self.intervals.iter().sum::<f64>() / self.intervals.len() as f64)
        }
    }

    pub fn frames_per_second(&self) -> Option<f64> {
        self.average_interval_ms().map(|ms| 1000.0 / ms)
    }
}

impl Default for FrameMonitor {
    fn default() -> Self {
        Self::new(120)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_average_before_two_frames() {
        let mut monitor = FrameMonitor::default();
        assert_eq!(monitor.frames_per_second(), None);
        monitor.record_frame(0.0);
        assert_eq!(monitor.frames_per_second(), None);
    }

    #[test]
    fn test_rolling_window() {
        let mut monitor = FrameMonitor::new(2);
        for now in [0.0, 10.0, 30.0, 50.0] {
            monitor.record_frame(now);
        }
        assert_eq!(monitor.average_interval_ms(), Some(20.0));
        assert_eq!(monitor.frames_per_second(), Some(50.0));
    }
}
