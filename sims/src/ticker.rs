// ticker.rs - Fixed-interval step scheduling

use std::time::{Duration, Instant};

/// Decides when the next simulation step is due.
///
/// The caller polls [`Ticker::due`] once per frame; at most one step fires per
/// poll, and none fire while paused.
#[derive(Clone, Debug)]
pub struct Ticker {
    interval: Duration,
    last_step: Instant,
    running: bool,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_step: Instant::now(),
            running: false,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Starts running; the first step fires one interval after `now`.
    pub fn start(&mut self, now: Instant) {
        self.running = true;
        self.last_step = now;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn toggle(&mut self, now: Instant) {
        if self.running {
            self.pause();
        } else {
            self.start(now);
        }
    }

    /// True when running and a full interval has elapsed since the last step.
    pub fn due(&mut self, now: Instant) -> bool {
        if !self.running || now.saturating_duration_since(self.last_step) < self.interval {
            return false;
        }
        self.last_step = now;
        true
    }

    /// Time left before the next step, `None` when paused.
    pub fn until_next(&self, now: Instant) -> Option<Duration> {
        self.running.then(|| {
            self.interval
                .saturating_sub(now.saturating_duration_since(self.last_step))
        })
    }
}
