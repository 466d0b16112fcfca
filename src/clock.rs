use std::thread;
use std::time::{Duration, Instant};

/// Monotonic time source driving the tick loop.
pub trait Clock {
    /// Time elapsed since the clock was created.
    fn now(&self) -> Duration;

    /// Blocks (or pretends to) until the next tick boundary.
    fn sleep_until_next_tick(&mut self, interval: Duration);
}

/// Wall-clock implementation backed by [`Instant`].
#[derive(Debug)]
pub struct SystemClock {
    start: Instant,
    next_tick: Instant,
}

impl SystemClock {
    #[must_use]
    pub fn new() -> Self {
        let start = Instant::now();
        Self {
            start,
            next_tick: start,
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.start.elapsed()
    }

    fn sleep_until_next_tick(&mut self, interval: Duration) {
        self.next_tick += interval;

        let now = Instant::now();
        if self.next_tick > now {
            thread::sleep(self.next_tick - now);
        } else {
            // Fell behind; restart the cadence instead of bursting ticks.
            self.next_tick = now;
        }
    }
}

/// Clock that only moves when told to. Used to drive sessions synchronously.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Duration,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now
    }

    fn sleep_until_next_tick(&mut self, interval: Duration) {
        self.advance(interval);
    }
}
