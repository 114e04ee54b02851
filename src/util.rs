#[cfg(test)]
use std::cell::Cell;
use std::time::{Duration, Instant};

/// Source of monotonic time for the frame-driven timers.
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to.
#[cfg(test)]
#[derive(Debug)]
pub struct ManualClock {
    now: Cell<Instant>,
}

#[cfg(test)]
impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Cell::new(Instant::now()),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

#[cfg(test)]
impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// Time elapsed between `since` and `now`, zero if the clock went backwards.
#[must_use]
pub fn elapsed_between(since: Instant, now: Instant) -> Duration {
    now.saturating_duration_since(since)
}

/// Fill ratio for a percentage-based progress bar.
#[must_use]
pub fn progress_fraction(percent: u8) -> f32 {
    f32::from(percent.min(100)) / 100.0
}

/// Fill ratio for a capacity bar; empty when the capacity is unknown.
#[must_use]
pub fn occupancy_fraction(current: u32, capacity: u32) -> f32 {
    if capacity == 0 {
        return 0.0;
    }
    (current as f32 / capacity as f32).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_moves_only_on_advance() {
        let clock = ManualClock::new();
        let start = clock.now();
        assert_eq!(clock.now(), start);
        clock.advance(Duration::from_millis(250));
        assert_eq!(elapsed_between(start, clock.now()), Duration::from_millis(250));
        assert_eq!(elapsed_between(clock.now(), start), Duration::ZERO);
    }

    #[test]
    fn calculates_fill_ratios() {
        assert_eq!(progress_fraction(0), 0.0);
        assert_eq!(progress_fraction(50), 0.5);
        assert_eq!(progress_fraction(150), 1.0);
        assert_eq!(occupancy_fraction(25, 100), 0.25);
        assert_eq!(occupancy_fraction(120, 100), 1.0);
        assert_eq!(occupancy_fraction(5, 0), 0.0);
    }
}
