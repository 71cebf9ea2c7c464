use std::time::Instant;

/// Monotonic millisecond timestamps for cooldowns, effects and blackouts.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self { start: Instant::now() }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_clock_starts_near_zero_and_never_goes_back() {
        let clock = MonotonicClock::default();
        let first = clock.now_ms();
        assert!(first < 1_000);
        assert!(clock.now_ms() >= first);
    }
}
