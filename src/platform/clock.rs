// Timing hooks
//
// The engine only uses ticks to compute deltas, so the epoch is simply the
// moment the clock was created.

use std::thread;
use std::time::{Duration, Instant};

/// Monotonic millisecond clock
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    epoch: Instant,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }

    /// Milliseconds since the clock was created
    ///
    /// Wraps after about 49 days, like the engine's own 32-bit tick count.
    pub fn ticks_ms(&self) -> u32 {
        self.epoch.elapsed().as_millis() as u32
    }

    /// Block the calling thread
    pub fn sleep_ms(&self, ms: u32) {
        thread::sleep(Duration::from_millis(ms as u64));
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticks_are_monotonic() {
        let clock = Clock::new();
        let mut last = clock.ticks_ms();
        for _ in 0..100 {
            let now = clock.ticks_ms();
            assert!(now >= last);
            last = now;
        }
    }

    #[test]
    fn test_sleep_advances_ticks() {
        let clock = Clock::new();
        let before = clock.ticks_ms();
        clock.sleep_ms(20);
        assert!(clock.ticks_ms() - before >= 20);
    }
}
