use std::time::Duration;

/// Fixed-interval countdown driven by elapsed wall time rather than by the
/// number of render ticks, so changing the tick rate leaves its cadence alone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntervalTimer {
    interval: Duration,
    elapsed: Duration,
}

impl IntervalTimer {
    pub fn new(interval: Duration) -> Self {
        IntervalTimer { interval, elapsed: Duration::ZERO }
    }

    /// Feed `dt` into the timer and return how many intervals completed.
    /// A zero interval is treated as disabled.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        if self.interval.is_zero() {
            return 0;
        }
        self.elapsed += dt;
        let mut fired = 0;
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            fired += 1;
        }
        fired
    }
}
