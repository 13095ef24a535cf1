use instant::Instant;
use std::time::Duration;

/// One clock sample, in seconds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTime {
    pub delta: f32,
    pub elapsed: f32,
}

/// Monotonic elapsed-time accumulator sampled once per frame.
///
/// Samples that go backwards (clock skew, out-of-order timestamps) are
/// treated as zero-length frames so `elapsed` never decreases.
#[derive(Clone, Debug)]
pub struct Clock {
    start: Instant,
    last: Instant,
    elapsed: Duration,
}

impl Clock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> Self {
        Self {
            start,
            last: start,
            elapsed: Duration::ZERO,
        }
    }

    pub fn sample(&mut self) -> FrameTime {
        self.sample_at(Instant::now())
    }

    pub fn sample_at(&mut self, now: Instant) -> FrameTime {
        let mut delta = Duration::ZERO;
        if now > self.last {
            delta = now - self.last;
            self.last = now;
        }
        self.elapsed += delta;
        FrameTime {
            delta: delta.as_secs_f32(),
            elapsed: self.elapsed.as_secs_f32(),
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    pub fn start(&self) -> Instant {
        self.start
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
    fn elapsed_accumulates_and_never_decreases() {
        let t0 = Instant::now();
        let mut clock = Clock::starting_at(t0);
        let a = clock.sample_at(t0 + Duration::from_millis(16));
        assert!((a.delta - 0.016).abs() < 1e-6);
        let b = clock.sample_at(t0 + Duration::from_millis(10));
        assert_eq!(b.delta, 0.0);
        assert_eq!(b.elapsed, a.elapsed);
        let c = clock.sample_at(t0 + Duration::from_millis(50));
        assert!((c.elapsed - 0.050).abs() < 1e-6);
    }
}
