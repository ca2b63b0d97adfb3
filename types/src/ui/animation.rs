use std::time::Duration;

/// Converts elapsed wall time into whole animation frames.
///
/// Leftover time below one frame interval is carried into the next call, so the
/// frame rate is independent of the render cadence.
#[derive(Debug, Clone)]
pub struct FrameClock {
    interval: Duration,
    carry: Duration,
}

impl FrameClock {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            carry: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn reset(&mut self) {
        self.carry = Duration::ZERO;
    }

    /// Frames due after `delta` of wall time at playback `speed`.
    ///
    /// A zero interval yields exactly one frame per non-zero advance.
    pub fn advance(&mut self, delta: Duration, speed: f64) -> usize {
        if delta.is_zero() || !(speed.is_finite() && speed > 0.0) {
            return 0;
        }
        if self.interval.is_zero() {
            return 1;
        }

        let scaled = Duration::from_nanos((delta.as_nanos() as f64 * speed).round() as u64);
        self.carry = self.carry.saturating_add(scaled);
        let frames = self.carry.as_nanos() / self.interval.as_nanos();
        if frames == 0 {
            return 0;
        }
        let consumed = self.interval.as_nanos() * frames;
        let remaining = self.carry.as_nanos() - consumed;
        self.carry = Duration::from_nanos(u64::try_from(remaining).unwrap_or(u64::MAX));
        usize::try_from(frames).unwrap_or(usize::MAX)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::FrameClock;

    #[test]
    fn advance_carries_partial_frames() {
        let mut clock = FrameClock::new(Duration::from_millis(20));
        assert_eq!(clock.advance(Duration::from_millis(15), 1.0), 0);
        assert_eq!(clock.advance(Duration::from_millis(15), 1.0), 1);
        assert_eq!(clock.advance(Duration::from_millis(10), 1.0), 1);
    }

    #[test]
    fn speed_scales_elapsed_time() {
        let mut clock = FrameClock::new(Duration::from_millis(10));
        assert_eq!(clock.advance(Duration::from_millis(10), 4.0), 4);
        assert_eq!(clock.advance(Duration::from_millis(10), 0.5), 0);
        assert_eq!(clock.advance(Duration::from_millis(10), 0.5), 1);
    }

    #[test]
    fn reset_drops_carry() {
        let mut clock = FrameClock::new(Duration::from_millis(20));
        clock.advance(Duration::from_millis(19), 1.0);
        clock.reset();
        assert_eq!(clock.advance(Duration::from_millis(1), 1.0), 0);
    }

    #[test]
    fn zero_interval_emits_one_frame_per_advance() {
        let mut clock = FrameClock::new(Duration::ZERO);
        assert_eq!(clock.advance(Duration::from_millis(1), 1.0), 1);
        assert_eq!(clock.advance(Duration::ZERO, 1.0), 0);
    }
}
