//! Wall-clock render gate

use crate::consts::FRAME_INTERVAL_MS;

/// Accumulates frame-callback time and fires once an interval has passed.
///
/// Unlike a fixed-step accumulator the remainder is dropped when it fires:
/// at most one step per callback, and the next interval starts from zero.
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    interval_ms: f64,
    elapsed_ms: f64,
    last_timestamp_ms: f64,
}

impl Default for IntervalTimer {
    fn default() -> Self {
        Self::new(FRAME_INTERVAL_MS)
    }
}

impl IntervalTimer {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            elapsed_ms: 0.0,
            last_timestamp_ms: 0.0,
        }
    }

    /// Feed a callback timestamp (ms since page load). Returns true when due.
    pub fn advance(&mut self, timestamp_ms: f64) -> bool {
        let delta = timestamp_ms - self.last_timestamp_ms;
        self.last_timestamp_ms = timestamp_ms;
        self.elapsed_ms += delta;
        if self.elapsed_ms >= self.interval_ms {
            self.elapsed_ms = 0.0;
            true
        } else {
            false
        }
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Time accumulated toward the next firing
    pub fn pending_ms(&self) -> f64 {
        self.elapsed_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_on_first_real_timestamp() {
        let mut timer = IntervalTimer::default();
        assert!(timer.advance(500.0));
        assert_eq!(timer.pending_ms(), 0.0);
    }

    #[test]
    fn accumulates_partial_frames() {
        let mut timer = IntervalTimer::default();
        assert!(timer.advance(100.0));
        assert!(!timer.advance(108.0));
        assert!(timer.advance(117.0));
    }

    #[test]
    fn drops_remainder_when_firing() {
        let mut timer = IntervalTimer::new(10.0);
        assert!(timer.advance(25.0));
        assert!(!timer.advance(30.0));
        assert_eq!(timer.pending_ms(), 5.0);
    }

    #[test]
    fn fast_callbacks_render_every_other_frame() {
        // 100 Hz host against a 60 Hz gate
        let mut timer = IntervalTimer::default();
        assert!(!timer.advance(0.0));
        let fired = (1..=100).filter(|i| timer.advance(*i as f64 * 10.0)).count();
        assert_eq!(fired, 50);
    }
}
