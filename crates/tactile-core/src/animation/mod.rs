#![forbid(unsafe_code)]

//! Frame-driven animation primitives.
//!
//! Nothing here blocks or sleeps. An external render loop owns the frame
//! clock and calls [`Animation::tick`] with the elapsed time once per frame;
//! gesture components read the new values and push them to their visuals.
//! Completion is observed by polling [`Animation::is_complete`] after a tick.

use std::time::Duration;

pub mod spring;

pub use spring::Spring;

/// A value that advances with frame time.
pub trait Animation {
    /// Advance by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has finished.
    fn is_complete(&self) -> bool;

    /// Normalized progress in `[0.0, 1.0]`.
    fn value(&self) -> f32;

    /// Return to the initial state.
    fn reset(&mut self);
}

/// A timer that completes after a fixed duration.
///
/// Used to hold back a deferred action until a release animation has had
/// time to read naturally.
#[derive(Debug, Clone)]
pub struct Delay {
    duration: Duration,
    elapsed: Duration,
}

impl Delay {
    /// Create a delay. A zero duration is complete immediately.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            elapsed: Duration::ZERO,
        }
    }

    /// Time left before completion.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.duration.saturating_sub(self.elapsed)
    }
}

impl Animation for Delay {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_completes_after_duration() {
        let mut d = Delay::new(Duration::from_millis(100));
        d.tick(Duration::from_millis(60));
        assert!(!d.is_complete());
        assert_eq!(d.remaining(), Duration::from_millis(40));
        d.tick(Duration::from_millis(60));
        assert!(d.is_complete());
        assert_eq!(d.value(), 1.0);
    }

    #[test]
    fn zero_delay_is_immediately_complete() {
        let d = Delay::new(Duration::ZERO);
        assert!(d.is_complete());
        assert_eq!(d.value(), 1.0);
    }

    #[test]
    fn delay_reset() {
        let mut d = Delay::new(Duration::from_millis(10));
        d.tick(Duration::from_millis(20));
        d.reset();
        assert!(!d.is_complete());
    }
}
