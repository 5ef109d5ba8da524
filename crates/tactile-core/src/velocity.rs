#![forbid(unsafe_code)]

//! Pointer velocity estimation for fling detection.
//!
//! [`VelocityTracker`] keeps a short sliding window of recent positions and
//! estimates velocity from the oldest and newest samples in that window.
//!
//! # Invariants
//!
//! 1. Samples older than `window` relative to the newest sample are evicted.
//! 2. At most `capacity` samples are retained.
//! 3. Fewer than two samples, or a zero time span, yield zero velocity.
//! 4. Samples with a timestamp earlier than the newest retained sample are
//!    ignored (monotonic input only).

use std::collections::VecDeque;
use std::time::Duration;

use web_time::Instant;

use crate::geometry::Point;

/// Default sliding window length.
pub const DEFAULT_WINDOW: Duration = Duration::from_millis(100);

/// Default maximum number of retained samples.
pub const DEFAULT_CAPACITY: usize = 20;

/// Estimates pointer velocity in pixels per second.
#[derive(Debug, Clone)]
pub struct VelocityTracker {
    samples: VecDeque<(Instant, Point)>,
    window: Duration,
    capacity: usize,
}

impl Default for VelocityTracker {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW, DEFAULT_CAPACITY)
    }
}

impl VelocityTracker {
    /// Create a tracker with a custom window and capacity (minimum 2).
    #[must_use]
    pub fn new(window: Duration, capacity: usize) -> Self {
        let capacity = capacity.max(2);
        Self {
            samples: VecDeque::with_capacity(capacity),
            window,
            capacity,
        }
    }

    /// Record a position.
    pub fn push(&mut self, at: Instant, position: Point) {
        if let Some(&(last, _)) = self.samples.back()
            && at < last
        {
            return;
        }
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back((at, position));
        while let Some(&(oldest, _)) = self.samples.front() {
            if at.duration_since(oldest) > self.window {
                self.samples.pop_front();
            } else {
                break;
            }
        }
    }

    /// Forget all samples.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Number of retained samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether no samples are retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Current velocity `(vx, vy)` in pixels per second.
    #[must_use]
    pub fn velocity(&self) -> (f32, f32) {
        let (Some(&(t0, p0)), Some(&(t1, p1))) = (self.samples.front(), self.samples.back())
        else {
            return (0.0, 0.0);
        };
        let secs = t1.duration_since(t0).as_secs_f32();
        if self.samples.len() < 2 || secs <= 0.0 {
            return (0.0, 0.0);
        }
        ((p1.x - p0.x) / secs, (p1.y - p0.y) / secs)
    }
}
