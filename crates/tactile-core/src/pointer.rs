#![forbid(unsafe_code)]

//! Normalized pointer samples.
//!
//! A [`PointerSample`] is one observed input event. Samples are ephemeral:
//! gesture components read them synchronously and never retain them past
//! the gesture they belong to.

use web_time::Instant;

use crate::geometry::Point;

/// Phase of a pointer sample within one Down…Up/Cancel cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerPhase {
    /// Pointer went down; starts a gesture.
    Down,
    /// Pointer moved while down.
    Move,
    /// Pointer lifted; ends the gesture normally.
    Up,
    /// Gesture was reassigned elsewhere by the host; ends it without effect.
    Cancel,
}

impl PointerPhase {
    /// Whether this phase ends the gesture.
    #[inline]
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Up | Self::Cancel)
    }
}

/// A single pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    /// Position in viewport pixels.
    pub position: Point,
    /// Monotonic time of the event.
    pub timestamp: Instant,
    /// Phase of the event.
    pub phase: PointerPhase,
}

impl PointerSample {
    /// Create a sample.
    #[must_use]
    pub fn new(phase: PointerPhase, x: f32, y: f32, timestamp: Instant) -> Self {
        Self {
            position: Point::new(x, y),
            timestamp,
            phase,
        }
    }

    /// A `Down` sample.
    #[must_use]
    pub fn down(x: f32, y: f32, timestamp: Instant) -> Self {
        Self::new(PointerPhase::Down, x, y, timestamp)
    }

    /// A `Move` sample.
    #[must_use]
    pub fn moved(x: f32, y: f32, timestamp: Instant) -> Self {
        Self::new(PointerPhase::Move, x, y, timestamp)
    }

    /// An `Up` sample.
    #[must_use]
    pub fn up(x: f32, y: f32, timestamp: Instant) -> Self {
        Self::new(PointerPhase::Up, x, y, timestamp)
    }

    /// A `Cancel` sample.
    #[must_use]
    pub fn cancel(x: f32, y: f32, timestamp: Instant) -> Self {
        Self::new(PointerPhase::Cancel, x, y, timestamp)
    }

    /// Copy of this sample with a different phase.
    ///
    /// Used when a host must synthesize a `Cancel` for content whose gesture
    /// was just intercepted.
    #[must_use]
    pub fn with_phase(mut self, phase: PointerPhase) -> Self {
        self.phase = phase;
        self
    }

    /// Horizontal position.
    #[inline]
    #[must_use]
    pub fn x(&self) -> f32 {
        self.position.x
    }

    /// Vertical position.
    #[inline]
    #[must_use]
    pub fn y(&self) -> f32 {
        self.position.y
    }
}
