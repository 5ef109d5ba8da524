#![forbid(unsafe_code)]

//! Per-gesture session state.
//!
//! One [`GestureSession`] lives from Down to Up/Cancel. It records what the
//! container reported at Down and how ownership was resolved.
//!
//! # Invariants
//!
//! 1. Ownership moves `Undecided → Content` or `Undecided → Container`, and
//!    never changes again.
//! 2. The nested-scroll sub-mode exists only under container ownership.
//! 3. A container-owned session holds the orientation lock until it is
//!    dropped.

use tactile_core::geometry::Point;
use tactile_core::pointer::PointerSample;
use tactile_core::velocity::VelocityTracker;

use crate::container::ContainerSnapshot;
use crate::orientation::OrientationLock;

/// Who consumes movement in this session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// Slop not exceeded yet.
    Undecided,
    /// The content scrolls natively.
    Content,
    /// The container drags.
    Container,
}

/// Nested-scroll sub-mode: the container is at its limit and the content
/// scrolls in the same direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct NestedScroll {
    pub(crate) start_y: f32,
    pub(crate) upward: bool,
}

impl NestedScroll {
    /// Whether `y` continues in the direction that entered the sub-mode.
    pub(crate) fn continues(&self, y: f32) -> bool {
        if self.upward {
            y <= self.start_y
        } else {
            y >= self.start_y
        }
    }
}

#[derive(Debug)]
pub(crate) struct ContainerDrag {
    pub(crate) intercept_start_y: f32,
    pub(crate) scrolling: Option<NestedScroll>,
    // Released on drop.
    pub(crate) _lock: OrientationLock,
}

#[derive(Debug)]
pub(crate) enum Resolution {
    Undecided,
    Content,
    Container(ContainerDrag),
}

/// State of one Down…Up/Cancel cycle.
#[derive(Debug)]
pub struct GestureSession {
    pub(crate) start: Point,
    pub(crate) snapshot: ContainerSnapshot,
    pub(crate) resolution: Resolution,
    pub(crate) velocity: VelocityTracker,
    pub(crate) last_y: f32,
}

impl GestureSession {
    pub(crate) fn begin(sample: &PointerSample, snapshot: ContainerSnapshot) -> Self {
        let mut velocity = VelocityTracker::default();
        velocity.push(sample.timestamp, sample.position);
        Self {
            start: sample.position,
            snapshot,
            resolution: Resolution::Undecided,
            velocity,
            last_y: sample.y(),
        }
    }

    pub(crate) fn record(&mut self, sample: &PointerSample) {
        self.velocity.push(sample.timestamp, sample.position);
    }

    /// Where the Down landed.
    #[must_use]
    pub fn start(&self) -> Point {
        self.start
    }

    /// Container state captured at Down.
    #[must_use]
    pub fn snapshot(&self) -> &ContainerSnapshot {
        &self.snapshot
    }

    /// The container was animating at Down; every event is swallowed.
    #[must_use]
    pub fn container_is_animating(&self) -> bool {
        self.snapshot.is_animating
    }

    /// The gesture may still become a container drag.
    #[must_use]
    pub fn content_can_accept_drag(&self) -> bool {
        self.snapshot.should_intercept()
    }

    /// The container passes movement straight through to the content.
    #[must_use]
    pub fn block_direct_dispatch(&self) -> bool {
        self.snapshot.should_ignore_one_drag
    }

    /// Ownership resolved so far.
    #[must_use]
    pub fn ownership(&self) -> Ownership {
        match self.resolution {
            Resolution::Undecided => Ownership::Undecided,
            Resolution::Content => Ownership::Content,
            Resolution::Container(_) => Ownership::Container,
        }
    }

    /// Control was handed to the content for the rest of the session.
    #[must_use]
    pub fn delegated_to_content(&self) -> bool {
        matches!(self.resolution, Resolution::Content)
    }

    /// The nested-scroll sub-mode is active.
    #[must_use]
    pub fn is_scrolling(&self) -> bool {
        matches!(
            self.resolution,
            Resolution::Container(ContainerDrag {
                scrolling: Some(_),
                ..
            })
        )
    }

    /// Pointer Y where the nested-scroll sub-mode began.
    #[must_use]
    pub fn scroll_start_y(&self) -> Option<f32> {
        match &self.resolution {
            Resolution::Container(drag) => drag.scrolling.map(|s| s.start_y),
            _ => None,
        }
    }
}
