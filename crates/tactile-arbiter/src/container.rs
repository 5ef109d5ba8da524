#![forbid(unsafe_code)]

//! The draggable container contract.

use tactile_core::geometry::Point;
use tactile_core::pointer::PointerSample;

/// A panel that embeds a vertically scrollable list and can itself be
/// dragged.
///
/// The arbiter queries state at Down and drives the drag through the
/// remaining methods. Content is opaque: the arbiter only forwards raw
/// samples to it.
pub trait DraggableContainer {
    /// The measured viewport size changed.
    fn viewport_changed(&mut self, width: u32, height: u32);

    /// Whether the container may be dragged at all right now.
    fn can_move_content(&self) -> bool;

    /// Whether `at` lies over the scrollable content.
    fn is_inside_content(&self, at: Point) -> bool;

    /// Whether the container is mid-transition.
    fn is_animating(&self) -> bool;

    /// One-shot request to let the content drive the next container drag.
    fn should_ignore_one_drag(&self) -> bool;

    /// Scroll offset of the content; zero at its origin.
    fn content_scroll_offset(&self) -> i32;

    /// Move the container by `delta` pixels from where the drag was
    /// intercepted. Returns true when the container absorbed the movement as
    /// a scroll of its content (e.g. it is fully expanded).
    fn move_by(&mut self, delta: f32) -> bool;

    /// Scroll the content back to its origin.
    fn force_scroll_content_to_top(&mut self);

    /// Deliver a raw sample to the content's own touch pipeline.
    fn dispatch_to_content(&mut self, sample: &PointerSample);

    /// A container drag began.
    fn on_drag_started(&mut self);

    /// A container drag ended.
    fn on_drag_finished(&mut self);

    /// A fling ended the drag. Returns whether the container acted on it.
    fn on_fling_handled(&mut self, is_upward: bool) -> bool;
}

/// Container state captured once at Down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerSnapshot {
    /// The container may be dragged.
    pub can_drag: bool,
    /// The container is mid-transition.
    pub is_animating: bool,
    /// Content scroll offset at Down.
    pub content_scroll_offset: i32,
    /// The Down landed over the content.
    pub pointer_is_over_content: bool,
    /// One-shot block-touch request.
    pub should_ignore_one_drag: bool,
}

impl ContainerSnapshot {
    /// Query `container` for a Down at `at`.
    pub fn capture<C: DraggableContainer + ?Sized>(container: &C, at: Point) -> Self {
        Self {
            can_drag: container.can_move_content(),
            is_animating: container.is_animating(),
            content_scroll_offset: container.content_scroll_offset(),
            pointer_is_over_content: container.is_inside_content(at),
            should_ignore_one_drag: container.should_ignore_one_drag(),
        }
    }

    /// Whether the gesture is a container-drag candidate.
    #[must_use]
    pub fn should_intercept(&self) -> bool {
        !self.is_animating && self.can_drag && self.pointer_is_over_content
    }
}
