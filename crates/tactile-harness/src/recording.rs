#![forbid(unsafe_code)]

//! Recording fakes for every gesture collaborator.
//!
//! All fakes write into one shared [`CallLog`], so tests can assert ordering
//! across collaborators (e.g. the fling notification precedes the drag
//! finish, which precedes the orientation unlock).

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tactile::{
    ActionDispatcher, ActionTarget, DeferredAction, DraggableContainer, MessageId,
    OrientationFlags, OrientationHost, Point, PointerPhase, PointerSample, RowDescriptor,
    RowHitTest, RowId, RowSource, RowVisual, SwipeAction,
};

// ============================================================================
// Call log
// ============================================================================

/// One observed collaborator call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Viewport { width: u32, height: u32 },
    MoveBy(f32),
    ForceTop,
    Dispatch(PointerPhase),
    DragStarted,
    DragFinished,
    Fling { upward: bool },
    Lock { flag: OrientationFlags, enabled: bool },
    Action { action: SwipeAction, row: RowId },
    Translate { row: RowId, dx: f32 },
    TranslateVertical { row: RowId, dy: f32 },
    ResetVertical(RowId),
    SmoothResetVertical(RowId),
    Normalize { row: RowId, deferred: Option<DeferredAction> },
    CompleteTranslation(RowId),
}

/// Shared, ordered log of collaborator calls.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Rc<RefCell<Vec<Call>>>);

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, call: Call) {
        self.0.borrow_mut().push(call);
    }

    /// Snapshot of every call so far.
    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().clone()
    }

    /// Number of calls matching `pred`.
    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.0.borrow().iter().filter(|c| pred(c)).count()
    }

    /// Every dispatched action, in order.
    pub fn actions(&self) -> Vec<(SwipeAction, RowId)> {
        self.0
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::Action { action, row } => Some((*action, *row)),
                _ => None,
            })
            .collect()
    }

    /// Calls made to the container and orientation host only.
    pub fn container_calls(&self) -> Vec<Call> {
        self.0
            .borrow()
            .iter()
            .filter(|c| {
                matches!(
                    c,
                    Call::MoveBy(_)
                        | Call::ForceTop
                        | Call::Dispatch(_)
                        | Call::DragStarted
                        | Call::DragFinished
                        | Call::Fling { .. }
                        | Call::Lock { .. }
                )
            })
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

// ============================================================================
// Container
// ============================================================================

/// A draggable panel whose state tests set directly.
#[derive(Debug)]
pub struct RecordingContainer {
    log: CallLog,
    /// `can_move_content()`.
    pub can_drag: bool,
    /// `is_animating()`.
    pub animating: bool,
    /// `should_ignore_one_drag()`.
    pub ignore_one: bool,
    /// `content_scroll_offset()`.
    pub scroll_offset: i32,
    /// Content covers everything at or below this Y.
    pub content_top: f32,
    /// `move_by` absorbs (returns true) for deltas at or beyond this value
    /// upward, i.e. `delta <= -limit`.
    pub expand_limit: Option<f32>,
    /// Return value of `on_fling_handled`.
    pub fling_handled: bool,
}

impl RecordingContainer {
    /// A draggable, idle panel whose content fills the viewport.
    pub fn new(log: &CallLog) -> Self {
        Self {
            log: log.clone(),
            can_drag: true,
            animating: false,
            ignore_one: false,
            scroll_offset: 0,
            content_top: 0.0,
            expand_limit: None,
            fling_handled: true,
        }
    }

    #[must_use]
    pub fn animating(mut self) -> Self {
        self.animating = true;
        self
    }

    #[must_use]
    pub fn ignoring_one_drag(mut self) -> Self {
        self.ignore_one = true;
        self
    }

    #[must_use]
    pub fn scrolled(mut self, offset: i32) -> Self {
        self.scroll_offset = offset;
        self
    }

    #[must_use]
    pub fn with_expand_limit(mut self, limit: f32) -> Self {
        self.expand_limit = Some(limit);
        self
    }
}

impl DraggableContainer for RecordingContainer {
    fn viewport_changed(&mut self, width: u32, height: u32) {
        self.log.push(Call::Viewport { width, height });
    }

    fn can_move_content(&self) -> bool {
        self.can_drag
    }

    fn is_inside_content(&self, at: Point) -> bool {
        at.y >= self.content_top
    }

    fn is_animating(&self) -> bool {
        self.animating
    }

    fn should_ignore_one_drag(&self) -> bool {
        self.ignore_one
    }

    fn content_scroll_offset(&self) -> i32 {
        self.scroll_offset
    }

    fn move_by(&mut self, delta: f32) -> bool {
        self.log.push(Call::MoveBy(delta));
        self.expand_limit.is_some_and(|limit| delta <= -limit)
    }

    fn force_scroll_content_to_top(&mut self) {
        self.log.push(Call::ForceTop);
    }

    fn dispatch_to_content(&mut self, sample: &PointerSample) {
        self.log.push(Call::Dispatch(sample.phase));
    }

    fn on_drag_started(&mut self) {
        self.log.push(Call::DragStarted);
    }

    fn on_drag_finished(&mut self) {
        self.log.push(Call::DragFinished);
    }

    fn on_fling_handled(&mut self, is_upward: bool) -> bool {
        self.log.push(Call::Fling { upward: is_upward });
        self.fling_handled
    }
}

// ============================================================================
// Orientation host
// ============================================================================

/// Orientation host that tracks how many flags are held.
#[derive(Debug)]
pub struct RecordingHost {
    log: CallLog,
    held: Cell<i32>,
    peak: Cell<i32>,
}

impl RecordingHost {
    pub fn new(log: &CallLog) -> Rc<Self> {
        Rc::new(Self {
            log: log.clone(),
            held: Cell::new(0),
            peak: Cell::new(0),
        })
    }

    /// Flags currently held (acquisitions minus releases).
    pub fn held(&self) -> i32 {
        self.held.get()
    }

    /// Highest `held()` ever observed.
    pub fn peak(&self) -> i32 {
        self.peak.get()
    }
}

impl OrientationHost for RecordingHost {
    fn set_orientation_lock(&self, flag: OrientationFlags, enabled: bool) {
        self.log.push(Call::Lock { flag, enabled });
        let held = self.held.get() + if enabled { 1 } else { -1 };
        self.held.set(held);
        self.peak.set(self.peak.get().max(held));
    }
}

// ============================================================================
// Dispatcher
// ============================================================================

#[derive(Debug)]
pub struct RecordingDispatcher {
    log: CallLog,
}

impl RecordingDispatcher {
    pub fn new(log: &CallLog) -> Self {
        Self { log: log.clone() }
    }
}

impl ActionDispatcher for RecordingDispatcher {
    fn trigger_quick_react(&mut self, target: &ActionTarget) {
        self.log.push(Call::Action {
            action: SwipeAction::QuickReact,
            row: target.row,
        });
    }

    fn trigger_reply(&mut self, target: &ActionTarget) {
        self.log.push(Call::Action {
            action: SwipeAction::Reply,
            row: target.row,
        });
    }

    fn trigger_share(&mut self, target: &ActionTarget) {
        self.log.push(Call::Action {
            action: SwipeAction::Share,
            row: target.row,
        });
    }
}

// ============================================================================
// Rows
// ============================================================================

/// Visual state of one row.
#[derive(Debug)]
pub struct RecordingRow {
    log: CallLog,
    id: RowId,
    /// Horizontal translation.
    pub x: f32,
    /// Vertical translation.
    pub y: f32,
    /// Downward pull that counts as "translated enough" for a reaction.
    pub reaction_pull: f32,
}

impl RowVisual for RecordingRow {
    fn translate(&mut self, dx: f32, _allow_overscroll: bool) {
        self.x = dx;
        self.log.push(Call::Translate { row: self.id, dx });
    }

    fn translate_vertical(&mut self, dy: f32) {
        self.y = dy;
        self.log.push(Call::TranslateVertical { row: self.id, dy });
    }

    fn reset_vertical(&mut self) {
        self.y = 0.0;
        self.log.push(Call::ResetVertical(self.id));
    }

    fn smooth_reset_vertical(&mut self) {
        self.y = 0.0;
        self.log.push(Call::SmoothResetVertical(self.id));
    }

    fn current_translation(&self) -> f32 {
        self.x
    }

    fn is_translated_enough_for_reaction(&self) -> bool {
        self.y >= self.reaction_pull
    }

    fn normalize_and_run(&mut self, deferred: Option<DeferredAction>) {
        self.x = 0.0;
        self.y = 0.0;
        self.log.push(Call::Normalize {
            row: self.id,
            deferred,
        });
    }

    fn complete_translation(&mut self) {
        self.x = 0.0;
        self.log.push(Call::CompleteTranslation(self.id));
    }
}

/// A vertical list of equally tall message rows.
#[derive(Debug)]
pub struct RecordingList {
    rows: Vec<(RowDescriptor, RecordingRow)>,
    row_height: f32,
    top: f32,
}

impl RecordingList {
    /// `count` swipeable message rows of `width` x `row_height`, starting at
    /// `top`. Row ids are `1..=count`.
    pub fn new(log: &CallLog, count: usize, width: f32, row_height: f32, top: f32) -> Self {
        let rows = (1..=count as u64)
            .map(|i| {
                let id = RowId(i);
                let desc = RowDescriptor::message(id, 1000, MessageId(i as i64), width);
                let visual = RecordingRow {
                    log: log.clone(),
                    id,
                    x: 0.0,
                    y: 0.0,
                    reaction_pull: 48.0,
                };
                (desc, visual)
            })
            .collect();
        Self {
            rows,
            row_height,
            top,
        }
    }

    /// Mutable access to a row's capability record.
    pub fn descriptor_mut(&mut self, id: RowId) -> Option<&mut RowDescriptor> {
        self.rows
            .iter_mut()
            .find(|(d, _)| d.id == id)
            .map(|(d, _)| d)
    }

    /// A row's visual state.
    pub fn row(&self, id: RowId) -> Option<&RecordingRow> {
        self.rows.iter().find(|(d, _)| d.id == id).map(|(_, v)| v)
    }

    /// Whether every row rests at zero offset.
    pub fn all_at_rest(&self) -> bool {
        self.rows.iter().all(|(_, v)| v.x == 0.0 && v.y == 0.0)
    }

    /// Vertical center of a row, for scripting pointer samples.
    pub fn center_y(&self, id: RowId) -> f32 {
        self.top + (id.0 as f32 - 0.5) * self.row_height
    }

    /// Remove a row (recycled mid-gesture).
    pub fn remove(&mut self, id: RowId) {
        self.rows.retain(|(d, _)| d.id != id);
    }
}

impl RowSource for RecordingList {
    fn descriptor(&self, id: RowId) -> Option<RowDescriptor> {
        self.rows.iter().find(|(d, _)| d.id == id).map(|(d, _)| d.clone())
    }

    fn visual(&mut self, id: RowId) -> Option<&mut dyn RowVisual> {
        self.rows
            .iter_mut()
            .find(|(d, _)| d.id == id)
            .map(|(_, v)| v as &mut dyn RowVisual)
    }
}

impl RowHitTest for RecordingList {
    fn row_at(&self, at: Point) -> Option<RowId> {
        if at.y < self.top || self.row_height <= 0.0 {
            return None;
        }
        let index = ((at.y - self.top) / self.row_height) as usize;
        self.rows.get(index).map(|(d, _)| d.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_test_maps_rows_by_height() {
        let log = CallLog::new();
        let list = RecordingList::new(&log, 3, 400.0, 60.0, 100.0);
        assert_eq!(list.row_at(Point::new(0.0, 99.0)), None);
        assert_eq!(list.row_at(Point::new(0.0, 100.0)), Some(RowId(1)));
        assert_eq!(list.row_at(Point::new(0.0, list.center_y(RowId(3)))), Some(RowId(3)));
        assert_eq!(list.row_at(Point::new(0.0, 281.0)), None);
    }

    #[test]
    fn host_tracks_held_flags() {
        let log = CallLog::new();
        let host = RecordingHost::new(&log);
        host.set_orientation_lock(OrientationFlags::TOUCHING_MEDIA_PANEL, true);
        host.set_orientation_lock(OrientationFlags::TOUCHING_MEDIA_PANEL, false);
        assert_eq!(host.held(), 0);
        assert_eq!(host.peak(), 1);
        assert_eq!(log.count(|c| matches!(c, Call::Lock { .. })), 2);
    }
}
