#![forbid(unsafe_code)]

//! Per-row swipe state machine.
//!
//! [`SwipeActionController`] governs one row's drag at a time and resolves
//! it into zero or one committed action.
//!
//! # State Machine
//!
//! ```text
//! Idle ──begin──▶ Dragging ──release (past threshold)──▶ Committing ──▶ Idle
//!                    │                                        ▲
//!                    │                    (commit path fires at once)
//!                    └──release (under threshold) / cancel──▶ Resetting ──▶ Idle
//! ```
//!
//! - **Dragging** accepts horizontal and vertical deltas. The live axis locks
//!   to whichever axis first exceeds the row slop; only a horizontal-live
//!   drag can commit.
//! - **Committing** runs the pre-commit hook: the row normalizes itself and
//!   reports back through [`normalized`](SwipeActionController::normalized);
//!   a share then waits out the share delay on [`tick`](SwipeActionController::tick).
//!   The full-threshold commit path fires during `release` and goes straight
//!   back to Idle.
//! - **Resetting** springs the horizontal offset back to zero, one frame per
//!   `tick`, without firing anything.
//!
//! # Invariants
//!
//! 1. At most one action fires per gesture: the resolved action is handed
//!    out once, and only after the gesture's `committed` flag is set. A
//!    committed gesture ignores any later release or cancel.
//! 2. Both completion paths pick the action through [`action::resolve`].
//! 3. Cancel and an under-threshold release take the same reset path.
//! 4. When Resetting completes the row's horizontal translation is exactly 0.
//! 5. A row that fails the eligibility gate never leaves Idle.
//!
//! # Failure Modes
//!
//! - Dispatcher not bound: every entry point returns
//!   [`GestureError::Unbound`].
//! - Row recycled mid-gesture (`RowSource::visual` returns `None`): the
//!   gesture resets without visual calls and without dispatch.

use std::time::Duration;

use tactile_core::GestureError;
use tactile_core::animation::{Animation, Delay, Spring};
use tactile_core::geometry::{HorizontalDirection, LayoutDirection, exceeds_slop};

use crate::action::{self, ActionDispatcher, ActionTarget, DeferredAction, SwipeAction};
use crate::availability::{ActionAvailability, MovementFlags, Switches};
use crate::config::SwipeConfig;
use crate::eligibility::{Eligibility, IneligibleReasons, SwipeContext};
use crate::row::{RowDescriptor, RowId, RowSource, RowVisual};
use crate::threshold::SwipeThreshold;

// ---------------------------------------------------------------------------
// Public outcome types
// ---------------------------------------------------------------------------

/// Coarse state of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipePhase {
    /// No row is being swiped.
    Idle,
    /// A row follows the finger.
    Dragging,
    /// A committed swipe waits for the row to settle or for the share delay.
    Committing,
    /// A row springs back to rest without an action.
    Resetting,
}

/// Axis a drag locked onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Sideways swipe; may commit.
    Horizontal,
    /// Downward pull; never commits on its own.
    Vertical,
}

/// Result of [`SwipeActionController::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeginOutcome {
    /// The row is now being dragged in the given directions.
    Started {
        /// Open directions.
        flags: MovementFlags,
    },
    /// The capability gate failed.
    Rejected(IneligibleReasons),
    /// The gate passed but no action is available in any direction.
    NoDirections,
    /// The host has no such row.
    Missing,
}

/// Result of [`SwipeActionController::release`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// Nothing was being dragged (or the gesture already committed).
    Ignored,
    /// Under threshold, vertical-live, or the row vanished: springing back.
    Reset,
    /// Full-threshold commit; the action (if any) has already fired.
    Committed(Option<SwipeAction>),
    /// Pre-commit hook: the row normalizes first, the action fires later.
    Deferred(Option<DeferredAction>),
}

/// What a frame tick completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    /// A reset animation reached rest on this tick.
    pub settled: bool,
    /// A delayed action fired on this tick.
    pub fired: Option<SwipeAction>,
}

// ---------------------------------------------------------------------------
// Row state
// ---------------------------------------------------------------------------

/// Swipe state of the one interactive row.
///
/// Created by `begin`, destroyed when the row returns to Idle or is
/// superseded by a new drag.
#[derive(Debug, Clone)]
pub struct RowSwipeState {
    row: RowId,
    target: ActionTarget,
    flags: MovementFlags,
    availability: ActionAvailability,
    threshold: SwipeThreshold,
    layout: LayoutDirection,
    uses_bubbles: bool,
    dx: f32,
    dy: f32,
    axis: Option<Axis>,
    committed: bool,
    resolved: Option<DeferredAction>,
}

impl RowSwipeState {
    /// Row being swiped.
    #[must_use]
    pub fn row(&self) -> RowId {
        self.row
    }

    /// Applied horizontal translation.
    #[must_use]
    pub fn translation(&self) -> f32 {
        self.dx
    }

    /// Applied vertical translation.
    #[must_use]
    pub fn vertical_translation(&self) -> f32 {
        self.dy
    }

    /// Locked axis, if the drag has passed the row slop.
    #[must_use]
    pub fn axis(&self) -> Option<Axis> {
        self.axis
    }

    /// Open directions.
    #[must_use]
    pub fn flags(&self) -> MovementFlags {
        self.flags
    }

    /// Commit threshold of this row.
    #[must_use]
    pub fn threshold(&self) -> SwipeThreshold {
        self.threshold
    }

    /// Whether this gesture already committed.
    #[must_use]
    pub fn is_committed(&self) -> bool {
        self.committed
    }

    /// Action resolved for this gesture, if any.
    #[must_use]
    pub fn resolved_action(&self) -> Option<DeferredAction> {
        self.resolved
    }

    /// Hand out the resolved action once. Only a committed gesture has one.
    fn take_action(&mut self) -> Option<SwipeAction> {
        if !self.committed {
            return None;
        }
        self.resolved.take().map(|deferred| deferred.action)
    }

    fn edge(&self) -> Option<tactile_core::geometry::SwipeEdge> {
        HorizontalDirection::from_dx(self.dx).map(|dir| self.layout.edge_for(dir))
    }
}

#[derive(Debug)]
enum Wait {
    Normalizing,
    Delay(Delay),
}

#[derive(Debug, Default)]
enum State {
    #[default]
    Idle,
    Dragging(RowSwipeState),
    Committing { swipe: RowSwipeState, wait: Wait },
    Resetting { swipe: RowSwipeState, spring: Spring },
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Swipe-to-act controller for one list.
///
/// Construct with [`new`](Self::new), then [`bind`](Self::bind) the action
/// dispatcher before delivering any event.
pub struct SwipeActionController<D> {
    config: SwipeConfig,
    context: SwipeContext,
    dispatcher: Option<D>,
    state: State,
}

impl<D: ActionDispatcher> std::fmt::Debug for SwipeActionController<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwipeActionController")
            .field("phase", &self.phase())
            .field("bound", &self.dispatcher.is_some())
            .finish()
    }
}

impl<D: ActionDispatcher> SwipeActionController<D> {
    /// Create an unbound controller.
    #[must_use]
    pub fn new(config: SwipeConfig) -> Self {
        Self {
            config,
            context: SwipeContext::default(),
            dispatcher: None,
            state: State::Idle,
        }
    }

    /// Bind the action dispatcher.
    pub fn bind(&mut self, dispatcher: D) {
        self.dispatcher = Some(dispatcher);
    }

    /// Whether a dispatcher is bound.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.dispatcher.is_some()
    }

    /// The bound dispatcher.
    #[must_use]
    pub fn dispatcher(&self) -> Option<&D> {
        self.dispatcher.as_ref()
    }

    /// The bound dispatcher, mutably.
    pub fn dispatcher_mut(&mut self) -> Option<&mut D> {
        self.dispatcher.as_mut()
    }

    /// Replace the host-level context (chat changed, select mode toggled).
    ///
    /// Takes effect on the next `begin`.
    pub fn set_context(&mut self, context: SwipeContext) {
        self.context = context;
    }

    /// Current host-level context.
    #[must_use]
    pub fn context(&self) -> &SwipeContext {
        &self.context
    }

    /// Configuration.
    #[must_use]
    pub fn config(&self) -> &SwipeConfig {
        &self.config
    }

    /// Coarse state.
    #[must_use]
    pub fn phase(&self) -> SwipePhase {
        match self.state {
            State::Idle => SwipePhase::Idle,
            State::Dragging(_) => SwipePhase::Dragging,
            State::Committing { .. } => SwipePhase::Committing,
            State::Resetting { .. } => SwipePhase::Resetting,
        }
    }

    /// State of the interactive row, if any.
    #[must_use]
    pub fn swipe_state(&self) -> Option<&RowSwipeState> {
        match &self.state {
            State::Idle => None,
            State::Dragging(swipe)
            | State::Committing { swipe, .. }
            | State::Resetting { swipe, .. } => Some(swipe),
        }
    }

    /// Row currently owned by the controller.
    #[must_use]
    pub fn active_row(&self) -> Option<RowId> {
        self.swipe_state().map(RowSwipeState::row)
    }

    /// List-wide action switches for the current context.
    #[must_use]
    pub fn switches(&self) -> Switches {
        Switches::derive(&self.config.settings, &self.context)
    }

    /// Directions a drag on `row` may travel; empty when the gate fails.
    #[must_use]
    pub fn movement_flags(&self, row: &RowDescriptor) -> MovementFlags {
        if !Eligibility::evaluate(row, &self.context).swipeable {
            return MovementFlags::empty();
        }
        let avail = ActionAvailability::for_row(self.switches(), row);
        MovementFlags::from_availability(avail, self.context.layout_direction)
    }

    /// Commit threshold for `row`.
    #[must_use]
    pub fn threshold_for(&self, row: &RowDescriptor) -> SwipeThreshold {
        SwipeThreshold::for_row(&self.config, &self.context, row.width)
    }

    fn ensure_bound(&self) -> Result<(), GestureError> {
        if self.dispatcher.is_none() {
            tracing::error!(message = "swipe.unbound", collaborator = "action dispatcher");
            return Err(GestureError::unbound("action dispatcher"));
        }
        Ok(())
    }

    // -- Events -------------------------------------------------------------

    /// Make `row` the drag target.
    ///
    /// Any previous row is superseded first: its offsets snap to rest and a
    /// committed action still waiting on it fires now.
    pub fn begin<R: RowSource + ?Sized>(
        &mut self,
        row: RowId,
        rows: &mut R,
    ) -> Result<BeginOutcome, GestureError> {
        self.ensure_bound()?;
        self.supersede(rows);

        let Some(desc) = rows.descriptor(row) else {
            tracing::warn!(message = "swipe.missing_row", row = row.0);
            return Ok(BeginOutcome::Missing);
        };
        let eligibility = Eligibility::evaluate(&desc, &self.context);
        if !eligibility.swipeable {
            tracing::debug!(
                message = "swipe.rejected",
                row = row.0,
                reasons = ?eligibility.reasons
            );
            return Ok(BeginOutcome::Rejected(eligibility.reasons));
        }
        let availability = ActionAvailability::for_row(self.switches(), &desc);
        let flags = MovementFlags::from_availability(availability, self.context.layout_direction);
        if flags.is_empty() {
            return Ok(BeginOutcome::NoDirections);
        }

        tracing::debug!(message = "swipe.begin", row = row.0, flags = ?flags);
        self.state = State::Dragging(RowSwipeState {
            row,
            target: ActionTarget::from(&desc),
            flags,
            availability,
            threshold: self.threshold_for(&desc),
            layout: self.context.layout_direction,
            uses_bubbles: desc.uses_bubbles,
            dx: 0.0,
            dy: 0.0,
            axis: None,
            committed: false,
            resolved: None,
        });
        Ok(BeginOutcome::Started { flags })
    }

    /// Apply the drag's total displacement since `begin`.
    pub fn drag<R: RowSource + ?Sized>(
        &mut self,
        dx: f32,
        dy: f32,
        rows: &mut R,
    ) -> Result<(), GestureError> {
        self.ensure_bound()?;
        let slop = self.config.row_slop();
        let State::Dragging(swipe) = &mut self.state else {
            return Ok(());
        };

        if swipe.axis.is_none() {
            if !exceeds_slop(dx, slop) && !exceeds_slop(dy, slop) {
                return Ok(());
            }
            let axis = if dx.abs() >= dy.abs() {
                Axis::Horizontal
            } else {
                Axis::Vertical
            };
            tracing::trace!(message = "swipe.axis_lock", row = swipe.row.0, axis = ?axis);
            swipe.axis = Some(axis);
        }

        let vertical = swipe.flags.contains(MovementFlags::DOWN);
        swipe.dx = swipe.flags.clamp_dx(dx);
        swipe.dy = if vertical { dy.max(0.0) } else { 0.0 };
        if let Some(visual) = rows.visual(swipe.row) {
            visual.translate(swipe.dx, true);
            if vertical {
                visual.translate_vertical(swipe.dy);
            }
        }
        tracing::trace!(message = "swipe.drag", row = swipe.row.0, dx = swipe.dx, dy = swipe.dy);
        Ok(())
    }

    /// The row is still drawn but no longer the active drag target.
    ///
    /// Animates the vertical offset back to zero; horizontal translation
    /// follows the next `drag` as usual.
    pub fn deactivate<R: RowSource + ?Sized>(&mut self, rows: &mut R) -> Result<(), GestureError> {
        self.ensure_bound()?;
        let State::Dragging(swipe) = &mut self.state else {
            return Ok(());
        };
        if swipe.dy != 0.0 {
            swipe.dy = 0.0;
            if let Some(visual) = rows.visual(swipe.row) {
                visual.smooth_reset_vertical();
            }
        }
        Ok(())
    }

    /// Finger lifted.
    pub fn release<R: RowSource + ?Sized>(
        &mut self,
        rows: &mut R,
    ) -> Result<ReleaseOutcome, GestureError> {
        self.ensure_bound()?;
        let mut swipe = match std::mem::take(&mut self.state) {
            State::Dragging(swipe) if !swipe.committed => swipe,
            other => {
                self.state = other;
                return Ok(ReleaseOutcome::Ignored);
            }
        };

        let edge = swipe.edge().filter(|_| {
            swipe.axis == Some(Axis::Horizontal) && swipe.threshold.is_met_by(swipe.dx)
        });
        let Some(edge) = edge else {
            tracing::debug!(message = "swipe.release", row = swipe.row.0, dx = swipe.dx, past = false);
            self.start_reset(swipe, rows);
            return Ok(ReleaseOutcome::Reset);
        };
        let Some(visual) = rows.visual(swipe.row) else {
            tracing::warn!(message = "swipe.row_vanished", row = swipe.row.0);
            return Ok(ReleaseOutcome::Reset);
        };

        swipe.committed = true;
        let translated_enough = visual.is_translated_enough_for_reaction();

        if swipe.uses_bubbles || translated_enough {
            let deferred =
                action::resolve(edge, swipe.availability, translated_enough).map(DeferredAction::new);
            swipe.resolved = deferred;
            tracing::debug!(
                message = "swipe.defer",
                row = swipe.row.0,
                action = deferred.map(|d| d.action.name())
            );
            swipe.dy = 0.0;
            visual.smooth_reset_vertical();
            visual.normalize_and_run(deferred);
            self.state = State::Committing {
                swipe,
                wait: Wait::Normalizing,
            };
            return Ok(ReleaseOutcome::Deferred(deferred));
        }

        let fired = if visual.current_translation() != 0.0 {
            let need_reaction = visual.is_translated_enough_for_reaction();
            visual.complete_translation();
            visual.reset_vertical();
            action::resolve(edge, swipe.availability, need_reaction)
        } else {
            None
        };
        swipe.dx = 0.0;
        swipe.dy = 0.0;
        swipe.resolved = fired.map(DeferredAction::new);
        tracing::debug!(
            message = "swipe.commit",
            row = swipe.row.0,
            action = fired.map(SwipeAction::name)
        );
        if let Some(action) = swipe.take_action() {
            dispatch(&mut self.dispatcher, action, &swipe.target);
        }
        Ok(ReleaseOutcome::Committed(fired))
    }

    /// The gesture was taken away (e.g. the list started scrolling).
    ///
    /// Only a live drag is affected; once released, a gesture has nothing
    /// left to cancel.
    pub fn cancel<R: RowSource + ?Sized>(&mut self, rows: &mut R) -> Result<(), GestureError> {
        self.ensure_bound()?;
        match std::mem::take(&mut self.state) {
            State::Dragging(swipe) if !swipe.committed => {
                tracing::debug!(message = "swipe.cancel", row = swipe.row.0);
                self.start_reset(swipe, rows);
            }
            other => self.state = other,
        }
        Ok(())
    }

    /// The row finished normalizing after the pre-commit hook.
    ///
    /// Fires the deferred action unless it asked for the extra delay, in
    /// which case it fires from [`tick`](Self::tick). Returns the action
    /// fired now.
    pub fn normalized<R: RowSource + ?Sized>(
        &mut self,
        _rows: &mut R,
    ) -> Result<Option<SwipeAction>, GestureError> {
        self.ensure_bound()?;
        let mut swipe = match std::mem::take(&mut self.state) {
            State::Committing {
                swipe,
                wait: Wait::Normalizing,
            } => swipe,
            other => {
                self.state = other;
                return Ok(None);
            }
        };
        match swipe.resolved {
            Some(deferred) if deferred.needs_delay && !self.config.share_delay.is_zero() => {
                self.state = State::Committing {
                    swipe,
                    wait: Wait::Delay(Delay::new(self.config.share_delay)),
                };
                Ok(None)
            }
            _ => {
                let fired = swipe.take_action();
                if let Some(action) = fired {
                    dispatch(&mut self.dispatcher, action, &swipe.target);
                }
                Ok(fired)
            }
        }
    }

    /// Advance animations by one frame.
    pub fn tick<R: RowSource + ?Sized>(
        &mut self,
        dt: Duration,
        rows: &mut R,
    ) -> Result<TickOutcome, GestureError> {
        self.ensure_bound()?;
        let mut outcome = TickOutcome::default();
        match std::mem::take(&mut self.state) {
            State::Resetting {
                mut swipe,
                mut spring,
            } => {
                spring.tick(dt);
                swipe.dx = spring.position() as f32;
                if let Some(visual) = rows.visual(swipe.row) {
                    visual.translate(swipe.dx, false);
                }
                if spring.is_complete() {
                    tracing::debug!(message = "swipe.settled", row = swipe.row.0);
                    outcome.settled = true;
                } else {
                    self.state = State::Resetting { swipe, spring };
                }
            }
            State::Committing {
                mut swipe,
                wait: Wait::Delay(mut delay),
            } => {
                delay.tick(dt);
                if delay.is_complete() {
                    if let Some(action) = swipe.take_action() {
                        dispatch(&mut self.dispatcher, action, &swipe.target);
                        outcome.fired = Some(action);
                    }
                } else {
                    self.state = State::Committing {
                        swipe,
                        wait: Wait::Delay(delay),
                    };
                }
            }
            other => self.state = other,
        }
        Ok(outcome)
    }

    // -- Internals ----------------------------------------------------------

    fn start_reset<R: RowSource + ?Sized>(&mut self, mut swipe: RowSwipeState, rows: &mut R) {
        swipe.dy = 0.0;
        let spring = Spring::new(f64::from(swipe.dx), 0.0)
            .with_stiffness(self.config.settle_stiffness)
            .critically_damped();
        let visual = rows.visual(swipe.row);
        let Some(visual) = visual else {
            return;
        };
        visual.smooth_reset_vertical();
        if spring.is_complete() {
            swipe.dx = 0.0;
            visual.translate(0.0, false);
            return;
        }
        tracing::debug!(message = "swipe.reset", row = swipe.row.0, from = swipe.dx);
        self.state = State::Resetting { swipe, spring };
    }

    fn supersede<R: RowSource + ?Sized>(&mut self, rows: &mut R) {
        let (swipe, flush) = match std::mem::take(&mut self.state) {
            State::Idle => return,
            State::Dragging(swipe) | State::Resetting { swipe, .. } => (swipe, None),
            State::Committing { mut swipe, .. } => {
                let flush = swipe.take_action();
                (swipe, flush)
            }
        };
        tracing::warn!(message = "swipe.superseded", row = swipe.row.0);
        if let Some(visual) = rows.visual(swipe.row) {
            snap_to_rest(visual);
        }
        if let Some(action) = flush {
            dispatch(&mut self.dispatcher, action, &swipe.target);
        }
    }
}

fn snap_to_rest(visual: &mut dyn RowVisual) {
    visual.translate(0.0, false);
    visual.reset_vertical();
}

fn dispatch<D: ActionDispatcher>(dispatcher: &mut Option<D>, action: SwipeAction, target: &ActionTarget) {
    if let Some(dispatcher) = dispatcher.as_mut() {
        action::fire(dispatcher, action, target);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use tactile_core::geometry::LayoutDirection;

    use super::*;
    use crate::config::SwipeSettings;
    use crate::row::{MessageId, RowKind};

    const FRAME: Duration = Duration::from_millis(16);

    #[derive(Debug, Default)]
    struct Visual {
        x: f32,
        y: f32,
        translated_enough: bool,
        normalize_calls: Vec<Option<DeferredAction>>,
        smooth_resets: usize,
        completed: usize,
    }

    impl RowVisual for Visual {
        fn translate(&mut self, dx: f32, _allow_overscroll: bool) {
            self.x = dx;
        }
        fn translate_vertical(&mut self, dy: f32) {
            self.y = dy;
        }
        fn reset_vertical(&mut self) {
            self.y = 0.0;
        }
        fn smooth_reset_vertical(&mut self) {
            self.smooth_resets += 1;
            self.y = 0.0;
        }
        fn current_translation(&self) -> f32 {
            self.x
        }
        fn is_translated_enough_for_reaction(&self) -> bool {
            self.translated_enough
        }
        fn normalize_and_run(&mut self, deferred: Option<DeferredAction>) {
            self.normalize_calls.push(deferred);
        }
        fn complete_translation(&mut self) {
            self.completed += 1;
            self.x = 0.0;
        }
    }

    #[derive(Default)]
    struct Rows(HashMap<RowId, (RowDescriptor, Visual)>);

    impl Rows {
        fn with(mut self, desc: RowDescriptor) -> Self {
            self.0.insert(desc.id, (desc, Visual::default()));
            self
        }
        fn visual_of(&self, id: RowId) -> &Visual {
            &self.0[&id].1
        }
        fn visual_mut(&mut self, id: RowId) -> &mut Visual {
            &mut self.0.get_mut(&id).unwrap().1
        }
    }

    impl RowSource for Rows {
        fn descriptor(&self, id: RowId) -> Option<RowDescriptor> {
            self.0.get(&id).map(|(d, _)| d.clone())
        }
        fn visual(&mut self, id: RowId) -> Option<&mut dyn RowVisual> {
            self.0.get_mut(&id).map(|(_, v)| v as &mut dyn RowVisual)
        }
    }

    #[derive(Debug, Default)]
    struct Fired(Vec<(SwipeAction, RowId)>);

    impl ActionDispatcher for Fired {
        fn trigger_quick_react(&mut self, t: &ActionTarget) {
            self.0.push((SwipeAction::QuickReact, t.row));
        }
        fn trigger_reply(&mut self, t: &ActionTarget) {
            self.0.push((SwipeAction::Reply, t.row));
        }
        fn trigger_share(&mut self, t: &ActionTarget) {
            self.0.push((SwipeAction::Share, t.row));
        }
    }

    const ROW: RowId = RowId(1);

    fn row() -> RowDescriptor {
        RowDescriptor::message(ROW, 77, MessageId(500), 400.0)
    }

    fn controller(settings: SwipeSettings) -> SwipeActionController<Fired> {
        let mut c = SwipeActionController::new(SwipeConfig::default().with_settings(settings));
        c.set_context(SwipeContext {
            available_reactions: 3,
            ..SwipeContext::default()
        });
        c.bind(Fired::default());
        c
    }

    fn fired(c: &SwipeActionController<Fired>) -> &[(SwipeAction, RowId)] {
        &c.dispatcher().unwrap().0
    }

    fn settle(c: &mut SwipeActionController<Fired>, rows: &mut Rows) {
        for _ in 0..200 {
            c.tick(FRAME, rows).unwrap();
        }
    }

    #[test]
    fn unbound_controller_fails_fast() {
        let mut c: SwipeActionController<Fired> = SwipeActionController::new(SwipeConfig::default());
        let mut rows = Rows::default().with(row());
        assert_eq!(
            c.begin(ROW, &mut rows),
            Err(GestureError::unbound("action dispatcher"))
        );
    }

    #[test]
    fn exact_threshold_commits_reply() {
        let mut c = controller(SwipeSettings::default());
        let mut rows = Rows::default().with(row());
        c.begin(ROW, &mut rows).unwrap();
        c.drag(-124.0, 0.0, &mut rows).unwrap();
        let out = c.release(&mut rows).unwrap();
        assert_eq!(out, ReleaseOutcome::Committed(Some(SwipeAction::Reply)));
        assert_eq!(fired(&c), &[(SwipeAction::Reply, ROW)]);
        assert_eq!(rows.visual_of(ROW).completed, 1);
        assert_eq!(c.phase(), SwipePhase::Idle);
    }

    #[test]
    fn one_pixel_short_resets_without_action() {
        let mut c = controller(SwipeSettings::default());
        let mut rows = Rows::default().with(row());
        c.begin(ROW, &mut rows).unwrap();
        c.drag(-123.0, 0.0, &mut rows).unwrap();
        assert_eq!(c.release(&mut rows).unwrap(), ReleaseOutcome::Reset);
        assert_eq!(c.phase(), SwipePhase::Resetting);
        settle(&mut c, &mut rows);
        assert_eq!(c.phase(), SwipePhase::Idle);
        assert_eq!(rows.visual_of(ROW).x, 0.0);
        assert!(fired(&c).is_empty());
    }

    #[test]
    fn share_disabled_triples_threshold() {
        let settings = SwipeSettings {
            quick_share: false,
            ..SwipeSettings::default()
        };
        let mut c = controller(settings);
        let mut rows = Rows::default().with(row());
        c.begin(ROW, &mut rows).unwrap();
        c.drag(-124.0, 0.0, &mut rows).unwrap();
        assert_eq!(c.release(&mut rows).unwrap(), ReleaseOutcome::Reset);
        assert!(fired(&c).is_empty());
    }

    #[test]
    fn end_edge_commit_shares() {
        let mut c = controller(SwipeSettings::default());
        let mut rows = Rows::default().with(row());
        c.begin(ROW, &mut rows).unwrap();
        c.drag(200.0, 0.0, &mut rows).unwrap();
        assert_eq!(
            c.release(&mut rows).unwrap(),
            ReleaseOutcome::Committed(Some(SwipeAction::Share))
        );
        assert_eq!(fired(&c), &[(SwipeAction::Share, ROW)]);
    }

    #[test]
    fn rtl_mirrors_reply_and_share() {
        let mut c = controller(SwipeSettings::default());
        c.set_context(SwipeContext {
            layout_direction: LayoutDirection::Rtl,
            available_reactions: 3,
            ..SwipeContext::default()
        });
        let mut rows = Rows::default().with(row());
        c.begin(ROW, &mut rows).unwrap();
        c.drag(200.0, 0.0, &mut rows).unwrap();
        assert_eq!(
            c.release(&mut rows).unwrap(),
            ReleaseOutcome::Committed(Some(SwipeAction::Reply))
        );
    }

    #[test]
    fn ineligible_row_never_starts() {
        let mut c = controller(SwipeSettings::default());
        let mut desc = row();
        desc.kind = RowKind::ServiceMessage;
        let mut rows = Rows::default().with(desc);
        let out = c.begin(ROW, &mut rows).unwrap();
        assert_eq!(out, BeginOutcome::Rejected(IneligibleReasons::SERVICE_ROW));
        c.drag(-300.0, 0.0, &mut rows).unwrap();
        assert_eq!(c.release(&mut rows).unwrap(), ReleaseOutcome::Ignored);
        assert_eq!(rows.visual_of(ROW).x, 0.0);
    }

    #[test]
    fn nothing_enabled_yields_no_directions() {
        let settings = SwipeSettings {
            quick_reply: false,
            quick_share: false,
            quick_reaction: false,
        };
        let mut c = controller(settings);
        let mut rows = Rows::default().with(row());
        assert_eq!(c.movement_flags(&row()), MovementFlags::empty());
        assert_eq!(c.begin(ROW, &mut rows).unwrap(), BeginOutcome::NoDirections);
        assert_eq!(c.phase(), SwipePhase::Idle);
    }

    #[test]
    fn drag_toward_closed_edge_does_not_translate() {
        let settings = SwipeSettings {
            quick_share: false,
            ..SwipeSettings::default()
        };
        let mut c = controller(settings);
        let mut rows = Rows::default().with(row());
        c.begin(ROW, &mut rows).unwrap();
        c.drag(500.0, 0.0, &mut rows).unwrap();
        assert_eq!(rows.visual_of(ROW).x, 0.0);
        assert_eq!(c.release(&mut rows).unwrap(), ReleaseOutcome::Reset);
        assert_eq!(c.phase(), SwipePhase::Idle);
    }

    #[test]
    fn vertical_live_drag_resets() {
        let mut c = controller(SwipeSettings::default());
        let mut rows = Rows::default().with(row());
        c.begin(ROW, &mut rows).unwrap();
        c.drag(-10.0, 60.0, &mut rows).unwrap();
        assert_eq!(rows.visual_of(ROW).y, 60.0);
        c.drag(-150.0, 200.0, &mut rows).unwrap();
        assert_eq!(c.swipe_state().unwrap().axis(), Some(Axis::Vertical));
        assert_eq!(c.release(&mut rows).unwrap(), ReleaseOutcome::Reset);
        assert_eq!(rows.visual_of(ROW).y, 0.0);
        settle(&mut c, &mut rows);
        assert!(fired(&c).is_empty());
    }

    #[test]
    fn deactivate_drops_vertical_offset_only() {
        let mut c = controller(SwipeSettings::default());
        let mut rows = Rows::default().with(row());
        c.begin(ROW, &mut rows).unwrap();
        c.drag(-40.0, 30.0, &mut rows).unwrap();
        c.deactivate(&mut rows).unwrap();
        assert_eq!(rows.visual_of(ROW).y, 0.0);
        assert_eq!(rows.visual_of(ROW).x, -40.0);
        assert_eq!(c.phase(), SwipePhase::Dragging);
    }

    #[test]
    fn sub_slop_movement_is_not_applied() {
        let mut c = controller(SwipeSettings::default());
        let mut rows = Rows::default().with(row());
        c.begin(ROW, &mut rows).unwrap();
        c.drag(-5.0, 2.0, &mut rows).unwrap();
        assert_eq!(rows.visual_of(ROW).x, 0.0);
        assert_eq!(c.swipe_state().unwrap().axis(), None);
    }

    #[test]
    fn translated_enough_defers_quick_react_until_normalized() {
        let mut c = controller(SwipeSettings::default());
        let mut rows = Rows::default().with(row());
        c.begin(ROW, &mut rows).unwrap();
        c.drag(-130.0, 40.0, &mut rows).unwrap();
        rows.visual_mut(ROW).translated_enough = true;
        let deferred = DeferredAction::new(SwipeAction::QuickReact);
        assert_eq!(
            c.release(&mut rows).unwrap(),
            ReleaseOutcome::Deferred(Some(deferred))
        );
        assert_eq!(rows.visual_of(ROW).normalize_calls, vec![Some(deferred)]);
        assert!(fired(&c).is_empty());
        assert_eq!(c.normalized(&mut rows).unwrap(), Some(SwipeAction::QuickReact));
        assert_eq!(fired(&c), &[(SwipeAction::QuickReact, ROW)]);
        assert_eq!(c.phase(), SwipePhase::Idle);
    }

    #[test]
    fn deferred_commit_drops_vertical_offset() {
        let mut c = controller(SwipeSettings::default());
        let mut rows = Rows::default().with(row());
        c.begin(ROW, &mut rows).unwrap();
        c.drag(-130.0, 40.0, &mut rows).unwrap();
        assert_eq!(rows.visual_of(ROW).y, 40.0);
        rows.visual_mut(ROW).translated_enough = true;
        assert!(matches!(
            c.release(&mut rows).unwrap(),
            ReleaseOutcome::Deferred(Some(_))
        ));
        // The normalize animation here does not touch the vertical offset.
        assert_eq!(rows.visual_of(ROW).y, 0.0);
        assert_eq!(rows.visual_of(ROW).smooth_resets, 1);
        assert_eq!(c.phase(), SwipePhase::Committing);
        let swipe = c.swipe_state().unwrap();
        assert_eq!(swipe.vertical_translation(), 0.0);
        assert!(swipe.is_committed());
    }

    #[test]
    fn committed_action_is_handed_out_once() {
        let mut c = controller(SwipeSettings::default());
        let mut desc = row();
        desc.uses_bubbles = true;
        let mut rows = Rows::default().with(desc);
        c.begin(ROW, &mut rows).unwrap();
        c.drag(150.0, 0.0, &mut rows).unwrap();
        c.release(&mut rows).unwrap();
        assert!(c.swipe_state().unwrap().is_committed());
        // A second release or a cancel on a committed gesture is ignored.
        assert_eq!(c.release(&mut rows).unwrap(), ReleaseOutcome::Ignored);
        c.cancel(&mut rows).unwrap();
        assert_eq!(c.phase(), SwipePhase::Committing);

        assert_eq!(c.normalized(&mut rows).unwrap(), None);
        assert_eq!(c.normalized(&mut rows).unwrap(), None);
        settle(&mut c, &mut rows);
        assert_eq!(c.normalized(&mut rows).unwrap(), None);
        assert_eq!(fired(&c), &[(SwipeAction::Share, ROW)]);
        assert_eq!(c.phase(), SwipePhase::Idle);
    }

    #[test]
    fn debug_reports_phase_and_binding() {
        let c = controller(SwipeSettings::default());
        let text = format!("{c:?}");
        assert!(text.contains("Idle"), "{text}");
        assert!(text.contains("bound: true"), "{text}");
    }

    #[test]
    fn bubble_share_waits_for_delay() {
        let mut c = controller(SwipeSettings::default());
        let mut desc = row();
        desc.uses_bubbles = true;
        let mut rows = Rows::default().with(desc);
        c.begin(ROW, &mut rows).unwrap();
        c.drag(150.0, 0.0, &mut rows).unwrap();
        assert!(matches!(
            c.release(&mut rows).unwrap(),
            ReleaseOutcome::Deferred(Some(DeferredAction {
                action: SwipeAction::Share,
                needs_delay: true
            }))
        ));
        assert_eq!(c.normalized(&mut rows).unwrap(), None);
        let mut fired_on = None;
        for frame in 0..20 {
            if c.tick(FRAME, &mut rows).unwrap().fired.is_some() {
                fired_on = Some(frame);
                break;
            }
        }
        // 150ms share delay at 16ms frames.
        assert_eq!(fired_on, Some(9));
        assert_eq!(fired(&c), &[(SwipeAction::Share, ROW)]);
    }

    #[test]
    fn cancel_after_release_is_a_no_op() {
        let mut c = controller(SwipeSettings::default());
        let mut rows = Rows::default().with(row());
        c.begin(ROW, &mut rows).unwrap();
        c.drag(-124.0, 0.0, &mut rows).unwrap();
        c.release(&mut rows).unwrap();
        c.cancel(&mut rows).unwrap();
        assert_eq!(c.release(&mut rows).unwrap(), ReleaseOutcome::Ignored);
        assert_eq!(fired(&c).len(), 1);
        assert_eq!(rows.visual_of(ROW).x, 0.0);
    }

    #[test]
    fn cancel_mid_drag_resets() {
        let mut c = controller(SwipeSettings::default());
        let mut rows = Rows::default().with(row());
        c.begin(ROW, &mut rows).unwrap();
        c.drag(-300.0, 0.0, &mut rows).unwrap();
        c.cancel(&mut rows).unwrap();
        assert_eq!(c.phase(), SwipePhase::Resetting);
        settle(&mut c, &mut rows);
        c.cancel(&mut rows).unwrap();
        assert_eq!(rows.visual_of(ROW).x, 0.0);
        assert!(fired(&c).is_empty());
    }

    #[test]
    fn new_drag_flushes_pending_deferred_action() {
        let mut c = controller(SwipeSettings::default());
        let other = RowId(2);
        let mut rows = Rows::default()
            .with(row())
            .with(RowDescriptor::message(other, 77, MessageId(501), 400.0));
        rows.visual_mut(ROW).translated_enough = true;
        c.begin(ROW, &mut rows).unwrap();
        c.drag(-130.0, 0.0, &mut rows).unwrap();
        c.release(&mut rows).unwrap();
        assert_eq!(c.phase(), SwipePhase::Committing);

        c.begin(other, &mut rows).unwrap();
        assert_eq!(fired(&c), &[(SwipeAction::QuickReact, ROW)]);
        assert_eq!(c.active_row(), Some(other));
        // The late callback from the first row must not fire again.
        assert_eq!(c.normalized(&mut rows).unwrap(), None);
        assert_eq!(fired(&c).len(), 1);
    }

    #[test]
    fn new_drag_snaps_resetting_row() {
        let mut c = controller(SwipeSettings::default());
        let other = RowId(2);
        let mut rows = Rows::default()
            .with(row())
            .with(RowDescriptor::message(other, 77, MessageId(501), 400.0));
        c.begin(ROW, &mut rows).unwrap();
        c.drag(-60.0, 0.0, &mut rows).unwrap();
        c.release(&mut rows).unwrap();
        c.tick(FRAME, &mut rows).unwrap();
        assert_ne!(rows.visual_of(ROW).x, 0.0);
        c.begin(other, &mut rows).unwrap();
        assert_eq!(rows.visual_of(ROW).x, 0.0);
    }

    #[test]
    fn vanished_row_resets_silently() {
        let mut c = controller(SwipeSettings::default());
        let mut rows = Rows::default().with(row());
        c.begin(ROW, &mut rows).unwrap();
        c.drag(-200.0, 0.0, &mut rows).unwrap();
        rows.0.clear();
        assert_eq!(c.release(&mut rows).unwrap(), ReleaseOutcome::Reset);
        assert_eq!(c.phase(), SwipePhase::Idle);
        assert!(fired(&c).is_empty());
    }
}
