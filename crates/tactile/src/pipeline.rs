#![forbid(unsafe_code)]

//! Arbiter → content → row controller handoff.
//!
//! [`TouchPipeline`] is the reference wiring of the two gesture components.
//! Every sample reaches the [`GestureArbiter`] first. Samples the arbiter
//! leaves to the content drive the [`SwipeActionController`] for the row
//! under the pointer; the moment the arbiter intercepts, any row swipe in
//! flight is cancelled.
//!
//! # Invariants
//!
//! 1. A row swipe never survives an interception: `Intercepted` always
//!    cancels the controller before the container moves.
//! 2. Swallowed, container-owned, and relayed samples never reach the row
//!    controller.

use std::rc::Rc;
use std::time::Duration;

use tactile_arbiter::{ArbiterConfig, DraggableContainer, GestureArbiter, OrientationHost, Routing};
use tactile_core::geometry::Point;
use tactile_core::pointer::{PointerPhase, PointerSample};
use tactile_swipe::{
    ActionDispatcher, RowId, RowSource, SwipeAction, SwipeActionController, SwipeConfig,
    TickOutcome,
};

use crate::error::Result;

/// Host list: row lookup plus hit testing.
pub trait RowHitTest: RowSource {
    /// Row under `at`, if any.
    fn row_at(&self, at: Point) -> Option<RowId>;
}

/// Both gesture components wired in handoff order.
pub struct TouchPipeline<C: DraggableContainer, D: ActionDispatcher> {
    arbiter: GestureArbiter<C>,
    swipe: SwipeActionController<D>,
    origin: Option<Point>,
}

impl<C: DraggableContainer, D: ActionDispatcher> std::fmt::Debug for TouchPipeline<C, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TouchPipeline")
            .field("arbiter", &self.arbiter)
            .field("swipe", &self.swipe)
            .field("origin", &self.origin)
            .finish()
    }
}

impl<C: DraggableContainer, D: ActionDispatcher> TouchPipeline<C, D> {
    /// Create an unbound pipeline.
    #[must_use]
    pub fn new(arbiter: ArbiterConfig, swipe: SwipeConfig) -> Self {
        Self {
            arbiter: GestureArbiter::new(arbiter),
            swipe: SwipeActionController::new(swipe),
            origin: None,
        }
    }

    /// Bind every collaborator.
    pub fn bind(&mut self, container: C, host: Rc<dyn OrientationHost>, dispatcher: D) {
        self.arbiter.bind(container, host);
        self.swipe.bind(dispatcher);
    }

    /// The arbiter.
    #[must_use]
    pub fn arbiter(&self) -> &GestureArbiter<C> {
        &self.arbiter
    }

    /// The arbiter, mutably.
    pub fn arbiter_mut(&mut self) -> &mut GestureArbiter<C> {
        &mut self.arbiter
    }

    /// The row controller.
    #[must_use]
    pub fn swipe(&self) -> &SwipeActionController<D> {
        &self.swipe
    }

    /// The row controller, mutably.
    pub fn swipe_mut(&mut self) -> &mut SwipeActionController<D> {
        &mut self.swipe
    }

    /// Forward a measured viewport size to the arbiter.
    pub fn measured(&mut self, width: u32, height: u32) -> Result<()> {
        Ok(self.arbiter.measured(width, height)?)
    }

    /// Route one pointer sample through both components.
    pub fn on_pointer<R: RowHitTest + ?Sized>(
        &mut self,
        sample: &PointerSample,
        rows: &mut R,
    ) -> Result<Routing> {
        let routing = self.arbiter.on_pointer(sample)?;
        match routing {
            Routing::Content => self.drive_row(sample, rows)?,
            Routing::Intercepted => {
                tracing::debug!(message = "pipeline.intercepted", row = ?self.swipe.active_row());
                self.origin = None;
                self.swipe.cancel(rows)?;
            }
            Routing::Swallowed | Routing::Container | Routing::Relayed => {
                if sample.phase.is_terminal() {
                    self.origin = None;
                }
            }
        }
        Ok(routing)
    }

    /// The host's list started scrolling on its own.
    pub fn content_scrolled<R: RowSource + ?Sized>(&mut self, rows: &mut R) -> Result<()> {
        self.origin = None;
        Ok(self.swipe.cancel(rows)?)
    }

    /// The active row finished normalizing.
    pub fn normalized<R: RowSource + ?Sized>(&mut self, rows: &mut R) -> Result<Option<SwipeAction>> {
        Ok(self.swipe.normalized(rows)?)
    }

    /// Advance row animations by one frame.
    pub fn tick<R: RowSource + ?Sized>(&mut self, dt: Duration, rows: &mut R) -> Result<TickOutcome> {
        Ok(self.swipe.tick(dt, rows)?)
    }

    fn drive_row<R: RowHitTest + ?Sized>(&mut self, sample: &PointerSample, rows: &mut R) -> Result<()> {
        match sample.phase {
            PointerPhase::Down => {
                self.origin = Some(sample.position);
                if let Some(row) = rows.row_at(sample.position) {
                    self.swipe.begin(row, rows)?;
                }
            }
            PointerPhase::Move => {
                if let Some(origin) = self.origin {
                    let (dx, dy) = sample.position.delta_from(origin);
                    self.swipe.drag(dx, dy, rows)?;
                }
            }
            PointerPhase::Up => {
                self.origin = None;
                self.swipe.release(rows)?;
            }
            PointerPhase::Cancel => {
                self.origin = None;
                self.swipe.cancel(rows)?;
            }
        }
        Ok(())
    }
}
