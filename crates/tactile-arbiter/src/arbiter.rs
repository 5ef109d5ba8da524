#![forbid(unsafe_code)]

//! Container vs. content arbitration.
//!
//! [`GestureArbiter`] is the single entry point for pointer samples on a
//! draggable container that embeds a scrollable list. For every sample it
//! reports a [`Routing`] telling the caller who consumed it.
//!
//! # State Machine
//!
//! ```text
//! Down ─┬─ animating ───────────────────────────────▶ Swallowed until Up/Cancel
//!       └─ Undecided ──slop, candidate, offset 0────▶ Container ─┬─ moving
//!              │                                                 └─ scrolling (nested)
//!              └──slop otherwise─────────────────────▶ Content
//! ```
//!
//! # Invariants
//!
//! 1. Ownership is resolved at most once per session and never revisited.
//! 2. A session whose Down-time scroll offset was non-zero never resolves to
//!    the container.
//! 3. `on_drag_started` / `on_drag_finished` are paired 1:1 for every session
//!    that resolved to the container, including block-touch sessions and
//!    sessions aborted by a stray Down or by dropping the arbiter.
//! 4. The orientation lock is held exactly while a container drag is live.
//! 5. Every sample yields exactly one [`Routing`]; the arbiter relays a
//!    sample to the content at most once.
//!
//! # Failure Modes
//!
//! - Event before [`bind`](GestureArbiter::bind): `GestureError::Unbound`.
//! - Move/Up/Cancel without a Down: routed to the content untouched.
//! - Down while a session is live: the old session is aborted first.

use std::rc::Rc;

use tactile_core::GestureError;
use tactile_core::geometry::{Size, exceeds_slop};
use tactile_core::pointer::{PointerPhase, PointerSample};

use crate::config::ArbiterConfig;
use crate::container::{ContainerSnapshot, DraggableContainer};
use crate::orientation::{OrientationHost, OrientationLock};
use crate::session::{ContainerDrag, GestureSession, NestedScroll, Resolution};

/// Who consumed a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routing {
    /// The container is animating; nobody sees the sample.
    Swallowed,
    /// The caller delivers the sample to the content's native pipeline.
    Content,
    /// Ownership moved to the container on this sample; the caller sends the
    /// content a Cancel.
    Intercepted,
    /// The container drag consumed the sample.
    Container,
    /// The arbiter forwarded the sample through `dispatch_to_content`.
    Relayed,
}

impl Routing {
    /// Whether the caller must deliver the sample to the content itself.
    #[must_use]
    pub fn reaches_content(self) -> bool {
        matches!(self, Self::Content)
    }
}

struct Bound<C> {
    container: C,
    host: Rc<dyn OrientationHost>,
}

/// Decides, per gesture, whether the container or its content owns movement.
///
/// Construct with [`new`](Self::new), then [`bind`](Self::bind) the
/// container and orientation host before delivering samples.
pub struct GestureArbiter<C: DraggableContainer> {
    config: ArbiterConfig,
    bound: Option<Bound<C>>,
    session: Option<GestureSession>,
    last_measured: Option<Size>,
}

impl<C: DraggableContainer> std::fmt::Debug for GestureArbiter<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureArbiter")
            .field("bound", &self.bound.is_some())
            .field("session", &self.session)
            .field("last_measured", &self.last_measured)
            .finish()
    }
}

impl<C: DraggableContainer> GestureArbiter<C> {
    /// Create an unbound arbiter.
    #[must_use]
    pub fn new(config: ArbiterConfig) -> Self {
        Self {
            config,
            bound: None,
            session: None,
            last_measured: None,
        }
    }

    /// Bind the collaborators.
    pub fn bind(&mut self, container: C, host: Rc<dyn OrientationHost>) {
        self.bound = Some(Bound { container, host });
    }

    /// Whether collaborators are bound.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.bound.is_some()
    }

    /// Configuration.
    #[must_use]
    pub fn config(&self) -> &ArbiterConfig {
        &self.config
    }

    /// The bound container.
    #[must_use]
    pub fn container(&self) -> Option<&C> {
        self.bound.as_ref().map(|b| &b.container)
    }

    /// The bound container, mutably.
    pub fn container_mut(&mut self) -> Option<&mut C> {
        self.bound.as_mut().map(|b| &mut b.container)
    }

    /// The live session, if a Down has not yet been terminated.
    #[must_use]
    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    /// Report the measured viewport size; the container hears only changes.
    pub fn measured(&mut self, width: u32, height: u32) -> Result<(), GestureError> {
        let size = Size::new(width, height);
        let bound = self.bound.as_mut().ok_or_else(unbound)?;
        if self.last_measured != Some(size) {
            bound.container.viewport_changed(width, height);
            self.last_measured = Some(size);
        }
        Ok(())
    }

    /// Route one pointer sample.
    pub fn on_pointer(&mut self, sample: &PointerSample) -> Result<Routing, GestureError> {
        if self.bound.is_none() {
            return Err(unbound());
        }
        let routing = match sample.phase {
            PointerPhase::Down => self.on_down(sample),
            PointerPhase::Move => self.on_move(sample),
            PointerPhase::Up => self.on_end(sample, true),
            PointerPhase::Cancel => self.on_end(sample, false),
        };
        tracing::trace!(
            message = "arbiter.route",
            phase = ?sample.phase,
            y = sample.y(),
            routing = ?routing
        );
        Ok(routing)
    }

    // -- Phases -------------------------------------------------------------

    fn on_down(&mut self, sample: &PointerSample) -> Routing {
        if self.session.is_some() {
            tracing::warn!(message = "arbiter.stray_down", y = sample.y());
            self.abort_session();
        }
        let Some(bound) = self.bound.as_ref() else {
            return Routing::Content;
        };
        let snapshot = ContainerSnapshot::capture(&bound.container, sample.position);
        tracing::debug!(
            message = "arbiter.down",
            animating = snapshot.is_animating,
            should_intercept = snapshot.should_intercept(),
            block_touch = snapshot.should_ignore_one_drag,
            scroll_offset = snapshot.content_scroll_offset
        );
        self.session = Some(GestureSession::begin(sample, snapshot));
        if snapshot.is_animating {
            Routing::Swallowed
        } else {
            Routing::Content
        }
    }

    fn on_move(&mut self, sample: &PointerSample) -> Routing {
        let slop = self.config.touch_slop();
        let lock_flag = self.config.lock_flag;
        let (Some(session), Some(bound)) = (self.session.as_mut(), self.bound.as_mut()) else {
            return Routing::Content;
        };
        session.record(sample);
        let y = sample.y();
        let step = y - session.last_y;
        session.last_y = y;

        if session.snapshot.is_animating {
            return Routing::Swallowed;
        }

        match session.resolution {
            Resolution::Content => Routing::Content,
            Resolution::Undecided => {
                if !exceeds_slop(y - session.start.y, slop) {
                    return Routing::Content;
                }
                if session.snapshot.should_intercept() && session.snapshot.content_scroll_offset == 0 {
                    bound.container.on_drag_started();
                    let lock = OrientationLock::acquire(bound.host.clone(), lock_flag);
                    session.resolution = Resolution::Container(ContainerDrag {
                        intercept_start_y: y,
                        scrolling: None,
                        _lock: lock,
                    });
                    tracing::debug!(message = "arbiter.intercept", y, start_y = session.start.y);
                    Routing::Intercepted
                } else {
                    session.resolution = Resolution::Content;
                    tracing::debug!(
                        message = "arbiter.delegate",
                        candidate = session.snapshot.should_intercept(),
                        scroll_offset = session.snapshot.content_scroll_offset
                    );
                    Routing::Content
                }
            }
            Resolution::Container(ref mut drag) => {
                if session.snapshot.should_ignore_one_drag {
                    bound.container.dispatch_to_content(sample);
                    return Routing::Relayed;
                }
                drag_container(&mut bound.container, drag, sample, step)
            }
        }
    }

    fn on_end(&mut self, sample: &PointerSample, is_up: bool) -> Routing {
        let fling_threshold = self.config.fling_threshold();
        let Some(mut session) = self.session.take() else {
            return Routing::Content;
        };
        let Some(bound) = self.bound.as_mut() else {
            return Routing::Content;
        };
        session.record(sample);
        if session.snapshot.is_animating {
            return Routing::Swallowed;
        }
        let Resolution::Container(drag) = session.resolution else {
            return Routing::Content;
        };

        let block_touch = session.snapshot.should_ignore_one_drag;
        if is_up && !block_touch {
            let (_, vy) = session.velocity.velocity();
            if vy.abs() > fling_threshold {
                let handled = bound.container.on_fling_handled(vy < 0.0);
                tracing::debug!(message = "arbiter.fling", vy, upward = vy < 0.0, handled);
            }
        }
        let relay = block_touch || drag.scrolling.is_some();
        if relay {
            bound.container.dispatch_to_content(sample);
        }
        bound.container.on_drag_finished();
        drop(drag);
        tracing::debug!(message = "arbiter.finish", up = is_up, relayed = relay);
        if relay {
            Routing::Relayed
        } else {
            Routing::Container
        }
    }

    /// End the live session without a terminating sample.
    fn abort_session(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        if let (Resolution::Container(drag), Some(bound)) = (session.resolution, self.bound.as_mut()) {
            bound.container.on_drag_finished();
            drop(drag);
            tracing::debug!(message = "arbiter.abort");
        }
    }
}

fn unbound() -> GestureError {
    tracing::error!(message = "arbiter.unbound", collaborator = "container");
    GestureError::unbound("container")
}

/// Apply one Move to a live container drag.
fn drag_container<C: DraggableContainer>(
    container: &mut C,
    drag: &mut ContainerDrag,
    sample: &PointerSample,
    step: f32,
) -> Routing {
    let y = sample.y();
    if let Some(nested) = drag.scrolling {
        if nested.continues(y) {
            container.dispatch_to_content(sample);
            return Routing::Relayed;
        }
        container.force_scroll_content_to_top();
        drag.scrolling = None;
        tracing::debug!(message = "arbiter.scroll_reversed", y, start_y = nested.start_y);
    }
    if container.move_by(y - drag.intercept_start_y) {
        drag.scrolling = Some(NestedScroll {
            start_y: y,
            upward: step <= 0.0,
        });
        tracing::debug!(message = "arbiter.scroll_nested", y, upward = step <= 0.0);
        container.dispatch_to_content(sample);
        return Routing::Relayed;
    }
    Routing::Container
}

impl<C: DraggableContainer> Drop for GestureArbiter<C> {
    fn drop(&mut self) {
        self.abort_session();
    }
}
