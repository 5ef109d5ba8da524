#![forbid(unsafe_code)]

//! Tactile public facade crate.
//!
//! This crate provides the stable surface area for hosts. It re-exports the
//! common types of the gesture crates, wires them together in
//! [`TouchPipeline`], and offers a lightweight prelude.

pub mod error;
pub mod pipeline;

// --- Core re-exports -------------------------------------------------------

pub use tactile_core::GestureError;
pub use tactile_core::animation::{Animation, Delay, Spring};
pub use tactile_core::geometry::{
    Density, HorizontalDirection, LayoutDirection, Point, Size, SwipeEdge,
};
pub use tactile_core::pointer::{PointerPhase, PointerSample};
pub use tactile_core::velocity::VelocityTracker;

// --- Swipe re-exports ------------------------------------------------------

pub use tactile_swipe::{
    ActionAvailability, ActionDispatcher, ActionTarget, BeginOutcome, DeferredAction,
    IneligibleReasons, MessageId, MovementFlags, ReleaseOutcome, RowDescriptor, RowId, RowKind,
    RowSource, RowVisual, SwipeAction, SwipeActionController, SwipeConfig, SwipeContext,
    SwipePhase, SwipeSettings, TickOutcome,
};

// --- Arbiter re-exports ----------------------------------------------------

pub use tactile_arbiter::{
    ArbiterConfig, DraggableContainer, GestureArbiter, OrientationFlags, OrientationHost,
    OrientationLock, Routing,
};

// --- Facade ----------------------------------------------------------------

pub use error::{Error, Result};
pub use pipeline::{RowHitTest, TouchPipeline};

/// Convenience prelude.
pub mod prelude {
    pub use crate::{
        ActionDispatcher, ArbiterConfig, DraggableContainer, Error, OrientationHost, PointerSample,
        Result, Routing, RowDescriptor, RowHitTest, RowId, RowSource, RowVisual, SwipeConfig,
        SwipeContext, TouchPipeline,
    };

    pub use crate::{arbiter, core, swipe};
}

pub use tactile_arbiter as arbiter;
pub use tactile_core as core;
pub use tactile_swipe as swipe;
