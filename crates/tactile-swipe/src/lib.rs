#![forbid(unsafe_code)]

//! Per-row swipe actions.
//!
//! # Role in Tactile
//! `tactile-swipe` turns a horizontal drag on one list row into at most one
//! committed action (reply, share, or quick reaction) and drives the row's
//! visual offsets back to rest afterwards. It knows nothing about sibling
//! rows or the container the list lives in.
//!
//! # Primary responsibilities
//! - **Eligibility**: a capability gate evaluated before any geometry.
//! - **Availability**: which edges and actions a row exposes, mirrored for
//!   right-to-left layouts.
//! - **Threshold**: the commit distance for a row of a given width.
//! - **SwipeActionController**: the `Idle → Dragging → {Committing, Resetting}
//!   → Idle` state machine.

pub mod action;
pub mod availability;
pub mod config;
pub mod controller;
pub mod eligibility;
pub mod row;
pub mod threshold;

pub use action::{ActionDispatcher, ActionTarget, DeferredAction, SwipeAction};
pub use availability::{ActionAvailability, MovementFlags, Switches};
pub use config::{SwipeConfig, SwipeSettings};
pub use controller::{
    Axis, BeginOutcome, ReleaseOutcome, RowSwipeState, SwipeActionController, SwipePhase, TickOutcome,
};
pub use eligibility::{Eligibility, IneligibleReasons, SwipeContext};
pub use row::{MessageId, RowDescriptor, RowId, RowKind, RowSource, RowVisual};
pub use threshold::SwipeThreshold;
