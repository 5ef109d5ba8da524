#![forbid(unsafe_code)]

//! Container vs. content gesture ownership.
//!
//! # Role in Tactile
//! `tactile-arbiter` sits in front of a draggable container (a panel that
//! collapses, expands, or flings away) and its embedded scrollable list. It
//! sees every pointer sample first and decides, once per gesture, whether
//! the container drags or the list scrolls.
//!
//! # Primary responsibilities
//! - **GestureArbiter**: Down-time snapshot, slop resolution, container
//!   drag with nested-scroll handoff, fling detection on Up.
//! - **OrientationLock**: scoped acquisition of the host's orientation lock
//!   for the duration of a container drag.
//! - **DraggableContainer**: the narrow contract the container implements.

pub mod arbiter;
pub mod config;
pub mod container;
pub mod orientation;
pub mod session;

pub use arbiter::{GestureArbiter, Routing};
pub use config::ArbiterConfig;
pub use container::{ContainerSnapshot, DraggableContainer};
pub use orientation::{OrientationFlags, OrientationHost, OrientationLock};
pub use session::{GestureSession, Ownership};
