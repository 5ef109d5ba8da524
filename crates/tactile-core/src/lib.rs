#![forbid(unsafe_code)]

//! Core: geometry, pointer samples, velocity, and frame-driven animation.
//!
//! # Role in Tactile
//! `tactile-core` is the leaf layer. It owns the shared vocabulary of the
//! gesture crates: density-independent distances, slop checks, logical swipe
//! edges that mirror under right-to-left layout, normalized pointer samples,
//! fling velocity estimation, and the cooperative animation primitives that
//! an external render loop advances one frame at a time.
//!
//! # How it fits in the system
//! `tactile-swipe` (per-row swipe actions) and `tactile-arbiter` (container
//! vs. content ownership) both build on these types. Neither crate knows
//! about the other; the `tactile` facade wires them together.

pub mod animation;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod pointer;
pub mod velocity;

pub use error::GestureError;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, error, info, trace, warn};
