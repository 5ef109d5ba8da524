#![forbid(unsafe_code)]

//! Logging re-exports.
//!
//! With the `tracing` feature enabled this module re-exports the `tracing`
//! macros so downstream crates can log through `tactile_core` without a
//! direct dependency. Without the feature it is empty.

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, error, info, info_span, trace, trace_span, warn};
