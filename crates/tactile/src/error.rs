#![forbid(unsafe_code)]

//! Top-level error type.

use tactile_core::GestureError;
use thiserror::Error;

/// Errors surfaced by the Tactile facade.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A gesture component was driven before its collaborators were bound.
    #[error("gesture wiring: {0}")]
    Gesture(#[from] GestureError),
}

impl Error {
    /// Name of the missing collaborator, if that is the cause.
    #[must_use]
    pub fn missing_collaborator(&self) -> Option<&'static str> {
        match self {
            Self::Gesture(GestureError::Unbound { collaborator }) => Some(*collaborator),
        }
    }
}

/// Standard result type for Tactile APIs.
pub type Result<T> = std::result::Result<T, Error>;
