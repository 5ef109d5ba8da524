#![forbid(unsafe_code)]

//! Error type shared by the gesture crates.
//!
//! Gesture processing is total over its inputs; the only error is a wiring
//! bug upstream, where an event arrives before the component's collaborators
//! were bound.

use thiserror::Error;

/// Errors raised by gesture components.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GestureError {
    /// An event arrived before the named collaborator was bound.
    #[error("{collaborator} is not bound; call bind() before delivering events")]
    Unbound {
        /// Which collaborator is missing.
        collaborator: &'static str,
    },
}

impl GestureError {
    /// Shorthand for [`GestureError::Unbound`].
    #[must_use]
    pub const fn unbound(collaborator: &'static str) -> Self {
        Self::Unbound { collaborator }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbound_message_names_collaborator() {
        let err = GestureError::unbound("container");
        assert_eq!(
            err.to_string(),
            "container is not bound; call bind() before delivering events"
        );
    }
}
