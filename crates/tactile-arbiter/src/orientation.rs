#![forbid(unsafe_code)]

//! Scoped orientation lock.
//!
//! The host keeps a process-wide set of reasons to hold the screen
//! orientation. A gesture that drags the container adds its reason for the
//! duration of the drag through an [`OrientationLock`] guard.
//!
//! # Invariants
//!
//! 1. Every `set_orientation_lock(flag, true)` issued by a guard is followed
//!    by exactly one `set_orientation_lock(flag, false)`, on whatever path
//!    the guard is dropped.
//!
//! # Failure Modes
//!
//! - A panic that unwinds through the owner still drops the guard and
//!   releases the flag.

use std::fmt;
use std::rc::Rc;

use bitflags::bitflags;

bitflags! {
    /// Reasons the host may hold the screen orientation.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct OrientationFlags: u32 {
        /// A finger drags the media panel.
        const TOUCHING_MEDIA_PANEL = 1 << 0;
        /// A finger drags some other draggable container.
        const TOUCHING_CONTAINER   = 1 << 1;
    }
}

/// The host side of the orientation lock.
///
/// Takes `&self`: the lock state is process-wide and shared by every
/// component that can hold it.
pub trait OrientationHost {
    /// Add or remove `flag` from the set of held reasons.
    fn set_orientation_lock(&self, flag: OrientationFlags, enabled: bool);
}

/// Holds one orientation flag until dropped.
#[must_use = "dropping the guard releases the orientation lock immediately"]
pub struct OrientationLock {
    host: Rc<dyn OrientationHost>,
    flag: OrientationFlags,
}

impl OrientationLock {
    /// Acquire `flag` on `host`.
    pub fn acquire(host: Rc<dyn OrientationHost>, flag: OrientationFlags) -> Self {
        host.set_orientation_lock(flag, true);
        tracing::trace!(message = "orientation.lock", flag = flag.bits());
        Self { host, flag }
    }

    /// The held flag.
    #[must_use]
    pub fn flag(&self) -> OrientationFlags {
        self.flag
    }
}

impl Drop for OrientationLock {
    fn drop(&mut self) {
        self.host.set_orientation_lock(self.flag, false);
        tracing::trace!(message = "orientation.unlock", flag = self.flag.bits());
    }
}

impl fmt::Debug for OrientationLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrientationLock")
            .field("flag", &self.flag)
            .finish()
    }
}
