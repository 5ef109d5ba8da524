#![forbid(unsafe_code)]

//! Capability gate.
//!
//! A row is swipeable only when every host-level and row-level condition
//! holds. The gate runs before any geometry: a row that fails it reports no
//! movement directions and no drag on it is ever recognized.
//!
//! # Invariants
//!
//! 1. `swipeable == reasons.is_empty()`.
//! 2. Evaluation is total; inconsistent records (e.g. a swipeable row with a
//!    zero chat id) fail the gate instead of reaching a dispatcher.

use bitflags::bitflags;
use tactile_core::geometry::LayoutDirection;

use crate::row::RowDescriptor;

/// Host-level state shared by every row in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwipeContext {
    /// The list is in multi-select mode.
    pub in_select_mode: bool,
    /// The hosting screen allows swipe navigation.
    pub navigation_available: bool,
    /// The user may post in this chat.
    pub can_write_messages: bool,
    /// The chat renders with tabs (reply and react gestures are disabled).
    pub needs_tabs: bool,
    /// Secret chats never allow sharing.
    pub is_secret_chat: bool,
    /// Number of reactions the chat exposes.
    pub available_reactions: usize,
    /// Text direction.
    pub layout_direction: LayoutDirection,
    /// The whole list draws in bubble style.
    pub bubble_mode: bool,
}

impl Default for SwipeContext {
    fn default() -> Self {
        Self {
            in_select_mode: false,
            navigation_available: true,
            can_write_messages: true,
            needs_tabs: false,
            is_secret_chat: false,
            available_reactions: 0,
            layout_direction: LayoutDirection::Ltr,
            bubble_mode: false,
        }
    }
}

bitflags! {
    /// Every reason a row failed the gate.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct IneligibleReasons: u8 {
        /// The list is in multi-select mode.
        const SELECT_MODE         = 1 << 0;
        /// The hosting screen does not allow swipe navigation.
        const NO_NAVIGATION       = 1 << 1;
        /// The row is not a message.
        const NOT_A_MESSAGE       = 1 << 2;
        /// The row opted out of swiping.
        const ROW_DISALLOWS_SWIPE = 1 << 3;
        /// Administrative/system row or bot card.
        const SERVICE_ROW         = 1 << 4;
        /// The message is still being sent.
        const PENDING             = 1 << 5;
        /// The row has no addressable chat.
        const NO_CHAT             = 1 << 6;
    }
}

/// Result of the gate for one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Eligibility {
    /// Whether the row may be swiped.
    pub swipeable: bool,
    /// Why not, when it may not.
    pub reasons: IneligibleReasons,
}

impl Eligibility {
    /// Evaluate the gate.
    #[must_use]
    pub fn evaluate(row: &RowDescriptor, ctx: &SwipeContext) -> Self {
        let mut reasons = IneligibleReasons::empty();
        reasons.set(IneligibleReasons::SELECT_MODE, ctx.in_select_mode);
        reasons.set(IneligibleReasons::NO_NAVIGATION, !ctx.navigation_available);
        reasons.set(IneligibleReasons::NOT_A_MESSAGE, !row.kind.is_message_type());
        reasons.set(IneligibleReasons::ROW_DISALLOWS_SWIPE, !row.can_swipe);
        reasons.set(IneligibleReasons::SERVICE_ROW, row.kind.is_service());
        reasons.set(IneligibleReasons::PENDING, row.is_pending);
        reasons.set(IneligibleReasons::NO_CHAT, row.chat_id == 0);
        Self {
            swipeable: reasons.is_empty(),
            reasons,
        }
    }
}
