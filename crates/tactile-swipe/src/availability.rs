#![forbid(unsafe_code)]

//! Which actions and directions a row exposes.
//!
//! Availability is derived, never stored: settings and chat state give the
//! list-wide [`Switches`], the row's own flags narrow them to an
//! [`ActionAvailability`], and the layout direction maps logical edges onto
//! physical [`MovementFlags`].

use bitflags::bitflags;
use tactile_core::geometry::{HorizontalDirection, LayoutDirection, SwipeEdge};

use crate::config::SwipeSettings;
use crate::eligibility::SwipeContext;
use crate::row::RowDescriptor;

/// List-wide action switches derived from settings and chat state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Switches {
    /// Reply gesture is on for this chat.
    pub can_drag_reply: bool,
    /// Share gesture is on for this chat.
    pub can_drag_share: bool,
    /// Quick reaction gesture is on for this chat.
    pub can_quick_react: bool,
}

impl Switches {
    /// Derive the switches.
    #[must_use]
    pub fn derive(settings: &SwipeSettings, ctx: &SwipeContext) -> Self {
        Self {
            can_drag_reply: settings.quick_reply && ctx.can_write_messages && !ctx.needs_tabs,
            can_drag_share: settings.quick_share && !ctx.is_secret_chat,
            can_quick_react: settings.quick_reaction
                && !ctx.needs_tabs
                && ctx.available_reactions > 0,
        }
    }
}

bitflags! {
    /// Logical actions a row offers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ActionAvailability: u8 {
        /// Reply (start edge).
        const REPLY       = 1 << 0;
        /// Share (end edge).
        const SHARE       = 1 << 1;
        /// Quick reaction (start edge, plus the downward pull).
        const QUICK_REACT = 1 << 2;
    }
}

impl ActionAvailability {
    /// Narrow the switches to what this row supports.
    #[must_use]
    pub fn for_row(switches: Switches, row: &RowDescriptor) -> Self {
        let mut avail = Self::empty();
        avail.set(Self::REPLY, switches.can_drag_reply && row.can_reply_to);
        avail.set(Self::SHARE, switches.can_drag_share && row.can_be_forwarded);
        avail.set(Self::QUICK_REACT, switches.can_quick_react);
        avail
    }

    /// Whether the given logical edge has anything to do.
    #[must_use]
    pub fn edge_enabled(self, edge: SwipeEdge) -> bool {
        match edge {
            SwipeEdge::Start => self.intersects(Self::REPLY | Self::QUICK_REACT),
            SwipeEdge::End => self.contains(Self::SHARE),
        }
    }
}

bitflags! {
    /// Physical directions a drag may travel.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MovementFlags: u8 {
        /// Leftward swipe.
        const LEFT  = 1 << 0;
        /// Rightward swipe.
        const RIGHT = 1 << 1;
        /// Downward pull (quick reaction).
        const DOWN  = 1 << 2;
    }
}

impl MovementFlags {
    /// Map availability onto physical directions.
    #[must_use]
    pub fn from_availability(avail: ActionAvailability, layout: LayoutDirection) -> Self {
        let mut flags = Self::empty();
        for edge in [SwipeEdge::Start, SwipeEdge::End] {
            if avail.edge_enabled(edge) {
                flags |= Self::horizontal(layout.direction_for(edge));
            }
        }
        if avail.contains(ActionAvailability::QUICK_REACT) {
            flags |= Self::DOWN;
        }
        flags
    }

    /// The flag for a horizontal direction.
    #[must_use]
    pub fn horizontal(direction: HorizontalDirection) -> Self {
        match direction {
            HorizontalDirection::Left => Self::LEFT,
            HorizontalDirection::Right => Self::RIGHT,
        }
    }

    /// Clamp a horizontal delta to the open directions.
    ///
    /// A drag toward a closed direction contributes no translation.
    #[must_use]
    pub fn clamp_dx(self, dx: f32) -> f32 {
        match HorizontalDirection::from_dx(dx) {
            Some(dir) if self.contains(Self::horizontal(dir)) => dx,
            _ => 0.0,
        }
    }
}
