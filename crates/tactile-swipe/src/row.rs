#![forbid(unsafe_code)]

//! Row identity, capability records, and the row-visual contract.
//!
//! The controller never inspects a row's concrete type. The host describes
//! each row once with a [`RowDescriptor`] (a tagged [`RowKind`] plus the
//! capability flags the gate needs) and exposes its visual state through
//! [`RowVisual`].

/// Stable identifier of a list row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(pub u64);

/// Identifier of a message inside a chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(pub i64);

/// What a row renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowKind {
    /// A regular message (possibly a grouped album).
    Message,
    /// An administrative or system event rendered in the chat
    /// ("X joined", "title changed").
    ServiceMessage,
    /// The bot description card shown at the top of a bot chat.
    BotInfo,
    /// Any non-message list item (date separator, unread badge, loader).
    Other,
}

impl RowKind {
    /// Whether the row is a message-type row at all.
    #[must_use]
    pub fn is_message_type(self) -> bool {
        !matches!(self, Self::Other)
    }

    /// Whether the row is a message kind that never offers swipe actions.
    #[must_use]
    pub fn is_service(self) -> bool {
        matches!(self, Self::ServiceMessage | Self::BotInfo)
    }
}

/// Capability record for one row, computed once when the row becomes a
/// drag candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct RowDescriptor {
    /// Row identity.
    pub id: RowId,
    /// What the row renders.
    pub kind: RowKind,
    /// Owning chat; zero means the row is not addressable.
    pub chat_id: i64,
    /// Newest message of the row (replies and reactions target this one).
    pub newest_message: MessageId,
    /// Every message the row shows (shared together).
    pub messages: Vec<MessageId>,
    /// Row-level opt-in to swiping.
    pub can_swipe: bool,
    /// The message accepts replies.
    pub can_reply_to: bool,
    /// The message may be forwarded.
    pub can_be_forwarded: bool,
    /// The message is still being sent.
    pub is_pending: bool,
    /// The row draws in bubble style.
    pub uses_bubbles: bool,
    /// Measured width in pixels.
    pub width: f32,
}

impl RowDescriptor {
    /// A fully capable message row; tests and hosts adjust fields from here.
    #[must_use]
    pub fn message(id: RowId, chat_id: i64, message: MessageId, width: f32) -> Self {
        Self {
            id,
            kind: RowKind::Message,
            chat_id,
            newest_message: message,
            messages: vec![message],
            can_swipe: true,
            can_reply_to: true,
            can_be_forwarded: true,
            is_pending: false,
            uses_bubbles: false,
            width,
        }
    }
}

/// Visual state of a row, driven by the controller.
///
/// Implementations animate their own vertical reset and normalization; the
/// controller only issues the commands and waits for
/// [`SwipeActionController::normalized`](crate::SwipeActionController::normalized).
pub trait RowVisual {
    /// Set horizontal translation. `allow_overscroll` is true while the
    /// finger is down.
    fn translate(&mut self, dx: f32, allow_overscroll: bool);

    /// Set the vertical (quick-reaction) offset.
    fn translate_vertical(&mut self, dy: f32);

    /// Snap the vertical offset to zero.
    fn reset_vertical(&mut self);

    /// Animate the vertical offset to zero.
    fn smooth_reset_vertical(&mut self);

    /// Current horizontal translation as the visual sees it.
    fn current_translation(&self) -> f32;

    /// Whether the combined offset reached the quick-reaction zone.
    fn is_translated_enough_for_reaction(&self) -> bool;

    /// Settle any independent translation, then report back through
    /// `normalized()`. `deferred` is the action that will fire afterwards.
    fn normalize_and_run(&mut self, deferred: Option<crate::DeferredAction>);

    /// Finish the swipe-out translation and return to rest immediately.
    fn complete_translation(&mut self);
}

/// Host lookup from row id to its capability record and visual.
pub trait RowSource {
    /// Capability record of a row, `None` if the row is gone.
    fn descriptor(&self, id: RowId) -> Option<RowDescriptor>;

    /// Visual state of a row, `None` if the row is gone or recycled.
    fn visual(&mut self, id: RowId) -> Option<&mut dyn RowVisual>;
}
