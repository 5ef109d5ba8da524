#![forbid(unsafe_code)]

//! Swipe actions and the decision table that picks one.
//!
//! Both completion paths (the pre-commit hook and the full-threshold commit)
//! resolve through [`resolve`], so they can never disagree about which action
//! a gesture means. Deferred actions are plain data executed by [`fire`].

use tactile_core::geometry::SwipeEdge;

use crate::availability::ActionAvailability;
use crate::row::{MessageId, RowDescriptor, RowId};

/// The three committable actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwipeAction {
    /// React with the chat's quick reaction.
    QuickReact,
    /// Start a reply to the row's newest message.
    Reply,
    /// Share every message of the row.
    Share,
}

impl SwipeAction {
    /// Stable name for logs.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::QuickReact => "quick_react",
            Self::Reply => "reply",
            Self::Share => "share",
        }
    }
}

/// An action to run once the row has settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeferredAction {
    /// What to run.
    pub action: SwipeAction,
    /// Wait an extra delay after settling so the release animation reads.
    pub needs_delay: bool,
}

impl DeferredAction {
    /// Wrap an action; only share waits for the extra delay.
    #[must_use]
    pub fn new(action: SwipeAction) -> Self {
        Self {
            action,
            needs_delay: matches!(action, SwipeAction::Share),
        }
    }
}

/// What an action is applied to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionTarget {
    /// Row the gesture happened on.
    pub row: RowId,
    /// Owning chat.
    pub chat_id: i64,
    /// Newest message of the row.
    pub newest_message: MessageId,
    /// Every message of the row.
    pub messages: Vec<MessageId>,
}

impl From<&RowDescriptor> for ActionTarget {
    fn from(row: &RowDescriptor) -> Self {
        Self {
            row: row.id,
            chat_id: row.chat_id,
            newest_message: row.newest_message,
            messages: row.messages.clone(),
        }
    }
}

/// Executes committed actions. Fully external: sending, toggling, and UI.
pub trait ActionDispatcher {
    /// React to the target's newest message.
    fn trigger_quick_react(&mut self, target: &ActionTarget);

    /// Open a reply to the target's newest message.
    fn trigger_reply(&mut self, target: &ActionTarget);

    /// Share all of the target's messages.
    fn trigger_share(&mut self, target: &ActionTarget);
}

/// Pick the action for a swipe that ended on `edge`.
///
/// | Edge  | Condition                                         | Action     |
/// |-------|---------------------------------------------------|------------|
/// | Start | quick-react on and (translated enough or no reply) | QuickReact |
/// | Start | otherwise, reply on                               | Reply      |
/// | End   | share on                                          | Share      |
#[must_use]
pub fn resolve(
    edge: SwipeEdge,
    avail: ActionAvailability,
    translated_enough: bool,
) -> Option<SwipeAction> {
    let reply = avail.contains(ActionAvailability::REPLY);
    let react = avail.contains(ActionAvailability::QUICK_REACT);
    match edge {
        SwipeEdge::Start if react && (translated_enough || !reply) => Some(SwipeAction::QuickReact),
        SwipeEdge::Start if reply => Some(SwipeAction::Reply),
        SwipeEdge::End if avail.contains(ActionAvailability::SHARE) => Some(SwipeAction::Share),
        _ => None,
    }
}

/// Run `action` against `target`.
pub fn fire<D: ActionDispatcher + ?Sized>(
    dispatcher: &mut D,
    action: SwipeAction,
    target: &ActionTarget,
) {
    tracing::debug!(
        message = "swipe.dispatch",
        action = action.name(),
        row = target.row.0,
        chat_id = target.chat_id
    );
    match action {
        SwipeAction::QuickReact => dispatcher.trigger_quick_react(target),
        SwipeAction::Reply => dispatcher.trigger_reply(target),
        SwipeAction::Share => dispatcher.trigger_share(target),
    }
}
