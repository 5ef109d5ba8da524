//! Property-based invariants for the row swipe controller.
//!
//! 1. **Exclusive dispatch**: any event sequence within one gesture fires
//!    at most one action.
//! 2. **Gate totality**: a row that fails the gate is never translated and
//!    never dispatched, whatever the drag does.
//! 3. **Rest after reset**: once the controller is back to Idle, the row's
//!    horizontal translation is exactly 0.
//! 4. **Threshold**: a single horizontal drag commits iff it covers the
//!    threshold toward an open edge.

use std::collections::HashMap;
use std::time::Duration;

use proptest::prelude::*;
use tactile_swipe::{
    ActionDispatcher, ActionTarget, BeginOutcome, DeferredAction, MessageId, ReleaseOutcome,
    RowDescriptor, RowId, RowKind, RowSource, RowVisual, SwipeAction, SwipeActionController,
    SwipeConfig, SwipeContext, SwipePhase, SwipeSettings,
};

// ── Fakes ───────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct Visual {
    x: f32,
    y: f32,
    translated_enough: bool,
}

impl RowVisual for Visual {
    fn translate(&mut self, dx: f32, _allow_overscroll: bool) {
        self.x = dx;
    }
    fn translate_vertical(&mut self, dy: f32) {
        self.y = dy;
    }
    fn reset_vertical(&mut self) {
        self.y = 0.0;
    }
    fn smooth_reset_vertical(&mut self) {
        self.y = 0.0;
    }
    fn current_translation(&self) -> f32 {
        self.x
    }
    fn is_translated_enough_for_reaction(&self) -> bool {
        self.translated_enough
    }
    fn normalize_and_run(&mut self, _deferred: Option<DeferredAction>) {
        self.x = 0.0;
        self.y = 0.0;
    }
    fn complete_translation(&mut self) {
        self.x = 0.0;
    }
}

#[derive(Default)]
struct Rows(HashMap<RowId, (RowDescriptor, Visual)>);

impl RowSource for Rows {
    fn descriptor(&self, id: RowId) -> Option<RowDescriptor> {
        self.0.get(&id).map(|(d, _)| d.clone())
    }
    fn visual(&mut self, id: RowId) -> Option<&mut dyn RowVisual> {
        self.0.get_mut(&id).map(|(_, v)| v as &mut dyn RowVisual)
    }
}

#[derive(Debug, Default)]
struct Count(Vec<SwipeAction>);

impl ActionDispatcher for Count {
    fn trigger_quick_react(&mut self, _: &ActionTarget) {
        self.0.push(SwipeAction::QuickReact);
    }
    fn trigger_reply(&mut self, _: &ActionTarget) {
        self.0.push(SwipeAction::Reply);
    }
    fn trigger_share(&mut self, _: &ActionTarget) {
        self.0.push(SwipeAction::Share);
    }
}

const ROW: RowId = RowId(9);
const FRAME: Duration = Duration::from_millis(16);

fn setup(row: RowDescriptor, settings: SwipeSettings) -> (SwipeActionController<Count>, Rows) {
    let mut c = SwipeActionController::new(SwipeConfig::default().with_settings(settings));
    c.set_context(SwipeContext {
        available_reactions: 2,
        ..SwipeContext::default()
    });
    c.bind(Count::default());
    let mut rows = Rows::default();
    rows.0.insert(row.id, (row, Visual::default()));
    (c, rows)
}

fn fired(c: &SwipeActionController<Count>) -> usize {
    c.dispatcher().map_or(0, |d| d.0.len())
}

// ── Strategies ──────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Op {
    Drag(f32, f32),
    Release,
    Cancel,
    Tick,
    Normalized,
    ReachReactionZone,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (-600.0f32..600.0, -200.0f32..200.0).prop_map(|(dx, dy)| Op::Drag(dx, dy)),
        1 => Just(Op::Release),
        1 => Just(Op::Cancel),
        2 => Just(Op::Tick),
        1 => Just(Op::Normalized),
        1 => Just(Op::ReachReactionZone),
    ]
}

fn settings() -> impl Strategy<Value = SwipeSettings> {
    (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(r, s, q)| SwipeSettings {
        quick_reply: r,
        quick_share: s,
        quick_reaction: q,
    })
}

fn apply(c: &mut SwipeActionController<Count>, rows: &mut Rows, op: &Op) {
    match *op {
        Op::Drag(dx, dy) => c.drag(dx, dy, rows).unwrap(),
        Op::Release => {
            c.release(rows).unwrap();
        }
        Op::Cancel => c.cancel(rows).unwrap(),
        Op::Tick => {
            c.tick(FRAME, rows).unwrap();
        }
        Op::Normalized => {
            c.normalized(rows).unwrap();
        }
        Op::ReachReactionZone => {
            if let Some((_, v)) = rows.0.get_mut(&ROW) {
                v.translated_enough = true;
            }
        }
    }
}

proptest! {
    #[test]
    fn one_gesture_fires_at_most_once(
        settings in settings(),
        bubbles in any::<bool>(),
        ops in prop::collection::vec(op(), 0..40),
    ) {
        let mut row = RowDescriptor::message(ROW, 1, MessageId(3), 420.0);
        row.uses_bubbles = bubbles;
        let (mut c, mut rows) = setup(row, settings);
        c.begin(ROW, &mut rows).unwrap();
        for op in &ops {
            apply(&mut c, &mut rows, op);
        }
        // Drain anything still pending.
        c.normalized(&mut rows).unwrap();
        for _ in 0..100 {
            c.tick(FRAME, &mut rows).unwrap();
        }
        prop_assert!(fired(&c) <= 1, "fired {:?}", c.dispatcher().map(|d| &d.0));
    }

    #[test]
    fn ineligible_row_is_inert(
        kind in prop_oneof![
            Just(RowKind::ServiceMessage),
            Just(RowKind::BotInfo),
            Just(RowKind::Other),
        ],
        ops in prop::collection::vec(op(), 0..40),
    ) {
        let mut row = RowDescriptor::message(ROW, 1, MessageId(3), 420.0);
        row.kind = kind;
        let (mut c, mut rows) = setup(row, SwipeSettings::default());
        let began = c.begin(ROW, &mut rows).unwrap();
        prop_assert!(matches!(began, BeginOutcome::Rejected(_)), "{began:?}");
        for op in &ops {
            apply(&mut c, &mut rows, op);
        }
        prop_assert_eq!(c.phase(), SwipePhase::Idle);
        prop_assert_eq!(fired(&c), 0);
        prop_assert_eq!(rows.0[&ROW].1.x, 0.0);
    }

    #[test]
    fn idle_means_at_rest(
        settings in settings(),
        ops in prop::collection::vec(op(), 0..40),
    ) {
        let row = RowDescriptor::message(ROW, 1, MessageId(3), 420.0);
        let (mut c, mut rows) = setup(row, settings);
        c.begin(ROW, &mut rows).unwrap();
        for op in &ops {
            apply(&mut c, &mut rows, op);
        }
        c.cancel(&mut rows).unwrap();
        c.normalized(&mut rows).unwrap();
        for _ in 0..200 {
            c.tick(FRAME, &mut rows).unwrap();
        }
        prop_assert_eq!(c.phase(), SwipePhase::Idle);
        prop_assert_eq!(rows.0[&ROW].1.x, 0.0);
    }

    #[test]
    fn single_drag_commits_iff_threshold_met(dx in -500.0f32..500.0) {
        let row = RowDescriptor::message(ROW, 1, MessageId(3), 420.0);
        let (mut c, mut rows) = setup(row, SwipeSettings::default());
        c.begin(ROW, &mut rows).unwrap();
        c.drag(dx, 0.0, &mut rows).unwrap();
        let out = c.release(&mut rows).unwrap();
        let expected_commit = dx.abs() >= 124.0;
        match out {
            ReleaseOutcome::Committed(Some(action)) => {
                prop_assert!(expected_commit);
                let want = if dx < 0.0 { SwipeAction::Reply } else { SwipeAction::Share };
                prop_assert_eq!(action, want);
            }
            ReleaseOutcome::Reset => prop_assert!(!expected_commit),
            other => prop_assert!(false, "unexpected {other:?}"),
        }
    }
}
