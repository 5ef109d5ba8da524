//! Invariants that must survive arbitrary pointer storms through the full
//! pipeline.
//!
//! 1. **Pairing**: every `on_drag_started` is matched by `on_drag_finished`
//!    and every orientation lock is released, with at most one held at once.
//! 2. **At most one action per gesture**: dispatched actions never outnumber
//!    Down samples.
//! 3. **Rest**: once animations settle, every row is back at zero offset and
//!    the row controller is idle.
//! 4. **Determinism**: the same seed produces the same call log.

use std::time::Duration;

use proptest::prelude::*;
use tactile::{PointerPhase, PointerSample, Size, SwipePhase};
use tactile_harness::Rig;
use tactile_harness::pointer_storm::{StormConfig, StormPattern, generate_storm};
use tactile_harness::recording::{Call, RecordingContainer};
use web_time::Instant;

fn storm(pattern: StormPattern, seed: u64, t0: Instant) -> Vec<PointerSample> {
    let storm = generate_storm(&StormConfig::new(pattern, seed, Size::new(400, 700)), t0);
    let mut samples = storm.samples;
    // Close whatever the storm left open.
    if let Some(last) = samples.last().copied() {
        if !last.phase.is_terminal() {
            samples.push(PointerSample::cancel(
                last.x(),
                last.y(),
                last.timestamp + Duration::from_millis(8),
            ));
        }
    }
    samples
}

fn pattern() -> impl Strategy<Value = StormPattern> {
    (1usize..40).prop_flat_map(|gestures| {
        prop_oneof![
            Just(StormPattern::Taps { gestures }),
            Just(StormPattern::VerticalDrags { gestures }),
            Just(StormPattern::HorizontalSwipes { gestures }),
            Just(StormPattern::Mixed { gestures }),
        ]
    })
}

fn container() -> impl Strategy<Value = (bool, i32, bool, Option<f32>)> {
    (
        prop::bool::weighted(0.8),
        prop_oneof![3 => Just(0), 1 => 1..200i32],
        prop::bool::weighted(0.1),
        prop::option::of(20.0f32..200.0),
    )
}

proptest! {
    #[test]
    fn storms_keep_the_collaborators_balanced(
        pattern in pattern(),
        seed in any::<u64>(),
        (can_drag, offset, ignore_one, limit) in container(),
    ) {
        let mut rig = Rig::with(
            |log| {
                let mut c = RecordingContainer::new(log).scrolled(offset);
                c.can_drag = can_drag;
                c.ignore_one = ignore_one;
                c.expand_limit = limit;
                c
            },
            Default::default(),
        );
        let samples = storm(pattern, seed, Instant::now());
        rig.feed_all(&samples);

        let started = rig.log.count(|c| *c == Call::DragStarted);
        let finished = rig.log.count(|c| *c == Call::DragFinished);
        prop_assert_eq!(started, finished);
        prop_assert_eq!(rig.host.held(), 0);
        prop_assert!(rig.host.peak() <= 1);
        if offset != 0 || !can_drag {
            prop_assert_eq!(started, 0);
        }

        let downs = samples.iter().filter(|s| s.phase == PointerPhase::Down).count();
        prop_assert!(rig.log.actions().len() <= downs);

        rig.settle();
        prop_assert!(rig.list.all_at_rest());
        prop_assert_eq!(rig.pipeline.swipe().phase(), SwipePhase::Idle);
        prop_assert!(rig.pipeline.arbiter().session().is_none());
    }

    #[test]
    fn same_seed_same_call_log(seed in any::<u64>()) {
        let t0 = Instant::now();
        let run = || {
            let mut rig = Rig::new();
            rig.feed_all(&storm(StormPattern::Mixed { gestures: 25 }, seed, t0));
            rig.settle();
            rig.log.calls()
        };
        prop_assert_eq!(run(), run());
    }
}

#[test]
fn mixed_storm_exercises_every_routing() {
    let mut rig = Rig::new();
    let samples = storm(StormPattern::Mixed { gestures: 200 }, 0x5eed, Instant::now());
    let routings = rig.feed_all(&samples);
    for wanted in [tactile::Routing::Content, tactile::Routing::Intercepted, tactile::Routing::Container] {
        assert!(routings.contains(&wanted), "no {wanted:?} in a 200-gesture storm");
    }
    assert!(!rig.log.actions().is_empty());
}
