#![no_main]

use std::time::Duration;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tactile::{PointerPhase, PointerSample, SwipeConfig, SwipePhase};
use tactile_harness::Rig;
use tactile_harness::recording::{Call, RecordingContainer};
use web_time::Instant;

#[derive(Debug, Arbitrary)]
struct Panel {
    can_drag: bool,
    animating: bool,
    ignore_one: bool,
    scroll_offset: u8,
    expand_limit: Option<u8>,
}

#[derive(Debug, Arbitrary)]
enum Op {
    Sample { phase: u8, x: i16, y: i16, gap_ms: u8 },
    ContentScrolled,
    Normalized,
    Tick { ms: u8 },
}

#[derive(Debug, Arbitrary)]
struct Input {
    panel: Panel,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    let panel = input.panel;
    let mut rig = Rig::with(
        |log| {
            let mut c = RecordingContainer::new(log).scrolled(i32::from(panel.scroll_offset));
            c.can_drag = panel.can_drag;
            c.animating = panel.animating;
            c.ignore_one = panel.ignore_one;
            c.expand_limit = panel.expand_limit.map(f32::from);
            c
        },
        SwipeConfig::default(),
    );

    let mut now = Instant::now();
    let mut downs = 0usize;
    for op in input.ops.iter().take(512) {
        match *op {
            Op::Sample { phase, x, y, gap_ms } => {
                now += Duration::from_millis(u64::from(gap_ms));
                let phase = match phase % 4 {
                    0 => PointerPhase::Down,
                    1 => PointerPhase::Move,
                    2 => PointerPhase::Up,
                    _ => PointerPhase::Cancel,
                };
                downs += usize::from(phase == PointerPhase::Down);
                rig.feed(&PointerSample::new(phase, f32::from(x), f32::from(y), now));
            }
            Op::ContentScrolled => {
                rig.pipeline.content_scrolled(&mut rig.list).unwrap();
            }
            Op::Normalized => {
                rig.pipeline.normalized(&mut rig.list).unwrap();
            }
            Op::Tick { ms } => {
                rig.pipeline
                    .tick(Duration::from_millis(u64::from(ms)), &mut rig.list)
                    .unwrap();
            }
        }
        assert!(rig.host.held() <= 1, "more than one orientation lock held");
    }

    // Close any open session, then let everything settle.
    now += Duration::from_millis(8);
    rig.feed(&PointerSample::cancel(0.0, 0.0, now));
    rig.settle();

    let started = rig.log.count(|c| *c == Call::DragStarted);
    let finished = rig.log.count(|c| *c == Call::DragFinished);
    assert_eq!(started, finished, "unpaired drag callbacks");
    assert_eq!(rig.host.held(), 0, "orientation lock leaked");
    assert!(rig.log.actions().len() <= downs, "more actions than gestures");
    assert!(rig.list.all_at_rest(), "row left displaced");
    assert_eq!(rig.pipeline.swipe().phase(), SwipePhase::Idle);
});
