#![forbid(unsafe_code)]

//! Deterministic pointer storms for stress-testing the touch pipeline.
//!
//! # Patterns
//!
//! | Pattern | Description |
//! |---------|-------------|
//! | [`StormPattern::Taps`] | Down/Up pairs with sub-slop jitter |
//! | [`StormPattern::VerticalDrags`] | Long vertical drags, both directions, with reversals |
//! | [`StormPattern::HorizontalSwipes`] | Row swipes of random length toward either edge |
//! | [`StormPattern::Mixed`] | All of the above plus Cancels and unterminated gestures |
//!
//! # JSONL Schema
//!
//! ```json
//! {"event":"storm_start","pattern":"mixed","seed":7,"sample_count":120}
//! {"event":"storm_inject","idx":0,"phase":"down","x":12.0,"y":340.0,"offset_ms":0}
//! {"event":"storm_complete","gestures":9,"sample_count":120}
//! ```

use std::time::Duration;

use tactile::{PointerPhase, PointerSample, Size};
use web_time::Instant;

/// Milliseconds between consecutive samples.
const FRAME_MS: u64 = 8;

/// Pattern type for storm generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StormPattern {
    Taps { gestures: usize },
    VerticalDrags { gestures: usize },
    HorizontalSwipes { gestures: usize },
    Mixed { gestures: usize },
}

impl StormPattern {
    /// Pattern name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Taps { .. } => "taps",
            Self::VerticalDrags { .. } => "vertical_drags",
            Self::HorizontalSwipes { .. } => "horizontal_swipes",
            Self::Mixed { .. } => "mixed",
        }
    }

    fn gestures(&self) -> usize {
        match *self {
            Self::Taps { gestures }
            | Self::VerticalDrags { gestures }
            | Self::HorizontalSwipes { gestures }
            | Self::Mixed { gestures } => gestures,
        }
    }
}

/// Configuration for a storm.
#[derive(Debug, Clone)]
pub struct StormConfig {
    pub pattern: StormPattern,
    pub seed: u64,
    pub viewport: Size,
}

impl StormConfig {
    pub fn new(pattern: StormPattern, seed: u64, viewport: Size) -> Self {
        Self {
            pattern,
            seed,
            viewport,
        }
    }
}

/// Xorshift64, for reproducible storms.
struct Rng {
    state: u64,
}

impl Rng {
    fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Uniform in `[0, max)`.
    fn below(&mut self, max: u64) -> u64 {
        if max == 0 { 0 } else { self.next() % max }
    }

    /// Uniform in `[lo, hi)`.
    fn range(&mut self, lo: f32, hi: f32) -> f32 {
        let unit = (self.next() >> 40) as f32 / (1u64 << 24) as f32;
        lo + (hi - lo) * unit
    }

    fn chance(&mut self, percent: u64) -> bool {
        self.below(100) < percent
    }
}

/// A generated storm.
#[derive(Debug, Clone)]
pub struct PointerStorm {
    pub samples: Vec<PointerSample>,
    pub pattern_name: &'static str,
    pub seed: u64,
    pub gestures: usize,
    start: Instant,
}

impl PointerStorm {
    /// One JSON object per line: start record, one record per sample,
    /// completion record.
    pub fn to_jsonl(&self) -> String {
        let mut lines = Vec::with_capacity(self.samples.len() + 2);
        lines.push(serde_json::json!({
            "event": "storm_start",
            "pattern": self.pattern_name,
            "seed": self.seed,
            "sample_count": self.samples.len(),
        }));
        for (idx, s) in self.samples.iter().enumerate() {
            lines.push(serde_json::json!({
                "event": "storm_inject",
                "idx": idx,
                "phase": phase_name(s.phase),
                "x": s.position.x,
                "y": s.position.y,
                "offset_ms": s.timestamp.duration_since(self.start).as_millis() as u64,
            }));
        }
        lines.push(serde_json::json!({
            "event": "storm_complete",
            "gestures": self.gestures,
            "sample_count": self.samples.len(),
        }));
        lines
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn phase_name(phase: PointerPhase) -> &'static str {
    match phase {
        PointerPhase::Down => "down",
        PointerPhase::Move => "move",
        PointerPhase::Up => "up",
        PointerPhase::Cancel => "cancel",
    }
}

/// Generate a storm whose first sample is at `start`.
pub fn generate_storm(config: &StormConfig, start: Instant) -> PointerStorm {
    let mut rng = Rng::new(config.seed);
    let mut out = Vec::new();
    let mut clock = Clock { now: start };
    let w = config.viewport.width.max(1) as f32;
    let h = config.viewport.height.max(1) as f32;

    for _ in 0..config.pattern.gestures() {
        let kind = match config.pattern {
            StormPattern::Mixed { .. } => match rng.below(3) {
                0 => StormPattern::Taps { gestures: 1 },
                1 => StormPattern::VerticalDrags { gestures: 1 },
                _ => StormPattern::HorizontalSwipes { gestures: 1 },
            },
            other => other,
        };
        let x = rng.range(0.0, w);
        let y = rng.range(0.0, h);
        out.push(PointerSample::down(x, y, clock.tick()));
        let (end_x, end_y) = match kind {
            StormPattern::Taps { .. } => tap(&mut rng, &mut clock, &mut out, x, y),
            StormPattern::VerticalDrags { .. } => vertical(&mut rng, &mut clock, &mut out, x, y, h),
            _ => horizontal(&mut rng, &mut clock, &mut out, x, y, w),
        };

        let mixed = matches!(config.pattern, StormPattern::Mixed { .. });
        if mixed && rng.chance(5) {
            // Unterminated: the next Down arrives mid-session.
            continue;
        }
        let phase = if mixed && rng.chance(10) {
            PointerPhase::Cancel
        } else {
            PointerPhase::Up
        };
        out.push(PointerSample::new(phase, end_x, end_y, clock.tick()));
        clock.now += Duration::from_millis(FRAME_MS * 4);
    }

    tracing::debug!(
        message = "storm.generated",
        pattern = config.pattern.name(),
        seed = config.seed,
        samples = out.len()
    );
    PointerStorm {
        samples: out,
        pattern_name: config.pattern.name(),
        seed: config.seed,
        gestures: config.pattern.gestures(),
        start,
    }
}

struct Clock {
    now: Instant,
}

impl Clock {
    fn tick(&mut self) -> Instant {
        let t = self.now;
        self.now += Duration::from_millis(FRAME_MS);
        t
    }
}

fn tap(rng: &mut Rng, clock: &mut Clock, out: &mut Vec<PointerSample>, x: f32, y: f32) -> (f32, f32) {
    let (mut cx, mut cy) = (x, y);
    for _ in 0..rng.below(3) {
        cx = x + rng.range(-3.0, 3.0);
        cy = y + rng.range(-3.0, 3.0);
        out.push(PointerSample::moved(cx, cy, clock.tick()));
    }
    (cx, cy)
}

fn vertical(
    rng: &mut Rng,
    clock: &mut Clock,
    out: &mut Vec<PointerSample>,
    x: f32,
    y: f32,
    h: f32,
) -> (f32, f32) {
    let mut cy = y;
    let mut dir = if rng.chance(50) { 1.0 } else { -1.0 };
    for _ in 0..(4 + rng.below(24)) {
        if rng.chance(10) {
            dir = -dir;
        }
        cy = (cy + dir * rng.range(2.0, 40.0)).clamp(-20.0, h + 20.0);
        out.push(PointerSample::moved(x + rng.range(-2.0, 2.0), cy, clock.tick()));
    }
    (x, cy)
}

fn horizontal(
    rng: &mut Rng,
    clock: &mut Clock,
    out: &mut Vec<PointerSample>,
    x: f32,
    y: f32,
    w: f32,
) -> (f32, f32) {
    let mut cx = x;
    let mut cy = y;
    let dir = if rng.chance(50) { 1.0 } else { -1.0 };
    for _ in 0..(3 + rng.below(16)) {
        cx += dir * rng.range(4.0, 45.0);
        cy += rng.range(-1.5, 1.5);
        cx = cx.clamp(-w, 2.0 * w);
        out.push(PointerSample::moved(cx, cy, clock.tick()));
    }
    (cx, cy)
}
