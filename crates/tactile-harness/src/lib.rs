#![forbid(unsafe_code)]

//! Test harness for Tactile.
//!
//! - [`recording`]: fakes for every collaborator of the gesture crates, all
//!   writing into one ordered call log.
//! - [`pointer_storm`]: deterministic pointer-sample storms with a JSONL
//!   trace format.
//! - [`Rig`]: a bound [`TouchPipeline`] over the recording fakes.

pub mod pointer_storm;
pub mod recording;

use std::rc::Rc;
use std::time::Duration;

use tactile::{ArbiterConfig, PointerSample, Routing, SwipeConfig, SwipeContext, TouchPipeline};

use crate::recording::{CallLog, RecordingContainer, RecordingDispatcher, RecordingHost, RecordingList};

/// Frame used by [`Rig::settle`].
pub const FRAME: Duration = Duration::from_millis(16);

/// A pipeline wired to recording fakes.
pub struct Rig {
    pub log: CallLog,
    pub host: Rc<RecordingHost>,
    pub list: RecordingList,
    pub pipeline: TouchPipeline<RecordingContainer, RecordingDispatcher>,
}

impl Rig {
    /// Eight 400x60 rows starting at y=100, a draggable container, and
    /// quick reactions available.
    pub fn new() -> Self {
        Self::with(|log| RecordingContainer::new(log), SwipeConfig::default())
    }

    /// Build with a custom container and swipe config.
    pub fn with(
        container: impl FnOnce(&CallLog) -> RecordingContainer,
        swipe: SwipeConfig,
    ) -> Self {
        let log = CallLog::new();
        let host = RecordingHost::new(&log);
        let list = RecordingList::new(&log, 8, 400.0, 60.0, 100.0);
        let mut pipeline = TouchPipeline::new(ArbiterConfig::default(), swipe);
        pipeline.bind(container(&log), host.clone(), RecordingDispatcher::new(&log));
        pipeline.swipe_mut().set_context(SwipeContext {
            available_reactions: 4,
            ..SwipeContext::default()
        });
        Self {
            log,
            host,
            list,
            pipeline,
        }
    }

    /// Feed one sample.
    pub fn feed(&mut self, sample: &PointerSample) -> Routing {
        match self.pipeline.on_pointer(sample, &mut self.list) {
            Ok(routing) => routing,
            Err(err) => panic!("rig is bound, got {err}"),
        }
    }

    /// Feed every sample, returning the routings.
    pub fn feed_all(&mut self, samples: &[PointerSample]) -> Vec<Routing> {
        samples.iter().map(|s| self.feed(s)).collect()
    }

    /// Report normalization and tick until every animation is idle.
    pub fn settle(&mut self) {
        let _ = self.pipeline.normalized(&mut self.list);
        for _ in 0..240 {
            let _ = self.pipeline.tick(FRAME, &mut self.list);
        }
    }
}

impl Default for Rig {
    fn default() -> Self {
        Self::new()
    }
}
