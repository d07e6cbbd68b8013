// SPDX-License-Identifier: MIT OR Apache-2.0
//! Loop sequencer handle and navigation state machine.

use glide_timeline::{ElementId, MeasurementProvider, SeekVars, SharedAnimation, TimelineEngine};

use crate::builder::LoopTimelineBuilder;
use crate::config::SequencerConfig;
use crate::geometry::{GeometrySnapshot, SequencerError};

/// A constructed horizontal loop with index-aware navigation.
///
/// Owns the engine the loop was built into, the immutable arrival-time
/// table, and the current index. Geometry never changes after
/// construction; to follow a resize, discard the handle and construct a
/// new one from fresh measurements.
pub struct LoopSequencer<E: TimelineEngine> {
    engine: E,
    snapshot: GeometrySnapshot,
    times: Vec<f32>,
    current_index: usize,
}

impl<E: TimelineEngine> LoopSequencer<E> {
    /// Measure `items`, build the looping timeline into `engine`, and
    /// return the navigable handle.
    pub fn new<P: MeasurementProvider>(
        items: &[ElementId],
        config: &SequencerConfig,
        provider: &P,
        mut engine: E,
    ) -> Result<Self, SequencerError> {
        let snapshot = GeometrySnapshot::measure(items, provider, config)?;
        let times = LoopTimelineBuilder::new(&snapshot, config).build(&mut engine);
        Ok(Self {
            engine,
            snapshot,
            times,
            current_index: 0,
        })
    }

    /// Jump to an item index, traveling the shortest way around the cycle.
    ///
    /// The index commits before the transition finishes, and a newer
    /// navigation call supersedes one still animating. When the transition
    /// would cross the loop boundary, the target time is pushed a full
    /// period past it and intermediate times fold back into range, so the
    /// playhead moves monotonically instead of jumping backward.
    pub fn to_index(&mut self, index: i64, mut vars: SeekVars) -> SharedAnimation {
        let length = self.times.len() as i64;
        let current = self.current_index as i64;
        let mut index = index;
        // Always travel the shortest way around; a tie goes forward.
        if 2 * (index - current).abs() > length {
            index += if index > current { -length } else { length };
        }
        let new_index = index.rem_euclid(length) as usize;
        let mut time = self.times[new_index];
        let now = self.engine.current_time();
        if (time > now) != (index > current) {
            let duration = self.engine.duration();
            vars.modifier = Some(Box::new(move |t| t.rem_euclid(duration)));
            time += if index > current { duration } else { -duration };
        }
        tracing::debug!(
            "navigate {} -> {} (seek to {:.3}s)",
            self.current_index,
            new_index,
            time
        );
        self.current_index = new_index;
        vars.overwrite = true;
        self.engine.seek_animated(time, vars)
    }

    /// Advance to the next item
    pub fn next(&mut self, vars: SeekVars) -> SharedAnimation {
        self.to_index(self.current_index as i64 + 1, vars)
    }

    /// Return to the previous item
    pub fn previous(&mut self, vars: SeekVars) -> SharedAnimation {
        self.to_index(self.current_index as i64 - 1, vars)
    }

    /// Index the sequencer currently rests on or travels toward
    pub fn current(&self) -> usize {
        self.current_index
    }

    /// Arrival time of every item within one loop period
    pub fn times(&self) -> &[f32] {
        &self.times
    }

    /// Number of items in the loop
    pub fn length(&self) -> usize {
        self.times.len()
    }

    /// The measured geometry the loop was built from
    pub fn snapshot(&self) -> &GeometrySnapshot {
        &self.snapshot
    }

    /// Pause playback
    pub fn pause(&mut self) {
        self.engine.set_paused(true);
    }

    /// Resume playback
    pub fn play(&mut self) {
        self.engine.set_paused(false);
    }

    /// Whether playback is paused
    pub fn is_paused(&self) -> bool {
        self.engine.is_paused()
    }

    /// Playhead position as a fraction of one loop period
    pub fn progress(&self) -> f32 {
        self.engine.progress()
    }

    /// Engine the loop was built into
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Mutable engine access, for stepping or playback control
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Consume the handle, releasing the engine
    pub fn into_engine(self) -> E {
        self.engine
    }
}
