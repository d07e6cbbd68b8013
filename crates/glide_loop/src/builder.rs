// SPDX-License-Identifier: MIT OR Apache-2.0
//! Converts a geometry snapshot into one continuous looping timeline.

use glide_timeline::{Property, TimelineEngine, Tween};

use crate::config::SequencerConfig;
use crate::geometry::GeometrySnapshot;

/// Emits the motion instructions for one loop period.
///
/// Each item gets two segments: forward travel until its trailing edge
/// exits the loop window, then a non-rendering jump to the far side and
/// travel back to its original offset. Every duration derives from
/// distance and speed, never from wall clock, so identical geometry always
/// produces an identical timeline.
pub struct LoopTimelineBuilder<'a> {
    snapshot: &'a GeometrySnapshot,
    config: &'a SequencerConfig,
}

impl<'a> LoopTimelineBuilder<'a> {
    /// Create a builder over a measured snapshot
    pub fn new(snapshot: &'a GeometrySnapshot, config: &'a SequencerConfig) -> Self {
        Self { snapshot, config }
    }

    /// Emit per-item segments and named arrival markers into the engine,
    /// returning the arrival-time table.
    pub fn build<E: TimelineEngine>(&self, engine: &mut E) -> Vec<f32> {
        let pps = self.config.pixels_per_second();
        let total = self.snapshot.total_loop_length;
        let mut times = Vec::with_capacity(self.snapshot.len());
        for (index, item) in self.snapshot.items.iter().enumerate() {
            let cur_x = item.current_x();
            let distance_to_start = item.position + cur_x - self.snapshot.start_x;
            let distance_to_loop = distance_to_start + item.scaled_width();
            let exit_percent = self
                .config
                .snap
                .apply((cur_x - distance_to_loop) / item.width * 100.0);
            let reenter_percent = self
                .config
                .snap
                .apply((cur_x - distance_to_loop + total) / item.width * 100.0);
            engine.schedule(Tween::new(
                item.item,
                Property::PercentOffset,
                item.percent_offset,
                exit_percent,
                distance_to_loop / pps,
            ));
            engine.schedule(
                Tween::new(
                    item.item,
                    Property::PercentOffset,
                    reenter_percent,
                    item.percent_offset,
                    (total - distance_to_loop) / pps,
                )
                .starting_at(distance_to_loop / pps)
                .deferred(),
            );
            let arrival = distance_to_start / pps;
            engine.add_label(&format!("item{index}"), arrival);
            times.push(arrival);
        }
        engine.set_repeat(self.config.repeat);
        engine.set_paused(self.config.paused);
        self.prewarm(engine);
        if self.config.reversed {
            engine.reverse();
        }
        tracing::debug!(
            "built loop timeline: {} item(s), {:.3}s period",
            times.len(),
            engine.duration()
        );
        times
    }

    /// Evaluate the finished timeline end-to-start once so every computed
    /// value is resolved before first playback. A first-frame cost guard,
    /// not a correctness requirement.
    fn prewarm<E: TimelineEngine>(&self, engine: &mut E) {
        let duration = engine.duration();
        engine.seek_instant(duration);
        engine.seek_instant(0.0);
    }
}

#[cfg(test)]
mod tests {
    use glide_timeline::StepTimeline;

    use super::*;
    use crate::geometry::GeometrySnapshot;
    use crate::testutil::FakeDom;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    fn build_row(widths: &[f32], config: &SequencerConfig) -> (StepTimeline, Vec<f32>) {
        let (dom, items) = FakeDom::row(widths);
        let snapshot = GeometrySnapshot::measure(&items, &dom, config).unwrap();
        let mut engine = StepTimeline::new();
        let times = LoopTimelineBuilder::new(&snapshot, config).build(&mut engine);
        (engine, times)
    }

    #[test]
    fn test_one_time_per_item_within_one_period() {
        let config = SequencerConfig::default();
        let (engine, times) = build_row(&[120.0, 80.0, 100.0], &config);
        assert_eq!(times.len(), 3);
        let duration = engine.duration();
        assert!(close(duration, 3.0));
        for &time in &times {
            assert!((0.0..duration).contains(&time));
        }
    }

    #[test]
    fn test_arrival_times_follow_geometry() {
        let config = SequencerConfig::default();
        let (engine, times) = build_row(&[120.0, 80.0, 100.0], &config);
        assert!(close(times[0], 0.0));
        assert!(close(times[1], 1.2));
        assert!(close(times[2], 2.0));
        assert_eq!(engine.label_time("item1"), Some(times[1]));
    }

    #[test]
    fn test_speed_scales_every_duration() {
        let config = SequencerConfig {
            speed: 2.0,
            ..SequencerConfig::default()
        };
        let (engine, times) = build_row(&[100.0, 100.0], &config);
        assert!(close(engine.duration(), 1.0));
        assert!(close(times[1], 0.5));
    }

    #[test]
    fn test_wrap_segment_does_not_render_early() {
        let config = SequencerConfig {
            paused: true,
            ..SequencerConfig::default()
        };
        let (dom, items) = FakeDom::row(&[100.0, 100.0]);
        let snapshot = GeometrySnapshot::measure(&items, &dom, &config).unwrap();
        let mut engine = StepTimeline::new();
        LoopTimelineBuilder::new(&snapshot, &config).build(&mut engine);

        // Halfway through item 0's forward segment its offset is -50%; the
        // +100% re-entry value must not have leaked.
        engine.seek_instant(0.5);
        let item0 = engine.value_of(items[0], Property::PercentOffset).unwrap();
        assert!(close(item0, -50.0));

        // Past its exit the wrap segment takes over and walks back down.
        engine.seek_instant(1.5);
        let item0 = engine.value_of(items[0], Property::PercentOffset).unwrap();
        assert!(close(item0, 50.0));
    }

    #[test]
    fn test_identical_geometry_builds_identical_times() {
        let config = SequencerConfig::default();
        let (dom, items) = FakeDom::row(&[90.0, 110.0, 100.0, 70.0]);
        let first = {
            let snapshot = GeometrySnapshot::measure(&items, &dom, &config).unwrap();
            let mut engine = StepTimeline::new();
            LoopTimelineBuilder::new(&snapshot, &config).build(&mut engine)
        };
        // Measuring again reads back the percents the first pass wrote.
        let second = {
            let snapshot = GeometrySnapshot::measure(&items, &dom, &config).unwrap();
            let mut engine = StepTimeline::new();
            LoopTimelineBuilder::new(&snapshot, &config).build(&mut engine)
        };
        assert_eq!(first, second);
    }

    #[test]
    fn test_prewarm_resolves_channels_at_start() {
        let config = SequencerConfig::default();
        let (dom, items) = FakeDom::row(&[100.0, 100.0]);
        let snapshot = GeometrySnapshot::measure(&items, &dom, &config).unwrap();
        let mut engine = StepTimeline::new();
        LoopTimelineBuilder::new(&snapshot, &config).build(&mut engine);
        // Construction seeked end-to-start, so every channel is already
        // resolved at its initial percent and the playhead rests at zero.
        assert!(close(engine.current_time(), 0.0));
        let resolved = engine
            .resolved_value(items[0], Property::PercentOffset)
            .unwrap();
        assert!(close(resolved, 0.0));
    }

    #[test]
    fn test_reversed_config_starts_backward() {
        let config = SequencerConfig {
            reversed: true,
            repeat: -1,
            ..SequencerConfig::default()
        };
        let (mut engine, _) = build_row(&[100.0, 100.0], &config);
        assert!(engine.is_reversed());
        engine.advance(0.5);
        assert!(close(engine.current_time(), 1.5));
    }
}
