// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timeline engine interface.

use std::sync::Arc;

use crate::tween::{SeekVars, Tween, TweenVars};

/// Handle to an animation in progress.
///
/// Returned by navigation and flip operations. The caller may poll it or
/// force it to its end state; glide itself never blocks on completion.
pub trait AnimationHandle: Send + Sync {
    /// Fraction of the animation that has played, in `[0, 1]`
    fn progress(&self) -> f32;

    /// Whether the animation has reached its end state or been superseded
    fn is_complete(&self) -> bool;

    /// Jump the animation to its end state immediately
    fn force_complete(&self);
}

/// Shared reference to an animation in progress
pub type SharedAnimation = Arc<dyn AnimationHandle>;

/// A tween/timeline scheduling engine.
///
/// Glide's constructors compute numbers and issue instructions through this
/// interface; playback, easing math, and frame-driven execution stay on the
/// engine's side. Any concrete engine satisfying this interface is
/// substitutable.
pub trait TimelineEngine {
    /// Schedule a motion instruction on the timeline
    fn schedule(&mut self, tween: Tween);

    /// Record a named marker at the given time
    fn add_label(&mut self, name: &str, time: f32);

    /// Look up a named marker
    fn label_time(&self, name: &str) -> Option<f32>;

    /// Total timeline duration in seconds
    fn duration(&self) -> f32;

    /// Current playhead time in seconds
    fn current_time(&self) -> f32;

    /// Playhead position as a fraction of the duration
    fn progress(&self) -> f32 {
        let duration = self.duration();
        if duration > 0.0 {
            self.current_time() / duration
        } else {
            0.0
        }
    }

    /// Set the playhead instantly, evaluating without animating
    fn seek_instant(&mut self, time: f32);

    /// Animate the playhead to the given time
    fn seek_animated(&mut self, time: f32, vars: SeekVars) -> SharedAnimation;

    /// Start a standalone corrective animation, independent of the
    /// timeline's own playhead
    fn spawn(&mut self, tweens: Vec<Tween>, vars: TweenVars) -> SharedAnimation;

    /// Engine-native repeat count; `-1` means infinite
    fn set_repeat(&mut self, repeat: i32);

    /// Pause or resume playback
    fn set_paused(&mut self, paused: bool);

    /// Whether playback is paused
    fn is_paused(&self) -> bool;

    /// Reverse the playback direction
    fn reverse(&mut self);

    /// Whether playback currently runs backward
    fn is_reversed(&self) -> bool;
}
