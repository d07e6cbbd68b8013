// SPDX-License-Identifier: MIT OR Apache-2.0
//! Motion instructions submitted to a timeline engine.

use serde::{Deserialize, Serialize};

use crate::element::ElementId;

/// Animatable property channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Property {
    /// Offset along the travel axis as a percentage of the element's width
    PercentOffset,
    /// Absolute horizontal offset
    OffsetX,
    /// Absolute vertical offset
    OffsetY,
}

/// Easing tag attached to a motion instruction.
///
/// Easing-curve evaluation is the engine's concern; glide only carries the
/// tag through. The reference engine interpolates linearly regardless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Ease {
    /// Constant-rate interpolation
    #[default]
    Linear,
    /// Accelerating from rest
    In,
    /// Decelerating to rest
    Out,
    /// Accelerating then decelerating
    InOut,
}

/// A single motion instruction: animate one property of one element from a
/// start value to an end value over a time range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tween {
    /// Target element
    pub target: ElementId,
    /// Animated property channel
    pub property: Property,
    /// Start value
    pub from: f32,
    /// End value
    pub to: f32,
    /// Duration in seconds
    pub duration: f32,
    /// Start time on the owning timeline, in seconds
    pub start_time: f32,
    /// Whether the start value applies before `start_time` is reached.
    /// When false, the jump to `from` must not render early.
    pub immediate_render: bool,
    /// Easing tag
    pub ease: Ease,
}

impl Tween {
    /// Create a new tween starting at time zero
    pub fn new(target: ElementId, property: Property, from: f32, to: f32, duration: f32) -> Self {
        Self {
            target,
            property,
            from,
            to,
            duration,
            start_time: 0.0,
            immediate_render: true,
            ease: Ease::Linear,
        }
    }

    /// Set the start time on the owning timeline
    pub fn starting_at(mut self, time: f32) -> Self {
        self.start_time = time;
        self
    }

    /// Defer rendering of the start value until `start_time` is reached
    pub fn deferred(mut self) -> Self {
        self.immediate_render = false;
        self
    }

    /// Set the easing tag
    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Time at which this tween ends
    pub fn end_time(&self) -> f32 {
        self.start_time + self.duration
    }

    /// Value of this tween at the given timeline time, clamped to the
    /// tween's own range. Interpolation is linear; easing tags are opaque.
    pub fn value_at(&self, time: f32) -> f32 {
        if self.duration <= 0.0 {
            return if time >= self.start_time { self.to } else { self.from };
        }
        let t = ((time - self.start_time) / self.duration).clamp(0.0, 1.0);
        self.from + (self.to - self.from) * t
    }
}

/// Maps an in-flight playhead time to the time actually applied.
///
/// Used by navigation to wrap a transition through the loop boundary.
pub type TimeModifier = Box<dyn Fn(f32) -> f32 + Send + Sync>;

/// Callback fired when an animation reaches its end state
pub type CompletionCallback = Box<dyn FnOnce() + Send>;

/// Options for an animated seek
#[derive(Default)]
pub struct SeekVars {
    /// Transition duration in seconds. Defaults to the timeline-time
    /// distance being traveled.
    pub duration: Option<f32>,
    /// Easing tag for the transition
    pub ease: Ease,
    /// Whether this seek supersedes an in-flight one
    pub overwrite: bool,
    /// Time modifier applied to every intermediate playhead value of this
    /// one transition
    pub modifier: Option<TimeModifier>,
    /// Fired when the seek completes
    pub on_complete: Option<CompletionCallback>,
}

/// Options for a spawned corrective animation
pub struct TweenVars {
    /// Per-element duration in seconds
    pub duration: f32,
    /// Start-time offset between consecutive elements
    pub stagger: f32,
    /// Easing tag
    pub ease: Ease,
    /// Delay before the first element starts
    pub delay: f32,
    /// Fired once when every element has reached its end state
    pub on_complete: Option<CompletionCallback>,
}

impl Default for TweenVars {
    fn default() -> Self {
        Self {
            duration: 0.5,
            stagger: 0.0,
            ease: Ease::Linear,
            delay: 0.0,
            on_complete: None,
        }
    }
}
