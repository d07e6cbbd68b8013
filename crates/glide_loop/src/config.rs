// SPDX-License-Identifier: MIT OR Apache-2.0
//! Loop sequencer configuration.

use serde::{Deserialize, Serialize};

/// Damping applied to measured percent offsets.
///
/// Percentage-based layouts round adjacent item widths by a pixel either
/// way; snapping the derived percents to a coarser grid avoids visible
/// twitch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Snap {
    /// Leave values unrounded
    None,
    /// Round to the nearest multiple of the step
    Step(f32),
}

impl Default for Snap {
    fn default() -> Self {
        Self::Step(1.0)
    }
}

impl Snap {
    /// Apply the snapping function to a value
    pub fn apply(self, value: f32) -> f32 {
        match self {
            Snap::None => value,
            Snap::Step(step) if step > 0.0 => (value / step).round() * step,
            Snap::Step(_) => value,
        }
    }
}

/// Configuration for the loop sequencer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequencerConfig {
    /// Speed multiplier over the 100 units/second base travel rate
    pub speed: f32,
    /// Start paused
    pub paused: bool,
    /// Engine-native repeat count; `-1` means infinite
    pub repeat: i32,
    /// Start played backward from the logical end
    pub reversed: bool,
    /// Extra trailing loop distance
    pub padding_right: f32,
    /// Snapping granularity for percent offsets
    pub snap: Snap,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            speed: 1.0,
            paused: false,
            repeat: 0,
            reversed: false,
            padding_right: 0.0,
            snap: Snap::default(),
        }
    }
}

impl SequencerConfig {
    /// Travel speed in absolute units per second
    pub fn pixels_per_second(&self) -> f32 {
        self.speed * 100.0
    }
}
