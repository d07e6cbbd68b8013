// SPDX-License-Identifier: MIT OR Apache-2.0
//! Element identity and screen-space rectangles.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an animated element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(pub Uuid);

impl ElementId {
    /// Create a new random element ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

/// Axis-aligned bounding rectangle in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub left: f32,
    /// Top edge
    pub top: f32,
    /// Rendered width
    pub width: f32,
    /// Rendered height
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}
