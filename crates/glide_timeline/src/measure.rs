// SPDX-License-Identifier: MIT OR Apache-2.0
//! Layout and measurement provider interface.

use crate::element::{ElementId, Rect};

/// Read and write access to the layout state of elements.
///
/// This is the seam to the external layout/measurement collaborator. All
/// methods take `&self`; an implementation is a handle to a live layout
/// tree and is expected to use interior mutability for the writers.
pub trait MeasurementProvider {
    /// Static layout position of the element along the travel axis.
    fn position(&self, element: ElementId) -> f32;

    /// Current rendered width of the element.
    fn width(&self, element: ElementId) -> f32;

    /// Current transform offset along the travel axis, in absolute units.
    fn offset(&self, element: ElementId) -> f32;

    /// Baseline offset already expressed as a percentage of the element's
    /// own width.
    fn percent_offset(&self, element: ElementId) -> f32;

    /// Uniform scale factor along the travel axis.
    fn scale(&self, element: ElementId) -> f32;

    /// Bounding rectangle of the element in screen coordinates.
    fn bounds(&self, element: ElementId) -> Rect;

    /// Set the absolute transform offset along the travel axis.
    fn set_offset(&self, element: ElementId, offset: f32);

    /// Set the percent-based offset.
    fn set_percent_offset(&self, element: ElementId, percent: f32);
}
