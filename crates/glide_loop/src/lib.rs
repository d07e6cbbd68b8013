// SPDX-License-Identifier: MIT OR Apache-2.0
//! Infinite horizontal loop sequencer.
//!
//! This crate arranges an ordered collection of visual items into a
//! seamlessly repeating scrolling sequence:
//! - Per-item measurement normalized to percent-of-own-width
//! - Wrap-around segment construction on a finite timeline
//! - Shortest-path index navigation over a cyclic playhead
//!
//! ## Architecture
//!
//! [`GeometrySnapshot`] measures items through a
//! [`MeasurementProvider`](glide_timeline::MeasurementProvider),
//! [`LoopTimelineBuilder`] converts the snapshot into motion instructions
//! on a [`TimelineEngine`](glide_timeline::TimelineEngine), and
//! [`LoopSequencer`] wraps the built timeline with navigation. Geometry
//! and arrival times are computed once at construction and never change;
//! after a resize the caller discards the handle and constructs a new one
//! from fresh measurements.

pub mod builder;
pub mod config;
pub mod geometry;
pub mod sequencer;

#[cfg(test)]
mod testutil;

pub use builder::LoopTimelineBuilder;
pub use config::{SequencerConfig, Snap};
pub use geometry::{GeometrySnapshot, ItemGeometry, SequencerError};
pub use sequencer::LoopSequencer;
