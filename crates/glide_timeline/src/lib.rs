// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timeline engine interface and reference engine for glide.
//!
//! This crate provides the seams between glide's animation constructors and
//! their external collaborators:
//! - Element identity and screen-space rectangles
//! - The layout/measurement provider interface
//! - Motion instructions (tweens, seeks, time modifiers)
//! - The timeline engine interface
//! - A deterministic, manually-stepped reference engine
//!
//! ## Architecture
//!
//! Glide never draws or measures directly. Constructors read geometry
//! through [`MeasurementProvider`] and submit [`Tween`] instructions to a
//! [`TimelineEngine`]; any engine satisfying that interface is
//! substitutable. [`StepTimeline`] is the in-process reference engine used
//! for tests and headless evaluation.

pub mod element;
pub mod engine;
pub mod measure;
pub mod step;
pub mod tween;

pub use element::{ElementId, Rect};
pub use engine::{AnimationHandle, SharedAnimation, TimelineEngine};
pub use measure::MeasurementProvider;
pub use step::StepTimeline;
pub use tween::{CompletionCallback, Ease, Property, SeekVars, TimeModifier, Tween, TweenVars};
