// SPDX-License-Identifier: MIT OR Apache-2.0
//! Flip transition animator.
//!
//! This crate smooths elements across a discontinuous state change:
//! - Capture each element's screen position
//! - Run the caller's synchronous mutation
//! - Diff the before and after positions
//! - Emit one corrective animation that glides every element from where it
//!   was to where it now belongs
//!
//! ## Architecture
//!
//! The animator shares glide's timeline abstraction: deltas become motion
//! instructions spawned on a
//! [`TimelineEngine`](glide_timeline::TimelineEngine). A process-wide
//! [`FlipRegistry`] tracks the in-flight corrective animation per element
//! so a superseding flip always fully supersedes one still in progress.

pub mod animator;
pub mod registry;

pub use animator::flip;
pub use glide_timeline::TweenVars;
pub use registry::FlipRegistry;
