// SPDX-License-Identifier: MIT OR Apache-2.0
//! Deterministic reference engine.
//!
//! [`StepTimeline`] implements [`TimelineEngine`] without owning a frame
//! loop: the caller steps it with explicit [`advance`](StepTimeline::advance)
//! calls, which makes playback fully reproducible in tests and headless
//! evaluation. Value interpolation is linear; easing tags are carried but
//! not curved.

use std::collections::HashSet;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::Mutex;

use crate::element::ElementId;
use crate::engine::{AnimationHandle, SharedAnimation, TimelineEngine};
use crate::tween::{CompletionCallback, Property, SeekVars, TimeModifier, Tween, TweenVars};

/// Shared progress state behind every handle the engine gives out
#[derive(Default)]
struct HandleInner {
    progress: f32,
    complete: bool,
    forced: bool,
}

/// Engine-side view of an [`AnimationHandle`]
#[derive(Clone, Default)]
struct TweenHandle(Arc<Mutex<HandleInner>>);

impl TweenHandle {
    fn shared(&self) -> SharedAnimation {
        Arc::new(self.clone())
    }

    fn set_progress(&self, progress: f32) {
        self.0.lock().progress = progress;
    }

    /// Mark finished at the end state
    fn complete(&self) {
        let mut inner = self.0.lock();
        inner.complete = true;
        inner.progress = 1.0;
    }

    /// Mark superseded; progress stays where it was
    fn cancel(&self) {
        self.0.lock().complete = true;
    }

    fn is_forced(&self) -> bool {
        self.0.lock().forced
    }
}

impl AnimationHandle for TweenHandle {
    fn progress(&self) -> f32 {
        self.0.lock().progress
    }

    fn is_complete(&self) -> bool {
        self.0.lock().complete
    }

    fn force_complete(&self) {
        let mut inner = self.0.lock();
        inner.forced = true;
        inner.complete = true;
        inner.progress = 1.0;
    }
}

/// An animated seek in flight
struct ActiveSeek {
    from: f32,
    to: f32,
    duration: f32,
    elapsed: f32,
    modifier: Option<TimeModifier>,
    on_complete: Option<CompletionCallback>,
    handle: TweenHandle,
}

/// A spawned corrective animation, stepped independently of the playhead
struct Corrective {
    tweens: Vec<Tween>,
    total: f32,
    elapsed: f32,
    on_complete: Option<CompletionCallback>,
    handle: TweenHandle,
    done: bool,
}

/// Deterministic, manually-stepped timeline engine.
///
/// Playback rules:
/// - `repeat` counts extra passes; `-1` wraps the playhead modulo the
///   duration forever, in both directions.
/// - An animated seek suspends normal playback and drives the playhead
///   exclusively until it completes. Every animated seek supersedes the
///   previous one; the stale transition is dropped where it stands and its
///   handle reports complete.
/// - [`seek_instant`](TimelineEngine::seek_instant) also pre-resolves every
///   channel value at the new playhead, so a full-then-zero instant seek
///   doubles as the construction-time prewarm step.
#[derive(Default)]
pub struct StepTimeline {
    tweens: Vec<Tween>,
    labels: IndexMap<String, f32>,
    repeat: i32,
    paused: bool,
    reversed: bool,
    playhead: f32,
    cycles_done: u32,
    seek: Option<ActiveSeek>,
    corrective: Vec<Corrective>,
    resolved: IndexMap<(ElementId, Property), f32>,
}

impl StepTimeline {
    /// Create an empty timeline
    pub fn new() -> Self {
        Self::default()
    }

    /// Step the engine by `dt` seconds of frame time.
    ///
    /// Corrective animations and an in-flight animated seek advance even
    /// while the timeline itself is paused.
    pub fn advance(&mut self, dt: f32) {
        self.advance_corrective(dt);
        if self.seek.is_some() {
            self.advance_seek(dt);
            return;
        }
        if self.paused {
            return;
        }
        let duration = self.duration();
        if duration <= 0.0 {
            return;
        }
        let step = if self.reversed { -dt } else { dt };
        let mut t = self.playhead + step;
        if self.repeat < 0 {
            t = t.rem_euclid(duration);
        } else {
            while t >= duration && (self.cycles_done as i32) < self.repeat {
                t -= duration;
                self.cycles_done += 1;
            }
            while t < 0.0 && self.cycles_done > 0 {
                t += duration;
                self.cycles_done -= 1;
            }
            t = t.clamp(0.0, duration);
        }
        self.playhead = t;
    }

    /// Current value of a scheduled channel at the playhead
    pub fn value_of(&self, element: ElementId, property: Property) -> Option<f32> {
        select_value(&self.tweens, element, property, self.playhead)
    }

    /// Current value of a channel driven by a corrective animation
    pub fn corrective_value(&self, element: ElementId, property: Property) -> Option<f32> {
        self.corrective.iter().rev().find_map(|corrective| {
            let time = if corrective.handle.is_complete() {
                corrective.total
            } else {
                corrective.elapsed
            };
            select_value(&corrective.tweens, element, property, time)
        })
    }

    /// Channel value cached by the most recent instant seek
    pub fn resolved_value(&self, element: ElementId, property: Property) -> Option<f32> {
        self.resolved.get(&(element, property)).copied()
    }

    /// Raw target time of the in-flight animated seek, if any
    pub fn seek_target(&self) -> Option<f32> {
        self.seek.as_ref().map(|seek| seek.to)
    }

    /// Whether the in-flight animated seek carries a time modifier
    pub fn seek_wraps(&self) -> bool {
        self.seek
            .as_ref()
            .is_some_and(|seek| seek.modifier.is_some())
    }

    fn advance_seek(&mut self, dt: f32) {
        let Some(mut seek) = self.seek.take() else {
            return;
        };
        seek.elapsed += dt;
        let fraction = if seek.handle.is_forced() || seek.duration <= 0.0 {
            1.0
        } else {
            (seek.elapsed / seek.duration).min(1.0)
        };
        let raw = seek.from + (seek.to - seek.from) * fraction;
        self.playhead = match &seek.modifier {
            Some(modifier) => modifier(raw),
            None => raw,
        };
        seek.handle.set_progress(fraction);
        if fraction >= 1.0 {
            seek.handle.complete();
            if let Some(on_complete) = seek.on_complete.take() {
                on_complete();
            }
        } else {
            self.seek = Some(seek);
        }
    }

    fn advance_corrective(&mut self, dt: f32) {
        for corrective in &mut self.corrective {
            if corrective.done {
                continue;
            }
            if corrective.handle.is_forced() {
                corrective.elapsed = corrective.total;
            } else {
                corrective.elapsed += dt;
            }
            let progress = if corrective.total > 0.0 {
                (corrective.elapsed / corrective.total).min(1.0)
            } else {
                1.0
            };
            corrective.handle.set_progress(progress);
            if progress >= 1.0 {
                corrective.done = true;
                corrective.handle.complete();
                if let Some(on_complete) = corrective.on_complete.take() {
                    on_complete();
                }
            }
        }
    }

    /// Re-evaluate every scheduled channel at the playhead
    fn resolve(&mut self) {
        let channels: HashSet<(ElementId, Property)> = self
            .tweens
            .iter()
            .map(|tween| (tween.target, tween.property))
            .collect();
        for (element, property) in channels {
            if let Some(value) = select_value(&self.tweens, element, property, self.playhead) {
                self.resolved.insert((element, property), value);
            }
        }
    }
}

impl TimelineEngine for StepTimeline {
    fn schedule(&mut self, tween: Tween) {
        self.tweens.push(tween);
    }

    fn add_label(&mut self, name: &str, time: f32) {
        self.labels.insert(name.to_owned(), time);
    }

    fn label_time(&self, name: &str) -> Option<f32> {
        self.labels.get(name).copied()
    }

    fn duration(&self) -> f32 {
        self.tweens.iter().map(Tween::end_time).fold(0.0, f32::max)
    }

    fn current_time(&self) -> f32 {
        self.playhead
    }

    fn seek_instant(&mut self, time: f32) {
        if let Some(stale) = self.seek.take() {
            stale.handle.cancel();
        }
        let duration = self.duration();
        self.playhead = if duration > 0.0 {
            time.clamp(0.0, duration)
        } else {
            0.0
        };
        self.resolve();
    }

    fn seek_animated(&mut self, time: f32, vars: SeekVars) -> SharedAnimation {
        if let Some(stale) = self.seek.take() {
            stale.handle.cancel();
        }
        let from = self.playhead;
        let duration = vars.duration.unwrap_or_else(|| (time - from).abs());
        tracing::debug!("animated seek {} -> {} over {}s", from, time, duration);
        let handle = TweenHandle::default();
        self.seek = Some(ActiveSeek {
            from,
            to: time,
            duration,
            elapsed: 0.0,
            modifier: vars.modifier,
            on_complete: vars.on_complete,
            handle: handle.clone(),
        });
        handle.shared()
    }

    fn spawn(&mut self, mut tweens: Vec<Tween>, vars: TweenVars) -> SharedAnimation {
        let mut order: Vec<ElementId> = Vec::new();
        for tween in &mut tweens {
            let slot = order
                .iter()
                .position(|el| *el == tween.target)
                .unwrap_or_else(|| {
                    order.push(tween.target);
                    order.len() - 1
                });
            tween.duration = vars.duration;
            tween.start_time = vars.delay + vars.stagger * slot as f32;
            tween.ease = vars.ease;
        }
        let total = tweens.iter().map(Tween::end_time).fold(0.0, f32::max);
        tracing::debug!("spawned corrective animation for {} target(s)", order.len());
        let handle = TweenHandle::default();
        let mut corrective = Corrective {
            tweens,
            total,
            elapsed: 0.0,
            on_complete: vars.on_complete,
            handle: handle.clone(),
            done: false,
        };
        if corrective.tweens.is_empty() {
            corrective.done = true;
            corrective.handle.complete();
            if let Some(on_complete) = corrective.on_complete.take() {
                on_complete();
            }
        }
        self.corrective.push(corrective);
        handle.shared()
    }

    fn set_repeat(&mut self, repeat: i32) {
        self.repeat = repeat;
    }

    fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn reverse(&mut self) {
        self.reversed = !self.reversed;
    }

    fn is_reversed(&self) -> bool {
        self.reversed
    }
}

/// Pick the channel value at `time` from a set of scheduled tweens.
///
/// The tween with the latest start time at or before `time` wins, schedule
/// order breaking ties. Before any tween has started, the first
/// immediate-render tween supplies its start value; deferred tweens
/// contribute nothing until their start time.
fn select_value(tweens: &[Tween], element: ElementId, property: Property, time: f32) -> Option<f32> {
    let mut best: Option<&Tween> = None;
    let mut fallback: Option<f32> = None;
    for tween in tweens
        .iter()
        .filter(|tween| tween.target == element && tween.property == property)
    {
        if time >= tween.start_time {
            if best.map_or(true, |b| tween.start_time >= b.start_time) {
                best = Some(tween);
            }
        } else if tween.immediate_render && fallback.is_none() {
            fallback = Some(tween.from);
        }
    }
    best.map(|tween| tween.value_at(time)).or(fallback)
}
