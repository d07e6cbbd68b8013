// SPDX-License-Identifier: MIT OR Apache-2.0
//! Before/after capture and the corrective animation.

use glide_timeline::{
    ElementId, MeasurementProvider, Property, Rect, SharedAnimation, TimelineEngine, Tween,
    TweenVars,
};

use crate::registry::FlipRegistry;

/// Animate `elements` from their current screen positions to wherever a
/// synchronous mutation moves them.
///
/// Captures each element's bounding rectangle, forces any in-flight flip on
/// the same elements to its end state, runs `change` exactly once, then
/// spawns one corrective animation that starts every element at its old
/// position (expressed as an offset from the new one) and glides it to
/// rest at offset zero. `vars` passes through to the engine unmodified,
/// and the returned handle is registered for every element.
///
/// An element removed from the layout tree by `change` has an invalid
/// after-rect; the result is undefined for that element only, other
/// elements in the same call are unaffected.
pub fn flip<E, P, F>(
    engine: &mut E,
    provider: &P,
    elements: &[ElementId],
    change: F,
    vars: TweenVars,
) -> SharedAnimation
where
    E: TimelineEngine,
    P: MeasurementProvider,
    F: FnOnce(),
{
    let before: Vec<Rect> = elements
        .iter()
        .map(|&element| provider.bounds(element))
        .collect();
    let registry = FlipRegistry::global();
    for &element in elements {
        registry.supersede(element);
    }
    change();
    let mut tweens = Vec::with_capacity(elements.len() * 2);
    for (&element, before) in elements.iter().zip(&before) {
        let after = provider.bounds(element);
        let dx = before.left - after.left;
        let dy = before.top - after.top;
        tweens.push(Tween::new(element, Property::OffsetX, dx, 0.0, vars.duration));
        tweens.push(Tween::new(element, Property::OffsetY, dy, 0.0, vars.duration));
    }
    tracing::debug!("flip transition over {} element(s)", elements.len());
    let handle = engine.spawn(tweens, vars);
    for &element in elements {
        registry.register(element, handle.clone());
    }
    handle
}
