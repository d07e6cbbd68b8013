// SPDX-License-Identifier: MIT OR Apache-2.0
//! Process-wide registry of in-flight flip animations.

use std::sync::OnceLock;

use glide_timeline::{ElementId, SharedAnimation};
use indexmap::IndexMap;
use parking_lot::Mutex;

/// Element-keyed registry of the most recent corrective animation.
///
/// Entries are overwritten, never accumulated. Superseding an element's
/// in-flight flip forces it to its end state first, so two corrective
/// animations never compound on one element. Access is last-write-wins
/// per key; no coordination beyond the mutex is needed.
#[derive(Default)]
pub struct FlipRegistry {
    entries: Mutex<IndexMap<ElementId, SharedAnimation>>,
}

impl FlipRegistry {
    /// Create an isolated registry
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry used by [`flip`](crate::flip)
    pub fn global() -> &'static FlipRegistry {
        static GLOBAL: OnceLock<FlipRegistry> = OnceLock::new();
        GLOBAL.get_or_init(FlipRegistry::default)
    }

    /// Force the element's in-flight flip, if any, to its end state
    pub fn supersede(&self, element: ElementId) {
        if let Some(stale) = self.entries.lock().get(&element) {
            if !stale.is_complete() {
                tracing::debug!("superseding in-flight flip for {:?}", element);
            }
            stale.force_complete();
        }
    }

    /// Record the element's current corrective animation
    pub fn register(&self, element: ElementId, handle: SharedAnimation) {
        self.entries.lock().insert(element, handle);
    }

    /// The element's most recent corrective animation
    pub fn handle(&self, element: ElementId) -> Option<SharedAnimation> {
        self.entries.lock().get(&element).cloned()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use glide_timeline::{StepTimeline, TimelineEngine, TweenVars};

    use super::*;

    #[test]
    fn test_register_overwrites_previous_entry() {
        let registry = FlipRegistry::new();
        let element = ElementId::new();
        let mut engine = StepTimeline::new();
        let first = engine.spawn(Vec::new(), TweenVars::default());
        let second = engine.spawn(Vec::new(), TweenVars::default());
        registry.register(element, first.clone());
        registry.register(element, second.clone());
        let current = registry.handle(element).unwrap();
        assert!(Arc::ptr_eq(&current, &second));
        assert!(!Arc::ptr_eq(&current, &first));
    }

    #[test]
    fn test_supersede_unknown_element_is_a_no_op() {
        let registry = FlipRegistry::new();
        registry.supersede(ElementId::new());
        assert!(registry.handle(ElementId::new()).is_none());
    }
}
