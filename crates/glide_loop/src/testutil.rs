// SPDX-License-Identifier: MIT OR Apache-2.0
//! In-memory measurement provider for tests.

use std::cell::RefCell;

use glide_timeline::{ElementId, MeasurementProvider, Rect};
use indexmap::IndexMap;

#[derive(Debug, Clone, Copy)]
struct FakeElement {
    position: f32,
    width: f32,
    offset: f32,
    percent: f32,
    scale: f32,
}

/// A fake layout tree holding one row of items along the travel axis.
#[derive(Default)]
pub(crate) struct FakeDom {
    elements: RefCell<IndexMap<ElementId, FakeElement>>,
}

impl FakeDom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, position: f32, width: f32) -> ElementId {
        self.add_scaled(position, width, 1.0)
    }

    pub fn add_scaled(&self, position: f32, width: f32, scale: f32) -> ElementId {
        let id = ElementId::new();
        self.elements.borrow_mut().insert(
            id,
            FakeElement {
                position,
                width,
                offset: 0.0,
                percent: 0.0,
                scale,
            },
        );
        id
    }

    /// Lay widths out back to back starting at zero.
    pub fn row(widths: &[f32]) -> (Self, Vec<ElementId>) {
        let dom = Self::new();
        let mut x = 0.0;
        let items = widths
            .iter()
            .map(|&width| {
                let id = dom.add(x, width);
                x += width;
                id
            })
            .collect();
        (dom, items)
    }

    fn get(&self, element: ElementId) -> FakeElement {
        self.elements.borrow()[&element]
    }
}

impl MeasurementProvider for FakeDom {
    fn position(&self, element: ElementId) -> f32 {
        self.get(element).position
    }

    fn width(&self, element: ElementId) -> f32 {
        self.get(element).width
    }

    fn offset(&self, element: ElementId) -> f32 {
        self.get(element).offset
    }

    fn percent_offset(&self, element: ElementId) -> f32 {
        self.get(element).percent
    }

    fn scale(&self, element: ElementId) -> f32 {
        self.get(element).scale
    }

    fn bounds(&self, element: ElementId) -> Rect {
        let el = self.get(element);
        Rect::new(el.position + el.offset, 0.0, el.width * el.scale, 10.0)
    }

    fn set_offset(&self, element: ElementId, offset: f32) {
        if let Some(el) = self.elements.borrow_mut().get_mut(&element) {
            el.offset = offset;
        }
    }

    fn set_percent_offset(&self, element: ElementId, percent: f32) {
        if let Some(el) = self.elements.borrow_mut().get_mut(&element) {
            el.percent = percent;
        }
    }
}
