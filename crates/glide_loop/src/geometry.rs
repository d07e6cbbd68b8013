// SPDX-License-Identifier: MIT OR Apache-2.0
//! Geometry model: per-item measurement and loop length derivation.

use glide_timeline::{ElementId, MeasurementProvider};
use serde::{Deserialize, Serialize};

use crate::config::SequencerConfig;

/// Floor applied to measured widths so percent conversions stay finite
const MIN_ITEM_WIDTH: f32 = 1.0;

/// Error raised by the loop sequencer constructor
#[derive(Debug, thiserror::Error)]
pub enum SequencerError {
    /// The item collection resolved to nothing
    #[error("item collection is empty")]
    EmptyItems,
}

/// Measured state of one item
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemGeometry {
    /// The measured element
    pub item: ElementId,
    /// Rendered width, floored to a minimum of one unit
    pub width: f32,
    /// Offset as a percentage of the item's own width, snapped
    pub percent_offset: f32,
    /// Uniform scale factor along the travel axis
    pub scale: f32,
    /// Static layout position along the travel axis
    pub position: f32,
}

impl ItemGeometry {
    /// Current offset converted back to absolute units
    pub fn current_x(&self) -> f32 {
        self.percent_offset / 100.0 * self.width
    }

    /// Rendered width including scale
    pub fn scaled_width(&self) -> f32 {
        self.width * self.scale
    }
}

/// Immutable measurement snapshot of the whole item sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometrySnapshot {
    /// Ordered per-item measurements
    pub items: Vec<ItemGeometry>,
    /// Start coordinate of the first item
    pub start_x: f32,
    /// Distance an item travels to go from just past the last item back to
    /// just before the first
    pub total_loop_length: f32,
}

impl GeometrySnapshot {
    /// Measure an ordered item collection.
    ///
    /// Converts each item's absolute offset into a percentage of its own
    /// width (plus any baseline percent the provider reports), snaps it,
    /// and resets the absolute offset to zero. All subsequent motion is
    /// expressed relative to item width, so re-measuring after a resize
    /// reproduces consistent behavior.
    pub fn measure<P: MeasurementProvider>(
        items: &[ElementId],
        provider: &P,
        config: &SequencerConfig,
    ) -> Result<Self, SequencerError> {
        if items.is_empty() {
            return Err(SequencerError::EmptyItems);
        }
        let mut measured = Vec::with_capacity(items.len());
        for &item in items {
            let mut width = provider.width(item);
            if width < MIN_ITEM_WIDTH {
                tracing::warn!(
                    "item {:?} has degenerate width {}; flooring to {}",
                    item,
                    width,
                    MIN_ITEM_WIDTH
                );
                width = MIN_ITEM_WIDTH;
            }
            let percent = config
                .snap
                .apply(provider.offset(item) / width * 100.0 + provider.percent_offset(item));
            provider.set_percent_offset(item, percent);
            provider.set_offset(item, 0.0);
            measured.push(ItemGeometry {
                item,
                width,
                percent_offset: percent,
                scale: provider.scale(item),
                position: provider.position(item),
            });
        }
        let start_x = measured[0].position;
        let last = &measured[measured.len() - 1];
        let total_loop_length =
            last.position + last.current_x() - start_x + last.scaled_width() + config.padding_right;
        Ok(Self {
            items: measured,
            start_x,
            total_loop_length,
        })
    }

    /// Number of measured items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the snapshot holds no items; never true for a snapshot
    /// returned by [`measure`](Self::measure)
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Snap;
    use crate::testutil::FakeDom;

    #[test]
    fn test_empty_items_are_rejected() {
        let dom = FakeDom::new();
        let result = GeometrySnapshot::measure(&[], &dom, &SequencerConfig::default());
        assert!(matches!(result, Err(SequencerError::EmptyItems)));
    }

    #[test]
    fn test_total_loop_length_spans_row() {
        let (dom, items) = FakeDom::row(&[120.0, 80.0, 100.0]);
        let snapshot =
            GeometrySnapshot::measure(&items, &dom, &SequencerConfig::default()).unwrap();
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot.start_x, 0.0);
        assert_eq!(snapshot.total_loop_length, 300.0);
    }

    #[test]
    fn test_padding_extends_loop_length() {
        let (dom, items) = FakeDom::row(&[100.0, 100.0]);
        let config = SequencerConfig {
            padding_right: 40.0,
            ..SequencerConfig::default()
        };
        let snapshot = GeometrySnapshot::measure(&items, &dom, &config).unwrap();
        assert_eq!(snapshot.total_loop_length, 240.0);
    }

    #[test]
    fn test_single_item_loops_over_own_scaled_width() {
        let dom = FakeDom::new();
        let item = dom.add_scaled(50.0, 100.0, 1.5);
        let snapshot =
            GeometrySnapshot::measure(&[item], &dom, &SequencerConfig::default()).unwrap();
        assert_eq!(snapshot.total_loop_length, 150.0);
        assert_eq!(snapshot.items[0].percent_offset, 0.0);
    }

    #[test]
    fn test_offset_is_recorded_as_percent_and_reset() {
        let dom = FakeDom::new();
        let item = dom.add(0.0, 200.0);
        dom.set_offset(item, 50.0);
        let snapshot =
            GeometrySnapshot::measure(&[item], &dom, &SequencerConfig::default()).unwrap();
        assert_eq!(snapshot.items[0].percent_offset, 25.0);
        assert_eq!(dom.offset(item), 0.0);
        assert_eq!(dom.percent_offset(item), 25.0);
    }

    #[test]
    fn test_snap_damps_subpixel_jitter() {
        let dom = FakeDom::new();
        let item = dom.add(0.0, 100.0);
        dom.set_offset(item, 0.7);
        let snapshot =
            GeometrySnapshot::measure(&[item], &dom, &SequencerConfig::default()).unwrap();
        assert_eq!(snapshot.items[0].percent_offset, 1.0);

        dom.set_percent_offset(item, 0.0);
        dom.set_offset(item, 0.7);
        let config = SequencerConfig {
            snap: Snap::None,
            ..SequencerConfig::default()
        };
        let snapshot = GeometrySnapshot::measure(&[item], &dom, &config).unwrap();
        assert!((snapshot.items[0].percent_offset - 0.7).abs() < 1e-5);
    }

    #[test]
    fn test_zero_width_is_floored_not_propagated() {
        let dom = FakeDom::new();
        let item = dom.add(0.0, 0.0);
        let snapshot =
            GeometrySnapshot::measure(&[item], &dom, &SequencerConfig::default()).unwrap();
        assert_eq!(snapshot.items[0].width, MIN_ITEM_WIDTH);
        assert!(snapshot.total_loop_length.is_finite());
        assert!(snapshot.items[0].percent_offset.is_finite());
    }
}
