use serde::{Deserialize, Serialize};

use crate::core::{ChartLayout, ValueAxis};

/// Aggregate geometry for one bar, as reported to tap handlers.
///
/// Extents sum the bar's segments along the measure axis and take the bar's
/// thickness on the domain axis, so for a vertical chart `height` is the
/// stacked height and `width` the bar width (mirrored when horizontal).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarAggregate {
    pub index: usize,
    pub height: f64,
    pub width: f64,
}

/// Result of resolving one tap: the ordered per-bar aggregates plus the index
/// of the bar whose footprint contains the pointer, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TapResolution {
    pub bars: Vec<BarAggregate>,
    pub hit: Option<usize>,
}

/// Computes the aggregate for every bar, in bar order.
#[must_use]
pub fn aggregate_bars(layout: &ChartLayout) -> Vec<BarAggregate> {
    layout
        .bars
        .iter()
        .map(|bar| {
            let stacked: f64 = bar
                .segments
                .iter()
                .map(|segment| match layout.value_axis {
                    ValueAxis::Vertical => segment.rect.height,
                    ValueAxis::Horizontal => segment.rect.width,
                })
                .sum();
            let (height, width) = match layout.value_axis {
                ValueAxis::Vertical => (stacked, bar.footprint.width),
                ValueAxis::Horizontal => (bar.footprint.height, stacked),
            };
            BarAggregate {
                index: bar.index,
                height,
                width,
            }
        })
        .collect()
}

/// Maps a pointer coordinate to the single bar whose slot footprint contains
/// it. Returns `None` for gaps, padding and out-of-plot coordinates.
#[must_use]
pub fn bar_at(layout: &ChartLayout, x: f64, y: f64) -> Option<BarAggregate> {
    let index = layout
        .bars
        .iter()
        .find(|bar| bar.footprint.contains(x, y))?
        .index;
    aggregate_bars(layout).into_iter().find(|bar| bar.index == index)
}

/// Resolves a tap into the full aggregate list plus the hit bar index.
#[must_use]
pub fn resolve_tap(layout: &ChartLayout, x: f64, y: f64) -> TapResolution {
    let bars = aggregate_bars(layout);
    let hit = layout
        .bars
        .iter()
        .find(|bar| bar.footprint.contains(x, y))
        .map(|bar| bar.index);
    TapResolution { bars, hit }
}
