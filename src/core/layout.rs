use ordered_float::OrderedFloat;

use crate::core::stack::{Segment, Stack, StackCollection};
use crate::core::ticks::{TickCache, TickSet, format_tick_label};
use crate::core::types::{Insets, ValueAxis, Viewport};
use crate::render::{Color, CornerRadii};

/// Layout inputs distilled from the engine configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    pub padding: Insets,
    pub bar_padding_px: f64,
    pub bar_spacing_px: f64,
    pub min_tick_spacing_px: f64,
    /// Fixed measure-axis label band size; `None` auto-sizes to the widest
    /// tick label plus the label offset.
    pub main_axis_width_px: Option<f64>,
    /// Fixed domain-axis label band size; `None` auto-sizes to the label
    /// extent plus the label offset.
    pub cross_axis_width_px: Option<f64>,
    pub main_axis_labels_offset_px: f64,
    pub cross_axis_labels_offset_px: f64,
    pub main_axis_font_size_px: f64,
    pub cross_axis_font_size_px: f64,
    pub segment_label_font_size_px: f64,
    pub show_zero_values: bool,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            padding: Insets::default(),
            bar_padding_px: 4.0,
            bar_spacing_px: 8.0,
            min_tick_spacing_px: 32.0,
            main_axis_width_px: None,
            cross_axis_width_px: None,
            main_axis_labels_offset_px: 6.0,
            cross_axis_labels_offset_px: 6.0,
            main_axis_font_size_px: 12.0,
            cross_axis_font_size_px: 12.0,
            segment_label_font_size_px: 12.0,
            show_zero_values: false,
        }
    }
}

/// Axis-aligned rectangle in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlotRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotRect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    #[must_use]
    pub fn contains(self, x: f64, y: f64) -> bool {
        x.is_finite()
            && y.is_finite()
            && x >= self.x
            && x < self.right()
            && y >= self.y
            && y < self.bottom()
    }
}

/// Resolved geometry for one segment.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentLayout {
    pub rect: PlotRect,
    pub color: Color,
    pub label: Option<String>,
    pub corners: CornerRadii,
    pub value: f64,
}

/// Resolved geometry for one bar: its slot footprint across the full measure
/// extent plus the stacked segment rectangles.
#[derive(Debug, Clone, PartialEq)]
pub struct BarLayout {
    pub index: usize,
    pub label: String,
    pub footprint: PlotRect,
    pub segments: Vec<SegmentLayout>,
}

/// Ephemeral per-paint geometry for the whole chart. Recomputed every pass;
/// laying out the same collection twice with the same parameters yields
/// byte-identical output.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub viewport: Viewport,
    pub value_axis: ValueAxis,
    pub inverted: bool,
    pub plot: PlotRect,
    pub axis_min: f64,
    pub axis_max: f64,
    pub ticks: TickSet,
    pub bars: Vec<BarLayout>,
}

impl ChartLayout {
    #[must_use]
    pub fn empty(viewport: Viewport, value_axis: ValueAxis, inverted: bool) -> Self {
        Self {
            viewport,
            value_axis,
            inverted,
            plot: PlotRect::default(),
            axis_min: 0.0,
            axis_max: 0.0,
            ticks: TickSet::default(),
            bars: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Pixel extent of the measure axis.
    #[must_use]
    pub fn measure_extent(&self) -> f64 {
        match self.value_axis {
            ValueAxis::Vertical => self.plot.height,
            ValueAxis::Horizontal => self.plot.width,
        }
    }

    /// Maps a measure value to its screen coordinate along the measure axis
    /// (`y` for vertical charts, `x` for horizontal ones), honoring inversion.
    #[must_use]
    pub fn measure_coord(&self, value: f64) -> f64 {
        let span = self.axis_max - self.axis_min;
        let offset = if span > 0.0 {
            (value - self.axis_min) / span * self.measure_extent()
        } else {
            0.0
        };
        match (self.value_axis, self.inverted) {
            (ValueAxis::Vertical, false) => self.plot.bottom() - offset,
            (ValueAxis::Vertical, true) => self.plot.y + offset,
            (ValueAxis::Horizontal, false) => self.plot.x + offset,
            (ValueAxis::Horizontal, true) => self.plot.right() - offset,
        }
    }

    /// Screen coordinate of the zero baseline along the measure axis.
    #[must_use]
    pub fn baseline_coord(&self) -> f64 {
        self.measure_coord(0.0)
    }
}

/// Lays out a stack collection within `viewport`.
///
/// Degenerate inputs (invalid viewport, empty collection, exhausted plot
/// area) produce an empty layout rather than an error; painting an empty
/// layout issues no draw calls.
#[must_use]
pub fn layout_chart<D>(
    collection: &StackCollection<D>,
    params: &LayoutParams,
    viewport: Viewport,
    tick_cache: &mut TickCache,
) -> ChartLayout {
    let value_axis = collection.value_axis();
    let inverted = collection.inverted();

    if !viewport.is_valid() || collection.is_empty() {
        return ChartLayout::empty(viewport, value_axis, inverted);
    }

    let padding = if params.padding.is_finite() {
        params.padding
    } else {
        Insets::default()
    };
    let content = PlotRect::new(
        padding.left,
        padding.top,
        (f64::from(viewport.width) - padding.horizontal()).max(0.0),
        (f64::from(viewport.height) - padding.vertical()).max(0.0),
    );
    if content.is_degenerate() {
        return ChartLayout::empty(viewport, value_axis, inverted);
    }

    let (axis_min, axis_max) = axis_range(collection.stacks());

    let main_font = sane(params.main_axis_font_size_px);
    let cross_font = sane(params.cross_axis_font_size_px);
    let main_offset = sane(params.main_axis_labels_offset_px);
    let cross_offset = sane(params.cross_axis_labels_offset_px);

    // Each label band reduces the plot perpendicular to the axis it labels,
    // so the measure extent is known before the measure-label band is sized.
    let (left_band, bottom_band, ticks) = match value_axis {
        ValueAxis::Vertical => {
            let bottom = params
                .cross_axis_width_px
                .map_or(cross_font + cross_offset, sane);
            let extent = (content.height - bottom).max(0.0);
            let ticks = tick_cache.resolve(
                (axis_min, axis_max),
                extent,
                sane(params.min_tick_spacing_px),
            );
            let left = params.main_axis_width_px.map_or_else(
                || widest_tick_label(&ticks, main_font) + main_offset,
                sane,
            );
            (left, bottom, ticks)
        }
        ValueAxis::Horizontal => {
            let left = params.cross_axis_width_px.map_or_else(
                || widest_domain_label(collection.stacks(), cross_font) + cross_offset,
                sane,
            );
            let bottom = params
                .main_axis_width_px
                .map_or(main_font + main_offset, sane);
            let extent = (content.width - left).max(0.0);
            let ticks = tick_cache.resolve(
                (axis_min, axis_max),
                extent,
                sane(params.min_tick_spacing_px),
            );
            (left, bottom, ticks)
        }
    };

    let plot = PlotRect::new(
        content.x + left_band,
        content.y,
        (content.width - left_band).max(0.0),
        (content.height - bottom_band).max(0.0),
    );
    if plot.is_degenerate() {
        return ChartLayout::empty(viewport, value_axis, inverted);
    }

    let mut layout = ChartLayout {
        viewport,
        value_axis,
        inverted,
        plot,
        axis_min,
        axis_max,
        ticks,
        bars: Vec::new(),
    };
    layout.bars = layout_bars(collection.stacks(), &layout, params);
    layout
}

fn axis_range<D>(stacks: &[Stack<D>]) -> (f64, f64) {
    // The axis covers the cumulative extremes of every stack so that stacked
    // rectangles never leave the plot, and always includes the zero baseline.
    let min = stacks
        .iter()
        .map(|stack| OrderedFloat(cumulative_extremes(&stack.segments).0))
        .min()
        .map_or(0.0, |m| m.0);
    let max = stacks
        .iter()
        .map(|stack| OrderedFloat(cumulative_extremes(&stack.segments).1))
        .max()
        .map_or(0.0, |m| m.0);
    (min.min(0.0), max.max(0.0))
}

fn cumulative_extremes(segments: &[Segment]) -> (f64, f64) {
    let mut cumulative = 0.0;
    let mut low = 0.0f64;
    let mut high = 0.0f64;
    for segment in segments {
        cumulative += segment.value;
        low = low.min(cumulative);
        high = high.max(cumulative);
    }
    (low, high)
}

struct BarSlots {
    origin: f64,
    thickness: f64,
    advance: f64,
}

impl BarSlots {
    fn start(&self, index: usize) -> f64 {
        self.origin + index as f64 * self.advance
    }
}

fn bar_slots(domain_extent: f64, count: usize, params: &LayoutParams) -> BarSlots {
    let bar_padding = sane(params.bar_padding_px);
    let bar_spacing = sane(params.bar_spacing_px);
    let inner = (domain_extent - 2.0 * bar_padding).max(0.0);
    let usable = (inner - bar_spacing * (count.saturating_sub(1)) as f64).max(0.0);
    let thickness = if count > 0 { usable / count as f64 } else { 0.0 };
    BarSlots {
        origin: bar_padding,
        thickness,
        advance: thickness + bar_spacing,
    }
}

fn layout_bars<D>(
    stacks: &[Stack<D>],
    layout: &ChartLayout,
    params: &LayoutParams,
) -> Vec<BarLayout> {
    let domain_extent = match layout.value_axis {
        ValueAxis::Vertical => layout.plot.width,
        ValueAxis::Horizontal => layout.plot.height,
    };
    let slots = bar_slots(domain_extent, stacks.len(), params);

    // Geometry only needs labels, radii and segment values, which keeps the
    // projection inputs `Sync` independent of the domain key type.
    let inputs: Vec<(&str, f64, &[Segment])> = stacks
        .iter()
        .map(|stack| (stack.label.as_str(), stack.corner_radius, &stack.segments[..]))
        .collect();

    let project = |(index, &(label, corner_radius, segments)): (usize, &(&str, f64, &[Segment]))| {
        layout_one_bar(
            index,
            label,
            corner_radius,
            segments,
            layout,
            &slots,
            params,
        )
    };

    #[cfg(feature = "parallel-projection")]
    {
        use rayon::prelude::*;
        inputs.par_iter().enumerate().map(project).collect()
    }
    #[cfg(not(feature = "parallel-projection"))]
    {
        inputs.iter().enumerate().map(project).collect()
    }
}

#[allow(clippy::too_many_arguments)]
fn layout_one_bar(
    index: usize,
    label: &str,
    corner_radius: f64,
    segments: &[Segment],
    layout: &ChartLayout,
    slots: &BarSlots,
    params: &LayoutParams,
) -> BarLayout {
    let plot = layout.plot;
    let slot_start = match layout.value_axis {
        ValueAxis::Vertical => plot.x + slots.start(index),
        ValueAxis::Horizontal => plot.y + slots.start(index),
    };
    let footprint = match layout.value_axis {
        ValueAxis::Vertical => PlotRect::new(slot_start, plot.y, slots.thickness, plot.height),
        ValueAxis::Horizontal => PlotRect::new(plot.x, slot_start, plot.width, slots.thickness),
    };

    let mut cumulative = 0.0;
    let mut laid_out: Vec<SegmentLayout> = Vec::with_capacity(segments.len());
    for segment in segments {
        if segment.value == 0.0 && !params.show_zero_values {
            continue;
        }

        let from = layout.measure_coord(cumulative);
        cumulative += segment.value;
        let to = layout.measure_coord(cumulative);
        let (near, far) = if from <= to { (from, to) } else { (to, from) };
        let extent = far - near;

        let rect = match layout.value_axis {
            ValueAxis::Vertical => PlotRect::new(slot_start, near, slots.thickness, extent),
            ValueAxis::Horizontal => PlotRect::new(near, slot_start, extent, slots.thickness),
        };

        // An invisible segment cannot anchor a label; tiny ones cannot fit one.
        let label = if segment.value == 0.0 || extent < sane(params.segment_label_font_size_px) {
            None
        } else {
            segment.label.clone()
        };

        laid_out.push(SegmentLayout {
            rect,
            color: segment.color,
            label,
            corners: CornerRadii::default(),
            value: segment.value,
        });
    }

    apply_corner_rounding(&mut laid_out, corner_radius, layout);

    BarLayout {
        index,
        label: label.to_owned(),
        footprint,
        segments: laid_out,
    }
}

/// Rounds only the outer (non-adjoining) corners: the baseline-side corners
/// of the first visible segment and the far-side corners of the last.
fn apply_corner_rounding(segments: &mut [SegmentLayout], radius: f64, layout: &ChartLayout) {
    if radius <= 0.0 {
        return;
    }

    let visible: Vec<usize> = segments
        .iter()
        .enumerate()
        .filter(|(_, segment)| !segment.rect.is_degenerate())
        .map(|(index, _)| index)
        .collect();
    let (Some(&first), Some(&last)) = (visible.first(), visible.last()) else {
        return;
    };

    // "Positive side" = the side with the larger screen coordinate (bottom
    // for vertical charts, right for horizontal ones).
    let baseline_on_positive_side = matches!(
        (layout.value_axis, layout.inverted),
        (ValueAxis::Vertical, false) | (ValueAxis::Horizontal, true)
    );

    for (index, at_baseline) in [(first, true), (last, false)] {
        let segment = &mut segments[index];
        let clamp = (segment.rect.width * 0.5)
            .min(segment.rect.height * 0.5)
            .min(radius);
        let round_positive_side = at_baseline == baseline_on_positive_side;
        let corners = match (layout.value_axis, round_positive_side) {
            (ValueAxis::Vertical, false) => CornerRadii {
                top_left: clamp,
                top_right: clamp,
                ..segment.corners
            },
            (ValueAxis::Vertical, true) => CornerRadii {
                bottom_left: clamp,
                bottom_right: clamp,
                ..segment.corners
            },
            (ValueAxis::Horizontal, false) => CornerRadii {
                top_left: clamp,
                bottom_left: clamp,
                ..segment.corners
            },
            (ValueAxis::Horizontal, true) => CornerRadii {
                top_right: clamp,
                bottom_right: clamp,
                ..segment.corners
            },
        };
        segment.corners = corners;
    }
}

fn widest_tick_label(ticks: &TickSet, font_size_px: f64) -> f64 {
    ticks
        .ticks
        .iter()
        .map(|tick| {
            OrderedFloat(estimate_label_text_width_px(
                &format_tick_label(tick.value, ticks.step),
                font_size_px,
            ))
        })
        .max()
        .map_or(0.0, |m| m.0)
}

fn widest_domain_label<D>(stacks: &[Stack<D>], font_size_px: f64) -> f64 {
    stacks
        .iter()
        .map(|stack| OrderedFloat(estimate_label_text_width_px(&stack.label, font_size_px)))
        .max()
        .map_or(0.0, |m| m.0)
}

pub(crate) fn estimate_label_text_width_px(text: &str, font_size_px: f64) -> f64 {
    // Keep this estimate deterministic and backend-independent.
    let units = text.chars().fold(0.0, |acc, ch| {
        acc + match ch {
            '0'..='9' => 0.62,
            '.' | ',' => 0.34,
            '-' | '+' | '%' => 0.42,
            ' ' => 0.33,
            _ => 0.58,
        }
    });
    (units * font_size_px).max(font_size_px)
}

fn sane(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
