use crate::core::layout::{BarLayout, ChartLayout};
use crate::core::{ValueAxis, format_tick_label};
use crate::render::{LinePrimitive, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive};

use super::ChartEngineConfig;

/// Converts resolved geometry into a backend-agnostic draw pass.
///
/// Draw order: guide lines under everything, then segment fills, then axis
/// chrome, then labels. An empty layout produces an empty frame.
pub(super) fn build_frame(layout: &ChartLayout, config: &ChartEngineConfig) -> RenderFrame {
    let mut frame = RenderFrame::new(layout.viewport);
    if layout.is_empty() {
        return frame;
    }

    push_guide_lines(&mut frame, layout, config);
    push_segments(&mut frame, layout);
    push_axis_lines(&mut frame, layout, config);
    push_tick_labels(&mut frame, layout, config);
    push_domain_labels(&mut frame, layout, config);
    push_segment_labels(&mut frame, layout, config);

    frame
}

fn push_guide_lines(frame: &mut RenderFrame, layout: &ChartLayout, config: &ChartEngineConfig) {
    let style = config.guide_line;
    if style.thickness_px <= 0.0 {
        return;
    }

    let plot = layout.plot;
    for tick in &layout.ticks.ticks {
        let coord = layout.measure_coord(tick.value);
        let line = match layout.value_axis {
            ValueAxis::Vertical => {
                LinePrimitive::new(plot.x, coord, plot.right(), coord, style.thickness_px, style.color)
            }
            ValueAxis::Horizontal => {
                LinePrimitive::new(coord, plot.y, coord, plot.bottom(), style.thickness_px, style.color)
            }
        };
        frame.push_line(line);
    }
}

fn push_segments(frame: &mut RenderFrame, layout: &ChartLayout) {
    for bar in &layout.bars {
        for segment in &bar.segments {
            if segment.rect.is_degenerate() {
                continue;
            }
            frame.push_rect(
                RectPrimitive::new(
                    segment.rect.x,
                    segment.rect.y,
                    segment.rect.width,
                    segment.rect.height,
                    segment.color,
                )
                .with_corners(segment.corners),
            );
        }
    }
}

fn push_axis_lines(frame: &mut RenderFrame, layout: &ChartLayout, config: &ChartEngineConfig) {
    let style = config.axis_line;
    if style.thickness_px <= 0.0 {
        return;
    }
    let plot = layout.plot;

    if config.show_main_axis_line {
        let line = match layout.value_axis {
            ValueAxis::Vertical => {
                LinePrimitive::new(plot.x, plot.y, plot.x, plot.bottom(), style.thickness_px, style.color)
            }
            ValueAxis::Horizontal => LinePrimitive::new(
                plot.x,
                plot.bottom(),
                plot.right(),
                plot.bottom(),
                style.thickness_px,
                style.color,
            ),
        };
        frame.push_line(line);

        let mark_length = config.tick_mark_length_px;
        if mark_length > 0.0 {
            for tick in &layout.ticks.ticks {
                let coord = layout.measure_coord(tick.value);
                let mark = match layout.value_axis {
                    ValueAxis::Vertical => LinePrimitive::new(
                        plot.x - mark_length,
                        coord,
                        plot.x,
                        coord,
                        style.thickness_px,
                        style.color,
                    ),
                    ValueAxis::Horizontal => LinePrimitive::new(
                        coord,
                        plot.bottom(),
                        coord,
                        plot.bottom() + mark_length,
                        style.thickness_px,
                        style.color,
                    ),
                };
                frame.push_line(mark);
            }
        }
    }

    if config.show_cross_axis_line {
        let baseline = layout.baseline_coord();
        let line = match layout.value_axis {
            ValueAxis::Vertical => LinePrimitive::new(
                plot.x,
                baseline,
                plot.right(),
                baseline,
                style.thickness_px,
                style.color,
            ),
            ValueAxis::Horizontal => LinePrimitive::new(
                baseline,
                plot.y,
                baseline,
                plot.bottom(),
                style.thickness_px,
                style.color,
            ),
        };
        frame.push_line(line);
    }
}

fn push_tick_labels(frame: &mut RenderFrame, layout: &ChartLayout, config: &ChartEngineConfig) {
    let style = config.main_axis_text;
    let plot = layout.plot;

    for tick in &layout.ticks.ticks {
        let text = format_tick_label(tick.value, layout.ticks.step);
        if text.is_empty() {
            continue;
        }
        let coord = layout.measure_coord(tick.value);
        let primitive = match layout.value_axis {
            ValueAxis::Vertical => TextPrimitive::new(
                text,
                plot.x - config.main_axis_labels_offset_px,
                coord - style.font_size_px * 0.5,
                style.font_size_px,
                style.color,
                TextHAlign::Right,
            ),
            ValueAxis::Horizontal => TextPrimitive::new(
                text,
                coord,
                plot.bottom() + config.main_axis_labels_offset_px,
                style.font_size_px,
                style.color,
                TextHAlign::Center,
            ),
        };
        frame.push_text(primitive);
    }
}

fn push_domain_labels(frame: &mut RenderFrame, layout: &ChartLayout, config: &ChartEngineConfig) {
    let style = config.cross_axis_text;
    let plot = layout.plot;

    for bar in &layout.bars {
        if bar.label.is_empty() {
            continue;
        }
        let primitive = match layout.value_axis {
            ValueAxis::Vertical => TextPrimitive::new(
                bar.label.clone(),
                bar_center(bar, ValueAxis::Vertical),
                plot.bottom() + config.cross_axis_labels_offset_px,
                style.font_size_px,
                style.color,
                TextHAlign::Center,
            ),
            ValueAxis::Horizontal => TextPrimitive::new(
                bar.label.clone(),
                plot.x - config.cross_axis_labels_offset_px,
                bar_center(bar, ValueAxis::Horizontal) - style.font_size_px * 0.5,
                style.font_size_px,
                style.color,
                TextHAlign::Right,
            ),
        };
        frame.push_text(primitive);
    }
}

fn push_segment_labels(frame: &mut RenderFrame, layout: &ChartLayout, config: &ChartEngineConfig) {
    let style = config.segment_label_text;

    for bar in &layout.bars {
        for segment in &bar.segments {
            let Some(label) = &segment.label else {
                continue;
            };
            if label.is_empty() || segment.rect.is_degenerate() {
                continue;
            }
            frame.push_text(TextPrimitive::new(
                label.clone(),
                segment.rect.x + segment.rect.width * 0.5,
                segment.rect.y + segment.rect.height * 0.5 - style.font_size_px * 0.5,
                style.font_size_px,
                style.color,
                TextHAlign::Center,
            ));
        }
    }
}

fn bar_center(bar: &BarLayout, value_axis: ValueAxis) -> f64 {
    match value_axis {
        ValueAxis::Vertical => bar.footprint.x + bar.footprint.width * 0.5,
        ValueAxis::Horizontal => bar.footprint.y + bar.footprint.height * 0.5,
    }
}
