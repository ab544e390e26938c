use approx::assert_abs_diff_eq;
use stackbar_rs::core::{
    Insets, LayoutParams, Series, StackBuildConfig, TickCache, ValueAxis, Viewport, build_stacks,
    layout_chart,
};
use stackbar_rs::interaction::{aggregate_bars, bar_at, resolve_tap};
use stackbar_rs::render::Color;

const RED: Color = Color::rgb(0.8, 0.1, 0.1);
const BLUE: Color = Color::rgb(0.1, 0.1, 0.8);

fn params() -> LayoutParams {
    LayoutParams {
        padding: Insets::uniform(10.0),
        bar_padding_px: 10.0,
        bar_spacing_px: 10.0,
        min_tick_spacing_px: 50.0,
        main_axis_width_px: Some(40.0),
        cross_axis_width_px: Some(20.0),
        ..LayoutParams::default()
    }
}

fn vertical_layout() -> stackbar_rs::core::ChartLayout {
    let collection = build_stacks(
        &[
            Series::new(
                "one",
                vec![("A", 10.0), ("B", 20.0)],
                |v: &f64| *v,
                |_, _| RED,
            ),
            Series::new("two", vec![("A", 5.0)], |v: &f64| *v, |_, _| BLUE),
        ],
        &StackBuildConfig::default(),
    );
    layout_chart(&collection, &params(), Viewport::new(800, 600), &mut TickCache::new())
}

#[test]
fn aggregates_sum_segment_extents_per_bar() {
    let layout = vertical_layout();
    let aggregates = aggregate_bars(&layout);

    assert_eq!(aggregates.len(), 2);
    assert_eq!(aggregates[0].index, 0);
    assert_abs_diff_eq!(aggregates[0].height, 420.0, epsilon = 1e-9);
    assert_abs_diff_eq!(aggregates[0].width, 355.0, epsilon = 1e-9);
    assert_eq!(aggregates[1].index, 1);
    assert_abs_diff_eq!(aggregates[1].height, 560.0, epsilon = 1e-9);
}

#[test]
fn bar_at_resolves_the_bar_under_the_pointer() {
    let layout = vertical_layout();

    let hit = bar_at(&layout, 100.0, 300.0).expect("pointer over the first bar");
    assert_eq!(hit.index, 0);
    assert_abs_diff_eq!(hit.height, 420.0, epsilon = 1e-9);

    let hit = bar_at(&layout, 500.0, 300.0).expect("pointer over the second bar");
    assert_eq!(hit.index, 1);
}

#[test]
fn bar_at_misses_gaps_and_out_of_plot_coordinates() {
    let layout = vertical_layout();

    // The gap between the two slots.
    assert!(bar_at(&layout, 420.0, 300.0).is_none());
    // Inside the measure-axis label band.
    assert!(bar_at(&layout, 30.0, 300.0).is_none());
    // Outside the viewport entirely.
    assert!(bar_at(&layout, -5.0, -5.0).is_none());
    assert!(bar_at(&layout, f64::NAN, 300.0).is_none());
}

#[test]
fn resolve_tap_reports_all_bars_plus_the_hit_index() {
    let layout = vertical_layout();

    let resolution = resolve_tap(&layout, 430.0, 50.0);
    assert_eq!(resolution.bars.len(), 2);
    assert_eq!(resolution.hit, Some(1));

    let miss = resolve_tap(&layout, 420.0, 50.0);
    assert_eq!(miss.bars.len(), 2);
    assert_eq!(miss.hit, None);
}

#[test]
fn horizontal_aggregates_mirror_the_axes() {
    let collection = build_stacks(
        &[
            Series::new(
                "one",
                vec![("A", 10.0), ("B", 20.0)],
                |v: &f64| *v,
                |_, _| RED,
            ),
            Series::new("two", vec![("A", 5.0)], |v: &f64| *v, |_, _| BLUE),
        ],
        &StackBuildConfig::new(ValueAxis::Horizontal),
    );
    let layout =
        layout_chart(&collection, &params(), Viewport::new(800, 600), &mut TickCache::new());
    let aggregates = aggregate_bars(&layout);

    // Stacked extent lies along x for horizontal bars.
    assert_abs_diff_eq!(aggregates[0].width, 570.0, epsilon = 1e-9);
    assert_abs_diff_eq!(aggregates[0].height, 260.0, epsilon = 1e-9);
}

#[test]
fn empty_layout_has_no_aggregates() {
    let collection = build_stacks::<&str, f64>(&[], &StackBuildConfig::default());
    let layout =
        layout_chart(&collection, &params(), Viewport::new(800, 600), &mut TickCache::new());

    assert!(aggregate_bars(&layout).is_empty());
    assert!(bar_at(&layout, 100.0, 100.0).is_none());
}
