use stackbar_rs::core::{Series, StackBuildConfig, ValueAxis, build_stacks};
use stackbar_rs::render::Color;

const RED: Color = Color::rgb(0.8, 0.1, 0.1);
const BLUE: Color = Color::rgb(0.1, 0.1, 0.8);

fn series(name: &str, data: Vec<(&'static str, f64)>, color: Color) -> Series<&'static str, f64> {
    Series::new(name, data, |value: &f64| *value, move |_, _| color)
}

#[test]
fn sparse_series_produce_uneven_stacks() {
    // Two series over domains {A, B}: series 1 has both, series 2 only A.
    let all = vec![
        series("one", vec![("A", 10.0), ("B", 20.0)], RED),
        series("two", vec![("A", 5.0)], BLUE),
    ];
    let collection = build_stacks(&all, &StackBuildConfig::default());

    assert_eq!(collection.len(), 2);

    let stack_a = &collection.stacks()[0];
    assert_eq!(stack_a.domain, "A");
    assert_eq!(stack_a.segments.len(), 2);
    assert_eq!(stack_a.segments[0].value, 10.0);
    assert_eq!(stack_a.segments[1].value, 5.0);
    assert!((stack_a.total() - 15.0).abs() <= 1e-12);

    let stack_b = &collection.stacks()[1];
    assert_eq!(stack_b.domain, "B");
    assert_eq!(stack_b.segments.len(), 1);
    assert!((stack_b.total() - 20.0).abs() <= 1e-12);
}

#[test]
fn domain_order_is_first_seen_across_series() {
    let all = vec![
        series("one", vec![("B", 1.0), ("A", 2.0)], RED),
        series("two", vec![("C", 3.0), ("A", 4.0)], BLUE),
    ];
    let collection = build_stacks(&all, &StackBuildConfig::default());

    let domains: Vec<&str> = collection
        .stacks()
        .iter()
        .map(|stack| stack.domain)
        .collect();
    assert_eq!(domains, vec!["B", "A", "C"]);
}

#[test]
fn segment_order_equals_series_order() {
    let all = vec![
        series("one", vec![("A", 1.0)], RED),
        series("two", vec![("A", 2.0)], BLUE),
    ];
    let collection = build_stacks(&all, &StackBuildConfig::default());

    let stack = &collection.stacks()[0];
    assert_eq!(stack.segments[0].color, RED);
    assert_eq!(stack.segments[1].color, BLUE);
}

#[test]
fn label_accessor_receives_per_series_percent() {
    let all = vec![
        series("one", vec![("A", 10.0), ("B", 20.0)], RED)
            .with_label(|_, _, percent| Some(format!("{percent:.1}%"))),
        series("two", vec![("A", 5.0)], BLUE)
            .with_label(|_, _, percent| Some(format!("{percent:.1}%"))),
    ];
    let collection = build_stacks(&all, &StackBuildConfig::default());

    let stack_a = &collection.stacks()[0];
    assert_eq!(stack_a.segments[0].label.as_deref(), Some("33.3%"));
    assert_eq!(stack_a.segments[1].label.as_deref(), Some("100.0%"));
    let stack_b = &collection.stacks()[1];
    assert_eq!(stack_b.segments[0].label.as_deref(), Some("66.7%"));
}

#[test]
fn default_domain_label_uses_display() {
    let all = vec![Series::new(
        "one",
        vec![(7u32, 1.0f64)],
        |value: &f64| *value,
        |_, _| RED,
    )];
    let collection = build_stacks(&all, &StackBuildConfig::default());
    assert_eq!(collection.stacks()[0].label, "7");
}

#[test]
fn domain_formatter_overrides_display() {
    let all = vec![series("one", vec![("A", 1.0)], RED)];
    let config = StackBuildConfig::default().with_domain_formatter(|domain| format!("[{domain}]"));
    let collection = build_stacks(&all, &config);
    assert_eq!(collection.stacks()[0].label, "[A]");
}

#[test]
fn build_is_deterministic() {
    let make = || {
        build_stacks(
            &[
                series("one", vec![("A", 10.0), ("B", 20.0)], RED),
                series("two", vec![("B", 1.0), ("C", 2.0)], BLUE),
            ],
            &StackBuildConfig::new(ValueAxis::Horizontal)
                .with_inverted(true)
                .with_corner_radius(3.0),
        )
    };
    assert_eq!(make(), make());
}

#[test]
fn collection_carries_orientation_and_radius() {
    let all = vec![series("one", vec![("A", 1.0)], RED)];
    let config = StackBuildConfig::new(ValueAxis::Horizontal)
        .with_inverted(true)
        .with_corner_radius(5.0);
    let collection = build_stacks(&all, &config);

    assert_eq!(collection.value_axis(), ValueAxis::Horizontal);
    assert!(collection.inverted());
    assert_eq!(collection.stacks()[0].corner_radius, 5.0);
}

#[test]
fn non_finite_measures_are_sanitized_to_zero() {
    let all = vec![series("one", vec![("A", f64::NAN), ("B", 10.0)], RED)];
    let collection = build_stacks(&all, &StackBuildConfig::default());
    assert_eq!(collection.stacks()[0].segments[0].value, 0.0);
    assert_eq!(collection.stacks()[1].segments[0].value, 10.0);
}

#[test]
fn empty_series_list_builds_empty_collection() {
    let collection = build_stacks::<&str, f64>(&[], &StackBuildConfig::default());
    assert!(collection.is_empty());
}

#[test]
fn compatibility_ignores_per_series_distribution() {
    let old = build_stacks(
        &[series("one", vec![("A", 1.0), ("B", 2.0)], RED)],
        &StackBuildConfig::default(),
    );
    let new = build_stacks(
        &[
            series("one", vec![("A", 1.0)], RED),
            series("two", vec![("B", 2.0)], BLUE),
        ],
        &StackBuildConfig::default(),
    );

    assert!(old.is_compatible_with(&new));
    assert!(new.is_compatible_with(&old));
}

#[test]
fn differing_domain_sets_are_incompatible() {
    let old = build_stacks(
        &[series("one", vec![("A", 1.0), ("B", 2.0)], RED)],
        &StackBuildConfig::default(),
    );
    let new = build_stacks(
        &[series("one", vec![("A", 1.0), ("C", 2.0)], RED)],
        &StackBuildConfig::default(),
    );

    assert!(!old.is_compatible_with(&new));
}

#[test]
fn value_equality_detects_changes_and_no_ops() {
    let base = || {
        build_stacks(
            &[series("one", vec![("A", 1.0), ("B", 2.0)], RED)],
            &StackBuildConfig::default(),
        )
    };
    let changed = build_stacks(
        &[series("one", vec![("A", 1.5), ("B", 2.0)], RED)],
        &StackBuildConfig::default(),
    );
    let recolored = build_stacks(
        &[series("one", vec![("A", 1.0), ("B", 2.0)], BLUE)],
        &StackBuildConfig::default(),
    );

    assert!(base().has_same_values(&base()));
    assert!(!base().has_same_values(&changed));
    // Colors do not affect geometry, so they do not count as value changes.
    assert!(base().has_same_values(&recolored));
}
