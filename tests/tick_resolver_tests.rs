use stackbar_rs::core::{TickCache, resolve_ticks};

#[test]
fn tick_count_respects_spacing_budget() {
    // 256 px at 64 px minimum spacing leaves 4 slots over [0, 100].
    let set = resolve_ticks((0.0, 100.0), 256.0, 64.0);
    assert!(!set.is_empty());
    assert!(set.len() <= 4, "got {} ticks", set.len());
    assert_eq!(set.step, 50.0);
}

#[test]
fn consecutive_ticks_keep_minimum_pixel_distance() {
    let set = resolve_ticks((0.0, 100.0), 256.0, 64.0);
    for pair in set.ticks.windows(2) {
        assert!(pair[1].offset_px - pair[0].offset_px >= 64.0);
    }
}

#[test]
fn ticks_cover_the_range_with_nice_values() {
    let set = resolve_ticks((0.0, 20.0), 560.0, 50.0);
    assert_eq!(set.step, 2.0);
    assert_eq!(set.ticks.first().expect("ticks").value, 0.0);
    assert_eq!(set.ticks.last().expect("ticks").value, 20.0);
    assert_eq!(set.len(), 11);
}

#[test]
fn zero_range_yields_single_tick_at_zero() {
    let set = resolve_ticks((0.0, 0.0), 300.0, 40.0);
    assert_eq!(set.len(), 1);
    assert_eq!(set.ticks[0].value, 0.0);
}

#[test]
fn degenerate_axis_yields_empty_set() {
    assert!(resolve_ticks((0.0, 100.0), 0.0, 40.0).is_empty());
    assert!(resolve_ticks((0.0, 100.0), -10.0, 40.0).is_empty());
    assert!(resolve_ticks((0.0, 100.0), 300.0, 0.0).is_empty());
    assert!(resolve_ticks((0.0, 100.0), f64::NAN, 40.0).is_empty());
    // Spacing wider than the axis leaves no slots at all.
    assert!(resolve_ticks((0.0, 100.0), 30.0, 40.0).is_empty());
}

#[test]
fn negative_only_range_is_supported() {
    let set = resolve_ticks((-100.0, 0.0), 256.0, 64.0);
    assert!(!set.is_empty());
    assert_eq!(set.ticks.first().expect("ticks").value, -100.0);
    assert_eq!(set.ticks.last().expect("ticks").value, 0.0);
}

#[test]
fn mixed_sign_range_is_supported() {
    let set = resolve_ticks((-50.0, 100.0), 600.0, 60.0);
    assert!(set.ticks.iter().any(|tick| tick.value == 0.0));
    for pair in set.ticks.windows(2) {
        assert!(pair[1].offset_px - pair[0].offset_px >= 60.0);
    }
}

#[test]
fn offsets_grow_monotonically_from_the_baseline_end() {
    let set = resolve_ticks((0.0, 100.0), 500.0, 50.0);
    assert_eq!(set.ticks.first().expect("ticks").offset_px, 0.0);
    for pair in set.ticks.windows(2) {
        assert!(pair[1].offset_px > pair[0].offset_px);
    }
    assert!(set.ticks.last().expect("ticks").offset_px <= 500.0 + 1e-9);
}

#[test]
fn cache_returns_identical_sets_for_identical_inputs() {
    let mut cache = TickCache::new();
    let first = cache.resolve((0.0, 100.0), 256.0, 64.0);
    let second = cache.resolve((0.0, 100.0), 256.0, 64.0);
    assert_eq!(first, second);

    // A changed input recomputes rather than serving the stale set.
    let third = cache.resolve((0.0, 100.0), 512.0, 64.0);
    assert!(third.len() > first.len());
}
