/// One measure-axis graduation: its value and its pixel offset from the
/// baseline end of the axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub offset_px: f64,
}

/// Ordered tick values/positions for the measure axis.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TickSet {
    pub ticks: Vec<Tick>,
    pub step: f64,
}

impl TickSet {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ticks.len()
    }
}

/// Computes evenly distributed ticks for `range` over an axis of
/// `axis_length_px`, keeping adjacent ticks at least `min_spacing_px` apart.
///
/// The step is the smallest nice value (1, 2 or 5 times a power of ten) whose
/// interval count fits the `axis_length_px / min_spacing_px` slot budget.
/// Degenerate inputs produce an empty set; a zero-span range produces a single
/// tick at that value.
#[must_use]
pub fn resolve_ticks(range: (f64, f64), axis_length_px: f64, min_spacing_px: f64) -> TickSet {
    if !axis_length_px.is_finite() || axis_length_px <= 0.0 {
        return TickSet::default();
    }
    if !min_spacing_px.is_finite() || min_spacing_px <= 0.0 {
        return TickSet::default();
    }

    let (min, max) = range;
    if !min.is_finite() || !max.is_finite() || max < min {
        return TickSet::default();
    }

    let span = max - min;
    if span == 0.0 {
        return TickSet {
            ticks: vec![Tick {
                value: min,
                offset_px: 0.0,
            }],
            step: 0.0,
        };
    }

    let slots = (axis_length_px / min_spacing_px).floor();
    if slots < 1.0 {
        return TickSet::default();
    }

    let step = nice_step_at_least(span / slots);
    if step <= 0.0 {
        return TickSet::default();
    }

    let mut ticks = Vec::new();
    let first_index = (min / step).ceil();
    let mut index = first_index;
    // Tolerate float drift at the top end so `max` itself is not dropped.
    let limit = max + step * 1e-9;
    while index * step <= limit {
        let value = index * step;
        let value = if value == 0.0 { 0.0 } else { value };
        ticks.push(Tick {
            value,
            offset_px: (value - min) / span * axis_length_px,
        });
        index += 1.0;
    }

    TickSet { ticks, step }
}

/// Smallest value of the form {1, 2, 5} * 10^k that is >= `raw`.
#[must_use]
pub fn nice_step_at_least(raw: f64) -> f64 {
    if !raw.is_finite() || raw <= 0.0 {
        return 0.0;
    }

    let magnitude = 10f64.powf(raw.log10().floor());
    for multiplier in [1.0, 2.0, 5.0, 10.0] {
        let step = multiplier * magnitude;
        if step >= raw * (1.0 - 1e-9) {
            return step;
        }
    }

    10.0 * magnitude
}

/// Formats a tick value with the number of decimals implied by the step.
#[must_use]
pub fn format_tick_label(value: f64, step: f64) -> String {
    let mut decimals = 0usize;
    if step > 0.0 {
        let mut scaled = step;
        while decimals < 6 && (scaled - scaled.round()).abs() > 1e-9 {
            scaled *= 10.0;
            decimals += 1;
        }
    }
    format!("{value:.decimals$}")
}

/// Memoizes the most recent tick resolution.
///
/// Tick sets only change when the axis length, the spacing constraint or the
/// covered range changes, so one slot is enough for the frame-driven call
/// pattern.
#[derive(Debug, Clone, Default)]
pub struct TickCache {
    key: Option<(u64, u64, u64, u64)>,
    cached: TickSet,
}

impl TickCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(
        &mut self,
        range: (f64, f64),
        axis_length_px: f64,
        min_spacing_px: f64,
    ) -> TickSet {
        let key = (
            range.0.to_bits(),
            range.1.to_bits(),
            axis_length_px.to_bits(),
            min_spacing_px.to_bits(),
        );
        if self.key != Some(key) {
            self.cached = resolve_ticks(range, axis_length_px, min_spacing_px);
            self.key = Some(key);
        }
        self.cached.clone()
    }

    pub fn invalidate(&mut self) {
        self.key = None;
    }
}

#[cfg(test)]
mod tests {
    use super::{format_tick_label, nice_step_at_least, resolve_ticks};

    #[test]
    fn nice_step_rounds_up_to_one_two_five() {
        assert_eq!(nice_step_at_least(0.3), 0.5);
        assert_eq!(nice_step_at_least(1.0), 1.0);
        assert_eq!(nice_step_at_least(3.0), 5.0);
        assert_eq!(nice_step_at_least(25.0), 50.0);
        assert_eq!(nice_step_at_least(60.0), 100.0);
    }

    #[test]
    fn zero_span_yields_single_tick() {
        let set = resolve_ticks((0.0, 0.0), 300.0, 50.0);
        assert_eq!(set.len(), 1);
        assert_eq!(set.ticks[0].value, 0.0);
        assert_eq!(set.ticks[0].offset_px, 0.0);
    }

    #[test]
    fn degenerate_length_yields_empty_set() {
        assert!(resolve_ticks((0.0, 100.0), 0.0, 50.0).is_empty());
        assert!(resolve_ticks((0.0, 100.0), 300.0, 0.0).is_empty());
    }

    #[test]
    fn mixed_sign_range_includes_zero() {
        let set = resolve_ticks((-50.0, 100.0), 600.0, 60.0);
        assert!(set.ticks.iter().any(|t| t.value == 0.0));
        assert!(set.ticks.first().expect("ticks").value >= -50.0);
        assert!(set.ticks.last().expect("ticks").value <= 100.0);
    }

    #[test]
    fn label_decimals_follow_step() {
        assert_eq!(format_tick_label(5.0, 1.0), "5");
        assert_eq!(format_tick_label(0.25, 0.25), "0.25");
        assert_eq!(format_tick_label(0.5, 0.5), "0.5");
    }
}
