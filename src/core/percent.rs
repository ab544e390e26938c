/// Normalizes a sequence of measures into percentages of their sum.
///
/// A zero (or non-positive) sum degenerates to all-zero output instead of
/// dividing by zero. Non-finite or negative entries contribute nothing to the
/// sum and map to zero.
#[must_use]
pub fn percentages(values: &[f64]) -> Vec<f64> {
    let sum: f64 = values
        .iter()
        .copied()
        .filter(|v| v.is_finite() && *v > 0.0)
        .sum();

    if sum <= 0.0 {
        return vec![0.0; values.len()];
    }

    values
        .iter()
        .map(|v| {
            if v.is_finite() && *v > 0.0 {
                v / sum * 100.0
            } else {
                0.0
            }
        })
        .collect()
}

/// Normalizes a sequence of measures into integral percentages summing to
/// exactly 100 (or 0 for a zero-sum input).
///
/// The rounding remainder is distributed one unit at a time to the entries
/// with the largest fractional part, breaking ties by input order, so the
/// result is deterministic and order-stable.
#[must_use]
pub fn integral_percentages(values: &[f64]) -> Vec<u64> {
    let raw = percentages(values);
    if raw.iter().all(|p| *p == 0.0) {
        return vec![0; values.len()];
    }

    let mut result: Vec<u64> = raw.iter().map(|p| p.floor() as u64).collect();
    let assigned: u64 = result.iter().sum();
    let remainder = 100u64.saturating_sub(assigned);

    let mut order: Vec<usize> = (0..raw.len()).collect();
    order.sort_by(|a, b| {
        let frac_a = raw[*a] - raw[*a].floor();
        let frac_b = raw[*b] - raw[*b].floor();
        frac_b.total_cmp(&frac_a).then_with(|| a.cmp(b))
    });

    for index in order.into_iter().take(remainder as usize) {
        result[index] += 1;
    }

    result
}
