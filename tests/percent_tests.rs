use stackbar_rs::core::{integral_percentages, percentages};

#[test]
fn percentages_sum_to_one_hundred() {
    let result = percentages(&[10.0, 20.0, 30.0, 40.0]);
    let sum: f64 = result.iter().sum();
    assert!((sum - 100.0).abs() <= 1e-9);
    assert!((result[0] - 10.0).abs() <= 1e-9);
    assert!((result[3] - 40.0).abs() <= 1e-9);
}

#[test]
fn zero_sum_input_degenerates_to_all_zeros() {
    assert_eq!(percentages(&[0.0, 0.0]), vec![0.0, 0.0]);
    assert_eq!(percentages(&[]), Vec::<f64>::new());
    assert_eq!(integral_percentages(&[0.0, 0.0, 0.0]), vec![0, 0, 0]);
}

#[test]
fn integral_percentages_sum_to_exactly_one_hundred() {
    for values in [
        vec![1.0, 1.0, 1.0],
        vec![1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
        vec![10.0, 25.0, 13.0, 7.0, 45.0],
        vec![0.1, 0.2, 0.3],
    ] {
        let result = integral_percentages(&values);
        let sum: u64 = result.iter().sum();
        assert_eq!(sum, 100, "values: {values:?} -> {result:?}");
    }
}

#[test]
fn rounding_remainder_prefers_largest_fraction() {
    // Raw: 40.0, 34.28.., 25.71.. -> floors 40+34+25 = 99; the last entry has
    // the largest fraction and takes the remaining unit.
    assert_eq!(integral_percentages(&[14.0, 12.0, 9.0]), vec![40, 34, 26]);
}

#[test]
fn rounding_ties_break_by_input_order() {
    // Thirds tie on the fractional part; the earliest entry wins.
    assert_eq!(integral_percentages(&[1.0, 1.0, 1.0]), vec![34, 33, 33]);
    // Sixths: 16.66.. each, remainder 4 spread over the first four entries.
    assert_eq!(
        integral_percentages(&[1.0, 1.0, 1.0, 1.0, 1.0, 1.0]),
        vec![17, 17, 17, 17, 16, 16]
    );
}

#[test]
fn single_value_is_one_hundred_percent() {
    assert_eq!(percentages(&[42.0]), vec![100.0]);
    assert_eq!(integral_percentages(&[42.0]), vec![100]);
}
