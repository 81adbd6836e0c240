/// Round to `decimals` places using the exact binary value of `value`.
///
/// Only exact ties go to even. Scaling first would turn 15.050000000000001
/// into the tie 150.5 and lose the upward rounding.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.*}", decimals, value).parse().unwrap_or(value)
}

/// Mean rounded to one decimal; an empty pool averages to 0.0, not null.
pub fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        round_to(values.iter().sum::<f64>() / values.len() as f64, 1)
    }
}

/// Share of `count` in `total` as a whole percentage, ties to even.
pub fn percent(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (count as f64 / total as f64 * 100.0).round_ties_even() as u32
}
