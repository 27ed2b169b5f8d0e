// Descriptive statistics shared by the winsorizer, the tests and the bootstrap
//
// All quantiles use linear interpolation between order statistics (the R-7
// definition), the default of most numeric libraries.

use std::cmp::Ordering;

/// Arithmetic mean; NaN for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Unbiased sample variance (n - 1 denominator); NaN below two values
pub fn sample_variance(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (n - 1) as f64
}

/// Sorted copy of a slice using IEEE total order
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    out.sort_by(f64::total_cmp);
    out
}

/// Quantile `q` in [0, 1] of already-sorted data
///
/// Panics in debug builds only if `sorted_data` is empty; callers guarantee a
/// non-empty input.
pub fn quantile_sorted(sorted_data: &[f64], q: f64) -> f64 {
    debug_assert!(!sorted_data.is_empty());
    if sorted_data.len() == 1 {
        return sorted_data[0];
    }

    let index = q.clamp(0.0, 1.0) * (sorted_data.len() - 1) as f64;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;

    if lower == upper {
        sorted_data[lower]
    } else {
        let weight = index - lower as f64;
        sorted_data[lower] + weight * (sorted_data[upper] - sorted_data[lower])
    }
}

/// Quantile of unsorted data
pub fn quantile(values: &[f64], q: f64) -> f64 {
    quantile_sorted(&sorted(values), q)
}

/// Relative lift `(mean_b - mean_a) / mean_a`
///
/// `None` when the control mean is zero or the lift is not finite (a mean
/// that overflowed to infinity).
pub fn relative_lift(mean_a: f64, mean_b: f64) -> Option<f64> {
    if mean_a == 0.0 || !mean_a.is_finite() {
        return None;
    }
    let lift = (mean_b - mean_a) / mean_a;
    lift.is_finite().then_some(lift)
}

/// Average (mid) ranks of values, 1-based, with ties sharing their mean rank
///
/// Also returns the tie term `sum(t^3 - t)` over tie groups.
pub fn average_ranks(values: &[f64]) -> (Vec<f64>, f64) {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&i, &j| values[i].partial_cmp(&values[j]).unwrap_or(Ordering::Equal));

    let mut ranks = vec![0.0; values.len()];
    let mut tie_term = 0.0;
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && values[order[end]] == values[order[start]] {
            end += 1;
        }
        // positions start..end share ranks start+1..=end
        let rank = (start + 1 + end) as f64 / 2.0;
        for &idx in &order[start..end] {
            ranks[idx] = rank;
        }
        let t = (end - start) as f64;
        tie_term += t * t * t - t;
        start = end;
    }

    (ranks, tie_term)
}
