// Two-sided winsorization
//
// Values below the p-quantile are raised to it and values above the
// (1 - p)-quantile are lowered to it. Sample size never changes.

use crate::analysis::sample::Sample;
use crate::analysis::statistics::{quantile_sorted, sorted};

/// Lower and upper clip bounds for proportion `p`, or `None` when `p <= 0`
pub fn winsor_bounds(values: &[f64], p: f64) -> Option<(f64, f64)> {
    if p <= 0.0 || values.is_empty() {
        return None;
    }
    let sorted = sorted(values);
    Some((quantile_sorted(&sorted, p), quantile_sorted(&sorted, 1.0 - p)))
}

/// Clip the tails of `values` at the `p` and `1 - p` quantiles
///
/// `p == 0` is the identity. When both bounds coincide (tiny or constant
/// samples) every value collapses to that point.
///
/// # Example
/// ```
/// use abtest::analysis::winsorize;
///
/// let data: Vec<f64> = (1..=10).map(f64::from).collect();
/// let clipped = winsorize(&data, 0.1);
/// assert!((clipped[0] - 1.9).abs() < 1e-12);
/// assert!((clipped[9] - 9.1).abs() < 1e-12);
/// assert_eq!(&clipped[1..9], &data[1..9]);
/// ```
pub fn winsorize(values: &[f64], p: f64) -> Vec<f64> {
    let Some((lower, upper)) = winsor_bounds(values, p) else {
        return values.to_vec();
    };

    values
        .iter()
        .map(|&v| {
            if v < lower {
                lower
            } else if v > upper {
                upper
            } else {
                v
            }
        })
        .collect()
}

/// Winsorize one group's sample
pub fn winsorize_sample(sample: &Sample, p: f64) -> Sample {
    if let Some((lower, upper)) = winsor_bounds(sample.values(), p) {
        tracing::debug!(p, lower, upper, n = sample.len(), "Winsorizing sample");
    }
    sample.map_values(|values| winsorize(values, p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_proportion_is_identity() {
        let data = vec![3.0, -1.0, 100.0, 2.5];
        assert_eq!(winsorize(&data, 0.0), data);
        assert_eq!(winsor_bounds(&data, 0.0), None);
    }

    #[test]
    fn test_clips_outliers() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 1000.0];
        let clipped = winsorize(&data, 0.25);
        // q(0.25) = 2, q(0.75) = 4
        assert_eq!(clipped, vec![2.0, 2.0, 3.0, 4.0, 4.0]);
    }

    #[test]
    fn test_preserves_order_and_length() {
        let data = vec![50.0, 1.0, 20.0, 99.0, 7.0];
        let clipped = winsorize(&data, 0.2);
        assert_eq!(clipped.len(), data.len());
        // middle values untouched, in original positions
        assert_eq!(clipped[0], 50.0);
        assert_eq!(clipped[2], 20.0);
    }

    #[test]
    fn test_ties_preserved() {
        let data = vec![5.0, 5.0, 5.0, 1.0, 9.0];
        let clipped = winsorize(&data, 0.25);
        assert_eq!(clipped, vec![5.0, 5.0, 5.0, 5.0, 5.0]);
    }

    #[test]
    fn test_degenerate_collapses_to_constant() {
        assert_eq!(winsorize(&[7.0], 0.4), vec![7.0]);
        assert_eq!(winsorize(&[3.0, 3.0, 3.0], 0.3), vec![3.0, 3.0, 3.0]);

        // bounds close in on the median for p near 0.5
        let clipped = winsorize(&[1.0, 2.0, 3.0], 0.499999);
        assert!(clipped.iter().all(|v| (v - 2.0).abs() < 1e-4));
    }

    #[test]
    fn test_exact_rank_proportion_is_idempotent() {
        let data = vec![9.0, -4.0, 2.0, 15.0, 3.0, 3.0, 8.0, 0.5, 11.0];
        // (n - 1) * p = 2 lands exactly on order statistics
        let once = winsorize(&data, 0.25);
        let twice = winsorize(&once, 0.25);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_winsorize_sample_keeps_size() {
        let sample = Sample::new(vec![1.0, 2.0, 3.0, 4.0, 1000.0]).unwrap();
        let clipped = winsorize_sample(&sample, 0.25);
        assert_eq!(clipped.len(), 5);
        assert_eq!(clipped.values()[4], 4.0);
    }

    #[test]
    fn test_empty_input() {
        assert!(winsorize(&[], 0.1).is_empty());
    }
}
