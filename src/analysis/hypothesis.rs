// Two-sample hypothesis tests: Welch's t-test and Mann-Whitney U
//
// Both tests are two-sided, order-insensitive and independent of each other.
// Degenerate numeric input is surfaced as NaN, never coerced to 0 or 1.
//
// - Welch: t = (mean_B - mean_A) / sqrt(var_A/n_A + var_B/n_B) with
//   Welch-Satterthwaite degrees of freedom and unbiased variances
// - Mann-Whitney: U referenced to group A, exact null distribution for
//   small tie-free samples, tie-corrected normal approximation otherwise

use crate::analysis::statistics::{average_ranks, mean, sample_variance};
use crate::error::{AnalysisError, Result};
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal, StudentsT};

/// Largest per-group size for which the exact U distribution is used
pub const EXACT_MANN_WHITNEY_MAX_N: usize = 8;

/// Result of Welch's unequal-variance t-test
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WelchTest {
    /// t-statistic; positive when B's mean exceeds A's
    pub statistic: f64,

    /// Welch-Satterthwaite degrees of freedom
    pub df: f64,

    /// Two-sided p-value (NaN when the statistic is undefined)
    pub pvalue: f64,
}

/// How the Mann-Whitney p-value was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PValueMethod {
    Exact,
    Asymptotic,
}

/// Result of the Mann-Whitney U test
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MannWhitneyTest {
    /// U for group A, in [0, n_A * n_B]
    pub statistic: f64,

    /// Two-sided p-value
    pub pvalue: f64,

    pub method: PValueMethod,
}

fn require_testable(a: &[f64], b: &[f64]) -> Result<()> {
    for (group, sample) in [('A', a), ('B', b)] {
        if sample.len() < 2 {
            return Err(AnalysisError::DegenerateSample {
                group,
                n: sample.len(),
            });
        }
    }
    Ok(())
}

/// Welch's two-sided t-test of equal means
///
/// # Example
/// ```
/// use abtest::analysis::welch_t_test;
///
/// let a = [10.0, 10.0, 10.0, 12.0];
/// let b = [12.0, 12.0, 12.0, 14.0];
/// let test = welch_t_test(&a, &b).unwrap();
/// assert!(test.statistic > 0.0);
/// assert!((test.df - 6.0).abs() < 1e-9);
/// assert!(test.pvalue < 0.05);
/// ```
pub fn welch_t_test(a: &[f64], b: &[f64]) -> Result<WelchTest> {
    require_testable(a, b)?;

    let n_a = a.len() as f64;
    let n_b = b.len() as f64;
    let se_a = sample_variance(a) / n_a;
    let se_b = sample_variance(b) / n_b;
    let se_sum = se_a + se_b;

    let statistic = (mean(b) - mean(a)) / se_sum.sqrt();
    let df = se_sum.powi(2) / (se_a.powi(2) / (n_a - 1.0) + se_b.powi(2) / (n_b - 1.0));
    let pvalue = students_t_two_sided(statistic, df);

    if pvalue.is_nan() {
        tracing::warn!(statistic, df, "Welch t-test is undefined (zero variance in both groups?)");
    }

    Ok(WelchTest {
        statistic,
        df,
        pvalue,
    })
}

fn students_t_two_sided(t: f64, df: f64) -> f64 {
    if t.is_nan() || !df.is_finite() || df <= 0.0 {
        return f64::NAN;
    }
    match StudentsT::new(0.0, 1.0, df) {
        Ok(dist) => (2.0 * dist.sf(t.abs())).min(1.0),
        Err(_) => f64::NAN,
    }
}

/// Two-sided Mann-Whitney U test
///
/// # Example
/// ```
/// use abtest::analysis::{mann_whitney_u, PValueMethod};
///
/// let test = mann_whitney_u(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]).unwrap();
/// assert_eq!(test.statistic, 0.0);
/// assert_eq!(test.method, PValueMethod::Exact);
/// assert!((test.pvalue - 0.1).abs() < 1e-12);
/// ```
pub fn mann_whitney_u(a: &[f64], b: &[f64]) -> Result<MannWhitneyTest> {
    require_testable(a, b)?;

    let n_a = a.len();
    let n_b = b.len();
    let pooled: Vec<f64> = a.iter().chain(b).copied().collect();
    let (ranks, tie_term) = average_ranks(&pooled);

    let rank_sum_a: f64 = ranks[..n_a].iter().sum();
    let n_a_f = n_a as f64;
    let n_b_f = n_b as f64;
    let u_a = rank_sum_a - n_a_f * (n_a_f + 1.0) / 2.0;
    let u_b = n_a_f * n_b_f - u_a;
    let u_max = u_a.max(u_b);

    let exact = n_a <= EXACT_MANN_WHITNEY_MAX_N && n_b <= EXACT_MANN_WHITNEY_MAX_N && tie_term == 0.0;

    let (pvalue, method) = if exact {
        // without ties U is an integer
        let p = 2.0 * exact_u_upper_tail(n_a, n_b, u_max.round() as usize);
        (p.min(1.0), PValueMethod::Exact)
    } else {
        (
            normal_approximation(n_a_f, n_b_f, u_max, tie_term),
            PValueMethod::Asymptotic,
        )
    };

    Ok(MannWhitneyTest {
        statistic: u_a,
        pvalue,
        method,
    })
}

/// Tie-corrected normal approximation with continuity correction
fn normal_approximation(n_a: f64, n_b: f64, u_max: f64, tie_term: f64) -> f64 {
    let n = n_a + n_b;
    let mu = n_a * n_b / 2.0;
    let variance = n_a * n_b / 12.0 * ((n + 1.0) - tie_term / (n * (n - 1.0)));

    // every pooled value identical: no evidence either way
    if variance <= 0.0 {
        return 1.0;
    }

    let z = (u_max - mu - 0.5) / variance.sqrt();
    match Normal::new(0.0, 1.0) {
        Ok(normal) => (2.0 * normal.sf(z)).clamp(0.0, 1.0),
        Err(_) => f64::NAN,
    }
}

/// P(U >= u) under the null for sample sizes m and n without ties
fn exact_u_upper_tail(m: usize, n: usize, u: usize) -> f64 {
    let counts = u_distribution_counts(m, n);
    let total: u64 = counts.iter().sum();
    let upper: u64 = counts.iter().skip(u).sum();
    upper as f64 / total as f64
}

/// Number of rank arrangements producing each U value in 0..=m*n
///
/// Uses f(i, j, u) = f(i - 1, j, u - j) + f(i, j - 1, u).
fn u_distribution_counts(m: usize, n: usize) -> Vec<u64> {
    // table[j] holds the counts for (i, j) while sweeping i upwards
    let mut table: Vec<Vec<u64>> = vec![vec![1]; n + 1];
    for i in 1..=m {
        let mut row: Vec<Vec<u64>> = Vec::with_capacity(n + 1);
        row.push(vec![1]);
        for j in 1..=n {
            let mut counts = vec![0u64; i * j + 1];
            for (u, slot) in counts.iter_mut().enumerate() {
                let from_left = if u >= j {
                    table[j].get(u - j).copied().unwrap_or(0)
                } else {
                    0
                };
                let from_below = row[j - 1].get(u).copied().unwrap_or(0);
                *slot = from_left + from_below;
            }
            row.push(counts);
        }
        table = row;
    }
    table.swap_remove(n)
}
