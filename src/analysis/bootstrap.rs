// Percentile bootstrap confidence interval for relative lift
//
// Each iteration resamples A and B with replacement (independently, at their
// original sizes) and records (mean_B* - mean_A*) / mean_A*. Iterations whose
// resampled control mean is zero are excluded, not counted as zero.
//
// Reproducibility: a master generator seeded once per call pre-generates one
// sub-seed per iteration. Iterations then run in parallel on rayon, each with
// its own generator, so the output is identical for any thread count.

use crate::analysis::statistics::{quantile_sorted, relative_lift};
use crate::error::{AnalysisError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;

/// Percentile interval over the bootstrap lift distribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BootstrapInterval {
    /// alpha/2 quantile of the retained lifts
    pub low: f64,

    /// 1 - alpha/2 quantile of the retained lifts
    pub high: f64,

    /// Nominal coverage (1 - alpha)
    pub confidence: f64,

    /// Iterations with a defined lift
    pub retained: usize,

    /// Iterations dropped because the resampled control mean was zero
    pub excluded: usize,
}

impl BootstrapInterval {
    pub fn width(&self) -> f64 {
        self.high - self.low
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }
}

/// Parameters for one bootstrap run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BootstrapParams {
    pub n_boot: usize,
    pub alpha: f64,
    pub seed: u64,
    /// Minimum defined lifts required to form the interval
    pub min_samples: usize,
}

impl BootstrapParams {
    pub fn new(n_boot: usize, alpha: f64, seed: u64) -> Self {
        Self {
            n_boot,
            alpha,
            seed,
            min_samples: 2,
        }
    }
}

/// Compute the bootstrap lift interval for control `a` and variant `b`
///
/// # Example
/// ```
/// use abtest::analysis::{bootstrap_lift_ci, BootstrapParams};
///
/// let a = [10.0, 10.0, 10.0, 12.0];
/// let b = [12.0, 12.0, 12.0, 14.0];
/// let ci = bootstrap_lift_ci(&a, &b, &BootstrapParams::new(2000, 0.05, 42)).unwrap();
/// assert!(ci.low > 0.0 && ci.low <= ci.high);
/// ```
pub fn bootstrap_lift_ci(a: &[f64], b: &[f64], params: &BootstrapParams) -> Result<BootstrapInterval> {
    if params.n_boot == 0 {
        return Err(AnalysisError::InvalidConfig(
            "n_boot must be a positive integer, got 0".to_string(),
        ));
    }
    if !(params.alpha > 0.0 && params.alpha < 1.0) {
        return Err(AnalysisError::InvalidConfig(format!(
            "alpha must be in (0, 1), got {}",
            params.alpha
        )));
    }
    for (group, sample) in [('A', a), ('B', b)] {
        if sample.is_empty() {
            return Err(AnalysisError::DegenerateSample { group, n: 0 });
        }
    }

    let mut master = StdRng::seed_from_u64(params.seed);
    let sub_seeds: Vec<u64> = (0..params.n_boot).map(|_| master.gen()).collect();

    let lifts: Vec<Option<f64>> = sub_seeds
        .par_iter()
        .map(|&seed| resample_lift(a, b, seed))
        .collect();

    let mut retained: Vec<f64> = lifts.into_iter().flatten().collect();
    let excluded = params.n_boot - retained.len();
    if excluded > 0 {
        tracing::warn!(
            excluded,
            n_boot = params.n_boot,
            "Bootstrap iterations excluded for undefined resampled lift"
        );
    }

    let required = params.min_samples.max(2);
    if retained.len() < required {
        return Err(AnalysisError::InsufficientBootstrapSamples {
            retained: retained.len(),
            required,
        });
    }

    retained.sort_by(f64::total_cmp);
    let interval = BootstrapInterval {
        low: quantile_sorted(&retained, params.alpha / 2.0),
        high: quantile_sorted(&retained, 1.0 - params.alpha / 2.0),
        confidence: 1.0 - params.alpha,
        retained: retained.len(),
        excluded,
    };

    tracing::debug!(
        low = interval.low,
        high = interval.high,
        retained = interval.retained,
        "Bootstrap interval"
    );
    Ok(interval)
}

/// One bootstrap iteration with its own generator
fn resample_lift(a: &[f64], b: &[f64], seed: u64) -> Option<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mean_a = resample_mean(a, &mut rng);
    let mean_b = resample_mean(b, &mut rng);
    relative_lift(mean_a, mean_b)
}

fn resample_mean(values: &[f64], rng: &mut StdRng) -> f64 {
    // u64 draws keep the index stream identical on 32- and 64-bit targets
    let len = values.len() as u64;
    let sum: f64 = (0..len)
        .map(|_| values[rng.gen_range(0..len) as usize])
        .sum();
    sum / len as f64
}
