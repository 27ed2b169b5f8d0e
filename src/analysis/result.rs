// Result assembly
//
// Pure aggregation of per-group descriptives, both tests, the bootstrap
// interval and the echoed configuration into one record.

use crate::analysis::bootstrap::BootstrapInterval;
use crate::analysis::hypothesis::{MannWhitneyTest, WelchTest};
use crate::analysis::sample::Sample;
use crate::analysis::statistics::relative_lift;
use crate::config::AnalysisConfig;
use serde::Serialize;

/// Numeric conditions worth reporting that do not abort the analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisWarning {
    /// Control mean is zero or not finite, so the point lift is undefined
    UndefinedLift,

    /// Some bootstrap iterations had an undefined resampled lift
    BootstrapExclusions { excluded: usize, total: usize },
}

impl std::fmt::Display for AnalysisWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisWarning::UndefinedLift => {
                write!(f, "Control mean is zero or not finite; relative lift is undefined")
            }
            AnalysisWarning::BootstrapExclusions { excluded, total } => write!(
                f,
                "{} of {} bootstrap resamples had an undefined lift and were excluded",
                excluded, total
            ),
        }
    }
}

/// Complete outcome of one A/B analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ABResult {
    pub group_a_label: String,
    pub group_b_label: String,
    pub group_a_mean: f64,
    pub group_b_mean: f64,
    pub group_a_n: usize,
    pub group_b_n: usize,

    /// (mean_B - mean_A) / mean_A; `None` when mean_A is zero
    pub lift: Option<f64>,

    pub welch: WelchTest,
    pub mann_whitney: MannWhitneyTest,
    pub ci: BootstrapInterval,

    pub alpha: f64,
    pub winsor: f64,
    pub n_boot: usize,

    /// Seed actually used for the bootstrap (drawn from entropy if none was configured)
    pub seed: u64,

    pub metric: String,
    pub group_col: String,
    pub value_col: String,

    pub warnings: Vec<AnalysisWarning>,
}

impl ABResult {
    /// Welch p-value below alpha; a NaN p-value is never significant
    pub fn is_significant(&self) -> bool {
        self.welch.pvalue < self.alpha
    }

    /// Bootstrap interval excludes zero lift
    pub fn ci_excludes_zero(&self) -> bool {
        !self.ci.contains(0.0)
    }
}

/// Borrowed pieces of a finished analysis
pub(crate) struct ResultParts<'a> {
    pub a_label: &'a str,
    pub b_label: &'a str,
    pub a: &'a Sample,
    pub b: &'a Sample,
    pub welch: WelchTest,
    pub mann_whitney: MannWhitneyTest,
    pub ci: BootstrapInterval,
    pub config: &'a AnalysisConfig,
    pub seed: u64,
    pub group_col: &'a str,
    pub value_col: &'a str,
}

pub(crate) fn assemble(parts: ResultParts<'_>) -> ABResult {
    let group_a_mean = parts.a.mean();
    let group_b_mean = parts.b.mean();
    let lift = relative_lift(group_a_mean, group_b_mean);

    let mut warnings = Vec::new();
    if lift.is_none() {
        warnings.push(AnalysisWarning::UndefinedLift);
    }
    if parts.ci.excluded > 0 {
        warnings.push(AnalysisWarning::BootstrapExclusions {
            excluded: parts.ci.excluded,
            total: parts.config.n_boot,
        });
    }

    ABResult {
        group_a_label: parts.a_label.to_string(),
        group_b_label: parts.b_label.to_string(),
        group_a_mean,
        group_b_mean,
        group_a_n: parts.a.len(),
        group_b_n: parts.b.len(),
        lift,
        welch: parts.welch,
        mann_whitney: parts.mann_whitney,
        ci: parts.ci,
        alpha: parts.config.alpha,
        winsor: parts.config.winsor,
        n_boot: parts.config.n_boot,
        seed: parts.seed,
        metric: parts.value_col.to_string(),
        group_col: parts.group_col.to_string(),
        value_col: parts.value_col.to_string(),
        warnings,
    }
}
