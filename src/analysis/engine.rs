// Analysis entry points
//
// A call is a pure function of (dataset, config) plus the bootstrap stream it
// owns. Either a complete `ABResult` is produced or an error is returned.

use crate::analysis::bootstrap::{bootstrap_lift_ci, BootstrapParams};
use crate::analysis::hypothesis::{mann_whitney_u, welch_t_test};
use crate::analysis::result::{assemble, ABResult, ResultParts};
use crate::analysis::sample::GroupAssignment;
use crate::analysis::validate::split_groups;
use crate::analysis::winsorize::winsorize_sample;
use crate::config::AnalysisConfig;
use crate::dataset::Dataset;
use crate::error::Result;
use tracing::info;

/// Run the full A/B analysis on a dataset
///
/// The configuration is validated before any data is touched.
///
/// # Example
/// ```
/// use abtest::{analyze, AnalysisConfig, Dataset};
///
/// let ds = Dataset::from_csv_str(
///     "group,revenue\nA,10\nA,10\nA,10\nA,12\nB,12\nB,12\nB,12\nB,14\n",
/// ).unwrap();
/// let config = AnalysisConfig { n_boot: 2000, ..AnalysisConfig::default() };
/// let result = analyze(&ds, "group", "revenue", &config).unwrap();
///
/// assert_eq!(result.group_a_mean, 10.5);
/// assert_eq!(result.group_b_mean, 12.5);
/// assert!((result.lift.unwrap() - 0.1905).abs() < 1e-4);
/// assert!(result.welch.statistic > 0.0);
/// ```
#[tracing::instrument(skip(dataset, config), fields(rows = dataset.len()))]
pub fn analyze(
    dataset: &Dataset,
    group_col: &str,
    value_col: &str,
    config: &AnalysisConfig,
) -> Result<ABResult> {
    config.validate()?;
    let groups = split_groups(dataset, group_col, value_col)?;
    analyze_groups(&groups, group_col, value_col, config)
}

/// Run the analysis on an already-validated control/variant pair
pub fn analyze_groups(
    groups: &GroupAssignment,
    group_col: &str,
    value_col: &str,
    config: &AnalysisConfig,
) -> Result<ABResult> {
    config.validate()?;

    let a = winsorize_sample(&groups.a, config.winsor);
    let b = winsorize_sample(&groups.b, config.winsor);

    let welch = welch_t_test(a.values(), b.values())?;
    let mann_whitney = mann_whitney_u(a.values(), b.values())?;

    let seed = config.seed.unwrap_or_else(rand::random);
    let ci = bootstrap_lift_ci(
        a.values(),
        b.values(),
        &BootstrapParams {
            n_boot: config.n_boot,
            alpha: config.alpha,
            seed,
            min_samples: config.min_bootstrap_samples,
        },
    )?;

    let result = assemble(ResultParts {
        a_label: &groups.a_label,
        b_label: &groups.b_label,
        a: &a,
        b: &b,
        welch,
        mann_whitney,
        ci,
        config,
        seed,
        group_col,
        value_col,
    });

    info!(
        a = %result.group_a_label,
        b = %result.group_b_label,
        lift = ?result.lift,
        welch_p = result.welch.pvalue,
        mw_p = result.mann_whitney.pvalue,
        ci_low = result.ci.low,
        ci_high = result.ci.high,
        "Analysis complete"
    );
    Ok(result)
}
