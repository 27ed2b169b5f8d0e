// Two-group A/B test analysis engine
//
// Pipeline: validate/split -> winsorize -> {hypothesis tests, bootstrap} -> assemble.
//
// - Validation turns a loosely-typed `Dataset` into two finite `Sample`s;
//   no statistic ever sees a raw cell
// - Welch's t-test (parametric) and Mann-Whitney U (rank-based) run on the
//   same possibly-winsorized samples and do not depend on each other
// - The bootstrap owns a generator seeded once per call, never shared
//   across calls, and is parallelised with deterministic sub-seeds

mod bootstrap;
mod engine;
mod hypothesis;
mod result;
mod sample;
pub mod statistics;
mod validate;
mod winsorize;

pub use bootstrap::{bootstrap_lift_ci, BootstrapInterval, BootstrapParams};
pub use engine::{analyze, analyze_groups};
pub use hypothesis::{
    mann_whitney_u, welch_t_test, MannWhitneyTest, PValueMethod, WelchTest,
    EXACT_MANN_WHITNEY_MAX_N,
};
pub use result::{ABResult, AnalysisWarning};
pub use sample::{GroupAssignment, Sample};
pub use validate::{parse_numeric, split_groups};
pub(crate) use validate::order_labels;
pub use winsorize::{winsor_bounds, winsorize, winsorize_sample};
